use glasstris_engine::{ColorPair, GHOST_COLORS, Rgb};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::view::color;

/// One glass cell, rendered as a 2×1 block of terminal cells.
///
/// Filled cells use the upper-half-block glyph so the piece's light color
/// sits over its dark one, echoing the gradient fill of the original.
#[derive(Debug)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn width() -> u16 {
        2
    }

    pub fn height() -> u16 {
        1
    }

    pub fn empty() -> Self {
        Self::new(Style::new().fg(color::GRAY).bg(color::BLACK), ".")
    }

    pub fn locked(colors: ColorPair) -> Self {
        Self::new(
            Style::new()
                .fg(color::from_rgb(colors.light))
                .bg(color::from_rgb(colors.dark)),
            "▀▀",
        )
    }

    pub fn ghost() -> Self {
        Self::new(
            Style::new()
                .fg(color::from_rgb(GHOST_COLORS.light))
                .bg(color::BLACK),
            "[]",
        )
    }

    /// The falling piece, dimmed toward black while its lock timer pulses.
    pub fn active(colors: ColorPair, brightness: f64) -> Self {
        Self::new(
            Style::new()
                .fg(color::dimmed(colors.light, brightness))
                .bg(color::dimmed(colors.dark, brightness)),
            "▀▀",
        )
    }

    /// A fading burst fragment from a cleared line.
    pub fn spark(rgb: Rgb, intensity: f64) -> Self {
        Self::new(
            Style::new().fg(color::dimmed(rgb, intensity)).bg(color::BLACK),
            "**",
        )
    }
}

impl Widget for CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // A Paragraph fills the whole area, not just the symbol cells.
        Paragraph::new(self.symbol)
            .style(self.style)
            .render(area, buf);
    }
}
