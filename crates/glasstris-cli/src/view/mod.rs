use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{board_display::*, cell_display::*, info_panel::*, next_panel::*};

mod board_display;
mod cell_display;
mod info_panel;
mod next_panel;

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}

pub mod color {
    use glasstris_engine::Rgb;
    use ratatui::style::Color;

    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const GRAY: Color = Color::Rgb(64, 64, 64);
    pub const RED: Color = Color::Rgb(255, 0, 0);

    pub fn from_rgb(rgb: Rgb) -> Color {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }

    /// The color scaled toward black by `brightness` in `[0, 1]`.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn dimmed(rgb: Rgb, brightness: f64) -> Color {
        let factor = brightness.clamp(0.0, 1.0);
        Color::Rgb(
            (f64::from(rgb.0) * factor).round() as u8,
            (f64::from(rgb.1) * factor).round() as u8,
            (f64::from(rgb.2) * factor).round() as u8,
        )
    }
}
