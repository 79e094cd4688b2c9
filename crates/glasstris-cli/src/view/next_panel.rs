use glasstris_engine::{Game, Piece};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    prelude::Buffer,
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::view::CellDisplay;

/// Preview of the next piece to spawn.
#[derive(Debug)]
pub struct NextPanel<'a> {
    game: &'a Game,
    block: Option<BlockWidget<'a>>,
}

impl<'a> NextPanel<'a> {
    pub fn new(game: &'a Game) -> Self {
        Self { game, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        4 * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for NextPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &NextPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(kind) = self.game.upcoming_pieces().next() else {
            return;
        };
        let colors = kind.colors();

        // Every spawn shape fits in a 4×2 box.
        let mut shape = [[false; 4]; 2];
        for (x, y) in Piece::new(kind).cells() {
            if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) {
                if x < 4 && y < 2 {
                    shape[y][x] = true;
                }
            }
        }

        let rows = Layout::vertical([Constraint::Length(CellDisplay::height()); 2]).split(area);
        for (y, row_area) in rows.iter().enumerate() {
            let cells = Layout::horizontal([Constraint::Length(CellDisplay::width()); 4])
                .flex(Flex::Center)
                .split(*row_area);
            for (x, cell_area) in cells.iter().enumerate() {
                if shape[y][x] {
                    CellDisplay::locked(colors).render(*cell_area, buf);
                }
            }
        }
    }
}
