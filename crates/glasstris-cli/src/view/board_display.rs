use glasstris_engine::{Game, SPAWN_BUFFER_ROWS};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    prelude::Buffer,
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::{app::Spark, view::CellDisplay};

/// The glass with the locked stack, ghost, falling piece, and any live
/// burst fragments. The two hidden spawn rows are not drawn.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    game: &'a Game,
    sparks: &'a [Spark],
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(game: &'a Game) -> Self {
        Self {
            game,
            sparks: &[],
            block: None,
        }
    }

    pub fn sparks(self, sparks: &'a [Spark]) -> Self {
        Self { sparks, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn cols(&self) -> u16 {
        self.game.board().cols().unsigned_abs()
    }

    fn visible_rows(&self) -> u16 {
        (self.game.board().rows() - SPAWN_BUFFER_ROWS).unsigned_abs()
    }

    pub fn width(&self) -> u16 {
        self.cols() * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        self.visible_rows() * CellDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let board = self.game.board();
        let cols = usize::from(self.cols());
        let visible_rows = usize::from(self.visible_rows());

        let mut grid: Vec<CellDisplay> = board
            .cell_rows()
            .skip(usize::from(SPAWN_BUFFER_ROWS.unsigned_abs()))
            .flatten()
            .map(|cell| {
                cell.colors()
                    .map_or_else(CellDisplay::empty, CellDisplay::locked)
            })
            .collect();

        let mut put = |x: i16, y: i16, display: CellDisplay| {
            let y = y - SPAWN_BUFFER_ROWS;
            if (0..board.cols()).contains(&x) && y >= 0 {
                if let Some(slot) =
                    grid.get_mut(usize::from(y.unsigned_abs()) * cols + usize::from(x.unsigned_abs()))
                {
                    *slot = display;
                }
            }
        };

        if self.game.state().is_running() {
            for (x, y) in self.game.ghost_piece().cells() {
                put(x, y, CellDisplay::ghost());
            }
            let brightness = if self.game.is_piece_locking() {
                0.4 + 0.6 * self.game.pulse_intensity()
            } else {
                1.0
            };
            let colors = self.game.current_piece().colors();
            for (x, y) in self.game.current_piece().cells() {
                put(x, y, CellDisplay::active(colors, brightness));
            }
        }

        for spark in self.sparks {
            put(spark.x, spark.y, CellDisplay::spark(spark.color, spark.intensity()));
        }

        let row_constraints = (0..visible_rows).map(|_| Constraint::Length(CellDisplay::height()));
        let col_constraints = (0..cols).map(|_| Constraint::Length(CellDisplay::width()));
        let rows = Layout::vertical(row_constraints).split(area);
        for (row_index, row_area) in rows.iter().enumerate() {
            let cells = Layout::horizontal(col_constraints.clone())
                .flex(Flex::Center)
                .split(*row_area);
            for (col_index, cell_area) in cells.iter().enumerate() {
                Widget::render(&grid[row_index * cols + col_index], *cell_area, buf);
            }
        }
    }
}
