use glasstris_engine::Game;
use ratatui::{
    layout::Rect,
    prelude::Buffer,
    text::{Line, Text},
    widgets::{Block as BlockWidget, BlockExt, Paragraph, Widget},
};

/// Score, level, line count, and session time.
#[derive(Debug)]
pub struct InfoPanel<'a> {
    game: &'a Game,
    block: Option<BlockWidget<'a>>,
}

impl<'a> InfoPanel<'a> {
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
        16 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        4 + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Session time as `mm:ss:cc` (minutes, seconds, centiseconds).
fn format_elapsed(game: &Game) -> String {
    let ms = game.elapsed().as_millis();
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    let centis = (ms % 1000) / 10;
    format!("{minutes:02}:{seconds:02}:{centis:02}")
}

impl Widget for InfoPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &InfoPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let progression = self.game.progression();
        let text = Text::from(vec![
            Line::from(format!("SCORE {:>9}", progression.score())),
            Line::from(format!("LEVEL {:>9}", progression.level())),
            Line::from(format!("LINES {:>9}", progression.lines())),
            Line::from(format!("TIME   {:>8}", format_elapsed(self.game))),
        ]);
        Paragraph::new(text).render(area, buf);
    }
}
