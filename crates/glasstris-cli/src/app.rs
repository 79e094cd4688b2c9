use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEventKind};
use glasstris_engine::{BagSeed, ClearedCell, Game, GameConfig, Rgb};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Widget},
};
use ratatui_runtime::{App, Runtime};

use crate::{
    input::KeyIntents,
    view::{BoardDisplay, InfoPanel, NextPanel, color},
};

const SPARK_TTL: Duration = Duration::from_millis(300);

/// A burst fragment from a cleared line, fading out over its lifetime.
#[derive(Debug)]
pub struct Spark {
    pub x: i16,
    pub y: i16,
    pub color: Rgb,
    age: Duration,
}

impl From<ClearedCell> for Spark {
    fn from(cell: ClearedCell) -> Self {
        Self {
            x: cell.x,
            y: cell.y,
            color: cell.color,
            age: Duration::ZERO,
        }
    }
}

impl Spark {
    fn tick(&mut self, delta: Duration) {
        self.age += delta;
    }

    fn is_done(&self) -> bool {
        self.age >= SPARK_TTL
    }

    /// Remaining brightness in `[0, 1]`.
    pub fn intensity(&self) -> f64 {
        1.0 - (self.age.as_secs_f64() / SPARK_TTL.as_secs_f64()).min(1.0)
    }
}

/// The interactive session: one game, its input buffer, and the burst
/// effects in flight.
#[derive(Debug)]
pub struct GameApp {
    game: Game,
    intents: KeyIntents,
    sparks: Vec<Spark>,
    frame_rate: f64,
    best_score: u64,
    is_exiting: bool,
}

impl GameApp {
    pub fn new(config: GameConfig, seed: Option<BagSeed>, frame_rate: f64) -> Self {
        let game = match seed {
            Some(seed) => Game::with_seed(config, seed),
            None => Game::new(config),
        };
        Self {
            game,
            intents: KeyIntents::new(),
            sparks: Vec::new(),
            frame_rate,
            best_score: 0,
            is_exiting: false,
        }
    }

    /// The best score reached across restarts, including the live session.
    pub fn best_score(&self) -> u64 {
        self.best_score.max(self.game.progression().score())
    }

    fn restart(&mut self) {
        self.best_score = self.best_score();
        self.game.restart();
        self.sparks.clear();
        self.intents.clear();
    }
}

impl App for GameApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_frame_rate(self.frame_rate);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        let Some(key) = event.as_key_event() else {
            return;
        };
        if key.kind == KeyEventKind::Release {
            return;
        }
        if self.game.state().is_running() && self.intents.record(key) {
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
            KeyCode::Char('r') => self.restart(),
            _ => {}
        }
    }

    fn update(&mut self, _runtime: &mut Runtime, delta: Duration) {
        self.game.tick(delta, &mut self.intents);

        self.sparks
            .extend(self.game.drain_cleared_cells().into_iter().map(Spark::from));
        for spark in &mut self.sparks {
            spark.tick(delta);
        }
        self.sparks.retain(|spark| !spark.is_done());

        if self.game.state().is_game_over() {
            self.intents.clear();
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let base_style = Style::new().fg(color::WHITE).bg(color::BLACK);
        let border_style = if self.game.state().is_game_over() {
            Style::new().fg(color::RED)
        } else {
            Style::new().fg(color::WHITE)
        };

        let board = BoardDisplay::new(&self.game).sparks(&self.sparks).block(
            Block::bordered().border_style(border_style).style(base_style),
        );
        let info = InfoPanel::new(&self.game).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .border_style(border_style)
                .style(base_style),
        );
        let next = NextPanel::new(&self.game).block(
            Block::bordered()
                .title(Line::from("NEXT").centered())
                .border_style(border_style)
                .style(base_style),
        );

        let help_text = if self.game.state().is_game_over() {
            "Controls: R (New Game) | Q (Quit)"
        } else {
            "Controls: ← → (Move) | ↓ (Soft Drop) | ↑ X Z (Rotate) | Space (Hard Drop) | Q (Quit)"
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(board.height()), Constraint::Length(1)])
                .areas(frame.area());
        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(info.width()),
            Constraint::Length(board.width()),
            Constraint::Length(next.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(main_area);

        let [info_area] =
            Layout::vertical([Constraint::Length(info.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next.height())]).areas(right_column);

        let board_width = board.width();
        info.render(info_area, frame.buffer_mut());
        board.render(board_area, frame.buffer_mut());
        next.render(next_area, frame.buffer_mut());
        frame.render_widget(help_text, help_area);

        if self.game.state().is_game_over() {
            let style = Style::new().fg(color::WHITE).bg(color::RED);
            let block = Block::new().style(style);
            let text = Text::styled("GAME OVER!!", style).centered();
            let area =
                board_area.centered(Constraint::Length(board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, frame.buffer_mut());
            block.render(area, frame.buffer_mut());
            text.render(
                inner.centered_vertically(Constraint::Length(1)),
                frame.buffer_mut(),
            );
        }
    }
}
