use std::{mem, time::Duration};

use derive_more::IsVariant;
use rand::Rng as _;

use crate::{
    core::{Board, Piece, PieceKind, Rgb, RotationDir},
    engine::{BagSeed, GameConfig, LockDelay, PieceBag, Progression},
};

/// A player intent applied to the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateCw,
    RotateCcw,
    HardDrop,
}

/// Whether the session is still playable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, IsVariant)]
pub enum GameState {
    #[default]
    Running,
    GameOver,
}

/// A cell that vanished in a line clear, emitted for burst effects.
///
/// Events queue up until the renderer drains them; the simulation never
/// looks at them again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearedCell {
    pub x: i16,
    pub y: i16,
    pub color: Rgb,
}

/// Supplies buffered player actions to [`Game::tick`].
///
/// Implementations drain their backlog one action per call; the game keeps
/// polling until `None`. The unit type is an empty source for ticks driven
/// by time alone.
pub trait InputSource {
    fn next_action(&mut self) -> Option<GameAction>;
}

impl InputSource for () {
    fn next_action(&mut self) -> Option<GameAction> {
        None
    }
}

/// One full game session: glass, active piece, bag, scoring, and timing.
///
/// Everything advances through [`Self::tick`], which is driven by wall-time
/// deltas from the caller's frame loop. With a fixed [`BagSeed`] and the
/// same action timeline, two sessions evolve identically.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    board: Board,
    bag: PieceBag,
    current: Piece,
    lock: LockDelay,
    progression: Progression,
    drop_interval: Duration,
    lock_delay: Duration,
    drop_accumulator: Duration,
    pulse_time: Duration,
    elapsed: Duration,
    cleared_cells: Vec<ClearedCell>,
    state: GameState,
}

impl Game {
    /// Starts a session with a random bag seed.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_seed(config, rand::rng().random())
    }

    /// Starts a session with a fixed bag seed for deterministic piece order.
    #[must_use]
    pub fn with_seed(config: GameConfig, seed: BagSeed) -> Self {
        let board = Board::new(config.cols, config.rows);
        let mut bag = PieceBag::with_seed(seed);
        let current = Piece::spawn_centered(bag.draw(), config.cols);
        Self {
            config,
            board,
            bag,
            current,
            lock: LockDelay::new(),
            progression: Progression::new(),
            drop_interval: Progression::INITIAL_DROP_INTERVAL,
            lock_delay: config.initial_lock_delay(),
            drop_accumulator: Duration::ZERO,
            pulse_time: Duration::ZERO,
            elapsed: Duration::ZERO,
            cleared_cells: Vec::new(),
            state: GameState::Running,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn current_piece(&self) -> &Piece {
        &self.current
    }

    /// Where the active piece would land if hard-dropped now.
    #[must_use]
    pub fn ghost_piece(&self) -> Piece {
        self.current.dropped(&self.board)
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    /// Wall time since the session started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Upcoming piece kinds from the bag, nearest first.
    pub fn upcoming_pieces(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.bag.upcoming()
    }

    /// Whether the active piece is grounded with its lock timer running.
    #[must_use]
    pub fn is_piece_locking(&self) -> bool {
        self.lock.phase().is_locking()
    }

    /// Glow strength of the active piece while it sits on support.
    ///
    /// Oscillates in `[0, 1]` with a period of about 314 ms; zero whenever
    /// the piece is falling freely.
    #[must_use]
    pub fn pulse_intensity(&self) -> f64 {
        if self.lock.phase().is_locking() {
            let ms = self.pulse_time.as_secs_f64() * 1000.0;
            ((ms * 0.02).sin() + 1.0) / 2.0
        } else {
            0.0
        }
    }

    /// Removes and returns the line-clear events accumulated since the
    /// last drain.
    pub fn drain_cleared_cells(&mut self) -> Vec<ClearedCell> {
        mem::take(&mut self.cleared_cells)
    }

    /// Advances the session by `delta` of wall time.
    ///
    /// Player actions are applied first, then the lock-delay machine is
    /// evaluated against the piece's new support state, then gravity moves
    /// the piece if its interval elapsed. A finished session ignores ticks.
    pub fn tick(&mut self, delta: Duration, input: &mut impl InputSource) {
        if self.state.is_game_over() {
            return;
        }
        self.elapsed += delta;

        while let Some(action) = input.next_action() {
            // Only actions that change the piece restart the lock timer;
            // each one spends a unit of the interruption budget.
            if self.apply_action(action) {
                self.lock.note_action();
            }
            if self.state.is_game_over() {
                return;
            }
        }

        let grounded = !self.board.can_shift(&self.current, 0, 1);
        let commit = self.lock.tick(
            grounded,
            self.current.max_y(),
            delta,
            self.lock_delay,
            self.config.max_lock_drops,
        );
        if commit {
            self.commit_lock();
            if self.state.is_game_over() {
                return;
            }
        }

        self.drop_accumulator += delta;
        if self.drop_accumulator >= self.drop_interval {
            if self.board.can_shift(&self.current, 0, 1) {
                self.current = self.current.shifted(0, 1);
            }
            self.drop_accumulator = Duration::ZERO;
        }

        if self.lock.phase().is_locking() {
            self.pulse_time += delta;
        } else {
            self.pulse_time = Duration::ZERO;
        }
    }

    /// Applies one action, reporting whether it changed the piece.
    ///
    /// A move into a wall, a rotation with no valid kick, and a soft drop
    /// on a grounded piece all fail and return `false`.
    fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_shift(-1, 0),
            GameAction::MoveRight => self.try_shift(1, 0),
            GameAction::SoftDrop => {
                let moved = self.try_shift(0, 1);
                if moved {
                    self.progression.award_soft_drop();
                }
                moved
            }
            GameAction::RotateCw => self.try_rotate(RotationDir::Cw),
            GameAction::RotateCcw => self.try_rotate(RotationDir::Ccw),
            GameAction::HardDrop => {
                self.hard_drop();
                true
            }
        }
    }

    fn try_shift(&mut self, dx: i16, dy: i16) -> bool {
        if self.board.can_shift(&self.current, dx, dy) {
            self.current = self.current.shifted(dx, dy);
            true
        } else {
            false
        }
    }

    fn try_rotate(&mut self, dir: RotationDir) -> bool {
        match self.current.super_rotated(&self.board, dir) {
            Some(rotated) => {
                self.current = rotated;
                true
            }
            None => false,
        }
    }

    /// Drops the piece to its resting position and locks it immediately.
    fn hard_drop(&mut self) {
        let start_y = self.current.max_y();
        self.current = self.current.dropped(&self.board);
        let cells = u32::from((self.current.max_y() - start_y).unsigned_abs());
        self.progression.award_hard_drop(cells);
        self.commit_lock();
        self.lock.reset();
        self.pulse_time = Duration::ZERO;
    }

    /// Bakes the active piece into the glass and runs the consequences:
    /// line clears, scoring, the game-over check, and the next spawn.
    fn commit_lock(&mut self) {
        self.board.lock_piece(&self.current);

        let lines = self.board.full_lines();
        if !lines.is_empty() {
            for &y in &lines {
                for x in 0..self.board.cols() {
                    if let Some(colors) = self.board.cell(x, y).colors() {
                        self.cleared_cells.push(ClearedCell {
                            x,
                            y,
                            color: colors.light,
                        });
                    }
                }
            }
            self.board.collapse_lines(&lines);
            if self.progression.award_line_clear(lines.len()) {
                self.drop_interval = self.progression.drop_interval();
                self.lock_delay = self.progression.lock_delay();
            }
        }

        if self.board.is_game_over() {
            self.state = GameState::GameOver;
            return;
        }
        self.spawn_next();
    }

    fn spawn_next(&mut self) {
        self.current = Piece::spawn_centered(self.bag.draw(), self.config.cols);
        self.drop_accumulator = Duration::ZERO;
    }

    /// Resets the session for another round, keeping the bag's random
    /// stream running.
    pub fn restart(&mut self) {
        self.board.reset();
        self.progression = Progression::new();
        self.lock.reset();
        self.drop_interval = Progression::INITIAL_DROP_INTERVAL;
        self.lock_delay = self.config.initial_lock_delay();
        self.drop_accumulator = Duration::ZERO;
        self.pulse_time = Duration::ZERO;
        self.elapsed = Duration::ZERO;
        self.cleared_cells.clear();
        self.state = GameState::Running;
        self.spawn_next();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    const SEED: u128 = 0xfeed_beef_0123_4567_89ab_cdef_0102_0304;

    struct Script(VecDeque<GameAction>);

    impl Script {
        fn of(actions: &[GameAction]) -> Self {
            Self(actions.iter().copied().collect())
        }
    }

    impl InputSource for Script {
        fn next_action(&mut self) -> Option<GameAction> {
            self.0.pop_front()
        }
    }

    fn game() -> Game {
        Game::with_seed(GameConfig::default(), BagSeed::from(SEED))
    }

    /// Swaps in a piece of a known kind at its spawn position.
    fn set_current(game: &mut Game, kind: PieceKind) {
        game.current = Piece::spawn_centered(kind, game.config.cols);
    }

    fn occupied_cells(game: &Game) -> usize {
        game.board
            .cell_rows()
            .flatten()
            .filter(|cell| cell.is_occupied())
            .count()
    }

    #[test]
    fn hard_drop_awards_two_points_per_cell_and_locks() {
        let mut game = game();
        set_current(&mut game, PieceKind::I);
        game.tick(Duration::ZERO, &mut Script::of(&[GameAction::HardDrop]));

        // The flat I piece falls from row 0 to row 21.
        assert_eq!(game.progression().score(), 42);
        assert_eq!(occupied_cells(&game), 4);
        for x in 3..7 {
            assert!(game.board().cell(x, 21).is_occupied());
        }
        // A fresh piece is already active.
        assert!(game.state().is_running());
        assert_eq!(game.current_piece().cells().iter().map(|&(_, y)| y).min(), Some(0));
    }

    #[test]
    fn soft_drop_scores_one_point_per_descended_cell() {
        let mut game = game();
        set_current(&mut game, PieceKind::T);
        game.tick(
            Duration::ZERO,
            &mut Script::of(&[GameAction::SoftDrop, GameAction::SoftDrop]),
        );
        assert_eq!(game.progression().score(), 2);
        assert_eq!(game.current_piece().max_y(), 3);
    }

    #[test]
    fn failed_moves_score_and_count_nothing() {
        let mut game = game();
        // Pin the piece against the left wall.
        set_current(&mut game, PieceKind::O);
        game.tick(
            Duration::ZERO,
            &mut Script::of(&[GameAction::MoveLeft; 8]),
        );
        let wedged = game.current_piece().cells();
        game.tick(Duration::ZERO, &mut Script::of(&[GameAction::MoveLeft]));
        assert_eq!(game.current_piece().cells(), wedged);
        assert_eq!(game.progression().score(), 0);
    }

    #[test]
    fn gravity_moves_the_piece_once_per_interval() {
        let mut game = game();
        set_current(&mut game, PieceKind::S);
        let start = game.current_piece().max_y();

        game.tick(Duration::from_millis(700), &mut ());
        assert_eq!(game.current_piece().max_y(), start);

        game.tick(Duration::from_millis(100), &mut ());
        assert_eq!(game.current_piece().max_y(), start + 1);

        // The accumulator restarted from zero.
        game.tick(Duration::from_millis(700), &mut ());
        assert_eq!(game.current_piece().max_y(), start + 1);
    }

    #[test]
    fn grounded_piece_locks_after_the_delay() {
        let mut game = game();
        set_current(&mut game, PieceKind::O);
        game.current = game.current.dropped(&game.board);

        // First tick grounds the piece and arms the timer.
        game.tick(Duration::from_millis(16), &mut ());
        assert!(game.lock.phase().is_locking());
        assert_eq!(occupied_cells(&game), 0);

        game.tick(Duration::from_millis(999), &mut ());
        assert_eq!(occupied_cells(&game), 0);
        game.tick(Duration::from_millis(1), &mut ());
        assert_eq!(occupied_cells(&game), 4);
        assert!(game.state().is_running());
    }

    #[test]
    fn successful_actions_restart_the_lock_timer() {
        let mut game = game();
        set_current(&mut game, PieceKind::O);
        game.current = game.current.dropped(&game.board);
        game.tick(Duration::from_millis(16), &mut ());
        game.tick(Duration::from_millis(900), &mut ());

        // A blocked move leaves the timer running.
        game.tick(Duration::ZERO, &mut Script::of(&[GameAction::SoftDrop]));
        assert!(game.lock.timer() >= Duration::from_millis(900));

        // A successful slide restarts it.
        game.tick(Duration::ZERO, &mut Script::of(&[GameAction::MoveRight]));
        assert_eq!(game.lock.timer(), Duration::ZERO);
        assert_eq!(occupied_cells(&game), 0);
    }

    #[test]
    fn exhausting_the_interruption_budget_locks_the_piece() {
        let mut game = game();
        set_current(&mut game, PieceKind::O);
        game.current = game.current.dropped(&game.board);
        game.tick(Duration::from_millis(16), &mut ());

        // Wiggle left and right; every move succeeds and spends budget.
        // Spending exactly the budget keeps the piece alive.
        for i in 0..game.config.max_lock_drops {
            let action = if i % 2 == 0 {
                GameAction::MoveLeft
            } else {
                GameAction::MoveRight
            };
            game.tick(Duration::ZERO, &mut Script::of(&[action]));
        }
        assert_eq!(occupied_cells(&game), 0);
        // The move past the budget locks within its own tick.
        game.tick(Duration::ZERO, &mut Script::of(&[GameAction::MoveLeft]));
        assert_eq!(occupied_cells(&game), 4);
    }

    #[test]
    fn completed_line_clears_score_and_emit_burst_events() {
        let mut game = game();
        // Fill row 21 except columns 4 and 5.
        game.board
            .lock_piece(&Piece::new(PieceKind::I).shifted(0, 21));
        game.board
            .lock_piece(&Piece::new(PieceKind::I).shifted(6, 21));
        set_current(&mut game, PieceKind::O);

        game.tick(Duration::ZERO, &mut Script::of(&[GameAction::HardDrop]));

        assert_eq!(game.progression().lines(), 1);
        // 20 cells of hard drop plus a single line at level 1.
        assert_eq!(game.progression().score(), 40 + 100);

        let burst = game.drain_cleared_cells();
        assert_eq!(burst.len(), 10);
        assert!(burst.iter().all(|cell| cell.y == 21));
        // Draining empties the queue.
        assert!(game.drain_cleared_cells().is_empty());

        // The upper half of the square settled onto the floor.
        assert_eq!(occupied_cells(&game), 2);
        assert!(game.board().cell(4, 21).is_occupied());
        assert!(game.board().cell(5, 21).is_occupied());
    }

    #[test]
    fn level_up_speeds_gravity_and_shortens_lock_delay() {
        let mut game = game();
        game.progression = Progression::with_state(0, 9, 1);
        game.board
            .lock_piece(&Piece::new(PieceKind::I).shifted(0, 21));
        game.board
            .lock_piece(&Piece::new(PieceKind::I).shifted(6, 21));
        set_current(&mut game, PieceKind::O);

        game.tick(Duration::ZERO, &mut Script::of(&[GameAction::HardDrop]));

        assert_eq!(game.progression().level(), 2);
        assert_eq!(game.drop_interval, Duration::from_millis(633));
        assert_eq!(game.lock_delay, Duration::from_millis(750));
    }

    #[test]
    fn locking_into_the_spawn_buffer_ends_the_game() {
        let mut game = game();
        // A column of squares from the floor up to the buffer boundary.
        for y in (2..22).step_by(2) {
            game.board
                .lock_piece(&Piece::spawn_centered(PieceKind::O, 10).shifted(0, y));
        }
        set_current(&mut game, PieceKind::O);
        game.tick(Duration::ZERO, &mut Script::of(&[GameAction::HardDrop]));

        assert!(game.state().is_game_over());

        // A dead session ignores further ticks and actions.
        let before = occupied_cells(&game);
        game.tick(Duration::from_secs(5), &mut Script::of(&[GameAction::HardDrop]));
        assert_eq!(occupied_cells(&game), before);
        assert_eq!(game.elapsed(), Duration::ZERO);
    }

    #[test]
    fn pulse_glows_only_while_grounded() {
        let mut game = game();
        set_current(&mut game, PieceKind::T);
        game.tick(Duration::from_millis(16), &mut ());
        assert_eq!(game.pulse_intensity(), 0.0);

        game.current = game.current.dropped(&game.board);
        game.tick(Duration::from_millis(16), &mut ());
        // sin peaks near 78.5 ms of pulse time.
        game.tick(Duration::from_millis(63), &mut ());
        assert!(game.pulse_intensity() > 0.99);
    }

    #[test]
    fn ghost_piece_tracks_the_landing_position() {
        let mut game = game();
        set_current(&mut game, PieceKind::L);
        let ghost = game.ghost_piece();
        assert_eq!(ghost.kind(), PieceKind::L);
        assert_eq!(ghost.max_y(), 21);

        game.board
            .lock_piece(&Piece::spawn_centered(PieceKind::L, 10).shifted(0, 20));
        assert!(game.ghost_piece().max_y() < 21);
    }

    #[test]
    fn restart_clears_the_session_but_keeps_playing() {
        let mut game = game();
        game.tick(Duration::ZERO, &mut Script::of(&[GameAction::HardDrop]));
        assert!(occupied_cells(&game) > 0);

        game.restart();
        assert_eq!(occupied_cells(&game), 0);
        assert_eq!(game.progression().score(), 0);
        assert_eq!(game.elapsed(), Duration::ZERO);
        assert!(game.state().is_running());
    }

    #[test]
    fn same_seed_and_timeline_reach_the_same_state() {
        let run = || {
            let mut game = Game::with_seed(GameConfig::default(), BagSeed::from(SEED));
            for _ in 0..10 {
                game.tick(
                    Duration::from_millis(120),
                    &mut Script::of(&[GameAction::MoveLeft, GameAction::SoftDrop]),
                );
            }
            game.tick(Duration::ZERO, &mut Script::of(&[GameAction::HardDrop]));
            (
                game.progression().score(),
                game.current_piece().kind(),
                occupied_cells(&game),
            )
        };
        assert_eq!(run(), run());
    }
}
