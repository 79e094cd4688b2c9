use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_COLS, DEFAULT_ROWS};

/// Tunable session parameters.
///
/// The defaults reproduce the standard game: a 10×22 glass (two hidden
/// spawn rows), a one-second lock delay before the level curve takes over,
/// and a cap of twenty lock-delay resets per piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub cols: i16,
    pub rows: i16,
    /// Lock delay used until the first level-up replaces it with the
    /// level curve.
    pub initial_lock_delay_ms: u64,
    /// Number of successful moves that may interrupt the lock timer
    /// before the piece locks regardless.
    pub max_lock_drops: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            initial_lock_delay_ms: 1000,
            max_lock_drops: 20,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub const fn initial_lock_delay(&self) -> Duration {
        Duration::from_millis(self.initial_lock_delay_ms)
    }
}
