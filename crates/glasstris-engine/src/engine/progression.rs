use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Points for clearing 0..=4 lines at once, before the level multiplier.
const LINE_SCORES: [u64; 5] = [0, 100, 300, 500, 800];

/// Gravity intervals in milliseconds, indexed by level and clamped to the
/// last entry. Entry 0 is never consulted (levels start at 1) and entry 1
/// only applies after a level-up, so the level-1 interval comes from
/// [`Progression::INITIAL_DROP_INTERVAL`] instead.
const DROP_INTERVALS_MS: [u64; 20] = [
    800, 717, 633, 550, 467, 383, 300, 217, 133, 100, //
    83, 83, 83, 67, 67, 67, 50, 50, 50, 33,
];

const LOCK_DELAY_START_MS: u64 = 800;
const LOCK_DELAY_FLOOR_MS: u64 = 200;
const LOCK_DELAY_STEP_MS: u64 = 50;

const LINES_PER_LEVEL: u32 = 10;

/// Score, cleared-line count, and level for one session.
///
/// The level climbs by at most one per clear event: a quadruple clear that
/// jumps the line total past two thresholds still gives a single level-up,
/// and the skipped threshold is simply never revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    score: u64,
    lines: u32,
    level: u32,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

impl Progression {
    /// Gravity interval before the first level-up.
    pub const INITIAL_DROP_INTERVAL: Duration = Duration::from_millis(DROP_INTERVALS_MS[0]);

    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            lines: 0,
            level: 1,
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn lines(&self) -> u32 {
        self.lines
    }

    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// One point per cell descended under soft drop.
    pub fn award_soft_drop(&mut self) {
        self.score += 1;
    }

    /// Two points per cell descended under hard drop.
    pub fn award_hard_drop(&mut self, cells: u32) {
        self.score += 2 * u64::from(cells);
    }

    /// Scores a clear of `lines` lines and advances the line count.
    ///
    /// The score multiplier is the level before any level-up from this
    /// clear. Returns whether the level went up, so the caller can refresh
    /// its speed curve.
    pub fn award_line_clear(&mut self, lines: usize) -> bool {
        self.score += LINE_SCORES[lines] * u64::from(self.level);
        self.lines += u32::try_from(lines).expect("at most four lines per clear");
        if self.lines >= self.level * LINES_PER_LEVEL {
            self.level += 1;
            true
        } else {
            false
        }
    }

    /// Gravity interval for the current level.
    ///
    /// Levels past the end of the curve stay at the fastest interval.
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        let index = usize::min(self.level as usize, DROP_INTERVALS_MS.len() - 1);
        Duration::from_millis(DROP_INTERVALS_MS[index])
    }

    /// Lock delay for the current level: shrinks by 50 ms per level from
    /// 800 ms down to a 200 ms floor.
    #[must_use]
    pub fn lock_delay(&self) -> Duration {
        let reduction = LOCK_DELAY_STEP_MS * u64::from(self.level - 1);
        Duration::from_millis(u64::max(
            LOCK_DELAY_FLOOR_MS,
            LOCK_DELAY_START_MS.saturating_sub(reduction),
        ))
    }

    #[cfg(test)]
    pub(crate) fn with_state(score: u64, lines: u32, level: u32) -> Self {
        Self {
            score,
            lines,
            level,
        }
    }
}
