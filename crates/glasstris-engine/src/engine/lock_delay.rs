use std::time::Duration;

use derive_more::IsVariant;

/// Whether the active piece is falling freely or resting on support.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, IsVariant)]
pub enum LockPhase {
    #[default]
    Falling,
    Locking,
}

/// The lock-delay state machine for the active piece.
///
/// A grounded piece enters `Locking` and starts a timer. Successful player
/// actions reset the timer but each costs one of a bounded number of
/// interruptions; exhausting them locks the piece even with the timer
/// running. Leaving `Locking` without committing requires the piece to
/// actually descend below the row it was grounded at, so sliding sideways
/// along a ledge does not re-arm the budget.
#[derive(Debug, Clone, Copy, Default)]
pub struct LockDelay {
    phase: LockPhase,
    timer: Duration,
    drops_used: u32,
    reference_max_y: i16,
}

impl LockDelay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> LockPhase {
        self.phase
    }

    /// Elapsed pulse-relevant time: how long the piece has been grounded.
    #[must_use]
    pub fn timer(&self) -> Duration {
        self.timer
    }

    /// Advances the state machine by `delta` and reports whether the piece
    /// must lock now.
    ///
    /// `grounded` is whether the piece currently rests on support and
    /// `max_y` is its lowest occupied row.
    pub fn tick(
        &mut self,
        grounded: bool,
        max_y: i16,
        delta: Duration,
        delay: Duration,
        max_drops: u32,
    ) -> bool {
        if grounded {
            if self.phase.is_falling() {
                self.phase = LockPhase::Locking;
                self.timer = Duration::ZERO;
                self.drops_used = 0;
                self.reference_max_y = max_y;
                return false;
            }
            self.timer += delta;
            if self.drops_used > max_drops || self.timer >= delay {
                self.reset();
                return true;
            }
        } else if self.phase.is_locking() && max_y > self.reference_max_y {
            // Dropped below the grounding row, so the piece is genuinely
            // falling again.
            self.reset();
        }
        false
    }

    /// Records a successful player action, which restarts the lock timer
    /// while grounded. Has no effect while falling.
    pub fn note_action(&mut self) {
        if self.phase.is_locking() {
            self.drops_used += 1;
            self.timer = Duration::ZERO;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
