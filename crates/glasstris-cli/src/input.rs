use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use glasstris_engine::{GameAction, InputSource};

/// Pending actions are capped so a stall cannot build up a burst of
/// buffered moves that all land in one tick.
const MAX_PENDING: usize = 16;

/// Buffers game actions decoded from key events until the next tick.
///
/// Movement and soft drop follow the terminal's key repeat, so holding a
/// key slides the piece. Rotation and hard drop fire once per physical
/// press: repeat events for those keys are dropped.
#[derive(Debug, Default)]
pub struct KeyIntents {
    pending: VecDeque<GameAction>,
}

impl KeyIntents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a key event, queueing its action. Returns `false` for keys
    /// that have no game binding so the caller can handle them.
    pub fn record(&mut self, event: KeyEvent) -> bool {
        if event.kind == KeyEventKind::Release {
            return false;
        }
        let action = match event.code {
            KeyCode::Left => GameAction::MoveLeft,
            KeyCode::Right => GameAction::MoveRight,
            KeyCode::Down => GameAction::SoftDrop,
            KeyCode::Up | KeyCode::Char('x') => GameAction::RotateCw,
            KeyCode::Char('z') => GameAction::RotateCcw,
            KeyCode::Char(' ') => GameAction::HardDrop,
            _ => return false,
        };
        let repeats = matches!(
            action,
            GameAction::MoveLeft | GameAction::MoveRight | GameAction::SoftDrop
        );
        if event.kind == KeyEventKind::Repeat && !repeats {
            return true;
        }
        if self.pending.len() < MAX_PENDING {
            self.pending.push_back(action);
        }
        true
    }

    /// Drops any queued actions, for restarts and game over.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl InputSource for KeyIntents {
    fn next_action(&mut self) -> Option<GameAction> {
        self.pending.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn repeat(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Repeat)
    }

    #[test]
    fn bound_keys_queue_their_actions_in_order() {
        let mut intents = KeyIntents::new();
        assert!(intents.record(press(KeyCode::Left)));
        assert!(intents.record(press(KeyCode::Char(' '))));
        assert_eq!(intents.next_action(), Some(GameAction::MoveLeft));
        assert_eq!(intents.next_action(), Some(GameAction::HardDrop));
        assert_eq!(intents.next_action(), None);
    }

    #[test]
    fn unbound_keys_are_reported_unhandled() {
        let mut intents = KeyIntents::new();
        assert!(!intents.record(press(KeyCode::Char('q'))));
        assert_eq!(intents.next_action(), None);
    }

    #[test]
    fn movement_repeats_but_rotation_and_drop_do_not() {
        let mut intents = KeyIntents::new();
        assert!(intents.record(repeat(KeyCode::Down)));
        assert!(intents.record(repeat(KeyCode::Up)));
        assert!(intents.record(repeat(KeyCode::Char(' '))));
        assert_eq!(intents.next_action(), Some(GameAction::SoftDrop));
        assert_eq!(intents.next_action(), None);
    }

    #[test]
    fn backlog_is_capped() {
        let mut intents = KeyIntents::new();
        for _ in 0..100 {
            intents.record(press(KeyCode::Left));
        }
        let queued = std::iter::from_fn(|| intents.next_action()).count();
        assert_eq!(queued, MAX_PENDING);
    }

    #[test]
    fn clear_discards_the_backlog() {
        let mut intents = KeyIntents::new();
        intents.record(press(KeyCode::Right));
        intents.clear();
        assert_eq!(intents.next_action(), None);
    }
}
