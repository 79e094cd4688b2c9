use std::time::Duration;

use crossterm::event::Event;
use ratatui::Frame;

use crate::Runtime;

/// Trait for TUI applications.
///
/// Applications executed by `Runtime::run()` implement this trait. The
/// runtime drives a fixed-rate frame loop: each frame drains pending
/// terminal events into `handle_event`, advances the simulation with
/// `update`, and then draws.
pub trait App {
    /// Initializes the application.
    ///
    /// Called at the start of `Runtime::run()`. Use this to configure the
    /// frame rate.
    fn init(&mut self, runtime: &mut Runtime);

    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, resize, etc.).
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    /// Advances application state by the wall time since the last frame.
    fn update(&mut self, runtime: &mut Runtime, delta: Duration);

    /// Draws the screen (called once per frame).
    fn draw(&self, frame: &mut Frame);
}
