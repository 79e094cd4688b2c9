use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::App;

const DEFAULT_FRAME_RATE: f64 = 60.0;

/// TUI application runtime.
///
/// Runs a fixed-rate frame loop over an [`App`]: every frame, pending
/// terminal events are delivered, `update` advances the app by the
/// measured wall-time delta, and the frame is drawn. Idle time until the
/// next frame is spent blocked in `event::poll`, so key presses wake the
/// loop without burning CPU.
#[derive(Debug)]
pub struct Runtime {
    frame_interval: Duration,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    /// Creates a new runtime at the default 60 FPS.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frame_interval: Duration::from_secs_f64(1.0 / DEFAULT_FRAME_RATE),
        }
    }

    /// Sets the frame rate (frames per second).
    pub fn set_frame_rate(&mut self, rate: f64) {
        self.frame_interval = Duration::from_secs_f64(1.0 / rate);
    }

    /// Runs the application until `app.should_exit()` returns true.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup, event polling, or drawing fails.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            let mut last_frame = Instant::now();
            while !app.should_exit() {
                while event::poll(Duration::ZERO)? {
                    app.handle_event(&mut self, event::read()?);
                }

                let now = Instant::now();
                app.update(&mut self, now.duration_since(last_frame));
                last_frame = now;

                terminal.draw(|frame| app.draw(frame))?;

                // Sleep out the rest of the frame, waking early for input
                // so exits feel immediate.
                let deadline = last_frame + self.frame_interval;
                loop {
                    let now = Instant::now();
                    let Some(timeout) = deadline.checked_duration_since(now).filter(|t| !t.is_zero())
                    else {
                        break;
                    };
                    if event::poll(timeout)? {
                        app.handle_event(&mut self, event::read()?);
                        if app.should_exit() {
                            break;
                        }
                    }
                }
            }
            Ok(())
        })
    }
}
