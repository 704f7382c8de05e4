use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Blocking key source with a bounded wait.
pub trait EventSource {
    /// Waits up to `timeout` for a key press. `Ok(None)` means nothing arrived.
    fn next_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>>;
}

pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn next_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        // Resizes and other events end the wait early so the next frame is redrawn.
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
            _ => Ok(None),
        }
    }
}
