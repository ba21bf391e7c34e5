//! Terminal input and refresh ticks for the dashboard.

use chargewatch_error::{TuiError, TuiErrorKind, TuiResult};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::time::{Duration, Instant};

/// What the dashboard loop reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Refresh interval elapsed; the log is checked for changes
    Tick,
    /// Key press
    Key(KeyEvent),
    /// Terminal resized to (columns, rows)
    Resize(u16, u16),
}

/// Interleaves key presses with refresh ticks at a fixed rate.
///
/// Ticks are scheduled from the last tick rather than the last poll, so a
/// steady stream of key presses cannot starve the log refresh.
pub struct EventHandler {
    tick_rate: Duration,
    last_tick: Instant,
}

impl EventHandler {
    /// Handler that ticks every `tick_rate_ms` milliseconds.
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            last_tick: Instant::now(),
        }
    }

    /// Whether a refresh tick is owed.
    pub fn tick_due(&self) -> bool {
        self.last_tick.elapsed() >= self.tick_rate
    }

    fn take_tick(&mut self) -> Event {
        self.last_tick = Instant::now();
        Event::Tick
    }

    /// Wait for the next key press, resize or tick.
    ///
    /// Key releases and other terminal events yield `None`.
    pub fn next(&mut self) -> TuiResult<Option<Event>> {
        if self.tick_due() {
            return Ok(Some(self.take_tick()));
        }
        let timeout = self.tick_rate.saturating_sub(self.last_tick.elapsed());
        let ready = event::poll(timeout)
            .map_err(|e| TuiError::new(TuiErrorKind::EventPoll(e.to_string())))?;
        if !ready {
            return Ok(Some(self.take_tick()));
        }
        let raw = event::read().map_err(|e| TuiError::new(TuiErrorKind::EventRead(e.to_string())))?;
        Ok(match raw {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
            CrosstermEvent::Resize(columns, rows) => Some(Event::Resize(columns, rows)),
            _ => None,
        })
    }
}
