//! Dashboard runner: terminal lifecycle and the main loop.

use crate::{App, Event, EventHandler, MonitorBackend};
use chargewatch_error::{ChargewatchResult, TuiError, TuiErrorKind};
use chargewatch_monitor::DEFAULT_COMMENT_LIMIT;
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};

/// Refresh and display settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSettings {
    /// How often the source is checked for changes
    pub tick_rate_ms: u64,
    /// Maximum number of recent comments shown
    pub comment_limit: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            comment_limit: DEFAULT_COMMENT_LIMIT,
        }
    }
}

type DashboardTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Run the dashboard until the user quits.
///
/// The terminal is restored even when the loop fails.
#[tracing::instrument(skip(backend), fields(source = %backend.source()))]
pub fn run_dashboard(
    backend: &mut dyn MonitorBackend,
    settings: DashboardSettings,
) -> ChargewatchResult<()> {
    let mut terminal = setup_terminal()?;
    let result = run_loop(&mut terminal, backend, settings);
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> ChargewatchResult<DashboardTerminal> {
    enable_raw_mode().map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalSetup(format!(
            "Failed to enable raw mode: {}",
            e
        )))
    })?;
    let terminal = release_raw_mode_on_err(enter_screen())?;
    Ok(terminal)
}

fn enter_screen() -> Result<DashboardTerminal, TuiError> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalSetup(format!(
            "Failed to enter alternate screen: {}",
            e
        )))
    })?;
    Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalSetup(format!(
            "Failed to create terminal: {}",
            e
        )))
    })
}

/// Leave raw mode if a setup step after `enable_raw_mode` failed.
fn release_raw_mode_on_err<T>(result: Result<T, TuiError>) -> Result<T, TuiError> {
    if result.is_err() {
        // The setup error is the one worth reporting.
        let _ = disable_raw_mode();
    }
    result
}

fn restore_terminal(terminal: &mut DashboardTerminal) -> ChargewatchResult<()> {
    disable_raw_mode().map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalRestore(format!(
            "Failed to disable raw mode: {}",
            e
        )))
    })?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalRestore(format!(
            "Failed to leave alternate screen: {}",
            e
        )))
    })?;
    terminal.show_cursor().map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalRestore(format!(
            "Failed to show cursor: {}",
            e
        )))
    })?;
    Ok(())
}

fn run_loop(
    terminal: &mut DashboardTerminal,
    backend: &mut dyn MonitorBackend,
    settings: DashboardSettings,
) -> ChargewatchResult<()> {
    let mut app = App::new(backend.source(), settings.comment_limit);
    let mut events = EventHandler::new(settings.tick_rate_ms);
    refresh(&mut app, backend);

    while !app.should_quit {
        terminal
            .draw(|f| crate::ui::draw(f, &app))
            .map_err(|e| TuiError::new(TuiErrorKind::Rendering(e.to_string())))?;

        if let Some(event) = events.next()? {
            handle_event(&mut app, backend, event);
        }
    }
    Ok(())
}

/// Reload events into `app`, reporting failures in the status bar.
pub(crate) fn refresh(app: &mut App, backend: &mut dyn MonitorBackend) {
    match backend.load_events() {
        Ok(events) => {
            let count = events.len();
            app.set_events(events);
            app.status_message = format!("Loaded {} events", count);
        }
        Err(e) => {
            tracing::warn!(error = %e, "Dashboard refresh failed");
            app.status_message = TuiErrorKind::Backend(e.to_string()).to_string();
        }
    }
}

/// Apply one event to the dashboard state.
pub(crate) fn handle_event(app: &mut App, backend: &mut dyn MonitorBackend, event: Event) {
    match event {
        Event::Key(key) => handle_key(app, backend, key),
        Event::Tick => {
            if backend.has_changed() {
                tracing::debug!("Log changed, refreshing");
                refresh(app, backend);
            }
        }
        // The loop redraws at the new size on its next pass.
        Event::Resize(..) => {}
    }
}

fn handle_key(app: &mut App, backend: &mut dyn MonitorBackend, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => app.next_tab(),
        KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => app.previous_tab(),
        KeyCode::Char('f') => app.next_filter(),
        KeyCode::Char('F') => app.previous_filter(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
        KeyCode::Char('r') => {
            backend.invalidate();
            refresh(app, backend);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tab;
    use chargewatch_core::{ModelIdentity, PredictionEvent};
    use chargewatch_error::{ChargewatchError, LogError, LogErrorKind};

    #[derive(Default)]
    struct FixtureBackend {
        events: Vec<PredictionEvent>,
        changed: bool,
        fail: bool,
        loads: usize,
    }

    impl MonitorBackend for FixtureBackend {
        fn source(&self) -> String {
            "fixture".to_string()
        }

        fn load_events(&mut self) -> ChargewatchResult<Vec<PredictionEvent>> {
            self.loads += 1;
            self.changed = false;
            if self.fail {
                return Err(ChargewatchError::from(LogError::new(LogErrorKind::Parse(
                    "line 2: bad row".to_string(),
                ))));
            }
            Ok(self.events.clone())
        }

        fn has_changed(&self) -> bool {
            self.changed
        }
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn event(version: &str) -> PredictionEvent {
        PredictionEvent::new(
            &ModelIdentity::new(version, "baseline"),
            "age=30",
            1.0,
            None,
            None,
            None,
        )
    }

    #[test]
    fn tick_reloads_only_when_changed() {
        let mut backend = FixtureBackend::default();
        let mut app = App::new("fixture", 10);

        handle_event(&mut app, &mut backend, Event::Tick);
        assert_eq!(backend.loads, 0);

        backend.events.push(event("v1_old"));
        backend.changed = true;
        handle_event(&mut app, &mut backend, Event::Tick);
        assert_eq!(backend.loads, 1);
        assert!(!app.is_empty());
    }

    #[test]
    fn keys_drive_app_state() {
        let mut backend = FixtureBackend {
            events: vec![event("v1_old"), event("v2_new")],
            ..Default::default()
        };
        let mut app = App::new("fixture", 10);
        refresh(&mut app, &mut backend);

        handle_event(&mut app, &mut backend, key(KeyCode::Right));
        assert_eq!(app.tab, Tab::Feedback);
        handle_event(&mut app, &mut backend, key(KeyCode::Char('f')));
        assert_eq!(app.snapshot.rows.len(), 1);
        handle_event(&mut app, &mut backend, key(KeyCode::Char('r')));
        assert_eq!(backend.loads, 2);
        handle_event(&mut app, &mut backend, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn resize_leaves_state_alone() {
        let mut backend = FixtureBackend {
            events: vec![event("v1_old")],
            changed: true,
            ..Default::default()
        };
        let mut app = App::new("fixture", 10);
        refresh(&mut app, &mut backend);

        handle_event(&mut app, &mut backend, Event::Resize(80, 24));
        assert_eq!(backend.loads, 1);
        assert!(!app.should_quit);
    }

    #[test]
    fn setup_failure_passes_through_after_releasing_raw_mode() {
        let failed: Result<(), TuiError> = Err(TuiError::new(TuiErrorKind::TerminalSetup(
            "Failed to enter alternate screen: no tty".to_string(),
        )));
        let err = release_raw_mode_on_err(failed).unwrap_err();
        assert!(matches!(err.kind, TuiErrorKind::TerminalSetup(_)));
        assert_eq!(release_raw_mode_on_err::<u8>(Ok(7)).unwrap(), 7);
    }

    #[test]
    fn failed_refresh_keeps_previous_data() {
        let mut backend = FixtureBackend {
            events: vec![event("v1_old")],
            ..Default::default()
        };
        let mut app = App::new("fixture", 10);
        refresh(&mut app, &mut backend);

        backend.fail = true;
        refresh(&mut app, &mut backend);
        assert!(!app.is_empty());
        assert!(app.status_message.contains("line 2"));
    }
}
