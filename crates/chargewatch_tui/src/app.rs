//! Dashboard state.

use chargewatch_core::PredictionEvent;
use chargewatch_monitor::{ModelFilter, MonitorSnapshot};

/// Dashboard tab determines which view fills the main area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tab {
    /// Per-version comparison table
    #[default]
    Comparison,
    /// Average score chart and recent comments
    Feedback,
    /// Filtered raw log rows
    RawLogs,
}

impl Tab {
    /// Every tab, in display order.
    pub const ALL: [Tab; 3] = [Tab::Comparison, Tab::Feedback, Tab::RawLogs];

    /// Tab title.
    pub fn title(self) -> &'static str {
        match self {
            Tab::Comparison => "Model Comparison",
            Tab::Feedback => "Feedback Analysis",
            Tab::RawLogs => "Raw Logs",
        }
    }

    /// Position in [`Tab::ALL`].
    pub fn index(self) -> usize {
        match self {
            Tab::Comparison => 0,
            Tab::Feedback => 1,
            Tab::RawLogs => 2,
        }
    }

    fn next(self) -> Self {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    fn previous(self) -> Self {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Main dashboard state.
pub struct App {
    /// Current tab
    pub tab: Tab,
    /// Where the events come from, shown in the header
    pub source: String,
    /// Selected model version
    pub filter: ModelFilter,
    /// Views derived from `events` for `filter`
    pub snapshot: MonitorSnapshot,
    /// First visible raw log row
    pub scroll: usize,
    /// Status message to display
    pub status_message: String,
    /// Whether to quit the application
    pub should_quit: bool,
    events: Vec<PredictionEvent>,
    comment_limit: usize,
}

impl App {
    /// Create an empty dashboard for `source`.
    pub fn new(source: impl Into<String>, comment_limit: usize) -> Self {
        let filter = ModelFilter::All;
        Self {
            tab: Tab::default(),
            source: source.into(),
            snapshot: MonitorSnapshot::build(&[], &filter, comment_limit),
            filter,
            scroll: 0,
            status_message: String::from("Press r to refresh"),
            should_quit: false,
            events: Vec::new(),
            comment_limit,
        }
    }

    /// Replace the events and recompute every view.
    ///
    /// A selected version that no longer appears falls back to `All`.
    pub fn set_events(&mut self, events: Vec<PredictionEvent>) {
        self.events = events;
        if let ModelFilter::Version(version) = &self.filter
            && !self.events.iter().any(|e| e.model_version == *version)
        {
            self.filter = ModelFilter::All;
        }
        self.rebuild();
    }

    /// Whether nothing has been logged yet.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Filter choices: `All` followed by every logged version.
    pub fn filter_choices(&self) -> Vec<ModelFilter> {
        std::iter::once(ModelFilter::All)
            .chain(
                self.snapshot
                    .versions
                    .iter()
                    .cloned()
                    .map(ModelFilter::Version),
            )
            .collect()
    }

    /// Select the next filter choice, wrapping around.
    pub fn next_filter(&mut self) {
        self.step_filter(1);
    }

    /// Select the previous filter choice, wrapping around.
    pub fn previous_filter(&mut self) {
        let len = self.filter_choices().len();
        self.step_filter(len.saturating_sub(1));
    }

    fn step_filter(&mut self, step: usize) {
        let choices = self.filter_choices();
        let current = choices.iter().position(|f| *f == self.filter).unwrap_or(0);
        if let Some(next) = choices.get((current + step) % choices.len()) {
            self.filter = next.clone();
            self.rebuild();
        }
    }

    /// Switch to the next tab.
    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    /// Switch to the previous tab.
    pub fn previous_tab(&mut self) {
        self.tab = self.tab.previous();
    }

    /// Scroll the raw log up one row.
    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// Scroll the raw log down one row.
    pub fn scroll_down(&mut self) {
        if self.scroll + 1 < self.snapshot.rows.len() {
            self.scroll += 1;
        }
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    fn rebuild(&mut self) {
        self.snapshot = MonitorSnapshot::build(&self.events, &self.filter, self.comment_limit);
        self.scroll = self.scroll.min(self.snapshot.rows.len().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chargewatch_core::ModelIdentity;

    fn event(version: &str, score: Option<u8>) -> PredictionEvent {
        PredictionEvent::new(
            &ModelIdentity::new(version, "baseline"),
            "age=30",
            10_000.0,
            Some(2.0),
            score.map(|s| s.try_into().unwrap()),
            None,
        )
    }

    fn app_with_two_versions() -> App {
        let mut app = App::new("test.csv", 10);
        app.set_events(vec![
            event("v1_old", Some(3)),
            event("v2_new", Some(5)),
            event("v2_new", None),
        ]);
        app
    }

    #[test]
    fn new_app_is_empty() {
        let app = App::new("test.csv", 10);
        assert!(app.is_empty());
        assert_eq!(app.tab, Tab::Comparison);
        assert_eq!(app.filter_choices(), vec![ModelFilter::All]);
    }

    #[test]
    fn filter_cycles_through_versions() {
        let mut app = app_with_two_versions();
        assert_eq!(app.snapshot.metrics.total_predictions, 3);

        app.next_filter();
        assert_eq!(app.filter, ModelFilter::Version("v1_old".to_string()));
        assert_eq!(app.snapshot.metrics.total_predictions, 1);

        app.next_filter();
        assert_eq!(app.filter, ModelFilter::Version("v2_new".to_string()));
        assert_eq!(app.snapshot.metrics.avg_feedback_score, Some(5.0));

        app.next_filter();
        assert_eq!(app.filter, ModelFilter::All);

        app.previous_filter();
        assert_eq!(app.filter, ModelFilter::Version("v2_new".to_string()));
    }

    #[test]
    fn vanished_version_falls_back_to_all() {
        let mut app = app_with_two_versions();
        app.next_filter();
        app.set_events(vec![event("v2_new", Some(4))]);
        assert_eq!(app.filter, ModelFilter::All);
    }

    #[test]
    fn tabs_wrap_both_ways() {
        let mut app = App::new("test.csv", 10);
        app.previous_tab();
        assert_eq!(app.tab, Tab::RawLogs);
        app.next_tab();
        assert_eq!(app.tab, Tab::Comparison);
        app.next_tab();
        assert_eq!(app.tab, Tab::Feedback);
    }

    #[test]
    fn scroll_stays_within_rows() {
        let mut app = app_with_two_versions();
        app.scroll_up();
        assert_eq!(app.scroll, 0);
        for _ in 0..10 {
            app.scroll_down();
        }
        assert_eq!(app.scroll, 2);

        app.next_filter();
        assert_eq!(app.scroll, 0);
    }
}
