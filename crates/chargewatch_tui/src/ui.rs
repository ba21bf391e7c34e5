//! UI rendering for the dashboard.

use crate::app::{App, Tab};
use chargewatch_core::{PredictionEvent, format_dollars, format_timestamp};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Row, Table, Tabs, Wrap},
};

const NO_LOGS_NOTICE: &str = "No monitoring logs found yet. Please run a prediction, submit \
                              feedback at least once, and then refresh (r).";

/// Draw the whole dashboard.
#[tracing::instrument(skip_all)]
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);
    if app.is_empty() {
        draw_notice(f, chunks[1]);
    } else {
        draw_body(f, app, chunks[1]);
    }
    draw_status_bar(f, app, chunks[2]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let title = format!(
        "Model Monitoring & Feedback - {} [{}]",
        app.source, app.filter
    );
    let header = Paragraph::new(title)
        .block(Block::default().borders(Borders::ALL))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(header, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let help_text = "←→/Tab: Switch tab | f/F: Model filter | ↑↓: Scroll | r: Refresh | q: Quit";
    let status_text = format!("{} | {}", app.status_message, help_text);
    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray));
    f.render_widget(status, area);
}

fn draw_notice(f: &mut Frame, area: Rect) {
    let notice = Paragraph::new(NO_LOGS_NOTICE)
        .block(Block::default().borders(Borders::ALL).title("No data"))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(notice, area);
}

fn draw_body(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Key metrics
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Tab content
        ])
        .split(area);

    draw_key_metrics(f, app, chunks[0]);

    let tabs = Tabs::new(Tab::ALL.iter().map(|tab| tab.title()))
        .select(app.tab.index())
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, chunks[1]);

    match app.tab {
        Tab::Comparison => draw_comparison(f, app, chunks[2]),
        Tab::Feedback => draw_feedback(f, app, chunks[2]),
        Tab::RawLogs => draw_raw_logs(f, app, chunks[2]),
    }
}

fn draw_key_metrics(f: &mut Frame, app: &App, area: Rect) {
    let metrics = &app.snapshot.metrics;
    let cells = [
        ("Total Predictions", metrics.total_predictions.to_string()),
        ("Avg Feedback Score", metrics.feedback_display()),
        ("Avg Latency (ms)", metrics.latency_display()),
    ];
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    for ((label, value), column) in cells.into_iter().zip(columns.iter()) {
        let metric = Paragraph::new(Line::from(Span::styled(
            value,
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::ALL).title(label))
        .alignment(Alignment::Center);
        f.render_widget(metric, *column);
    }
}

fn draw_comparison(f: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec![
        "model_version",
        "predictions",
        "avg_feedback_score",
        "avg_latency_ms",
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
    .bottom_margin(1);

    let rows: Vec<Row> = app
        .snapshot
        .summaries
        .values()
        .map(|summary| {
            Row::new(vec![
                summary.model_version.clone(),
                summary.count.to_string(),
                summary
                    .avg_feedback_score
                    .map(|v| format!("{:.2}", v))
                    .unwrap_or_else(|| "N/A".to_string()),
                summary
                    .avg_latency_ms
                    .map(|v| format!("{:.1}", v))
                    .unwrap_or_else(|| "N/A".to_string()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(16),
            Constraint::Length(12),
            Constraint::Length(20),
            Constraint::Min(16),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Model Version Comparison (Aggregated)"),
    );
    f.render_widget(table, area);
}

fn draw_feedback(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    // Scores are charted in hundredths so two decimals survive the u64 bars.
    let bars: Vec<Bar> = app
        .snapshot
        .summaries
        .values()
        .map(|summary| {
            let score = summary.avg_feedback_score.unwrap_or(0.0);
            Bar::default()
                .value((score * 100.0).round() as u64)
                .label(Line::from(summary.model_version.clone()))
                .text_value(
                    summary
                        .avg_feedback_score
                        .map(|v| format!("{:.2}", v))
                        .unwrap_or_else(|| "N/A".to_string()),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Average Feedback Score by Model Version"),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(12)
        .bar_gap(3)
        .max(500)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    f.render_widget(chart, chunks[0]);

    let lines = if app.snapshot.recent_comments.is_empty() {
        vec![Line::from("No qualitative comments yet.")]
    } else {
        app.snapshot
            .recent_comments
            .iter()
            .flat_map(comment_lines)
            .collect()
    };
    let comments = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Recent Comments"))
        .wrap(Wrap { trim: false });
    f.render_widget(comments, chunks[1]);
}

fn comment_lines(event: &PredictionEvent) -> [Line<'static>; 3] {
    let score = event
        .feedback_score
        .map(|s| s.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    [
        Line::from(Span::styled(
            format!(
                "[{}] {} - Score: {}",
                format_timestamp(&event.timestamp),
                event.model_version,
                score
            ),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(event.feedback_text.clone()),
        Line::from(""),
    ]
}

fn draw_raw_logs(f: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec![
        "timestamp",
        "model_version",
        "model_type",
        "input_summary",
        "predicted_charges",
        "latency_ms",
        "score",
        "feedback_text",
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
    .bottom_margin(1);

    let rows: Vec<Row> = app
        .snapshot
        .rows
        .iter()
        .skip(app.scroll)
        .map(|event| {
            Row::new(vec![
                format_timestamp(&event.timestamp),
                event.model_version.clone(),
                event.model_type.clone(),
                event.input_summary.clone(),
                format_dollars(event.predicted_charges),
                event
                    .latency_ms
                    .map(|v| format!("{:.1}", v))
                    .unwrap_or_default(),
                event
                    .feedback_score
                    .map(|s| s.to_string())
                    .unwrap_or_default(),
                event.feedback_text.replace('\n', " "),
            ])
        })
        .collect();

    let title = format!(
        "Raw Monitoring Logs ({} rows, from {})",
        app.snapshot.rows.len(),
        app.scroll + 1
    );
    let table = Table::new(
        rows,
        [
            Constraint::Length(28),
            Constraint::Length(14),
            Constraint::Length(10),
            Constraint::Length(40),
            Constraint::Length(18),
            Constraint::Length(11),
            Constraint::Length(6),
            Constraint::Min(20),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(table, area);
}
