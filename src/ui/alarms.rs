//! Alarm list rendering.
//!
//! Shows recorded alarms newest first with a priority badge, the
//! fired-at time, and the composed "title: message" text. An empty
//! registry renders the all-normal pane instead.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::alarm::evaluate::Priority;
use crate::app::App;

/// Render the alarm list into the given pane.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if app.registry.is_empty() {
        render_all_normal(frame, app, area);
        return;
    }

    let critical_count = app
        .registry
        .alarms()
        .iter()
        .filter(|a| a.priority == Priority::Critical)
        .count();
    let warning_count = app.registry.len() - critical_count;

    let silence_note = app
        .registry
        .silence_remaining(std::time::Instant::now())
        .map(|d| format!(" [muted {}s]", d.as_secs()))
        .unwrap_or_default();

    let title = format!(
        " Alarms ({} crit, {} warn){} ",
        critical_count, warning_count, silence_note
    );

    let border_color = if critical_count > 0 {
        app.theme.critical
    } else {
        app.theme.warning
    };

    let lines: Vec<Line> = app
        .registry
        .alarms()
        .iter()
        .map(|alarm| {
            let badge_style = match alarm.priority {
                Priority::Critical => Style::default()
                    .fg(app.theme.critical)
                    .add_modifier(Modifier::BOLD),
                Priority::Warning => Style::default().fg(app.theme.warning),
            };
            Line::from(vec![
                Span::styled(format!(" {:8} ", alarm.priority.label()), badge_style),
                Span::styled(
                    alarm.fired_at.clone(),
                    Style::default().add_modifier(Modifier::DIM),
                ),
                Span::raw("  "),
                Span::styled(alarm.title, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(": "),
                Span::raw(alarm.message.clone()),
            ])
        })
        .collect();

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(border_color));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_all_normal(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Alarms ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.normal));

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  ✓ ", Style::default().fg(app.theme.normal)),
            Span::styled(
                "All parameters normal",
                Style::default()
                    .fg(app.theme.normal)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
