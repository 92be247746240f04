//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::alarm::limits::VitalStatus;
use crate::app::{App, View};

/// Sparkline characters (8 levels of height), shared by the trend
/// columns and the waveform panes.
pub const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render a normalized 0-7 series as sparkline characters.
pub fn render_sparkline(data: &[u8], width: usize) -> String {
    if data.is_empty() {
        return " ".repeat(width);
    }

    let values: Vec<u8> = data.iter().rev().take(width).rev().copied().collect();
    values.iter().map(|&v| SPARKLINE_CHARS[v.min(7) as usize]).collect()
}

/// Format elapsed simulated seconds as HH:MM:SS.
pub fn format_elapsed(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// Render the header bar with overall patient status.
///
/// Displays: status indicator, vital counts by status, MAC, elapsed case time.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let statuses = app.vital_statuses();
    let normal = statuses.iter().filter(|s| **s == VitalStatus::Normal).count();
    let warning = statuses.iter().filter(|s| **s == VitalStatus::Warning).count();
    let critical = statuses.iter().filter(|s| **s == VitalStatus::Critical).count();

    let status_style = app.theme.status_style(app.overall_status());

    let mac = app.context.controls.anesthetic_depth();

    let line = Line::from(vec![
        Span::styled(" ● ", status_style),
        Span::styled("GASWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(format!("{}", normal), Style::default().fg(app.theme.normal)),
        Span::raw(" ok "),
        if warning > 0 {
            Span::styled(format!("{}", warning), Style::default().fg(app.theme.warning))
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" warn "),
        if critical > 0 {
            Span::styled(
                format!("{}", critical),
                Style::default().fg(app.theme.critical).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" crit │ "),
        Span::styled(
            format!("MAC {:.1}", mac),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
        Span::raw(format!("case {}", format_elapsed(app.context.elapsed_secs))),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![
        Line::from(" 1:Monitor "),
        Line::from(" 2:Trends "),
        Line::from(" 3:Alarms "),
    ];

    let selected = match app.current_view {
        View::Monitor => 0,
        View::Trends => 1,
        View::Alarms => 2,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: silence countdown, available controls, and temporary
/// status messages.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let silence = app
        .registry
        .silence_remaining(std::time::Instant::now())
        .map(|d| format!("silenced {}s | ", d.as_secs()))
        .unwrap_or_default();

    let controls = match app.current_view {
        View::Monitor => "↑↓:select ←→:adjust m:silence r:reset Tab:switch ?:help q:quit",
        View::Trends | View::Alarms => "m:silence r:reset Tab:switch ?:help q:quit",
    };

    let status = format!(" {} | {}{}", app.current_view.label(), silence, controls);

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Views",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  Tab/S-Tab   Switch views"),
        Line::from("  1/2/3       Monitor / Trends / Alarms"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Ventilator & Agent",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ↑/↓ j/k     Select control"),
        Line::from("  ←/→ h/l     Adjust by one step"),
        Line::from("  PgUp/PgDn   Adjust by five steps"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Alarms",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  m         Silence for 120s (drops warnings)"),
        Line::from("  r         Reset alarm list"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ?         Toggle this help"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 46u16.min(area.width.saturating_sub(4));
    let help_height = 24u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
