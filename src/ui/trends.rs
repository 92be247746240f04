//! Trends view rendering.
//!
//! One row per alarmed vital: current value, window minimum and
//! maximum, a sparkline of the recorded window, and live status.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::app::App;
use crate::ui::common::render_sparkline;

const TREND_WIDTH: usize = 24;

/// Render the trends table.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let statuses = app.vital_statuses();

    let header = Row::new(vec![
        Cell::from("Parameter"),
        Cell::from("Current"),
        Cell::from("Min"),
        Cell::from("Max"),
        Cell::from("Trend"),
        Cell::from("Status"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = app
        .history
        .series()
        .iter()
        .zip(statuses)
        .map(|(series, status)| {
            let format_value = |value: Option<f64>| {
                value
                    .map(|v| format!("{:.*} {}", series.decimals, v, series.unit))
                    .unwrap_or_else(|| "-".to_string())
            };

            Row::new(vec![
                Cell::from(series.label),
                Cell::from(format_value(series.latest()))
                    .style(app.theme.status_style(status)),
                Cell::from(format_value(series.min())),
                Cell::from(format_value(series.max())),
                Cell::from(render_sparkline(&series.sparkline(), TREND_WIDTH))
                    .style(Style::default().fg(app.theme.highlight)),
                Cell::from(status.symbol()).style(app.theme.status_style(status)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(2),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Min(TREND_WIDTH as u16 + 1),
        Constraint::Min(6),
    ];

    let ticks = app.history.series().first().map_or(0, |s| s.sparkline().len());
    let title = format!(" Trends (last {} ticks) ", ticks);

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );

    frame.render_widget(table, area);
}
