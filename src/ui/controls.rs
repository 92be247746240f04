//! Ventilator and agent control panel.
//!
//! A table of the six operator controls with the selected row
//! highlighted; left/right keys step the selected value within its
//! spec'd range.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::sim::context::CONTROLS;

/// Render the control panel table.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec![
        Cell::from("Control"),
        Cell::from("Value"),
        Cell::from("Range"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = CONTROLS
        .iter()
        .map(|&id| {
            let spec = id.spec();
            Row::new(vec![
                Cell::from(spec.label),
                Cell::from(app.context.controls.format(id))
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                Cell::from(format!(
                    "{:.*}–{:.*}",
                    spec.decimals, spec.min, spec.decimals, spec.max
                ))
                .style(Style::default().add_modifier(Modifier::DIM)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Fill(1),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(" Ventilator / Agent ")
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_control));

    frame.render_stateful_widget(table, area, &mut state);
}
