//! Vital-sign card grid.
//!
//! Six cards in a 3×2 grid, each bordered in its live status color,
//! showing the primary value, a secondary reading, and a trend
//! sparkline, plus a thin agent/ventilation strip below.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::alarm::limits::VitalStatus;
use crate::app::App;
use crate::ui::common::render_sparkline;

struct Card {
    title: &'static str,
    status: VitalStatus,
    primary: String,
    unit: &'static str,
    secondary: String,
    /// Index into the history series feeding the trend row.
    series: usize,
}

fn build_cards(app: &App) -> [Card; 6] {
    let v = &app.context.vitals;
    let statuses = app.vital_statuses();

    [
        Card {
            title: " HR ",
            status: statuses[0],
            primary: format!("{}", v.heart_rate.round() as i64),
            unit: "bpm",
            secondary: String::new(),
            series: 0,
        },
        Card {
            title: " NIBP ",
            status: statuses[1],
            primary: format!(
                "{}/{}",
                v.systolic.round() as i64,
                v.diastolic.round() as i64
            ),
            unit: "mmHg",
            secondary: format!("MAP {}", v.mean_arterial().round() as i64),
            series: 1,
        },
        Card {
            title: " SpO₂ ",
            status: statuses[2],
            primary: format!("{}", v.spo2.round() as i64),
            unit: "%",
            secondary: String::new(),
            series: 2,
        },
        Card {
            title: " etCO₂ ",
            status: statuses[3],
            primary: format!("{}", v.co2.round() as i64),
            unit: "mmHg",
            secondary: String::new(),
            series: 3,
        },
        Card {
            title: " Temp ",
            status: statuses[4],
            primary: format!("{:.1}", v.temperature),
            unit: "°C",
            secondary: String::new(),
            series: 4,
        },
        Card {
            title: " Paw ",
            status: statuses[5],
            primary: format!("{}", v.mean_pressure.round() as i64),
            unit: "cmH₂O",
            secondary: format!("peak {}", v.peak_pressure.round() as i64),
            series: 5,
        },
    ]
}

/// Render the card grid.
pub fn render_cards(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::vertical([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    let cards = build_cards(app);
    for (row_index, row_area) in rows.iter().enumerate() {
        let columns = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Fill(1),
        ])
        .split(*row_area);

        for (col_index, card_area) in columns.iter().enumerate() {
            let card = &cards[row_index * 3 + col_index];
            render_card(frame, app, card, *card_area);
        }
    }
}

fn render_card(frame: &mut Frame, app: &App, card: &Card, area: Rect) {
    let value_style = app
        .theme
        .status_style(card.status)
        .add_modifier(Modifier::BOLD);

    let trend_width = (area.width.saturating_sub(4)) as usize;
    let trend = app
        .history
        .series()
        .get(card.series)
        .map(|s| render_sparkline(&s.sparkline(), trend_width))
        .unwrap_or_default();

    let mut lines = vec![Line::from(vec![
        Span::styled(card.primary.clone(), value_style),
        Span::raw(" "),
        Span::styled(card.unit, Style::default().add_modifier(Modifier::DIM)),
    ])];
    if !card.secondary.is_empty() {
        lines.push(Line::from(Span::styled(
            card.secondary.clone(),
            Style::default().add_modifier(Modifier::DIM),
        )));
    }
    lines.push(Line::from(Span::styled(
        trend,
        Style::default().fg(app.theme.highlight),
    )));

    let block = Block::default()
        .title(card.title)
        .title_style(app.theme.status_style(card.status))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.status_border(card.status)));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Render the agent/ventilation strip: inspired and expired agent,
/// fresh gas flow, and the I:E ratio.
pub fn render_gases(frame: &mut Frame, app: &App, area: Rect) {
    let d = &app.context.derived;
    let c = &app.context.controls;

    let line = Line::from(vec![
        Span::styled(" Agent ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(
            "insp {:.1}% / exp {:.1}%",
            d.inspired_agent, d.expired_agent
        )),
        Span::raw(" │ "),
        Span::raw(format!("FGF {:.1} L/min", c.fresh_gas_flow)),
        Span::raw(" │ "),
        Span::raw(format!("I:E 1:{:.1}", d.ie_ratio)),
        Span::raw(" │ "),
        Span::raw(format!("FiO₂ {}%", c.fio2.round() as i64)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(Paragraph::new(line).block(block), area);
}
