//! Waveform pane rendering.
//!
//! Each trace renders as a row of 8-level bar characters inside a
//! bordered pane, sweeping left to right and restarting when the
//! sweep buffer wraps.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::sim::wave::WaveTrace;
use crate::ui::common::SPARKLINE_CHARS;

/// Render the three waveform panes stacked vertically.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let panes = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ])
    .split(area);

    let v = &app.context.vitals;

    render_trace(
        frame,
        app,
        &app.waves.ecg,
        panes[0],
        format!(" ECG  {} bpm ", v.heart_rate.round() as i64),
        Color::Green,
        // QRS deflections reach below baseline and up to 1.0.
        (-0.35, 1.05),
    );
    render_trace(
        frame,
        app,
        &app.waves.capno,
        panes[1],
        format!(" CO₂  {} mmHg ", v.co2.round() as i64),
        Color::Yellow,
        (-0.1, 1.1),
    );
    render_trace(
        frame,
        app,
        &app.waves.pleth,
        panes[2],
        format!(" Pleth  {}% ", v.spo2.round() as i64),
        Color::Blue,
        (-0.1, 1.0),
    );
}

fn render_trace(
    frame: &mut Frame,
    app: &App,
    trace: &WaveTrace,
    area: Rect,
    title: String,
    color: Color,
    range: (f64, f64),
) {
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(color))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let inner_width = area.width.saturating_sub(2) as usize;
    let line = Line::from(Span::styled(
        trace_row(trace, inner_width, range),
        Style::default().fg(color),
    ));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Map the sweep buffer onto `width` columns of bar characters.
///
/// Columns ahead of the sweep stay blank, so the pane visibly erases
/// and redraws like a monitor.
fn trace_row(trace: &WaveTrace, width: usize, range: (f64, f64)) -> String {
    if width == 0 {
        return String::new();
    }

    let samples = trace.samples();
    let per_column = (trace.max_points() as f64 / width as f64).max(1.0);
    let (low, high) = range;
    let span = (high - low).max(f64::EPSILON);

    (0..width)
        .map(|column| {
            let start = (column as f64 * per_column) as usize;
            let end = (((column + 1) as f64 * per_column) as usize).min(samples.len());
            if start >= samples.len() {
                return ' ';
            }
            // Peak-pick within the column so narrow spikes survive.
            let peak = samples[start..end]
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max);
            if peak.is_finite() {
                let level = ((peak - low) / span * 7.0).clamp(0.0, 7.0) as usize;
                SPARKLINE_CHARS[level]
            } else {
                ' '
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::engine::NoiseSource;
    use crate::sim::wave::CapnoShape;

    struct ZeroNoise;

    impl NoiseSource for ZeroNoise {
        fn unit(&mut self) -> f64 {
            0.0
        }
    }

    #[test]
    fn test_trace_row_blank_ahead_of_sweep() {
        let mut trace = WaveTrace::new(Box::new(CapnoShape), 100);
        let mut noise = ZeroNoise;
        for _ in 0..50 {
            trace.advance(1.0, 1.0, &mut noise);
        }

        let row = trace_row(&trace, 100, (0.0, 1.0));
        assert_eq!(row.chars().count(), 100);
        // Second half of the sweep has not been drawn yet.
        assert!(row.chars().skip(50).all(|c| c == ' '));
        assert!(row.chars().take(50).any(|c| c != ' '));
    }

    #[test]
    fn test_trace_row_handles_zero_width() {
        let trace = WaveTrace::new(Box::new(CapnoShape), 100);
        assert_eq!(trace_row(&trace, 0, (0.0, 1.0)), "");
    }
}
