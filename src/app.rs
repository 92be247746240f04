//! Application state and user interaction logic.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::alarm::evaluate::evaluate;
use crate::alarm::limits::{AlarmLimits, VitalStatus};
use crate::alarm::notify::{tone_plan, BeepSchedule, Sounder};
use crate::alarm::registry::AlarmRegistry;
use crate::sim::context::{ControlId, SimContext, CONTROLS};
use crate::sim::engine::{Engine, NoiseSource};
use crate::sim::history::VitalsHistory;
use crate::sim::wave::Waveforms;
use crate::ui::Theme;

/// Points per waveform sweep before the trace restarts.
const WAVE_SWEEP_POINTS: usize = 240;

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Vital cards, waveforms, controls, and the alarm strip.
    Monitor,
    /// Per-vital min/current/max with sparklines.
    Trends,
    /// The full alarm list.
    Alarms,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Monitor => View::Trends,
            View::Trends => View::Alarms,
            View::Alarms => View::Monitor,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Monitor => View::Alarms,
            View::Trends => View::Monitor,
            View::Alarms => View::Trends,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Monitor => "Monitor",
            View::Trends => "Trends",
            View::Alarms => "Alarms",
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    // Simulation
    pub context: SimContext,
    engine: Engine,
    wave_noise: Box<dyn NoiseSource>,
    pub waves: Waveforms,
    pub history: VitalsHistory,
    pub tick_period: Duration,

    // Alarms
    pub limits: AlarmLimits,
    pub registry: AlarmRegistry,
    beeps: BeepSchedule,
    sounder: Box<dyn Sounder>,

    // UI
    pub selected_control: usize,
    pub theme: Theme,
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App with the given engine, noise, sounder, and limits.
    pub fn new(
        engine: Engine,
        wave_noise: Box<dyn NoiseSource>,
        sounder: Box<dyn Sounder>,
        limits: AlarmLimits,
        tick_period: Duration,
        theme: Theme,
    ) -> Self {
        Self {
            running: true,
            current_view: View::Monitor,
            show_help: false,
            context: SimContext::default(),
            engine,
            wave_noise,
            waves: Waveforms::new(WAVE_SWEEP_POINTS),
            history: VitalsHistory::new(),
            tick_period,
            limits,
            registry: AlarmRegistry::new(),
            beeps: BeepSchedule::new(),
            sounder,
            selected_control: 0,
            theme,
            status_message: None,
        }
    }

    /// Run one simulation step: advance the model, record history, then
    /// evaluate and register alarm conditions.
    pub fn tick(&mut self) {
        self.engine.tick(&mut self.context);
        self.history.record(&self.context.vitals);

        for condition in evaluate(&self.context.vitals, &self.limits) {
            self.registry.record(condition);
        }

        debug!(
            hr = self.context.vitals.heart_rate,
            co2 = self.context.vitals.co2,
            alarms = self.registry.len(),
            "tick"
        );
    }

    /// Advance the waveform traces one frame.
    pub fn advance_waves(&mut self) {
        self.waves.advance(&self.context, self.wave_noise.as_mut());
    }

    /// Keep the beep loop aligned with the alarm set and fire due bursts.
    pub fn service_audio(&mut self, now: Instant) {
        self.beeps.arm(tone_plan(&self.registry, now), now);
        self.beeps.service(now, self.sounder.as_mut());
    }

    /// Silence alarms for the standard window, dropping warnings.
    pub fn silence_alarms(&mut self) {
        self.registry.silence(Instant::now());
        self.beeps.cancel();
        self.set_status_message("Alarms silenced for 120s".to_string());
    }

    /// Clear all alarms and any active silence.
    pub fn reset_alarms(&mut self) {
        self.registry.reset();
        self.beeps.cancel();
        self.set_status_message("Alarms reset".to_string());
    }

    /// The control currently selected in the panel.
    pub fn selected_control_id(&self) -> ControlId {
        CONTROLS[self.selected_control]
    }

    /// Move the control selection down.
    pub fn select_next_control(&mut self) {
        self.selected_control = (self.selected_control + 1) % CONTROLS.len();
    }

    /// Move the control selection up.
    pub fn select_prev_control(&mut self) {
        self.selected_control = (self.selected_control + CONTROLS.len() - 1) % CONTROLS.len();
    }

    /// Adjust the selected control by `steps` increments of its step size.
    pub fn adjust_selected_control(&mut self, steps: f64) {
        let id = self.selected_control_id();
        self.context.controls.adjust(id, steps);
    }

    /// Live status of each alarmed vital, in card order.
    pub fn vital_statuses(&self) -> [VitalStatus; 6] {
        let v = &self.context.vitals;
        [
            self.limits.heart_rate.classify(v.heart_rate),
            self.limits.systolic.classify(v.systolic),
            self.limits.spo2.classify(v.spo2),
            self.limits.co2.classify(v.co2),
            self.limits.temperature.classify(v.temperature),
            self.limits.peak_pressure.classify(v.peak_pressure),
        ]
    }

    /// The worst live vital status, for the header indicator.
    pub fn overall_status(&self) -> VitalStatus {
        self.vital_statuses()
            .into_iter()
            .max()
            .unwrap_or(VitalStatus::Normal)
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}
