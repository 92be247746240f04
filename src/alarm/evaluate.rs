//! Threshold evaluation of the current vitals.
//!
//! A pure function of the vitals snapshot and the static limit table.
//! Six parameters are checked independently; for each, a critical
//! violation emits exactly one critical condition and suppresses the
//! warning check for that parameter.

use crate::alarm::limits::{AlarmLimits, VitalStatus};
use crate::sim::context::VitalsSnapshot;

/// Alarm priority, ordered by urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Warning,
    Critical,
}

impl Priority {
    /// Lowercase badge text for display and logging.
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Warning => "warning",
            Priority::Critical => "critical",
        }
    }
}

/// A threshold violation produced by one evaluation pass.
///
/// The message embeds the offending value already rounded and unit-tagged.
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmCondition {
    pub priority: Priority,
    pub title: &'static str,
    pub message: String,
}

/// Evaluate the vitals against the limit table.
pub fn evaluate(vitals: &VitalsSnapshot, limits: &AlarmLimits) -> Vec<AlarmCondition> {
    let mut conditions = Vec::new();

    check(
        &mut conditions,
        limits.heart_rate.classify(vitals.heart_rate),
        "Heart Rate Critical",
        "Heart Rate Abnormal",
        format!("{} bpm", vitals.heart_rate.round() as i64),
    );

    check(
        &mut conditions,
        limits.spo2.classify(vitals.spo2),
        "SpO₂ Critical",
        "SpO₂ Low",
        format!("{}%", vitals.spo2.round() as i64),
    );

    check(
        &mut conditions,
        limits.systolic.classify(vitals.systolic),
        "Blood Pressure Critical",
        "Blood Pressure Abnormal",
        format!(
            "{}/{} mmHg",
            vitals.systolic.round() as i64,
            vitals.diastolic.round() as i64
        ),
    );

    check(
        &mut conditions,
        limits.co2.classify(vitals.co2),
        "CO₂ Critical",
        "CO₂ Abnormal",
        format!("{} mmHg", vitals.co2.round() as i64),
    );

    check(
        &mut conditions,
        limits.temperature.classify(vitals.temperature),
        "Temperature Critical",
        "Temperature Abnormal",
        format!("{:.1}°C", vitals.temperature),
    );

    check(
        &mut conditions,
        limits.peak_pressure.classify(vitals.peak_pressure),
        "High Airway Pressure",
        "Elevated Airway Pressure",
        format!("{} cmH₂O", vitals.peak_pressure.round() as i64),
    );

    conditions
}

fn check(
    conditions: &mut Vec<AlarmCondition>,
    status: VitalStatus,
    critical_title: &'static str,
    warning_title: &'static str,
    message: String,
) {
    let (priority, title) = match status {
        VitalStatus::Critical => (Priority::Critical, critical_title),
        VitalStatus::Warning => (Priority::Warning, warning_title),
        VitalStatus::Normal => return,
    };
    conditions.push(AlarmCondition {
        priority,
        title,
        message,
    });
}
