//! Alarm threshold tables.
//!
//! Static per-parameter bounds, overridable from the settings file,
//! read-only once the monitor is running. The same classification that
//! fires alarms also drives the vital-card styling.

use serde::Deserialize;

/// Optional low/high bounds for one severity band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Band {
    pub low: Option<f64>,
    pub high: Option<f64>,
}

impl Band {
    const fn new(low: Option<f64>, high: Option<f64>) -> Self {
        Self { low, high }
    }

    /// True when the value falls outside a configured bound.
    pub fn violated(&self, value: f64) -> bool {
        self.low.is_some_and(|low| value < low) || self.high.is_some_and(|high| value > high)
    }
}

/// Warning and critical bands for one parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct ParamLimits {
    #[serde(default)]
    pub warn: Band,
    #[serde(default)]
    pub critical: Band,
}

impl ParamLimits {
    /// Classify a value. Critical is checked first and wins; a value
    /// is never both warning and critical.
    pub fn classify(&self, value: f64) -> VitalStatus {
        if self.critical.violated(value) {
            VitalStatus::Critical
        } else if self.warn.violated(value) {
            VitalStatus::Warning
        } else {
            VitalStatus::Normal
        }
    }
}

/// Discrete display state for a vital.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VitalStatus {
    Normal,
    Warning,
    Critical,
}

impl VitalStatus {
    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            VitalStatus::Normal => "OK",
            VitalStatus::Warning => "WARN",
            VitalStatus::Critical => "CRIT",
        }
    }
}

/// Threshold table for every alarmed parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlarmLimits {
    pub heart_rate: ParamLimits,
    pub systolic: ParamLimits,
    pub spo2: ParamLimits,
    pub co2: ParamLimits,
    pub temperature: ParamLimits,
    pub peak_pressure: ParamLimits,
}

impl Default for AlarmLimits {
    fn default() -> Self {
        Self {
            heart_rate: ParamLimits {
                warn: Band::new(Some(50.0), Some(100.0)),
                critical: Band::new(Some(40.0), Some(130.0)),
            },
            systolic: ParamLimits {
                warn: Band::new(Some(90.0), Some(140.0)),
                critical: Band::new(Some(70.0), Some(180.0)),
            },
            spo2: ParamLimits {
                warn: Band::new(Some(94.0), None),
                critical: Band::new(Some(90.0), None),
            },
            co2: ParamLimits {
                warn: Band::new(Some(30.0), Some(45.0)),
                critical: Band::new(Some(25.0), Some(55.0)),
            },
            temperature: ParamLimits {
                warn: Band::new(Some(36.0), Some(37.5)),
                critical: Band::new(Some(35.0), Some(38.5)),
            },
            peak_pressure: ParamLimits {
                warn: Band::new(None, Some(30.0)),
                critical: Band::new(None, Some(40.0)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_critical_wins() {
        let limits = AlarmLimits::default();
        // 35 violates both the warning and the critical low bound;
        // classification reports only critical.
        assert_eq!(
            limits.heart_rate.classify(35.0),
            VitalStatus::Critical
        );
        assert_eq!(
            limits.heart_rate.classify(45.0),
            VitalStatus::Warning
        );
        assert_eq!(limits.heart_rate.classify(75.0), VitalStatus::Normal);
    }

    #[test]
    fn test_one_sided_bands() {
        let limits = AlarmLimits::default();
        // SpO₂ only alarms low; high values are normal.
        assert_eq!(limits.spo2.classify(100.0), VitalStatus::Normal);
        assert_eq!(limits.spo2.classify(92.0), VitalStatus::Warning);
        assert_eq!(limits.spo2.classify(89.0), VitalStatus::Critical);

        // Peak pressure only alarms high.
        assert_eq!(limits.peak_pressure.classify(6.0), VitalStatus::Normal);
        assert_eq!(limits.peak_pressure.classify(32.0), VitalStatus::Warning);
        assert_eq!(limits.peak_pressure.classify(45.0), VitalStatus::Critical);
    }

    #[test]
    fn test_bounds_are_exclusive() {
        let limits = AlarmLimits::default();
        // Values exactly on a bound do not violate it.
        assert_eq!(limits.heart_rate.classify(50.0), VitalStatus::Normal);
        assert_eq!(limits.heart_rate.classify(100.0), VitalStatus::Normal);
        assert_eq!(limits.heart_rate.classify(130.0), VitalStatus::Warning);
    }

    #[test]
    fn test_deserialize_partial_override() {
        let json = r#"{
            "heart_rate": {
                "warn": { "low": 55.0, "high": 95.0 },
                "critical": { "low": 45.0, "high": 125.0 }
            }
        }"#;

        let limits: AlarmLimits = serde_json::from_str(json).unwrap();
        assert_eq!(limits.heart_rate.warn.low, Some(55.0));
        assert_eq!(limits.heart_rate.critical.high, Some(125.0));
        // Untouched parameters keep the defaults.
        assert_eq!(limits.spo2, AlarmLimits::default().spo2);
    }

    #[test]
    fn test_status_ordering() {
        assert!(VitalStatus::Critical > VitalStatus::Warning);
        assert!(VitalStatus::Warning > VitalStatus::Normal);
    }
}
