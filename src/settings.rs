//! Runtime settings: tick period and alarm-limit overrides.
//!
//! Settings layer an optional file (TOML or JSON) under `GASWATCH_*`
//! environment variables. Anything unspecified keeps the built-in
//! defaults, so running with no file at all is the common case.

use std::path::Path;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::alarm::limits::AlarmLimits;

/// Settings resolved at startup, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Vitals tick period in milliseconds.
    pub tick_ms: u64,
    /// Alarm threshold table.
    pub limits: AlarmLimits,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: 2000,
            limits: AlarmLimits::default(),
        }
    }
}

impl Settings {
    /// Load settings from an optional file plus environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(Environment::with_prefix("GASWATCH").separator("__"))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.tick_ms, 2000);
        assert_eq!(settings.limits, AlarmLimits::default());
    }

    #[test]
    fn test_file_overrides_limits() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            r#"
tick_ms = 1000

[limits.heart_rate]
warn = {{ low = 55.0, high = 95.0 }}
critical = {{ low = 45.0, high = 125.0 }}
"#
        )
        .unwrap();
        file.flush().unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.tick_ms, 1000);
        assert_eq!(settings.limits.heart_rate.warn.low, Some(55.0));
        assert_eq!(settings.limits.heart_rate.critical.high, Some(125.0));
        // Untouched parameters keep the defaults.
        assert_eq!(settings.limits.co2, AlarmLimits::default().co2);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = Settings::load(Some(Path::new("/nonexistent/gaswatch.toml")));
        assert!(result.is_err());
    }
}
