//! Alarm lifecycle: deduplication, ordering, cap, silence, reset.
//!
//! The registry is an acknowledgment log, not a live condition display:
//! a recorded alarm persists until `reset()` clears it (or `silence()`
//! drops it, for warnings), even if the underlying condition has since
//! resolved. Deduplication by (title, priority) keeps a persisting
//! condition from spamming the list. The vital cards show live status.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tracing::info;

use super::evaluate::{AlarmCondition, Priority};

/// How many alarms the registry retains, most recent first.
const MAX_ALARMS: usize = 8;

/// How long a silence lasts before audio resumes automatically.
pub const SILENCE_WINDOW: Duration = Duration::from_secs(120);

/// A recorded alarm.
#[derive(Debug, Clone)]
pub struct Alarm {
    /// Creation timestamp in milliseconds since the epoch.
    pub id: i64,
    pub priority: Priority,
    pub title: &'static str,
    pub message: String,
    /// Wall-clock time of recording, formatted HH:MM:SS.
    pub fired_at: String,
}

/// Ordered alarm list plus the silence deadline.
#[derive(Debug, Default)]
pub struct AlarmRegistry {
    alarms: Vec<Alarm>,
    silence_until: Option<Instant>,
}

impl AlarmRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a condition, stamped with the current wall clock.
    pub fn record(&mut self, condition: AlarmCondition) -> bool {
        self.record_at(condition, Local::now())
    }

    /// Record a condition with an explicit timestamp.
    ///
    /// A no-op when an alarm with the same (title, priority) is already
    /// present. New alarms are inserted at the front; the list is then
    /// truncated to the most recent eight.
    pub fn record_at(&mut self, condition: AlarmCondition, fired_at: DateTime<Local>) -> bool {
        let duplicate = self
            .alarms
            .iter()
            .any(|a| a.title == condition.title && a.priority == condition.priority);
        if duplicate {
            return false;
        }

        info!(
            title = condition.title,
            priority = condition.priority.label(),
            detail = %condition.message,
            "alarm raised"
        );

        self.alarms.insert(
            0,
            Alarm {
                id: fired_at.timestamp_millis(),
                priority: condition.priority,
                title: condition.title,
                message: condition.message,
                fired_at: fired_at.format("%H:%M:%S").to_string(),
            },
        );
        self.alarms.truncate(MAX_ALARMS);
        true
    }

    /// Clear all alarms and any active silence.
    pub fn reset(&mut self) {
        info!(cleared = self.alarms.len(), "alarms reset");
        self.alarms.clear();
        self.silence_until = None;
    }

    /// Mute audio for the silence window and drop non-critical alarms.
    ///
    /// Critical alarms stay visible and resume sounding once the window
    /// expires, if still recorded. Re-silencing re-arms the deadline.
    pub fn silence(&mut self, now: Instant) {
        self.silence_until = Some(now + SILENCE_WINDOW);
        let before = self.alarms.len();
        self.alarms.retain(|a| a.priority == Priority::Critical);
        info!(dropped = before - self.alarms.len(), "alarms silenced");
    }

    /// Whether the silence window is still open.
    pub fn is_silenced(&self, now: Instant) -> bool {
        self.silence_until.is_some_and(|deadline| now < deadline)
    }

    /// Time left in the silence window, if any.
    pub fn silence_remaining(&self, now: Instant) -> Option<Duration> {
        let deadline = self.silence_until?;
        deadline.checked_duration_since(now)
    }

    pub fn is_empty(&self) -> bool {
        self.alarms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.alarms.len()
    }

    /// Recorded alarms, most recent first.
    pub fn alarms(&self) -> &[Alarm] {
        &self.alarms
    }

    /// The most urgent priority currently recorded.
    pub fn highest_priority(&self) -> Option<Priority> {
        self.alarms.iter().map(|a| a.priority).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn condition(priority: Priority, title: &'static str) -> AlarmCondition {
        AlarmCondition {
            priority,
            title,
            message: "test".to_string(),
        }
    }

    #[test]
    fn test_record_is_idempotent_per_title_and_priority() {
        let mut registry = AlarmRegistry::new();

        assert!(registry.record(condition(Priority::Warning, "Heart Rate Abnormal")));
        assert!(!registry.record(condition(Priority::Warning, "Heart Rate Abnormal")));
        assert_eq!(registry.len(), 1);

        // Same title at a different priority is a distinct alarm.
        assert!(registry.record(condition(Priority::Critical, "Heart Rate Abnormal")));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_newest_first_capped_at_eight() {
        let mut registry = AlarmRegistry::new();
        let titles = [
            "Alarm 1", "Alarm 2", "Alarm 3", "Alarm 4", "Alarm 5", "Alarm 6", "Alarm 7",
            "Alarm 8", "Alarm 9",
        ];
        for title in titles {
            registry.record(condition(Priority::Warning, title));
        }

        assert_eq!(registry.len(), 8);
        assert_eq!(registry.alarms()[0].title, "Alarm 9");
        assert_eq!(registry.alarms()[7].title, "Alarm 2");
        assert!(!registry.alarms().iter().any(|a| a.title == "Alarm 1"));
    }

    #[test]
    fn test_silence_drops_warnings_keeps_criticals() {
        let mut registry = AlarmRegistry::new();
        registry.record(condition(Priority::Warning, "CO₂ Abnormal"));
        registry.record(condition(Priority::Critical, "SpO₂ Critical"));
        registry.record(condition(Priority::Warning, "Temperature Abnormal"));

        registry.silence(Instant::now());

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.alarms()[0].title, "SpO₂ Critical");
    }

    #[test]
    fn test_silence_expires_after_window() {
        let mut registry = AlarmRegistry::new();
        let t0 = Instant::now();

        registry.silence(t0);
        assert!(registry.is_silenced(t0));
        assert!(registry.is_silenced(t0 + Duration::from_secs(119)));
        assert!(!registry.is_silenced(t0 + Duration::from_secs(121)));
    }

    #[test]
    fn test_silence_remaining_counts_down() {
        let mut registry = AlarmRegistry::new();
        let t0 = Instant::now();
        registry.silence(t0);

        let remaining = registry.silence_remaining(t0 + Duration::from_secs(20));
        assert_eq!(remaining, Some(Duration::from_secs(100)));
        assert_eq!(
            registry.silence_remaining(t0 + Duration::from_secs(130)),
            None
        );
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut registry = AlarmRegistry::new();
        registry.record(condition(Priority::Critical, "SpO₂ Critical"));
        registry.silence(Instant::now());

        registry.reset();

        assert!(registry.is_empty());
        assert!(!registry.is_silenced(Instant::now() + Duration::from_secs(1)));
    }

    #[test]
    fn test_highest_priority() {
        let mut registry = AlarmRegistry::new();
        assert_eq!(registry.highest_priority(), None);

        registry.record(condition(Priority::Warning, "CO₂ Abnormal"));
        assert_eq!(registry.highest_priority(), Some(Priority::Warning));

        registry.record(condition(Priority::Critical, "SpO₂ Critical"));
        assert_eq!(registry.highest_priority(), Some(Priority::Critical));
    }
}
