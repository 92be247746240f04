//! Audio notification: tone plans and the beep schedule.
//!
//! The notifier consumes the alarm set and drives a single repeating
//! tone keyed on the highest priority present. There is exactly one
//! active loop slot; arming a different plan replaces whatever was
//! scheduled before, and cancelling twice is a no-op.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use super::evaluate::Priority;
use super::registry::AlarmRegistry;

/// A repeating tone: pitch, burst length, repeat interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TonePlan {
    pub frequency_hz: u32,
    pub burst: Duration,
    pub interval: Duration,
}

/// Critical alarms: rapid high-pitched bursts.
pub const CRITICAL_TONE: TonePlan = TonePlan {
    frequency_hz: 1000,
    burst: Duration::from_millis(100),
    interval: Duration::from_millis(500),
};

/// Warning alarms: slower medium-pitched bursts.
pub const WARNING_TONE: TonePlan = TonePlan {
    frequency_hz: 600,
    burst: Duration::from_millis(150),
    interval: Duration::from_millis(1500),
};

/// Select the tone for the current alarm set.
///
/// Returns `None` when the registry is empty or silenced; otherwise the
/// plan for the highest priority present (critical beats warning).
pub fn tone_plan(registry: &AlarmRegistry, now: Instant) -> Option<TonePlan> {
    if registry.is_silenced(now) {
        return None;
    }
    match registry.highest_priority()? {
        Priority::Critical => Some(CRITICAL_TONE),
        Priority::Warning => Some(WARNING_TONE),
    }
}

/// Emits a single burst of a tone plan.
pub trait Sounder: Send {
    fn beep(&mut self, plan: &TonePlan);
}

/// Rings the terminal bell.
///
/// The terminal cannot shape a pitched burst; the plan's cadence is
/// preserved and the pitch is left to the emulator.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl Sounder for TerminalBell {
    fn beep(&mut self, _plan: &TonePlan) {
        let mut stdout = io::stdout();
        let _ = stdout.write_all(b"\x07");
        let _ = stdout.flush();
    }
}

/// Discards all tones. Used by tests and `--no-bell`.
#[derive(Debug, Default)]
pub struct NullSounder;

impl Sounder for NullSounder {
    fn beep(&mut self, _plan: &TonePlan) {}
}

/// The single active alarm-sound loop.
#[derive(Debug, Default)]
pub struct BeepSchedule {
    plan: Option<TonePlan>,
    next_due: Option<Instant>,
}

impl BeepSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Align the schedule with the desired plan.
    ///
    /// A changed plan restarts the loop from `now`; re-arming the same
    /// plan leaves the pending burst untouched.
    pub fn arm(&mut self, plan: Option<TonePlan>, now: Instant) {
        if plan == self.plan {
            return;
        }
        self.plan = plan;
        self.next_due = plan.map(|p| now + p.interval);
    }

    /// Stop the loop. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        self.plan = None;
        self.next_due = None;
    }

    /// Fire the sounder if a burst is due, then schedule the next one.
    pub fn service(&mut self, now: Instant, sounder: &mut dyn Sounder) {
        let (Some(plan), Some(due)) = (self.plan, self.next_due) else {
            return;
        };
        if now >= due {
            sounder.beep(&plan);
            self.next_due = Some(now + plan.interval);
        }
    }

    pub fn plan(&self) -> Option<TonePlan> {
        self.plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::evaluate::AlarmCondition;

    struct CountingSounder {
        beeps: usize,
        last_frequency: Option<u32>,
    }

    impl CountingSounder {
        fn new() -> Self {
            Self {
                beeps: 0,
                last_frequency: None,
            }
        }
    }

    impl Sounder for CountingSounder {
        fn beep(&mut self, plan: &TonePlan) {
            self.beeps += 1;
            self.last_frequency = Some(plan.frequency_hz);
        }
    }

    fn condition(priority: Priority, title: &'static str) -> AlarmCondition {
        AlarmCondition {
            priority,
            title,
            message: "test".to_string(),
        }
    }

    #[test]
    fn test_tone_plan_picks_highest_priority() {
        let now = Instant::now();
        let mut registry = AlarmRegistry::new();
        assert_eq!(tone_plan(&registry, now), None);

        registry.record(condition(Priority::Warning, "CO₂ Abnormal"));
        assert_eq!(tone_plan(&registry, now), Some(WARNING_TONE));

        registry.record(condition(Priority::Critical, "SpO₂ Critical"));
        assert_eq!(tone_plan(&registry, now), Some(CRITICAL_TONE));
    }

    #[test]
    fn test_tone_plan_suppressed_while_silenced() {
        let now = Instant::now();
        let mut registry = AlarmRegistry::new();
        registry.record(condition(Priority::Critical, "SpO₂ Critical"));
        registry.silence(now);

        assert_eq!(tone_plan(&registry, now), None);

        // Audio resumes automatically once the window expires.
        let later = now + Duration::from_secs(121);
        assert_eq!(tone_plan(&registry, later), Some(CRITICAL_TONE));
    }

    #[test]
    fn test_schedule_fires_on_interval() {
        let t0 = Instant::now();
        let mut schedule = BeepSchedule::new();
        let mut sounder = CountingSounder::new();

        schedule.arm(Some(CRITICAL_TONE), t0);
        schedule.service(t0, &mut sounder);
        assert_eq!(sounder.beeps, 0);

        schedule.service(t0 + Duration::from_millis(500), &mut sounder);
        assert_eq!(sounder.beeps, 1);
        assert_eq!(sounder.last_frequency, Some(1000));

        // Not due again until another interval has passed.
        schedule.service(t0 + Duration::from_millis(600), &mut sounder);
        assert_eq!(sounder.beeps, 1);
        schedule.service(t0 + Duration::from_millis(1100), &mut sounder);
        assert_eq!(sounder.beeps, 2);
    }

    #[test]
    fn test_rearming_same_plan_keeps_pending_burst() {
        let t0 = Instant::now();
        let mut schedule = BeepSchedule::new();

        schedule.arm(Some(WARNING_TONE), t0);
        let first_due = schedule.next_due;
        schedule.arm(Some(WARNING_TONE), t0 + Duration::from_millis(700));
        assert_eq!(schedule.next_due, first_due);
    }

    #[test]
    fn test_changed_plan_replaces_loop() {
        let t0 = Instant::now();
        let mut schedule = BeepSchedule::new();
        let mut sounder = CountingSounder::new();

        schedule.arm(Some(WARNING_TONE), t0);
        schedule.arm(Some(CRITICAL_TONE), t0 + Duration::from_millis(100));

        schedule.service(t0 + Duration::from_millis(600), &mut sounder);
        assert_eq!(sounder.last_frequency, Some(1000));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let t0 = Instant::now();
        let mut schedule = BeepSchedule::new();
        let mut sounder = CountingSounder::new();

        schedule.arm(Some(CRITICAL_TONE), t0);
        schedule.cancel();
        schedule.cancel();

        schedule.service(t0 + Duration::from_secs(10), &mut sounder);
        assert_eq!(sounder.beeps, 0);
        assert_eq!(schedule.plan(), None);
    }
}
