//! Alarm evaluation, lifecycle, and notification.
//!
//! ## Submodules
//!
//! - [`limits`]: Static threshold tables and value classification
//! - [`evaluate`]: Pure vitals-to-conditions evaluation pass
//! - [`registry`]: Alarm list lifecycle (dedup, cap, silence, reset)
//! - [`notify`]: Tone selection and the single beep-loop slot
//!
//! ## Data flow
//!
//! ```text
//! VitalsSnapshot × AlarmLimits
//!        │
//!        ▼
//! evaluate() ──▶ AlarmCondition* ──▶ AlarmRegistry::record()
//!                                          │
//!                                          ▼
//!                                 tone_plan() ──▶ BeepSchedule ──▶ Sounder
//! ```

pub mod evaluate;
pub mod limits;
pub mod notify;
pub mod registry;

pub use evaluate::{evaluate, AlarmCondition, Priority};
pub use limits::{AlarmLimits, Band, ParamLimits, VitalStatus};
pub use notify::{tone_plan, BeepSchedule, NullSounder, Sounder, TerminalBell, TonePlan};
pub use registry::{Alarm, AlarmRegistry, SILENCE_WINDOW};
