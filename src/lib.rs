//! # gaswatch
//!
//! A simulated anesthesia-machine monitor for the terminal.
//!
//! gaswatch synthesizes plausible physiological vital signs and
//! waveform traces in response to operator-set ventilator and
//! anesthetic controls, renders them as animated terminal widgets,
//! and raises threshold-based alarms. There is no sensor input, no
//! persistence, and no network protocol: the simulation itself is the
//! data source.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Application                           │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌──────────┐ │
//! │  │  app    │───▶│  alarm   │───▶│   ui    │───▶│ Terminal │ │
//! │  │ (state) │    │(evaluate)│    │(render) │    │          │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └──────────┘ │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  ┌─────────┐                                                 │
//! │  │  sim    │◀── Engine | Waveforms | VitalsHistory           │
//! │  │ (model) │                                                 │
//! │  └─────────┘                                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation, and user
//!   interaction logic
//! - **[`sim`]**: The simulation context, the per-tick vitals engine
//!   with its injectable noise seam, waveform synthesis, and trend
//!   history
//! - **[`alarm`]**: Threshold tables, the pure evaluation pass, the
//!   alarm registry lifecycle, and tone-plan notification
//! - **[`ui`]**: Terminal rendering using ratatui - vital cards,
//!   waveform panes, control panel, alarm lists, and theme support
//! - **[`settings`]**: Startup configuration (tick period, alarm-limit
//!   overrides) from file and environment
//!
//! ## Control flow
//!
//! The main loop redraws and advances the waveform traces every frame;
//! every tick period (2 seconds by default) it runs one simulation
//! step: engine tick → alarm evaluation → registry recording →
//! notifier re-arm.
//!
//! ## Usage
//!
//! ```bash
//! # Run with defaults
//! gaswatch
//!
//! # Reproducible noise, custom limits, muted bell
//! gaswatch --seed 42 --config limits.toml --no-bell
//! ```
//!
//! ### As a library
//!
//! ```
//! use gaswatch::sim::{Engine, RngNoise, SimContext};
//! use gaswatch::alarm::{evaluate, AlarmLimits, AlarmRegistry};
//!
//! let mut engine = Engine::new(Box::new(RngNoise::seeded(42)), 2.0);
//! let mut ctx = SimContext::default();
//! let limits = AlarmLimits::default();
//! let mut registry = AlarmRegistry::new();
//!
//! engine.tick(&mut ctx);
//! for condition in evaluate(&ctx.vitals, &limits) {
//!     registry.record(condition);
//! }
//! ```

pub mod alarm;
pub mod app;
pub mod events;
pub mod settings;
pub mod sim;
pub mod ui;

// Re-export main types for convenience
pub use alarm::{
    evaluate, Alarm, AlarmCondition, AlarmLimits, AlarmRegistry, Priority, Sounder, TonePlan,
    VitalStatus,
};
pub use app::{App, View};
pub use settings::Settings;
pub use sim::{ControlSettings, Engine, NoiseSource, RngNoise, SimContext, VitalsSnapshot};
pub use ui::Theme;
