//! The physiological simulation: state, engine, waveforms, history.
//!
//! ## Submodules
//!
//! - [`context`]: Simulation state ([`SimContext`], [`VitalsSnapshot`],
//!   [`ControlSettings`], [`DerivedValues`]) and the control spec table
//! - [`engine`]: The per-tick vitals model and the [`NoiseSource`] seam
//! - [`wave`]: Waveform cycle shapes and sweep buffers for the traces
//! - [`history`]: Rolling vitals windows for trend sparklines
//!
//! ## Data flow
//!
//! ```text
//! ControlSettings ──▶ Engine::tick() ──▶ VitalsSnapshot / DerivedValues
//!                                              │
//!                                              ├──▶ alarm::evaluate()
//!                                              └──▶ VitalsHistory::record()
//! ```

pub mod context;
pub mod engine;
pub mod history;
pub mod wave;

pub use context::{ControlId, ControlSettings, DerivedValues, SimContext, VitalsSnapshot, CONTROLS};
pub use engine::{Engine, NoiseSource, RngNoise};
pub use history::VitalsHistory;
pub use wave::{WaveShape, WaveTrace, Waveforms};
