//! Terminal rendering using ratatui.
//!
//! Pure projection of [`App`](crate::app::App) state: vital cards,
//! waveform panes, the control panel, alarm lists, trends, and the
//! shared chrome (header, tabs, status bar, help overlay). Nothing in
//! here feeds back into the simulation.

pub mod alarms;
pub mod common;
pub mod controls;
pub mod theme;
pub mod trends;
pub mod vitals;
pub mod waves;

pub use theme::Theme;
