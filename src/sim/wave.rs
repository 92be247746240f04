//! Waveform synthesis for the animated traces.
//!
//! One [`WaveShape`] trait models the shared cycle behavior; the ECG,
//! capnogram, and plethysmogram differ only in their amplitude curve
//! and noise band. [`WaveTrace`] owns the sweep buffer a shape feeds,
//! advanced by the frame loop independently of the vitals tick.

use std::f64::consts::PI;

use crate::sim::context::SimContext;
use crate::sim::engine::NoiseSource;

/// Phase advanced per frame at baseline speed (5-second sweep at 60 Hz).
const BASE_PHASE_STEP: f64 = 0.008;

/// Amplitude curve of one repeating waveform cycle.
pub trait WaveShape: Send {
    /// Amplitude at a phase within [0, 1) of one cycle.
    fn amplitude(&self, phase: f64) -> f64;

    /// Span of the uniform noise added to each sample.
    fn noise_span(&self) -> f64;
}

/// ECG: P wave, QRS complex, T wave.
#[derive(Debug, Default)]
pub struct EcgShape;

impl WaveShape for EcgShape {
    fn amplitude(&self, phase: f64) -> f64 {
        if phase > 0.1 && phase < 0.2 {
            // P wave
            0.15 * ((phase - 0.1) * PI / 0.1).sin()
        } else if phase > 0.3 && phase < 0.4 {
            // QRS complex
            let qrs = (phase - 0.3) / 0.1;
            if qrs < 0.3 {
                -0.2
            } else if qrs < 0.5 {
                1.0
            } else {
                -0.3
            }
        } else if phase > 0.5 && phase < 0.7 {
            // T wave
            0.25 * ((phase - 0.5) * PI / 0.2).sin()
        } else {
            0.0
        }
    }

    fn noise_span(&self) -> f64 {
        0.02
    }
}

/// Capnogram: baseline, upstroke, alveolar plateau, downstroke.
#[derive(Debug, Default)]
pub struct CapnoShape;

impl WaveShape for CapnoShape {
    fn amplitude(&self, phase: f64) -> f64 {
        if phase < 0.3 {
            0.0
        } else if phase < 0.5 {
            (phase - 0.3) / 0.2
        } else if phase < 0.8 {
            1.0
        } else {
            1.0 - (phase - 0.8) / 0.2
        }
    }

    fn noise_span(&self) -> f64 {
        0.03
    }
}

/// Plethysmogram: systolic pulse with a dicrotic bump.
#[derive(Debug, Default)]
pub struct PlethShape;

impl WaveShape for PlethShape {
    fn amplitude(&self, phase: f64) -> f64 {
        if phase < 0.3 {
            (phase / 0.3 * PI).sin() * 0.8
        } else if phase < 0.5 {
            0.2 * ((phase - 0.3) / 0.2 * PI).sin()
        } else {
            0.0
        }
    }

    fn noise_span(&self) -> f64 {
        0.05
    }
}

/// A sweeping sample buffer fed by one wave shape.
///
/// Samples accumulate left to right; when the sweep reaches the end of
/// the pane the buffer clears and the sweep restarts, like a monitor's
/// erase-bar display.
pub struct WaveTrace {
    shape: Box<dyn WaveShape>,
    samples: Vec<f64>,
    max_points: usize,
    phase: f64,
}

impl WaveTrace {
    pub fn new(shape: Box<dyn WaveShape>, max_points: usize) -> Self {
        Self {
            shape,
            samples: Vec::with_capacity(max_points),
            max_points,
            phase: 0.0,
        }
    }

    /// Append one sample and advance the cycle phase.
    ///
    /// `speed` scales the phase step (1.0 = baseline cycle rate) and
    /// `gain` scales the amplitude.
    pub fn advance(&mut self, speed: f64, gain: f64, noise: &mut dyn NoiseSource) {
        let value = self.shape.amplitude(self.phase.fract()) * gain
            + noise.unit() * self.shape.noise_span();
        self.samples.push(value);
        if self.samples.len() >= self.max_points {
            self.samples.clear();
        }
        self.phase += BASE_PHASE_STEP * speed;
    }

    /// Samples of the current sweep, oldest first.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }
}

/// The three monitor traces, advanced together each frame.
pub struct Waveforms {
    pub ecg: WaveTrace,
    pub capno: WaveTrace,
    pub pleth: WaveTrace,
}

impl Waveforms {
    pub fn new(max_points: usize) -> Self {
        Self {
            ecg: WaveTrace::new(Box::new(EcgShape), max_points),
            capno: WaveTrace::new(Box::new(CapnoShape), max_points),
            pleth: WaveTrace::new(Box::new(PlethShape), max_points),
        }
    }

    /// Advance all traces one frame.
    ///
    /// ECG and pleth cycle with heart rate, the capnogram with
    /// respiratory rate; pleth amplitude scales with SpO₂.
    pub fn advance(&mut self, ctx: &SimContext, noise: &mut dyn NoiseSource) {
        let pulse_speed = ctx.vitals.heart_rate / 75.0;
        let breath_speed = ctx.controls.respiratory_rate / 12.0;

        self.ecg.advance(pulse_speed, 1.0, noise);
        self.capno.advance(breath_speed, 1.0, noise);
        self.pleth.advance(pulse_speed, ctx.vitals.spo2 / 100.0, noise);
    }
}
