//! The physiological simulation engine.
//!
//! Each tick derives a target for every vital from the current control
//! settings, relaxes the vital a fixed fraction toward that target
//! (first-order exponential smoothing), and clamps the result to its
//! physiological range. The clamps are the correctness contract: no
//! sequence of control settings can push a vital outside them.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::sim::context::SimContext;

/// Uniform noise feeding the model's perturbation terms.
///
/// Kept behind a trait so tests can pin exact outputs; production wraps
/// a seedable PRNG.
pub trait NoiseSource: Send {
    /// A uniform sample in [-0.5, 0.5).
    fn unit(&mut self) -> f64;
}

/// Noise backed by a seedable PRNG.
#[derive(Debug)]
pub struct RngNoise {
    rng: StdRng,
}

impl RngNoise {
    /// Entropy-seeded noise for normal operation.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Fixed-seed noise for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RngNoise {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseSource for RngNoise {
    fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>() - 0.5
    }
}

// Baselines.
const BASE_HEART_RATE: f64 = 75.0;
const BASE_SYSTOLIC: f64 = 120.0;
const BASE_TEMPERATURE: f64 = 36.5;

// Agent effect scaling per unit of anesthetic depth.
const HR_DEPTH_EFFECT: f64 = 20.0;
const SYSTOLIC_DEPTH_EFFECT: f64 = 25.0;

// Relaxation rates (fraction of the gap closed per tick).
const HR_RATE: f64 = 0.08;
const SYSTOLIC_RATE: f64 = 0.08;
const SPO2_RATE: f64 = 0.1;
const CO2_RATE: f64 = 0.1;
const TEMPERATURE_RATE: f64 = 0.02;
const INSPIRED_AGENT_RATE: f64 = 0.15;
const EXPIRED_AGENT_RATE: f64 = 0.08;

// Lung compliance in mL/cmH₂O for the peak-pressure model.
const COMPLIANCE: f64 = 50.0;

// Temperature falls 0.5 °C per simulated hour under anesthesia.
const TEMP_DRIFT_PER_HOUR: f64 = 0.5;

/// Drives the vitals model forward one tick at a time.
pub struct Engine {
    noise: Box<dyn NoiseSource>,
    /// Simulated seconds added to the elapsed counter per tick.
    tick_secs: f64,
}

impl Engine {
    /// Create an engine with the given noise source and tick step.
    pub fn new(noise: Box<dyn NoiseSource>, tick_secs: f64) -> Self {
        Self { noise, tick_secs }
    }

    fn jitter(&mut self, span: f64) -> f64 {
        self.noise.unit() * span
    }

    /// Advance the simulation by one tick.
    ///
    /// Total over all control settings; out-of-range intermediate values
    /// are clamped, never rejected.
    pub fn tick(&mut self, ctx: &mut SimContext) {
        ctx.elapsed_secs += self.tick_secs;

        let depth = ctx.controls.anesthetic_depth();
        let minute_ventilation = ctx.controls.minute_ventilation();
        let vitals = &mut ctx.vitals;

        // Heart rate: anesthetics are negatively chronotropic.
        let target_hr = BASE_HEART_RATE - depth * HR_DEPTH_EFFECT + self.jitter(3.0);
        vitals.heart_rate += (target_hr - vitals.heart_rate) * HR_RATE;
        vitals.heart_rate = vitals.heart_rate.clamp(40.0, 130.0);

        // Blood pressure: vasodilation plus negative inotropy.
        let target_systolic = BASE_SYSTOLIC - depth * SYSTOLIC_DEPTH_EFFECT + self.jitter(4.0);
        vitals.systolic += (target_systolic - vitals.systolic) * SYSTOLIC_RATE;
        vitals.systolic = vitals.systolic.clamp(60.0, 180.0);

        // Diastolic tracks systolic directly, no relaxation.
        vitals.diastolic = (vitals.systolic - 40.0 + self.jitter(4.0)).clamp(35.0, 100.0);

        // SpO₂ follows FiO₂ in steps.
        let target_spo2 = if ctx.controls.fio2 >= 40.0 {
            99.0 + self.jitter(0.5)
        } else if ctx.controls.fio2 >= 30.0 {
            97.0 + self.jitter(1.0)
        } else {
            94.0 + (ctx.controls.fio2 - 21.0) / 9.0 * 3.0
        };
        vitals.spo2 += (target_spo2 - vitals.spo2) * SPO2_RATE;
        vitals.spo2 = vitals.spo2.clamp(85.0, 100.0);

        // CO₂ is inverse to minute ventilation.
        vitals.co2 += (target_co2(minute_ventilation) - vitals.co2) * CO2_RATE;
        vitals.co2 = vitals.co2.clamp(20.0, 60.0);

        // Temperature drifts slowly downward over the case.
        let drift = ctx.elapsed_secs / 3600.0 * TEMP_DRIFT_PER_HOUR;
        let target_temp = BASE_TEMPERATURE - drift + self.jitter(0.1);
        vitals.temperature += (target_temp - vitals.temperature) * TEMPERATURE_RATE;
        vitals.temperature = vitals.temperature.clamp(35.0, 38.0);

        // Airway pressures from tidal volume, compliance, and PEEP.
        vitals.peak_pressure =
            (ctx.controls.tidal_volume / COMPLIANCE + ctx.controls.peep + self.jitter(2.0))
                .clamp(5.0, 50.0);
        vitals.mean_pressure = vitals.peak_pressure * 0.7 + self.jitter(1.0);

        // Agent concentrations: inspired rises toward the vaporizer
        // setting diluted by fresh gas, expired follows with uptake lag.
        let derived = &mut ctx.derived;
        let target_inspired = ctx.controls.anesthetic_agent * 0.3;
        derived.inspired_agent += (target_inspired - derived.inspired_agent) * INSPIRED_AGENT_RATE;

        let target_expired = ctx.controls.anesthetic_agent * 0.85;
        derived.expired_agent += (target_expired - derived.expired_agent) * EXPIRED_AGENT_RATE;

        derived.ie_ratio = 2.0 + self.jitter(0.2);
    }
}

/// Target end-tidal CO₂ for a given minute ventilation (L/min).
fn target_co2(minute_ventilation: f64) -> f64 {
    if minute_ventilation < 4.0 {
        50.0 // hypoventilation
    } else if minute_ventilation < 5.0 {
        45.0
    } else if minute_ventilation <= 7.0 {
        38.0 // normal
    } else if minute_ventilation <= 9.0 {
        33.0
    } else {
        28.0 // hyperventilation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::context::{ControlSettings, SimContext};

    /// Noise stub that always returns zero, pinning the model exactly.
    struct ZeroNoise;

    impl NoiseSource for ZeroNoise {
        fn unit(&mut self) -> f64 {
            0.0
        }
    }

    fn engine() -> Engine {
        Engine::new(Box::new(ZeroNoise), 2.0)
    }

    fn assert_in_clamp_ranges(ctx: &SimContext) {
        let v = &ctx.vitals;
        assert!((40.0..=130.0).contains(&v.heart_rate), "hr={}", v.heart_rate);
        assert!((60.0..=180.0).contains(&v.systolic), "sys={}", v.systolic);
        assert!((35.0..=100.0).contains(&v.diastolic), "dia={}", v.diastolic);
        assert!((85.0..=100.0).contains(&v.spo2), "spo2={}", v.spo2);
        assert!((20.0..=60.0).contains(&v.co2), "co2={}", v.co2);
        assert!(
            (35.0..=38.0).contains(&v.temperature),
            "temp={}",
            v.temperature
        );
        assert!(
            (5.0..=50.0).contains(&v.peak_pressure),
            "peak={}",
            v.peak_pressure
        );
    }

    #[test]
    fn test_vitals_stay_clamped_at_control_maximums() {
        let mut engine = engine();
        let mut ctx = SimContext::default();
        ctx.controls = ControlSettings {
            tidal_volume: 800.0,
            respiratory_rate: 20.0,
            peep: 15.0,
            fio2: 100.0,
            fresh_gas_flow: 8.0,
            anesthetic_agent: 5.0,
        };

        for _ in 0..500 {
            engine.tick(&mut ctx);
            assert_in_clamp_ranges(&ctx);
        }
    }

    #[test]
    fn test_vitals_stay_clamped_at_control_minimums() {
        let mut engine = engine();
        let mut ctx = SimContext::default();
        ctx.controls = ControlSettings {
            tidal_volume: 200.0,
            respiratory_rate: 8.0,
            peep: 0.0,
            fio2: 21.0,
            fresh_gas_flow: 0.5,
            anesthetic_agent: 0.0,
        };

        for _ in 0..500 {
            engine.tick(&mut ctx);
            assert_in_clamp_ranges(&ctx);
        }
    }

    #[test]
    fn test_zero_agent_relaxes_to_baselines() {
        let mut engine = engine();
        let mut ctx = SimContext::default();
        ctx.controls.anesthetic_agent = 0.0;

        for _ in 0..200 {
            engine.tick(&mut ctx);
        }

        assert!((ctx.vitals.heart_rate - 75.0).abs() < 0.5);
        assert!((ctx.vitals.systolic - 120.0).abs() < 0.5);
    }

    #[test]
    fn test_hypoventilation_raises_co2_toward_50() {
        let mut engine = engine();
        let mut ctx = SimContext::default();
        // 300 mL at 10/min is 3.0 L/min, below the 4 L/min branch point.
        ctx.controls.tidal_volume = 300.0;
        ctx.controls.respiratory_rate = 10.0;

        for _ in 0..100 {
            engine.tick(&mut ctx);
            assert!(ctx.vitals.co2 <= 60.0);
        }

        assert!((ctx.vitals.co2 - 50.0).abs() < 0.5);
    }

    #[test]
    fn test_co2_target_bands() {
        assert_eq!(target_co2(3.0), 50.0);
        assert_eq!(target_co2(4.5), 45.0);
        assert_eq!(target_co2(6.0), 38.0);
        assert_eq!(target_co2(8.0), 33.0);
        assert_eq!(target_co2(12.0), 28.0);
    }

    #[test]
    fn test_pressures_follow_volume_and_peep() {
        let mut engine = engine();
        let mut ctx = SimContext::default();
        ctx.controls.tidal_volume = 600.0;
        ctx.controls.peep = 10.0;

        engine.tick(&mut ctx);

        // 600/50 + 10 with zero noise.
        assert!((ctx.vitals.peak_pressure - 22.0).abs() < 1e-9);
        assert!((ctx.vitals.mean_pressure - 22.0 * 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_temperature_drifts_downward() {
        let mut engine = engine();
        let mut ctx = SimContext::default();

        for _ in 0..1800 {
            engine.tick(&mut ctx);
        }

        // One simulated hour in, the target is 36.0 and temperature
        // has relaxed most of the way there.
        assert!(ctx.vitals.temperature < 36.3);
        assert!(ctx.vitals.temperature >= 35.0);
    }

    #[test]
    fn test_agent_concentrations_track_vaporizer() {
        let mut engine = engine();
        let mut ctx = SimContext::default();
        ctx.controls.anesthetic_agent = 4.0;

        for _ in 0..200 {
            engine.tick(&mut ctx);
        }

        assert!((ctx.derived.inspired_agent - 1.2).abs() < 0.01);
        assert!((ctx.derived.expired_agent - 3.4).abs() < 0.01);
    }

    #[test]
    fn test_seeded_noise_is_deterministic() {
        let mut a = Engine::new(Box::new(RngNoise::seeded(42)), 2.0);
        let mut b = Engine::new(Box::new(RngNoise::seeded(42)), 2.0);
        let mut ctx_a = SimContext::default();
        let mut ctx_b = SimContext::default();

        for _ in 0..10 {
            a.tick(&mut ctx_a);
            b.tick(&mut ctx_b);
        }

        assert_eq!(ctx_a.vitals.heart_rate, ctx_b.vitals.heart_rate);
        assert_eq!(ctx_a.vitals.co2, ctx_b.vitals.co2);
        assert_eq!(ctx_a.derived.ie_ratio, ctx_b.derived.ie_ratio);
    }
}
