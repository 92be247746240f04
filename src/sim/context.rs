//! Simulation state: vitals, operator controls, and derived values.
//!
//! All mutable simulation state is bundled into [`SimContext`] and passed
//! explicitly to the engine each tick. There are no process-wide globals.

/// Current synthesized vital signs.
///
/// Mutated only by the simulation engine; read by the alarm evaluator
/// and the presentation layer.
#[derive(Debug, Clone)]
pub struct VitalsSnapshot {
    /// Heart rate in beats per minute.
    pub heart_rate: f64,
    /// Systolic blood pressure in mmHg.
    pub systolic: f64,
    /// Diastolic blood pressure in mmHg.
    pub diastolic: f64,
    /// Peripheral oxygen saturation in percent.
    pub spo2: f64,
    /// End-tidal CO₂ in mmHg.
    pub co2: f64,
    /// Core temperature in °C.
    pub temperature: f64,
    /// Peak airway pressure in cmH₂O.
    pub peak_pressure: f64,
    /// Mean airway pressure in cmH₂O.
    pub mean_pressure: f64,
}

impl Default for VitalsSnapshot {
    fn default() -> Self {
        Self {
            heart_rate: 95.0,
            systolic: 120.0,
            diastolic: 80.0,
            spo2: 98.0,
            co2: 38.0,
            temperature: 36.5,
            peak_pressure: 18.0,
            mean_pressure: 15.0,
        }
    }
}

impl VitalsSnapshot {
    /// Mean arterial pressure, estimated as (sys + 2·dia) / 3.
    pub fn mean_arterial(&self) -> f64 {
        (self.systolic + 2.0 * self.diastolic) / 3.0
    }
}

/// Operator-set ventilator and anesthetic controls.
///
/// Updated only by input handlers; each value stays within the range
/// declared by its [`ControlSpec`].
#[derive(Debug, Clone)]
pub struct ControlSettings {
    /// Tidal volume in mL.
    pub tidal_volume: f64,
    /// Respiratory rate in breaths per minute.
    pub respiratory_rate: f64,
    /// Positive end-expiratory pressure in cmH₂O.
    pub peep: f64,
    /// Inspired oxygen fraction in percent.
    pub fio2: f64,
    /// Fresh gas flow in L/min.
    pub fresh_gas_flow: f64,
    /// Vaporizer anesthetic agent setting in volume percent.
    pub anesthetic_agent: f64,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            tidal_volume: 500.0,
            respiratory_rate: 12.0,
            peep: 5.0,
            fio2: 40.0,
            fresh_gas_flow: 2.0,
            anesthetic_agent: 2.0,
        }
    }
}

impl ControlSettings {
    /// Normalized depth of anesthesia (MAC proxy, reference potency 2.0).
    pub fn anesthetic_depth(&self) -> f64 {
        self.anesthetic_agent / 2.0
    }

    /// Minute ventilation in L/min.
    pub fn minute_ventilation(&self) -> f64 {
        self.tidal_volume / 1000.0 * self.respiratory_rate
    }

    /// Current value of one control.
    pub fn get(&self, id: ControlId) -> f64 {
        match id {
            ControlId::TidalVolume => self.tidal_volume,
            ControlId::RespiratoryRate => self.respiratory_rate,
            ControlId::Peep => self.peep,
            ControlId::Fio2 => self.fio2,
            ControlId::FreshGasFlow => self.fresh_gas_flow,
            ControlId::AnestheticAgent => self.anesthetic_agent,
        }
    }

    fn set(&mut self, id: ControlId, value: f64) {
        match id {
            ControlId::TidalVolume => self.tidal_volume = value,
            ControlId::RespiratoryRate => self.respiratory_rate = value,
            ControlId::Peep => self.peep = value,
            ControlId::Fio2 => self.fio2 = value,
            ControlId::FreshGasFlow => self.fresh_gas_flow = value,
            ControlId::AnestheticAgent => self.anesthetic_agent = value,
        }
    }

    /// Move one control by `steps` increments of its spec'd step size,
    /// clamped to the spec's range.
    pub fn adjust(&mut self, id: ControlId, steps: f64) {
        let spec = id.spec();
        let value = (self.get(id) + steps * spec.step).clamp(spec.min, spec.max);
        self.set(id, value);
    }

    /// Display label for one control, e.g. "500 mL".
    pub fn format(&self, id: ControlId) -> String {
        let spec = id.spec();
        format!("{:.*} {}", spec.decimals, self.get(id), spec.unit)
    }
}

/// Values derived from controls each tick (agent concentrations, I:E).
#[derive(Debug, Clone)]
pub struct DerivedValues {
    /// Inspired anesthetic agent concentration in volume percent.
    pub inspired_agent: f64,
    /// Expired anesthetic agent concentration in volume percent.
    pub expired_agent: f64,
    /// Expiratory share of the I:E ratio (displayed as "1:X.X").
    pub ie_ratio: f64,
}

impl Default for DerivedValues {
    fn default() -> Self {
        Self {
            inspired_agent: 0.5,
            expired_agent: 1.8,
            ie_ratio: 2.0,
        }
    }
}

/// The complete simulation state passed to every engine operation.
#[derive(Debug, Clone, Default)]
pub struct SimContext {
    pub vitals: VitalsSnapshot,
    pub controls: ControlSettings,
    pub derived: DerivedValues,
    /// Simulated seconds since induction; advances by the tick step.
    pub elapsed_secs: f64,
}

/// Identifies one operator control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlId {
    TidalVolume,
    RespiratoryRate,
    Peep,
    Fio2,
    FreshGasFlow,
    AnestheticAgent,
}

/// All controls in panel order.
pub const CONTROLS: [ControlId; 6] = [
    ControlId::TidalVolume,
    ControlId::RespiratoryRate,
    ControlId::Peep,
    ControlId::Fio2,
    ControlId::FreshGasFlow,
    ControlId::AnestheticAgent,
];

/// Range, step, and display information for one control.
#[derive(Debug, Clone, Copy)]
pub struct ControlSpec {
    pub label: &'static str,
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Decimal places when displaying the value.
    pub decimals: usize,
}

/// Control specs in [`CONTROLS`] order.
const SPECS: [ControlSpec; 6] = [
    ControlSpec {
        label: "Tidal Volume",
        unit: "mL",
        min: 200.0,
        max: 800.0,
        step: 50.0,
        decimals: 0,
    },
    ControlSpec {
        label: "Resp Rate",
        unit: "/min",
        min: 8.0,
        max: 20.0,
        step: 1.0,
        decimals: 0,
    },
    ControlSpec {
        label: "PEEP",
        unit: "cmH₂O",
        min: 0.0,
        max: 15.0,
        step: 1.0,
        decimals: 0,
    },
    ControlSpec {
        label: "FiO₂",
        unit: "%",
        min: 21.0,
        max: 100.0,
        step: 1.0,
        decimals: 0,
    },
    ControlSpec {
        label: "Fresh Gas Flow",
        unit: "L/min",
        min: 0.5,
        max: 8.0,
        step: 0.5,
        decimals: 1,
    },
    ControlSpec {
        label: "Agent",
        unit: "%",
        min: 0.0,
        max: 5.0,
        step: 0.1,
        decimals: 1,
    },
];

impl ControlId {
    /// The static spec for this control.
    pub fn spec(self) -> &'static ControlSpec {
        &SPECS[self as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjust_clamps_to_spec_range() {
        let mut controls = ControlSettings::default();

        controls.adjust(ControlId::TidalVolume, 100.0);
        assert_eq!(controls.tidal_volume, 800.0);

        controls.adjust(ControlId::TidalVolume, -100.0);
        assert_eq!(controls.tidal_volume, 200.0);

        controls.adjust(ControlId::AnestheticAgent, -100.0);
        assert_eq!(controls.anesthetic_agent, 0.0);
    }

    #[test]
    fn test_adjust_moves_by_step() {
        let mut controls = ControlSettings::default();
        controls.adjust(ControlId::Fio2, 1.0);
        assert_eq!(controls.fio2, 41.0);
        controls.adjust(ControlId::FreshGasFlow, 2.0);
        assert!((controls.fresh_gas_flow - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_derived_quantities() {
        let controls = ControlSettings::default();
        assert!((controls.anesthetic_depth() - 1.0).abs() < 1e-9);
        assert!((controls.minute_ventilation() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_format_uses_spec_decimals() {
        let controls = ControlSettings::default();
        assert_eq!(controls.format(ControlId::TidalVolume), "500 mL");
        assert_eq!(controls.format(ControlId::FreshGasFlow), "2.0 L/min");
    }

    #[test]
    fn test_mean_arterial_pressure() {
        let vitals = VitalsSnapshot::default();
        assert!((vitals.mean_arterial() - 93.333).abs() < 0.01);
    }
}
