//! Protective current derating.
//!
//! The protection law scales a requested current density by the smaller of a
//! thermal factor and a voltage factor, both evaluated at the operating point
//! the *requested* current produces. It deliberately does not re-solve the
//! thermal balance at the derated current; the one-shot approximation is part
//! of the calibrated model.

use uom::si::{
    electric_potential::volt,
    f64::{ElectricPotential, ThermodynamicTemperature},
    thermodynamic_temperature::{degree_celsius, kelvin},
};

use crate::support::{
    constraint::{Constrained, UnitInterval},
    units::CurrentDensity,
};

use super::operating_point::OperatingPoint;

/// A derating factor in `[0, 1]`.
pub type DeratingFactor = Constrained<f64, UnitInterval>;

/// Immutable protection thresholds.
///
/// The soft limit must lie below the hard limit; between them the thermal
/// factor ramps linearly from one to zero.
#[derive(Debug, Clone, Copy)]
pub struct ControlThresholds {
    /// Temperature below which no thermal derating applies.
    pub soft_limit: ThermodynamicTemperature,

    /// Temperature at or above which the applied current is forced to zero.
    pub hard_limit: ThermodynamicTemperature,

    /// Maximum allowed cell voltage.
    pub max_cell_voltage: ElectricPotential,
}

impl ControlThresholds {
    /// The calibrated reference thresholds.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            soft_limit: ThermodynamicTemperature::new::<degree_celsius>(75.0),
            hard_limit: ThermodynamicTemperature::new::<degree_celsius>(80.0),
            max_cell_voltage: ElectricPotential::new::<volt>(2.0),
        }
    }

    /// Thermal derating factor at the given temperature.
    ///
    /// One below the soft limit, zero at or above the hard limit, linear
    /// ramp in between.
    #[must_use]
    pub fn thermal_factor(&self, temperature: ThermodynamicTemperature) -> DeratingFactor {
        let t = temperature.get::<kelvin>();
        let soft = self.soft_limit.get::<kelvin>();
        let hard = self.hard_limit.get::<kelvin>();

        let factor = if t >= hard {
            0.0
        } else if t > soft {
            (hard - t) / (hard - soft)
        } else {
            1.0
        };
        Constrained::new_unchecked(factor)
    }

    /// Voltage derating factor at the given cell voltage.
    ///
    /// One at or below the voltage limit, `V_max/V` above it.
    #[must_use]
    pub fn voltage_factor(&self, voltage: ElectricPotential) -> DeratingFactor {
        let v = voltage.get::<volt>();
        let v_max = self.max_cell_voltage.get::<volt>();

        let factor = if v > v_max { v_max / v } else { 1.0 };
        Constrained::new_unchecked(factor)
    }
}

/// The outcome of applying the protection law to one requested current.
#[derive(Debug, Clone, Copy)]
pub struct Derating {
    /// Requested current density.
    pub requested: CurrentDensity,

    /// Applied current density, `requested · min(f_T, f_V)`. Zero when the
    /// hard temperature limit is reached.
    pub applied: CurrentDensity,

    /// Thermal derating factor `f_T`.
    pub thermal_factor: DeratingFactor,

    /// Voltage derating factor `f_V`.
    pub voltage_factor: DeratingFactor,

    /// Operating point at the *requested* current, which the factors were
    /// evaluated against.
    pub point: OperatingPoint,
}

impl Derating {
    /// The binding factor, `min(f_T, f_V)`.
    #[must_use]
    pub fn factor(&self) -> DeratingFactor {
        let f = self
            .thermal_factor
            .into_inner()
            .min(self.voltage_factor.into_inner());
        Constrained::new_unchecked(f)
    }

    /// Whether any current may be applied at all.
    #[must_use]
    pub fn is_feasible(&self) -> bool {
        self.applied.value > 0.0
    }
}
