//! Steady-state thermal balance.
//!
//! The steady cell temperature solves `Q_gen(T) = Q_rem(T)`, where generated
//! heat follows from the overpotentials at `T` and removed heat is the lumped
//! conductance times the temperature rise above the coolant. The balance is
//! evaluated by fixed-point relaxation with a fixed iteration budget: the
//! estimate after the final iteration is returned regardless of residual
//! imbalance. This is a calibrated, bounded-cost approximation, not a
//! certified root-find, and the budget and relaxation factor are deliberately
//! part of the model's configuration rather than hidden literals.

use uom::si::{
    f64::{Power, ThermalConductance, ThermodynamicTemperature},
    thermal_conductance::watt_per_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::units::TemperatureDifference;

use super::cell::{CellParameters, PositiveCurrentDensity};

/// Immutable thermal parameters of the cell and its cooling loop.
#[derive(Debug, Clone, Copy)]
pub struct ThermalParameters {
    /// Coolant supply temperature.
    pub coolant_temperature: ThermodynamicTemperature,

    /// Lumped heat-transfer conductance (UA) between cell and coolant.
    pub conductance: ThermalConductance,
}

impl ThermalParameters {
    /// The calibrated reference cooling loop.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            coolant_temperature: ThermodynamicTemperature::new::<kelvin>(298.0),
            conductance: ThermalConductance::new::<watt_per_kelvin>(15.0),
        }
    }
}

/// Settings for the fixed-point steady-temperature solve.
#[derive(Debug, Clone, Copy)]
pub struct ThermalSolverSettings {
    /// Fixed iteration budget.
    pub iterations: usize,

    /// Relaxation factor applied to each temperature update.
    pub relaxation: f64,

    /// Initial temperature estimate.
    pub initial_guess: ThermodynamicTemperature,
}

impl Default for ThermalSolverSettings {
    fn default() -> Self {
        Self {
            iterations: 25,
            relaxation: 0.25,
            initial_guess: ThermodynamicTemperature::new::<kelvin>(333.0),
        }
    }
}

/// Estimates the steady cell temperature at the given current density.
///
/// Each iteration evaluates the cell voltage at the current estimate,
/// computes the heat imbalance, and relaxes the estimate toward balance.
#[must_use]
pub fn steady_temperature(
    cell: &CellParameters,
    thermal: &ThermalParameters,
    settings: &ThermalSolverSettings,
    i: PositiveCurrentDensity,
) -> ThermodynamicTemperature {
    let mut temperature = settings.initial_guess;

    for _ in 0..settings.iterations {
        let voltage = cell.voltage(i, temperature);
        let generated: Power = *i.as_ref() * cell.area * (voltage - cell.reversible_voltage);
        let removed: Power =
            thermal.conductance * temperature.minus(thermal.coolant_temperature);
        temperature = temperature + (generated - removed) / thermal.conductance * settings.relaxation;
    }

    temperature
}
