//! The resolved state of a cell at one current density.

use uom::si::f64::{ElectricCurrent, ElectricPotential, Power, ThermodynamicTemperature};

use crate::support::units::CurrentDensity;

/// A cell's steady operating state at one current density.
///
/// Recomputed from scratch on every query; carries no identity across calls.
/// The temperature is the fixed-budget solver estimate, not a certified
/// physical fixed point.
#[derive(Debug, Clone, Copy)]
pub struct OperatingPoint {
    /// Current density the point was solved at.
    pub current_density: CurrentDensity,

    /// Steady cell temperature estimate.
    pub temperature: ThermodynamicTemperature,

    /// Cell terminal voltage.
    pub voltage: ElectricPotential,

    /// Cell current through the active area.
    pub current: ElectricCurrent,

    /// Cell electrical power.
    pub power: Power,

    /// Heat generated by the overpotentials.
    pub heat: Power,
}
