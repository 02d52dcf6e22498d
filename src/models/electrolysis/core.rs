//! Electrolyzer stack modeling core.
//!
//! A renewable-powered electrolysis stack is modeled as a chain of pure
//! computations: electrochemistry gives the cell voltage, a fixed-point
//! thermal balance gives the steady temperature, Faraday scaling gives the
//! stack figures, and a protective derating law caps the current the stack
//! may actually carry.

mod cell;
mod operating_point;
mod protection;
mod rating;
mod stack;
mod thermal;

pub use cell::{CellParameters, PositiveCurrentDensity, current_density};
pub use operating_point::OperatingPoint;
pub use protection::{ControlThresholds, Derating, DeratingFactor};
pub use rating::{
    CurrentDensityRange, NominalOperatingPoint, RangeError, RatedSample, RatingConfig,
    RatingError,
};
pub use stack::{HYDROGEN_MOLAR_MASS, StackConfiguration, StackOutput};
pub use thermal::{ThermalParameters, ThermalSolverSettings, steady_temperature};

use crate::support::units::CurrentDensity;

/// Entry point for electrolyzer stack queries.
///
/// Bundles the immutable cell, thermal, stack, and protection configuration.
/// Every query reads only its explicit inputs and this configuration and
/// returns a fresh result; nothing is mutated in place.
#[derive(Debug, Clone, Copy)]
pub struct Electrolyzer {
    /// Cell electrochemistry parameters.
    pub cell: CellParameters,

    /// Cooling-loop parameters.
    pub thermal: ThermalParameters,

    /// Fixed-point solver settings.
    pub solver: ThermalSolverSettings,

    /// Stack geometry.
    pub stack: StackConfiguration,

    /// Protection thresholds.
    pub limits: ControlThresholds,
}

impl Electrolyzer {
    /// Constructs an electrolyzer from explicit configuration.
    #[must_use]
    pub fn new(
        cell: CellParameters,
        thermal: ThermalParameters,
        solver: ThermalSolverSettings,
        stack: StackConfiguration,
        limits: ControlThresholds,
    ) -> Self {
        Self {
            cell,
            thermal,
            solver,
            stack,
            limits,
        }
    }

    /// The calibrated reference plant.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            cell: CellParameters::reference(),
            thermal: ThermalParameters::reference(),
            solver: ThermalSolverSettings::default(),
            stack: StackConfiguration::reference(),
            limits: ControlThresholds::reference(),
        }
    }

    /// Resolves the steady operating point at the given current density.
    #[must_use]
    pub fn operating_point(&self, i: PositiveCurrentDensity) -> OperatingPoint {
        let temperature = steady_temperature(&self.cell, &self.thermal, &self.solver, i);
        let voltage = self.cell.voltage(i, temperature);
        let current = *i.as_ref() * self.cell.area;
        let power = voltage * current;
        let heat = current * (voltage - self.cell.reversible_voltage);

        OperatingPoint {
            current_density: *i.as_ref(),
            temperature,
            voltage,
            current,
            power,
            heat,
        }
    }

    /// Applies the protection law to a requested current density.
    ///
    /// The derating factors are evaluated at the operating point the
    /// requested current produces; the thermal balance is not re-solved at
    /// the derated current.
    #[must_use]
    pub fn derate(&self, requested: PositiveCurrentDensity) -> Derating {
        let point = self.operating_point(requested);
        let thermal_factor = self.limits.thermal_factor(point.temperature);
        let voltage_factor = self.limits.voltage_factor(point.voltage);

        let factor = thermal_factor
            .into_inner()
            .min(voltage_factor.into_inner());
        let applied = *requested.as_ref() * factor;

        Derating {
            requested: *requested.as_ref(),
            applied,
            thermal_factor,
            voltage_factor,
            point,
        }
    }

    /// Stack figures at the given operating point's (undemoted) current.
    #[must_use]
    pub fn stack_output(&self, point: &OperatingPoint) -> StackOutput {
        self.stack.scale(&self.cell, point.voltage, point.current)
    }

    /// Applies the protection law across the grid.
    #[must_use]
    pub fn sweep(&self, range: &CurrentDensityRange) -> Vec<RatedSample> {
        rating::sweep(self, range)
    }

    /// Selects the nominal operating point for dispatch.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::NoFeasiblePoint`] if every grid point derates
    /// to zero applied current.
    pub fn nominal_operating_point(
        &self,
        range: &CurrentDensityRange,
    ) -> Result<NominalOperatingPoint, RatingError> {
        rating::nominal_operating_point(self, range)
    }

    /// Locates the thermal feasibility edge within the range by bisection.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::RangeOverheats`] when even the range minimum
    /// reaches the hard limit, or a solver error if bisection fails.
    pub fn thermal_edge(
        &self,
        range: &CurrentDensityRange,
        config: &RatingConfig,
    ) -> Result<CurrentDensity, RatingError> {
        rating::thermal_edge(self, range, config)
    }
}
