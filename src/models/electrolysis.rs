//! Electrolyzer stack models.
//!
//! This module provides [`twine_core::Model`] implementations for the
//! electrolyzer's cell-level query surface. The computational core is in the
//! internal [`core`] module and re-exported here.

mod core;

pub use self::core::{
    CellParameters, ControlThresholds, CurrentDensityRange, Derating, DeratingFactor,
    Electrolyzer, HYDROGEN_MOLAR_MASS, NominalOperatingPoint, OperatingPoint,
    PositiveCurrentDensity, RangeError, RatedSample, RatingConfig, RatingError,
    StackConfiguration, StackOutput, ThermalParameters, ThermalSolverSettings,
    current_density, steady_temperature,
};

use std::convert::Infallible;

use twine_core::Model;

/// Resolves the steady operating point for a validated current density.
///
/// Thin adapter over [`Electrolyzer::operating_point`]. Input validation
/// happens at [`PositiveCurrentDensity`] construction, so the model itself
/// is infallible.
#[derive(Debug, Clone, Copy)]
pub struct OperatingPointModel {
    electrolyzer: Electrolyzer,
}

impl OperatingPointModel {
    /// Constructs the adapter around an electrolyzer configuration.
    #[must_use]
    pub fn new(electrolyzer: Electrolyzer) -> Self {
        Self { electrolyzer }
    }
}

impl Model for OperatingPointModel {
    type Input = PositiveCurrentDensity;
    type Output = OperatingPoint;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(self.electrolyzer.operating_point(*input))
    }
}

/// Applies the protection law to a validated requested current density.
///
/// Thin adapter over [`Electrolyzer::derate`].
#[derive(Debug, Clone, Copy)]
pub struct AppliedCurrentModel {
    electrolyzer: Electrolyzer,
}

impl AppliedCurrentModel {
    /// Constructs the adapter around an electrolyzer configuration.
    #[must_use]
    pub fn new(electrolyzer: Electrolyzer) -> Self {
        Self { electrolyzer }
    }
}

impl Model for AppliedCurrentModel {
    type Input = PositiveCurrentDensity;
    type Output = Derating;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(self.electrolyzer.derate(*input))
    }
}
