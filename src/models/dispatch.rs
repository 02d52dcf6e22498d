//! Renewable dispatch models.
//!
//! This module provides [`twine_core::Model`] implementations for time-domain
//! dispatch of an electrolyzer stack against a variable power source, and for
//! integrating a dispatch run into period KPIs. The computational core is in
//! the internal [`core`] module and re-exported here.

mod core;

pub use self::core::{
    DIURNAL_PERIOD_HOURS, DispatchSample, DispatchSeries, KpiSnapshot, PowerProfile,
    ProfileError, REFERENCE_STEP_HOURS, aggregate, dispatch,
};

use std::convert::Infallible;

use twine_core::Model;

use crate::models::electrolysis::StackOutput;

/// Runs a dispatch cycle against a fixed nominal stack operating point.
///
/// Thin adapter over [`dispatch`].
#[derive(Debug, Clone, Copy)]
pub struct DispatchModel {
    nominal: StackOutput,
}

impl DispatchModel {
    /// Constructs the adapter around the nominal stack point dispatch runs
    /// against.
    #[must_use]
    pub fn new(nominal: StackOutput) -> Self {
        Self { nominal }
    }
}

impl Model for DispatchModel {
    type Input = PowerProfile;
    type Output = DispatchSeries;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(dispatch(input, &self.nominal))
    }
}

/// Integrates a dispatch series into one KPI snapshot.
///
/// Thin adapter over [`aggregate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct KpiModel;

impl Model for KpiModel {
    type Input = DispatchSeries;
    type Output = KpiSnapshot;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(aggregate(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{f64::Power, mass::kilogram, power::kilowatt};

    use crate::models::electrolysis::{CurrentDensityRange, Electrolyzer};

    #[test]
    fn adapters_chain_into_the_reference_kpis() {
        let electrolyzer = Electrolyzer::reference();
        let nominal = electrolyzer
            .nominal_operating_point(&CurrentDensityRange::reference())
            .unwrap();
        let profile = PowerProfile::sinusoidal_day(Power::new::<kilowatt>(500.0)).unwrap();

        let series = DispatchModel::new(nominal.stack).call(&profile).unwrap();
        let snapshot = KpiModel.call(&series).unwrap();

        assert_relative_eq!(
            snapshot.daily_hydrogen.get::<kilogram>(),
            3.2473470203,
            epsilon = 1e-6
        );
    }
}
