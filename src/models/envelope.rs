//! Feasibility envelope models.
//!
//! This module provides the [`twine_core::Model`] implementation for the
//! interactive feasibility/envelope query. The computational core is in the
//! internal [`core`] module and re-exported here.

mod core;

pub use self::core::{
    ConstraintState, EnvelopeError, EnvelopePoint, EnvelopeSample, EnvelopeSettings,
    EnvelopeTable, ExplorerInputs, FEASIBILITY_THRESHOLD, FeasibilityEnvelope,
    FeasibilityReport, LossBreakdown, PowerConstraintSample, REFERENCE_CAPACITY_MW, Regime,
    RegimeCensus, TableError, UTILIZATION_FLOOR,
};

use twine_core::Model;

/// Assesses the instantaneous operating point for interactive inputs.
///
/// Thin adapter over [`FeasibilityEnvelope::assess`].
#[derive(Debug, Clone)]
pub struct FeasibilityModel {
    envelope: FeasibilityEnvelope,
}

impl FeasibilityModel {
    /// Constructs the adapter around an envelope model.
    #[must_use]
    pub fn new(envelope: FeasibilityEnvelope) -> Self {
        Self { envelope }
    }

    /// The wrapped envelope model.
    #[must_use]
    pub fn envelope(&self) -> &FeasibilityEnvelope {
        &self.envelope
    }
}

impl Model for FeasibilityModel {
    type Input = ExplorerInputs;
    type Output = FeasibilityReport;
    type Error = EnvelopeError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.envelope.assess(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn adapter_delegates_to_the_envelope() {
        let table = EnvelopeTable::new(vec![
            EnvelopeSample {
                oversize_ratio: 0.5,
                hydrogen_kg_per_day: 1.0,
                specific_energy_kwh_per_kg: 55.0,
            },
            EnvelopeSample {
                oversize_ratio: 1.0,
                hydrogen_kg_per_day: 2.5,
                specific_energy_kwh_per_kg: 50.0,
            },
        ])
        .unwrap();
        let model = FeasibilityModel::new(FeasibilityEnvelope::new(table));

        let report = model
            .call(&ExplorerInputs {
                oversize_ratio: 0.75,
                capacity_mw: 10.0,
                stack_sizing: 1.0,
                cooling_margin: 1.0,
            })
            .unwrap();

        assert_relative_eq!(report.hydrogen_kg_per_day, 1.75, epsilon = 1e-12);
        assert_eq!(report.regime, Regime::SolarLimited);

        let invalid = model.call(&ExplorerInputs {
            oversize_ratio: 0.75,
            capacity_mw: 10.0,
            stack_sizing: -1.0,
            cooling_margin: 1.0,
        });
        assert!(invalid.is_err());
    }
}
