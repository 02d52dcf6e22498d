//! Time-domain dispatch against a renewable power profile.

use uom::si::f64::{MassRate, Power, Time};

use crate::models::electrolysis::StackOutput;

use super::profile::PowerProfile;

/// One dispatch instant.
#[derive(Debug, Clone, Copy)]
pub struct DispatchSample {
    /// Time since the start of the cycle.
    pub time: Time,

    /// Renewable power available.
    pub available: Power,

    /// Power the stack absorbs: the lesser of available power and the
    /// nominal stack power.
    pub absorbed: Power,

    /// Hydrogen production rate reported for this instant.
    pub hydrogen_rate: MassRate,
}

/// A full dispatch run over one cycle.
#[derive(Debug, Clone)]
pub struct DispatchSeries {
    /// Sampling step of the underlying profile.
    pub step: Time,

    /// Peak power rating of the underlying profile.
    pub peak: Power,

    /// Dispatch samples in time order.
    pub samples: Vec<DispatchSample>,
}

impl DispatchSeries {
    /// Integration period, `step · (samples − 1)`.
    #[must_use]
    pub fn period(&self) -> Time {
        self.step * (self.samples.len().saturating_sub(1)) as f64
    }
}

/// Steps through the profile, absorbing what the nominal stack point allows.
///
/// The hydrogen rate written to every sample is the nominal operating
/// point's fixed rate, *not* scaled by curtailment: when available power
/// falls below the nominal stack power the reported production stays at the
/// nominal rate. This asymmetry is carried over from the reference
/// characterization deliberately; a corrected model would scale the rate by
/// the same ratio applied to power.
#[must_use]
pub fn dispatch(profile: &PowerProfile, nominal: &StackOutput) -> DispatchSeries {
    let step = profile.step();
    let samples = profile
        .samples()
        .iter()
        .enumerate()
        .map(|(k, &available)| {
            let absorbed = if available < nominal.power {
                available
            } else {
                nominal.power
            };
            DispatchSample {
                time: step * k as f64,
                available,
                absorbed,
                hydrogen_rate: nominal.hydrogen_rate,
            }
        })
        .collect();

    DispatchSeries {
        step,
        peak: profile.peak(),
        samples,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{power::kilowatt, time::hour};

    use crate::models::electrolysis::{CurrentDensityRange, Electrolyzer};

    fn reference_series() -> DispatchSeries {
        let electrolyzer = Electrolyzer::reference();
        let nominal = electrolyzer
            .nominal_operating_point(&CurrentDensityRange::reference())
            .unwrap();
        let profile = PowerProfile::sinusoidal_day(Power::new::<kilowatt>(500.0)).unwrap();
        dispatch(&profile, &nominal.stack)
    }

    #[test]
    fn absorption_is_capped_by_nominal_stack_power() {
        let series = reference_series();
        assert_eq!(series.samples.len(), 97);

        for sample in &series.samples {
            assert!(sample.absorbed <= sample.available);
            assert!(sample.absorbed.get::<kilowatt>() <= 19.1 + 1e-9);
        }

        // At midnight nothing is available; at noon the stack is the limit.
        assert_relative_eq!(series.samples[0].absorbed.get::<kilowatt>(), 0.0);
        assert_relative_eq!(
            series.samples[48].absorbed.get::<kilowatt>(),
            19.1,
            epsilon = 1e-6
        );
    }

    #[test]
    fn hydrogen_rate_is_the_nominal_rate_at_every_instant() {
        let series = reference_series();
        let first = series.samples[0].hydrogen_rate;
        for sample in &series.samples {
            assert_relative_eq!(sample.hydrogen_rate.value, first.value);
        }
    }

    #[test]
    fn series_period_matches_profile() {
        let series = reference_series();
        assert_relative_eq!(series.period().get::<hour>(), 24.0);
    }
}
