//! Period KPIs from a dispatch run.

use uom::{
    ConstZero,
    si::f64::{AvailableEnergy, Energy, Mass, Ratio},
};

use super::simulate::DispatchSeries;

/// Period-level performance indicators for one full dispatch integration.
///
/// Ratios with a potentially zero denominator are reported as `None` rather
/// than a division fault: specific energy when nothing was produced,
/// renewable utilization when no solar energy was available.
#[derive(Debug, Clone, Copy)]
pub struct KpiSnapshot {
    /// Hydrogen produced over the period.
    pub daily_hydrogen: Mass,

    /// Energy used per unit of hydrogen produced. `None` when no hydrogen
    /// was produced.
    pub specific_energy: Option<AvailableEnergy>,

    /// Used energy over the theoretical maximum `peak · period`.
    pub capacity_factor: Ratio,

    /// Used energy over available renewable energy. `None` when no
    /// renewable energy was available.
    pub renewable_utilization: Option<Ratio>,
}

/// Integrates a dispatch series with the rectangle rule.
///
/// The step width comes from the series itself; one snapshot summarizes the
/// whole period, and no partial or incremental KPI is defined.
#[must_use]
pub fn aggregate(series: &DispatchSeries) -> KpiSnapshot {
    let dt = series.step;

    let mut used = Energy::ZERO;
    let mut solar = Energy::ZERO;
    let mut hydrogen = Mass::ZERO;

    for sample in &series.samples {
        used += sample.absorbed * dt;
        solar += sample.available * dt;
        hydrogen += sample.hydrogen_rate * dt;
    }

    let specific_energy = (hydrogen > Mass::ZERO).then(|| used / hydrogen);
    let renewable_utilization = (solar > Energy::ZERO).then(|| used / solar);
    let capacity_factor = used / (series.peak * series.period());

    KpiSnapshot {
        daily_hydrogen: hydrogen,
        specific_energy,
        capacity_factor,
        renewable_utilization,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        available_energy::joule_per_kilogram, energy::kilowatt_hour, mass::kilogram,
        power::kilowatt, ratio::ratio, time::hour,
    };
    use uom::si::f64::{MassRate, Power, Time};

    use crate::models::dispatch::core::profile::PowerProfile;
    use crate::models::dispatch::core::simulate::{DispatchSample, dispatch};
    use crate::models::electrolysis::{CurrentDensityRange, Electrolyzer};

    const JOULES_PER_KILOWATT_HOUR: f64 = 3.6e6;

    #[test]
    fn reference_day_kpis() {
        let electrolyzer = Electrolyzer::reference();
        let nominal = electrolyzer
            .nominal_operating_point(&CurrentDensityRange::reference())
            .unwrap();
        let profile = PowerProfile::sinusoidal_day(Power::new::<kilowatt>(500.0)).unwrap();
        let snapshot = aggregate(&dispatch(&profile, &nominal.stack));

        assert_relative_eq!(
            snapshot.daily_hydrogen.get::<kilogram>(),
            3.2473470203,
            epsilon = 1e-6
        );
        let specific = snapshot.specific_energy.unwrap();
        assert_relative_eq!(
            specific.get::<joule_per_kilogram>() / JOULES_PER_KILOWATT_HOUR,
            139.2689995473,
            epsilon = 1e-5
        );
        assert_relative_eq!(
            snapshot.capacity_factor.get::<ratio>(),
            0.0376878976,
            epsilon = 1e-8
        );
        assert_relative_eq!(
            snapshot.renewable_utilization.unwrap().get::<ratio>(),
            0.0592052948,
            epsilon = 1e-8
        );
    }

    #[test]
    fn used_energy_never_exceeds_solar_energy() {
        let electrolyzer = Electrolyzer::reference();
        let nominal = electrolyzer
            .nominal_operating_point(&CurrentDensityRange::reference())
            .unwrap();

        for peak_kw in [5.0, 50.0, 500.0] {
            let profile =
                PowerProfile::sinusoidal_day(Power::new::<kilowatt>(peak_kw)).unwrap();
            let series = dispatch(&profile, &nominal.stack);

            let mut used = Energy::ZERO;
            let mut solar = Energy::ZERO;
            for sample in &series.samples {
                used += sample.absorbed * series.step;
                solar += sample.available * series.step;
            }
            assert!(used <= solar);

            let snapshot = aggregate(&series);
            assert!(snapshot.renewable_utilization.unwrap().get::<ratio>() <= 1.0);
        }
    }

    #[test]
    fn zero_production_reports_no_specific_energy() {
        let step = Time::new::<hour>(1.0);
        let peak = Power::new::<kilowatt>(100.0);
        let samples = (0..5)
            .map(|k| DispatchSample {
                time: step * f64::from(k),
                available: Power::new::<kilowatt>(50.0),
                absorbed: Power::new::<kilowatt>(25.0),
                hydrogen_rate: MassRate::ZERO,
            })
            .collect();
        let series = DispatchSeries {
            step,
            peak,
            samples,
        };

        let snapshot = aggregate(&series);
        assert!(snapshot.specific_energy.is_none());
        assert_relative_eq!(snapshot.daily_hydrogen.get::<kilogram>(), 0.0);
        // Power and energy KPIs are still well-defined.
        assert_relative_eq!(
            snapshot.capacity_factor.get::<ratio>(),
            25.0 * 5.0 / (100.0 * 4.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn dark_profile_reports_no_renewable_utilization() {
        let step = Time::new::<hour>(0.5);
        let samples = (0..4)
            .map(|k| DispatchSample {
                time: step * f64::from(k),
                available: Power::ZERO,
                absorbed: Power::ZERO,
                hydrogen_rate: MassRate::ZERO,
            })
            .collect();
        let series = DispatchSeries {
            step,
            peak: Power::new::<kilowatt>(500.0),
            samples,
        };

        let snapshot = aggregate(&series);
        assert!(snapshot.renewable_utilization.is_none());
        assert!(snapshot.specific_energy.is_none());
        assert_relative_eq!(snapshot.capacity_factor.get::<ratio>(), 0.0);
    }

    #[test]
    fn snapshot_integrates_kilowatt_hours_exactly() {
        // Two hours at a constant 10 kW absorbed from 40 kW available.
        let step = Time::new::<hour>(1.0);
        let samples = (0..3)
            .map(|k| DispatchSample {
                time: step * f64::from(k),
                available: Power::new::<kilowatt>(40.0),
                absorbed: Power::new::<kilowatt>(10.0),
                hydrogen_rate: MassRate::new::<uom::si::mass_rate::kilogram_per_second>(
                    1.0 / 3600.0,
                ),
            })
            .collect();
        let series = DispatchSeries {
            step,
            peak: Power::new::<kilowatt>(40.0),
            samples,
        };

        let snapshot = aggregate(&series);
        // 3 samples × 1 h × 1 kg/h.
        assert_relative_eq!(snapshot.daily_hydrogen.get::<kilogram>(), 3.0, epsilon = 1e-12);
        let specific = snapshot.specific_energy.unwrap();
        // 30 kWh / 3 kg.
        assert_relative_eq!(
            specific.get::<joule_per_kilogram>() / JOULES_PER_KILOWATT_HOUR,
            10.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            snapshot.capacity_factor.get::<ratio>(),
            30.0 / 80.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            snapshot.renewable_utilization.unwrap().get::<ratio>(),
            0.25,
            epsilon = 1e-12
        );
    }

    #[test]
    fn kilowatt_hour_bookkeeping_matches_uom() {
        // Sanity anchor for the unit conversions used above.
        let e = Power::new::<kilowatt>(1.0) * Time::new::<hour>(1.0);
        assert_relative_eq!(e.get::<kilowatt_hour>(), 1.0, epsilon = 1e-12);
    }
}
