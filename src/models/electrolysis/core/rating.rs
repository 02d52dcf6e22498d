//! Plant rating: derating sweep, nominal operating point, thermal edge.
//!
//! The plant is characterized by sweeping a current-density grid and applying
//! the protection law at every point. The nominal operating point is the
//! sweep sample with the greatest *applied* current density; dispatch runs
//! against its stack power and hydrogen rate.
//!
//! The exact thermal feasibility edge — the requested current density whose
//! steady temperature reaches the hard limit, where the thermal derating
//! factor falls to zero — is located by bisection between the range bounds.

use std::convert::Infallible;

use thiserror::Error;
use twine_core::{EquationProblem, Model};
use twine_solvers::equation::bisection;
use uom::si::{
    f64::TemperatureInterval,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    constraint::{Constrained, ConstraintError, StrictlyPositive},
    units::{CurrentDensity, amperes_per_square_meter},
};

use super::{
    Electrolyzer,
    cell::PositiveCurrentDensity,
    operating_point::OperatingPoint,
    protection::Derating,
    stack::StackOutput,
};

/// A strictly positive, ordered current-density grid.
#[derive(Debug, Clone, Copy)]
pub struct CurrentDensityRange {
    min: CurrentDensity,
    max: CurrentDensity,
    step: CurrentDensity,
}

/// Errors constructing a [`CurrentDensityRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    /// A range bound was zero, negative, or not a number.
    #[error("range bounds must be strictly positive")]
    NonPositiveBound,

    /// The step was zero, negative, or not a number.
    #[error("range step must be strictly positive")]
    NonPositiveStep,

    /// The maximum was below the minimum.
    #[error("range maximum must not be below its minimum")]
    Inverted,
}

impl CurrentDensityRange {
    /// Constructs a validated range.
    ///
    /// # Errors
    ///
    /// Returns a [`RangeError`] if either bound or the step is not strictly
    /// positive, or if the maximum lies below the minimum.
    pub fn new(
        min: CurrentDensity,
        max: CurrentDensity,
        step: CurrentDensity,
    ) -> Result<Self, RangeError> {
        if !(min.value > 0.0) || !(max.value > 0.0) {
            return Err(RangeError::NonPositiveBound);
        }
        if !(step.value > 0.0) {
            return Err(RangeError::NonPositiveStep);
        }
        if max < min {
            return Err(RangeError::Inverted);
        }
        Ok(Self { min, max, step })
    }

    /// The calibrated reference grid: 5000–20000 A/m² in 300 A/m² steps.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            min: amperes_per_square_meter(5000.0),
            max: amperes_per_square_meter(20000.0),
            step: amperes_per_square_meter(300.0),
        }
    }

    /// Lower bound of the range.
    #[must_use]
    pub fn min(&self) -> CurrentDensity {
        self.min
    }

    /// Upper bound of the range.
    #[must_use]
    pub fn max(&self) -> CurrentDensity {
        self.max
    }

    /// Grid values from the minimum to the maximum, inclusive.
    pub fn grid(&self) -> impl Iterator<Item = PositiveCurrentDensity> + use<> {
        let min = self.min.value;
        let max = self.max.value;
        let step = self.step.value;
        let tolerance = step * 1.0e-9;

        (0..)
            .map(move |k| min + step * k as f64)
            .take_while(move |value| *value <= max + tolerance)
            .map(|value| -> PositiveCurrentDensity {
                Constrained::new_unchecked(amperes_per_square_meter(value))
            })
    }
}

/// One sweep sample: the derating outcome and the stack scaling of the
/// undemoted operating point.
#[derive(Debug, Clone, Copy)]
pub struct RatedSample {
    /// Protection-law outcome at the requested current density.
    pub derating: Derating,

    /// Stack figures at the undemoted operating point.
    pub stack: StackOutput,
}

/// The nominal operating point dispatch runs against.
///
/// Stack figures here combine the undemoted point's cell voltage with the
/// *applied* current, matching the reference characterization.
#[derive(Debug, Clone, Copy)]
pub struct NominalOperatingPoint {
    /// The winning sweep sample's derating outcome.
    pub derating: Derating,

    /// Stack voltage, power, and hydrogen rate at the applied current.
    pub stack: StackOutput,
}

/// Errors from rating computations.
#[derive(Debug, Error)]
pub enum RatingError {
    /// Every point in the range derates to zero applied current.
    #[error("no current density in the range yields a nonzero applied current")]
    NoFeasiblePoint,

    /// The steady temperature exceeds the hard limit across the entire range.
    #[error("the steady temperature exceeds the hard limit across the entire range")]
    RangeOverheats,

    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the iteration limit without converging.
    #[error("solver hit iteration limit: residual={residual:?}")]
    MaxIters {
        /// Best temperature residual achieved.
        residual: TemperatureInterval,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}

/// Solver configuration for locating the thermal edge.
#[derive(Debug, Clone, Copy)]
pub struct RatingConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance for the current-density search variable.
    pub current_tol: CurrentDensity,

    /// Absolute tolerance for the temperature residual.
    pub temperature_tol: TemperatureInterval,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            current_tol: amperes_per_square_meter(1.0e-6),
            temperature_tol: TemperatureInterval::new::<delta_kelvin>(1.0e-9),
        }
    }
}

impl RatingConfig {
    /// Converts this configuration into a bisection solver configuration.
    fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.current_tol.value,
            x_rel_tol: 0.0,
            residual_tol: self.temperature_tol.get::<delta_kelvin>(),
        }
    }
}

/// Applies the protection law across the grid.
pub(super) fn sweep(
    electrolyzer: &Electrolyzer,
    range: &CurrentDensityRange,
) -> Vec<RatedSample> {
    range
        .grid()
        .map(|requested| {
            let derating = electrolyzer.derate(requested);
            let stack = electrolyzer.stack.scale(
                &electrolyzer.cell,
                derating.point.voltage,
                derating.point.current,
            );
            RatedSample { derating, stack }
        })
        .collect()
}

/// Selects the sweep sample with the greatest applied current density.
///
/// # Errors
///
/// Returns [`RatingError::NoFeasiblePoint`] if every sample derates to zero.
pub(super) fn nominal_operating_point(
    electrolyzer: &Electrolyzer,
    range: &CurrentDensityRange,
) -> Result<NominalOperatingPoint, RatingError> {
    let best = sweep(electrolyzer, range)
        .into_iter()
        .max_by(|a, b| a.derating.applied.value.total_cmp(&b.derating.applied.value))
        .ok_or(RatingError::NoFeasiblePoint)?;

    if !best.derating.is_feasible() {
        return Err(RatingError::NoFeasiblePoint);
    }

    let applied_current = best.derating.applied * electrolyzer.cell.area;
    let stack = electrolyzer.stack.scale(
        &electrolyzer.cell,
        best.derating.point.voltage,
        applied_current,
    );

    Ok(NominalOperatingPoint {
        derating: best.derating,
        stack,
    })
}

/// Model adapter exposing the requested current density as the sole input.
struct ThermalEdgeModel<'a> {
    electrolyzer: &'a Electrolyzer,
}

impl Model for ThermalEdgeModel<'_> {
    type Input = PositiveCurrentDensity;
    type Output = OperatingPoint;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(self.electrolyzer.operating_point(*input))
    }
}

/// Equation problem whose residual is the steady temperature's excess over
/// the hard limit.
struct ThermalEdgeProblem {
    hard_limit_kelvin: f64,
}

impl EquationProblem<1> for ThermalEdgeProblem {
    type Input = PositiveCurrentDensity;
    type Output = OperatingPoint;
    type Error = ConstraintError;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        StrictlyPositive::new(amperes_per_square_meter(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.temperature.get::<kelvin>() - self.hard_limit_kelvin])
    }
}

/// Locates the thermal feasibility edge within the range.
///
/// Returns the range maximum unchanged when the whole range stays below the
/// hard limit.
///
/// # Errors
///
/// Returns [`RatingError::RangeOverheats`] when even the range minimum
/// reaches the hard limit, or a solver error if bisection fails to converge.
pub(super) fn thermal_edge(
    electrolyzer: &Electrolyzer,
    range: &CurrentDensityRange,
    config: &RatingConfig,
) -> Result<CurrentDensity, RatingError> {
    let hard_limit = electrolyzer.limits.hard_limit;

    let at_min =
        electrolyzer.operating_point(Constrained::new_unchecked(range.min()));
    let at_max =
        electrolyzer.operating_point(Constrained::new_unchecked(range.max()));

    if at_max.temperature < hard_limit {
        return Ok(range.max());
    }
    if at_min.temperature >= hard_limit {
        return Err(RatingError::RangeOverheats);
    }

    let model = ThermalEdgeModel { electrolyzer };
    let problem = ThermalEdgeProblem {
        hard_limit_kelvin: hard_limit.get::<kelvin>(),
    };

    let solution = bisection::solve(
        &model,
        &problem,
        [range.min().value, range.max().value],
        &config.bisection(),
        |event: &bisection::Event<'_, _, _>| {
            // The model is infallible; a failed evaluation would mean the
            // candidate lies outside the feasible region.
            if event.result().is_err() {
                return Some(bisection::Action::assume_positive());
            }
            None
        },
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(RatingError::MaxIters {
            residual: TemperatureInterval::new::<delta_kelvin>(solution.residual),
            iters: solution.iters,
        });
    }

    Ok(solution.snapshot.output.current_density)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::power::watt;

    #[test]
    fn reference_grid_is_inclusive() {
        let grid: Vec<_> = CurrentDensityRange::reference().grid().collect();
        assert_eq!(grid.len(), 51);
        assert_relative_eq!(grid[0].as_ref().value, 5000.0);
        assert_relative_eq!(grid[50].as_ref().value, 20000.0);
    }

    #[test]
    fn range_validation() {
        let a = amperes_per_square_meter(100.0);
        let b = amperes_per_square_meter(200.0);
        let step = amperes_per_square_meter(10.0);
        let zero = amperes_per_square_meter(0.0);

        assert!(CurrentDensityRange::new(a, b, step).is_ok());
        assert!(matches!(
            CurrentDensityRange::new(zero, b, step),
            Err(RangeError::NonPositiveBound)
        ));
        assert!(matches!(
            CurrentDensityRange::new(a, b, zero),
            Err(RangeError::NonPositiveStep)
        ));
        assert!(matches!(
            CurrentDensityRange::new(b, a, step),
            Err(RangeError::Inverted)
        ));
    }

    #[test]
    fn nominal_point_matches_reference_characterization() {
        let electrolyzer = Electrolyzer::reference();
        let nominal =
            nominal_operating_point(&electrolyzer, &CurrentDensityRange::reference())
                .expect("reference plant has a feasible nominal point");

        assert_relative_eq!(nominal.derating.requested.value, 19100.0);
        assert_relative_eq!(
            nominal.derating.applied.value,
            7121.0448657545,
            epsilon = 1e-4
        );
        assert_relative_eq!(nominal.stack.power.get::<watt>(), 19100.0, epsilon = 1e-3);
        assert_relative_eq!(
            nominal.stack.hydrogen_kg_per_hour(),
            0.133911217334,
            epsilon = 1e-8
        );
    }

    #[test]
    fn thermal_edge_lies_between_last_feasible_grid_points() {
        let electrolyzer = Electrolyzer::reference();
        let edge = thermal_edge(
            &electrolyzer,
            &CurrentDensityRange::reference(),
            &RatingConfig::default(),
        )
        .expect("reference range brackets the hard limit");

        assert_relative_eq!(edge.value, 19634.162422, epsilon = 1e-2);
    }

    #[test]
    fn cool_plant_reports_range_maximum_as_edge() {
        // A tiny range never comes close to the hard limit.
        let electrolyzer = Electrolyzer::reference();
        let range = CurrentDensityRange::new(
            amperes_per_square_meter(1000.0),
            amperes_per_square_meter(2000.0),
            amperes_per_square_meter(100.0),
        )
        .unwrap();

        let edge = thermal_edge(&electrolyzer, &range, &RatingConfig::default()).unwrap();
        assert_relative_eq!(edge.value, 2000.0);
    }
}
