//! Interactive feasibility assessment over the performance envelope.
//!
//! The envelope model is a deliberately coarse, table-driven view of the
//! plant: it interpolates the precomputed performance envelope and combines
//! it with three interactive constraint factors to produce an instantaneous
//! operating point and the binding-regime classification.

use thiserror::Error;

use crate::support::constraint::{
    Constrained, ConstraintError, NonNegative, StrictlyPositive, UnitInterval,
    UnitIntervalLowerOpen,
};

use super::{
    regime::Regime,
    table::{EnvelopePoint, EnvelopeTable},
};

/// Electrolyzer reference capacity the oversize ratio is defined against, MW.
pub const REFERENCE_CAPACITY_MW: f64 = 10.0;

/// Floor applied to utilization in the effective specific energy ratio.
///
/// Two explorer variants of the reference physics disagree on this constant
/// (0.4 vs 0.5); 0.4 is canonical here. See DESIGN.md.
pub const UTILIZATION_FLOOR: f64 = 0.4;

/// Feasibility factor below which the plant counts as thermally limited.
pub const FEASIBILITY_THRESHOLD: f64 = 0.98;

/// Tunable constants of the envelope model.
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeSettings {
    /// Electrolyzer reference capacity, MW.
    pub reference_capacity_mw: f64,

    /// Utilization floor for the effective specific energy ratio.
    pub utilization_floor: f64,

    /// Feasibility threshold for the thermal regime.
    pub feasibility_threshold: f64,
}

impl Default for EnvelopeSettings {
    fn default() -> Self {
        Self {
            reference_capacity_mw: REFERENCE_CAPACITY_MW,
            utilization_floor: UTILIZATION_FLOOR,
            feasibility_threshold: FEASIBILITY_THRESHOLD,
        }
    }
}

/// The four interactive scalar inputs, read on every recomputation.
#[derive(Debug, Clone, Copy)]
pub struct ExplorerInputs {
    /// Installed renewable capacity over electrolyzer reference capacity.
    pub oversize_ratio: f64,

    /// Installed electrolyzer capacity, MW.
    pub capacity_mw: f64,

    /// Stack sizing factor relative to the reference stack.
    pub stack_sizing: f64,

    /// Cooling adequacy, nominally in `(0, 1]`.
    pub cooling_margin: f64,
}

/// Errors from invalid interactive inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// The oversize ratio was not a number.
    #[error("oversize ratio is invalid")]
    OversizeRatio(#[source] ConstraintError),

    /// The stack sizing factor was zero, negative, or not a number.
    #[error("stack sizing factor is invalid")]
    StackSizing(#[source] ConstraintError),

    /// The cooling margin was zero, negative, or not a number.
    #[error("cooling margin is invalid")]
    CoolingMargin(#[source] ConstraintError),

    /// The capacity was negative or not a number.
    #[error("electrolyzer capacity is invalid")]
    Capacity(#[source] ConstraintError),
}

/// The validated constraint factors derived from the interactive inputs.
///
/// Derived on every query, never persisted.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintState {
    /// `min(1, 1/stack_sizing)`, in `(0, 1]`.
    pub stack_factor: Constrained<f64, UnitIntervalLowerOpen>,

    /// `min(1, cooling_margin)`, in `(0, 1]`.
    pub thermal_factor: Constrained<f64, UnitIntervalLowerOpen>,

    /// `capacity / reference_capacity`, non-negative.
    pub capacity_ratio: Constrained<f64, NonNegative>,
}

impl ConstraintState {
    /// Validates the interactive inputs and derives the constraint factors.
    ///
    /// # Errors
    ///
    /// Returns an [`EnvelopeError`] naming the offending input.
    pub fn new(
        inputs: &ExplorerInputs,
        reference_capacity_mw: f64,
    ) -> Result<Self, EnvelopeError> {
        let stack_sizing =
            StrictlyPositive::new(inputs.stack_sizing).map_err(EnvelopeError::StackSizing)?;
        let stack_factor =
            UnitIntervalLowerOpen::new((1.0 / stack_sizing.into_inner()).min(1.0))
                .map_err(EnvelopeError::StackSizing)?;

        let cooling = StrictlyPositive::new(inputs.cooling_margin)
            .map_err(EnvelopeError::CoolingMargin)?;
        let thermal_factor = UnitIntervalLowerOpen::new(cooling.into_inner().min(1.0))
            .map_err(EnvelopeError::CoolingMargin)?;

        let capacity_ratio = NonNegative::new(inputs.capacity_mw / reference_capacity_mw)
            .map_err(EnvelopeError::Capacity)?;

        Ok(Self {
            stack_factor,
            thermal_factor,
            capacity_ratio,
        })
    }

    /// The combined feasibility factor, `stack · thermal`.
    #[must_use]
    pub fn feasibility_factor(&self) -> Constrained<f64, UnitInterval> {
        self.stack_factor * self.thermal_factor
    }
}

/// The instantaneous operating point the envelope model reports.
#[derive(Debug, Clone, Copy)]
pub struct FeasibilityReport {
    /// Interpolated physics baseline at the queried oversize ratio.
    pub baseline: EnvelopePoint,

    /// Hydrogen output after all constraints, kg/day.
    pub hydrogen_kg_per_day: f64,

    /// Hydrogen the renewable/feasibility path would allow, kg/day.
    pub from_renewable_kg_per_day: f64,

    /// Hydrogen the installed capacity would allow, kg/day.
    pub from_capacity_kg_per_day: f64,

    /// The validated constraint factors the report was computed from.
    pub constraints: ConstraintState,

    /// The binding constraint.
    pub regime: Regime,

    /// `hydrogen / baseline`. `None` when the baseline is zero.
    pub utilization: Option<f64>,

    /// Baseline specific energy inflated by poor utilization, kWh/kg.
    /// `None` when the baseline is zero.
    pub effective_specific_energy_kwh_per_kg: Option<f64>,

    /// Production lost to constraints, percent. `None` when the baseline is
    /// zero.
    pub loss_percent: Option<f64>,
}

/// How much production each constraint family forfeits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LossBreakdown {
    /// Fraction lost to inadequate cooling.
    pub thermal_fraction: f64,

    /// Fraction lost to stack oversizing.
    pub stack_fraction: f64,

    /// Fraction of baseline production not realized.
    pub curtailment_fraction: f64,
}

impl FeasibilityReport {
    /// Attributes production losses to the three constraint families.
    ///
    /// With a zero baseline the curtailment fraction is reported as zero.
    #[must_use]
    pub fn loss_attribution(&self) -> LossBreakdown {
        LossBreakdown {
            thermal_fraction: 1.0 - self.constraints.thermal_factor.into_inner(),
            stack_fraction: 1.0 - self.constraints.stack_factor.into_inner(),
            curtailment_fraction: self.utilization.map_or(0.0, |u| (1.0 - u).max(0.0)),
        }
    }
}

/// One row of the power-constraint series, MW.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerConstraintSample {
    /// Oversize ratio of the underlying table row.
    pub oversize_ratio: f64,

    /// Available renewable power at this ratio.
    pub renewable_mw: f64,

    /// Installed electrolyzer capacity.
    pub capacity_mw: f64,

    /// Power the thermal/stack margin can absorb.
    pub thermal_limit_mw: f64,
}

/// Binding-regime counts across the table's knots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegimeCensus {
    /// Knots limited by renewable supply.
    pub solar: usize,

    /// Knots limited by installed capacity.
    pub capacity: usize,

    /// Knots limited by the thermal/stack margin.
    pub thermal: usize,
}

impl RegimeCensus {
    /// Total number of knots classified.
    #[must_use]
    pub fn total(&self) -> usize {
        self.solar + self.capacity + self.thermal
    }
}

/// The envelope model: a validated table plus the tunable constants.
#[derive(Debug, Clone)]
pub struct FeasibilityEnvelope {
    table: EnvelopeTable,
    settings: EnvelopeSettings,
}

impl FeasibilityEnvelope {
    /// Constructs the model with the default settings.
    #[must_use]
    pub fn new(table: EnvelopeTable) -> Self {
        Self {
            table,
            settings: EnvelopeSettings::default(),
        }
    }

    /// Constructs the model with explicit settings.
    #[must_use]
    pub fn with_settings(table: EnvelopeTable, settings: EnvelopeSettings) -> Self {
        Self { table, settings }
    }

    /// The underlying table.
    #[must_use]
    pub fn table(&self) -> &EnvelopeTable {
        &self.table
    }

    /// Assesses the instantaneous operating point for the given inputs.
    ///
    /// # Errors
    ///
    /// Returns an [`EnvelopeError`] when an interactive input is invalid.
    /// An oversize ratio beyond the table's domain is not an error; it
    /// clamps to the nearest boundary row.
    pub fn assess(&self, inputs: &ExplorerInputs) -> Result<FeasibilityReport, EnvelopeError> {
        if inputs.oversize_ratio.is_nan() {
            return Err(EnvelopeError::OversizeRatio(ConstraintError::NotANumber));
        }
        let constraints = ConstraintState::new(inputs, self.settings.reference_capacity_mw)?;

        let baseline = self.table.interpolate(inputs.oversize_ratio);
        let feasibility = constraints.feasibility_factor().into_inner();

        let from_renewable = baseline.hydrogen_kg_per_day * feasibility;
        let from_capacity =
            baseline.hydrogen_kg_per_day * constraints.capacity_ratio.into_inner();
        let hydrogen = from_renewable.min(from_capacity);

        let regime = Regime::classify(
            from_capacity,
            from_renewable,
            feasibility,
            self.settings.feasibility_threshold,
        );

        let utilization = (baseline.hydrogen_kg_per_day > 0.0)
            .then(|| hydrogen / baseline.hydrogen_kg_per_day);
        let effective_specific_energy_kwh_per_kg = utilization.map(|u| {
            baseline.specific_energy_kwh_per_kg / u.max(self.settings.utilization_floor)
        });
        let loss_percent = utilization.map(|u| (1.0 - u) * 100.0);

        Ok(FeasibilityReport {
            baseline,
            hydrogen_kg_per_day: hydrogen,
            from_renewable_kg_per_day: from_renewable,
            from_capacity_kg_per_day: from_capacity,
            constraints,
            regime,
            utilization,
            effective_specific_energy_kwh_per_kg,
            loss_percent,
        })
    }

    /// The power-constraint series across the table's knots, for the given
    /// inputs.
    #[must_use]
    pub fn power_series(&self, inputs: &ExplorerInputs) -> Vec<PowerConstraintSample> {
        self.table
            .samples()
            .iter()
            .map(|row| PowerConstraintSample {
                oversize_ratio: row.oversize_ratio,
                renewable_mw: row.oversize_ratio * self.settings.reference_capacity_mw,
                capacity_mw: inputs.capacity_mw,
                thermal_limit_mw: inputs.capacity_mw
                    * inputs.stack_sizing
                    * inputs.cooling_margin,
            })
            .collect()
    }

    /// Classifies the binding regime at every table knot under the given
    /// inputs.
    ///
    /// # Errors
    ///
    /// Returns an [`EnvelopeError`] when an interactive input is invalid.
    pub fn regime_census(&self, inputs: &ExplorerInputs) -> Result<RegimeCensus, EnvelopeError> {
        let constraints = ConstraintState::new(inputs, self.settings.reference_capacity_mw)?;
        let feasibility = constraints.feasibility_factor().into_inner();
        let capacity_ratio = constraints.capacity_ratio.into_inner();

        let mut census = RegimeCensus::default();
        for row in self.table.samples() {
            let from_renewable = row.hydrogen_kg_per_day * feasibility;
            let from_capacity = row.hydrogen_kg_per_day * capacity_ratio;
            match Regime::classify(
                from_capacity,
                from_renewable,
                feasibility,
                self.settings.feasibility_threshold,
            ) {
                Regime::SolarLimited => census.solar += 1,
                Regime::CapacityLimited => census.capacity += 1,
                Regime::ThermalLimited => census.thermal += 1,
            }
        }
        Ok(census)
    }
}
