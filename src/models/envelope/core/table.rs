//! The precomputed performance envelope table.

use thiserror::Error;

/// One row of the performance envelope: the physics-baseline hydrogen output
/// and specific energy at a given renewable oversize ratio.
///
/// Values are external baseline data; the envelope model interpolates them
/// and never recomputes them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeSample {
    /// Installed renewable capacity over electrolyzer reference capacity.
    pub oversize_ratio: f64,

    /// Baseline hydrogen production, kg/day.
    pub hydrogen_kg_per_day: f64,

    /// Baseline specific energy, kWh/kg.
    pub specific_energy_kwh_per_kg: f64,
}

/// An interpolated point on the envelope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopePoint {
    /// Interpolated hydrogen production, kg/day.
    pub hydrogen_kg_per_day: f64,

    /// Interpolated specific energy, kWh/kg.
    pub specific_energy_kwh_per_kg: f64,
}

/// Errors validating an envelope table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    /// Interpolation needs at least two rows.
    #[error("an envelope table needs at least two samples, got {count}")]
    TooFewSamples {
        /// Number of rows supplied.
        count: usize,
    },

    /// Oversize ratios must be strictly ascending.
    #[error("envelope samples must be strictly ascending by oversize ratio (row {index})")]
    NonAscending {
        /// Index of the first out-of-order row.
        index: usize,
    },

    /// A row contained a non-finite value.
    #[error("envelope sample {index} contains a non-finite value")]
    NonFinite {
        /// Index of the offending row.
        index: usize,
    },
}

/// A validated performance envelope, strictly ascending by oversize ratio.
///
/// Loaded once from external data before any feasibility query is served and
/// treated as read-only for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct EnvelopeTable {
    samples: Vec<EnvelopeSample>,
}

impl EnvelopeTable {
    /// Constructs a validated table.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] if fewer than two rows are supplied, any
    /// value is non-finite, or the oversize ratios are not strictly
    /// ascending.
    pub fn new(samples: Vec<EnvelopeSample>) -> Result<Self, TableError> {
        if samples.len() < 2 {
            return Err(TableError::TooFewSamples {
                count: samples.len(),
            });
        }
        for (index, sample) in samples.iter().enumerate() {
            if !sample.oversize_ratio.is_finite()
                || !sample.hydrogen_kg_per_day.is_finite()
                || !sample.specific_energy_kwh_per_kg.is_finite()
            {
                return Err(TableError::NonFinite { index });
            }
        }
        for (index, pair) in samples.windows(2).enumerate() {
            if pair[1].oversize_ratio <= pair[0].oversize_ratio {
                return Err(TableError::NonAscending { index: index + 1 });
            }
        }
        Ok(Self { samples })
    }

    /// The validated rows, in ascending ratio order.
    #[must_use]
    pub fn samples(&self) -> &[EnvelopeSample] {
        &self.samples
    }

    /// Linearly interpolates the envelope at the given oversize ratio.
    ///
    /// Queries beyond the covered domain clamp to the nearest boundary row;
    /// no extrapolation is performed.
    #[must_use]
    pub fn interpolate(&self, oversize_ratio: f64) -> EnvelopePoint {
        let first = self.samples[0];
        let last = self.samples[self.samples.len() - 1];

        if oversize_ratio <= first.oversize_ratio {
            return point(first);
        }
        if oversize_ratio >= last.oversize_ratio {
            return point(last);
        }

        for pair in self.samples.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if oversize_ratio <= b.oversize_ratio {
                let w = (oversize_ratio - a.oversize_ratio)
                    / (b.oversize_ratio - a.oversize_ratio);
                return EnvelopePoint {
                    hydrogen_kg_per_day: a.hydrogen_kg_per_day
                        + w * (b.hydrogen_kg_per_day - a.hydrogen_kg_per_day),
                    specific_energy_kwh_per_kg: a.specific_energy_kwh_per_kg
                        + w * (b.specific_energy_kwh_per_kg - a.specific_energy_kwh_per_kg),
                };
            }
        }

        // Only reachable for non-finite queries; treat them like high ones.
        point(last)
    }
}

fn point(sample: EnvelopeSample) -> EnvelopePoint {
    EnvelopePoint {
        hydrogen_kg_per_day: sample.hydrogen_kg_per_day,
        specific_energy_kwh_per_kg: sample.specific_energy_kwh_per_kg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn sample(ratio: f64, h2: f64, kwh: f64) -> EnvelopeSample {
        EnvelopeSample {
            oversize_ratio: ratio,
            hydrogen_kg_per_day: h2,
            specific_energy_kwh_per_kg: kwh,
        }
    }

    fn reference_table() -> EnvelopeTable {
        EnvelopeTable::new(vec![
            sample(0.5, 1.0, 55.0),
            sample(1.0, 2.5, 50.0),
            sample(1.5, 3.0, 48.0),
        ])
        .unwrap()
    }

    #[test]
    fn validation_rejects_degenerate_tables() {
        assert_eq!(
            EnvelopeTable::new(vec![]).unwrap_err(),
            TableError::TooFewSamples { count: 0 }
        );
        assert_eq!(
            EnvelopeTable::new(vec![sample(1.0, 2.5, 50.0)]).unwrap_err(),
            TableError::TooFewSamples { count: 1 }
        );
        assert_eq!(
            EnvelopeTable::new(vec![sample(1.0, 2.5, 50.0), sample(1.0, 3.0, 48.0)])
                .unwrap_err(),
            TableError::NonAscending { index: 1 }
        );
        assert_eq!(
            EnvelopeTable::new(vec![sample(1.0, f64::NAN, 50.0), sample(1.5, 3.0, 48.0)])
                .unwrap_err(),
            TableError::NonFinite { index: 0 }
        );
    }

    #[test]
    fn interpolates_between_brackets() {
        let table = reference_table();
        let mid = table.interpolate(0.75);

        assert_relative_eq!(mid.hydrogen_kg_per_day, 1.75, epsilon = 1e-12);
        assert_relative_eq!(mid.specific_energy_kwh_per_kg, 52.5, epsilon = 1e-12);
    }

    #[test]
    fn round_trips_exactly_at_the_knots() {
        let table = reference_table();
        for row in table.samples() {
            let at_knot = table.interpolate(row.oversize_ratio);
            assert_relative_eq!(at_knot.hydrogen_kg_per_day, row.hydrogen_kg_per_day);
            assert_relative_eq!(
                at_knot.specific_energy_kwh_per_kg,
                row.specific_energy_kwh_per_kg
            );
        }
    }

    #[test]
    fn clamps_to_boundary_rows() {
        let table = reference_table();

        let high = table.interpolate(5.0);
        assert_relative_eq!(high.hydrogen_kg_per_day, 3.0);
        assert_relative_eq!(high.specific_energy_kwh_per_kg, 48.0);

        let low = table.interpolate(0.1);
        assert_relative_eq!(low.hydrogen_kg_per_day, 1.0);
        assert_relative_eq!(low.specific_energy_kwh_per_kg, 55.0);
    }
}
