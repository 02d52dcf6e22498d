//! Renewable power profiles.

use thiserror::Error;
use uom::si::{
    f64::{Power, Time},
    time::hour,
};

/// Length of one diurnal cycle.
pub const DIURNAL_PERIOD_HOURS: f64 = 24.0;

/// Reference sampling step, hours.
pub const REFERENCE_STEP_HOURS: f64 = 0.25;

/// A renewable power availability profile sampled at a fixed time step.
///
/// Samples cover one diurnal cycle with both endpoints included, so the
/// integration period is `step · (samples − 1)`.
#[derive(Debug, Clone)]
pub struct PowerProfile {
    step: Time,
    peak: Power,
    samples: Vec<Power>,
}

/// Errors constructing a [`PowerProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// Fewer than two samples; the rectangle rule needs a nonzero period.
    #[error("a power profile needs at least two samples, got {count}")]
    TooFewSamples {
        /// Number of samples supplied.
        count: usize,
    },

    /// The time step was zero, negative, or not a number.
    #[error("profile time step must be strictly positive")]
    NonPositiveStep,

    /// The peak power was zero, negative, or not a number.
    #[error("profile peak power must be strictly positive")]
    NonPositivePeak,

    /// A sample was negative or not a number.
    #[error("profile sample {index} is negative or not a number")]
    InvalidSample {
        /// Index of the offending sample.
        index: usize,
    },
}

impl PowerProfile {
    /// Constructs a validated profile from explicit samples.
    ///
    /// # Errors
    ///
    /// Returns a [`ProfileError`] if the step or peak is not strictly
    /// positive, fewer than two samples are supplied, or any sample is
    /// negative or not a number.
    pub fn new(step: Time, peak: Power, samples: Vec<Power>) -> Result<Self, ProfileError> {
        if !(step.value > 0.0) {
            return Err(ProfileError::NonPositiveStep);
        }
        if !(peak.value > 0.0) {
            return Err(ProfileError::NonPositivePeak);
        }
        if samples.len() < 2 {
            return Err(ProfileError::TooFewSamples {
                count: samples.len(),
            });
        }
        for (index, sample) in samples.iter().enumerate() {
            if !(sample.value >= 0.0) {
                return Err(ProfileError::InvalidSample { index });
            }
        }
        Ok(Self {
            step,
            peak,
            samples,
        })
    }

    /// The reference sinusoidal day: daytime follows a half sine over the
    /// diurnal period, nighttime is zero, sampled every 15 minutes with both
    /// endpoints included.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::NonPositivePeak`] if `peak` is not strictly
    /// positive.
    pub fn sinusoidal_day(peak: Power) -> Result<Self, ProfileError> {
        if !(peak.value > 0.0) {
            return Err(ProfileError::NonPositivePeak);
        }

        let count = (DIURNAL_PERIOD_HOURS / REFERENCE_STEP_HOURS) as usize + 1;
        let samples = (0..count)
            .map(|k| {
                let t = k as f64 * REFERENCE_STEP_HOURS;
                let shape = (std::f64::consts::PI * t / DIURNAL_PERIOD_HOURS).sin();
                peak * shape.max(0.0)
            })
            .collect();

        Ok(Self {
            step: Time::new::<hour>(REFERENCE_STEP_HOURS),
            peak,
            samples,
        })
    }

    /// The sampling step.
    #[must_use]
    pub fn step(&self) -> Time {
        self.step
    }

    /// The profile's peak power rating.
    #[must_use]
    pub fn peak(&self) -> Power {
        self.peak
    }

    /// Available power samples, in time order.
    #[must_use]
    pub fn samples(&self) -> &[Power] {
        &self.samples
    }

    /// Integration period, `step · (samples − 1)`.
    #[must_use]
    pub fn period(&self) -> Time {
        self.step * (self.samples.len() - 1) as f64
    }
}
