//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for all physical quantities on its public APIs
//! (temperature, power, voltage, energy, mass rate). This module provides
//! the extensions modeling electrolyzers needs but [`uom`] doesn't include.
//!
//! ## Electrochemical quantities
//!
//! [`uom`] has no named quantity for electric current density (A/m²) or
//! area-specific resistance (Ω·m²), so both are defined here as `Quantity`
//! type aliases with SI-unit constructors:
//!
//! ```
//! use electrolyzer_models::support::units::amperes_per_square_meter;
//!
//! let i = amperes_per_square_meter(5000.0);
//! assert_eq!(i.value, 5000.0); // `value` is the SI magnitude, A/m²
//! ```
//!
//! ## Temperature differences
//!
//! The [`TemperatureDifference`] trait provides a
//! [`minus`](TemperatureDifference::minus) method for subtracting one
//! absolute temperature from another to get a temperature interval, which
//! [`uom`] does not allow directly.

use uom::{
    si::{
        ISQ, Quantity, SI,
        f64::{Area, ElectricCurrent, ElectricalResistance, TemperatureInterval, ThermodynamicTemperature},
        area::square_meter,
        electric_current::ampere,
        electrical_resistance::ohm,
        temperature_interval::kelvin as delta_kelvin,
        thermodynamic_temperature::kelvin as abs_kelvin,
    },
    typenum::{N2, N3, P1, P4, Z0},
};

/// Electric current density, A/m² in SI.
pub type CurrentDensity = Quantity<ISQ<N2, Z0, Z0, P1, Z0, Z0, Z0>, SI<f64>, f64>;

/// Area-specific resistance, Ω·m² in SI.
pub type ArealResistance = Quantity<ISQ<P4, P1, N3, N2, Z0, Z0, Z0>, SI<f64>, f64>;

/// Constructs a [`CurrentDensity`] from a value in A/m².
#[must_use]
pub fn amperes_per_square_meter(value: f64) -> CurrentDensity {
    ElectricCurrent::new::<ampere>(value) / Area::new::<square_meter>(1.0)
}

/// Constructs an [`ArealResistance`] from a value in Ω·m².
#[must_use]
pub fn ohm_square_meters(value: f64) -> ArealResistance {
    ElectricalResistance::new::<ohm>(value) * Area::new::<square_meter>(1.0)
}

/// Extension trait for computing temperature differences.
///
/// [`uom`] distinguishes absolute temperatures ([`ThermodynamicTemperature`])
/// from temperature differences ([`TemperatureInterval`]) and does not define
/// subtraction between two absolute temperatures. This trait fills that gap.
///
/// [`TemperatureInterval`]: uom::si::f64::TemperatureInterval
/// [`ThermodynamicTemperature`]: uom::si::f64::ThermodynamicTemperature
pub trait TemperatureDifference {
    /// Returns the temperature difference `self - other`.
    fn minus(self, other: Self) -> TemperatureInterval;
}

impl TemperatureDifference for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(
            self.get::<abs_kelvin>() - other.get::<abs_kelvin>(),
        )
    }
}
