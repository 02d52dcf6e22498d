//! Cell-level electrochemistry.
//!
//! The cell voltage is the reversible voltage plus two overpotentials:
//!
//! - activation (reaction kinetics): `(R·T)/(α·n·F) · ln(i/i₀)`
//! - ohmic (resistive): `i · ASR_ref · (T_ref/T)`
//!
//! Resistance falls as the cell warms, scaled linearly from the reference
//! temperature. Voltage is strictly increasing in current density at fixed
//! temperature.

use uom::si::{
    area::square_meter,
    electric_potential::volt,
    f64::{Area, ElectricPotential, ThermodynamicTemperature},
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    constraint::{Constrained, ConstraintResult, StrictlyPositive},
    units::{ArealResistance, CurrentDensity, amperes_per_square_meter, ohm_square_meters},
};

/// A current density validated to be strictly positive.
///
/// The activation overpotential contains `ln(i/i₀)`, so zero and negative
/// current densities are undefined inputs. They are rejected here, at the
/// boundary, rather than coerced inside the model.
pub type PositiveCurrentDensity = Constrained<CurrentDensity, StrictlyPositive>;

/// Constructs a [`PositiveCurrentDensity`] from a value in A/m².
///
/// # Errors
///
/// Returns a [`ConstraintError`](crate::support::constraint::ConstraintError)
/// if the value is zero, negative, or not a number.
pub fn current_density(amperes_per_sq_meter: f64) -> ConstraintResult<PositiveCurrentDensity> {
    StrictlyPositive::new(amperes_per_square_meter(amperes_per_sq_meter))
}

/// Immutable electrochemical parameters of a single cell.
#[derive(Debug, Clone, Copy)]
pub struct CellParameters {
    /// Faraday constant, C/mol.
    pub faraday: f64,

    /// Molar gas constant, J/(mol·K).
    pub gas_constant: f64,

    /// Electrons transferred per hydrogen molecule produced.
    pub electrons: u32,

    /// Active electrode area.
    pub area: Area,

    /// Reversible (open-circuit) voltage.
    pub reversible_voltage: ElectricPotential,

    /// Exchange current density.
    pub exchange_current_density: CurrentDensity,

    /// Charge-transfer coefficient.
    pub charge_transfer_coefficient: f64,

    /// Area-specific resistance at the reference temperature.
    pub reference_asr: ArealResistance,

    /// Temperature at which [`reference_asr`](Self::reference_asr) was measured.
    pub reference_temperature: ThermodynamicTemperature,
}

impl CellParameters {
    /// The calibrated reference cell.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            faraday: 96485.0,
            gas_constant: 8.314,
            electrons: 2,
            area: Area::new::<square_meter>(0.01),
            reversible_voltage: ElectricPotential::new::<volt>(1.23),
            exchange_current_density: amperes_per_square_meter(1.0e-3),
            charge_transfer_coefficient: 0.5,
            reference_asr: ohm_square_meters(2.0e-4),
            reference_temperature: ThermodynamicTemperature::new::<kelvin>(333.0),
        }
    }

    /// Activation overpotential at the given current density and temperature.
    #[must_use]
    pub fn activation_overpotential(
        &self,
        i: PositiveCurrentDensity,
        temperature: ThermodynamicTemperature,
    ) -> ElectricPotential {
        let thermal_voltage = self.gas_constant * temperature.get::<kelvin>()
            / (self.charge_transfer_coefficient * f64::from(self.electrons) * self.faraday);
        let ratio = i.as_ref().value / self.exchange_current_density.value;
        ElectricPotential::new::<volt>(thermal_voltage * ratio.ln())
    }

    /// Ohmic overpotential at the given current density and temperature.
    #[must_use]
    pub fn ohmic_overpotential(
        &self,
        i: PositiveCurrentDensity,
        temperature: ThermodynamicTemperature,
    ) -> ElectricPotential {
        let scaling =
            self.reference_temperature.get::<kelvin>() / temperature.get::<kelvin>();
        *i.as_ref() * (self.reference_asr * scaling)
    }

    /// Cell terminal voltage at the given current density and temperature.
    #[must_use]
    pub fn voltage(
        &self,
        i: PositiveCurrentDensity,
        temperature: ThermodynamicTemperature,
    ) -> ElectricPotential {
        self.reversible_voltage
            + self.activation_overpotential(i, temperature)
            + self.ohmic_overpotential(i, temperature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn reference_temp() -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(333.0)
    }

    #[test]
    fn overpotentials_match_reference_values() {
        let cell = CellParameters::reference();
        let i = current_density(5000.0).unwrap();

        assert_relative_eq!(
            cell.activation_overpotential(i, reference_temp()).get::<volt>(),
            0.442606894202,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            cell.ohmic_overpotential(i, reference_temp()).get::<volt>(),
            1.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            cell.voltage(i, reference_temp()).get::<volt>(),
            2.672606894202,
            epsilon = 1e-9
        );
    }

    #[test]
    fn ohmic_resistance_falls_with_temperature() {
        let cell = CellParameters::reference();
        let i = current_density(5000.0).unwrap();
        let warm = ThermodynamicTemperature::new::<kelvin>(350.0);

        assert_relative_eq!(
            cell.ohmic_overpotential(i, warm).get::<volt>(),
            0.951428571429,
            epsilon = 1e-9
        );
    }

    #[test]
    fn voltage_is_monotonic_in_current_density() {
        let cell = CellParameters::reference();
        let temperature = reference_temp();

        let mut previous = ElectricPotential::new::<volt>(0.0);
        for value in [100.0, 1000.0, 5000.0, 12000.0, 20000.0] {
            let v = cell.voltage(current_density(value).unwrap(), temperature);
            assert!(v > previous, "voltage must rise with current density");
            previous = v;
        }

        assert_relative_eq!(
            cell.voltage(current_density(12000.0).unwrap(), temperature)
                .get::<volt>(),
            4.097727788418,
            epsilon = 1e-9
        );
    }

    #[test]
    fn non_positive_current_density_is_rejected() {
        assert!(current_density(0.0).is_err());
        assert!(current_density(-100.0).is_err());
        assert!(current_density(f64::NAN).is_err());
    }
}
