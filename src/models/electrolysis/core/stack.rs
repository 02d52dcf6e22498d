//! Stack-level scaling and Faraday hydrogen production.

use uom::si::{
    f64::{ElectricCurrent, ElectricPotential, MassRate, Power},
    mass_rate::kilogram_per_second,
};

use super::cell::CellParameters;

/// Molar mass of hydrogen, kg/mol.
pub const HYDROGEN_MOLAR_MASS: f64 = 2.016e-3;

/// Immutable stack geometry.
#[derive(Debug, Clone, Copy)]
pub struct StackConfiguration {
    /// Number of series-connected cells sharing the stack current.
    pub cells: u32,
}

impl StackConfiguration {
    /// The calibrated reference stack.
    #[must_use]
    pub fn reference() -> Self {
        Self { cells: 50 }
    }

    /// Scales a cell operating condition to the stack level.
    ///
    /// Stack voltage is the series sum of cell voltages, stack power is
    /// stack voltage times the shared current, and the hydrogen mass flow
    /// follows Faraday's law: `N·I/(n·F)` mol/s of H₂ at
    /// [`HYDROGEN_MOLAR_MASS`] kg/mol.
    #[must_use]
    pub fn scale(
        &self,
        cell: &CellParameters,
        cell_voltage: ElectricPotential,
        current: ElectricCurrent,
    ) -> StackOutput {
        let cells = f64::from(self.cells);
        let voltage = cell_voltage * cells;
        let power = voltage * current;

        let molar_rate = cells * current.value / (f64::from(cell.electrons) * cell.faraday);
        let hydrogen_rate =
            MassRate::new::<kilogram_per_second>(molar_rate * HYDROGEN_MOLAR_MASS);

        StackOutput {
            voltage,
            power,
            hydrogen_rate,
        }
    }
}

/// Stack-level electrical and production figures for one operating condition.
#[derive(Debug, Clone, Copy)]
pub struct StackOutput {
    /// Stack terminal voltage.
    pub voltage: ElectricPotential,

    /// Stack electrical power.
    pub power: Power,

    /// Hydrogen mass production rate.
    pub hydrogen_rate: MassRate,
}

impl StackOutput {
    /// Hydrogen production rate in kg/h, the conventional reporting unit.
    #[must_use]
    pub fn hydrogen_kg_per_hour(&self) -> f64 {
        self.hydrogen_rate.get::<kilogram_per_second>() * 3600.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{electric_current::ampere, electric_potential::volt, power::watt};

    #[test]
    fn scales_voltage_power_and_hydrogen() {
        let stack = StackConfiguration::reference();
        let cell = CellParameters::reference();

        let out = stack.scale(
            &cell,
            ElectricPotential::new::<volt>(2.0),
            ElectricCurrent::new::<ampere>(100.0),
        );

        assert_relative_eq!(out.voltage.get::<volt>(), 100.0);
        assert_relative_eq!(out.power.get::<watt>(), 10000.0);
        assert_relative_eq!(
            out.hydrogen_rate.get::<kilogram_per_second>(),
            5.223609887547e-5,
            epsilon = 1e-14
        );
        assert_relative_eq!(out.hydrogen_kg_per_hour(), 0.1880499560, epsilon = 1e-9);
    }

    #[test]
    fn hydrogen_rate_is_linear_in_current() {
        let stack = StackConfiguration::reference();
        let cell = CellParameters::reference();
        let v = ElectricPotential::new::<volt>(1.8);

        let one = stack.scale(&cell, v, ElectricCurrent::new::<ampere>(50.0));
        let two = stack.scale(&cell, v, ElectricCurrent::new::<ampere>(100.0));

        assert_relative_eq!(
            two.hydrogen_rate.get::<kilogram_per_second>(),
            2.0 * one.hydrogen_rate.get::<kilogram_per_second>(),
            epsilon = 1e-15
        );
    }
}
