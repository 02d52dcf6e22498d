//! Binding-constraint classification.

/// The physical limit currently capping hydrogen output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// Output is capped by available renewable energy.
    SolarLimited,

    /// Output is capped by installed electrolyzer capacity.
    CapacityLimited,

    /// Output is capped by the thermal or stack margin.
    ThermalLimited,
}

impl Regime {
    /// Classifies the binding constraint.
    ///
    /// The priority order is load-bearing: capacity wins whenever it yields
    /// less hydrogen than the renewable path, then an eroded feasibility
    /// factor marks the thermal/stack margin, and only an unconstrained
    /// plant is solar-limited.
    #[must_use]
    pub fn classify(
        hydrogen_from_capacity: f64,
        hydrogen_from_renewable: f64,
        feasibility_factor: f64,
        feasibility_threshold: f64,
    ) -> Self {
        if hydrogen_from_capacity < hydrogen_from_renewable {
            Self::CapacityLimited
        } else if feasibility_factor < feasibility_threshold {
            Self::ThermalLimited
        } else {
            Self::SolarLimited
        }
    }
}
