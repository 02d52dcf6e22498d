//! Dispatch simulation core: profiles, time stepping, and KPI integration.

pub(crate) mod kpi;
pub(crate) mod profile;
pub(crate) mod simulate;

pub use kpi::{KpiSnapshot, aggregate};
pub use profile::{DIURNAL_PERIOD_HOURS, PowerProfile, ProfileError, REFERENCE_STEP_HOURS};
pub use simulate::{DispatchSample, DispatchSeries, dispatch};
