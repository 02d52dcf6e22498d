//! # Electrolyzer Models
//!
//! Numeric models of a renewable-powered water-electrolysis plant: cell
//! electrochemistry, a fixed-budget steady-state thermal solver, protective
//! current derating, stack/Faraday scaling, time-domain dispatch with period
//! KPIs, and a table-driven feasibility envelope that classifies the
//! currently binding physical constraint.
//!
//! Every query is a pure function of explicit inputs and immutable
//! configuration: nothing blocks, nothing is mutated in place, and no result
//! depends on prior call history. Rendering, UI state, and data loading are
//! external concerns; this crate only computes.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific model implementations and their
//!   [`twine_core::Model`] adapters.
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.

pub mod models;
pub mod support;
