//! Deterministic credit scoring for loan applications.
//!
//! The [`scoring`] module holds the engine (scorecard, narrative reasons,
//! band table, and default-probability curve, all expressed as data), the
//! intake validator that guards the engine's numeric contract, and the
//! service layer that persists score records through an injected repository.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
