//! Chart normalization for Vedic birth and divisional charts.
//!
//! Takes the raw chart snapshot returned by an external calculation service
//! and produces a validated 12-house structure a renderer can draw directly.
//! No astronomical or astrological value is computed here: signs are
//! canonicalized, bodies are assigned to houses under the chart's house
//! system, and degrees are split into degrees-minutes-seconds.
//!
//! This crate provides:
//! - Sign canonicalization across Western and Sanskrit naming
//! - Truncating DMS decomposition of degrees within a sign
//! - Whole-sign and quadrant (cusp-matched) house assignment
//! - Chart and bundle assembly with structured diagnostics

pub mod bhava;
pub mod chart;
pub mod chart_types;
pub mod diagnostic;
pub mod error;
pub mod graha;
pub mod rashi;
pub mod snapshot;
pub mod validate;

pub use bhava::{CuspTable, HousePolicy, Placement, QuadrantMatched, WholeSign, policy_for};
pub use chart::{assemble, assemble_bundle, assemble_with};
pub use chart_types::{ChartKind, HouseRecord, NormalizeOptions, NormalizedChart, PlacedBody};
pub use diagnostic::{Diagnostic, Outcome};
pub use error::ChartError;
pub use graha::{ALL_GRAHAS, ChartBody, Graha};
pub use rashi::{ALL_RASHIS, Dms, Rashi, SignNaming, canonicalize, decompose, rashi_at};
pub use snapshot::{CelestialBody, ChartBundle, ChartSnapshot, RawBody, RawCusp};
pub use validate::check_chart;
