//! Types for chart normalization: chart kind, options, and the 12-house
//! output structure consumed by the rendering layer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::diagnostic::Diagnostic;
use crate::graha::ChartBody;
use crate::rashi::{Dms, Rashi};

/// House system of a snapshot, selected by the payload's `chart_kind` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    /// Divisional (varga) charts: house number equals sign number.
    WholeSign,
    /// Primary birth chart: each house carries its own cusp sign.
    Quadrant,
}

impl ChartKind {
    pub const fn tag(self) -> &'static str {
        match self {
            Self::WholeSign => "whole-sign",
            Self::Quadrant => "quadrant",
        }
    }
}

/// Policy switches for normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Quadrant charts: place a body by its upstream house number when no
    /// cusp carries its sign.
    pub hint_fallback: bool,
    /// Quadrant charts: reject the chart when two cusps share a sign,
    /// instead of recording a diagnostic.
    pub reject_duplicate_cusps: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            hint_fallback: true,
            reject_duplicate_cusps: false,
        }
    }
}

/// A body placed in a house.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedBody {
    pub body: ChartBody,
    /// The body's own sign, independent of the house cusp.
    pub sign: Rashi,
    /// House number, 1-12.
    pub house: u8,
    /// Truncated degrees-minutes-seconds within the sign.
    pub dms: Dms,
    /// Degrees within sign as reported, [0, 30).
    pub degrees_in_sign: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_degree: Option<f64>,
    pub retrograde: bool,
    /// Upstream nakshatra, passed through unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nakshatra: Option<Value>,
    /// Upstream pada, passed through unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pada: Option<Value>,
}

/// A single house of a normalized chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseRecord {
    /// House number, 1-12.
    pub number: u8,
    /// Cusp sign of the house.
    pub sign: Rashi,
    /// Cusp degree within sign (quadrant charts only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cusp_degrees: Option<f64>,
    /// Placed bodies: Ascendant first, then grahas in canonical order.
    pub bodies: Vec<PlacedBody>,
}

impl HouseRecord {
    pub(crate) fn empty(number: u8, sign: Rashi, cusp_degrees: Option<f64>) -> Self {
        Self {
            number,
            sign,
            cusp_degrees,
            bodies: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

/// Result of normalizing one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedChart {
    /// Chart label passed through from the snapshot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub kind: ChartKind,
    /// The 12 houses, indexed 0..12 (houses[0] = house 1).
    pub houses: [HouseRecord; 12],
    /// Every correction, fallback, and exclusion made while assembling.
    pub diagnostics: Vec<Diagnostic>,
}

impl NormalizedChart {
    /// House by 1-based number.
    pub fn house(&self, number: u8) -> Option<&HouseRecord> {
        match number {
            1..=12 => Some(&self.houses[(number - 1) as usize]),
            _ => None,
        }
    }

    /// All placed bodies in house order.
    pub fn placed_bodies(&self) -> impl Iterator<Item = &PlacedBody> {
        self.houses.iter().flat_map(|h| h.bodies.iter())
    }

    /// Find a placed body.
    pub fn locate(&self, body: ChartBody) -> Option<&PlacedBody> {
        self.placed_bodies().find(|p| p.body == body)
    }

    pub fn ascendant(&self) -> Option<&PlacedBody> {
        self.locate(ChartBody::Lagna)
    }

    /// True when nothing was corrected or excluded.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
