//! Snapshot model of the calculation service's chart payload.
//!
//! The raw types mirror the JSON shape. Only `sign` and `degrees_in_sign`
//! are typed; advisory and passthrough fields stay as JSON values so a
//! wrongly typed house hint or pada cannot cost a body its placement.
//! [`CelestialBody::from_raw`] is the strict gate: a body either passes with
//! a canonical sign and an in-range degree, or it is rejected with the
//! reason.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chart_types::ChartKind;
use crate::diagnostic::Outcome;
use crate::error::ChartError;
use crate::graha::ChartBody;
use crate::rashi::{Rashi, canonicalize};

/// One body as reported upstream (planet or ascendant).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degrees_in_sign: Option<f64>,
    /// Upstream house number. Advisory only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_degree: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retro: Option<Value>,
    /// Opaque, passed through unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nakshatra: Option<Value>,
    /// Opaque, passed through unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pada: Option<Value>,
}

impl RawBody {
    /// Body with just a sign and a degree within it.
    pub fn new(sign: impl Into<String>, degrees_in_sign: f64) -> Self {
        Self {
            sign: Some(sign.into()),
            degrees_in_sign: Some(degrees_in_sign),
            ..Self::default()
        }
    }

    pub fn with_house(mut self, house: i64) -> Self {
        self.house = Some(house.into());
        self
    }

    pub fn with_retro(mut self, retro: bool) -> Self {
        self.retro = Some(retro.into());
        self
    }

    fn to_value(&self) -> Value {
        // Plain fields only; serialization cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// One house cusp descriptor (quadrant charts).
///
/// Fields stay untyped; [`CuspTable::from_cusps`](crate::CuspTable::from_cusps)
/// decides what is usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCusp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degrees_in_sign: Option<Value>,
}

impl RawCusp {
    pub fn new(house: i64, sign: impl Into<String>) -> Self {
        Self {
            house: Some(house.into()),
            sign: Some(Value::String(sign.into())),
            degrees_in_sign: None,
        }
    }
}

/// Read a JSON number as a whole number: integers, or floats with no
/// fractional part (`8.0`).
pub(crate) fn whole_number(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
            .map(|f| f as i64)
    })
}

/// Full payload for one chart variant (D1, D9, D10, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    /// Chart label such as "D1" or "D9". Passed through untouched.
    #[serde(default, alias = "label", skip_serializing_if = "Option::is_none")]
    pub chart: Option<String>,
    pub chart_kind: ChartKind,
    /// Kept untyped like the planets, so a malformed ascendant is reported
    /// as an unresolved ascendant rather than a broken document.
    #[serde(default)]
    pub ascendant: Option<Value>,
    /// Planet entries keyed by name. Values stay untyped until each one is
    /// validated on its own.
    #[serde(default)]
    pub planets: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub houses: Vec<RawCusp>,
}

impl ChartSnapshot {
    /// Empty snapshot of the given kind with only an ascendant.
    pub fn new(chart_kind: ChartKind, ascendant: RawBody) -> Self {
        Self {
            chart: None,
            chart_kind,
            ascendant: Some(ascendant.to_value()),
            planets: BTreeMap::new(),
            houses: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ChartError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.chart = Some(label.into());
        self
    }

    pub fn with_planet(mut self, name: impl Into<String>, body: &RawBody) -> Self {
        self.planets.insert(name.into(), body.to_value());
        self
    }

    pub fn with_houses(mut self, houses: Vec<RawCusp>) -> Self {
        self.houses = houses;
        self
    }
}

/// Several independent chart payloads keyed by label.
///
/// Entries stay untyped so one broken chart cannot spoil its siblings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartBundle {
    pub charts: BTreeMap<String, Value>,
}

impl ChartBundle {
    pub fn from_json(json: &str) -> Result<Self, ChartError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn insert(&mut self, label: impl Into<String>, snapshot: &ChartSnapshot) -> Result<(), ChartError> {
        self.charts.insert(label.into(), serde_json::to_value(snapshot)?);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

/// A body that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    pub body: ChartBody,
    pub sign: Rashi,
    /// Usable upstream house number, if one was reported.
    pub house_hint: Option<i64>,
    /// Degrees within sign, in [0, 30).
    pub degrees_in_sign: f64,
    /// Total longitude in [0, 360), if reported and valid.
    pub total_degree: Option<f64>,
    pub retrograde: bool,
    pub nakshatra: Option<Value>,
    pub pada: Option<Value>,
}

impl CelestialBody {
    /// Validate a raw body.
    ///
    /// Fails when `sign` or `degrees_in_sign` is missing, the sign is unknown,
    /// or the degree lies outside [0, 30). Nothing is ever defaulted. Other
    /// fields never reject the body: an unusable house hint, retro flag or
    /// `total_degree` is dropped and reported in the returned notes.
    pub fn from_raw(
        body: ChartBody,
        raw: &RawBody,
    ) -> Result<(Self, Vec<(Outcome, ChartError)>), ChartError> {
        let sign = raw
            .sign
            .as_deref()
            .ok_or(ChartError::MissingField { field: "sign" })?;
        let degrees_in_sign = raw
            .degrees_in_sign
            .ok_or(ChartError::MissingField {
                field: "degrees_in_sign",
            })?;
        let sign = canonicalize(sign)?;
        if !(0.0..30.0).contains(&degrees_in_sign) {
            return Err(ChartError::DegreeRange(degrees_in_sign));
        }

        let mut notes = Vec::new();
        let house_hint = raw.house.as_ref().and_then(|v| {
            let hint = whole_number(v);
            if hint.is_none() {
                notes.push(unusable("house", v));
            }
            hint
        });
        let retrograde = match &raw.retro {
            None => false,
            Some(v) => v.as_bool().unwrap_or_else(|| {
                notes.push(unusable("retro", v));
                false
            }),
        };
        let total_degree = match raw.total_degree.as_ref().map(|v| (v, v.as_f64())) {
            None => None,
            Some((v, None)) => {
                notes.push(unusable("total_degree", v));
                None
            }
            Some((_, Some(t))) if !(0.0..360.0).contains(&t) => {
                notes.push((Outcome::Corrected, ChartError::LongitudeRange(t)));
                None
            }
            Some((_, t)) => t,
        };

        let validated = Self {
            body,
            sign,
            house_hint,
            degrees_in_sign,
            total_degree,
            retrograde,
            nakshatra: raw.nakshatra.clone(),
            pada: raw.pada.clone(),
        };
        Ok((validated, notes))
    }
}

fn unusable(field: &'static str, value: &Value) -> (Outcome, ChartError) {
    (
        Outcome::Noted,
        ChartError::UnusableField {
            field,
            value: value.to_string(),
        },
    )
}
