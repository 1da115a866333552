//! Error types for chart normalization.

use thiserror::Error;

use crate::rashi::Rashi;

/// Errors raised while normalizing a chart snapshot.
///
/// Most variants describe a problem with a single body and are recovered
/// locally: the body is excluded or corrected and the error is attached to
/// the chart as a [`Diagnostic`](crate::Diagnostic). Only
/// [`AscendantUnresolved`](Self::AscendantUnresolved),
/// [`InvalidCusps`](Self::InvalidCusps), [`Invariant`](Self::Invariant) and
/// [`Parse`](Self::Parse) prevent a chart from being produced.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ChartError {
    /// Sign string matches neither naming convention.
    #[error("unknown sign name {0:?}")]
    UnknownSign(String),
    /// Degree within sign outside [0, 30).
    #[error("degree in sign {0} outside [0, 30)")]
    DegreeRange(f64),
    /// Total longitude outside [0, 360).
    #[error("total degree {0} outside [0, 360)")]
    LongitudeRange(f64),
    /// Sign number outside 1..=12.
    #[error("sign number {0} outside 1..=12")]
    SignNumber(u8),
    /// A required field is absent from a body.
    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },
    /// Planet key is not one of the 9 classical bodies.
    #[error("unknown body {0:?}")]
    UnknownBody(String),
    /// Two planet keys name the same body.
    #[error("{0} reported more than once")]
    DuplicateBody(String),
    /// An advisory field holds a value of the wrong type; it is ignored.
    #[error("unusable `{field}` value {value}, ignored")]
    UnusableField { field: &'static str, value: String },
    /// Body entry does not have the expected shape.
    #[error("malformed body entry: {0}")]
    MalformedBody(String),
    /// Whole-sign chart: upstream house disagrees with the sign number.
    #[error("reported house {reported} disagrees with computed house {computed}")]
    SignHouseMismatch { reported: i64, computed: u8 },
    /// Quadrant chart: no cusp carries the body's sign.
    #[error("no house cusp in {sign}{}", hint_suffix(.hint))]
    NoMatchingHouse { sign: Rashi, hint: Option<i64> },
    /// Two cusps carry the same sign.
    #[error("cusp sign {sign} repeated in houses {first} and {second}")]
    DuplicateCuspSign { sign: Rashi, first: u8, second: u8 },
    /// The house cusp list cannot describe 12 houses.
    #[error("invalid house cusps: {0}")]
    InvalidCusps(String),
    /// The ascendant cannot be placed; no chart is produced.
    #[error("ascendant unresolved: {0}")]
    AscendantUnresolved(Box<ChartError>),
    /// An assembled chart broke one of its structural guarantees.
    #[error("chart invariant violated: {0}")]
    Invariant(String),
    /// Payload is not a well-formed snapshot document.
    #[error("snapshot parse error: {0}")]
    Parse(String),
}

fn hint_suffix(hint: &Option<i64>) -> String {
    match hint {
        Some(h) => format!(" (house hint {h})"),
        None => String::new(),
    }
}

impl ChartError {
    /// Stable machine-readable code, used by the debug view.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnknownSign(_) => "unknown_sign",
            Self::DegreeRange(_) => "degree_range",
            Self::LongitudeRange(_) => "longitude_range",
            Self::SignNumber(_) => "sign_number",
            Self::MissingField { .. } => "missing_field",
            Self::UnknownBody(_) => "unknown_body",
            Self::DuplicateBody(_) => "duplicate_body",
            Self::UnusableField { .. } => "unusable_field",
            Self::MalformedBody(_) => "malformed_body",
            Self::SignHouseMismatch { .. } => "sign_house_mismatch",
            Self::NoMatchingHouse { .. } => "no_matching_house",
            Self::DuplicateCuspSign { .. } => "duplicate_cusp_sign",
            Self::InvalidCusps(_) => "invalid_cusps",
            Self::AscendantUnresolved(_) => "ascendant_unresolved",
            Self::Invariant(_) => "invariant",
            Self::Parse(_) => "parse",
        }
    }
}

impl From<serde_json::Error> for ChartError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
