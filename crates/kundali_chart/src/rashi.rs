//! Rashi (zodiac sign) canonicalization and DMS (degrees-minutes-seconds)
//! decomposition.
//!
//! The calculation service reports signs in either of two naming
//! conventions: Western ("Aries") or transliterated Sanskrit ("Mesha").
//! Both are absorbed here into a single [`Rashi`] value; nothing downstream
//! compares raw sign strings.
//!
//! Numbering follows the universal convention: 12 rashis, Mesha (Aries) = 1
//! through Meena (Pisces) = 12.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize, Serializer};

use crate::error::ChartError;

/// The 12 rashis (zodiac signs) starting from Mesha (Aries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rashi {
    Mesha,
    Vrishabha,
    Mithuna,
    Karka,
    Simha,
    Kanya,
    Tula,
    Vrischika,
    Dhanu,
    Makara,
    Kumbha,
    Meena,
}

/// All 12 rashis in order (0 = Mesha, 11 = Meena).
pub const ALL_RASHIS: [Rashi; 12] = [
    Rashi::Mesha,
    Rashi::Vrishabha,
    Rashi::Mithuna,
    Rashi::Karka,
    Rashi::Simha,
    Rashi::Kanya,
    Rashi::Tula,
    Rashi::Vrischika,
    Rashi::Dhanu,
    Rashi::Makara,
    Rashi::Kumbha,
    Rashi::Meena,
];

/// Which naming convention to use when displaying a rashi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignNaming {
    /// "Aries", "Taurus", ...
    #[default]
    Western,
    /// "Mesha", "Vrishabha", ...
    Sanskrit,
}

impl Rashi {
    /// Sanskrit name of the rashi.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mesha => "Mesha",
            Self::Vrishabha => "Vrishabha",
            Self::Mithuna => "Mithuna",
            Self::Karka => "Karka",
            Self::Simha => "Simha",
            Self::Kanya => "Kanya",
            Self::Tula => "Tula",
            Self::Vrischika => "Vrischika",
            Self::Dhanu => "Dhanu",
            Self::Makara => "Makara",
            Self::Kumbha => "Kumbha",
            Self::Meena => "Meena",
        }
    }

    /// Western (English) name of the rashi.
    pub const fn western_name(self) -> &'static str {
        match self {
            Self::Mesha => "Aries",
            Self::Vrishabha => "Taurus",
            Self::Mithuna => "Gemini",
            Self::Karka => "Cancer",
            Self::Simha => "Leo",
            Self::Kanya => "Virgo",
            Self::Tula => "Libra",
            Self::Vrischika => "Scorpio",
            Self::Dhanu => "Sagittarius",
            Self::Makara => "Capricorn",
            Self::Kumbha => "Aquarius",
            Self::Meena => "Pisces",
        }
    }

    /// Name in the requested convention.
    pub const fn display_name(self, naming: SignNaming) -> &'static str {
        match naming {
            SignNaming::Western => self.western_name(),
            SignNaming::Sanskrit => self.name(),
        }
    }

    /// 0-based index (Mesha=0 .. Meena=11).
    pub const fn index(self) -> u8 {
        match self {
            Self::Mesha => 0,
            Self::Vrishabha => 1,
            Self::Mithuna => 2,
            Self::Karka => 3,
            Self::Simha => 4,
            Self::Kanya => 5,
            Self::Tula => 6,
            Self::Vrischika => 7,
            Self::Dhanu => 8,
            Self::Makara => 9,
            Self::Kumbha => 10,
            Self::Meena => 11,
        }
    }

    /// 1-based sign number (Mesha=1 .. Meena=12). Under the whole-sign
    /// house system this is also the house number.
    pub const fn number(self) -> u8 {
        self.index() + 1
    }

    /// Exact, case-sensitive lookup in either naming table.
    pub fn from_name(raw: &str) -> Option<Rashi> {
        ALL_RASHIS
            .iter()
            .copied()
            .find(|r| r.western_name() == raw)
            .or_else(|| ALL_RASHIS.iter().copied().find(|r| r.name() == raw))
    }
}

impl Display for Rashi {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.western_name())
    }
}

impl Serialize for Rashi {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.western_name())
    }
}

/// Canonicalize a raw sign name from the calculation service.
///
/// Accepts either naming convention, matched exactly (no trimming, no case
/// folding).
pub fn canonicalize(raw: &str) -> Result<Rashi, ChartError> {
    Rashi::from_name(raw).ok_or_else(|| ChartError::UnknownSign(raw.to_owned()))
}

/// Rashi for a 1-based sign number. Inverse of [`Rashi::number`].
pub fn rashi_at(number: u8) -> Result<Rashi, ChartError> {
    match number {
        1..=12 => Ok(ALL_RASHIS[(number - 1) as usize]),
        _ => Err(ChartError::SignNumber(number)),
    }
}

/// Degrees-minutes-seconds of a position within a rashi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Dms {
    /// Whole degrees (0..29).
    #[serde(rename = "deg")]
    pub degrees: u8,
    /// Arc-minutes (0..59).
    #[serde(rename = "min")]
    pub minutes: u8,
    /// Whole arc-seconds (0..59), truncated.
    #[serde(rename = "sec")]
    pub seconds: u8,
}

impl Dms {
    /// Reconstruct decimal degrees. Never exceeds the decomposed value and
    /// falls short of it by less than one arc-second.
    pub fn to_degrees(self) -> f64 {
        self.degrees as f64 + self.minutes as f64 / 60.0 + self.seconds as f64 / 3600.0
    }
}

impl Display for Dms {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°{:02}'{:02}\"", self.degrees, self.minutes, self.seconds)
    }
}

/// Decompose degrees within a sign into truncated degrees, minutes and
/// seconds.
///
/// Each component is floored, never rounded, so the display always matches
/// the upstream convention. Input must lie in [0, 30); total longitudes
/// have to be reduced by the caller first.
pub fn decompose(degrees_in_sign: f64) -> Result<Dms, ChartError> {
    if !(0.0..30.0).contains(&degrees_in_sign) {
        return Err(ChartError::DegreeRange(degrees_in_sign));
    }
    let degrees = degrees_in_sign.floor();
    let fractional_minutes = (degrees_in_sign - degrees) * 60.0;
    let minutes = fractional_minutes.floor();
    let seconds = ((fractional_minutes - minutes) * 60.0).floor();
    Ok(Dms {
        degrees: degrees as u8,
        minutes: minutes as u8,
        seconds: seconds as u8,
    })
}
