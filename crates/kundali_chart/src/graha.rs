//! Chart bodies: the 9 Vedic grahas and the Lagna (Ascendant).
//!
//! Planet keys arrive from the calculation service as free strings. They are
//! resolved here, and the fixed [`ALL_GRAHAS`] order decides the order in
//! which bodies are placed, so rendering order never depends on payload
//! order.

use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};

/// The 9 Vedic grahas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Graha {
    Surya,
    Chandra,
    Mangal,
    Buddh,
    Guru,
    Shukra,
    Shani,
    Rahu,
    Ketu,
}

/// All 9 grahas in traditional order. This is the placement order.
pub const ALL_GRAHAS: [Graha; 9] = [
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Guru,
    Graha::Shukra,
    Graha::Shani,
    Graha::Rahu,
    Graha::Ketu,
];

impl Graha {
    /// Sanskrit name of the graha.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Surya => "Surya",
            Self::Chandra => "Chandra",
            Self::Mangal => "Mangal",
            Self::Buddh => "Buddh",
            Self::Guru => "Guru",
            Self::Shukra => "Shukra",
            Self::Shani => "Shani",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// English name of the graha, as used in service payloads.
    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Surya => "Sun",
            Self::Chandra => "Moon",
            Self::Mangal => "Mars",
            Self::Buddh => "Mercury",
            Self::Guru => "Jupiter",
            Self::Shukra => "Venus",
            Self::Shani => "Saturn",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// 0-based index into ALL_GRAHAS.
    pub const fn index(self) -> u8 {
        match self {
            Self::Surya => 0,
            Self::Chandra => 1,
            Self::Mangal => 2,
            Self::Buddh => 3,
            Self::Guru => 4,
            Self::Shukra => 5,
            Self::Shani => 6,
            Self::Rahu => 7,
            Self::Ketu => 8,
        }
    }

    /// Exact, case-sensitive lookup by English or Sanskrit name.
    pub fn from_name(raw: &str) -> Option<Graha> {
        ALL_GRAHAS
            .iter()
            .copied()
            .find(|g| g.english_name() == raw || g.name() == raw)
    }
}

impl Display for Graha {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.english_name())
    }
}

/// Anything that can be placed in a house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChartBody {
    /// The Ascendant. Always placed before any graha.
    Lagna,
    Graha(Graha),
}

impl ChartBody {
    /// Display name: "Ascendant" or the graha's English name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lagna => "Ascendant",
            Self::Graha(g) => g.english_name(),
        }
    }

    pub const fn is_lagna(self) -> bool {
        matches!(self, Self::Lagna)
    }
}

impl From<Graha> for ChartBody {
    fn from(g: Graha) -> Self {
        Self::Graha(g)
    }
}

impl Display for ChartBody {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ChartBody {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
