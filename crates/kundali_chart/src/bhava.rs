//! Bhava (house) assignment for the two supported house systems.
//!
//! One capability, two implementations:
//! - [`WholeSign`]: divisional (varga) charts. House number is the body's
//!   sign number by definition; an upstream house value is advisory only.
//! - [`QuadrantMatched`]: the primary birth chart. Each house carries its own
//!   cusp sign computed upstream; a body goes to the house whose cusp sign
//!   equals its own sign.
//!
//! The Ascendant goes through exactly the same placement as any graha.

use serde_json::Value;

use crate::chart_types::{ChartKind, HouseRecord, NormalizeOptions};
use crate::diagnostic::{Diagnostic, Outcome};
use crate::error::ChartError;
use crate::rashi::{ALL_RASHIS, Rashi, canonicalize};
use crate::snapshot::{CelestialBody, ChartSnapshot, RawCusp, whole_number};

/// Cusp sign (and optional cusp degree) of each of the 12 houses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CuspTable {
    /// Indexed 0..12 (signs[0] = house 1).
    signs: [Rashi; 12],
    degrees: [Option<f64>; 12],
}

impl CuspTable {
    /// Whole-sign table: house N carries sign N.
    pub fn whole_sign() -> Self {
        Self {
            signs: ALL_RASHIS,
            degrees: [None; 12],
        }
    }

    /// Build a table from the snapshot's cusp list.
    ///
    /// The list must hold exactly 12 entries whose house numbers cover 1..=12
    /// once each, every one with a recognizable sign. Entries may arrive in
    /// any order. Problems that leave the table usable (an out-of-range cusp
    /// degree, a repeated cusp sign) are returned as diagnostics.
    pub fn from_cusps(
        raw: &[RawCusp],
        reject_duplicate_signs: bool,
    ) -> Result<(Self, Vec<Diagnostic>), ChartError> {
        if raw.len() != 12 {
            return Err(ChartError::InvalidCusps(format!(
                "expected 12 houses, got {}",
                raw.len()
            )));
        }

        let mut slots: [Option<(Rashi, Option<f64>)>; 12] = [None; 12];
        let mut notes = Vec::new();

        for (pos, cusp) in raw.iter().enumerate() {
            let number = cusp.house.as_ref().ok_or_else(|| {
                ChartError::InvalidCusps(format!("entry {} has no house number", pos + 1))
            })?;
            let number = whole_number(number)
                .and_then(|n| u8::try_from(n).ok())
                .filter(|n| (1..=12).contains(n))
                .ok_or_else(|| {
                    ChartError::InvalidCusps(format!("invalid house number {number}"))
                })?;
            let slot = &mut slots[(number - 1) as usize];
            if slot.is_some() {
                return Err(ChartError::InvalidCusps(format!("house {number} listed twice")));
            }

            let sign = cusp
                .sign
                .as_ref()
                .and_then(Value::as_str)
                .ok_or_else(|| ChartError::InvalidCusps(format!("house {number} has no sign")))?;
            let sign = canonicalize(sign)
                .map_err(|e| ChartError::InvalidCusps(format!("house {number}: {e}")))?;

            let subject = || format!("house {number}");
            let degrees = match cusp.degrees_in_sign.as_ref().map(|v| (v, v.as_f64())) {
                None => None,
                Some((v, None)) => {
                    notes.push(Diagnostic::new(
                        subject(),
                        Outcome::Noted,
                        ChartError::UnusableField {
                            field: "degrees_in_sign",
                            value: v.to_string(),
                        },
                    ));
                    None
                }
                Some((_, Some(d))) if !(0.0..30.0).contains(&d) => {
                    notes.push(Diagnostic::new(
                        subject(),
                        Outcome::Corrected,
                        ChartError::DegreeRange(d),
                    ));
                    None
                }
                Some((_, d)) => d,
            };
            *slot = Some((sign, degrees));
        }

        let mut signs = ALL_RASHIS;
        let mut degrees = [None; 12];
        for (i, slot) in slots.iter().enumerate() {
            // Twelve distinct numbers in 1..=12 fill every slot.
            let Some((sign, deg)) = *slot else {
                return Err(ChartError::InvalidCusps(format!("house {} missing", i + 1)));
            };
            signs[i] = sign;
            degrees[i] = deg;
        }

        for second in 1..12 {
            if let Some(first) = signs[..second].iter().position(|s| *s == signs[second]) {
                let err = ChartError::DuplicateCuspSign {
                    sign: signs[second],
                    first: first as u8 + 1,
                    second: second as u8 + 1,
                };
                if reject_duplicate_signs {
                    return Err(err);
                }
                notes.push(Diagnostic::new(format!("house {}", second + 1), Outcome::Noted, err));
            }
        }

        Ok((Self { signs, degrees }, notes))
    }

    /// Cusp sign of a 1-based house.
    pub fn sign(&self, house: u8) -> Option<Rashi> {
        let i = house.checked_sub(1)?;
        self.signs.get(i as usize).copied()
    }

    /// Cusp degree of a 1-based house, when one was reported and usable.
    pub fn cusp_degrees(&self, house: u8) -> Option<f64> {
        let i = house.checked_sub(1)?;
        self.degrees.get(i as usize).copied().flatten()
    }

    /// The 12 empty house records this table describes.
    pub(crate) fn house_records(&self) -> [HouseRecord; 12] {
        std::array::from_fn(|i| HouseRecord::empty(i as u8 + 1, self.signs[i], self.degrees[i]))
    }

    /// Lowest-numbered house whose cusp carries `sign`.
    pub fn find(&self, sign: Rashi) -> Option<u8> {
        self.signs
            .iter()
            .position(|s| *s == sign)
            .map(|i| i as u8 + 1)
    }
}

/// Where a body goes, plus any recoverable problem found on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// House number, 1-12.
    pub house: u8,
    pub note: Option<(Outcome, ChartError)>,
}

impl Placement {
    fn clean(house: u8) -> Self {
        Self { house, note: None }
    }
}

/// A house system.
pub trait HousePolicy {
    fn kind(&self) -> ChartKind;

    /// Build the cusp table for a snapshot.
    fn cusps(&self, snapshot: &ChartSnapshot) -> Result<(CuspTable, Vec<Diagnostic>), ChartError>;

    /// Place one validated body.
    fn place(&self, body: &CelestialBody, cusps: &CuspTable) -> Result<Placement, ChartError>;
}

/// Whole-sign houses: house number equals sign number.
#[derive(Debug, Clone, Copy, Default)]
pub struct WholeSign;

impl HousePolicy for WholeSign {
    fn kind(&self) -> ChartKind {
        ChartKind::WholeSign
    }

    fn cusps(&self, _snapshot: &ChartSnapshot) -> Result<(CuspTable, Vec<Diagnostic>), ChartError> {
        Ok((CuspTable::whole_sign(), Vec::new()))
    }

    fn place(&self, body: &CelestialBody, _cusps: &CuspTable) -> Result<Placement, ChartError> {
        let computed = body.sign.number();
        let note = body
            .house_hint
            .filter(|&reported| reported != i64::from(computed))
            .map(|reported| {
                (
                    Outcome::Corrected,
                    ChartError::SignHouseMismatch { reported, computed },
                )
            });
        Ok(Placement {
            house: computed,
            note,
        })
    }
}

/// Quadrant houses matched by cusp sign.
#[derive(Debug, Clone, Copy)]
pub struct QuadrantMatched {
    /// Use the upstream house number when no cusp matches.
    pub hint_fallback: bool,
    pub reject_duplicate_cusps: bool,
}

impl Default for QuadrantMatched {
    fn default() -> Self {
        let options = NormalizeOptions::default();
        Self {
            hint_fallback: options.hint_fallback,
            reject_duplicate_cusps: options.reject_duplicate_cusps,
        }
    }
}

impl HousePolicy for QuadrantMatched {
    fn kind(&self) -> ChartKind {
        ChartKind::Quadrant
    }

    fn cusps(&self, snapshot: &ChartSnapshot) -> Result<(CuspTable, Vec<Diagnostic>), ChartError> {
        CuspTable::from_cusps(&snapshot.houses, self.reject_duplicate_cusps)
    }

    fn place(&self, body: &CelestialBody, cusps: &CuspTable) -> Result<Placement, ChartError> {
        if let Some(house) = cusps.find(body.sign) {
            return Ok(Placement::clean(house));
        }

        let no_match = ChartError::NoMatchingHouse {
            sign: body.sign,
            hint: body.house_hint,
        };
        let usable_hint = body
            .house_hint
            .filter(|_| self.hint_fallback)
            .and_then(|h| u8::try_from(h).ok())
            .filter(|h| (1..=12).contains(h));
        match usable_hint {
            Some(house) => Ok(Placement {
                house,
                note: Some((Outcome::Fallback { house }, no_match)),
            }),
            None => Err(no_match),
        }
    }
}

/// Select the house system for a chart kind.
pub fn policy_for(kind: ChartKind, options: &NormalizeOptions) -> Box<dyn HousePolicy> {
    match kind {
        ChartKind::WholeSign => Box::new(WholeSign),
        ChartKind::Quadrant => Box::new(QuadrantMatched {
            hint_fallback: options.hint_fallback,
            reject_duplicate_cusps: options.reject_duplicate_cusps,
        }),
    }
}
