//! Golden-value and property tests for chart normalization.
//!
//! Pure data tests, no service access needed.

use kundali_chart::{
    ALL_GRAHAS, ALL_RASHIS, ChartBody, ChartError, ChartKind, ChartSnapshot, Graha,
    NormalizeOptions, Outcome, RawBody, RawCusp, Rashi, assemble, assemble_with, canonicalize,
    decompose,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

/// Small deterministic generator so property sweeps are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }

    fn degree(&mut self) -> f64 {
        (self.below(30_000_000) as f64) / 1_000_000.0
    }
}

fn rotated_cusps(first: Rashi) -> Vec<RawCusp> {
    (0..12)
        .map(|i| {
            let sign = ALL_RASHIS[(first.index() as usize + i) % 12];
            RawCusp::new(i as i64 + 1, sign.western_name())
        })
        .collect()
}

fn house_numbers(snapshot: &ChartSnapshot) -> Vec<u8> {
    assemble(snapshot)
        .expect("chart should assemble")
        .houses
        .iter()
        .map(|h| h.number)
        .collect()
}

// ---------------------------------------------------------------------------
// Sign canonicalization
// ---------------------------------------------------------------------------

#[rstest]
#[case("Aries", Rashi::Mesha)]
#[case("Mesha", Rashi::Mesha)]
#[case("Scorpio", Rashi::Vrischika)]
#[case("Vrischika", Rashi::Vrischika)]
#[case("Capricorn", Rashi::Makara)]
#[case("Meena", Rashi::Meena)]
fn canonicalize_known_names(#[case] raw: &str, #[case] expected: Rashi) {
    assert_eq!(canonicalize(raw), Ok(expected));
}

#[rstest]
#[case("aries")]
#[case("ARIES")]
#[case("Aries ")]
#[case("Ophiuchus")]
#[case("")]
fn canonicalize_rejects(#[case] raw: &str) {
    assert_eq!(canonicalize(raw), Err(ChartError::UnknownSign(raw.to_owned())));
}

// ---------------------------------------------------------------------------
// Degree decomposition
// ---------------------------------------------------------------------------

#[test]
fn decomposition_reconstructs_within_one_arcsecond() {
    let tolerance = 1.0 / 3600.0 + 1e-9;
    let mut v = 0.0;
    while v < 30.0 {
        let dms = decompose(v).unwrap();
        let back = dms.to_degrees();
        assert!(back <= v + 1e-9, "reconstructed {back} exceeds {v}");
        assert!(v - back < tolerance, "{v} reconstructed as {back}");
        assert!(dms.minutes < 60 && dms.seconds < 60);
        v += 0.000_731;
    }

    let mut rng = Lcg(7);
    for _ in 0..10_000 {
        let v = rng.degree();
        let back = decompose(v).unwrap().to_degrees();
        assert!((v - back).abs() < tolerance, "{v} reconstructed as {back}");
    }
}

#[test]
fn decomposition_refuses_total_longitude() {
    assert_eq!(decompose(215.5), Err(ChartError::DegreeRange(215.5)));
}

// ---------------------------------------------------------------------------
// Chart properties
// ---------------------------------------------------------------------------

#[test]
fn always_twelve_houses() {
    let expected: Vec<u8> = (1..=12).collect();
    for asc in ALL_RASHIS {
        let ws = ChartSnapshot::new(ChartKind::WholeSign, RawBody::new(asc.name(), 12.0));
        assert_eq!(house_numbers(&ws), expected);

        let q = ChartSnapshot::new(ChartKind::Quadrant, RawBody::new(asc.western_name(), 12.0))
            .with_houses(rotated_cusps(asc));
        assert_eq!(house_numbers(&q), expected);
    }
}

#[test]
fn whole_sign_house_equals_sign_for_generated_snapshots() {
    let mut rng = Lcg(42);
    for _ in 0..500 {
        let asc_sign = ALL_RASHIS[rng.below(12) as usize];
        let mut snap = ChartSnapshot::new(
            ChartKind::WholeSign,
            RawBody::new(asc_sign.western_name(), rng.degree()).with_house(rng.below(14) as i64),
        );
        for g in ALL_GRAHAS {
            if rng.below(5) == 0 {
                continue;
            }
            let sign = ALL_RASHIS[rng.below(12) as usize];
            let name = if rng.below(2) == 0 { sign.name() } else { sign.western_name() };
            let mut raw = RawBody::new(name, rng.degree());
            if rng.below(2) == 0 {
                raw = raw.with_house(rng.below(13) as i64);
            }
            snap = snap.with_planet(g.english_name(), &raw);
        }

        let chart = assemble(&snap).unwrap();
        assert_eq!(chart.placed_bodies().count(), snap.planets.len() + 1);
        for house in &chart.houses {
            assert_eq!(house.sign.number(), house.number);
            for p in &house.bodies {
                assert_eq!(p.house, house.number);
                assert_eq!(p.sign.number(), p.house, "{} in {}", p.body, p.sign);
            }
        }
        // Only hint corrections can appear.
        assert!(chart.diagnostics.iter().all(|d| d.outcome == Outcome::Corrected));
        assert_eq!(chart.ascendant().unwrap().sign, asc_sign);
    }
}

#[test]
fn quadrant_places_by_cusp_sign_not_hint() {
    // Karka rising: house 7 cusp is Makara.
    let snap = ChartSnapshot::new(ChartKind::Quadrant, RawBody::new("Cancer", 3.0))
        .with_houses(rotated_cusps(Rashi::Karka))
        .with_planet("Saturn", &RawBody::new("Capricorn", 17.25).with_house(2));
    let chart = assemble(&snap).unwrap();
    let saturn = chart.locate(Graha::Shani.into()).unwrap();
    assert_eq!(saturn.house, 7);
    assert_eq!(chart.house(7).unwrap().sign, Rashi::Makara);
    assert!(chart.house(2).unwrap().is_empty());
    assert!(chart.is_clean());
}

#[test]
fn quadrant_uneven_cusps() {
    // Intercepted signs: Mithuna and Dhanu have no cusp, Vrishabha and
    // Vrischika span two houses each.
    let signs = [
        "Aries", "Taurus", "Taurus", "Cancer", "Leo", "Virgo", "Libra", "Scorpio", "Scorpio",
        "Capricorn", "Aquarius", "Pisces",
    ];
    let houses = signs
        .iter()
        .enumerate()
        .map(|(i, s)| RawCusp::new(i as i64 + 1, *s))
        .collect();
    let snap = ChartSnapshot::new(ChartKind::Quadrant, RawBody::new("Aries", 29.0))
        .with_houses(houses)
        .with_planet("Venus", &RawBody::new("Taurus", 20.0).with_house(3))
        .with_planet("Mars", &RawBody::new("Gemini", 1.0).with_house(3))
        .with_planet("Jupiter", &RawBody::new("Sagittarius", 1.0));
    let chart = assemble(&snap).unwrap();

    // First matching cusp wins.
    assert_eq!(chart.locate(Graha::Shukra.into()).unwrap().house, 2);
    // No cusp, usable hint.
    assert_eq!(chart.locate(Graha::Mangal.into()).unwrap().house, 3);
    // No cusp, no hint: excluded, never guessed.
    assert!(chart.locate(Graha::Guru.into()).is_none());

    let codes: Vec<_> = chart
        .diagnostics
        .iter()
        .map(|d| (d.subject.as_str(), d.outcome.label(), d.error.code()))
        .collect();
    assert_eq!(
        codes,
        [
            ("house 3", "noted", "duplicate_cusp_sign"),
            ("house 9", "noted", "duplicate_cusp_sign"),
            ("Mars", "fallback", "no_matching_house"),
            ("Jupiter", "excluded", "no_matching_house"),
        ]
    );
}

#[test]
fn quadrant_hint_fallback_disabled_by_options() {
    let mut houses = rotated_cusps(Rashi::Mesha);
    houses[2] = RawCusp::new(3, "Taurus");
    let snap = ChartSnapshot::new(ChartKind::Quadrant, RawBody::new("Aries", 29.0))
        .with_houses(houses)
        .with_planet("Mars", &RawBody::new("Gemini", 1.0).with_house(3));
    let options = NormalizeOptions {
        hint_fallback: false,
        ..NormalizeOptions::default()
    };
    let chart = assemble_with(&snap, &options).unwrap();
    assert!(chart.locate(Graha::Mangal.into()).is_none());
    assert!(chart.diagnostics.iter().any(|d| d.is_exclusion()));
}

#[test]
fn missing_degree_excluded_not_defaulted() {
    let json = r#"{
        "chart_kind": "whole-sign",
        "ascendant": { "sign": "Leo", "degrees_in_sign": 10.0 },
        "planets": { "Moon": { "sign": "Cancer", "house": 4 } }
    }"#;
    let chart = assemble(&ChartSnapshot::from_json(json).unwrap()).unwrap();
    assert!(chart.locate(Graha::Chandra.into()).is_none());
    for house in &chart.houses {
        assert!(house.bodies.iter().all(|p| p.body != ChartBody::Graha(Graha::Chandra)));
    }
    assert_eq!(chart.diagnostics.len(), 1);
    assert_eq!(chart.diagnostics[0].subject, "Moon");
    assert_eq!(
        chart.diagnostics[0].error,
        ChartError::MissingField {
            field: "degrees_in_sign"
        }
    );
}

#[test]
fn ascendant_keeps_own_sign_in_foreign_house() {
    // No Scorpio cusp; the ascendant lands in house 8 (Gemini cusp) via its hint.
    let mut houses = rotated_cusps(Rashi::Mesha);
    houses[7] = RawCusp::new(8, "Gemini");
    let snap = ChartSnapshot::new(
        ChartKind::Quadrant,
        RawBody::new("Scorpio", 2.28).with_house(8),
    )
    .with_houses(houses);
    let chart = assemble(&snap).unwrap();

    let house8 = chart.house(8).unwrap();
    assert_eq!(house8.sign, Rashi::Mithuna);
    let asc = &house8.bodies[0];
    assert_eq!(asc.body, ChartBody::Lagna);
    assert_eq!(asc.sign, Rashi::Vrischika);

    let json = serde_json::to_value(&chart).unwrap();
    assert_eq!(json["houses"][7]["sign"], "Gemini");
    assert_eq!(json["houses"][7]["bodies"][0]["sign"], "Scorpio");
}

#[test]
fn unknown_ascendant_sign_rejects_chart() {
    let snap = ChartSnapshot::new(ChartKind::WholeSign, RawBody::new("Serpentarius", 2.0))
        .with_planet("Sun", &RawBody::new("Taurus", 1.41));
    assert_eq!(
        assemble(&snap),
        Err(ChartError::AscendantUnresolved(Box::new(ChartError::UnknownSign(
            "Serpentarius".into()
        ))))
    );
}

#[test]
fn out_of_range_ascendant_degree_rejects_chart() {
    let snap = ChartSnapshot::new(ChartKind::WholeSign, RawBody::new("Leo", 30.0));
    assert_eq!(
        assemble(&snap),
        Err(ChartError::AscendantUnresolved(Box::new(ChartError::DegreeRange(30.0))))
    );
}

// ---------------------------------------------------------------------------
// End-to-end
// ---------------------------------------------------------------------------

#[test]
fn end_to_end_whole_sign() {
    let json = r#"{
        "chart": "D9",
        "chart_kind": "whole-sign",
        "ascendant": { "sign": "Scorpio", "degrees_in_sign": 2.28, "house": 8 },
        "planets": {
            "Sun": { "sign": "Taurus", "degrees_in_sign": 1.41, "house": 2,
                     "retro": false, "nakshatra": "Krittika", "pada": 2 }
        }
    }"#;
    let chart = assemble(&ChartSnapshot::from_json(json).unwrap()).unwrap();

    let sun = chart.locate(Graha::Surya.into()).unwrap();
    assert_eq!(sun.house, 2);
    assert_eq!(sun.sign, Rashi::Vrishabha);
    assert_eq!(sun.dms.degrees, 1);
    assert_eq!(sun.dms.minutes, 24);
    assert!((i32::from(sun.dms.seconds) - 36).abs() <= 1, "sec = {}", sun.dms.seconds);
    assert_eq!(sun.nakshatra, Some(json!("Krittika")));
    assert_eq!(sun.pada, Some(json!(2)));
    assert!(!sun.retrograde);

    let asc = chart.ascendant().unwrap();
    assert_eq!(asc.house, 8);
    assert_eq!(asc.dms.degrees, 2);
    assert_eq!(asc.dms.minutes, 16);

    assert!(chart.is_clean());
    assert_eq!(chart.label.as_deref(), Some("D9"));
}

#[test]
fn whole_sign_mismatched_hint_is_corrected_and_recorded() {
    let snap = ChartSnapshot::new(ChartKind::WholeSign, RawBody::new("Scorpio", 2.28).with_house(1))
        .with_planet("Sun", &RawBody::new("Taurus", 1.41).with_house(7));
    let chart = assemble(&snap).unwrap();
    assert_eq!(chart.ascendant().unwrap().house, 8);
    assert_eq!(chart.locate(Graha::Surya.into()).unwrap().house, 2);

    let mismatches: Vec<_> = chart
        .diagnostics
        .iter()
        .map(|d| (d.subject.clone(), d.error.clone()))
        .collect();
    assert_eq!(
        mismatches,
        [
            (
                "Ascendant".to_owned(),
                ChartError::SignHouseMismatch {
                    reported: 1,
                    computed: 8
                }
            ),
            (
                "Sun".to_owned(),
                ChartError::SignHouseMismatch {
                    reported: 7,
                    computed: 2
                }
            ),
        ]
    );
}

#[test]
fn output_serialization_shape() {
    let snap = ChartSnapshot::new(ChartKind::WholeSign, RawBody::new("Aries", 0.5))
        .with_planet("Rahu", &RawBody::new("Pisces", 29.999).with_retro(true))
        .with_planet("Pluto", &RawBody::new("Aries", 1.0));
    let chart = assemble(&snap).unwrap();
    let v = serde_json::to_value(&chart).unwrap();

    assert_eq!(v["kind"], "whole-sign");
    assert_eq!(v["houses"].as_array().unwrap().len(), 12);
    let rahu = &v["houses"][11]["bodies"][0];
    assert_eq!(rahu["body"], "Rahu");
    assert_eq!(rahu["sign"], "Pisces");
    assert_eq!(rahu["retrograde"], true);
    assert_eq!(rahu["dms"]["deg"], 29);
    assert_eq!(rahu["dms"]["min"], 59);
    assert_eq!(v["diagnostics"][0]["code"], "unknown_body");
    assert_eq!(v["diagnostics"][0]["outcome"], "excluded");
}
