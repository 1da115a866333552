//! Chart assembly: the single entry point from a service snapshot to the
//! 12-house structure the rendering layer draws.
//!
//! Every chart type (D1, D9, D10, ...) goes through the same path; the only
//! kind-specific step is the [`HousePolicy`] chosen from the snapshot's tag.
//!
//! A malformed planet degrades gracefully: it is excluded and a diagnostic
//! is recorded. A chart is rejected outright only when its ascendant cannot
//! be placed or its house cusps are unusable.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::bhava::{CuspTable, HousePolicy, policy_for};
use crate::chart_types::{NormalizeOptions, NormalizedChart, PlacedBody};
use crate::diagnostic::Diagnostic;
use crate::error::ChartError;
use crate::graha::{ALL_GRAHAS, ChartBody, Graha};
use crate::rashi::decompose;
use crate::snapshot::{CelestialBody, ChartBundle, ChartSnapshot, RawBody};
use crate::validate::check_chart;

/// Normalize one snapshot with default options.
pub fn assemble(snapshot: &ChartSnapshot) -> Result<NormalizedChart, ChartError> {
    assemble_with(snapshot, &NormalizeOptions::default())
}

/// Normalize one snapshot.
///
/// # Errors
/// - [`ChartError::AscendantUnresolved`] when the ascendant is missing,
///   malformed, or cannot be placed
/// - [`ChartError::InvalidCusps`] / [`ChartError::DuplicateCuspSign`] when a
///   quadrant chart's cusp list is unusable
/// - [`ChartError::Invariant`] if the assembled chart breaks a structural
///   guarantee (a bug, not a data problem)
pub fn assemble_with(
    snapshot: &ChartSnapshot,
    options: &NormalizeOptions,
) -> Result<NormalizedChart, ChartError> {
    let label = snapshot
        .chart
        .as_deref()
        .unwrap_or(snapshot.chart_kind.tag());
    let _span = tracing::debug_span!("assemble", chart = label).entered();

    let policy = policy_for(snapshot.chart_kind, options);
    let (cusps, mut diagnostics) = policy.cusps(snapshot)?;

    let mut houses = cusps.house_records();

    let ascendant = snapshot
        .ascendant
        .as_ref()
        .ok_or(ChartError::MissingField { field: "ascendant" })
        .and_then(|value| {
            RawBody::deserialize(value).map_err(|e| ChartError::MalformedBody(e.to_string()))
        })
        .and_then(|raw| place_body(ChartBody::Lagna, &raw, policy.as_ref(), &cusps, &mut diagnostics))
        .map_err(|e| ChartError::AscendantUnresolved(Box::new(e)))?;
    houses[(ascendant.house - 1) as usize].bodies.push(ascendant);

    for (graha, raw) in planets_in_order(snapshot, &mut diagnostics) {
        let body = ChartBody::Graha(graha);
        match place_body(body, &raw, policy.as_ref(), &cusps, &mut diagnostics) {
            Ok(placed) => houses[(placed.house - 1) as usize].bodies.push(placed),
            Err(e) => diagnostics.push(Diagnostic::excluded(body.name(), e)),
        }
    }

    let chart = NormalizedChart {
        label: snapshot.chart.clone(),
        kind: policy.kind(),
        houses,
        diagnostics,
    };
    check_chart(&chart)?;

    for d in &chart.diagnostics {
        d.log();
    }
    tracing::debug!(
        kind = chart.kind.tag(),
        placed = chart.placed_bodies().count(),
        diagnostics = chart.diagnostics.len(),
        "chart assembled"
    );
    Ok(chart)
}

/// Normalize every chart of a bundle independently.
///
/// A chart that fails does not affect the others; its slot holds the error.
/// Charts without their own label take the bundle key.
pub fn assemble_bundle(
    bundle: &ChartBundle,
    options: &NormalizeOptions,
) -> BTreeMap<String, Result<NormalizedChart, ChartError>> {
    bundle
        .charts
        .iter()
        .map(|(key, value)| {
            let result = ChartSnapshot::deserialize(value)
                .map_err(ChartError::from)
                .and_then(|mut snapshot| {
                    snapshot.chart.get_or_insert_with(|| key.clone());
                    assemble_with(&snapshot, options)
                });
            if let Err(e) = &result {
                tracing::warn!(chart = %key, code = e.code(), "chart unavailable: {e}");
            }
            (key.clone(), result)
        })
        .collect()
}

/// Validate, place, and decompose one body.
///
/// Recoverable notes go into `diagnostics` only when the body is actually
/// placed; a rejected body is reported by the caller.
fn place_body(
    body: ChartBody,
    raw: &RawBody,
    policy: &dyn HousePolicy,
    cusps: &CuspTable,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<PlacedBody, ChartError> {
    let (validated, notes) = CelestialBody::from_raw(body, raw)?;
    let placement = policy.place(&validated, cusps)?;
    let dms = decompose(validated.degrees_in_sign)?;

    for (outcome, e) in notes {
        diagnostics.push(Diagnostic::new(body.name(), outcome, e));
    }
    if let Some((outcome, e)) = placement.note {
        diagnostics.push(Diagnostic::new(body.name(), outcome, e));
    }

    Ok(PlacedBody {
        body,
        sign: validated.sign,
        house: placement.house,
        dms,
        degrees_in_sign: validated.degrees_in_sign,
        total_degree: validated.total_degree,
        retrograde: validated.retrograde,
        nakshatra: validated.nakshatra,
        pada: validated.pada,
    })
}

/// Resolve planet keys and return entries in canonical graha order.
///
/// Unknown keys, a second key for an already-claimed graha (e.g. both "Sun"
/// and "Surya"), and entries that are not body objects are excluded here.
/// Keys are visited in sorted order, so the first claimant is deterministic.
fn planets_in_order(
    snapshot: &ChartSnapshot,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<(Graha, RawBody)> {
    let mut claimed = [false; 9];
    let mut slots: [Option<RawBody>; 9] = std::array::from_fn(|_| None);

    for (key, value) in &snapshot.planets {
        let Some(graha) = Graha::from_name(key) else {
            diagnostics.push(Diagnostic::excluded(key.as_str(), ChartError::UnknownBody(key.clone())));
            continue;
        };
        let i = graha.index() as usize;
        if claimed[i] {
            diagnostics.push(Diagnostic::excluded(
                key.as_str(),
                ChartError::DuplicateBody(graha.english_name().to_owned()),
            ));
            continue;
        }
        claimed[i] = true;
        match RawBody::deserialize(value) {
            Ok(raw) => slots[i] = Some(raw),
            Err(e) => diagnostics.push(Diagnostic::excluded(
                key.as_str(),
                ChartError::MalformedBody(e.to_string()),
            )),
        }
    }

    ALL_GRAHAS
        .iter()
        .zip(slots)
        .filter_map(|(g, raw)| raw.map(|r| (*g, r)))
        .collect()
}
