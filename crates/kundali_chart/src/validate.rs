//! Structural checks on an assembled chart.

use std::collections::HashSet;

use crate::chart_types::{ChartKind, NormalizedChart};
use crate::error::ChartError;

/// Verify the guarantees every normalized chart makes to the rendering layer.
///
/// - houses are numbered 1..=12 in order
/// - every placed body appears once and records the house it sits in
/// - degrees within sign lie in [0, 30)
/// - whole-sign charts: house number equals sign number, for the cusps and
///   for every placed body
pub fn check_chart(chart: &NormalizedChart) -> Result<(), ChartError> {
    let mut seen = HashSet::new();

    for (i, house) in chart.houses.iter().enumerate() {
        let expected = i as u8 + 1;
        if house.number != expected {
            return Err(ChartError::Invariant(format!(
                "house at position {expected} numbered {}",
                house.number
            )));
        }
        if chart.kind == ChartKind::WholeSign && house.sign.number() != house.number {
            return Err(ChartError::Invariant(format!(
                "whole-sign house {} carries {}",
                house.number, house.sign
            )));
        }

        for placed in &house.bodies {
            if !seen.insert(placed.body) {
                return Err(ChartError::Invariant(format!("{} placed twice", placed.body)));
            }
            if placed.house != house.number {
                return Err(ChartError::Invariant(format!(
                    "{} records house {} but sits in house {}",
                    placed.body, placed.house, house.number
                )));
            }
            if !(0.0..30.0).contains(&placed.degrees_in_sign) {
                return Err(ChartError::Invariant(format!(
                    "{} has degree {} outside [0, 30)",
                    placed.body, placed.degrees_in_sign
                )));
            }
            if chart.kind == ChartKind::WholeSign && placed.sign.number() != placed.house {
                return Err(ChartError::Invariant(format!(
                    "{} in {} placed in whole-sign house {}",
                    placed.body, placed.sign, placed.house
                )));
            }
        }
    }
    Ok(())
}
