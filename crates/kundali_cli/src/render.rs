//! Text and JSON rendering of normalized charts.

use std::collections::BTreeMap;
use std::fmt::Write;

use kundali_chart::{ChartError, NormalizedChart, PlacedBody};
use kundali_config::OutputConfig;
use serde_json::{Map, Value, json};

/// One header line, one line per house, then diagnostics if requested.
pub fn chart_text(chart: &NormalizedChart, output: &OutputConfig) -> String {
    let mut out = String::new();
    let label = chart.label.as_deref().unwrap_or("chart");
    let _ = writeln!(out, "{label} ({})", chart.kind.tag());

    for house in &chart.houses {
        let mut parts = vec![
            format!("{:>2}", house.number),
            house.sign.display_name(output.naming).to_string(),
        ];
        if let Some(deg) = house.cusp_degrees {
            parts.push(format!("cusp {deg:.2}"));
        }
        if !house.is_empty() {
            let bodies: Vec<String> = house.bodies.iter().map(body_text).collect();
            parts.push(bodies.join(", "));
        }
        let _ = writeln!(out, "{}", parts.join("  "));
    }

    if output.show_diagnostics && !chart.diagnostics.is_empty() {
        out.push_str("diagnostics:\n");
        for d in &chart.diagnostics {
            let _ = writeln!(out, "  {d}");
        }
    }
    out
}

fn body_text(body: &PlacedBody) -> String {
    let retro = if body.retrograde { " R" } else { "" };
    format!("{} {}{retro}", body.body, body.dms)
}

/// Every chart of a bundle; failed charts print their error in place.
pub fn bundle_text(
    results: &BTreeMap<String, Result<NormalizedChart, ChartError>>,
    output: &OutputConfig,
) -> String {
    let blocks: Vec<String> = results
        .iter()
        .map(|(label, result)| match result {
            Ok(chart) => chart_text(chart, output),
            Err(e) => format!("{label}: error: {e}\n"),
        })
        .collect();
    blocks.join("\n")
}

/// Label -> chart, or label -> `{"error": {code, message}}`.
pub fn bundle_json(
    results: &BTreeMap<String, Result<NormalizedChart, ChartError>>,
) -> Result<Value, serde_json::Error> {
    let mut map = Map::new();
    for (label, result) in results {
        let value = match result {
            Ok(chart) => serde_json::to_value(chart)?,
            Err(e) => json!({ "error": { "code": e.code(), "message": e.to_string() } }),
        };
        map.insert(label.clone(), value);
    }
    Ok(Value::Object(map))
}
