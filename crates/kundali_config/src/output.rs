//! Output settings for the command-line harness.

use kundali_chart::SignNaming;
use serde::{Deserialize, Serialize};

/// How charts are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON, the shape the rendering layer consumes.
    #[default]
    Json,
    /// One line per house.
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Sign naming for text output. JSON always carries Western names.
    pub naming: SignNaming,
    /// Print diagnostics after each chart in text mode.
    pub show_diagnostics: bool,
}
