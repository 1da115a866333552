//! Structured diagnostics attached to a normalized chart.
//!
//! A diagnostic records one correction or exclusion made while assembling,
//! so upstream data problems stay inspectable in a debug view instead of
//! being fixed up silently.

use std::fmt::{Display, Formatter};

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::error::ChartError;

/// What the assembler did about a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The subject was left out of the chart.
    Excluded,
    /// An upstream value was overridden by the computed one.
    Corrected,
    /// The subject was placed by its upstream house number.
    Fallback { house: u8 },
    /// Recorded only; output unaffected.
    Noted,
}

impl Outcome {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excluded => "excluded",
            Self::Corrected => "corrected",
            Self::Fallback { .. } => "fallback",
            Self::Noted => "noted",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Body name, planet key, or "house N".
    pub subject: String,
    pub outcome: Outcome,
    pub error: ChartError,
}

impl Diagnostic {
    pub fn new(subject: impl Into<String>, outcome: Outcome, error: ChartError) -> Self {
        Self {
            subject: subject.into(),
            outcome,
            error,
        }
    }

    pub fn excluded(subject: impl Into<String>, error: ChartError) -> Self {
        Self::new(subject, Outcome::Excluded, error)
    }

    pub fn is_exclusion(&self) -> bool {
        self.outcome == Outcome::Excluded
    }

    /// Emit through `tracing`: exclusions at warn, everything else at debug.
    pub(crate) fn log(&self) {
        if self.is_exclusion() {
            tracing::warn!(
                subject = %self.subject,
                code = self.error.code(),
                "excluded: {}",
                self.error
            );
        } else {
            tracing::debug!(
                subject = %self.subject,
                outcome = self.outcome.label(),
                code = self.error.code(),
                "{}",
                self.error
            );
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.outcome {
            Outcome::Fallback { house } => {
                write!(f, "{}: {} -> house {house}", self.subject, self.error)
            }
            other => write!(f, "{}: {} ({})", self.subject, self.error, other.label()),
        }
    }
}

impl Serialize for Diagnostic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fallback_house = match self.outcome {
            Outcome::Fallback { house } => Some(house),
            _ => None,
        };
        let mut s = serializer.serialize_struct("Diagnostic", 5)?;
        s.serialize_field("subject", &self.subject)?;
        s.serialize_field("outcome", self.outcome.label())?;
        s.serialize_field("house", &fallback_house)?;
        s.serialize_field("code", self.error.code())?;
        s.serialize_field("message", &self.error.to_string())?;
        s.end()
    }
}
