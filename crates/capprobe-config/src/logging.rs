//! Log output selection for probe processes.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How a probe renders its stderr diagnostics.
///
/// Parsed case-insensitively from `PROBE_LOG_FORMAT`.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per event, for harnesses that collect probe stderr.
    Json,
    /// Single-line text for operators running a probe by hand.
    #[default]
    Compact,
}

impl LogFormat {
    /// Returns true when events are emitted as JSON.
    #[must_use]
    pub const fn is_structured(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Error returned when `PROBE_LOG_FORMAT` names an unknown format.
pub type LogFormatParseError = strum::ParseError;
