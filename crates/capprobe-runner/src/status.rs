//! Outcome vocabulary shared by every probe.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Classification of an attempted sandbox action.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProbeStatus {
    /// The action succeeded and the sandbox is expected to permit it.
    Supported,
    /// The action was prevented and the sandbox is expected to prevent it.
    BlockedExpected,
    /// The observed behaviour contradicts the sandbox policy, whether through
    /// an unexpected failure or an unexpected success.
    BlockedUnexpected,
}

impl ProbeStatus {
    /// Returns true when the status reflects the intended sandbox policy.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Supported | Self::BlockedExpected)
    }

    /// Process exit code reported for this status.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        if self.is_success() { 0 } else { 1 }
    }
}

/// Value returned by a probe's exercise step.
///
/// OS failures observed while exercising a capability are folded into the
/// detail text; the status carries the classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    status: ProbeStatus,
    detail: String,
}

impl ProbeOutcome {
    /// Creates an outcome with an explicit status.
    #[must_use]
    pub fn new(status: ProbeStatus, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    /// The action succeeded as expected.
    #[must_use]
    pub fn supported(detail: impl Into<String>) -> Self {
        Self::new(ProbeStatus::Supported, detail)
    }

    /// The action was prevented, matching the sandbox policy.
    #[must_use]
    pub fn blocked_expected(detail: impl Into<String>) -> Self {
        Self::new(ProbeStatus::BlockedExpected, detail)
    }

    /// The outcome contradicts the sandbox policy.
    #[must_use]
    pub fn blocked_unexpected(detail: impl Into<String>) -> Self {
        Self::new(ProbeStatus::BlockedUnexpected, detail)
    }

    /// Classification of the outcome.
    #[must_use]
    pub const fn status(&self) -> ProbeStatus {
        self.status
    }

    /// Human-readable explanation.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Splits the outcome into its status and detail.
    #[must_use]
    pub fn into_parts(self) -> (ProbeStatus, String) {
        (self.status, self.detail)
    }
}
