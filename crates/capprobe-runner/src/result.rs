//! The machine-readable record written by every probe.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::status::{ProbeOutcome, ProbeStatus};

/// Errors raised when a result would violate its invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidResult {
    /// The capability identifier was empty.
    #[error("probe results require a non-empty capability")]
    EmptyCapability,
    /// The detail text was empty.
    #[error("probe results require a non-empty detail")]
    EmptyDetail,
}

/// Result of a single probe run.
///
/// Serialises as `{ "capability": ..., "status": ..., "detail": ... }`.
/// Deserialising an artifact applies the same validation as [`ProbeResult::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProbeResult")]
pub struct ProbeResult {
    capability: String,
    status: ProbeStatus,
    detail: String,
}

#[derive(Deserialize)]
struct RawProbeResult {
    capability: String,
    status: ProbeStatus,
    detail: String,
}

impl TryFrom<RawProbeResult> for ProbeResult {
    type Error = InvalidResult;

    fn try_from(raw: RawProbeResult) -> Result<Self, Self::Error> {
        Self::from_parts(raw.capability, raw.status, raw.detail)
    }
}

impl ProbeResult {
    /// Wraps a probe outcome with the capability it exercised.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidResult`] when the capability or detail is blank.
    pub fn new(capability: impl Into<String>, outcome: ProbeOutcome) -> Result<Self, InvalidResult> {
        let (status, detail) = outcome.into_parts();
        Self::from_parts(capability.into(), status, detail)
    }

    /// Builds a result from its individual fields.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidResult`] when the capability or detail is blank.
    pub fn from_parts(
        capability: String,
        status: ProbeStatus,
        detail: String,
    ) -> Result<Self, InvalidResult> {
        if capability.trim().is_empty() {
            return Err(InvalidResult::EmptyCapability);
        }
        if detail.trim().is_empty() {
            return Err(InvalidResult::EmptyDetail);
        }
        Ok(Self {
            capability,
            status,
            detail,
        })
    }

    /// Capability identifier, for example `filesystem_tmp_write`.
    #[must_use]
    pub fn capability(&self) -> &str {
        &self.capability
    }

    /// Outcome classification.
    #[must_use]
    pub const fn status(&self) -> ProbeStatus {
        self.status
    }

    /// Human-readable explanation of the observed outcome.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }
}
