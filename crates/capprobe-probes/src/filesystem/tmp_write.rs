//! Baseline probe for writes into the platform temp directory.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use capprobe_runner::{Probe, ProbeOutcome};
use tracing::debug;

use super::PROBE_PAYLOAD;
use crate::PROBES_TARGET;
use crate::naming::{describe_io_failure, unique_suffix};

/// Capability identifier reported by [`TmpWriteProbe`].
pub const TMP_WRITE_CAPABILITY: &str = "filesystem_tmp_write";

/// Writes and removes a scratch file in the temp directory.
///
/// Temp-directory writes are a baseline expectation, so any failure is
/// reported as `blocked_unexpected`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmpWriteProbe {
    dir: PathBuf,
}

impl Default for TmpWriteProbe {
    fn default() -> Self {
        Self::in_dir(env::temp_dir())
    }
}

impl TmpWriteProbe {
    /// Writes into `dir` instead of the platform temp directory.
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the probe writes into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Probe for TmpWriteProbe {
    fn capability(&self) -> &'static str {
        TMP_WRITE_CAPABILITY
    }

    fn exercise(&self) -> ProbeOutcome {
        let probe_file = self
            .dir
            .join(format!("capability_probe_{}.txt", unique_suffix()));
        debug!(target: PROBES_TARGET, path = %probe_file.display(), "writing temp file");

        match fs::write(&probe_file, PROBE_PAYLOAD).and_then(|()| fs::remove_file(&probe_file)) {
            Ok(()) => ProbeOutcome::supported(format!(
                "Temporary directory '{}' is writable",
                self.dir.display()
            )),
            Err(error) => ProbeOutcome::blocked_unexpected(describe_io_failure(
                &format!("writing to '{}'", self.dir.display()),
                &error,
            )),
        }
    }
}
