//! Temp-directory write performed relative to an open directory handle.

use std::env;
use std::path::{Path, PathBuf};

use cap_std::ambient_authority;
use cap_std::fs::Dir;
use capprobe_runner::{Probe, ProbeOutcome};
use tracing::debug;

use crate::PROBES_TARGET;
use crate::naming::unique_suffix;

/// Capability identifier reported by [`DirfdTmpWriteProbe`].
pub const DIRFD_TMP_WRITE_CAPABILITY: &str = "filesystem_tmp_write_dirfd";

const DIRFD_PAYLOAD: &str = "sandbox capability probe (dirfd)\n";

/// Opens the temp directory as a capability handle and writes through it.
///
/// Sandboxes that filter path-based `open` differently from `openat` show up
/// here rather than in [`super::TmpWriteProbe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirfdTmpWriteProbe {
    dir: PathBuf,
}

impl Default for DirfdTmpWriteProbe {
    fn default() -> Self {
        Self::in_dir(env::temp_dir())
    }
}

impl DirfdTmpWriteProbe {
    /// Writes into `dir` instead of the platform temp directory.
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the probe opens.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Probe for DirfdTmpWriteProbe {
    fn capability(&self) -> &'static str {
        DIRFD_TMP_WRITE_CAPABILITY
    }

    fn exercise(&self) -> ProbeOutcome {
        let shown = self.dir.display();
        let handle = match Dir::open_ambient_dir(&self.dir, ambient_authority()) {
            Ok(handle) => handle,
            Err(error) => {
                return ProbeOutcome::blocked_unexpected(format!(
                    "Unable to open '{shown}' as a directory handle: {error}"
                ));
            }
        };

        let name = format!("{DIRFD_TMP_WRITE_CAPABILITY}_{}.txt", unique_suffix());
        debug!(target: PROBES_TARGET, dir = %shown, file = %name, "writing through directory handle");
        if let Err(error) = handle.write(&name, DIRFD_PAYLOAD) {
            let _ = handle.remove_file(&name);
            return ProbeOutcome::blocked_unexpected(format!(
                "Write failed for '{}': {error}",
                self.dir.join(&name).display()
            ));
        }
        if let Err(error) = handle.remove_file(&name) {
            return ProbeOutcome::blocked_unexpected(format!(
                "Unable to remove '{}': {error}",
                self.dir.join(&name).display()
            ));
        }

        ProbeOutcome::supported(format!(
            "Temporary directory '{shown}' is writable through a directory handle"
        ))
    }
}
