//! Artifact path resolution and persistence.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use capprobe_config::ProbeConfig;
use thiserror::Error;
use tracing::{debug, error};

use crate::RUNNER_TARGET;
use crate::result::ProbeResult;

/// Exit code used when the artifact itself could not be written.
///
/// Kept distinct from the classification codes so infrastructure failures
/// are never mistaken for sandbox signal.
pub const EXIT_INFRASTRUCTURE_FAILURE: u8 = 3;

/// Errors raised while writing a probe artifact.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Creating the artifact's parent directory failed.
    #[error("failed to create artifact directory '{path}': {source}")]
    CreateDirectory {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },
    /// The result could not be encoded as JSON.
    #[error("failed to serialise probe result: {0}")]
    Serialise(#[source] serde_json::Error),
    /// Writing the artifact file failed.
    #[error("failed to write artifact '{path}': {source}")]
    Write {
        /// Artifact path.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },
}

/// Chooses where the artifact for `capability` is written.
///
/// An explicit override always wins. Otherwise the artifact lands at
/// `artifacts/<id>.json`, where `<id>` is the configured probe identifier or,
/// failing that, the capability name. The path is not checked for safety.
#[must_use]
pub fn resolve_output_path(
    capability: &str,
    override_path: Option<&Path>,
    config: &ProbeConfig,
) -> PathBuf {
    match override_path {
        Some(path) => path.to_path_buf(),
        None => config.default_artifact_path(capability),
    }
}

/// Writes `result` to `path` as indented JSON and returns the exit code.
///
/// Parent directories are created as needed. Non-ASCII text is written as
/// `\uXXXX` escapes so artifacts are plain ASCII. The exit code is `0` for
/// `supported` and `blocked_expected`, and `1` for `blocked_unexpected`.
///
/// # Errors
///
/// Returns [`PersistError`] when the directory or file cannot be written.
pub fn persist(result: &ProbeResult, path: &Path) -> Result<u8, PersistError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| PersistError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let pretty = serde_json::to_string_pretty(result).map_err(PersistError::Serialise)?;
    let mut payload = escape_non_ascii(&pretty);
    payload.push('\n');
    fs::write(path, payload).map_err(|source| PersistError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        target: RUNNER_TARGET,
        capability = result.capability(),
        artifact = %path.display(),
        "artifact written"
    );
    Ok(result.status().exit_code())
}

/// Replaces every non-ASCII character with its UTF-16 `\u` escapes.
///
/// Serialised JSON only carries non-ASCII inside string literals, where the
/// escaped form decodes to the same text.
fn escape_non_ascii(json: &str) -> String {
    let mut escaped = String::with_capacity(json.len());
    for ch in json.chars() {
        if ch.is_ascii() {
            escaped.push(ch);
            continue;
        }
        let mut units = [0_u16; 2];
        for unit in ch.encode_utf16(&mut units) {
            escaped.push_str(&format!("\\u{unit:04x}"));
        }
    }
    escaped
}

/// Persists `result` and terminates the process with the mapped exit code.
///
/// When the artifact cannot be written the failure is reported on stderr and
/// the process exits with [`EXIT_INFRASTRUCTURE_FAILURE`].
pub fn emit(result: &ProbeResult, path: &Path) -> ! {
    let code = match persist(result, path) {
        Ok(code) => code,
        Err(persist_error) => {
            error!(
                target: RUNNER_TARGET,
                capability = result.capability(),
                error = %persist_error,
                "failed to persist probe result"
            );
            let _ = writeln!(io::stderr(), "{persist_error}");
            EXIT_INFRASTRUCTURE_FAILURE
        }
    };
    process::exit(i32::from(code))
}
