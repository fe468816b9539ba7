use std::path::PathBuf;

use crate::logging::LogFormat;

/// Environment variable naming the probe specimen being executed.
pub const PROBE_ID_ENV: &str = "PROBE_ID";

/// Environment variable holding the tracing filter expression.
pub const LOG_FILTER_ENV: &str = "PROBE_LOG";

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "PROBE_LOG_FORMAT";

/// Directory, relative to the working directory, that receives artifacts.
pub const DEFAULT_ARTIFACT_DIR: &str = "artifacts";

/// Default log filter expression used by the probes.
///
/// Probes keep stderr quiet unless something goes wrong.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Default log filter expression used by the probes.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Default logging format for the probes.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Directory that receives artifacts when no `--output` override is given.
#[must_use]
pub fn default_artifact_dir() -> PathBuf {
    PathBuf::from(DEFAULT_ARTIFACT_DIR)
}
