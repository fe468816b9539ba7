//! Shared configuration for the capability probes.
//!
//! Probes read a handful of environment variables: the specimen identifier
//! used to name artifacts and the logging controls. Rather than consulting
//! the process environment at the point of use, callers take a single
//! [`ProbeConfig`] snapshot at startup and pass it down explicitly. Tests
//! build the snapshot from an in-memory lookup through
//! [`ProbeConfig::from_lookup`] so they never touch global state.

mod defaults;
mod logging;

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use thiserror::Error;

pub use defaults::{
    DEFAULT_ARTIFACT_DIR, DEFAULT_LOG_FILTER, LOG_FILTER_ENV, LOG_FORMAT_ENV, PROBE_ID_ENV,
    default_artifact_dir, default_log_filter, default_log_format,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Errors raised while reading probe configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The variable was set but did not hold valid unicode.
    #[error("environment variable {key} must be valid unicode")]
    NotUnicode {
        /// Name of the offending variable.
        key: &'static str,
    },
    /// The log format variable named an unknown format.
    #[error("invalid PROBE_LOG_FORMAT value '{value}': {source}")]
    LogFormat {
        /// Raw value supplied by the caller.
        value: String,
        /// Parser failure reported by `strum`.
        #[source]
        source: LogFormatParseError,
    },
}

/// Snapshot of the configuration a probe needs at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    probe_id: Option<String>,
    log_filter: String,
    log_format: LogFormat,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            probe_id: None,
            log_filter: default_log_filter().to_owned(),
            log_format: default_log_format(),
        }
    }
}

impl ProbeConfig {
    /// Reads the configuration from the current process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds non-unicode data or the
    /// log format is not recognised.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var_os(key))
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Empty and whitespace-only values are treated as unset. Other values
    /// are kept exactly as given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds non-unicode data or the
    /// log format is not recognised.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let probe_id = read_var(&lookup, PROBE_ID_ENV)?;
        let log_filter =
            read_var(&lookup, LOG_FILTER_ENV)?.unwrap_or_else(|| default_log_filter().to_owned());
        let log_format = match read_var(&lookup, LOG_FORMAT_ENV)? {
            Some(value) => value
                .trim()
                .parse::<LogFormat>()
                .map_err(|source| ConfigError::LogFormat { value, source })?,
            None => default_log_format(),
        };

        Ok(Self {
            probe_id,
            log_filter,
            log_format,
        })
    }

    /// Replaces the specimen identifier. A blank identifier clears it.
    #[must_use]
    pub fn with_probe_id(mut self, probe_id: impl Into<String>) -> Self {
        self.probe_id = non_blank(probe_id.into());
        self
    }

    /// Specimen identifier supplied by the harness, if any.
    #[must_use]
    pub fn probe_id(&self) -> Option<&str> {
        self.probe_id.as_deref()
    }

    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Selected log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Name used for the artifact file: the specimen identifier when one is
    /// configured, otherwise the capability under test.
    #[must_use]
    pub fn artifact_stem<'a>(&'a self, capability: &'a str) -> &'a str {
        self.probe_id().unwrap_or(capability)
    }

    /// Default artifact location, `artifacts/<stem>.json`.
    #[must_use]
    pub fn default_artifact_path(&self, capability: &str) -> PathBuf {
        default_artifact_dir().join(format!("{}.json", self.artifact_stem(capability)))
    }
}

fn read_var<F>(lookup: &F, key: &'static str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Option<OsString>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let value = raw
        .into_string()
        .map_err(|_| ConfigError::NotUnicode { key })?;
    Ok(non_blank(value))
}

fn non_blank(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::Path;

    use rstest::rstest;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ProbeConfig, ConfigError> {
        let vars: HashMap<String, OsString> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), OsString::from(value)))
            .collect();
        ProbeConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = config_from(&[]).expect("empty environment should load");
        assert_eq!(config, ProbeConfig::default());
        assert_eq!(config.log_filter(), DEFAULT_LOG_FILTER);
        assert_eq!(config.log_format(), LogFormat::Compact);
        assert!(config.probe_id().is_none());
    }

    #[rstest]
    #[case::unset(&[], "artifacts/demo_capability.json")]
    #[case::blank(&[(PROBE_ID_ENV, "  ")], "artifacts/demo_capability.json")]
    #[case::specimen(&[(PROBE_ID_ENV, "core__demo__specimen")], "artifacts/core__demo__specimen.json")]
    #[case::padded(&[(PROBE_ID_ENV, " spaced id ")], "artifacts/ spaced id .json")]
    fn default_artifact_path_prefers_probe_id(
        #[case] pairs: &[(&str, &str)],
        #[case] expected: &str,
    ) {
        let config = config_from(pairs).expect("environment should load");
        assert_eq!(
            config.default_artifact_path("demo_capability"),
            Path::new(expected)
        );
    }

    #[rstest]
    #[case("json", LogFormat::Json)]
    #[case("JSON", LogFormat::Json)]
    #[case("compact", LogFormat::Compact)]
    fn parses_log_format(#[case] raw: &str, #[case] expected: LogFormat) {
        let config = config_from(&[(LOG_FORMAT_ENV, raw)]).expect("format should parse");
        assert_eq!(config.log_format(), expected);
    }

    #[test]
    fn rejects_unknown_log_format() {
        let error = config_from(&[(LOG_FORMAT_ENV, "yaml")]).expect_err("yaml is not supported");
        assert!(matches!(error, ConfigError::LogFormat { ref value, .. } if value == "yaml"));
        assert!(error.to_string().contains("PROBE_LOG_FORMAT"));
    }

    #[test]
    fn reads_log_filter() {
        let config =
            config_from(&[(LOG_FILTER_ENV, "capprobe=debug")]).expect("filter should load");
        assert_eq!(config.log_filter(), "capprobe=debug");
    }

    #[cfg(unix)]
    #[test]
    fn rejects_non_unicode_values() {
        use std::os::unix::ffi::OsStringExt;

        let error = ProbeConfig::from_lookup(|key| {
            (key == PROBE_ID_ENV).then(|| OsString::from_vec(vec![0x66, 0xff, 0x6f]))
        })
        .expect_err("invalid unicode should be rejected");
        assert!(matches!(error, ConfigError::NotUnicode { key } if key == PROBE_ID_ENV));
    }

    #[test]
    fn explicit_probe_id_overrides_capability() {
        let config = ProbeConfig::default().with_probe_id("fuzz__tmp_write__0001");
        assert_eq!(config.artifact_stem("filesystem_tmp_write"), "fuzz__tmp_write__0001");
    }

    #[rstest]
    #[case::blank("   ", None)]
    #[case::padded(" spaced id ", Some(" spaced id "))]
    fn explicit_probe_id_follows_environment_rules(
        #[case] raw: &str,
        #[case] expected: Option<&str>,
    ) {
        let from_env = config_from(&[(PROBE_ID_ENV, raw)]).expect("environment should load");
        let explicit = ProbeConfig::default().with_probe_id(raw);
        assert_eq!(from_env.probe_id(), expected);
        assert_eq!(explicit.probe_id(), expected);
    }
}
