//! Structured logging for probe processes.
//!
//! Logs always go to stderr so they never mix with the JSON artifact or the
//! output of a spawned child. The filter defaults to `warn`, so a probe that
//! classifies its action as expected writes nothing at all; only a
//! `blocked_unexpected` outcome or an infrastructure failure reaches stderr
//! unless `PROBE_LOG` asks for more.

use std::io::{self, IsTerminal};

use capprobe_config::{LogFormat, ProbeConfig};
use once_cell::sync::OnceCell;
use tracing::{Subscriber, debug, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use crate::RUNNER_TARGET;

static TELEMETRY_GUARD: OnceCell<()> = OnceCell::new();

type BoxedSubscriber = Box<dyn Subscriber + Send + Sync>;

/// Proof that the probe's subscriber is installed.
#[derive(Debug, Default, Clone, Copy)]
pub struct TelemetryHandle;

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// `PROBE_LOG` is not a valid filter expression.
    #[error("invalid PROBE_LOG filter: {0}")]
    Filter(String),
    /// Another global subscriber is already installed.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Installs the stderr subscriber described by `config` on first use.
///
/// Later calls are no-ops, so tests and `launch` may both call it.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the filter expression is invalid or a
/// different subscriber has already been installed.
pub fn initialise(config: &ProbeConfig) -> Result<TelemetryHandle, TelemetryError> {
    TELEMETRY_GUARD.get_or_try_init(|| {
        let filter = EnvFilter::try_new(config.log_filter())
            .map_err(|error| TelemetryError::Filter(error.to_string()))?;
        tracing::subscriber::set_global_default(stderr_subscriber(filter, config.log_format()))
            .map_err(TelemetryError::Subscriber)?;
        debug!(
            target: RUNNER_TARGET,
            filter = config.log_filter(),
            format = %config.log_format(),
            "telemetry installed"
        );
        Ok(())
    })?;
    Ok(TelemetryHandle)
}

fn stderr_subscriber(filter: EnvFilter, format: LogFormat) -> BoxedSubscriber {
    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    if format.is_structured() {
        // Harnesses parse these lines; colour codes would corrupt them.
        Box::new(builder.json().flatten_event(true).with_ansi(false).finish())
    } else {
        Box::new(builder.compact().with_ansi(io::stderr().is_terminal()).finish())
    }
}
