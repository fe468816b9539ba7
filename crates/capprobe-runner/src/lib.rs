//! Result protocol and entry point shared by every capability probe.
//!
//! A probe attempts one sandboxed operating-system action and classifies
//! what happened as a [`ProbeStatus`]. This crate owns everything around that
//! classification:
//!
//! - the [`ProbeResult`] record and its JSON artifact shape,
//! - [`resolve_output_path`], which picks `artifacts/<id>.json` unless the
//!   caller overrides it,
//! - [`persist`] and [`emit`], which write the artifact and map the status to
//!   the process exit code,
//! - [`launch`], the `main` body used by every probe binary.
//!
//! ```rust,no_run
//! use capprobe_runner::{Probe, ProbeOutcome};
//!
//! struct AlwaysSupported;
//!
//! impl Probe for AlwaysSupported {
//!     fn capability(&self) -> &'static str {
//!         "demo_capability"
//!     }
//!
//!     fn exercise(&self) -> ProbeOutcome {
//!         ProbeOutcome::supported("nothing to block")
//!     }
//! }
//!
//! fn main() {
//!     capprobe_runner::launch(&AlwaysSupported)
//! }
//! ```

mod artifact;
mod cli;
mod result;
mod status;
pub mod telemetry;

use std::io::{self, Write};
use std::process;

use capprobe_config::ProbeConfig;
use tracing::{info, warn};

pub use artifact::{EXIT_INFRASTRUCTURE_FAILURE, PersistError, emit, persist, resolve_output_path};
pub use cli::ProbeArgs;
pub use result::{InvalidResult, ProbeResult};
pub use status::{ProbeOutcome, ProbeStatus};

/// Tracing target used by the runner.
pub const RUNNER_TARGET: &str = "capprobe::runner";

/// Exit code used when the environment configuration is unusable.
///
/// Matches the code clap uses for command-line usage errors.
pub const EXIT_USAGE: u8 = 2;

/// A single capability probe.
pub trait Probe {
    /// Identifier of the capability under test, for example
    /// `filesystem_tmp_write`.
    fn capability(&self) -> &'static str;

    /// Attempts the action and classifies the observed behaviour.
    fn exercise(&self) -> ProbeOutcome;
}

/// Exercises `probe` and wraps the outcome with its capability name.
///
/// # Errors
///
/// Returns [`InvalidResult`] when the probe reports a blank detail or
/// capability.
pub fn evaluate<P>(probe: &P) -> Result<ProbeResult, InvalidResult>
where
    P: Probe + ?Sized,
{
    let capability = probe.capability();
    let outcome = probe.exercise();
    let status = outcome.status();
    if status.is_success() {
        info!(
            target: RUNNER_TARGET,
            capability,
            status = %status,
            detail = outcome.detail(),
            "probe exercised"
        );
    } else {
        warn!(
            target: RUNNER_TARGET,
            capability,
            status = %status,
            detail = outcome.detail(),
            "probe contradicted the sandbox policy"
        );
    }
    ProbeResult::new(capability, outcome)
}

/// Runs `probe` as the whole process and exits.
///
/// Parses `--output`, reads the environment once, installs telemetry,
/// exercises the probe and hands the result to [`emit`].
pub fn launch<P>(probe: &P) -> !
where
    P: Probe + ?Sized,
{
    let capability = probe.capability();
    let args = ProbeArgs::parse_for(capability, std::env::args_os());
    let config = match ProbeConfig::from_env() {
        Ok(config) => config,
        Err(error) => abort(EXIT_USAGE, &error),
    };
    if let Err(error) = telemetry::initialise(&config) {
        abort(EXIT_USAGE, &error);
    }

    let result = match evaluate(probe) {
        Ok(result) => result,
        Err(error) => abort(EXIT_INFRASTRUCTURE_FAILURE, &error),
    };
    let path = resolve_output_path(capability, args.output(), &config);
    emit(&result, &path)
}

fn abort(code: u8, error: &dyn std::error::Error) -> ! {
    let _ = writeln!(io::stderr(), "{error}");
    process::exit(i32::from(code))
}
