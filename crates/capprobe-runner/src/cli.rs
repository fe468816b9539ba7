//! Command-line arguments shared by every probe binary.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::{CommandFactory, FromArgMatches, Parser};

/// Command-line interface accepted by each probe.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(version)]
pub struct ProbeArgs {
    /// Where to write the machine-readable probe result
    /// [default: artifacts/<PROBE_ID or capability>.json].
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
}

impl ProbeArgs {
    /// Parses `args` for the named capability, exiting on usage errors.
    ///
    /// Invalid arguments terminate the process with clap's usage exit code.
    #[must_use]
    pub fn parse_for<I, T>(capability: &'static str, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_for(capability, args).unwrap_or_else(|error| error.exit())
    }

    /// Parses `args` for the named capability.
    ///
    /// # Errors
    ///
    /// Returns the [`clap::Error`] describing unknown or malformed arguments,
    /// including the help and version requests.
    pub fn try_parse_for<I, T>(capability: &'static str, args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command()
            .name(capability)
            .about(format!("Capability probe for '{capability}'"))
            .try_get_matches_from(args)?;
        Self::from_arg_matches(&matches)
    }

    /// Builds arguments carrying an explicit output override.
    #[must_use]
    pub fn with_output(output: impl Into<PathBuf>) -> Self {
        Self {
            output: Some(output.into()),
        }
    }

    /// Output override supplied on the command line.
    #[must_use]
    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}
