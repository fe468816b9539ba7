//! Probe that spawns a child process.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use capprobe_runner::{Probe, ProbeOutcome};
use tracing::debug;

use crate::PROBES_TARGET;
use crate::naming::describe_io_failure;

/// Capability identifier reported by [`SpawnProbe`].
pub const SPAWN_CAPABILITY: &str = "process_basic_spawn";

/// Program launched by the default probe.
pub const SPAWN_PROGRAM: &str = "/bin/echo";

/// Argument passed to [`SPAWN_PROGRAM`].
pub const SPAWN_ARGUMENT: &str = "capability-probe";

/// Spawns a fixed command and requires it to exit cleanly.
///
/// A missing executable, a permission failure or a non-zero exit status are
/// all reported as `blocked_unexpected`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnProbe {
    program: PathBuf,
    args: Vec<String>,
}

impl Default for SpawnProbe {
    fn default() -> Self {
        Self::with_command(SPAWN_PROGRAM, [SPAWN_ARGUMENT])
    }
}

impl SpawnProbe {
    /// Spawns `program` with `args` instead of the default command.
    #[must_use]
    pub fn with_command<I, S>(program: impl Into<PathBuf>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Program the probe launches.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn rendered_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }

    fn spawn_failure(&self, error: &io::Error) -> ProbeOutcome {
        let detail = match error.kind() {
            io::ErrorKind::NotFound => format!(
                "Spawn failed; '{}' missing: {error}",
                self.program.display()
            ),
            io::ErrorKind::PermissionDenied => format!("Spawn blocked by permissions: {error}"),
            _ => describe_io_failure(&format!("spawning '{}'", self.rendered_command()), error),
        };
        ProbeOutcome::blocked_unexpected(detail)
    }
}

impl Probe for SpawnProbe {
    fn capability(&self) -> &'static str {
        SPAWN_CAPABILITY
    }

    fn exercise(&self) -> ProbeOutcome {
        let command = self.rendered_command();
        debug!(target: PROBES_TARGET, %command, "spawning child process");

        let output = match Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .output()
        {
            Ok(output) => output,
            Err(error) => return self.spawn_failure(&error),
        };

        if !output.status.success() {
            let code = output
                .status
                .code()
                .map_or_else(|| String::from("a signal"), |code| code.to_string());
            let stderr = String::from_utf8_lossy(&output.stderr);
            return ProbeOutcome::blocked_unexpected(format!(
                "Child process exited with {code}: {}",
                stderr.trim()
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        ProbeOutcome::supported(format!(
            "Spawned '{command}' and received: {}",
            stdout.trim()
        ))
    }
}
