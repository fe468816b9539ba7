//! Guardrail probe for writes into a root-owned directory.

use std::fs;
use std::path::{Path, PathBuf};

use capprobe_runner::{Probe, ProbeOutcome};
use tracing::{debug, warn};

use super::PROBE_PAYLOAD;
use crate::PROBES_TARGET;
use crate::naming::describe_io_failure;

/// Capability identifier reported by [`RootWriteProbe`].
pub const ROOT_WRITE_CAPABILITY: &str = "filesystem_root_write";

/// Guard file the probe attempts to create.
pub const ROOT_WRITE_TARGET: &str = "/var/root/capability_probe_guardrail.txt";

/// Attempts to write into a privileged directory.
///
/// The sandbox must refuse the write, so every failure is
/// `blocked_expected`. A missing parent directory counts as a refusal too,
/// because the privileged action cannot even be attempted. A successful write
/// is a regression: the file is removed and the probe reports
/// `blocked_unexpected`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootWriteProbe {
    target: PathBuf,
}

impl Default for RootWriteProbe {
    fn default() -> Self {
        Self::with_target(ROOT_WRITE_TARGET)
    }
}

impl RootWriteProbe {
    /// Targets a different guard file.
    #[must_use]
    pub fn with_target(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// Guard file the probe writes.
    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Parent directory known not to exist. An unreadable parent is not
    /// absent; the write attempt reports the real error instead.
    fn absent_parent(&self) -> Option<&Path> {
        self.target.parent().filter(|parent| {
            !parent.as_os_str().is_empty() && matches!(parent.try_exists(), Ok(false))
        })
    }
}

impl Probe for RootWriteProbe {
    fn capability(&self) -> &'static str {
        ROOT_WRITE_CAPABILITY
    }

    fn exercise(&self) -> ProbeOutcome {
        if let Some(parent) = self.absent_parent() {
            return ProbeOutcome::blocked_expected(format!(
                "Directory '{}' is absent; privileged writes cannot even be attempted",
                parent.display()
            ));
        }

        let shown = self.target.display();
        debug!(target: PROBES_TARGET, path = %shown, "attempting privileged write");
        if let Err(error) = fs::write(&self.target, PROBE_PAYLOAD) {
            return ProbeOutcome::blocked_expected(describe_io_failure(
                &format!("writing to '{shown}'"),
                &error,
            ));
        }

        if let Err(error) = fs::remove_file(&self.target) {
            warn!(
                target: PROBES_TARGET,
                path = %shown,
                %error,
                "failed to remove guard file after unexpected write"
            );
        }
        ProbeOutcome::blocked_unexpected("Unexpectedly wrote to a privileged directory")
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use capprobe_runner::ProbeStatus;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::*;

    #[fixture]
    fn temp_dir() -> TempDir {
        TempDir::new().expect("failed to allocate temporary directory")
    }

    #[rstest]
    fn absent_parent_is_an_expected_block(temp_dir: TempDir) {
        let parent = temp_dir.path().join("root");
        let probe = RootWriteProbe::with_target(parent.join("guard.txt"));

        let outcome = probe.exercise();

        assert_eq!(outcome.status(), ProbeStatus::BlockedExpected);
        assert_eq!(
            outcome.detail(),
            format!(
                "Directory '{}' is absent; privileged writes cannot even be attempted",
                parent.display()
            )
        );
    }

    #[rstest]
    fn failed_write_is_an_expected_block(temp_dir: TempDir) {
        let blocker = temp_dir.path().join("root");
        fs::write(&blocker, "regular file").expect("write blocker");
        let probe = RootWriteProbe::with_target(blocker.join("guard.txt"));

        let outcome = probe.exercise();

        assert_eq!(outcome.status(), ProbeStatus::BlockedExpected);
        assert!(
            outcome.detail().starts_with("OS error while writing to '"),
            "unexpected detail: {}",
            outcome.detail()
        );
    }

    #[cfg(unix)]
    #[rstest]
    fn unreadable_parent_reports_the_permission_error(temp_dir: TempDir) {
        use std::os::unix::fs::PermissionsExt;

        let locked = temp_dir.path().join("locked");
        fs::create_dir(&locked).expect("create locked dir");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).expect("lock dir");
        let privileged = fs::read_dir(&locked).is_ok();
        let outcome = (!privileged).then(|| {
            RootWriteProbe::with_target(locked.join("root").join("guard.txt")).exercise()
        });
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("unlock dir");

        // Permission bits do not restrict a privileged user.
        let Some(outcome) = outcome else {
            return;
        };
        assert_eq!(outcome.status(), ProbeStatus::BlockedExpected);
        assert!(
            outcome
                .detail()
                .starts_with("Permission error while writing to '"),
            "unexpected detail: {}",
            outcome.detail()
        );
    }

    #[rstest]
    fn successful_write_is_a_regression_and_is_cleaned_up(temp_dir: TempDir) {
        let target = temp_dir.path().join("guard.txt");
        let probe = RootWriteProbe::with_target(&target);

        let outcome = probe.exercise();

        assert_eq!(outcome.status(), ProbeStatus::BlockedUnexpected);
        assert_eq!(
            outcome.detail(),
            "Unexpectedly wrote to a privileged directory"
        );
        assert!(!target.exists(), "guard file should be removed");
    }

    #[test]
    fn default_target_is_the_guard_file() {
        let probe = RootWriteProbe::default();
        assert_eq!(probe.target(), Path::new(ROOT_WRITE_TARGET));
        assert_eq!(probe.capability(), "filesystem_root_write");
    }

    #[test]
    fn missing_var_root_is_reported_as_absent() {
        if Path::new("/var/root").exists() {
            return;
        }
        let outcome = RootWriteProbe::default().exercise();
        assert_eq!(outcome.status(), ProbeStatus::BlockedExpected);
        assert!(outcome.detail().contains("'/var/root' is absent"));
    }
}
