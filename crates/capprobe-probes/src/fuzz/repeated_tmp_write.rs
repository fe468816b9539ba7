//! Specimen that writes to the temp directory several times in quick
//! succession.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use capprobe_runner::{Probe, ProbeOutcome};
use tracing::debug;

use crate::PROBES_TARGET;
use crate::filesystem::TMP_WRITE_CAPABILITY;
use crate::naming::{describe_io_failure, unique_suffix};

/// Number of write/remove cycles performed by default.
pub const DEFAULT_REPEATS: usize = 2;

/// Performs back-to-back write/remove cycles against `<stem>.<n>` files.
///
/// Reports under the `filesystem_tmp_write` capability. Every `<stem>.*` file
/// is removed when the exercise ends, whether or not a cycle failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatedTmpWriteProbe {
    dir: PathBuf,
    stem: Option<String>,
    repeats: usize,
}

impl Default for RepeatedTmpWriteProbe {
    fn default() -> Self {
        Self::in_dir(env::temp_dir())
    }
}

impl RepeatedTmpWriteProbe {
    /// Writes into `dir` instead of the platform temp directory.
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            stem: None,
            repeats: DEFAULT_REPEATS,
        }
    }

    /// Uses a fixed file stem instead of a timestamped one.
    #[must_use]
    pub fn with_stem(mut self, stem: impl Into<String>) -> Self {
        self.stem = Some(stem.into());
        self
    }

    /// Changes the number of write/remove cycles.
    #[must_use]
    pub fn with_repeats(mut self, repeats: usize) -> Self {
        self.repeats = repeats;
        self
    }

    /// Directory the probe writes into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write_cycles(&self, stem: &str) -> io::Result<Vec<String>> {
        let mut attempts = Vec::with_capacity(self.repeats);
        for idx in 0..self.repeats {
            let name = format!("{stem}.{idx}");
            let path = self.dir.join(&name);
            fs::write(&path, format!("repeated write #{idx}"))?;
            attempts.push(format!("{name}=ok"));
            fs::remove_file(&path)?;
        }
        Ok(attempts)
    }
}

impl Probe for RepeatedTmpWriteProbe {
    fn capability(&self) -> &'static str {
        TMP_WRITE_CAPABILITY
    }

    fn exercise(&self) -> ProbeOutcome {
        let stem = self
            .stem
            .clone()
            .unwrap_or_else(|| format!("probe_repeat_{}", unique_suffix()));
        let _cleanup = StemCleanup::new(&self.dir, &stem);

        match self.write_cycles(&stem) {
            Ok(attempts) => ProbeOutcome::supported(format!(
                "Repeated temp writes succeeded ({})",
                attempts.join(", ")
            )),
            Err(error) => {
                ProbeOutcome::blocked_unexpected(describe_io_failure("writing repeats", &error))
            }
        }
    }
}

/// Removes every `<stem>.*` file in a directory when dropped.
struct StemCleanup<'a> {
    dir: &'a Path,
    prefix: String,
}

impl<'a> StemCleanup<'a> {
    fn new(dir: &'a Path, stem: &str) -> Self {
        Self {
            dir,
            prefix: format!("{stem}."),
        }
    }

    fn matches(&self, name: &std::ffi::OsStr) -> bool {
        name.to_str()
            .is_some_and(|text| text.starts_with(&self.prefix))
    }
}

impl Drop for StemCleanup<'_> {
    fn drop(&mut self) {
        let Ok(entries) = fs::read_dir(self.dir) else {
            return;
        };
        for entry in entries.flatten() {
            if !self.matches(&entry.file_name()) {
                continue;
            }
            let path = entry.path();
            match fs::remove_file(&path) {
                Ok(()) => debug!(target: PROBES_TARGET, path = %path.display(), "removed leftover"),
                Err(error) if error.kind() == io::ErrorKind::NotFound => {}
                Err(error) => debug!(
                    target: PROBES_TARGET,
                    path = %path.display(),
                    %error,
                    "could not remove leftover"
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use capprobe_runner::ProbeStatus;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::*;

    #[fixture]
    fn temp_dir() -> TempDir {
        TempDir::new().expect("failed to allocate temporary directory")
    }

    fn leftover_files(dir: &Path, stem: &str) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .expect("temp dir readable")
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&format!("{stem}.")))
            })
            .collect()
    }

    #[rstest]
    fn successful_cycles_list_each_attempt(temp_dir: TempDir) {
        let probe = RepeatedTmpWriteProbe::in_dir(temp_dir.path()).with_stem("probe_repeat_42");

        let outcome = probe.exercise();

        assert_eq!(outcome.status(), ProbeStatus::Supported);
        assert_eq!(
            outcome.detail(),
            "Repeated temp writes succeeded (probe_repeat_42.0=ok, probe_repeat_42.1=ok)"
        );
        assert!(leftover_files(temp_dir.path(), "probe_repeat_42").is_empty());
    }

    #[rstest]
    fn failure_mid_loop_still_cleans_up(temp_dir: TempDir) {
        fs::create_dir(temp_dir.path().join("probe_repeat_7.1")).expect("create blocker");
        let probe = RepeatedTmpWriteProbe::in_dir(temp_dir.path()).with_stem("probe_repeat_7");

        let outcome = probe.exercise();

        assert_eq!(outcome.status(), ProbeStatus::BlockedUnexpected);
        assert!(
            outcome.detail().starts_with("OS error while writing repeats: "),
            "unexpected detail: {}",
            outcome.detail()
        );
        assert!(leftover_files(temp_dir.path(), "probe_repeat_7").is_empty());
        assert!(!temp_dir.path().join("probe_repeat_7.0").exists());
    }

    #[rstest]
    fn cleanup_removes_stale_matching_files(temp_dir: TempDir) {
        fs::write(temp_dir.path().join("probe_repeat_9.stale"), "left behind")
            .expect("write stale file");
        fs::write(temp_dir.path().join("unrelated.txt"), "keep").expect("write unrelated file");
        let probe = RepeatedTmpWriteProbe::in_dir(temp_dir.path()).with_stem("probe_repeat_9");

        let _ = probe.exercise();

        assert!(leftover_files(temp_dir.path(), "probe_repeat_9").is_empty());
        assert!(temp_dir.path().join("unrelated.txt").exists());
    }

    #[rstest]
    fn missing_directory_is_an_unexpected_block(temp_dir: TempDir) {
        let probe = RepeatedTmpWriteProbe::in_dir(temp_dir.path().join("missing"));

        let outcome = probe.exercise();

        assert_eq!(outcome.status(), ProbeStatus::BlockedUnexpected);
    }

    #[rstest]
    fn repeat_count_is_configurable(temp_dir: TempDir) {
        let probe = RepeatedTmpWriteProbe::in_dir(temp_dir.path())
            .with_stem("probe_repeat_3")
            .with_repeats(3);

        let outcome = probe.exercise();

        assert!(outcome.detail().contains("probe_repeat_3.2=ok"));
        assert_eq!(probe.capability(), "filesystem_tmp_write");
    }
}
