//! Capability probes for sandboxed environments.
//!
//! Each probe attempts one operating-system action and classifies what
//! happened through [`capprobe_runner::Probe`]. Every probe has a matching
//! binary under `src/bin` whose `main` simply hands the probe to
//! [`capprobe_runner::launch`].
//!
//! Filesystem locations are injectable so the probes can be exercised
//! against scratch directories; the `Default` implementations target the
//! real locations used in production runs.

pub mod filesystem;
pub mod fuzz;
mod naming;
pub mod process;

pub use filesystem::{DirfdTmpWriteProbe, RootWriteProbe, TmpWriteProbe};
pub use fuzz::RepeatedTmpWriteProbe;
pub use process::SpawnProbe;

/// Tracing target used by the probes.
pub const PROBES_TARGET: &str = "capprobe::probes";
