//! Fuzz specimens: variations of the core probes that reproduce harness
//! regressions.

mod repeated_tmp_write;

pub use repeated_tmp_write::{DEFAULT_REPEATS, RepeatedTmpWriteProbe};
