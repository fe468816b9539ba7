//! Probes that exercise filesystem writes.

mod root_write;
mod tmp_write;
mod tmp_write_dirfd;

pub use root_write::{ROOT_WRITE_CAPABILITY, ROOT_WRITE_TARGET, RootWriteProbe};
pub use tmp_write::{TMP_WRITE_CAPABILITY, TmpWriteProbe};
pub use tmp_write_dirfd::{DIRFD_TMP_WRITE_CAPABILITY, DirfdTmpWriteProbe};

/// Payload written by the filesystem probes.
pub(crate) const PROBE_PAYLOAD: &str = "sandbox capability probe";
