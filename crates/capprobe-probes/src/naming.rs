//! Collision-resistant scratch file names and I/O failure wording.

use std::io;
use std::process;

use time::OffsetDateTime;

/// Suffix combining the wall-clock milliseconds and the process id so
/// concurrent probe runs never pick the same scratch file.
pub(crate) fn unique_suffix() -> String {
    let elapsed = OffsetDateTime::now_utc() - OffsetDateTime::UNIX_EPOCH;
    format!("{}_{}", elapsed.whole_milliseconds(), process::id())
}

/// Renders an I/O failure observed while `action` was in progress.
pub(crate) fn describe_io_failure(action: &str, error: &io::Error) -> String {
    let label = match error.kind() {
        io::ErrorKind::PermissionDenied => "Permission error",
        _ => "OS error",
    };
    format!("{label} while {action}: {error}")
}
