//! Capability probe: the temp directory must be writable through a
//! directory handle.

use capprobe_probes::DirfdTmpWriteProbe;

fn main() {
    capprobe_runner::launch(&DirfdTmpWriteProbe::default())
}
