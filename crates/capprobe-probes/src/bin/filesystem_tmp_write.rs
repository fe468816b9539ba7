//! Capability probe: the platform temp directory must be writable.

use capprobe_probes::TmpWriteProbe;

fn main() {
    capprobe_runner::launch(&TmpWriteProbe::default())
}
