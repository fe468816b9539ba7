//! Fuzz specimen: back-to-back temp-directory writes.

use capprobe_probes::RepeatedTmpWriteProbe;

fn main() {
    capprobe_runner::launch(&RepeatedTmpWriteProbe::default())
}
