//! Capability probe: writes into a root-owned directory must be refused.

use capprobe_probes::RootWriteProbe;

fn main() {
    capprobe_runner::launch(&RootWriteProbe::default())
}
