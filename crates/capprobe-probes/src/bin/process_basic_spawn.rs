//! Capability probe: spawning a basic child process must succeed.

use capprobe_probes::SpawnProbe;

fn main() {
    capprobe_runner::launch(&SpawnProbe::default())
}
