use std::collections::HashSet;

use crate::contract::{VolumeObservation, VolumeProbe};

/// Returns the snapshot ids whose source volume no longer exists, in
/// enumeration order with duplicates removed. A snapshot is orphaned iff
/// its probe resolved to `NotFound`; a volume in any other state keeps its
/// snapshots alive.
pub fn orphaned_snapshot_ids(observations: &[VolumeObservation]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut orphans = Vec::new();

    for observation in observations {
        if observation.probe != VolumeProbe::NotFound {
            continue;
        }
        if seen.insert(observation.snapshot.snapshot_id.clone()) {
            orphans.push(observation.snapshot.snapshot_id.clone());
        }
    }

    orphans
}
