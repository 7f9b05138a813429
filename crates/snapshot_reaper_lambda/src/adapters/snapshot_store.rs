use snapshot_reaper_core::contract::{OwnerScope, SnapshotRecord, VolumeProbe};

/// Seam over the cloud snapshot/volume API. `probe_volume` reports a missing
/// volume as `Ok(VolumeProbe::NotFound)`; an `Err` is reserved for lookups
/// that failed for any other reason.
pub trait SnapshotStore {
    fn list_snapshots(&self, scope: &OwnerScope) -> Result<Vec<SnapshotRecord>, String>;
    fn probe_volume(&self, volume_id: &str) -> Result<VolumeProbe, String>;
    fn delete_snapshot(&self, snapshot_id: &str) -> Result<(), String>;
}
