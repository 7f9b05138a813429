use serde::{Deserialize, Serialize};

pub const RECONCILE_SCHEMA_VERSION: &str = "v1";

/// A snapshot as observed from the cloud API. This system never creates
/// snapshots; records are read-only inputs to classification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnapshotRecord {
    pub snapshot_id: String,
    pub volume_id: String,
    pub owner_id: String,
}

/// Which snapshots a reconciliation run enumerates. The scheduled job always
/// runs against the invoking principal's own snapshots ("self").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerScope {
    owner_ids: Vec<String>,
}

impl OwnerScope {
    pub fn self_owned() -> Self {
        Self {
            owner_ids: vec!["self".to_string()],
        }
    }

    pub fn owner_ids(&self) -> &[String] {
        &self.owner_ids
    }
}

impl Default for OwnerScope {
    fn default() -> Self {
        Self::self_owned()
    }
}

/// Outcome of a volume-status lookup. A lookup that fails for any reason
/// other than the volume being gone is an adapter error, never a probe
/// outcome.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VolumeProbe {
    Exists,
    NotFound,
}

/// A snapshot paired with the probe result for its source volume. Built
/// fresh on every run and discarded with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeObservation {
    pub snapshot: SnapshotRecord,
    pub probe: VolumeProbe,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReconcileReport {
    pub snapshots_examined: usize,
    pub deleted_snapshot_ids: Vec<String>,
}

/// Fatal run outcomes. The first error of either kind terminates the run;
/// recovery is the next scheduled trigger, which recomputes the orphan set
/// from live state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    EnumerationFailed {
        cause: String,
    },
    VolumeLookupFailed {
        volume_id: String,
        cause: String,
    },
    DeletionFailed {
        snapshot_id: String,
        cause: String,
    },
}

impl std::fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnumerationFailed { cause } => {
                write!(f, "failed to enumerate snapshots: {cause}")
            }
            Self::VolumeLookupFailed { volume_id, cause } => {
                write!(f, "failed to look up volume {volume_id}: {cause}")
            }
            Self::DeletionFailed { snapshot_id, cause } => {
                write!(f, "failed to delete snapshot {snapshot_id}: {cause}")
            }
        }
    }
}

impl std::error::Error for ReconcileError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scope_targets_self() {
        let scope = OwnerScope::default();
        assert_eq!(scope.owner_ids(), ["self".to_string()]);
    }

    #[test]
    fn deletion_failure_names_the_snapshot() {
        let error = ReconcileError::DeletionFailed {
            snapshot_id: "snap-0a1b2c3d".to_string(),
            cause: "snapshot is in use".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "failed to delete snapshot snap-0a1b2c3d: snapshot is in use"
        );
    }

    #[test]
    fn lookup_failure_names_the_volume() {
        let error = ReconcileError::VolumeLookupFailed {
            volume_id: "vol-11aa22bb".to_string(),
            cause: "request throttled".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "failed to look up volume vol-11aa22bb: request throttled"
        );
    }

    #[test]
    fn report_serializes_stable_field_names() {
        let report = ReconcileReport {
            snapshots_examined: 3,
            deleted_snapshot_ids: vec!["snap-2".to_string(), "snap-3".to_string()],
        };

        let value = serde_json::to_value(&report).expect("report should serialize");
        assert_eq!(value["snapshots_examined"], 3);
        assert_eq!(
            value["deleted_snapshot_ids"],
            serde_json::json!(["snap-2", "snap-3"])
        );
    }
}
