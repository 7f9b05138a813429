use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::json;
use snapshot_reaper_core::classify::orphaned_snapshot_ids;
use snapshot_reaper_core::contract::{
    OwnerScope, ReconcileError, ReconcileReport, VolumeObservation, RECONCILE_SCHEMA_VERSION,
};

use crate::adapters::snapshot_store::SnapshotStore;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReconcileSuccessResponse {
    pub status: String,
    pub snapshots_examined: usize,
    pub deleted_snapshot_ids: Vec<String>,
    pub schema_version: String,
}

impl ReconcileSuccessResponse {
    pub fn from_report(report: ReconcileReport) -> Self {
        Self {
            status: "ok".to_string(),
            snapshots_examined: report.snapshots_examined,
            deleted_snapshot_ids: report.deleted_snapshot_ids,
            schema_version: RECONCILE_SCHEMA_VERSION.to_string(),
        }
    }
}

/// Single reconciliation pass: enumerate snapshots in scope, probe each
/// source volume, delete the orphans. Fail-fast on both loops: the first
/// unexpected lookup failure aborts before anything is deleted, and the
/// first deletion failure aborts the remaining deletions. Safe to interrupt
/// at any point; the next scheduled run recomputes from live state.
pub fn handle_reconcile(
    scope: &OwnerScope,
    store: &impl SnapshotStore,
) -> Result<ReconcileReport, ReconcileError> {
    let started_at = Instant::now();

    let snapshots = store.list_snapshots(scope).map_err(|cause| {
        log_reconcile_error("enumeration_failed", json!({ "cause": cause.clone() }));
        ReconcileError::EnumerationFailed { cause }
    })?;

    log_reconcile_info(
        "run_started",
        json!({
            "owner_ids": scope.owner_ids(),
            "snapshots_enumerated": snapshots.len(),
        }),
    );

    let mut observations = Vec::with_capacity(snapshots.len());
    for snapshot in snapshots {
        let probe = store.probe_volume(&snapshot.volume_id).map_err(|cause| {
            log_reconcile_error(
                "volume_lookup_failed",
                json!({
                    "snapshot_id": snapshot.snapshot_id.clone(),
                    "volume_id": snapshot.volume_id.clone(),
                    "cause": cause.clone(),
                }),
            );
            ReconcileError::VolumeLookupFailed {
                volume_id: snapshot.volume_id.clone(),
                cause,
            }
        })?;
        observations.push(VolumeObservation { snapshot, probe });
    }

    let orphans = orphaned_snapshot_ids(&observations);
    let mut deleted = Vec::with_capacity(orphans.len());
    for snapshot_id in orphans {
        store.delete_snapshot(&snapshot_id).map_err(|cause| {
            log_reconcile_error(
                "snapshot_delete_failed",
                json!({
                    "snapshot_id": snapshot_id.clone(),
                    "cause": cause.clone(),
                }),
            );
            ReconcileError::DeletionFailed {
                snapshot_id: snapshot_id.clone(),
                cause,
            }
        })?;
        log_reconcile_info("snapshot_deleted", json!({ "snapshot_id": snapshot_id }));
        deleted.push(snapshot_id);
    }

    let report = ReconcileReport {
        snapshots_examined: observations.len(),
        deleted_snapshot_ids: deleted,
    };
    log_reconcile_info(
        "run_completed",
        json!({
            "snapshots_examined": report.snapshots_examined,
            "snapshots_deleted": report.deleted_snapshot_ids.len(),
            "duration_ms": started_at.elapsed().as_millis(),
        }),
    );
    Ok(report)
}

fn log_reconcile_info(event: &str, details: serde_json::Value) {
    eprintln!(
        "{}",
        json!({
            "component": "reconcile_handler",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}

fn log_reconcile_error(event: &str, details: serde_json::Value) {
    eprintln!(
        "{}",
        json!({
            "component": "reconcile_handler",
            "level": "error",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}
