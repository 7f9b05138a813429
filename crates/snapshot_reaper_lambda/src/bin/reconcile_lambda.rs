use aws_sdk_ec2::error::ProvideErrorMetadata;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use snapshot_reaper_core::contract::{OwnerScope, SnapshotRecord, VolumeProbe};
use snapshot_reaper_lambda::adapters::snapshot_store::SnapshotStore;
use snapshot_reaper_lambda::handlers::reconcile::{handle_reconcile, ReconcileSuccessResponse};

const VOLUME_NOT_FOUND_CODE: &str = "InvalidVolume.NotFound";

struct Ec2SnapshotStore {
    ec2_client: aws_sdk_ec2::Client,
}

impl SnapshotStore for Ec2SnapshotStore {
    fn list_snapshots(&self, scope: &OwnerScope) -> Result<Vec<SnapshotRecord>, String> {
        let owner_ids = scope.owner_ids().to_vec();
        let client = self.ec2_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .describe_snapshots()
                    .set_owner_ids(Some(owner_ids))
                    .send()
                    .await
                    .map_err(|error| format!("failed to describe snapshots: {error}"))?;

                output.snapshots().iter().map(snapshot_record).collect()
            })
        })
    }

    fn probe_volume(&self, volume_id: &str) -> Result<VolumeProbe, String> {
        let target_volume_id = volume_id.to_string();
        let client = self.ec2_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                match client
                    .describe_volume_status()
                    .volume_ids(target_volume_id)
                    .send()
                    .await
                {
                    Ok(_) => Ok(VolumeProbe::Exists),
                    Err(error) if error.code() == Some(VOLUME_NOT_FOUND_CODE) => {
                        Ok(VolumeProbe::NotFound)
                    }
                    Err(error) => Err(format!("failed to describe volume status: {error}")),
                }
            })
        })
    }

    fn delete_snapshot(&self, snapshot_id: &str) -> Result<(), String> {
        let target_snapshot_id = snapshot_id.to_string();
        let client = self.ec2_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .delete_snapshot()
                    .snapshot_id(target_snapshot_id)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to delete snapshot: {error}"))
            })
        })
    }
}

// A record without both ids cannot be classified or deleted; surfacing it
// as an enumeration failure names the snapshot instead of probing an empty
// volume id.
fn snapshot_record(snapshot: &aws_sdk_ec2::types::Snapshot) -> Result<SnapshotRecord, String> {
    let snapshot_id = snapshot
        .snapshot_id()
        .ok_or_else(|| "describe_snapshots returned a record without a snapshot id".to_string())?;
    let volume_id = snapshot
        .volume_id()
        .ok_or_else(|| format!("snapshot {snapshot_id} has no volume id"))?;

    Ok(SnapshotRecord {
        snapshot_id: snapshot_id.to_string(),
        volume_id: volume_id.to_string(),
        owner_id: snapshot.owner_id().unwrap_or_default().to_string(),
    })
}

// The scheduled trigger carries no parameters; every run reconciles the
// invoking principal's own snapshots.
async fn handle_request(_event: LambdaEvent<Value>) -> Result<ReconcileSuccessResponse, Error> {
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = Ec2SnapshotStore {
        ec2_client: aws_sdk_ec2::Client::new(&aws_config),
    };

    let report = handle_reconcile(&OwnerScope::self_owned(), &store)
        .map_err(|error| Error::from(error.to_string()))?;
    Ok(ReconcileSuccessResponse::from_report(report))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
