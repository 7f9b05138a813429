//! AWS-oriented adapter and handler for the orphaned-snapshot reaper.
//!
//! This crate owns runtime integration details (the Lambda handler and the
//! EC2 snapshot-store adapter) and drives the list, classify, delete pass
//! over the primitives in `snapshot_reaper_core`.

pub mod adapters;
pub mod handlers;
