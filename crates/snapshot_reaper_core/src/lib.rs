//! Shared snapshot-reaper domain primitives.
//!
//! This crate owns the reconciliation contract and the deterministic
//! orphan-set classification. It intentionally excludes AWS SDK and
//! Lambda runtime concerns.

pub mod classify;
pub mod contract;
