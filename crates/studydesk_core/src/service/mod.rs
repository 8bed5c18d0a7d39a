//! Read-side use cases composed from repository snapshots.
//!
//! # Responsibility
//! - Build the dashboard views (upcoming work, per-class standing).
//! - Stay storage-agnostic: inputs are in-memory records, never the store.

pub mod overview_service;
