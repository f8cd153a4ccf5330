//! Data layer for a geotechnical site management dashboard.
//!
//! Five entity collections (projects, supervisors, vendors, machinery,
//! daily execution reports) each live in an [`EntityStore`] that mutates
//! local state optimistically, syncs best-effort with a REST backend, and
//! falls back to built-in seed data when the backend is unreachable.

pub mod client;
pub mod dashboard;
pub mod domain;
pub mod endpoint;
pub mod registry;
pub mod seed;
pub mod store;

pub use client::{ApiClient, ApiError};
pub use dashboard::DashboardSummary;
pub use registry::{LoadReport, StoreRegistry};
pub use store::{EntityStore, LoadSource, Patch, StoreError, StoredRecord, SyncStatus};
