//! # Locations Sync
//!
//! Remote access to the `/locations` resource collection.
//!
//! ```text
//! SyncClient ── mutate ──► LocationsApi (HttpApi | MemoryApi)
//!      │                        │
//!      └──── re-list ◄──────────┘   every mutation ends in a full read
//! ```
//!
//! Every operation on [`SyncClient`] returns a [`Snapshot`]: the whole
//! collection plus the sequence number of the list request that produced
//! it. Callers never patch local state from a create/update/delete
//! response; they replace it with the snapshot, discarding snapshots older
//! than the last one applied.

mod api;
mod client;
mod config;
mod error;
mod http;

#[cfg(any(test, feature = "memory"))]
mod memory;

pub use api::{LocationsApi, Operation};
pub use client::{Snapshot, SyncClient};
pub use config::{
    SyncConfig, API_URL_ENV, COLLECTION_PATH, DEFAULT_API_URL, DEFAULT_TIMEOUT, TIMEOUT_ENV,
};
pub use error::SyncError;
pub use http::HttpApi;

#[cfg(any(test, feature = "memory"))]
pub use memory::MemoryApi;
