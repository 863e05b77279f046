//! # Sync Client
//!
//! Mutate-then-re-list access to the collection.
//!
//! ## Ordering
//!
//! Within one call the mutation strictly precedes its re-list. Independent
//! calls may interleave freely; each list request takes a sequence number
//! from a per-client counter *when it is issued*, so a consumer can drop a
//! snapshot that resolves after a newer one was already applied.
//!
//! ## Timeouts
//!
//! Every remote call, the mutation and the re-list separately, is bounded
//! by the configured timeout and fails with [`SyncError::Timeout`].

use crate::{HttpApi, LocationsApi, SyncConfig, SyncError};
use locations_common::{FormDraft, Site, SiteId};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Full collection as read by one list request
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Issue order of the list request (first request is 1)
    pub seq: u64,
    pub sites: Vec<Site>,
}

impl Snapshot {
    pub fn get(&self, id: &SiteId) -> Option<&Site> {
        self.sites.iter().find(|site| &site.id == id)
    }
}

pub struct SyncClient<A> {
    api: A,
    timeout: Duration,
    last_seq: AtomicU64,
}

impl SyncClient<HttpApi> {
    /// HTTP client for the configured base URL
    pub fn http(config: SyncConfig) -> Result<Self, SyncError> {
        let timeout = config.timeout;
        Ok(Self::new(HttpApi::new(config)?, timeout))
    }
}

impl<A: LocationsApi> SyncClient<A> {
    pub fn new(api: A, timeout: Duration) -> Self {
        Self {
            api,
            timeout,
            last_seq: AtomicU64::new(0),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Read the full collection
    pub async fn list(&self) -> Result<Snapshot, SyncError> {
        let seq = self.last_seq.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(seq, "Listing locations");

        let sites = self.bounded(self.api.fetch_all()).await.map_err(|e| {
            tracing::warn!(seq, "List failed: {}", e);
            e
        })?;

        tracing::info!(seq, count = sites.len(), "Fetched locations");
        Ok(Snapshot { seq, sites })
    }

    /// Create a site, then re-list
    pub async fn create(&self, draft: &FormDraft) -> Result<Snapshot, SyncError> {
        match self.bounded(self.api.create(draft)).await? {
            Some(created) => {
                tracing::info!(id = %created.id, name = %created.name, "Created location")
            }
            None => tracing::info!(name = %draft.name, "Created location"),
        }
        self.relist().await
    }

    /// Replace a site's fields, then re-list
    pub async fn update(&self, id: &SiteId, draft: &FormDraft) -> Result<Snapshot, SyncError> {
        self.bounded(self.api.update(id, draft)).await?;
        tracing::info!(id = %id, "Updated location");
        self.relist().await
    }

    /// Remove a site, then re-list
    pub async fn delete(&self, id: &SiteId) -> Result<Snapshot, SyncError> {
        self.bounded(self.api.delete(id)).await?;
        tracing::info!(id = %id, "Deleted location");
        self.relist().await
    }

    async fn relist(&self) -> Result<Snapshot, SyncError> {
        self.list()
            .await
            .map_err(|e| SyncError::Relist(Box::new(e)))
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, SyncError>>,
    ) -> Result<T, SyncError> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(SyncError::Timeout(self.timeout)),
        }
    }
}
