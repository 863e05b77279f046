//! In-process collection backend.
//!
//! Behaves like the remote collection (server-assigned ids, 400 on a
//! missing name, 404 on unknown ids) and lets callers script failures and
//! latency per operation.

use crate::{LocationsApi, Operation, SyncError};
use locations_common::{FormDraft, Site, SiteId};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Debug, Default)]
pub struct MemoryApi {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    sites: Vec<Site>,
    next_id: u64,
    failures: VecDeque<(Operation, SyncError)>,
    latency: HashMap<Operation, VecDeque<Duration>>,
    calls: Vec<Operation>,
}

impl MemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing collection
    pub fn with_sites(sites: Vec<Site>) -> Self {
        let api = Self::new();
        api.lock().sites = sites;
        api
    }

    /// Fail the next call of `operation` with `error`
    pub fn fail_next(&self, operation: Operation, error: SyncError) {
        self.lock().failures.push_back((operation, error));
    }

    /// Delay the next call of `operation` by `delay`
    pub fn delay_next(&self, operation: Operation, delay: Duration) {
        self.lock()
            .latency
            .entry(operation)
            .or_default()
            .push_back(delay);
    }

    /// Every call received so far, in order
    pub fn calls(&self) -> Vec<Operation> {
        self.lock().calls.clone()
    }

    /// Current contents of the collection
    pub fn sites(&self) -> Vec<Site> {
        self.lock().sites.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the call, apply scripted latency, then any scripted failure
    async fn enter(&self, operation: Operation) -> Result<(), SyncError> {
        let (delay, failure) = {
            let mut state = self.lock();
            state.calls.push(operation);
            let delay = state
                .latency
                .get_mut(&operation)
                .and_then(|queue| queue.pop_front());
            let failure = state
                .failures
                .iter()
                .position(|(op, _)| *op == operation)
                .and_then(|index| state.failures.remove(index))
                .map(|(_, error)| error);
            (delay, failure)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match failure {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn missing_fields() -> SyncError {
    SyncError::Remote {
        status: 400,
        message: "Missing required fields".to_string(),
    }
}

fn not_found() -> SyncError {
    SyncError::Remote {
        status: 404,
        message: "Location not found".to_string(),
    }
}

impl LocationsApi for MemoryApi {
    async fn fetch_all(&self) -> Result<Vec<Site>, SyncError> {
        self.enter(Operation::List).await?;
        Ok(self.sites())
    }

    async fn create(&self, draft: &FormDraft) -> Result<Option<Site>, SyncError> {
        self.enter(Operation::Create).await?;
        if draft.name.trim().is_empty() {
            return Err(missing_fields());
        }

        let mut state = self.lock();
        state.next_id += 1;
        let id = SiteId::new(format!("site-{}", state.next_id))
            .map_err(|e| SyncError::MalformedResponse(e.to_string()))?;
        let site = draft.clone().into_site(id);
        state.sites.push(site.clone());
        Ok(Some(site))
    }

    async fn update(&self, id: &SiteId, draft: &FormDraft) -> Result<Option<Site>, SyncError> {
        self.enter(Operation::Update).await?;
        if draft.name.trim().is_empty() {
            return Err(missing_fields());
        }

        let mut state = self.lock();
        let slot = state
            .sites
            .iter_mut()
            .find(|site| &site.id == id)
            .ok_or_else(not_found)?;
        *slot = draft.clone().into_site(id.clone());
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: &SiteId) -> Result<(), SyncError> {
        self.enter(Operation::Delete).await?;

        let mut state = self.lock();
        let before = state.sites.len();
        state.sites.retain(|site| &site.id != id);
        if state.sites.len() == before {
            return Err(not_found());
        }
        Ok(())
    }
}
