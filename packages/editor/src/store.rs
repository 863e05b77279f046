//! # Entity Store
//!
//! The last applied list snapshot. Only whole snapshots replace the
//! contents; a snapshot whose sequence number is not newer than the last
//! applied one is a late answer to an older request and is dropped.

use locations_common::{Site, SiteId};
use locations_sync::Snapshot;

#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    sites: Vec<Site>,
    applied_seq: u64,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with `snapshot`; returns false if it was stale
    pub fn apply(&mut self, snapshot: Snapshot) -> bool {
        if snapshot.seq <= self.applied_seq {
            tracing::warn!(
                seq = snapshot.seq,
                applied = self.applied_seq,
                "Discarding stale location snapshot"
            );
            return false;
        }

        self.applied_seq = snapshot.seq;
        self.sites = snapshot.sites;
        true
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn get(&self, id: &SiteId) -> Option<&Site> {
        self.sites.iter().find(|site| &site.id == id)
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Sequence number of the snapshot currently held (0 before the first read)
    pub fn applied_seq(&self) -> u64 {
        self.applied_seq
    }
}
