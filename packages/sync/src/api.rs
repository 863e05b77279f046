use crate::SyncError;
use locations_common::{FormDraft, Site, SiteId};
use std::fmt;
use std::future::Future;

/// The four raw operations of the resource collection.
///
/// Implementations report what the remote said and nothing more; re-listing
/// after mutations and timeouts are applied by [`crate::SyncClient`].
///
/// A successful create or update means the change was applied. The echoed
/// record is informational only and may be absent.
pub trait LocationsApi: Send + Sync + 'static {
    /// `GET /locations`
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Site>, SyncError>> + Send;

    /// `POST /locations`
    fn create(
        &self,
        draft: &FormDraft,
    ) -> impl Future<Output = Result<Option<Site>, SyncError>> + Send;

    /// `PUT /locations/{id}`
    fn update(
        &self,
        id: &SiteId,
        draft: &FormDraft,
    ) -> impl Future<Output = Result<Option<Site>, SyncError>> + Send;

    /// `DELETE /locations/{id}`
    fn delete(&self, id: &SiteId) -> impl Future<Output = Result<(), SyncError>> + Send;
}

/// Remote operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Message used when an error response carries no usable `error` field
    pub fn fallback_message(self) -> &'static str {
        match self {
            Operation::List => "Error loading locations",
            Operation::Create => "Error creating location",
            Operation::Update => "Error updating location",
            Operation::Delete => "Error deleting location",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}
