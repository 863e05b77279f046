//! Event and command types for the dispatcher
//!
//! - [`Event`]: everything that can happen to the editor (operator actions,
//!   map gestures, finished remote calls)
//! - [`Command`]: remote work the dispatcher asks its runtime to perform
//! - [`Completion`]: the result of a command, fed back as an event

use crate::form::Field;
use locations_common::{Coordinate, FormDraft, SiteId};
use locations_sync::{Operation, Snapshot, SyncError};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Re-read the collection
    Refresh,
    /// "New" affordance
    StartAdd,
    /// "Edit" affordance on a listed site
    StartEdit(SiteId),
    /// Discard the draft and return to idle
    Cancel,
    /// Form input
    EditField(Field, String),
    /// Point-selection gesture on the map surface
    PointSelected(Coordinate),
    /// Form submission (create or update depending on mode)
    Submit,
    /// "Delete" affordance on a listed site
    Delete(SiteId),
    /// A command finished
    Completed(Completion),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Create {
        session: u64,
        draft: FormDraft,
    },
    Update {
        session: u64,
        site_id: SiteId,
        draft: FormDraft,
    },
    Delete {
        site_id: SiteId,
    },
}

impl Command {
    pub fn operation(&self) -> Operation {
        match self {
            Command::List => Operation::List,
            Command::Create { .. } => Operation::Create,
            Command::Update { .. } => Operation::Update,
            Command::Delete { .. } => Operation::Delete,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Listed(Result<Snapshot, SyncError>),
    /// Create or update issued from draft session `session`
    Committed {
        session: u64,
        result: Result<Snapshot, SyncError>,
    },
    Deleted {
        site_id: SiteId,
        result: Result<Snapshot, SyncError>,
    },
}
