//! # Editor state container
//!
//! Holds the mode (with its draft), the entity store and the error slot.
//! [`Editor::dispatch`] is the only way to change any of them. It never
//! performs I/O: remote work comes back as [`Command`]s and their results
//! re-enter as [`Event::Completed`].
//!
//! ## Error slot
//!
//! One message at a time. Failures overwrite it, successful remote
//! operations clear it.

use crate::errors::EditorError;
use crate::events::{Command, Completion, Event};
use crate::map::{MapAdapter, MapView};
use crate::mode::{Mode, ModeController, Transition};
use crate::store::EntityStore;
use crate::validation::ValidationGate;
use crate::DraftSession;
use locations_common::SiteId;
use locations_sync::{Snapshot, SyncError};

/// Banner shown whenever the collection cannot be read
pub const LOAD_FAILED_MESSAGE: &str = "Error loading locations. Please try again later.";

/// Which triggers the interface should currently enable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordances {
    pub start_add: bool,
    pub start_edit: bool,
    pub submit: bool,
    pub cancel: bool,
    pub map_armed: bool,
    /// At least one remote call is pending
    pub busy: bool,
}

#[derive(Debug, Default)]
pub struct Editor {
    controller: ModeController,
    store: EntityStore,
    gate: ValidationGate,
    error: Option<String>,
    in_flight: usize,
}

impl Editor {
    pub fn new(gate: ValidationGate) -> Self {
        Self {
            gate,
            ..Default::default()
        }
    }

    pub fn mode(&self) -> &Mode {
        self.controller.mode()
    }

    pub fn session(&self) -> Option<&DraftSession> {
        self.controller.mode().session()
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn gate(&self) -> &ValidationGate {
        &self.gate
    }

    /// Current banner message
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Commands handed out whose completion has not come back yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn affordances(&self) -> Affordances {
        let mode = self.mode();
        let session = mode.session();
        Affordances {
            start_add: mode.editing_id().is_none(),
            start_edit: true,
            submit: session.is_some_and(|session| !session.commit_in_flight()),
            cancel: session.is_some(),
            map_armed: MapAdapter::is_armed(mode),
            busy: self.in_flight > 0,
        }
    }

    pub fn map_view(&self) -> MapView {
        MapAdapter::view(self.mode(), &self.store)
    }

    /// Apply one event; returns the remote work it requires
    pub fn dispatch(&mut self, event: Event) -> Result<Vec<Command>, EditorError> {
        tracing::debug!(mode = %self.mode(), ?event, "Dispatching");

        let commands = match event {
            Event::Refresh => vec![Command::List],

            Event::StartAdd => {
                let outcome = self.controller.start_add();
                self.note(outcome, "start add");
                vec![]
            }

            Event::StartEdit(site_id) => {
                match self.store.get(&site_id) {
                    Some(site) => {
                        let site = site.clone();
                        let outcome = self.controller.start_edit(&site);
                        self.note(outcome, "start edit");
                    }
                    None => self.note(Transition::Ignored("site is not listed"), "start edit"),
                }
                vec![]
            }

            Event::Cancel => {
                if self.controller.end_session().is_none() {
                    self.note(Transition::Ignored("no draft to discard"), "cancel");
                }
                vec![]
            }

            Event::EditField(field, value) => {
                match self.controller.session_mut() {
                    Some(session) => session.set_field(field, value),
                    None => self.note(Transition::Ignored("no draft to edit"), "edit field"),
                }
                vec![]
            }

            Event::PointSelected(coordinate) => {
                let outcome = MapAdapter::point_selected(&mut self.controller, coordinate);
                self.note(outcome, "point selected");
                vec![]
            }

            Event::Submit => self.submit()?,

            Event::Delete(site_id) => vec![Command::Delete { site_id }],

            Event::Completed(completion) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.complete(completion);
                vec![]
            }
        };

        self.in_flight += commands.len();
        Ok(commands)
    }

    fn submit(&mut self) -> Result<Vec<Command>, EditorError> {
        if self.session().is_some_and(DraftSession::commit_in_flight) {
            self.note(Transition::Ignored("commit already in flight"), "submit");
            return Ok(vec![]);
        }

        let draft = match self.gate.check(self.controller.mode()) {
            Ok(draft) => draft,
            Err(e) => {
                self.error = Some(e.to_string());
                return Err(e);
            }
        };

        let editing = self.mode().editing_id().cloned();
        let Some(session) = self.controller.session_mut() else {
            return Err(EditorError::NoActiveSession);
        };
        session.begin_commit();
        let token = session.token();

        let command = match editing {
            Some(site_id) => Command::Update {
                session: token,
                site_id,
                draft,
            },
            None => Command::Create {
                session: token,
                draft,
            },
        };
        Ok(vec![command])
    }

    fn complete(&mut self, completion: Completion) {
        match completion {
            Completion::Listed(Ok(snapshot)) => self.refreshed(snapshot),

            Completion::Listed(Err(e)) => {
                tracing::warn!("Failed to load locations: {}", e);
                self.error = Some(LOAD_FAILED_MESSAGE.to_string());
            }

            Completion::Committed {
                session,
                result: Ok(snapshot),
            } => {
                self.refreshed(snapshot);
                self.controller.end_session_if(session);
            }

            Completion::Committed {
                session,
                result: Err(e),
            } => {
                if e.mutation_applied() {
                    self.controller.end_session_if(session);
                } else if let Some(active) = self.controller.session_mut() {
                    if active.token() == session {
                        active.end_commit();
                    }
                }
                self.failed(e);
            }

            Completion::Deleted {
                site_id,
                result: Ok(snapshot),
            } => {
                self.refreshed(snapshot);
                self.drop_edit_of(&site_id);
            }

            Completion::Deleted {
                site_id,
                result: Err(e),
            } => {
                if e.mutation_applied() {
                    self.drop_edit_of(&site_id);
                }
                self.failed(e);
            }
        }
    }

    fn refreshed(&mut self, snapshot: Snapshot) {
        self.store.apply(snapshot);
        self.error = None;
    }

    fn failed(&mut self, e: SyncError) {
        tracing::warn!("Remote operation failed: {}", e);
        self.error = Some(match e {
            SyncError::Relist(_) => LOAD_FAILED_MESSAGE.to_string(),
            other => other.to_string(),
        });
    }

    /// An edit session whose target was deleted has nothing left to update
    fn drop_edit_of(&mut self, site_id: &SiteId) {
        if self.mode().editing_id() == Some(site_id) {
            tracing::info!(id = %site_id, "Closing edit of deleted location");
            self.controller.end_session();
        }
    }

    fn note(&self, outcome: Transition, action: &str) {
        if let Transition::Ignored(reason) = outcome {
            tracing::debug!(mode = %self.mode(), "Ignoring {}: {}", action, reason);
        }
    }
}
