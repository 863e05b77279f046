//! # Mode Controller
//!
//! ```text
//!            start add              start edit(id)
//!   ┌──────┐ ─────────► ┌────────┐  ───────────► ┌─────────────┐
//!   │ idle │            │ adding │               │ editing(id) │
//!   └──────┘ ◄───────── └────────┘               └─────────────┘
//!       ▲     cancel / commit                          │
//!       └──────────────────────────────────────────────┘
//! ```
//!
//! The draft lives inside the mode, so a draft exists exactly when the mode
//! is not `idle`. "start add" is refused while editing.

use crate::form::DraftSession;
use locations_common::{Site, SiteId};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Mode {
    #[default]
    Idle,
    Adding(DraftSession),
    Editing {
        site_id: SiteId,
        session: DraftSession,
    },
}

impl Mode {
    pub fn is_idle(&self) -> bool {
        matches!(self, Mode::Idle)
    }

    pub fn is_adding(&self) -> bool {
        matches!(self, Mode::Adding(_))
    }

    pub fn editing_id(&self) -> Option<&SiteId> {
        match self {
            Mode::Editing { site_id, .. } => Some(site_id),
            _ => None,
        }
    }

    pub fn session(&self) -> Option<&DraftSession> {
        match self {
            Mode::Idle => None,
            Mode::Adding(session) | Mode::Editing { session, .. } => Some(session),
        }
    }

    pub(crate) fn session_mut(&mut self) -> Option<&mut DraftSession> {
        match self {
            Mode::Idle => None,
            Mode::Adding(session) | Mode::Editing { session, .. } => Some(session),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Idle => f.write_str("idle"),
            Mode::Adding(_) => f.write_str("adding"),
            Mode::Editing { site_id, .. } => write!(f, "editing({})", site_id),
        }
    }
}

/// Outcome of a transition request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Ignored(&'static str),
}

#[derive(Debug, Default)]
pub struct ModeController {
    mode: Mode,
    last_token: u64,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub(crate) fn session_mut(&mut self) -> Option<&mut DraftSession> {
        self.mode.session_mut()
    }

    /// Enter `adding` with an empty draft; restarts an add already in progress
    pub fn start_add(&mut self) -> Transition {
        if let Mode::Editing { .. } = self.mode {
            return Transition::Ignored("cannot start adding while editing");
        }
        let token = self.next_token();
        self.mode = Mode::Adding(DraftSession::blank(token));
        Transition::Applied
    }

    /// Enter `editing(site.id)` with a draft seeded from `site`
    pub fn start_edit(&mut self, site: &Site) -> Transition {
        let token = self.next_token();
        self.mode = Mode::Editing {
            site_id: site.id.clone(),
            session: DraftSession::seeded(token, site),
        };
        Transition::Applied
    }

    /// Return to `idle`, discarding the draft
    pub fn end_session(&mut self) -> Option<DraftSession> {
        match std::mem::take(&mut self.mode) {
            Mode::Idle => None,
            Mode::Adding(session) | Mode::Editing { session, .. } => Some(session),
        }
    }

    /// Return to `idle` only if the active session is the one identified by `token`
    pub fn end_session_if(&mut self, token: u64) -> bool {
        let current = self
            .mode
            .session()
            .is_some_and(|session| session.token() == token);
        if current {
            self.end_session();
        }
        current
    }

    fn next_token(&mut self) -> u64 {
        self.last_token += 1;
        self.last_token
    }
}
