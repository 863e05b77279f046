//! Error types for the editor

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// Submit without a map pick in the current draft session
    #[error("Please select a location on the map before {action}.")]
    NoCoordinateSelected { action: SubmitAction },

    #[error("Nothing to submit: no site is being added or edited")]
    NoActiveSession,
}

/// What a submit would do, used to word validation messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAction {
    Save,
    Update,
}

impl fmt::Display for SubmitAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitAction::Save => f.write_str("saving"),
            SubmitAction::Update => f.write_str("updating"),
        }
    }
}
