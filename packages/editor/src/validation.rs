//! # Validation Gate
//!
//! Checked at submit time. The only blocking rule is that the current draft
//! session has a map pick; field contents (an empty name, for instance) are
//! left to the remote collection to reject.

use crate::errors::{EditorError, SubmitAction};
use crate::form::Field;
use crate::mode::Mode;
use locations_common::FormDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationGate {
    /// Edit sessions need a fresh pick even though coordinates are pre-filled
    pub reconfirm_on_edit: bool,
}

impl Default for ValidationGate {
    fn default() -> Self {
        Self {
            reconfirm_on_edit: true,
        }
    }
}

impl ValidationGate {
    pub fn new(reconfirm_on_edit: bool) -> Self {
        Self { reconfirm_on_edit }
    }

    /// The draft to send, or the reason submission is blocked
    pub fn check(&self, mode: &Mode) -> Result<FormDraft, EditorError> {
        let (session, action, needs_pick) = match mode {
            Mode::Idle => return Err(EditorError::NoActiveSession),
            Mode::Adding(session) => (session, SubmitAction::Save, true),
            Mode::Editing { session, .. } => {
                (session, SubmitAction::Update, self.reconfirm_on_edit)
            }
        };

        if needs_pick && !session.coordinate_selected() {
            return Err(EditorError::NoCoordinateSelected { action });
        }

        Ok(session.draft().clone())
    }

    /// Required fields left empty, for the form's required-field markers
    pub fn missing_required(draft: &FormDraft) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| field.is_required())
            .filter(|field| match field {
                Field::Name => draft.name.trim().is_empty(),
                Field::Description => draft.description.is_none(),
                Field::Address => draft.address.is_none(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::ModeController;
    use locations_common::{Coordinate, Site, SiteId};

    fn site() -> Site {
        Site {
            id: SiteId::new("s1").unwrap(),
            name: "Shelter A".to_string(),
            latitude: -31.0,
            longitude: -64.0,
            description: None,
            address: None,
        }
    }

    #[test]
    fn test_idle_has_nothing_to_submit() {
        let gate = ValidationGate::default();
        assert_eq!(gate.check(&Mode::Idle), Err(EditorError::NoActiveSession));
    }

    #[test]
    fn test_add_without_pick_is_blocked() {
        let mut controller = ModeController::new();
        controller.start_add();
        controller
            .session_mut()
            .unwrap()
            .set_field(Field::Name, "Shelter A".to_string());

        let err = ValidationGate::default().check(controller.mode()).unwrap_err();
        assert_eq!(
            err,
            EditorError::NoCoordinateSelected {
                action: SubmitAction::Save
            }
        );
        assert_eq!(
            err.to_string(),
            "Please select a location on the map before saving."
        );
    }

    #[test]
    fn test_add_with_pick_passes_with_empty_name() {
        let mut controller = ModeController::new();
        controller.start_add();
        controller
            .session_mut()
            .unwrap()
            .select_coordinate(Coordinate::new(1.0, 1.0).unwrap());

        let draft = ValidationGate::default().check(controller.mode()).unwrap();
        assert_eq!(draft.name, "");
        assert_eq!(ValidationGate::missing_required(&draft), vec![Field::Name]);
    }

    #[test]
    fn test_edit_requires_fresh_pick_by_default() {
        let mut controller = ModeController::new();
        controller.start_edit(&site());

        let err = ValidationGate::default().check(controller.mode()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please select a location on the map before updating."
        );
    }

    #[test]
    fn test_edit_accepts_prefilled_coordinates_when_relaxed() {
        let mut controller = ModeController::new();
        controller.start_edit(&site());

        let draft = ValidationGate::new(false).check(controller.mode()).unwrap();
        assert!(site().matches_draft(&draft));
    }

    #[test]
    fn test_relaxed_gate_still_blocks_adds() {
        let mut controller = ModeController::new();
        controller.start_add();
        assert!(ValidationGate::new(false).check(controller.mode()).is_err());
    }
}
