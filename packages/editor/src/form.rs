//! # Form Buffer
//!
//! One draft session: the field values being edited, whether the operator
//! has picked a point on the map during this session, and the transient
//! marker shown for that pick.
//!
//! A session is created when entering `adding`/`editing` and dropped when
//! returning to `idle`; its selection flag therefore starts `false` and
//! never outlives the session.

use locations_common::{Coordinate, FormDraft, Site};
use std::fmt;

/// Editable text fields of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Description,
    Address,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Description, Field::Address];

    /// Whether the form marks this field as required
    pub fn is_required(self) -> bool {
        matches!(self, Field::Name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => f.write_str("Name"),
            Field::Description => f.write_str("Description"),
            Field::Address => f.write_str("Address"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftSession {
    token: u64,
    draft: FormDraft,
    coordinate_selected: bool,
    pick_marker: Option<Coordinate>,
    commit_in_flight: bool,
}

impl DraftSession {
    /// Empty form for a new site
    pub(crate) fn blank(token: u64) -> Self {
        Self::with_draft(token, FormDraft::default())
    }

    /// Form pre-filled from an existing site; coordinates included, flag still false
    pub(crate) fn seeded(token: u64, site: &Site) -> Self {
        Self::with_draft(token, FormDraft::from_site(site))
    }

    fn with_draft(token: u64, draft: FormDraft) -> Self {
        Self {
            token,
            draft,
            coordinate_selected: false,
            pick_marker: None,
            commit_in_flight: false,
        }
    }

    /// Identifies this session among all sessions started by one editor
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn coordinate_selected(&self) -> bool {
        self.coordinate_selected
    }

    pub fn pick_marker(&self) -> Option<Coordinate> {
        self.pick_marker
    }

    pub fn commit_in_flight(&self) -> bool {
        self.commit_in_flight
    }

    pub fn field(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => Some(self.draft.name.as_str()),
            Field::Description => self.draft.description.as_deref(),
            Field::Address => self.draft.address.as_deref(),
        }
    }

    /// Replace one text field; blank optional fields are stored as absent
    pub fn set_field(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.draft.name = value,
            Field::Description => self.draft.description = non_blank(value),
            Field::Address => self.draft.address = non_blank(value),
        }
    }

    /// Apply a map pick; only the latest pick is kept
    pub(crate) fn select_coordinate(&mut self, coordinate: Coordinate) {
        self.draft.set_coordinate(coordinate);
        self.coordinate_selected = true;
        self.pick_marker = Some(coordinate);
    }

    pub(crate) fn begin_commit(&mut self) {
        self.commit_in_flight = true;
    }

    pub(crate) fn end_commit(&mut self) {
        self.commit_in_flight = false;
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use locations_common::SiteId;

    fn site() -> Site {
        Site {
            id: SiteId::new("s1").unwrap(),
            name: "Food bank".to_string(),
            latitude: -31.41,
            longitude: -64.18,
            description: None,
            address: Some("San Martín 55".to_string()),
        }
    }

    #[test]
    fn test_blank_session() {
        let session = DraftSession::blank(7);
        assert_eq!(session.token(), 7);
        assert_eq!(session.draft(), &FormDraft::default());
        assert!(!session.coordinate_selected());
        assert_eq!(session.pick_marker(), None);
    }

    #[test]
    fn test_seeded_session_prefills_but_is_unselected() {
        let session = DraftSession::seeded(1, &site());
        assert_eq!(session.draft().name, "Food bank");
        assert_eq!(session.draft().latitude, -31.41);
        assert_eq!(session.field(Field::Address), Some("San Martín 55"));
        assert!(!session.coordinate_selected());
        assert_eq!(session.pick_marker(), None);
    }

    #[test]
    fn test_latest_pick_wins() {
        let mut session = DraftSession::blank(1);
        session.select_coordinate(Coordinate::new(1.0, 2.0).unwrap());
        session.select_coordinate(Coordinate::new(-31.40, -64.19).unwrap());

        assert!(session.coordinate_selected());
        assert_eq!(session.draft().latitude, -31.40);
        assert_eq!(session.draft().longitude, -64.19);
        assert_eq!(
            session.pick_marker(),
            Some(Coordinate::new(-31.40, -64.19).unwrap())
        );
    }

    #[test]
    fn test_blank_optional_fields_are_absent() {
        let mut session = DraftSession::seeded(1, &site());
        session.set_field(Field::Address, "   ".to_string());
        session.set_field(Field::Description, "Open weekdays".to_string());

        assert_eq!(session.draft().address, None);
        assert_eq!(session.draft().description.as_deref(), Some("Open weekdays"));
    }

    #[test]
    fn test_name_kept_verbatim() {
        let mut session = DraftSession::blank(1);
        session.set_field(Field::Name, String::new());
        assert_eq!(session.field(Field::Name), Some(""));
        assert!(Field::Name.is_required());
        assert!(!Field::Address.is_required());
    }
}
