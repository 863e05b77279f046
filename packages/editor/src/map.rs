//! # Map Interaction Adapter
//!
//! The map surface itself (tiles, icons, styling) lives outside this crate.
//! It feeds point-selection gestures in as [`crate::Event::PointSelected`]
//! and draws whatever [`MapView`] says: one labelled marker per site plus
//! the transient marker of the in-progress pick.

use crate::form::DraftSession;
use crate::mode::{Mode, ModeController, Transition};
use crate::store::EntityStore;
use locations_common::{Coordinate, SiteId};

/// Initial map centre (Córdoba, Argentina)
pub const DEFAULT_CENTER: Coordinate = Coordinate {
    latitude: -31.4201,
    longitude: -64.1888,
};

pub const DEFAULT_ZOOM: u8 = 12;

/// Something that can draw the map projection
pub trait MapSurface {
    fn render(&mut self, view: &MapView);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Coordinate,
    pub zoom: u8,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Labelled marker for a stored site
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub site_id: SiteId,
    pub label: String,
    pub coordinate: Coordinate,
    /// Popup lines: description, then address, when present
    pub details: Vec<String>,
}

/// Everything a map surface needs to draw
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub viewport: Viewport,
    pub markers: Vec<Marker>,
    /// Transient marker for the current draft's pick
    pub pick: Option<Coordinate>,
    /// Whether clicks currently select a point
    pub armed: bool,
}

pub struct MapAdapter;

impl MapAdapter {
    /// Clicks only mean something while a draft session exists
    pub fn is_armed(mode: &Mode) -> bool {
        !mode.is_idle()
    }

    /// Route a point-selection gesture into the active draft
    pub fn point_selected(controller: &mut ModeController, coordinate: Coordinate) -> Transition {
        match controller.session_mut() {
            Some(session) => {
                session.select_coordinate(coordinate);
                Transition::Applied
            }
            None => Transition::Ignored("map is not armed while idle"),
        }
    }

    pub fn view(mode: &Mode, store: &EntityStore) -> MapView {
        let markers = store
            .sites()
            .iter()
            .map(|site| Marker {
                site_id: site.id.clone(),
                label: site.name.clone(),
                coordinate: site.coordinate(),
                details: site
                    .description
                    .iter()
                    .chain(site.address.iter())
                    .cloned()
                    .collect(),
            })
            .collect();

        MapView {
            viewport: Viewport::default(),
            markers,
            pick: mode.session().and_then(DraftSession::pick_marker),
            armed: Self::is_armed(mode),
        }
    }
}
