//! # Site model
//!
//! Wire and in-memory shapes for the managed locations.
//!
//! ```text
//! Site      { id, name, latitude, longitude, description?, address? }
//! FormDraft {     name, latitude, longitude, description,  address  }
//! ```
//!
//! A `Site` only ever comes from the remote collection. A `FormDraft` is what
//! the operator edits and what gets sent on create/update; it always carries
//! both optional text fields, `""` standing for absent, so an update clears
//! them remotely. Blank text read back from the collection is absent.

use crate::{CommonError, CommonResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Opaque, server-assigned site identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(String);

impl SiteId {
    /// Build an id from operator or caller input.
    ///
    /// The id ends up as a URL path segment, so blank ids and ids containing
    /// `/` are rejected.
    pub fn new(id: impl Into<String>) -> CommonResult<Self> {
        let id = id.into();
        if id.trim().is_empty() || id.contains('/') {
            return Err(CommonError::InvalidSiteId(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Validated constructor (finite, latitude in [-90, 90], longitude in [-180, 180])
    pub fn new(latitude: f64, longitude: f64) -> CommonResult<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if !valid {
            return Err(CommonError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

/// A persisted location as returned by the remote collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: SiteId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "absent_if_blank"
    )]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "absent_if_blank"
    )]
    pub address: Option<String>,
}

impl Site {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// True when every editable field equals the draft's
    pub fn matches_draft(&self, draft: &FormDraft) -> bool {
        self.name == draft.name
            && self.latitude == draft.latitude
            && self.longitude == draft.longitude
            && self.description == draft.description
            && self.address == draft.address
    }
}

/// Uncommitted field values for a site under construction or modification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormDraft {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(
        default,
        serialize_with = "blank_if_absent",
        deserialize_with = "absent_if_blank"
    )]
    pub description: Option<String>,
    #[serde(
        default,
        serialize_with = "blank_if_absent",
        deserialize_with = "absent_if_blank"
    )]
    pub address: Option<String>,
}

impl FormDraft {
    /// Seed a draft from an existing site (edit sessions)
    pub fn from_site(site: &Site) -> Self {
        Self {
            name: site.name.clone(),
            latitude: site.latitude,
            longitude: site.longitude,
            description: site.description.clone(),
            address: site.address.clone(),
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    pub fn set_coordinate(&mut self, coordinate: Coordinate) {
        self.latitude = coordinate.latitude;
        self.longitude = coordinate.longitude;
    }

    /// Attach the server-assigned id, producing the site the server should now hold
    pub fn into_site(self, id: SiteId) -> Site {
        Site {
            id,
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
            description: self.description,
            address: self.address,
        }
    }
}

fn blank_if_absent<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.as_deref().unwrap_or_default())
}

fn absent_if_blank<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|text| !text.trim().is_empty()))
}
