//! Shared data model for the locations workspace.
//!
//! Everything here is plain data: the persisted [`Site`], the transient
//! [`FormDraft`] edited by the operator and the [`Coordinate`] pair produced
//! by a map pick. No I/O happens in this crate.

pub mod error;
pub mod result;
pub mod site;

pub use error::*;
pub use result::*;
pub use site::*;
