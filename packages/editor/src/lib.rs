//! # Locations Editor
//!
//! Client-side interaction and synchronization state for maintaining a
//! collection of geolocated sites.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ surface: form panel, list, map              │
//! │  - emits Events (clicks, typing, submit)    │
//! │  - renders Editor state and MapView         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Editor::dispatch                    │
//! │  - Mode Controller (idle/adding/editing)    │
//! │  - Form Buffer + Validation Gate            │
//! │  - Map Interaction Adapter                  │
//! │  - Entity Store + error slot                │
//! └─────────────────────────────────────────────┘
//!                     ↓ Commands   ↑ Completions
//! ┌─────────────────────────────────────────────┐
//! │ sync: mutate, then re-list the collection   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Server authority**: the store only ever holds a full list snapshot
//! 2. **No optimistic patching**: mutations show up through the re-list
//! 3. **Latest request wins**: stale snapshots are discarded by sequence
//! 4. **Explicit picks**: submitting needs a map pick in the current session
//!
//! ## Usage
//!
//! ```rust,ignore
//! use locations_editor::{Editor, Event, Field, Runtime};
//! use locations_sync::{SyncClient, SyncConfig};
//!
//! let client = SyncClient::http(SyncConfig::from_env())?;
//! let mut runtime = Runtime::new(Editor::default(), client);
//!
//! runtime.handle(Event::Refresh)?;
//! runtime.handle(Event::StartAdd)?;
//! runtime.handle(Event::EditField(Field::Name, "Clinic".into()))?;
//! runtime.handle(Event::PointSelected(Coordinate::new(-31.40, -64.19)?))?;
//! runtime.handle(Event::Submit)?;
//! runtime.settle().await;
//! ```

mod editor;
mod errors;
mod events;
mod form;
mod map;
mod mode;
mod runtime;
mod store;
mod validation;

pub use editor::{Affordances, Editor, LOAD_FAILED_MESSAGE};
pub use errors::{EditorError, SubmitAction};
pub use events::{Command, Completion, Event};
pub use form::{DraftSession, Field};
pub use map::{MapAdapter, MapSurface, MapView, Marker, Viewport, DEFAULT_CENTER, DEFAULT_ZOOM};
pub use mode::{Mode, ModeController, Transition};
pub use runtime::Runtime;
pub use store::EntityStore;
pub use validation::ValidationGate;
