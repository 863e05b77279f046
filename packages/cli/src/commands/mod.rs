//! Subcommands
//!
//! Scripted commands are played as editor event sequences, so they go
//! through the same validation and re-list rules as the console.

pub mod add;
pub mod console;
pub mod delete;
pub mod edit;
pub mod list;

pub use add::{add, AddArgs};
pub use console::console;
pub use delete::{delete, DeleteArgs};
pub use edit::{edit, EditArgs};
pub use list::{list, ListArgs};

use anyhow::{bail, Result};
use locations_editor::{Event, Runtime};
use locations_sync::LocationsApi;

/// Dispatch `events` in order, then wait for the remote calls they started
pub async fn play<A: LocationsApi>(runtime: &mut Runtime<A>, events: Vec<Event>) -> Result<()> {
    for event in events {
        runtime.handle(event)?;
    }
    runtime.settle().await;

    match runtime.editor().error() {
        Some(message) => bail!("{}", message),
        None => Ok(()),
    }
}
