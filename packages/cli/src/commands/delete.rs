use super::play;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use locations_common::SiteId;
use locations_editor::{Event, Runtime};
use locations_sync::LocationsApi;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Id of the location to remove
    pub id: String,
}

pub async fn delete<A: LocationsApi>(runtime: &mut Runtime<A>, args: DeleteArgs) -> Result<()> {
    let id = SiteId::new(args.id)?;
    play(runtime, vec![Event::Delete(id.clone())]).await?;

    println!(
        "{} Deleted {} ({} locations left)",
        "✓".green(),
        id,
        runtime.editor().store().len()
    );
    Ok(())
}
