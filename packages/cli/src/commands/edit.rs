use super::play;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use locations_common::{Coordinate, SiteId};
use locations_editor::{Event, Field, Runtime};
use locations_sync::LocationsApi;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Id of the location to change
    pub id: String,

    #[arg(short, long)]
    pub name: Option<String>,

    /// New description; an empty value clears it
    #[arg(short, long)]
    pub description: Option<String>,

    /// New address; an empty value clears it
    #[arg(short, long)]
    pub address: Option<String>,

    /// New latitude (needed unless `reconfirmOnEdit` is off)
    #[arg(long, allow_hyphen_values = true, requires = "lng")]
    pub lat: Option<f64>,

    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    pub lng: Option<f64>,
}

/// Events after the edit session has been opened on a listed site
pub fn events(args: EditArgs) -> Result<Vec<Event>> {
    let id = SiteId::new(args.id)?;
    let mut events = vec![Event::StartEdit(id)];

    let fields = [
        (Field::Name, args.name),
        (Field::Description, args.description),
        (Field::Address, args.address),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            events.push(Event::EditField(field, value));
        }
    }

    if let (Some(lat), Some(lng)) = (args.lat, args.lng) {
        events.push(Event::PointSelected(Coordinate::new(lat, lng)?));
    }
    events.push(Event::Submit);
    Ok(events)
}

pub async fn edit<A: LocationsApi>(runtime: &mut Runtime<A>, args: EditArgs) -> Result<()> {
    play(runtime, vec![Event::Refresh]).await?;

    let id = SiteId::new(args.id.clone())?;
    if runtime.editor().store().get(&id).is_none() {
        bail!("Location not found: {}", id);
    }

    play(runtime, events(args)?).await?;

    let name = runtime
        .editor()
        .store()
        .get(&id)
        .map(|site| site.name.clone())
        .unwrap_or_default();
    println!("{} Updated {} {}", "✓".green(), name.bold(), id.as_str().dimmed());
    Ok(())
}
