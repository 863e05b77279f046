use super::play;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use locations_common::Coordinate;
use locations_editor::{Event, Field, Runtime};
use locations_sync::LocationsApi;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Display name
    #[arg(short, long)]
    pub name: String,

    /// Latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lng: f64,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(short, long)]
    pub address: Option<String>,
}

pub fn events(args: AddArgs) -> Result<Vec<Event>> {
    let point = Coordinate::new(args.lat, args.lng)?;

    let mut events = vec![Event::StartAdd, Event::EditField(Field::Name, args.name)];
    if let Some(description) = args.description {
        events.push(Event::EditField(Field::Description, description));
    }
    if let Some(address) = args.address {
        events.push(Event::EditField(Field::Address, address));
    }
    events.push(Event::PointSelected(point));
    events.push(Event::Submit);
    Ok(events)
}

pub async fn add<A: LocationsApi>(runtime: &mut Runtime<A>, args: AddArgs) -> Result<()> {
    let name = args.name.clone();
    play(runtime, events(args)?).await?;

    println!(
        "{} Saved {} ({} locations)",
        "✓".green(),
        name.bold(),
        runtime.editor().store().len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::runtime;

    fn args(name: &str) -> AddArgs {
        AddArgs {
            name: name.to_string(),
            lat: -31.40,
            lng: -64.19,
            description: None,
            address: Some("Av. Colón 1200".to_string()),
        }
    }

    #[tokio::test]
    async fn test_add_creates_site() {
        let mut runtime = runtime(vec![]);
        add(&mut runtime, args("Clinic")).await.unwrap();

        let sites = runtime.editor().store().sites();
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].name, "Clinic");
        assert_eq!(sites[0].address.as_deref(), Some("Av. Colón 1200"));
        assert!(runtime.editor().mode().is_idle());
    }

    #[tokio::test]
    async fn test_add_with_blank_name_is_rejected_remotely() {
        let mut runtime = runtime(vec![]);
        let err = add(&mut runtime, args("")).await.unwrap_err();
        assert_eq!(err.to_string(), "Missing required fields");
    }

    #[test]
    fn test_out_of_range_coordinate() {
        let mut bad = args("Clinic");
        bad.lat = 91.0;
        assert!(events(bad).is_err());
    }
}
