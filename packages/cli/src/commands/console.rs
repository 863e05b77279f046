//! Interactive line-oriented editor
//!
//! Reads one command per line from stdin while remote calls complete in
//! the background; operator input is never blocked on the network.

use crate::render::{self, TextMap};
use anyhow::Result;
use colored::Colorize;
use locations_common::{Coordinate, SiteId};
use locations_editor::{Completion, Event, Field, MapSurface, Runtime};
use locations_sync::LocationsApi;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands:
  new                 start adding a location
  edit <id>           start editing a listed location
  name <text>         set the name
  desc <text>         set the description
  addr <text>         set the address
  pick <lat> <lng>    select a point on the map
  save                submit the form
  cancel              discard the form
  delete <id>         delete a location
  refresh             reload the collection
  show                print the list and the form
  map                 print the map
  help                print this help
  quit                leave the console";

/// One parsed console line
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Event(Event),
    Show,
    Map,
    Help,
    Quit,
    Empty,
}

pub fn parse_line(line: &str) -> Result<Input, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let input = match word {
        "" => Input::Empty,
        "new" => Input::Event(Event::StartAdd),
        "edit" => Input::Event(Event::StartEdit(site_id(rest)?)),
        "name" => Input::Event(Event::EditField(Field::Name, rest.to_string())),
        "desc" => Input::Event(Event::EditField(Field::Description, rest.to_string())),
        "addr" => Input::Event(Event::EditField(Field::Address, rest.to_string())),
        "pick" => Input::Event(Event::PointSelected(coordinate(rest)?)),
        "save" => Input::Event(Event::Submit),
        "cancel" => Input::Event(Event::Cancel),
        "delete" => Input::Event(Event::Delete(site_id(rest)?)),
        "refresh" => Input::Event(Event::Refresh),
        "show" => Input::Show,
        "map" => Input::Map,
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => return Err(format!("Unknown command: {} (try `help`)", other)),
    };
    Ok(input)
}

fn site_id(raw: &str) -> Result<SiteId, String> {
    SiteId::new(raw).map_err(|e| e.to_string())
}

fn coordinate(raw: &str) -> Result<Coordinate, String> {
    let parts: Vec<&str> = raw.split_whitespace().collect();
    let [lat, lng] = parts.as_slice() else {
        return Err("Usage: pick <lat> <lng>".to_string());
    };
    let lat: f64 = lat.parse().map_err(|_| format!("Invalid latitude: {}", lat))?;
    let lng: f64 = lng.parse().map_err(|_| format!("Invalid longitude: {}", lng))?;
    Coordinate::new(lat, lng).map_err(|e| e.to_string())
}

pub async fn console<A: LocationsApi>(runtime: &mut Runtime<A>) -> Result<()> {
    println!("{} Type `help` for commands.", "Locations console.".bold());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut map = TextMap::default();

    runtime.handle(Event::Refresh)?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_line(&line) {
                    Ok(Input::Quit) => break,
                    Ok(input) => interpret(runtime, &mut map, input),
                    Err(message) => println!("{}", message.yellow()),
                }
            }
            Some(completion) = runtime.next_completion() => {
                completed(runtime, completion);
            }
        }
    }

    if runtime.editor().in_flight() > 0 {
        println!("Waiting for {} pending request(s)…", runtime.editor().in_flight());
        runtime.settle().await;
    }
    Ok(())
}

fn interpret<A: LocationsApi>(runtime: &mut Runtime<A>, map: &mut TextMap, input: Input) {
    match input {
        Input::Event(event) => {
            let shows_form = !matches!(event, Event::Refresh | Event::Delete(_));
            match runtime.handle(event) {
                Ok(()) if shows_form => {
                    if let Some(form) = render::form(runtime.editor()) {
                        print!("{}", form);
                    }
                }
                Ok(()) => {}
                Err(e) => println!("{} {}", "✗".red(), e.to_string().red()),
            }
        }
        Input::Show => {
            print!("{}", render::site_list(runtime.editor().store().sites()));
            if let Some(form) = render::form(runtime.editor()) {
                print!("{}", form);
            }
            if let Some(banner) = render::banner(runtime.editor()) {
                println!("{}", banner);
            }
        }
        Input::Map => {
            map.render(&runtime.editor().map_view());
            print!("{}", map.frame());
        }
        Input::Help => println!("{}", HELP),
        Input::Quit | Input::Empty => {}
    }
}

fn completed<A: LocationsApi>(runtime: &mut Runtime<A>, completion: Completion) {
    runtime.apply(completion);

    let editor = runtime.editor();
    match render::banner(editor) {
        Some(banner) => println!("{}", banner),
        None => println!(
            "{} {} locations ({})",
            "✓".green(),
            editor.store().len(),
            editor.mode()
        ),
    }
}
