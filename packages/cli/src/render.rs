//! Plain-text rendering of editor state for the terminal

use colored::Colorize;
use locations_common::Site;
use locations_editor::{Editor, Field, MapSurface, MapView, Mode, ValidationGate};
use std::fmt::Write;

/// Map surface drawn as a text frame
#[derive(Debug, Default)]
pub struct TextMap {
    frame: String,
}

impl TextMap {
    pub fn frame(&self) -> &str {
        &self.frame
    }
}

impl MapSurface for TextMap {
    fn render(&mut self, view: &MapView) {
        let mut out = String::new();
        let state = if view.armed {
            "click to pick".green()
        } else {
            "view only".dimmed()
        };
        let _ = writeln!(
            out,
            "Map centre {} zoom {} [{}]",
            view.viewport.center, view.viewport.zoom, state
        );

        for marker in &view.markers {
            let _ = writeln!(
                out,
                "  ● {} {} {}",
                marker.label.bold(),
                marker.coordinate,
                marker.site_id.as_str().dimmed()
            );
            for line in &marker.details {
                let _ = writeln!(out, "      {}", line);
            }
        }

        if let Some(pick) = view.pick {
            let _ = writeln!(out, "  {} pick {}", "✚".yellow(), pick);
        }

        self.frame = out;
    }
}

pub fn banner(editor: &Editor) -> Option<String> {
    editor
        .error()
        .map(|message| format!("{} {}", "✗".red(), message.red()))
}

pub fn site_list(sites: &[Site]) -> String {
    if sites.is_empty() {
        return "No locations yet.\n".dimmed().to_string();
    }

    let mut out = String::new();
    for site in sites {
        let _ = write!(
            out,
            "{}  {}  {}",
            site.id.as_str().dimmed(),
            site.name.bold(),
            site.coordinate()
        );
        if let Some(address) = &site.address {
            let _ = write!(out, "  {}", address);
        }
        out.push('\n');
    }
    out
}

/// Form panel for the active draft, or `None` while idle
pub fn form(editor: &Editor) -> Option<String> {
    let session = editor.session()?;
    let mut out = String::new();

    let title = match editor.mode() {
        Mode::Editing { site_id, .. } => format!("Editing location {}", site_id),
        _ => "Adding a new location".to_string(),
    };
    let _ = writeln!(out, "{}", title.bold());

    let missing = ValidationGate::missing_required(session.draft());
    for field in Field::ALL {
        let label = if field.is_required() {
            format!("{}*", field)
        } else {
            field.to_string()
        };
        let value = session.field(field).unwrap_or_default();
        let _ = write!(out, "  {:<12} {}", label, value);
        if missing.contains(&field) {
            let _ = write!(out, " {}", "(required)".red());
        }
        out.push('\n');
    }

    let position = match session.pick_marker() {
        Some(pick) if session.coordinate_selected() => pick.to_string().green().to_string(),
        _ => match editor.mode() {
            Mode::Editing { .. } => format!(
                "{} {}",
                session.draft().coordinate(),
                "(pick on the map to confirm)".yellow()
            ),
            _ => "not selected (pick on the map)".yellow().to_string(),
        },
    };
    let _ = writeln!(out, "  {:<12} {}", "Position", position);

    if session.commit_in_flight() {
        let _ = writeln!(out, "  {}", "Saving…".dimmed());
    }

    Some(out)
}
