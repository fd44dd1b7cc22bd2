// src/router.rs

use crate::app::Action;
use crate::domain::SortState;
use crate::errors::{BrowserError, BrowserResult};
use crate::map::{MapViewport, Size};
use tracing::warn;

/// One line of input from the interaction channel.
#[derive(Debug)]
pub enum Input {
    Action(Action),
    Quit,
}

/// Maps a command line onto an [`Input`]. Blank lines yield `Ok(None)`.
///
/// Lists (`building`, `floor`) are comma separated; an empty list clears
/// the selection. Names may contain spaces.
pub fn parse_command(line: &str) -> BrowserResult<Option<Input>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let action = match (verb, rest) {
        ("quit" | "exit", _) => return Ok(Some(Input::Quit)),
        ("load" | "reload", "") => Action::Load,
        ("update", "") => Action::TriggerUpdate,
        ("building" | "buildings", list) => Action::SetBuildings(parse_list(list)),
        ("floor" | "floors", list) => Action::SetFloors(parse_list(list)),
        ("style", style) if !style.is_empty() => Action::SetStyle(style.to_string()),
        ("updated", "on" | "true" | "1") => Action::SetUpdatedOnly(true),
        ("updated", "off" | "false" | "0") => Action::SetUpdatedOnly(false),
        ("sort", token) => Action::SetSort(token.parse::<SortState>().unwrap_or_else(|e| {
            warn!("{e}; falling back to name-asc");
            SortState::default()
        })),
        ("reset", "") => Action::ResetFilters,
        ("map", "") => Action::ToggleMap,
        ("deleted", "") => Action::ToggleDeleted,
        ("image", dims) => Action::MapImageLoaded(MapViewport::filling(parse_size(dims)?)),
        ("image-failed", "") => Action::MapImageFailed,
        ("resize", dims) => Action::Resize(MapViewport::filling(parse_size(dims)?)),
        ("hover", name) if !name.is_empty() => Action::PointerEnter(name.to_string()),
        ("leave", name) if !name.is_empty() => Action::PointerLeave(name.to_string()),
        ("click", name) if !name.is_empty() => Action::PointClick(name.to_string()),
        ("background", "") => Action::MapBackgroundClick,
        _ => return Err(BrowserError::Config(format!("unknown command: {line}"))),
    };

    Ok(Some(Input::Action(action)))
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_size(raw: &str) -> BrowserResult<Size> {
    let mut parts = raw.split_whitespace().map(str::parse::<f64>);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(width)), Some(Ok(height)), None) if width >= 0.0 && height >= 0.0 => {
            Ok(Size::new(width, height))
        }
        _ => Err(BrowserError::Config(format!(
            "expected WIDTH HEIGHT, got {raw:?}"
        ))),
    }
}
