// src/domain/listing.rs

use crate::errors::{BrowserError, BrowserResult};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Placeholder shown for missing text and used as the style category of
/// listings that have no style.
pub const NOT_AVAILABLE: &str = "N/A";

/// Position of a listing on the map image, in percent of the image's
/// rendered width and height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapCoordinates {
    pub x_percent: f64,
    pub y_percent: f64,
}

/// An apartment as delivered by the API, coerced into one canonical shape.
/// This acts as an anti-corruption layer between the raw JSON and the
/// filter, render and map code, which never re-check field presence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Listing {
    /// Conventionally `#<building>-<unit>`, e.g. `#3-101`.
    pub name: String,
    pub price: Option<f64>,
    pub floor: Option<String>,
    pub style: Option<String>,
    pub details: Vec<String>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
    pub coordinates: Option<MapCoordinates>,
    pub page_url: Option<String>,
    /// Only present on listings from the deleted set.
    pub deleted_at: Option<i64>,
}

fn building_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^#(\d+)-").expect("static building pattern"))
}

impl Listing {
    /// Coerces one raw API record. Never fails: every wrong-typed or
    /// missing optional field falls back to its safe default.
    pub fn from_value(raw: &Value) -> Self {
        Listing {
            name: text(raw.get("name")).unwrap_or_default(),
            price: number(raw.get("price")),
            floor: text(raw.get("floor")),
            style: text(raw.get("style")),
            details: details(raw.get("details")),
            created_at: epoch_seconds(raw.get("created_at")),
            updated_at: epoch_seconds(raw.get("updated_at")),
            coordinates: coordinates(raw.get("coordinates")),
            page_url: text(raw.get("page_url")),
            deleted_at: epoch_seconds(raw.get("deleted_at")),
        }
    }

    /// Building number taken from the leading `#<digits>-` of the name.
    pub fn building_number(&self) -> Option<&str> {
        building_pattern()
            .captures(&self.name)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Both timestamps present and `updated_at` strictly after `created_at`.
    pub fn is_recently_updated(&self) -> bool {
        matches!(
            (self.created_at, self.updated_at),
            (Some(created), Some(updated)) if updated > created
        )
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// The "updated" badge is suppressed on deleted listings.
    pub fn shows_updated_badge(&self) -> bool {
        !self.is_deleted() && self.is_recently_updated()
    }

    /// Style used for filtering; styleless listings fall in the `N/A` bucket.
    pub fn style_category(&self) -> &str {
        self.style.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// External link, never offered for deleted listings.
    pub fn external_link(&self) -> Option<&str> {
        if self.is_deleted() {
            None
        } else {
            self.page_url.as_deref()
        }
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            NOT_AVAILABLE
        } else {
            &self.name
        }
    }
}

/// Normalizes a decoded API payload. Only a non-array top level is fatal.
pub fn normalize_listings(payload: &Value) -> BrowserResult<Vec<Listing>> {
    let records = payload.as_array().ok_or_else(|| {
        BrowserError::UnexpectedShape("listing payload is not an array".to_string())
    })?;

    Ok(records.iter().map(Listing::from_value).collect())
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Epoch seconds; zero, empty and non-numeric values count as absent.
fn epoch_seconds(value: Option<&Value>) -> Option<i64> {
    let secs = number(value)?;
    if secs == 0.0 {
        return None;
    }
    Some(secs.trunc() as i64)
}

fn details(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn coordinates(value: Option<&Value>) -> Option<MapCoordinates> {
    let items = value?.as_array()?;
    if items.len() < 2 {
        return None;
    }
    Some(MapCoordinates {
        x_percent: items[0].as_f64()?,
        y_percent: items[1].as_f64()?,
    })
}
