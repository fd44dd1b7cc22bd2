// src/persistence.rs

//! Saves and restores the user's filter/sort selection.
//!
//! Failures here never reach the user: a bad or unreadable entry means
//! "nothing saved", and a failed write is logged and dropped.

use crate::db::kv::{SameSite, StoredEntry};
use crate::db::KeyValueStore;
use crate::domain::{FilterState, SortState, ViewState, STYLE_ALL};
use serde_json::{json, Value};
use std::collections::BTreeSet;
use tracing::{debug, warn};

pub const STATE_KEY: &str = "apartmentFilters";
pub const STATE_EXPIRY_DAYS: i64 = 7;
const SECONDS_PER_DAY: i64 = 60 * 60 * 24;

/// Reads the saved selection, or `None` when there is nothing usable.
pub fn load<S: KeyValueStore + ?Sized>(store: &S, now: i64) -> Option<ViewState> {
    let raw = match store.get(STATE_KEY, now) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!("Error loading saved filters: {e}");
            return None;
        }
    };

    let state = decode(&raw);
    if state.is_none() {
        debug!("Discarding malformed saved filters");
        if let Err(e) = store.remove(STATE_KEY) {
            warn!("Error removing saved filters: {e}");
        }
    }
    state
}

/// Writes the selection with a fresh expiry window starting at `now`.
pub fn save<S: KeyValueStore + ?Sized>(store: &S, state: &ViewState, now: i64) {
    let entry = StoredEntry {
        key: STATE_KEY.to_string(),
        value: encode(state),
        path: "/".to_string(),
        same_site: SameSite::Lax,
        expires_at: now + STATE_EXPIRY_DAYS * SECONDS_PER_DAY,
    };

    if let Err(e) = store.set(&entry) {
        warn!("Error saving filters: {e}");
    }
}

pub fn encode(state: &ViewState) -> String {
    json!({
        "filters": state.filters,
        "sort": state.sort.token(),
    })
    .to_string()
}

/// Decodes `{filters, sort}`.
///
/// The outer shape must hold (`filters` an object, `sort` a string);
/// inside it every field that is missing or mistyped falls back to its
/// default on its own.
pub fn decode(raw: &str) -> Option<ViewState> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let filters = value.get("filters")?.as_object()?;
    let sort = value.get("sort")?.as_str()?;

    let defaults = FilterState::default();

    let string_set = |key: &str| -> Option<BTreeSet<String>> {
        let items = filters.get(key)?.as_array()?;
        Some(
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
        )
    };

    let filters = FilterState {
        buildings: string_set("buildings").unwrap_or(defaults.buildings),
        floors: string_set("floors").unwrap_or(defaults.floors),
        style: filters
            .get("style")
            .and_then(Value::as_str)
            .unwrap_or(STYLE_ALL)
            .to_string(),
        updated_only: filters
            .get("updatedOnly")
            .and_then(Value::as_bool)
            .unwrap_or(defaults.updated_only),
    };

    let sort = sort.parse::<SortState>().unwrap_or_else(|e| {
        debug!("Ignoring saved sort: {e}");
        SortState::default()
    });

    Some(ViewState { filters, sort })
}
