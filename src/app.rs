// src/app.rs

//! Application state and the single dispatcher every interaction goes
//! through. Each transition finishes by re-running the filter/sort pass,
//! re-plotting the map and saving the selection together, so the list,
//! the map and the saved state cannot drift apart.

use crate::db::KeyValueStore;
use crate::domain::{
    apply, filter_options, FilterOptions, FilteredListings, Listing, SortState, ViewState,
};
use crate::errors::BrowserResult;
use crate::map::{EstimatedMeasure, MapState, MapViewport};
use crate::persistence;
use crate::sync::{Dataset, LoadPhase, SyncController};
use crate::templates;
use crate::timer::{earliest, Debouncer};
use chrono::Utc;
use maud::Markup;
use std::time::{Duration, Instant};
use tracing::debug;

/// Quiet period after the last resize before the map is re-laid out.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(150);

#[derive(Debug)]
pub enum Action {
    /// Initial load, or a manual reload.
    Load,
    ListingsLoaded(BrowserResult<Dataset>),
    TriggerUpdate,
    UpdateTriggered(BrowserResult<String>),
    SetBuildings(Vec<String>),
    SetFloors(Vec<String>),
    SetStyle(String),
    SetUpdatedOnly(bool),
    SetSort(SortState),
    ResetFilters,
    ToggleMap,
    ToggleDeleted,
    /// The map image finished loading at this rendered geometry.
    MapImageLoaded(MapViewport),
    MapImageFailed,
    /// Window resized; the map image now renders at this geometry.
    Resize(MapViewport),
    PointerEnter(String),
    PointerLeave(String),
    PointClick(String),
    MapBackgroundClick,
}

/// Work the runtime performs on the app's behalf. Results come back as
/// [`Action::ListingsLoaded`] and [`Action::UpdateTriggered`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    FetchListings,
    TriggerUpdate,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub all_apartments: Vec<Listing>,
    pub all_deleted: Vec<Listing>,
    pub view: ViewState,
    pub filtered: FilteredListings,
    pub options: FilterOptions,
    pub sync: SyncController,
    pub map: MapState,
    pub deleted_visible: bool,
    pub map_image: String,
    /// Set once the first load succeeded.
    pub loaded: bool,
}

impl AppState {
    pub fn find_active(&self, name: &str) -> Option<&Listing> {
        self.filtered.active.iter().find(|l| l.name == name)
    }
}

pub struct App<S: KeyValueStore> {
    state: AppState,
    store: S,
    measure: EstimatedMeasure,
    resize: Debouncer<MapViewport>,
}

impl<S: KeyValueStore> App<S> {
    /// Creates the app with the saved selection (or defaults).
    pub fn new(store: S, map_image: impl Into<String>) -> Self {
        let view = persistence::load(&store, Utc::now().timestamp()).unwrap_or_default();
        debug!(
            "Starting with sort {} and filters {:?}",
            view.sort, view.filters
        );

        let state = AppState {
            view,
            map_image: map_image.into(),
            ..AppState::default()
        };

        Self {
            state,
            store,
            measure: EstimatedMeasure::default(),
            resize: Debouncer::new(RESIZE_DEBOUNCE),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn render(&self) -> Markup {
        render_all(&self.state)
    }

    /// Next instant at which [`App::tick`] has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        earliest([self.state.sync.refresh_deadline(), self.resize.deadline()])
    }

    /// Fires due timers: the scheduled refresh and the debounced resize.
    pub fn tick(&mut self, now: Instant) -> Vec<Command> {
        let mut commands = Vec::new();

        if let Some(viewport) = self.resize.take_due(now) {
            self.state.map.viewport = Some(viewport);
            self.relayout_map();
        }

        if self.state.sync.take_due_refresh(now) && self.state.sync.begin_load() {
            commands.push(Command::FetchListings);
        }

        commands
    }

    pub fn handle_user_action(&mut self, action: Action, now: Instant) -> Vec<Command> {
        if requires_controls(&action) && !self.state.sync.controls_enabled() {
            debug!("Ignoring {action:?} while controls are disabled");
            return Vec::new();
        }

        match action {
            Action::Load => {
                if self.state.sync.begin_load() {
                    return vec![Command::FetchListings];
                }
            }
            Action::ListingsLoaded(result) => {
                if let Some(dataset) = self.state.sync.finish_load(result) {
                    self.state.all_apartments = dataset.active;
                    self.state.all_deleted = dataset.deleted;
                    self.state.options = filter_options(&self.state.all_apartments);
                    self.state.loaded = true;
                    self.apply_filters_and_sorting();
                }
            }
            Action::TriggerUpdate => {
                if self.state.sync.begin_update() {
                    return vec![Command::TriggerUpdate];
                }
            }
            Action::UpdateTriggered(result) => {
                self.state.sync.finish_update(result, now);
            }
            Action::SetBuildings(buildings) => {
                self.state.view.filters.buildings = buildings.into_iter().collect();
                self.apply_filters_and_sorting();
            }
            Action::SetFloors(floors) => {
                self.state.view.filters.floors = floors.into_iter().collect();
                self.apply_filters_and_sorting();
            }
            Action::SetStyle(style) => {
                self.state.view.filters.style = style;
                self.apply_filters_and_sorting();
            }
            Action::SetUpdatedOnly(updated_only) => {
                self.state.view.filters.updated_only = updated_only;
                self.apply_filters_and_sorting();
            }
            Action::SetSort(sort) => {
                self.state.view.sort = sort;
                self.apply_filters_and_sorting();
            }
            Action::ResetFilters => {
                self.state.view = ViewState::default();
                self.state.map.popover.hide();
                self.apply_filters_and_sorting();
                self.state.sync.set_status("Filters reset.");
            }
            Action::ToggleMap => {
                let AppState { map, filtered, .. } = &mut self.state;
                map.toggle(&filtered.active, &self.measure);
            }
            Action::ToggleDeleted => {
                self.state.deleted_visible = !self.state.deleted_visible;
            }
            Action::MapImageLoaded(viewport) => {
                self.resize.cancel();
                self.state.map.image_failed = false;
                self.state.map.viewport = Some(viewport);
                self.relayout_map();
            }
            Action::MapImageFailed => {
                tracing::error!("Failed to load map image: {}", self.state.map_image);
                self.state.map.image_failed();
            }
            Action::Resize(viewport) => {
                self.resize.schedule(viewport, now);
            }
            Action::PointerEnter(name) => {
                let AppState { map, filtered, .. } = &mut self.state;
                map.pointer_enter(&name, &filtered.active, &self.measure);
            }
            Action::PointerLeave(name) => {
                self.state.map.pointer_leave(&name);
            }
            Action::PointClick(name) => {
                let AppState { map, filtered, .. } = &mut self.state;
                map.click_point(&name, &filtered.active, &self.measure);
            }
            Action::MapBackgroundClick => {
                self.state.map.click_background();
            }
        }

        Vec::new()
    }

    /// Filter/sort pass, then map re-plot, then save. Once data has loaded,
    /// a pass over the retained listings also replaces a failed reload's
    /// error block, so the list always matches the map.
    fn apply_filters_and_sorting(&mut self) {
        if self.state.loaded {
            self.state.sync.resume_with_retained();
        }
        self.state.filtered = apply(
            &self.state.all_apartments,
            &self.state.all_deleted,
            &self.state.view.filters,
            self.state.view.sort,
        );
        self.relayout_map();
        persistence::save(&self.store, &self.state.view, Utc::now().timestamp());
    }

    fn relayout_map(&mut self) {
        let AppState { map, filtered, .. } = &mut self.state;
        map.relayout(&filtered.active, &self.measure);
    }
}

/// Actions coming from controls that are disabled during a load.
fn requires_controls(action: &Action) -> bool {
    matches!(
        action,
        Action::SetBuildings(_)
            | Action::SetFloors(_)
            | Action::SetStyle(_)
            | Action::SetUpdatedOnly(_)
            | Action::SetSort(_)
            | Action::ResetFilters
            | Action::ToggleMap
    )
}

/// One render pass over the whole page.
pub fn render_all(state: &AppState) -> Markup {
    templates::browser_page(state)
}

/// What the listing area currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListArea {
    /// Nothing loaded yet.
    NotLoaded,
    Loading,
    LoadFailed,
    NoResults,
    Results(usize),
}

pub fn list_area(state: &AppState) -> ListArea {
    match state.sync.phase() {
        LoadPhase::Loading => ListArea::Loading,
        LoadPhase::Error(_) => ListArea::LoadFailed,
        LoadPhase::Idle => ListArea::NotLoaded,
        LoadPhase::Ready if state.filtered.active.is_empty() => ListArea::NoResults,
        LoadPhase::Ready => ListArea::Results(state.filtered.active.len()),
    }
}
