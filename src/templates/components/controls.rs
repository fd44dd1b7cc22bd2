// src/templates/components/controls.rs

use crate::app::AppState;
use crate::domain::{SortState, STYLE_ALL};
use maud::{html, Markup};

/// Update button with its status line.
pub fn update_controls(state: &AppState) -> Markup {
    html! {
        div class="update-controls" {
            button
                id="update-button"
                type="button"
                class="primary"
                disabled[!state.sync.update_enabled()]
            { "Update Data" }
            p id="update-status" class="text-sm text-gray-600" { (state.sync.status()) }
        }
    }
}

/// Building, floor and style selectors, the updated toggle, sort and reset.
pub fn filter_controls(state: &AppState) -> Markup {
    let disabled = !state.sync.controls_enabled();
    let filters = &state.view.filters;
    let options = &state.options;

    html! {
        form id="filters" class="filters" onsubmit="return false;" {
            label for="filter-building" { "Building" }
            select id="filter-building" name="building" multiple disabled[disabled] {
                @for building in &options.buildings {
                    option value=(building) selected[filters.buildings.contains(building)] {
                        "Building " (building)
                    }
                }
            }

            label for="filter-floor" { "Floor" }
            select id="filter-floor" name="floor" multiple disabled[disabled] {
                @for floor in &options.floors {
                    option value=(floor) selected[filters.floors.contains(floor)] { (floor) }
                }
            }

            label for="filter-style" { "Style" }
            select id="filter-style" name="style" disabled[disabled] {
                option value=(STYLE_ALL) selected[filters.style == STYLE_ALL] { "All Styles" }
                @for style in &options.styles {
                    option value=(style) selected[filters.style == *style] { (style) }
                }
            }

            label for="filter-updated" {
                input
                    type="checkbox"
                    id="filter-updated"
                    name="updated"
                    checked[filters.updated_only]
                    disabled[disabled];
                " Recently updated only"
            }

            label for="sort-by" { "Sort by" }
            select id="sort-by" name="sort" disabled[disabled] {
                @for (sort, label) in SortState::choices() {
                    option value=(sort.token()) selected[state.view.sort == sort] { (label) }
                }
            }

            button id="reset-filters" type="button" disabled[disabled] { "Reset Filters" }
        }
    }
}

pub fn map_toggle(state: &AppState) -> Markup {
    let (label, class) = if state.map.visible {
        ("Hide Map", "bg-gray-500 hover:bg-gray-600")
    } else {
        ("Show Map", "bg-teal-500 hover:bg-teal-700")
    };

    html! {
        button
            id="toggle-map-button"
            type="button"
            class=(class)
            disabled[!state.sync.controls_enabled()]
        { (label) }
    }
}
