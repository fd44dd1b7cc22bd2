// src/templates/pages/browser.rs

use crate::app::{list_area, AppState, ListArea};
use crate::templates::components::{
    apartment_card, deleted_card, filter_controls, load_error_block, map_display, map_toggle,
    results_count_text, update_controls,
};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub const PAGE_TITLE: &str = "Apartment Browser";

/// The whole page, rendered from one state snapshot.
pub fn browser_page(state: &AppState) -> Markup {
    desktop_layout(
        PAGE_TITLE,
        html! {
            main class="container" {
                section class="card" {
                    (update_controls(state))
                    (filter_controls(state))
                }

                section class="card" {
                    (map_toggle(state))
                    (map_display(state))
                }

                (apartment_list(state))
                (deleted_section(state))
            }
        },
    )
}

fn apartment_list(state: &AppState) -> Markup {
    let area = list_area(state);

    let count = match area {
        ListArea::Results(n) => results_count_text(n),
        ListArea::NoResults => results_count_text(0),
        _ => String::new(),
    };

    html! {
        section id="apartment-list" data-state=(area_name(area)) {
            p id="results-count" class="text-gray-700" { (count) }

            div
                id="loading"
                style=(if area == ListArea::Loading { "display: block;" } else { "display: none;" })
            { "Loading apartments..." }

            div class="grid" {
                @match area {
                    ListArea::LoadFailed => { (load_error_block()) }
                    ListArea::Results(_) => {
                        @for listing in &state.filtered.active {
                            (apartment_card(listing))
                        }
                    }
                    _ => {}
                }
            }

            p
                id="no-results"
                class=(if area == ListArea::NoResults { "no-results" } else { "no-results hidden" })
            { "No apartments match your filters." }
        }
    }
}

fn deleted_section(state: &AppState) -> Markup {
    let deleted = &state.filtered.deleted;
    let plural = if deleted.len() == 1 { "" } else { "s" };

    html! {
        section id="deleted-apartments" class="card" {
            div class="flex items-center justify-between" {
                h2 { "Previously Available" }
                button id="toggle-deleted-button" type="button" {
                    @if state.deleted_visible { "Hide Deleted" } @else { "Show Deleted" }
                }
            }
            @if state.loaded {
                p id="deleted-count" class="text-sm text-gray-600" {
                    (deleted.len()) " deleted apartment" (plural) " found."
                }
            }
            @if state.deleted_visible {
                div id="deleted-list" class="grid" {
                    @if deleted.is_empty() {
                        p class="text-sm text-gray-500" { "No deleted apartments match your filters." }
                    } @else {
                        @for listing in deleted {
                            (deleted_card(listing))
                        }
                    }
                }
            }
        }
    }
}

fn area_name(area: ListArea) -> &'static str {
    match area {
        ListArea::NotLoaded => "not-loaded",
        ListArea::Loading => "loading",
        ListArea::LoadFailed => "error",
        ListArea::NoResults => "no-results",
        ListArea::Results(_) => "results",
    }
}
