// src/templates/components/map.rs

use crate::app::AppState;
use crate::domain::{Listing, NOT_AVAILABLE};
use crate::map::{MapPoint, Popover};
use crate::templates::components::format_price;
use maud::{html, Markup};

/// Map container: image, one marker per plotted listing, and the popover.
pub fn map_display(state: &AppState) -> Markup {
    let map = &state.map;
    let display = if map.visible { "display: block;" } else { "display: none;" };

    html! {
        div id="map-display-container" class="map-display-container" style=(display) {
            @if map.image_failed {
                p class="text-center text-red-500 p-4" { "Map image not found." }
            } @else {
                img
                    src=(state.map_image)
                    alt="Apartment Map"
                    style="display: block; width: 100%; height: auto;";
                @for point in &map.points {
                    (map_point(point, map.popover.pinned() == Some(point.name.as_str())))
                }
                (popover(&map.popover, state))
            }
        }
    }
}

fn map_point(point: &MapPoint, pinned: bool) -> Markup {
    let class = if pinned {
        "location-point location-point-pinned"
    } else {
        "location-point"
    };

    html! {
        div
            class=(class)
            data-name=(point.name)
            style=(format!("left: {:.1}px; top: {:.1}px;", point.left, point.top))
        {}
    }
}

fn popover(popover: &Popover, state: &AppState) -> Markup {
    let shown = popover
        .shown()
        .filter(|_| popover.is_visible())
        .and_then(|name| state.find_active(name))
        .zip(popover.placement());

    match shown {
        Some((listing, placement)) => html! {
            div
                class=(format!("map-point-popover {}", placement.side.css_class()))
                style=(format!(
                    "display: block; left: {:.1}px; top: {:.1}px;",
                    placement.left, placement.top
                ))
            {
                (popover_content(listing))
            }
        },
        None => html! {
            div class="map-point-popover" style="display: none;" {}
        },
    }
}

pub fn popover_content(listing: &Listing) -> Markup {
    html! {
        @if listing.shows_updated_badge() {
            span class="popover-updated-badge" { "Updated" }
        }
        h4 class="popover-title" { (listing.display_name()) }
        p class="popover-detail" { "Price: " span { (format_price(listing.price)) } }
        p class="popover-detail" {
            "Floor: " (listing.floor.as_deref().unwrap_or(NOT_AVAILABLE))
        }
        p class="popover-detail" { "Style: " (listing.style_category()) }
        a
            href=(listing.external_link().unwrap_or("#"))
            target="_blank"
            rel="noopener noreferrer"
            class="popover-link"
        { "View Details" }
    }
}
