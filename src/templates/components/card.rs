// src/templates/components/card.rs

use crate::domain::{Listing, NOT_AVAILABLE};
use crate::templates::components::{format_price, format_timestamp};
use maud::{html, Markup};

/// Card for an available listing.
pub fn apartment_card(listing: &Listing) -> Markup {
    html! {
        div class="apartment-card" data-name=(listing.name) {
            @if listing.shows_updated_badge() {
                span class="updated-badge" { "Updated" }
            }
            div {
                h3 class="font-semibold text-lg text-gray-800" { (listing.display_name()) }
                p class="text-gray-700" {
                    "Price: " span class="font-medium" { (format_price(listing.price)) }
                }
                (facts(listing))
                (details(listing))
                p class="text-xs text-gray-500 mt-2" {
                    "Last Updated: " (format_timestamp(listing.updated_at))
                }
            }
            a
                href=(listing.external_link().unwrap_or("#"))
                target="_blank"
                rel="noopener noreferrer"
                class="text-blue-500 hover:text-blue-700 text-sm inline-block mt-2"
            { "View Details" }
        }
    }
}

/// Card for a listing that is no longer available: struck-through price,
/// no external link.
pub fn deleted_card(listing: &Listing) -> Markup {
    html! {
        div class="apartment-card apartment-card-deleted" data-name=(listing.name) {
            div {
                h3 class="font-semibold text-lg text-gray-500" { (listing.display_name()) }
                p class="text-gray-500" {
                    "Price: " s class="font-medium" { (format_price(listing.price)) }
                }
                (facts(listing))
                (details(listing))
                p class="text-xs text-red-500 mt-2" {
                    "Unavailable since: " (format_timestamp(listing.deleted_at))
                }
            }
            span
                class="text-gray-400 text-sm inline-block mt-2 cursor-not-allowed"
                aria-disabled="true"
            { "No Longer Available" }
        }
    }
}

fn facts(listing: &Listing) -> Markup {
    html! {
        p class="text-gray-600 text-sm" {
            "Floor: " (listing.floor.as_deref().unwrap_or(NOT_AVAILABLE))
        }
        p class="text-gray-600 text-sm" { "Style: " (listing.style_category()) }
    }
}

fn details(listing: &Listing) -> Markup {
    html! {
        @if listing.details.is_empty() {
            p class="text-sm text-gray-500 mt-1" { "No specific details." }
        } @else {
            ul class="list-disc list-inside text-sm text-gray-600 mt-1" {
                @for detail in &listing.details {
                    li {
                        @if detail.is_empty() { (NOT_AVAILABLE) } @else { (detail) }
                    }
                }
            }
        }
    }
}
