// src/domain/mod.rs

pub mod filters;
pub mod listing;
pub mod logic;

pub use filters::{FilterState, SortDirection, SortKey, SortState, ViewState, STYLE_ALL};
pub use listing::{normalize_listings, Listing, NOT_AVAILABLE};
pub use logic::{apply, filter_options, FilterOptions, FilteredListings};
