// src/templates/components/mod.rs

pub mod card;
pub mod controls;
pub mod error;
pub mod format;
pub mod map;

pub use card::{apartment_card, deleted_card};
pub use controls::{filter_controls, map_toggle, update_controls};
pub use error::load_error_block;
pub use format::{format_price, format_timestamp, results_count_text};
pub use map::map_display;
