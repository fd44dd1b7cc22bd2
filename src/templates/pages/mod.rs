// src/templates/pages/mod.rs

pub mod browser;

pub use browser::browser_page;
