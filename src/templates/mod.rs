// src/templates/mod.rs

pub mod components;
pub mod layouts;
pub mod pages;

// Re-exports for convenience
pub use layouts::desktop::desktop_layout;
pub use pages::browser_page;
