// src/templates/layouts/mod.rs

pub mod desktop;
