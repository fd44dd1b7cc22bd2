// src/api/mod.rs

mod client;

pub use client::{HttpListingsApi, ListingsApi};
