// src/main.rs

use crate::api::HttpListingsApi;
use crate::app::App;
use crate::config::Config;
use crate::db::{init_db, Database, SqliteStore};
use std::io::{self, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod app;
mod config;
mod db;
mod domain;
mod errors;
mod map;
mod persistence;
mod router;
mod runtime;
mod sync;
mod templates;
mod timer;

#[cfg(test)]
mod tests;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("apartment_browser=info")),
        )
        .init();

    let config = Config::from_env();

    // 1. Saved filter/sort state
    let db = Database::new(config.state_db.clone());
    if let Err(e) = init_db(&db) {
        error!("State database initialization failed: {e}");
        std::process::exit(1);
    }

    // 2. Listings backend
    let api = match HttpListingsApi::new(&config) {
        Ok(api) => api,
        Err(e) => {
            error!("Could not set up the listings client: {e}");
            std::process::exit(1);
        }
    };

    // 3. Interaction loop, reading commands from stdin
    let mut app = App::new(SqliteStore::new(db), config.map_image.clone());
    let inputs = runtime::spawn_input_reader(BufReader::new(io::stdin()));

    info!(
        "Browsing {} (page written to {})",
        config.api_base,
        config.output.display()
    );

    runtime::run(&mut app, &api, inputs, &config.output);
}
