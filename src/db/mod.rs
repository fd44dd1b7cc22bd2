// src/db/mod.rs

pub mod connection;
pub mod kv;

pub use connection::{init_db, Database};
pub use kv::{KeyValueStore, SqliteStore};

#[cfg(test)]
pub use kv::MemoryStore;
