// src/db/connection.rs

use rusqlite::Connection;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::errors::{BrowserError, BrowserResult};

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

// Thread-local connection slots, one per database file.
thread_local! {
    static DB_CONNS: RefCell<HashMap<PathBuf, Connection>> = RefCell::new(HashMap::new());
}

#[derive(Clone, Debug)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Provides a mutable connection to the closure, opening it on first use.
    pub fn with_conn<F, T>(&self, f: F) -> BrowserResult<T>
    where
        F: FnOnce(&mut Connection) -> BrowserResult<T>,
    {
        DB_CONNS
            .try_with(|cell| {
                let mut slots = cell.borrow_mut();
                if !slots.contains_key(&self.path) {
                    let conn = Connection::open(&self.path).map_err(|e| {
                        BrowserError::Storage(format!(
                            "Open {} failed: {e}",
                            self.path.display()
                        ))
                    })?;
                    slots.insert(self.path.clone(), conn);
                }
                match slots.get_mut(&self.path) {
                    Some(conn) => f(conn),
                    None => Err(BrowserError::Storage("connection slot vanished".into())),
                }
            })
            .map_err(|_| BrowserError::Storage("thread-local connections unavailable".into()))?
    }
}

/// Creates the state tables if they do not exist yet.
pub fn init_db(db: &Database) -> BrowserResult<()> {
    db.with_conn(|conn| {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| BrowserError::Storage(format!("Failed to apply schema: {e}")))?;
        Ok(())
    })?;

    tracing::debug!("State database ready at {}", db.path().display());
    Ok(())
}
