// src/db/kv.rs

use crate::db::connection::Database;
use crate::errors::BrowserResult;
use rusqlite::{params, OptionalExtension};
#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;

/// Cross-site policy recorded with an entry. Only `Lax` is ever written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Lax,
}

impl SameSite {
    pub fn as_str(self) -> &'static str {
        match self {
            SameSite::Lax => "Lax",
        }
    }
}

/// One cookie-like entry.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEntry {
    pub key: String,
    pub value: String,
    pub path: String,
    pub same_site: SameSite,
    /// Unix seconds; the entry reads as absent from this instant on.
    pub expires_at: i64,
}

/// Client-side key/value storage with expiry.
pub trait KeyValueStore {
    /// Returns the value unless the entry is missing or expired at `now`.
    fn get(&self, key: &str, now: i64) -> BrowserResult<Option<String>>;
    fn set(&self, entry: &StoredEntry) -> BrowserResult<()>;
    fn remove(&self, key: &str) -> BrowserResult<()>;
}

/// SQLite-backed store, one row per key.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str, now: i64) -> BrowserResult<Option<String>> {
        self.db.with_conn(|conn| {
            let value = conn
                .query_row(
                    r#"
                    select value
                    from kv_entries
                    where key = ?
                      and expires_at > ?
                    "#,
                    params![key, now],
                    |row| row.get::<_, String>(0),
                )
                .optional()?;
            Ok(value)
        })
    }

    fn set(&self, entry: &StoredEntry) -> BrowserResult<()> {
        self.db.with_conn(|conn| {
            conn.execute(
                r#"
                insert into kv_entries (key, value, path, same_site, expires_at)
                values (?1, ?2, ?3, ?4, ?5)
                on conflict(key) do update set
                    value = excluded.value,
                    path = excluded.path,
                    same_site = excluded.same_site,
                    expires_at = excluded.expires_at
                "#,
                params![
                    entry.key,
                    entry.value,
                    entry.path,
                    entry.same_site.as_str(),
                    entry.expires_at
                ],
            )?;
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> BrowserResult<()> {
        self.db.with_conn(|conn| {
            conn.execute("delete from kv_entries where key = ?", params![key])?;
            Ok(())
        })
    }
}

/// In-memory store with the same expiry semantics.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, StoredEntry>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw access that ignores expiry.
    pub fn entry(&self, key: &str) -> Option<StoredEntry> {
        self.entries.borrow().get(key).cloned()
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str, now: i64) -> BrowserResult<Option<String>> {
        Ok(self
            .entries
            .borrow()
            .get(key)
            .filter(|e| e.expires_at > now)
            .map(|e| e.value.clone()))
    }

    fn set(&self, entry: &StoredEntry) -> BrowserResult<()> {
        self.entries
            .borrow_mut()
            .insert(entry.key.clone(), entry.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> BrowserResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str, now: i64) -> BrowserResult<Option<String>> {
        (**self).get(key, now)
    }

    fn set(&self, entry: &StoredEntry) -> BrowserResult<()> {
        (**self).set(entry)
    }

    fn remove(&self, key: &str) -> BrowserResult<()> {
        (**self).remove(key)
    }
}
