// src/tests/utils.rs

use crate::api::ListingsApi;
use crate::app::App;
use crate::db::{init_db, Database, MemoryStore};
use crate::errors::{BrowserError, BrowserResult};
use crate::map::{MapViewport, Size};
use serde_json::{json, Value};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Canned backend. Each call is recorded so tests can assert on traffic.
pub struct FakeApi {
    pub apartments: Value,
    pub deleted: Value,
    /// When set, the listings fetch fails with this HTTP status.
    pub fetch_status: Option<u16>,
    /// `Ok(message)` or `Err((status, message))`.
    pub update: Result<String, (u16, String)>,
    calls: Mutex<Vec<&'static str>>,
}

impl FakeApi {
    pub fn new(apartments: Value, deleted: Value) -> Self {
        Self {
            apartments,
            deleted,
            fetch_status: None,
            update: Ok("Update process initiated".to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ListingsApi for FakeApi {
    fn fetch_apartments(&self) -> BrowserResult<Value> {
        self.record("apartments");
        match self.fetch_status {
            Some(status) => Err(BrowserError::Http {
                status,
                message: format!("Fetch of apartments failed: {status}"),
            }),
            None => Ok(self.apartments.clone()),
        }
    }

    fn fetch_deleted(&self) -> BrowserResult<Value> {
        self.record("deleted");
        Ok(self.deleted.clone())
    }

    fn trigger_update(&self) -> BrowserResult<String> {
        self.record("update");
        self.update
            .clone()
            .map_err(|(status, message)| BrowserError::Http { status, message })
    }
}

/// Three active listings across two buildings, with map coordinates.
pub fn sample_apartments() -> Value {
    json!([
        {
            "name": "#3-101",
            "price": 1450,
            "floor": "1",
            "style": "Studio",
            "details": ["Balcony"],
            "created_at": 1_700_000_000,
            "updated_at": 1_700_500_000,
            "coordinates": [10.0, 20.0],
            "page_url": "https://example.com/3-101"
        },
        {
            "name": "#3-205",
            "price": 2100,
            "floor": "2",
            "style": "1 Bedroom",
            "created_at": 1_700_000_000,
            "updated_at": 1_700_000_000,
            "coordinates": [50.0, 50.0],
            "page_url": "https://example.com/3-205"
        },
        {
            "name": "#12-301",
            "price": 1800,
            "floor": "3",
            "style": "Studio",
            "created_at": 1_700_000_000,
            "coordinates": [90.0, 80.0]
        }
    ])
}

pub fn sample_deleted() -> Value {
    json!([
        {
            "name": "#3-999",
            "price": 1999,
            "floor": "9",
            "style": "Penthouse",
            "created_at": 1_600_000_000,
            "updated_at": 1_650_000_000,
            "deleted_at": 1_714_575_845,
            "page_url": "https://example.com/3-999"
        }
    ])
}

pub fn sample_api() -> FakeApi {
    FakeApi::new(sample_apartments(), sample_deleted())
}

pub fn new_app() -> App<MemoryStore> {
    App::new(MemoryStore::new(), "static/apartment.png")
}

/// A 1000x500 map image filling its container.
pub fn viewport() -> MapViewport {
    MapViewport::filling(Size::new(1000.0, 500.0))
}

pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

/// Fresh on-disk state database with the production schema.
pub fn make_db(prefix: &str) -> Database {
    let path = std::env::temp_dir().join(format!(
        "{prefix}_{}.sqlite",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let db = Database::new(path);
    init_db(&db).expect("Failed to initialize DB");
    db
}

/// Fresh output file path for rendered pages.
pub fn temp_output(prefix: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "{prefix}_{}.html",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}
