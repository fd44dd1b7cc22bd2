// src/sync.rs

//! Data Sync Controller: owns the load cycle and the manual update flow.

use crate::api::ListingsApi;
use crate::domain::{normalize_listings, Listing};
use crate::errors::{BrowserError, BrowserResult};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Delay between a successful update trigger and the refresh it schedules.
pub const REFRESH_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(String),
}

/// Both listing sets of one successful load, already normalized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub active: Vec<Listing>,
    pub deleted: Vec<Listing>,
}

/// Fetches the active and deleted sets concurrently and normalizes them.
/// Either set failing fails the whole load.
pub fn fetch_dataset(api: &dyn ListingsApi) -> BrowserResult<Dataset> {
    let (active, deleted) = std::thread::scope(|s| {
        let deleted = s.spawn(|| api.fetch_deleted());
        let active = api.fetch_apartments();
        (active, deleted.join())
    });

    let active = normalize_listings(&active?)?;
    let deleted = deleted
        .map_err(|_| BrowserError::Network("deleted listings fetch panicked".into()))??;
    let deleted = normalize_listings(&deleted)?;

    info!(
        "Apartment data loaded ({} active, {} deleted).",
        active.len(),
        deleted.len()
    );
    Ok(Dataset { active, deleted })
}

#[derive(Debug, Clone)]
pub struct SyncController {
    phase: LoadPhase,
    controls_enabled: bool,
    update_enabled: bool,
    refresh_at: Option<Instant>,
    status: String,
}

impl Default for SyncController {
    fn default() -> Self {
        Self {
            phase: LoadPhase::Idle,
            controls_enabled: true,
            update_enabled: true,
            refresh_at: None,
            status: String::new(),
        }
    }
}

impl SyncController {
    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    /// Filters, sort, reset and map toggle.
    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    pub fn update_enabled(&self) -> bool {
        self.update_enabled && self.controls_enabled
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn refresh_deadline(&self) -> Option<Instant> {
        self.refresh_at
    }

    /// Starts a load cycle, disabling every control. Refuses while another
    /// cycle is in flight.
    pub fn begin_load(&mut self) -> bool {
        if self.is_loading() {
            warn!("Load requested while another load is in flight; ignoring");
            return false;
        }
        self.phase = LoadPhase::Loading;
        self.controls_enabled = false;
        self.update_enabled = false;
        self.refresh_at = None;
        self.status = "Fetching data...".to_string();
        true
    }

    /// Ends a load cycle. Controls come back whatever the outcome.
    pub fn finish_load(&mut self, result: BrowserResult<Dataset>) -> Option<Dataset> {
        self.controls_enabled = true;
        self.update_enabled = true;

        match result {
            Ok(dataset) => {
                self.phase = LoadPhase::Ready;
                self.status = if dataset.active.is_empty() {
                    "No apartments available.".to_string()
                } else {
                    "Data loaded.".to_string()
                };
                Some(dataset)
            }
            Err(e) => {
                error!("Error during data load: {e}");
                self.phase = LoadPhase::Error(e.to_string());
                self.status = "Error loading data.".to_string();
                None
            }
        }
    }

    /// Leaves a failed-load state once the previously loaded listings are
    /// shown again. The status line keeps the failure message.
    pub fn resume_with_retained(&mut self) {
        if let LoadPhase::Error(_) = self.phase {
            self.phase = LoadPhase::Ready;
        }
    }

    /// Starts a manual update trigger; only the update control is disabled.
    pub fn begin_update(&mut self) -> bool {
        if !self.update_enabled() || self.is_loading() {
            return false;
        }
        self.update_enabled = false;
        self.status = "Initiating update...".to_string();
        true
    }

    /// On success schedules one refresh after [`REFRESH_DELAY`]; the update
    /// control stays disabled until that refresh completes. On failure the
    /// control is re-enabled right away.
    pub fn finish_update(&mut self, result: BrowserResult<String>, now: Instant) {
        match result {
            Ok(message) => {
                info!("Update triggered: {message}");
                self.refresh_at = Some(now + REFRESH_DELAY);
                self.status = format!(
                    "Update started. Refreshing data in {} seconds...",
                    REFRESH_DELAY.as_secs()
                );
            }
            Err(e) => {
                error!("Error triggering update: {e}");
                self.update_enabled = true;
                self.status = format!("Update failed: {}", e.user_message());
            }
        }
    }

    /// True once when the scheduled refresh is due.
    pub fn take_due_refresh(&mut self, now: Instant) -> bool {
        match self.refresh_at {
            Some(at) if at <= now => {
                self.refresh_at = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_cycle_disables_then_restores_controls() {
        let mut sync = SyncController::default();
        assert!(sync.begin_load());
        assert!(!sync.controls_enabled());
        assert!(!sync.update_enabled());
        assert_eq!(sync.status(), "Fetching data...");

        assert!(!sync.begin_load(), "overlapping loads are refused");

        let failed = sync.finish_load(Err(BrowserError::Network("down".into())));
        assert!(failed.is_none());
        assert!(sync.controls_enabled());
        assert!(sync.update_enabled());
        assert!(matches!(sync.phase(), LoadPhase::Error(_)));
        assert_eq!(sync.status(), "Error loading data.");
    }

    #[test]
    fn empty_load_reports_no_apartments() {
        let mut sync = SyncController::default();
        sync.begin_load();
        let dataset = sync.finish_load(Ok(Dataset::default()));
        assert!(dataset.is_some());
        assert_eq!(sync.phase(), &LoadPhase::Ready);
        assert_eq!(sync.status(), "No apartments available.");
    }

    #[test]
    fn successful_trigger_schedules_one_refresh() {
        let start = Instant::now();
        let mut sync = SyncController::default();

        assert!(sync.begin_update());
        assert!(!sync.begin_update());
        sync.finish_update(Ok("started".into()), start);

        assert!(!sync.update_enabled());
        assert!(!sync.take_due_refresh(start + Duration::from_secs(4)));
        assert!(sync.take_due_refresh(start + REFRESH_DELAY));
        assert!(!sync.take_due_refresh(start + Duration::from_secs(60)));
    }

    #[test]
    fn failed_trigger_re_enables_update() {
        let mut sync = SyncController::default();
        sync.begin_update();
        sync.finish_update(
            Err(BrowserError::Http {
                status: 500,
                message: "Failed to initiate update".into(),
            }),
            Instant::now(),
        );

        assert!(sync.update_enabled());
        assert_eq!(sync.status(), "Update failed: Failed to initiate update");
        assert_eq!(sync.refresh_deadline(), None);
    }

    #[test]
    fn retained_data_clears_the_error_phase() {
        let mut sync = SyncController::default();
        sync.begin_load();
        sync.finish_load(Err(BrowserError::Network("down".into())));
        assert!(matches!(sync.phase(), LoadPhase::Error(_)));

        sync.resume_with_retained();
        assert_eq!(sync.phase(), &LoadPhase::Ready);
        assert_eq!(sync.status(), "Error loading data.");

        let mut idle = SyncController::default();
        idle.resume_with_retained();
        assert_eq!(idle.phase(), &LoadPhase::Idle);
    }
}
