use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use crate::cache::DashboardCache;
use crate::config::Config;
use crate::debounce::Debouncer;
use crate::models::FilterSelection;
use crate::services::api_client::ApiClient;
use crate::services::axis::AxisRegistry;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub api: Arc<ApiClient>,
    pub cache: Arc<DashboardCache>,
    pub selection: Arc<RwLock<FilterSelection>>,
    pub debouncer: Arc<Debouncer>,
    pub axis: Arc<AxisRegistry>,
}

impl AppState {
    /// Current filter selection.
    pub fn selection(&self) -> FilterSelection {
        self.selection
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn set_selection(&self, selection: FilterSelection) {
        if let Ok(mut guard) = self.selection.write() {
            *guard = selection;
        }
    }

    /// Fetch the filtered dataset for the current selection and commit it
    /// to the cache. A failed fetch keeps the last good snapshot; a
    /// response outrun by a newer refresh is discarded.
    pub async fn refresh_now(&self) {
        let ticket = self.cache.begin();
        let selection = self.selection();
        match self.api.filtered_data(&selection).await {
            Ok(dataset) => {
                if self.cache.commit(ticket, dataset) {
                    debug!("dashboard dataset refreshed");
                } else {
                    debug!("discarded out-of-order dataset refresh");
                }
            }
            Err(e) => {
                warn!(error = %e, "dataset refresh failed, keeping last good snapshot");
                self.cache.abandon(ticket);
            }
        }
    }

    /// Schedule a debounced refresh; rapid successive calls coalesce into
    /// a single fetch once the selection settles.
    pub fn schedule_refresh(&self) {
        let state = self.clone();
        self.debouncer.schedule(async move {
            state.refresh_now().await;
        });
    }
}
