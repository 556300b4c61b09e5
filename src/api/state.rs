//! Application State
//!
//! Shared state accessible by all API handlers.
//! Everything here is immutable after startup, so handlers only read it.

use crate::config::ApiConfig;
use crate::dashboard::{render_page, Dashboard, Layout};
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Reactive handlers over the loaded tables
    pub dashboard: Arc<Dashboard>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Component tree served to the page
    pub layout: Arc<Layout>,
    /// Rendered HTML page
    pub page: Arc<String>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState, rendering the page once up front
    pub fn new(dashboard: Dashboard, config: ApiConfig) -> Self {
        let layout = Layout::from_dashboard(&dashboard);
        let page = render_page(&layout);

        Self {
            dashboard: Arc::new(dashboard),
            config: Arc::new(config),
            layout: Arc::new(layout),
            page: Arc::new(page),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
