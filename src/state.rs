//! Application state for Axum web framework.

use std::sync::Arc;

use crate::config::Settings;
use crate::services::UpdateMonitor;

/// Shared state for request handlers. Cloning only bumps the monitor's `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Read-only view onto the poller's state
    pub monitor: Arc<UpdateMonitor>,
    pub mod_id: u64,
    pub version: String,
    pub polling_enabled: bool,
}

impl AppState {
    pub fn new(monitor: Arc<UpdateMonitor>, settings: &Settings) -> Self {
        Self {
            monitor,
            mod_id: settings.nexus.mod_id,
            version: settings.application.version.clone(),
            polling_enabled: settings.polling_enabled(),
        }
    }
}
