//! Application state management
//!
//! Conversion is stateless, so the shared state only carries the server
//! configuration and the metrics collector.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::metrics::Metrics;

/// Application state shared across all handlers
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,

    /// Request and conversion counters
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// Create a new AppState with the given configuration
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Create AppState with default configuration
    pub fn with_defaults() -> Self {
        Self::new(ServerConfig::default())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_defaults()
    }
}
