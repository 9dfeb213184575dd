use std::sync::Arc;

use prmon_core::MonitorDashboard;

use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<MonitorDashboard>,
    pub config: Arc<ServerConfig>,
}
