//! Row models for the monitoring configuration tables.

use prmon_core::configuration::{self, ConfigurationDocument};
use prmon_core::CoreError;
use serde::Serialize;
use sqlx::FromRow;

use super::{DbId, Timestamp};

/// A row from the `user_monitor_configs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserMonitorConfig {
    pub id: DbId,
    pub user_id: String,
    pub project_key: String,
    pub config_json: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserMonitorConfig {
    pub fn document(&self) -> Result<ConfigurationDocument, CoreError> {
        decode(&self.config_json)
    }
}

/// A row from the `build_monitor_configs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BuildMonitorConfig {
    pub id: DbId,
    pub project: String,
    pub job: String,
    pub build_number: i64,
    pub config_json: serde_json::Value,
    pub created_at: Timestamp,
}

impl BuildMonitorConfig {
    pub fn document(&self) -> Result<ConfigurationDocument, CoreError> {
        decode(&self.config_json)
    }
}

/// Stored JSON that no longer validates is a storage fault, not user input.
fn decode(value: &serde_json::Value) -> Result<ConfigurationDocument, CoreError> {
    configuration::from_value(value)
        .map_err(|e| CoreError::Persistence(format!("stored configuration is corrupt: {e}")))
}
