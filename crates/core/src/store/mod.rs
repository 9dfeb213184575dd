//! Storage seams for per-user and per-build configurations.
//!
//! Implementations must persist a write before returning: the host may stop
//! the process at any time. Concurrent writers of the same record are not
//! coordinated here; the last write wins.

pub mod memory;

use async_trait::async_trait;
use serde::Serialize;

use crate::build::BuildRef;
use crate::configuration::ConfigurationDocument;
use crate::error::CoreError;

pub use memory::{MemoryBuildConfigStore, MemoryUserConfigStore};

/// One persisted per-user entry, keyed by project key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredConfigurationEntry {
    #[serde(rename = "id")]
    pub project_key: String,
    #[serde(rename = "config")]
    pub document: ConfigurationDocument,
}

/// Per-user dashboard configurations.
#[async_trait]
pub trait UserConfigStore: Send + Sync + 'static {
    async fn get(
        &self,
        user: &str,
        project_key: &str,
    ) -> Result<Option<ConfigurationDocument>, CoreError>;

    /// Insert or replace the entry for `(user, project_key)`.
    async fn create_or_update(
        &self,
        user: &str,
        project_key: &str,
        document: &ConfigurationDocument,
    ) -> Result<(), CoreError>;

    /// Delete the entry for `(user, project_key)`. Returns whether one existed.
    async fn remove(&self, user: &str, project_key: &str) -> Result<bool, CoreError>;

    /// All entries of `user`, in creation order.
    async fn entries(&self, user: &str) -> Result<Vec<StoredConfigurationEntry>, CoreError>;

    async fn health_check(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

/// Configurations declared by pipelines, one per build.
#[async_trait]
pub trait BuildConfigStore: Send + Sync + 'static {
    /// Attach `document` to `build`, replacing any earlier declaration.
    async fn attach(&self, build: &BuildRef, document: &ConfigurationDocument)
        -> Result<(), CoreError>;

    async fn declared(&self, build: &BuildRef) -> Result<Option<ConfigurationDocument>, CoreError>;

    async fn health_check(&self) -> Result<(), CoreError> {
        Ok(())
    }
}
