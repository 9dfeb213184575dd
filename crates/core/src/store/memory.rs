//! In-process stores for development servers and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BuildConfigStore, StoredConfigurationEntry, UserConfigStore};
use crate::build::BuildRef;
use crate::configuration::ConfigurationDocument;
use crate::error::CoreError;

/// Per-user entries held in a map of user id to ordered entries.
#[derive(Default)]
pub struct MemoryUserConfigStore {
    entries: RwLock<HashMap<String, Vec<StoredConfigurationEntry>>>,
}

impl MemoryUserConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserConfigStore for MemoryUserConfigStore {
    async fn get(
        &self,
        user: &str,
        project_key: &str,
    ) -> Result<Option<ConfigurationDocument>, CoreError> {
        Ok(self.entries.read().await.get(user).and_then(|entries| {
            entries
                .iter()
                .find(|e| e.project_key == project_key)
                .map(|e| e.document.clone())
        }))
    }

    async fn create_or_update(
        &self,
        user: &str,
        project_key: &str,
        document: &ConfigurationDocument,
    ) -> Result<(), CoreError> {
        let mut map = self.entries.write().await;
        let entries = map.entry(user.to_string()).or_default();
        match entries.iter_mut().find(|e| e.project_key == project_key) {
            Some(entry) => entry.document = document.clone(),
            None => entries.push(StoredConfigurationEntry {
                project_key: project_key.to_string(),
                document: document.clone(),
            }),
        }
        Ok(())
    }

    async fn remove(&self, user: &str, project_key: &str) -> Result<bool, CoreError> {
        let mut map = self.entries.write().await;
        let Some(entries) = map.get_mut(user) else {
            return Ok(false);
        };
        let before = entries.len();
        entries.retain(|e| e.project_key != project_key);
        Ok(entries.len() != before)
    }

    async fn entries(&self, user: &str) -> Result<Vec<StoredConfigurationEntry>, CoreError> {
        Ok(self
            .entries
            .read()
            .await
            .get(user)
            .cloned()
            .unwrap_or_default())
    }
}

type BuildKey = (String, String, i64);

fn build_key(build: &BuildRef) -> BuildKey {
    (build.project.clone(), build.job.clone(), build.number)
}

/// Pipeline-declared documents keyed by `(project, job, number)`.
#[derive(Default)]
pub struct MemoryBuildConfigStore {
    documents: RwLock<HashMap<BuildKey, ConfigurationDocument>>,
}

impl MemoryBuildConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BuildConfigStore for MemoryBuildConfigStore {
    async fn attach(
        &self,
        build: &BuildRef,
        document: &ConfigurationDocument,
    ) -> Result<(), CoreError> {
        self.documents
            .write()
            .await
            .insert(build_key(build), document.clone());
        Ok(())
    }

    async fn declared(&self, build: &BuildRef) -> Result<Option<ConfigurationDocument>, CoreError> {
        Ok(self.documents.read().await.get(&build_key(build)).cloned())
    }
}
