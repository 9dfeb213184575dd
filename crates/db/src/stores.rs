//! PostgreSQL implementations of the core storage traits.

use async_trait::async_trait;
use prmon_core::configuration::{self, ConfigurationDocument};
use prmon_core::store::{BuildConfigStore, StoredConfigurationEntry, UserConfigStore};
use prmon_core::{BuildRef, CoreError};

use crate::repositories::{BuildConfigRepo, UserConfigRepo};
use crate::DbPool;

fn persistence(e: sqlx::Error) -> CoreError {
    CoreError::Persistence(e.to_string())
}

#[derive(Clone)]
pub struct PgUserConfigStore {
    pool: DbPool,
}

impl PgUserConfigStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserConfigStore for PgUserConfigStore {
    async fn get(
        &self,
        user: &str,
        project_key: &str,
    ) -> Result<Option<ConfigurationDocument>, CoreError> {
        UserConfigRepo::find(&self.pool, user, project_key)
            .await
            .map_err(persistence)?
            .map(|row| row.document())
            .transpose()
    }

    async fn create_or_update(
        &self,
        user: &str,
        project_key: &str,
        document: &ConfigurationDocument,
    ) -> Result<(), CoreError> {
        UserConfigRepo::upsert(&self.pool, user, project_key, &configuration::to_value(document))
            .await
            .map_err(persistence)?;
        Ok(())
    }

    async fn remove(&self, user: &str, project_key: &str) -> Result<bool, CoreError> {
        UserConfigRepo::delete(&self.pool, user, project_key)
            .await
            .map_err(persistence)
    }

    async fn entries(&self, user: &str) -> Result<Vec<StoredConfigurationEntry>, CoreError> {
        UserConfigRepo::list_by_user(&self.pool, user)
            .await
            .map_err(persistence)?
            .into_iter()
            .map(|row| {
                Ok(StoredConfigurationEntry {
                    document: row.document()?,
                    project_key: row.project_key,
                })
            })
            .collect()
    }

    async fn health_check(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool).await.map_err(persistence)
    }
}

#[derive(Clone)]
pub struct PgBuildConfigStore {
    pool: DbPool,
}

impl PgBuildConfigStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BuildConfigStore for PgBuildConfigStore {
    async fn attach(
        &self,
        build: &BuildRef,
        document: &ConfigurationDocument,
    ) -> Result<(), CoreError> {
        BuildConfigRepo::upsert(
            &self.pool,
            &build.project,
            &build.job,
            build.number,
            &configuration::to_value(document),
        )
        .await
        .map_err(persistence)?;
        Ok(())
    }

    async fn declared(&self, build: &BuildRef) -> Result<Option<ConfigurationDocument>, CoreError> {
        BuildConfigRepo::find(&self.pool, &build.project, &build.job, build.number)
            .await
            .map_err(persistence)?
            .map(|row| row.document())
            .transpose()
    }

    async fn health_check(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool).await.map_err(persistence)
    }
}
