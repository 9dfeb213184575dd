//! Repository for the `build_monitor_configs` table.

use sqlx::PgPool;

use crate::models::monitor_config::BuildMonitorConfig;

const COLUMNS: &str = "id, project, job, build_number, config_json, created_at";

pub struct BuildConfigRepo;

impl BuildConfigRepo {
    pub async fn find(
        pool: &PgPool,
        project: &str,
        job: &str,
        build_number: i64,
    ) -> Result<Option<BuildMonitorConfig>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM build_monitor_configs \
             WHERE project = $1 AND job = $2 AND build_number = $3"
        );
        sqlx::query_as::<_, BuildMonitorConfig>(&query)
            .bind(project)
            .bind(job)
            .bind(build_number)
            .fetch_optional(pool)
            .await
    }

    /// Attach a configuration to a build, replacing an earlier declaration.
    pub async fn upsert(
        pool: &PgPool,
        project: &str,
        job: &str,
        build_number: i64,
        config_json: &serde_json::Value,
    ) -> Result<BuildMonitorConfig, sqlx::Error> {
        let query = format!(
            "INSERT INTO build_monitor_configs (project, job, build_number, config_json) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (project, job, build_number) DO UPDATE \
             SET config_json = EXCLUDED.config_json \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BuildMonitorConfig>(&query)
            .bind(project)
            .bind(job)
            .bind(build_number)
            .bind(config_json)
            .fetch_one(pool)
            .await
    }
}
