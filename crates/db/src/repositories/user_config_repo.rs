//! Repository for the `user_monitor_configs` table.

use sqlx::PgPool;

use crate::models::monitor_config::UserMonitorConfig;

/// Column list for `user_monitor_configs` queries.
const COLUMNS: &str = "id, user_id, project_key, config_json, created_at, updated_at";

pub struct UserConfigRepo;

impl UserConfigRepo {
    pub async fn find(
        pool: &PgPool,
        user_id: &str,
        project_key: &str,
    ) -> Result<Option<UserMonitorConfig>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_monitor_configs \
             WHERE user_id = $1 AND project_key = $2"
        );
        sqlx::query_as::<_, UserMonitorConfig>(&query)
            .bind(user_id)
            .bind(project_key)
            .fetch_optional(pool)
            .await
    }

    /// All entries of a user, oldest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Vec<UserMonitorConfig>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_monitor_configs \
             WHERE user_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, UserMonitorConfig>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Insert or replace the entry for `(user_id, project_key)`.
    ///
    /// Concurrent upserts of the same key are not coordinated; the last one wins.
    pub async fn upsert(
        pool: &PgPool,
        user_id: &str,
        project_key: &str,
        config_json: &serde_json::Value,
    ) -> Result<UserMonitorConfig, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_monitor_configs (user_id, project_key, config_json) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, project_key) DO UPDATE \
             SET config_json = EXCLUDED.config_json, \
                 updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserMonitorConfig>(&query)
            .bind(user_id)
            .bind(project_key)
            .bind(config_json)
            .fetch_one(pool)
            .await
    }

    /// Delete one entry. Returns `true` if a row was removed.
    pub async fn delete(
        pool: &PgPool,
        user_id: &str,
        project_key: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM user_monitor_configs WHERE user_id = $1 AND project_key = $2",
        )
        .bind(user_id)
        .bind(project_key)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
