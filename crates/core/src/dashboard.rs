//! Dashboard service: the operations behind a user viewing a build's
//! monitoring dashboard.
//!
//! Every call recomputes availability from the registry. The only write a
//! read path performs is seeding the user's `default` entry when a view has
//! neither a pipeline document nor a project entry.

use std::sync::Arc;

use serde::Serialize;

use crate::build::{BuildRef, DEFAULT_PROJECT_KEY};
use crate::configuration::{self, ConfigurationDocument};
use crate::error::CoreError;
use crate::registry::{ProviderRegistry, WidgetGroup};
use crate::resolver::{self, ConfigurationSource, PruneOutcome};
use crate::store::{BuildConfigStore, UserConfigStore};

/// The configuration shown for a build, and where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfiguration {
    pub document: ConfigurationDocument,
    pub source: ConfigurationSource,
    /// Set when a store read or the bootstrap write failed. The document is
    /// still usable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persistence_error: Option<String>,
}

impl ResolvedConfiguration {
    fn computed(document: ConfigurationDocument) -> Self {
        Self {
            document,
            source: ConfigurationSource::ComputedDefault,
            persistence_error: None,
        }
    }
}

pub struct MonitorDashboard {
    registry: Arc<ProviderRegistry>,
    users: Arc<dyn UserConfigStore>,
    builds: Arc<dyn BuildConfigStore>,
}

impl MonitorDashboard {
    pub fn new(
        registry: Arc<ProviderRegistry>,
        users: Arc<dyn UserConfigStore>,
        builds: Arc<dyn BuildConfigStore>,
    ) -> Self {
        Self {
            registry,
            users,
            builds,
        }
    }

    pub fn registry(&self) -> &Arc<ProviderRegistry> {
        &self.registry
    }

    pub fn build_store(&self) -> &Arc<dyn BuildConfigStore> {
        &self.builds
    }

    /// Available widgets for `build`, grouped by provider.
    pub fn available_widget_groups(&self, build: &BuildRef) -> Vec<WidgetGroup> {
        self.registry.available_widget_groups(build)
    }

    /// The configuration shown to `user` for `build`.
    ///
    /// When the build has no pipeline declaration and the user has no entry
    /// for its project, the user's `default` entry is (re)seeded with the
    /// computed default, which is returned. A failed seed is reported in
    /// `persistence_error`; the document is still returned. Without a valid
    /// build the computed default is returned.
    pub async fn effective_configuration(
        &self,
        build: &BuildRef,
        user: Option<&str>,
    ) -> ResolvedConfiguration {
        self.resolve(build, user, true).await
    }

    /// Replace the user's configuration for the build's project.
    ///
    /// Invalid text is rejected and the stored document is left untouched.
    pub async fn update_configuration(
        &self,
        build: &BuildRef,
        user: Option<&str>,
        text: &str,
    ) -> Result<ConfigurationDocument, CoreError> {
        build.validate()?;
        let user = user.ok_or(CoreError::MissingContext("user"))?;
        let document = configuration::parse(text)?;
        let project_key = build.project_key();

        let before = self.users.get(user, &project_key).await?;
        self.users
            .create_or_update(user, &project_key, &document)
            .await?;

        tracing::info!(
            user = %user,
            project_key = %project_key,
            before = %before.map(|d| d.to_string()).unwrap_or_default(),
            after = %document,
            "Monitoring configuration updated",
        );
        Ok(document)
    }

    /// Drop the user's override for the build's project. The next view
    /// re-seeds `default` and shows the current computed default.
    pub async fn reset_to_default(
        &self,
        build: &BuildRef,
        user: Option<&str>,
    ) -> Result<(), CoreError> {
        build.validate()?;
        let user = user.ok_or(CoreError::MissingContext("user"))?;
        let project_key = build.project_key();
        if project_key == DEFAULT_PROJECT_KEY {
            return Err(CoreError::Validation(
                "The default entry cannot be reset".into(),
            ));
        }

        let removed = self.users.remove(user, &project_key).await?;
        tracing::info!(
            user = %user,
            project_key = %project_key,
            removed,
            "Monitoring configuration reset to default",
        );
        Ok(())
    }

    /// Whether the user's project configuration matches their default entry.
    pub async fn is_synced(&self, build: &BuildRef, user: Option<&str>) -> Result<bool, CoreError> {
        let Some(user) = user else {
            return Ok(true);
        };
        if build.validate().is_err() {
            return Ok(true);
        }
        let project = self.users.get(user, &build.project_key()).await?;
        let default = self.users.get(user, DEFAULT_PROJECT_KEY).await?;
        Ok(resolver::is_synced_with_default(
            project.as_ref(),
            default.as_ref(),
        ))
    }

    /// Ids in the effective configuration that no provider currently offers.
    pub async fn unavailable_widget_ids(&self, build: &BuildRef, user: Option<&str>) -> Vec<String> {
        let resolved = self.resolve(build, user, false).await;
        let available = self.registry.available_ids(build);
        let missing = resolver::unavailable_ids(&resolved.document, &available);
        if !missing.is_empty() {
            tracing::info!(
                build = %build,
                source = resolved.source.as_str(),
                unavailable = ?missing,
                "Configuration references unavailable portlets",
            );
        }
        missing
    }

    /// Whether the pipeline-declared configuration changed since the
    /// previous build of the same job.
    pub async fn has_changes(&self, build: &BuildRef) -> Result<bool, CoreError> {
        if build.validate().is_err() {
            return Ok(false);
        }
        let Some(previous) = build.previous() else {
            return Ok(false);
        };
        let current = self.builds.declared(build).await?;
        let before = self.builds.declared(&previous).await?;
        Ok(resolver::has_changed_since_previous_build(
            current.as_ref(),
            before.as_ref(),
        ))
    }

    /// Remove unavailable references from the effective configuration and
    /// persist the result where that configuration came from.
    pub async fn prune_stored_configuration(
        &self,
        build: &BuildRef,
        user: Option<&str>,
    ) -> Result<PruneOutcome, CoreError> {
        build.validate()?;
        let resolved = self.resolve(build, user, false).await;
        if let Some(error) = resolved.persistence_error {
            return Err(CoreError::Persistence(error));
        }

        let available = self.registry.available_ids(build);
        let outcome = resolver::prune_unavailable(&resolved.document, &available);
        if !outcome.changed() {
            return Ok(outcome);
        }

        match resolved.source {
            ConfigurationSource::PipelineDeclared => {
                self.builds.attach(build, &outcome.cleaned).await?;
            }
            ConfigurationSource::ProjectStored => {
                let user = user.ok_or(CoreError::MissingContext("user"))?;
                self.users
                    .create_or_update(user, &build.project_key(), &outcome.cleaned)
                    .await?;
            }
            ConfigurationSource::StoredDefault => {
                let user = user.ok_or(CoreError::MissingContext("user"))?;
                self.users
                    .create_or_update(user, DEFAULT_PROJECT_KEY, &outcome.cleaned)
                    .await?;
            }
            // Built from available widgets only; nothing stored to rewrite.
            ConfigurationSource::ComputedDefault => {}
        }

        tracing::info!(
            build = %build,
            source = resolved.source.as_str(),
            removed = ?outcome.removed,
            "Persisted pruned monitoring configuration",
        );
        Ok(outcome)
    }

    pub async fn health_check(&self) -> Result<(), CoreError> {
        self.users.health_check().await?;
        self.builds.health_check().await
    }

    async fn resolve(
        &self,
        build: &BuildRef,
        user: Option<&str>,
        bootstrap: bool,
    ) -> ResolvedConfiguration {
        let computed = self.registry.default_document(build);

        if let Err(e) = build.validate() {
            tracing::warn!(build = %build, error = %e, "Resolving without a valid build");
            return ResolvedConfiguration::computed(computed);
        }

        let mut persistence_error = None;
        let mut record = |e: CoreError| {
            tracing::error!(build = %build, error = %e, "Monitoring configuration store failed");
            persistence_error.get_or_insert_with(|| e.to_string());
        };

        let pipeline = self.builds.declared(build).await.unwrap_or_else(|e| {
            record(e);
            None
        });

        let (project, stored_default) = match user {
            None => (None, None),
            Some(user) => {
                let project_key = build.project_key();
                let project = self
                    .users
                    .get(user, &project_key)
                    .await
                    .unwrap_or_else(|e| {
                        record(e);
                        None
                    });

                // Without a pipeline document or project entry the view
                // re-seeds `default` from current availability.
                if bootstrap && pipeline.is_none() && project.is_none() {
                    match self
                        .users
                        .create_or_update(user, DEFAULT_PROJECT_KEY, &computed)
                        .await
                    {
                        Ok(()) => tracing::info!(
                            user = %user,
                            document = %computed,
                            "Seeded default monitoring configuration",
                        ),
                        Err(e) => record(e),
                    }
                    (None, None)
                } else {
                    let stored_default = self
                        .users
                        .get(user, DEFAULT_PROJECT_KEY)
                        .await
                        .unwrap_or_else(|e| {
                            record(e);
                            None
                        });
                    (project, stored_default)
                }
            }
        };

        let (document, source) =
            resolver::select_effective(pipeline, project, stored_default, computed);
        let document = resolver::deduplicate(&document).document;

        tracing::debug!(
            build = %build,
            source = source.as_str(),
            document = %document,
            "Resolved monitoring configuration",
        );
        ResolvedConfiguration {
            document,
            source,
            persistence_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::BuildKind;
    use crate::store::{MemoryBuildConfigStore, MemoryUserConfigStore, StoredConfigurationEntry};
    use crate::widget::{ProviderError, WidgetDescriptor, WidgetProvider};
    use assert_matches::assert_matches;
    use async_trait::async_trait;

    /// Offers `a` (default), `b` and `c`.
    struct Sample;

    impl WidgetProvider for Sample {
        fn id(&self) -> &str {
            "sample"
        }
        fn display_name(&self) -> &str {
            "Sample"
        }
        fn list_widgets(&self, _: &BuildRef) -> Result<Vec<WidgetDescriptor>, ProviderError> {
            Ok(vec![
                WidgetDescriptor::new("a", "A", 300, 200).shown_by_default(),
                WidgetDescriptor::new("b", "B", 300, 200),
                WidgetDescriptor::new("c", "C", 300, 200),
            ])
        }
    }

    /// Offers `a` from build 1 and also `late` from build 2, both default.
    struct Growing;

    impl WidgetProvider for Growing {
        fn id(&self) -> &str {
            "growing"
        }
        fn display_name(&self) -> &str {
            "Growing"
        }
        fn list_widgets(&self, build: &BuildRef) -> Result<Vec<WidgetDescriptor>, ProviderError> {
            let mut widgets = vec![WidgetDescriptor::new("a", "A", 300, 200).shown_by_default()];
            if build.number >= 2 {
                widgets.push(WidgetDescriptor::new("late", "Late", 300, 200).shown_by_default());
            }
            Ok(widgets)
        }
    }

    /// Reads succeed with nothing stored; writes always fail.
    struct ReadOnlyUsers;

    #[async_trait]
    impl UserConfigStore for ReadOnlyUsers {
        async fn get(&self, _: &str, _: &str) -> Result<Option<ConfigurationDocument>, CoreError> {
            Ok(None)
        }
        async fn create_or_update(
            &self,
            _: &str,
            _: &str,
            _: &ConfigurationDocument,
        ) -> Result<(), CoreError> {
            Err(CoreError::Persistence("disk full".into()))
        }
        async fn remove(&self, _: &str, _: &str) -> Result<bool, CoreError> {
            Err(CoreError::Persistence("disk full".into()))
        }
        async fn entries(&self, _: &str) -> Result<Vec<StoredConfigurationEntry>, CoreError> {
            Ok(vec![])
        }
    }

    struct Fixture {
        dashboard: MonitorDashboard,
        users: Arc<MemoryUserConfigStore>,
        builds: Arc<MemoryBuildConfigStore>,
    }

    fn fixture() -> Fixture {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(Sample)).unwrap();
        let users = Arc::new(MemoryUserConfigStore::new());
        let builds = Arc::new(MemoryBuildConfigStore::new());
        Fixture {
            dashboard: MonitorDashboard::new(Arc::new(registry), users.clone(), builds.clone()),
            users,
            builds,
        }
    }

    fn pr_build(number: i64) -> BuildRef {
        BuildRef::branch("Web App", "PR-3", number).with_kind(BuildKind::ChangeRequest {
            id: "PR-3".into(),
            source_branch: "feature".into(),
            target_branch: "main".into(),
        })
    }

    fn doc(ids: &[&str]) -> ConfigurationDocument {
        ConfigurationDocument::from_ids(ids.iter().copied())
    }

    // -- effective_configuration --------------------------------------------

    #[tokio::test]
    async fn first_view_bootstraps_default_entry() {
        let f = fixture();
        let resolved = f
            .dashboard
            .effective_configuration(&pr_build(1), Some("alice"))
            .await;

        assert_eq!(resolved.document, doc(&["a"]));
        assert_eq!(resolved.source, ConfigurationSource::ComputedDefault);
        assert!(resolved.persistence_error.is_none());
        assert_eq!(
            f.users.get("alice", DEFAULT_PROJECT_KEY).await.unwrap(),
            Some(doc(&["a"]))
        );
    }

    #[tokio::test]
    async fn view_without_project_entry_reseeds_default() {
        let f = fixture();
        f.users
            .create_or_update("alice", DEFAULT_PROJECT_KEY, &doc(&["c", "b"]))
            .await
            .unwrap();

        let resolved = f
            .dashboard
            .effective_configuration(&pr_build(1), Some("alice"))
            .await;

        assert_eq!(resolved.document, doc(&["a"]));
        assert_eq!(resolved.source, ConfigurationSource::ComputedDefault);
        assert_eq!(
            f.users.get("alice", DEFAULT_PROJECT_KEY).await.unwrap(),
            Some(doc(&["a"]))
        );
    }

    #[tokio::test]
    async fn reset_after_availability_grew_returns_current_default() {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(Growing)).unwrap();
        let users = Arc::new(MemoryUserConfigStore::new());
        let dashboard = MonitorDashboard::new(
            Arc::new(registry),
            users.clone(),
            Arc::new(MemoryBuildConfigStore::new()),
        );

        dashboard.effective_configuration(&pr_build(1), Some("alice")).await;
        assert_eq!(
            users.get("alice", DEFAULT_PROJECT_KEY).await.unwrap(),
            Some(doc(&["a"]))
        );

        dashboard
            .update_configuration(&pr_build(2), Some("alice"), r#"[{"id":"late"}]"#)
            .await
            .unwrap();
        dashboard.reset_to_default(&pr_build(2), Some("alice")).await.unwrap();

        let resolved = dashboard.effective_configuration(&pr_build(2), Some("alice")).await;
        assert_eq!(resolved.document, doc(&["a", "late"]));
        assert_eq!(resolved.source, ConfigurationSource::ComputedDefault);
        assert_eq!(
            users.get("alice", DEFAULT_PROJECT_KEY).await.unwrap(),
            Some(doc(&["a", "late"]))
        );
        assert!(dashboard.is_synced(&pr_build(2), Some("alice")).await.unwrap());
    }

    #[tokio::test]
    async fn pipeline_declaration_takes_precedence() {
        let f = fixture();
        f.users
            .create_or_update("alice", "web-app", &doc(&["b"]))
            .await
            .unwrap();
        f.builds.attach(&pr_build(1), &doc(&["c"])).await.unwrap();

        let resolved = f
            .dashboard
            .effective_configuration(&pr_build(1), Some("alice"))
            .await;

        assert_eq!(resolved.document, doc(&["c"]));
        assert_eq!(resolved.source, ConfigurationSource::PipelineDeclared);
    }

    #[tokio::test]
    async fn pipeline_declaration_skips_bootstrap() {
        let f = fixture();
        f.builds.attach(&pr_build(1), &doc(&["c"])).await.unwrap();

        f.dashboard
            .effective_configuration(&pr_build(1), Some("alice"))
            .await;

        assert!(f.users.entries("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn project_entry_used_without_pipeline() {
        let f = fixture();
        f.users
            .create_or_update("alice", "web-app", &doc(&["b", "c"]))
            .await
            .unwrap();

        let resolved = f
            .dashboard
            .effective_configuration(&pr_build(1), Some("alice"))
            .await;

        assert_eq!(resolved.document, doc(&["b", "c"]));
        assert_eq!(resolved.source, ConfigurationSource::ProjectStored);
    }

    #[tokio::test]
    async fn resolution_deduplicates() {
        let f = fixture();
        let parsed = configuration::parse(r#"[{"id":"x"},{"id":"x"}]"#).unwrap();
        f.builds.attach(&pr_build(1), &parsed).await.unwrap();

        let resolved = f.dashboard.effective_configuration(&pr_build(1), None).await;

        assert_eq!(resolved.document, doc(&["x"]));
    }

    #[tokio::test]
    async fn no_user_returns_default_without_writing() {
        let f = fixture();
        let resolved = f.dashboard.effective_configuration(&pr_build(1), None).await;

        assert_eq!(resolved.document, doc(&["a"]));
        assert_eq!(resolved.source, ConfigurationSource::ComputedDefault);
    }

    #[tokio::test]
    async fn invalid_build_returns_computed_default() {
        let f = fixture();
        let resolved = f
            .dashboard
            .effective_configuration(&BuildRef::branch("", "main", 0), Some("alice"))
            .await;

        assert_eq!(resolved.document, doc(&["a"]));
        assert!(f.users.entries("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_bootstrap_still_returns_document() {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(Sample)).unwrap();
        let dashboard = MonitorDashboard::new(
            Arc::new(registry),
            Arc::new(ReadOnlyUsers),
            Arc::new(MemoryBuildConfigStore::new()),
        );

        let resolved = dashboard
            .effective_configuration(&pr_build(1), Some("alice"))
            .await;

        assert_eq!(resolved.document, doc(&["a"]));
        assert_matches!(resolved.persistence_error, Some(msg) if msg.contains("disk full"));
    }

    // -- update / reset / sync ----------------------------------------------

    #[tokio::test]
    async fn update_stores_project_entry() {
        let f = fixture();
        let stored = f
            .dashboard
            .update_configuration(&pr_build(1), Some("alice"), r#"[{"id":"b"}]"#)
            .await
            .unwrap();

        assert_eq!(stored, doc(&["b"]));
        assert_eq!(f.users.get("alice", "web-app").await.unwrap(), Some(doc(&["b"])));
    }

    #[tokio::test]
    async fn invalid_update_leaves_store_untouched() {
        let f = fixture();
        f.users
            .create_or_update("alice", "web-app", &doc(&["b"]))
            .await
            .unwrap();

        let result = f
            .dashboard
            .update_configuration(&pr_build(1), Some("alice"), "not-json")
            .await;

        assert_matches!(result, Err(CoreError::SchemaInvalid(_)));
        assert_eq!(f.users.get("alice", "web-app").await.unwrap(), Some(doc(&["b"])));
    }

    #[tokio::test]
    async fn update_without_user_is_missing_context() {
        let f = fixture();
        let result = f
            .dashboard
            .update_configuration(&pr_build(1), None, "[]")
            .await;
        assert_matches!(result, Err(CoreError::MissingContext("user")));
    }

    #[tokio::test]
    async fn update_persistence_failure_is_reported() {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(Sample)).unwrap();
        let dashboard = MonitorDashboard::new(
            Arc::new(registry),
            Arc::new(ReadOnlyUsers),
            Arc::new(MemoryBuildConfigStore::new()),
        );

        let result = dashboard
            .update_configuration(&pr_build(1), Some("alice"), "[]")
            .await;
        assert_matches!(result, Err(CoreError::Persistence(_)));
    }

    #[tokio::test]
    async fn reset_returns_fresh_default_and_is_synced() {
        let f = fixture();
        let build = pr_build(1);
        f.dashboard.effective_configuration(&build, Some("alice")).await;
        f.dashboard
            .update_configuration(&build, Some("alice"), r#"[{"id":"c"}]"#)
            .await
            .unwrap();
        assert!(!f.dashboard.is_synced(&build, Some("alice")).await.unwrap());

        f.dashboard.reset_to_default(&build, Some("alice")).await.unwrap();

        let resolved = f.dashboard.effective_configuration(&build, Some("alice")).await;
        assert_eq!(resolved.document, f.dashboard.registry().default_document(&build));
        assert!(f.dashboard.is_synced(&build, Some("alice")).await.unwrap());
    }

    #[tokio::test]
    async fn reset_refuses_default_key() {
        let f = fixture();
        let build = BuildRef::branch("Default", "main", 1);
        assert_matches!(
            f.dashboard.reset_to_default(&build, Some("alice")).await,
            Err(CoreError::Validation(_))
        );
    }

    #[tokio::test]
    async fn synced_without_user_or_entries() {
        let f = fixture();
        assert!(f.dashboard.is_synced(&pr_build(1), None).await.unwrap());
        assert!(f.dashboard.is_synced(&pr_build(1), Some("bob")).await.unwrap());
    }

    /// Two sessions writing the same entry: the later write is kept.
    #[tokio::test]
    async fn concurrent_updates_last_writer_wins() {
        let f = fixture();
        let build = pr_build(1);
        f.dashboard
            .update_configuration(&build, Some("alice"), r#"[{"id":"a"}]"#)
            .await
            .unwrap();
        f.dashboard
            .update_configuration(&build, Some("alice"), r#"[{"id":"b"}]"#)
            .await
            .unwrap();

        assert_eq!(f.users.get("alice", "web-app").await.unwrap(), Some(doc(&["b"])));
    }

    // -- unavailable / prune / changes --------------------------------------

    #[tokio::test]
    async fn unavailable_ids_of_stored_configuration() {
        let f = fixture();
        f.users
            .create_or_update("alice", "web-app", &doc(&["a", "gone", "b"]))
            .await
            .unwrap();

        let missing = f
            .dashboard
            .unavailable_widget_ids(&pr_build(1), Some("alice"))
            .await;
        assert_eq!(missing, vec!["gone"]);
    }

    #[tokio::test]
    async fn unavailable_ids_fall_back_to_stored_default() {
        let f = fixture();
        f.users
            .create_or_update("alice", DEFAULT_PROJECT_KEY, &doc(&["a", "gone"]))
            .await
            .unwrap();

        let missing = f
            .dashboard
            .unavailable_widget_ids(&pr_build(1), Some("alice"))
            .await;
        assert_eq!(missing, vec!["gone"]);
        assert_eq!(
            f.users.get("alice", DEFAULT_PROJECT_KEY).await.unwrap(),
            Some(doc(&["a", "gone"]))
        );
    }

    #[tokio::test]
    async fn unavailable_ids_do_not_bootstrap() {
        let f = fixture();
        f.dashboard
            .unavailable_widget_ids(&pr_build(1), Some("alice"))
            .await;
        assert!(f.users.entries("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn prune_persists_cleaned_project_entry() {
        let f = fixture();
        f.users
            .create_or_update("alice", "web-app", &doc(&["gone", "b"]))
            .await
            .unwrap();

        let outcome = f
            .dashboard
            .prune_stored_configuration(&pr_build(1), Some("alice"))
            .await
            .unwrap();

        assert_eq!(outcome.removed, vec!["gone"]);
        assert_eq!(f.users.get("alice", "web-app").await.unwrap(), Some(doc(&["b"])));
    }

    #[tokio::test]
    async fn prune_rewrites_pipeline_declaration() {
        let f = fixture();
        f.builds
            .attach(&pr_build(1), &doc(&["a", "gone"]))
            .await
            .unwrap();

        f.dashboard
            .prune_stored_configuration(&pr_build(1), None)
            .await
            .unwrap();

        assert_eq!(f.builds.declared(&pr_build(1)).await.unwrap(), Some(doc(&["a"])));
    }

    #[tokio::test]
    async fn changes_against_previous_build() {
        let f = fixture();
        f.builds.attach(&pr_build(1), &doc(&["a"])).await.unwrap();
        f.builds.attach(&pr_build(2), &doc(&["a", "b"])).await.unwrap();
        f.builds.attach(&pr_build(3), &doc(&["a", "b"])).await.unwrap();

        assert!(!f.dashboard.has_changes(&pr_build(1)).await.unwrap());
        assert!(f.dashboard.has_changes(&pr_build(2)).await.unwrap());
        assert!(!f.dashboard.has_changes(&pr_build(3)).await.unwrap());
        assert!(!f.dashboard.has_changes(&pr_build(4)).await.unwrap());
    }
}
