//! Pipeline step that attaches a dashboard configuration to a build.
//!
//! Invalid configuration text fails the step. References to portlets that
//! are not available for the build are pruned and logged, never fatal.

use prmon_core::configuration::{self, ConfigurationDocument};
use prmon_core::registry::ProviderRegistry;
use prmon_core::resolver;
use prmon_core::store::BuildConfigStore;
use prmon_core::{BuildRef, CoreError};
use serde::Serialize;

use crate::log::BuildLog;

/// Name under which pipelines invoke the step.
pub const STEP_FUNCTION_NAME: &str = "monitoring";

pub const STEP_DISPLAY_NAME: &str = "Configure Monitoring Dashboard";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures that fail the build.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("Invalid portlet configuration: {0}")]
    SchemaInvalid(String),

    #[error("Invalid build context: {0}")]
    MissingContext(String),

    #[error("Could not attach configuration to build: {0}")]
    Persistence(String),
}

impl From<CoreError> for StepError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::SchemaInvalid(msg) => StepError::SchemaInvalid(msg),
            CoreError::Validation(msg) => StepError::MissingContext(msg),
            CoreError::MissingContext(what) => StepError::MissingContext(what.to_string()),
            CoreError::Persistence(msg) | CoreError::Unauthorized(msg) => {
                StepError::Persistence(msg)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

/// What the step needs from the running build.
pub struct StepContext<'a> {
    pub build: &'a BuildRef,
    pub registry: &'a ProviderRegistry,
    pub builds: &'a dyn BuildConfigStore,
}

/// Result of a successful step run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    /// The cleaned document: deduplicated and pruned.
    pub document: ConfigurationDocument,
    pub removed: Vec<String>,
    pub duplicates: Vec<String>,
    /// `false` when the build is not part of a change request.
    pub attached: bool,
}

/// A validated step invocation. Defaults to an empty portlet list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorStep {
    portlets: ConfigurationDocument,
}

impl MonitorStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the `portlets` parameter.
    pub fn with_portlets(text: &str) -> Result<Self, StepError> {
        let portlets = configuration::parse(text)?;
        Ok(Self { portlets })
    }

    pub fn portlets(&self) -> &ConfigurationDocument {
        &self.portlets
    }

    /// Clean the configuration for `ctx.build` and attach it when the build
    /// belongs to a change request.
    pub async fn execute(
        &self,
        ctx: &StepContext<'_>,
        log: &mut BuildLog,
    ) -> Result<StepOutcome, StepError> {
        ctx.build.validate()?;

        let pretty = serde_json::to_string_pretty(&configuration::to_value(&self.portlets))
            .unwrap_or_else(|_| self.portlets.to_string());
        log.println(format!("Portlets: {pretty}"));

        let available = ctx.registry.available_ids(ctx.build);
        log.println(format!("Available portlets: [{}]", available.join(",")));

        let deduped = resolver::deduplicate(&self.portlets);
        for id in &deduped.duplicates {
            log.println(format!(
                "Portlet with ID '{id}' already defined in list of portlets! Will remove all duplicates."
            ));
        }

        let pruned = resolver::prune_unavailable(&deduped.document, &available);
        if pruned.changed() {
            log.println(format!(
                "Can't find the following portlets {:?} in list of available portlets! Will remove them.",
                pruned.removed
            ));
        }

        let attached = ctx.build.is_change_request();
        if attached {
            log.println("Build is part of a pull request. Add monitor now.");
            ctx.builds.attach(ctx.build, &pruned.cleaned).await?;
            tracing::info!(
                build = %ctx.build,
                document = %pruned.cleaned,
                "Attached pipeline monitoring configuration",
            );
        } else {
            log.println("Build is not part of a pull request. Skip adding monitor.");
        }

        Ok(StepOutcome {
            document: pruned.cleaned,
            removed: pruned.removed,
            duplicates: deduped.duplicates,
            attached,
        })
    }
}

/// Validate `text` and run the step, logging a validation failure to the
/// build log before returning it.
pub async fn run_monitoring_step(
    text: &str,
    ctx: &StepContext<'_>,
    log: &mut BuildLog,
) -> Result<StepOutcome, StepError> {
    let step = match MonitorStep::with_portlets(text) {
        Ok(step) => step,
        Err(e) => {
            log.println(format!("{e}"));
            tracing::warn!(build = %ctx.build, error = %e, "Monitoring step failed");
            return Err(e);
        }
    };
    step.execute(ctx, log).await
}
