//! Pure resolution algorithms over configuration documents.
//!
//! Nothing here touches storage. [`crate::dashboard::MonitorDashboard`] and
//! the pipeline step combine these with the stores.

use std::collections::HashSet;

use serde::Serialize;

use crate::configuration::{self, ConfigurationDocument, WidgetReference};
use crate::widget::WidgetDescriptor;

// ---------------------------------------------------------------------------
// Pruning
// ---------------------------------------------------------------------------

/// Result of removing unavailable references from a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PruneOutcome {
    pub cleaned: ConfigurationDocument,
    /// Removed ids in document order, each listed once.
    pub removed: Vec<String>,
}

impl PruneOutcome {
    pub fn changed(&self) -> bool {
        !self.removed.is_empty()
    }
}

/// Remove every reference whose id is not in `available_ids`.
///
/// The surviving references keep their relative order.
pub fn prune_unavailable(
    document: &ConfigurationDocument,
    available_ids: &[String],
) -> PruneOutcome {
    let available: HashSet<&str> = available_ids.iter().map(String::as_str).collect();

    let mut kept = Vec::with_capacity(document.len());
    let mut removed: Vec<String> = Vec::new();
    for reference in document.references() {
        if available.contains(reference.id.as_str()) {
            kept.push(reference.clone());
        } else if !removed.contains(&reference.id) {
            removed.push(reference.id.clone());
        }
    }

    let cleaned = ConfigurationDocument::new(kept);
    if !removed.is_empty() {
        tracing::info!(
            removed = ?removed,
            before = %document,
            after = %cleaned,
            "Pruned unavailable portlets from configuration",
        );
    }
    PruneOutcome { cleaned, removed }
}

// ---------------------------------------------------------------------------
// Deduplication
// ---------------------------------------------------------------------------

/// Result of removing repeated references from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupOutcome {
    pub document: ConfigurationDocument,
    /// Ids that occurred more than once, each listed once.
    pub duplicates: Vec<String>,
}

/// Keep the first occurrence of every id and drop the rest.
pub fn deduplicate(document: &ConfigurationDocument) -> DedupOutcome {
    let mut seen = HashSet::new();
    let mut kept: Vec<WidgetReference> = Vec::with_capacity(document.len());
    let mut duplicates: Vec<String> = Vec::new();

    for reference in document.references() {
        if seen.insert(reference.id.as_str()) {
            kept.push(reference.clone());
        } else if !duplicates.contains(&reference.id) {
            duplicates.push(reference.id.clone());
        }
    }

    let deduped = ConfigurationDocument::new(kept);
    if !duplicates.is_empty() {
        tracing::warn!(
            duplicates = ?duplicates,
            before = %document,
            after = %deduped,
            "Dropped duplicate portlet references",
        );
    }
    DedupOutcome {
        document: deduped,
        duplicates,
    }
}

// ---------------------------------------------------------------------------
// Drift and sync
// ---------------------------------------------------------------------------

/// Whether the pipeline-declared configuration differs from the previous build's.
///
/// Only a present-and-different pair counts as a change.
pub fn has_changed_since_previous_build(
    current: Option<&ConfigurationDocument>,
    previous: Option<&ConfigurationDocument>,
) -> bool {
    match (current, previous) {
        (Some(current), Some(previous)) => {
            let changed = !configuration::is_equivalent(
                &configuration::serialize(current),
                &configuration::serialize(previous),
            );
            if changed {
                tracing::info!(
                    before = %previous,
                    after = %current,
                    "Pipeline configuration changed since previous build",
                );
            }
            changed
        }
        _ => false,
    }
}

/// Whether a project configuration matches the default one.
///
/// A missing document on either side counts as synced.
pub fn is_synced_with_default(
    project: Option<&ConfigurationDocument>,
    default: Option<&ConfigurationDocument>,
) -> bool {
    match (project, default) {
        (Some(project), Some(default)) => configuration::is_equivalent(
            &configuration::serialize(project),
            &configuration::serialize(default),
        ),
        _ => true,
    }
}

// ---------------------------------------------------------------------------
// Defaults and availability
// ---------------------------------------------------------------------------

/// The default-flagged widgets of `available`, in aggregation order.
pub fn default_document(available: &[WidgetDescriptor]) -> ConfigurationDocument {
    ConfigurationDocument::from_ids(
        available
            .iter()
            .filter(|w| w.is_default)
            .map(|w| w.id.clone()),
    )
}

/// Ids referenced by `document` that are not in `available_ids`.
pub fn unavailable_ids(document: &ConfigurationDocument, available_ids: &[String]) -> Vec<String> {
    let available: HashSet<&str> = available_ids.iter().map(String::as_str).collect();
    let mut missing: Vec<String> = Vec::new();
    for id in document.ids() {
        if !available.contains(id) && !missing.iter().any(|m| m == id) {
            missing.push(id.to_string());
        }
    }
    missing
}

// ---------------------------------------------------------------------------
// Precedence
// ---------------------------------------------------------------------------

/// Where an effective configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigurationSource {
    PipelineDeclared,
    ProjectStored,
    StoredDefault,
    ComputedDefault,
}

impl ConfigurationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PipelineDeclared => "pipeline_declared",
            Self::ProjectStored => "project_stored",
            Self::StoredDefault => "stored_default",
            Self::ComputedDefault => "computed_default",
        }
    }
}

/// Pick the effective document by precedence.
///
/// Pipeline-declared wins over the per-project entry, which wins over the
/// stored `default` entry, which wins over the computed default.
pub fn select_effective(
    pipeline: Option<ConfigurationDocument>,
    project: Option<ConfigurationDocument>,
    stored_default: Option<ConfigurationDocument>,
    computed_default: ConfigurationDocument,
) -> (ConfigurationDocument, ConfigurationSource) {
    if let Some(doc) = pipeline {
        return (doc, ConfigurationSource::PipelineDeclared);
    }
    if let Some(doc) = project {
        return (doc, ConfigurationSource::ProjectStored);
    }
    if let Some(doc) = stored_default {
        return (doc, ConfigurationSource::StoredDefault);
    }
    (computed_default, ConfigurationSource::ComputedDefault)
}
