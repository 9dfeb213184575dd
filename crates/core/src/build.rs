//! Build identity and change-request classification.
//!
//! A [`BuildRef`] is supplied by the host build system. The core never looks
//! builds up on its own; it only derives storage keys from them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Reserved project key of the per-user fallback configuration.
pub const DEFAULT_PROJECT_KEY: &str = "default";

// ---------------------------------------------------------------------------
// BuildKind
// ---------------------------------------------------------------------------

/// Whether a build belongs to a change request (pull request) or a plain branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BuildKind {
    Branch,
    ChangeRequest {
        id: String,
        source_branch: String,
        target_branch: String,
    },
}

// ---------------------------------------------------------------------------
// BuildRef
// ---------------------------------------------------------------------------

/// Reference to one build of one job inside a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRef {
    /// Display name of the owning project (e.g. a multibranch project).
    pub project: String,
    /// Job (branch or change request) name inside the project.
    pub job: String,
    /// Build number, starting at 1.
    pub number: i64,
    pub kind: BuildKind,
}

impl BuildRef {
    /// A build of a plain branch job.
    pub fn branch(project: impl Into<String>, job: impl Into<String>, number: i64) -> Self {
        Self {
            project: project.into(),
            job: job.into(),
            number,
            kind: BuildKind::Branch,
        }
    }

    /// Replace the classification of this build.
    pub fn with_kind(mut self, kind: BuildKind) -> Self {
        self.kind = kind;
        self
    }

    /// Returns `true` if the host classified this build as part of a change request.
    pub fn is_change_request(&self) -> bool {
        matches!(self.kind, BuildKind::ChangeRequest { .. })
    }

    /// Key under which per-user configurations for this build's project are stored.
    pub fn project_key(&self) -> String {
        project_key(&self.project)
    }

    /// The immediately preceding build of the same job, if any.
    pub fn previous(&self) -> Option<BuildRef> {
        (self.number > 1).then(|| Self {
            number: self.number - 1,
            ..self.clone()
        })
    }

    /// Reject references that cannot identify a build.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.project.trim().is_empty() {
            return Err(CoreError::Validation(
                "Build project must not be empty".into(),
            ));
        }
        if self.job.trim().is_empty() {
            return Err(CoreError::Validation("Build job must not be empty".into()));
        }
        if self.number < 1 {
            return Err(CoreError::Validation(format!(
                "Build number must be positive, got {}",
                self.number
            )));
        }
        Ok(())
    }
}

impl fmt::Display for BuildRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.project, self.job, self.number)
    }
}

/// Derive the storage key for a project from its display name.
///
/// Lower-cases the name and replaces every space with a hyphen.
pub fn project_key(display_name: &str) -> String {
    display_name.to_lowercase().replace(' ', "-")
}
