//! Portlet descriptors and the provider capability that produces them.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::build::BuildRef;

// ---------------------------------------------------------------------------
// WidgetDescriptor
// ---------------------------------------------------------------------------

/// Metadata of one dashboard portlet, produced fresh for each request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct WidgetDescriptor {
    /// Globally unique, stable identifier of the logical widget.
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub title: String,
    /// Preferred width in pixels.
    #[validate(range(min = 1))]
    pub preferred_width: u32,
    /// Preferred height in pixels.
    #[validate(range(min = 1))]
    pub preferred_height: u32,
    /// Icon shown in the portlet picker; `None` means the default icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    /// Relative link to a detail view of the portlet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_link: Option<String>,
    /// Included in the default configuration when nothing else is configured.
    #[serde(default)]
    pub is_default: bool,
}

impl WidgetDescriptor {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        preferred_width: u32,
        preferred_height: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            preferred_width,
            preferred_height,
            icon_url: None,
            detail_link: None,
            is_default: false,
        }
    }

    pub fn with_icon(mut self, icon_url: impl Into<String>) -> Self {
        self.icon_url = Some(icon_url.into());
        self
    }

    pub fn with_detail_link(mut self, link: impl Into<String>) -> Self {
        self.detail_link = Some(link.into());
        self
    }

    /// Mark the widget as part of the default configuration.
    pub fn shown_by_default(mut self) -> Self {
        self.is_default = true;
        self
    }
}

// ---------------------------------------------------------------------------
// WidgetProvider
// ---------------------------------------------------------------------------

/// Failure reported by a provider while listing its widgets.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ProviderError(pub String);

/// A pluggable source of zero or more portlets for a given build.
///
/// Providers are long-lived and enumerated on every call, so they must
/// reflect build-specific availability. A provider asked about a build that
/// is still running or lacks the data it renders should return an empty list.
pub trait WidgetProvider: Send + Sync {
    /// Stable identifier of the provider.
    fn id(&self) -> &str;

    /// Group label shown above this provider's widgets in the portlet picker.
    fn display_name(&self) -> &str;

    fn list_widgets(&self, build: &BuildRef) -> Result<Vec<WidgetDescriptor>, ProviderError>;
}
