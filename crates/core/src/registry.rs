//! Registry of portlet providers and widget discovery.
//!
//! Providers are registered once at startup and asked for their widgets on
//! every lookup, so availability always reflects the build being viewed.

use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use serde::Serialize;
use validator::Validate;

use crate::build::BuildRef;
use crate::configuration::ConfigurationDocument;
use crate::error::CoreError;
use crate::widget::{WidgetDescriptor, WidgetProvider};

/// Widgets of one provider, as shown in one group of the portlet picker.
#[derive(Debug, Clone, Serialize)]
pub struct WidgetGroup {
    pub provider_id: String,
    pub display_name: String,
    pub widgets: Vec<WidgetDescriptor>,
}

/// Ordered set of registered providers.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn WidgetProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider. Registration order is enumeration order.
    pub fn register(&mut self, provider: Arc<dyn WidgetProvider>) -> Result<(), CoreError> {
        let id = provider.id();
        if id.trim().is_empty() {
            return Err(CoreError::Validation("Provider id must not be empty".into()));
        }
        if self.providers.iter().any(|p| p.id() == id) {
            return Err(CoreError::Validation(format!(
                "Provider '{id}' is already registered"
            )));
        }
        tracing::debug!(provider = %id, "Registered portlet provider");
        self.providers.push(provider);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn provider_ids(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.id()).collect()
    }

    /// Every widget available for `build`, in provider registration order.
    ///
    /// Widget ids are unique in the result; when two providers report the
    /// same id the one registered first is kept.
    pub fn available_widgets(&self, build: &BuildRef) -> Vec<WidgetDescriptor> {
        self.available_widget_groups(build)
            .into_iter()
            .flat_map(|group| group.widgets)
            .collect()
    }

    /// Available widgets grouped by provider. Providers with no widgets for
    /// `build` are omitted.
    pub fn available_widget_groups(&self, build: &BuildRef) -> Vec<WidgetGroup> {
        let mut seen = HashSet::new();
        self.providers
            .iter()
            .filter_map(|provider| {
                let widgets: Vec<_> = collect_from(provider.as_ref(), build)
                    .into_iter()
                    .filter(|w| {
                        let fresh = seen.insert(w.id.clone());
                        if !fresh {
                            tracing::warn!(
                                provider = %provider.id(),
                                widget_id = %w.id,
                                "Duplicate portlet id, keeping the first registered",
                            );
                        }
                        fresh
                    })
                    .collect();
                (!widgets.is_empty()).then(|| WidgetGroup {
                    provider_id: provider.id().to_string(),
                    display_name: provider.display_name().to_string(),
                    widgets,
                })
            })
            .collect()
    }

    /// Widgets of a single provider for `build`. Unknown providers yield none.
    pub fn available_widgets_for_provider(
        &self,
        provider_id: &str,
        build: &BuildRef,
    ) -> Vec<WidgetDescriptor> {
        self.providers
            .iter()
            .find(|p| p.id() == provider_id)
            .map(|p| collect_from(p.as_ref(), build))
            .unwrap_or_default()
    }

    /// Ids of every widget available for `build`.
    pub fn available_ids(&self, build: &BuildRef) -> Vec<String> {
        self.available_widgets(build)
            .into_iter()
            .map(|w| w.id)
            .collect()
    }

    /// The computed default configuration for `build`.
    pub fn default_document(&self, build: &BuildRef) -> ConfigurationDocument {
        crate::resolver::default_document(&self.available_widgets(build))
    }
}

/// Ask one provider for its widgets, isolating its failures.
///
/// Errors and panics are logged and treated as "no widgets". Descriptors
/// that fail validation are skipped.
fn collect_from(provider: &dyn WidgetProvider, build: &BuildRef) -> Vec<WidgetDescriptor> {
    let listed = catch_unwind(AssertUnwindSafe(|| provider.list_widgets(build)));

    let widgets = match listed {
        Ok(Ok(widgets)) => widgets,
        Ok(Err(e)) => {
            tracing::warn!(
                provider = %provider.id(),
                build = %build,
                error = %e,
                "Portlet provider failed, ignoring its portlets",
            );
            return Vec::new();
        }
        Err(_) => {
            tracing::error!(
                provider = %provider.id(),
                build = %build,
                "Portlet provider panicked, ignoring its portlets",
            );
            return Vec::new();
        }
    };

    widgets
        .into_iter()
        .filter(|w| match w.validate() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    provider = %provider.id(),
                    widget_id = %w.id,
                    error = %e,
                    "Invalid portlet descriptor skipped",
                );
                false
            }
        })
        .collect()
}
