//! Domain core of the pull-request monitoring dashboard.

pub mod build;
pub mod configuration;
pub mod dashboard;
pub mod demo;
pub mod error;
pub mod registry;
pub mod resolver;
pub mod store;
pub mod widget;

pub use build::{BuildKind, BuildRef, DEFAULT_PROJECT_KEY};
pub use configuration::{ConfigurationDocument, WidgetReference};
pub use dashboard::{MonitorDashboard, ResolvedConfiguration};
pub use error::CoreError;
pub use registry::{ProviderRegistry, WidgetGroup};
pub use resolver::{ConfigurationSource, DedupOutcome, PruneOutcome};
pub use widget::{ProviderError, WidgetDescriptor, WidgetProvider};
