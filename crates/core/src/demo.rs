//! Sample provider for trying the dashboard without real portlets.

use crate::build::BuildRef;
use crate::widget::{ProviderError, WidgetDescriptor, WidgetProvider};

pub const DEMO_PROVIDER_ID: &str = "pull-request-monitoring-demo";

const DEMO_WIDTH: u32 = 300;
const DEMO_HEIGHT: u32 = 200;

/// Offers two static portlets for every build.
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoProvider;

impl WidgetProvider for DemoProvider {
    fn id(&self) -> &str {
        DEMO_PROVIDER_ID
    }

    fn display_name(&self) -> &str {
        "Pull Request Monitoring (Demo)"
    }

    fn list_widgets(&self, _build: &BuildRef) -> Result<Vec<WidgetDescriptor>, ProviderError> {
        Ok(vec![
            WidgetDescriptor::new("first-demo-portlet", "Good First Portlet", DEMO_WIDTH, DEMO_HEIGHT)
                .shown_by_default(),
            WidgetDescriptor::new("second-demo-portlet", "Another Portlet", DEMO_WIDTH, DEMO_HEIGHT),
        ])
    }
}
