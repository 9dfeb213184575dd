//! The `monitoring` pipeline step: declares a build's dashboard configuration.

pub mod log;
pub mod step;

pub use log::BuildLog;
pub use step::{
    run_monitoring_step, MonitorStep, StepContext, StepError, StepOutcome, STEP_DISPLAY_NAME,
    STEP_FUNCTION_NAME,
};
