//! Build-log sink for step diagnostics.

/// Lines written to the build's console by the step.
///
/// Every line is also emitted through `tracing`.
#[derive(Debug, Default, Clone)]
pub struct BuildLog {
    lines: Vec<String>,
}

impl BuildLog {
    pub const PREFIX: &'static str = "[Monitor] ";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn println(&mut self, message: impl AsRef<str>) {
        let line = format!("{}{}", Self::PREFIX, message.as_ref());
        tracing::info!(target: "prmon_pipeline::build_log", "{line}");
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Whether any line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }
}
