//! Logger backed by `tracing`
//!
//! Messages are emitted under the `mcpbridge` target with the component
//! name as a field, so `RUST_LOG=mcpbridge=debug` enables everything.

use super::traits::Logger;

/// Forwards log calls to the `tracing` macros
#[derive(Debug, Clone)]
pub struct TracingLogger {
    component: String,
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl TracingLogger {
    pub fn new() -> Self {
        Self::with_component("mcpbridge")
    }

    /// Create a logger that tags every event with a component name
    pub fn with_component(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }
}

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "mcpbridge", component = %self.component, "{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "mcpbridge", component = %self.component, "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "mcpbridge", component = %self.component, "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "mcpbridge", component = %self.component, "{}", message);
    }
}
