//! Tool catalog, argument validation and dispatch
//!
//! ```text
//! ┌──────────────┐  ToolCall   ┌─────────────┐  tools/call  ┌─────────────┐
//! │ Orchestrator │ ──────────▶ │ ToolInvoker │ ───────────▶ │ ToolSession │
//! └──────────────┘             └─────────────┘              └─────────────┘
//!        ▲          ToolResult        │  ToolCatalog lookup +
//!        └────────────────────────────┘  schema validation
//! ```

mod catalog;
mod invoker;
mod validation;

pub use catalog::ToolCatalog;
pub use invoker::ToolInvoker;
pub use validation::validate_arguments;
