//! Configuration
//!
//! Supports multiple configuration sources:
//! - `MemoryConfigProvider`: In-memory for testing
//! - `FileConfigProvider`: YAML file-based

mod traits;
mod settings;
mod memory;
mod file;

pub use traits::{ConfigProvider, ConfigError, ConfigResult};
pub use settings::{
    default_launchers, BridgeConfig, LauncherSpec, ModelSettings, SessionSettings, ENV_API_BASE, ENV_MODEL,
    ENV_PROVIDER,
};
pub use memory::MemoryConfigProvider;
pub use file::FileConfigProvider;
