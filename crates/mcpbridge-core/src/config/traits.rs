//! Configuration provider trait

use super::settings::BridgeConfig;

/// Configuration provider abstraction
///
/// Implementations:
/// - `MemoryConfigProvider`: In-memory for testing
/// - `FileConfigProvider`: Reads from a YAML file
pub trait ConfigProvider: Send + Sync {
    /// Human-readable description of where the config comes from
    fn source(&self) -> String;

    /// Load the configuration, falling back to defaults where unset
    fn load(&self) -> ConfigResult<BridgeConfig>;
}

/// Errors that can occur during configuration operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
