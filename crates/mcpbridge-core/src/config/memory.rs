//! In-memory configuration provider

use std::sync::RwLock;

use super::settings::BridgeConfig;
use super::traits::{ConfigProvider, ConfigResult};

/// In-memory configuration provider for testing and embedding
#[derive(Debug, Default)]
pub struct MemoryConfigProvider {
    config: RwLock<BridgeConfig>,
}

impl MemoryConfigProvider {
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config: RwLock::new(config),
        }
    }

    /// Replace the stored configuration
    pub fn set(&self, config: BridgeConfig) {
        if let Ok(mut guard) = self.config.write() {
            *guard = config;
        }
    }
}

impl ConfigProvider for MemoryConfigProvider {
    fn source(&self) -> String {
        "memory".to_string()
    }

    fn load(&self) -> ConfigResult<BridgeConfig> {
        let config = self
            .config
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default();
        config.validate()
    }
}
