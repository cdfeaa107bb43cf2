//! File-based configuration provider (YAML)
//!
//! Reads user-level (~/.config/mcpbridge/config.yaml) or an explicit path.

use std::fs;
use std::path::{Path, PathBuf};

use super::settings::BridgeConfig;
use super::traits::{ConfigProvider, ConfigResult};

/// File-based configuration provider
///
/// A missing file is not an error: the defaults are used instead.
///
/// # Example
///
/// ```no_run
/// use mcpbridge_core::config::{ConfigProvider, FileConfigProvider};
///
/// let config = FileConfigProvider::user().load()?;
/// # Ok::<(), mcpbridge_core::config::ConfigError>(())
/// ```
pub struct FileConfigProvider {
    path: PathBuf,
}

impl FileConfigProvider {
    /// Create a new file config provider for a specific path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a user-level config provider (~/.config/mcpbridge/config.yaml)
    pub fn user() -> Self {
        // XDG config directory (~/.config on Linux, ~/Library/Application Support on macOS)
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        Self::new(config_dir.join("mcpbridge").join("config.yaml"))
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the config file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl std::fmt::Debug for FileConfigProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileConfigProvider")
            .field("path", &self.path)
            .field("exists", &self.exists())
            .finish()
    }
}

impl ConfigProvider for FileConfigProvider {
    fn source(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> ConfigResult<BridgeConfig> {
        if !self.exists() {
            return BridgeConfig::default().validate();
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return BridgeConfig::default().validate();
        }

        let config: BridgeConfig = serde_yaml::from_str(&content)?;
        config.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let provider = FileConfigProvider::new(dir.path().join("config.yaml"));

        assert!(!provider.exists());
        assert_eq!(provider.load().unwrap(), BridgeConfig::default());
    }

    #[test]
    fn test_yaml_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            r#"
model:
  provider: azure
  model: gpt-4o
  api_base: https://example.openai.azure.com/
  api_key_env: AZURE_OPENAI_API_KEY
  max_output_tokens: 500
launchers:
  py: { command: python3, args: ["-u"] }
env:
  DEMO_MODE: "1"
session:
  connect_timeout_secs: 5
"#,
        )
        .unwrap();

        let config = FileConfigProvider::new(&path).load().unwrap();
        assert_eq!(config.model.provider, "azure");
        assert_eq!(config.model.api_key_env.as_deref(), Some("AZURE_OPENAI_API_KEY"));
        assert_eq!(config.model.max_output_tokens, 500);
        assert_eq!(config.model.timeout_secs, 120);
        assert_eq!(config.launchers["py"].command, "python3");
        assert_eq!(config.launchers["py"].args, vec!["-u".to_string()]);
        // Only the listed launchers are kept when the table is given
        assert!(!config.launchers.contains_key("js"));
        assert_eq!(config.env["DEMO_MODE"], "1");
        assert_eq!(config.session.connect_timeout_secs, 5);
        assert_eq!(config.session.call_timeout_secs, 120);
    }

    #[test]
    fn test_partial_model_section_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "model:\n  model: llama3.2\n").unwrap();

        let config = FileConfigProvider::new(&path).load().unwrap();
        assert_eq!(config.model.provider, "openai");
        assert_eq!(config.model.model, "llama3.2");
        assert_eq!(config.launchers["js"].command, "node");
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "model: [unclosed").unwrap();

        assert!(matches!(
            FileConfigProvider::new(&path).load(),
            Err(ConfigError::Parse(_))
        ));
    }
}
