//! Resolve how to start a tool server script from its extension

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tokio::process::Command;

use crate::config::LauncherSpec;
use super::error::{McpError, McpResult};

/// A resolved command line for a tool server script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub program: String,
    pub args: Vec<String>,
    pub script: PathBuf,
    pub env: BTreeMap<String, String>,
}

impl LaunchPlan {
    /// Pick a launcher for `script` by its extension
    ///
    /// Fails with `UnsupportedScriptKind` when the extension is missing or
    /// has no launcher.
    pub fn resolve(script: &Path, launchers: &BTreeMap<String, LauncherSpec>) -> McpResult<Self> {
        let unsupported = || McpError::UnsupportedScriptKind {
            path: script.to_path_buf(),
            supported: supported_extensions(launchers),
        };

        let ext = script
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(unsupported)?;

        let spec = launchers.get(&ext).ok_or_else(unsupported)?;

        let mut args = spec.args.clone();
        args.push(script.to_string_lossy().into_owned());

        Ok(Self {
            program: spec.command.clone(),
            args,
            script: script.to_path_buf(),
            env: BTreeMap::new(),
        })
    }

    /// Add environment variables for the child process
    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = env;
        self
    }

    /// Build the command to spawn
    pub fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command.envs(&self.env);
        command.kill_on_drop(true);
        command
    }

    /// Command line for log output
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn supported_extensions(launchers: &BTreeMap<String, LauncherSpec>) -> String {
    launchers
        .keys()
        .map(|ext| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(", ")
}
