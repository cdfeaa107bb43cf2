//! Tool session: transport handle plus discovered catalog
//!
//! A `ToolSession` only exists after a completed handshake and tool
//! listing, so every call it accepts is made on an initialized channel.
//! `close` releases the channel exactly once; dropping an open session
//! releases it too (the child process is killed on drop).

use std::path::Path;
use std::sync::Arc;

use crate::config::BridgeConfig;
use crate::logging::Logger;
use crate::tools::ToolCatalog;
use crate::types::{arguments_to_json, ToolArguments};
use super::client::McpClient;
use super::error::{McpError, McpResult};
use super::launcher::LaunchPlan;
use super::transport::ToolTransport;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Handshake done, catalog populated
    Initialized,
    /// Channel released
    Closed,
}

/// An initialized connection to a tool server
pub struct ToolSession {
    transport: Box<dyn ToolTransport>,
    catalog: ToolCatalog,
    state: SessionState,
    logger: Arc<dyn Logger>,
}

impl ToolSession {
    /// Spawn the server script, handshake and discover its tools
    ///
    /// Unsupported script extensions fail before anything is spawned.
    pub async fn connect(
        script: &Path,
        config: &BridgeConfig,
        logger: Arc<dyn Logger>,
    ) -> McpResult<Self> {
        let plan = LaunchPlan::resolve(script, &config.launchers)?.with_env(config.env.clone());
        let client = McpClient::spawn(&plan, &config.session, Arc::clone(&logger)).await?;
        Self::open(Box::new(client), logger).await
    }

    /// Discover tools over an already-handshaken transport
    ///
    /// The transport is closed if discovery fails.
    pub async fn open(mut transport: Box<dyn ToolTransport>, logger: Arc<dyn Logger>) -> McpResult<Self> {
        let tools = match transport.list_tools().await {
            Ok(tools) => tools,
            Err(e) => {
                logger.error(&format!("[ToolSession] Tool discovery failed: {}", e));
                if let Err(close_err) = transport.close().await {
                    logger.warn(&format!("[ToolSession] Close after failed discovery: {}", close_err));
                }
                return Err(e);
            }
        };

        let catalog = ToolCatalog::new(tools);
        logger.info(&format!(
            "[ToolSession] Connected to {} with tools: {:?}",
            transport.describe(),
            catalog.names()
        ));

        Ok(Self {
            transport,
            catalog,
            state: SessionState::Initialized,
            logger,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state == SessionState::Initialized
    }

    /// The tools discovered at connect time
    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Send one `tools/call` and wait for its response
    pub async fn call_tool(&self, name: &str, arguments: &ToolArguments) -> McpResult<String> {
        self.ensure_initialized()?;
        self.logger.info(&format!("[ToolSession] Calling tool: {}", name));
        self.transport.call_tool(name, arguments_to_json(arguments)).await
    }

    /// Release the channel; later calls are no-ops
    pub async fn close(&mut self) -> McpResult<()> {
        if self.state == SessionState::Closed {
            return Ok(());
        }
        self.state = SessionState::Closed;
        self.logger.info("[ToolSession] Closing session");
        self.transport.close().await
    }

    fn ensure_initialized(&self) -> McpResult<()> {
        match self.state {
            SessionState::Initialized => Ok(()),
            SessionState::Closed => Err(McpError::Closed),
        }
    }
}

impl Drop for ToolSession {
    fn drop(&mut self) {
        if self.state != SessionState::Closed {
            // The transport's own drop tears the channel down.
            self.logger.warn("[ToolSession] Dropped without close; releasing channel");
        }
    }
}

impl std::fmt::Debug for ToolSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolSession")
            .field("transport", &self.transport.describe())
            .field("state", &self.state)
            .field("tools", &self.catalog.names())
            .finish()
    }
}
