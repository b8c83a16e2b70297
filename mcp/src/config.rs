//! MCP configuration types and utilities.
//!
//! Defines how tool names are exposed and where tool definitions are loaded from.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tool_naming::char_len;

use crate::error::{McpError, McpResult};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct McpConfig {
    /// Exposed tool name settings
    #[serde(default)]
    pub naming: NamingConfig,

    /// Tool definition sources (loaded at startup)
    #[serde(default)]
    pub tools: ToolSourceConfig,
}

/// Exposed tool name configuration.
///
/// MCP clients qualify tool names with a server prefix (`mcp__tu__`) and reject
/// qualified names longer than `protocol_limit`. The budget left for the tool
/// name itself is `protocol_limit - len(prefix)` unless `max_length` overrides it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NamingConfig {
    /// Shorten names that do not fit the budget.
    /// Default: true
    #[serde(default = "default_true")]
    pub shorten_names: bool,

    /// Maximum qualified name length accepted by clients.
    /// Default: 64
    #[serde(default = "default_protocol_limit")]
    pub protocol_limit: usize,

    /// Prefix clients put in front of every tool name.
    /// Default: "mcp__tu__"
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Explicit budget, overriding `protocol_limit - len(prefix)`.
    #[serde(default)]
    pub max_length: Option<usize>,
}

/// Where tool definitions come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ToolSourceConfig {
    /// JSON files, or directories of `*.json` files
    #[serde(default)]
    pub paths: Vec<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_protocol_limit() -> usize {
    64
}

fn default_prefix() -> String {
    "mcp__tu__".to_string()
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            shorten_names: default_true(),
            protocol_limit: default_protocol_limit(),
            prefix: default_prefix(),
            max_length: None,
        }
    }
}

impl NamingConfig {
    /// Character budget for an exposed tool name.
    pub fn budget(&self) -> usize {
        self.max_length
            .unwrap_or_else(|| self.protocol_limit.saturating_sub(char_len(&self.prefix)))
    }

    pub fn validate(&self) -> McpResult<()> {
        if self.budget() == 0 {
            return Err(McpError::Config(format!(
                "naming budget is zero (protocol_limit {}, prefix '{}')",
                self.protocol_limit, self.prefix
            )));
        }
        if let Some(max_length) = self.max_length {
            let available = self.protocol_limit.saturating_sub(char_len(&self.prefix));
            if max_length > available {
                return Err(McpError::Config(format!(
                    "naming.max_length {} exceeds the {} characters left after prefix '{}'",
                    max_length, available, self.prefix
                )));
            }
        }
        Ok(())
    }

    /// Apply `TOOLHUB_SHORTEN_NAMES` and `TOOLHUB_NAME_MAX_LENGTH` if set.
    pub fn with_env_overrides(mut self) -> McpResult<Self> {
        if let Ok(value) = std::env::var("TOOLHUB_SHORTEN_NAMES") {
            self.shorten_names = parse_bool(&value).ok_or_else(|| {
                McpError::Config(format!("TOOLHUB_SHORTEN_NAMES: invalid boolean '{}'", value))
            })?;
        }
        if let Ok(value) = std::env::var("TOOLHUB_NAME_MAX_LENGTH") {
            let max_length = value.trim().parse::<usize>().map_err(|e| {
                McpError::Config(format!("TOOLHUB_NAME_MAX_LENGTH: {} ('{}')", e, value))
            })?;
            self.max_length = Some(max_length);
        }
        Ok(self)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl McpConfig {
    /// Load configuration from a YAML file
    pub async fn from_file(path: impl AsRef<Path>) -> McpResult<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> McpResult<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.naming.validate()?;
        Ok(config)
    }
}
