//! `check-names` and `expose` subcommands.

use std::{
    fmt,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::Serialize;
use thiserror::Error;
use tool_naming::{audit_lengths, audit_shortening, NameResolver, NamingError};
use toolhub_mcp::{McpConfig, McpError, ToolRegistry};
use tracing::info;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Mcp(#[from] McpError),

    #[error(transparent)]
    Naming(#[from] NamingError),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CommandResult<T> = Result<T, CommandError>;

/// Load the config file (if any), apply environment overrides and append
/// `extra_tools` to the configured tool paths.
pub async fn load_config(config: Option<&Path>, extra_tools: &[PathBuf]) -> CommandResult<McpConfig> {
    let mut config = match config {
        Some(path) => McpConfig::from_file(path).await?,
        None => McpConfig::default(),
    };
    config.naming = config.naming.with_env_overrides()?;
    config.naming.validate()?;
    config.tools.paths.extend(extra_tools.iter().cloned());
    Ok(config)
}

pub async fn build_registry(config: &McpConfig) -> CommandResult<ToolRegistry> {
    let registry = ToolRegistry::from_config(config, Arc::new(NameResolver::new())).await?;
    info!(
        tools = registry.inventory().len(),
        categories = registry.inventory().categories().len(),
        "Tool inventory ready"
    );
    Ok(registry)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckNamesOptions {
    /// Limit for raw names
    pub max_len: usize,
    /// Audit exposed names instead of raw ones
    pub test_shortening: bool,
    /// Budget used with `test_shortening`, the configured naming budget if unset
    pub shortening_max_len: Option<usize>,
    /// Emit the report as JSON
    pub json: bool,
}

impl Default for CheckNamesOptions {
    fn default() -> Self {
        Self {
            max_len: 64,
            test_shortening: false,
            shortening_max_len: None,
            json: false,
        }
    }
}

fn write_report<T>(out: &mut impl Write, report: &T, json: bool) -> CommandResult<()>
where
    T: Serialize + fmt::Display,
{
    if json {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", report)?;
    }
    Ok(())
}

/// Print a length report for every tool in `registry`.
///
/// Returns `true` when every name is within the limit.
pub fn check_names(
    registry: &ToolRegistry,
    options: CheckNamesOptions,
    out: &mut impl Write,
) -> CommandResult<bool> {
    let names = registry.inventory().tool_names();

    let clean = if options.test_shortening {
        let max_length = options
            .shortening_max_len
            .unwrap_or_else(|| registry.naming().budget());
        let audit = audit_shortening(registry.resolver(), &names, max_length)?;
        write_report(out, &audit, options.json)?;
        audit.is_clean()
    } else {
        let audit = audit_lengths(names, options.max_len);
        write_report(out, &audit, options.json)?;
        audit.is_clean()
    };
    Ok(clean)
}

/// Print `exposed -> original` for every tool, in inventory order, or the
/// full exposed tool list as JSON.
pub fn expose(registry: &ToolRegistry, json: bool, out: &mut impl Write) -> CommandResult<usize> {
    let tools = registry.exposed_tools()?;
    if json {
        serde_json::to_writer_pretty(&mut *out, &tools)?;
        writeln!(out)?;
    } else {
        for tool in &tools {
            writeln!(out, "{} -> {}", tool.exposed_name, tool.original_name)?;
        }
    }
    Ok(tools.len())
}
