//! toolhub: expose tool inventories under names that fit client length limits.
//!
//! - [`tool_naming`]: name shortening and the exposed-name resolver
//! - [`toolhub_mcp`]: inventory, loader, handler table and registry
//! - [`commands`]: the `toolhub` subcommands
//! - [`logging`]: tracing subscriber setup

pub mod commands;
pub mod logging;

pub use tool_naming;
pub use toolhub_mcp;
