//! MCP tool server plumbing.
//!
//! ## Modules
//!
//! - [`inventory`]: Tool storage and indexing
//! - [`loader`]: JSON tool definition files
//! - [`handler`]: Tool execution handlers
//! - [`registry`]: Exposure under length-limited names and dispatch by either name
//! - [`config`]: YAML configuration

// Shared types (used across modules)
pub mod config;
pub mod error;

// Subsystems
pub mod handler;
pub mod inventory;
pub mod loader;
pub mod registry;

pub use config::{McpConfig, NamingConfig, ToolSourceConfig};
pub use error::{McpError, McpResult};
pub use handler::{EchoHandler, FnHandler, ToolHandler};
// Re-export from inventory
pub use inventory::{IndexCounts, ToolDefinition, ToolEntry, ToolInventory, ToolSource};
pub use loader::{load_into, load_tool_dir, load_tool_file, parse_tool_definitions};
pub use registry::{ExposedTool, ToolRegistry};
