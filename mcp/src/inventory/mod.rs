//! Tool inventory and indexing.
//!
//! This module provides tool storage and lookup with support for:
//! - Insertion-ordered listing for deterministic exposure
//! - Category prefix filtering
//! - Definitions loaded from JSON files or registered in code

pub mod index;
pub mod types;

pub use index::{IndexCounts, ToolInventory};
pub use types::{ToolDefinition, ToolEntry, ToolSource};
