//! Core types for the tool inventory.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tool_naming::category_prefix;

/// How a tool entered the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToolSource {
    /// Loaded from a JSON tool definition file
    #[default]
    Static,
    /// Registered in code at startup
    Custom,
}

/// A tool as described by its JSON definition.
///
/// Only `name` is required. Fields this crate does not interpret are kept in
/// `extra` so definitions survive a load/serialize cycle unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub tool_type: Option<String>,

    /// JSON schema of the tool arguments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            tool_type: None,
            parameter: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_parameter(mut self, schema: Value) -> Self {
        self.parameter = Some(schema);
        self
    }

    /// Provider prefix of the name (`FDA`, `UniProt`, ...).
    pub fn category(&self) -> &str {
        category_prefix(&self.name)
    }
}

/// Tool entry with inventory metadata.
#[derive(Debug, Clone)]
pub struct ToolEntry {
    pub definition: ToolDefinition,
    pub source: ToolSource,
    pub loaded_from: Option<PathBuf>,
    /// Insertion order within the inventory
    pub(crate) seq: u64,
}

impl ToolEntry {
    pub fn new(definition: ToolDefinition) -> Self {
        Self {
            definition,
            source: ToolSource::default(),
            loaded_from: None,
            seq: 0,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: ToolSource) -> Self {
        self.source = source;
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.loaded_from = Some(path.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn category(&self) -> &str {
        self.definition.category()
    }
}
