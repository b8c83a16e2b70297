//! Tool definition loading.
//!
//! Tool definitions live in JSON files holding either a single definition
//! object or an array of them. Directories are scanned for `*.json` files in
//! file name order so the inventory order is reproducible.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::{
    error::{McpError, McpResult},
    inventory::{ToolDefinition, ToolEntry, ToolInventory, ToolSource},
};

/// Parse the contents of one tool definition file.
pub fn parse_tool_definitions(content: &str, source_name: &str) -> McpResult<Vec<ToolDefinition>> {
    let invalid = |reason: String| McpError::InvalidDefinition {
        source_name: source_name.to_string(),
        reason,
    };

    let values = match serde_json::from_str::<Value>(content)? {
        Value::Array(values) => values,
        value @ Value::Object(_) => vec![value],
        other => {
            return Err(invalid(format!(
                "expected an object or array, found {}",
                json_kind(&other)
            )))
        }
    };

    values
        .into_iter()
        .enumerate()
        .map(|(idx, value)| {
            let definition: ToolDefinition = serde_json::from_value(value)
                .map_err(|e| invalid(format!("entry {}: {}", idx, e)))?;
            if definition.name.trim().is_empty() {
                return Err(invalid(format!("entry {}: empty tool name", idx)));
            }
            Ok(definition)
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Load all definitions from one JSON file.
pub async fn load_tool_file(path: &Path) -> McpResult<Vec<ToolDefinition>> {
    let content = tokio::fs::read_to_string(path).await?;
    let definitions = parse_tool_definitions(&content, &path.display().to_string())?;
    debug!(path = %path.display(), count = definitions.len(), "Loaded tool definition file");
    Ok(definitions)
}

/// `*.json` files directly inside `dir`, sorted by path.
pub async fn list_tool_files(dir: &Path) -> McpResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json && entry.file_type().await?.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load every `*.json` file in `dir`, in file name order.
pub async fn load_tool_dir(dir: &Path) -> McpResult<Vec<(PathBuf, Vec<ToolDefinition>)>> {
    let mut loaded = Vec::new();
    for file in list_tool_files(dir).await? {
        let definitions = load_tool_file(&file).await?;
        loaded.push((file, definitions));
    }
    Ok(loaded)
}

/// Load every file or directory in `paths` into `inventory`.
///
/// Returns the number of definitions loaded. Stops at the first unreadable or
/// invalid file.
pub async fn load_into(inventory: &ToolInventory, paths: &[PathBuf]) -> McpResult<usize> {
    let mut loaded = 0;

    for path in paths {
        let files = if tokio::fs::metadata(path).await?.is_dir() {
            load_tool_dir(path).await?
        } else {
            vec![(path.clone(), load_tool_file(path).await?)]
        };

        for (file, definitions) in files {
            for definition in definitions {
                inventory.insert_entry(
                    ToolEntry::new(definition)
                        .with_source(ToolSource::Static)
                        .with_path(&file),
                );
                loaded += 1;
            }
        }
    }

    info!(
        loaded,
        tools = inventory.len(),
        "Loaded tool definitions"
    );
    Ok(loaded)
}
