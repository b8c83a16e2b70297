//! Tool index with multi-key lookup.
//!
//! Thread-safe store for every tool known to this process. Provides:
//! - Lookup by original tool name
//! - Lookup by category prefix (for filtering)
//! - Insertion-ordered listing, so exposure runs in a stable order

use std::{
    collections::BTreeSet,
    sync::atomic::{AtomicU64, Ordering},
};

use dashmap::{mapref::entry::Entry, DashMap};
use tracing::warn;

use super::types::{ToolDefinition, ToolEntry};

pub struct ToolInventory {
    tools: DashMap<String, ToolEntry>,
    tools_by_category: DashMap<String, BTreeSet<String>>,
    next_seq: AtomicU64,
}

impl ToolInventory {
    pub fn new() -> Self {
        Self {
            tools: DashMap::new(),
            tools_by_category: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }
}

impl Default for ToolInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolInventory {
    /// Insert a definition as a static tool.
    pub fn insert_tool(&self, definition: ToolDefinition) {
        self.insert_entry(ToolEntry::new(definition));
    }

    /// Insert a full tool entry.
    ///
    /// Re-inserting a name replaces the entry but keeps its original position.
    pub fn insert_entry(&self, mut entry: ToolEntry) {
        let name = entry.name().to_string();
        let category = entry.category().to_string();

        match self.tools.entry(name.clone()) {
            Entry::Occupied(mut occupied) => {
                warn!(
                    tool_name = %name,
                    previous = ?occupied.get().loaded_from,
                    replacement = ?entry.loaded_from,
                    "Tool already registered, replacing definition"
                );
                entry.seq = occupied.get().seq;
                occupied.insert(entry);
            }
            Entry::Vacant(vacant) => {
                entry.seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                vacant.insert(entry);
            }
        }

        self.tools_by_category
            .entry(category)
            .or_default()
            .insert(name);
    }

    pub fn get_entry(&self, tool_name: &str) -> Option<ToolEntry> {
        self.tools.get(tool_name).map(|e| e.clone())
    }

    pub fn get_tool(&self, tool_name: &str) -> Option<ToolDefinition> {
        self.tools.get(tool_name).map(|e| e.definition.clone())
    }

    pub fn has_tool(&self, tool_name: &str) -> bool {
        self.tools.contains_key(tool_name)
    }

    /// Remove a tool. Returns the removed entry, if any.
    pub fn remove_tool(&self, tool_name: &str) -> Option<ToolEntry> {
        let (_, entry) = self.tools.remove(tool_name)?;
        if let Some(mut names) = self.tools_by_category.get_mut(entry.category()) {
            names.remove(tool_name);
        }
        self.tools_by_category
            .remove_if(entry.category(), |_, names| names.is_empty());
        Some(entry)
    }

    /// All entries in insertion order.
    pub fn list_tools(&self) -> Vec<ToolEntry> {
        let mut entries: Vec<ToolEntry> = self.tools.iter().map(|e| e.value().clone()).collect();
        entries.sort_by_key(|e| e.seq);
        entries
    }

    /// All tool names in insertion order.
    pub fn tool_names(&self) -> Vec<String> {
        self.list_tools()
            .into_iter()
            .map(|e| e.definition.name)
            .collect()
    }

    /// Entries whose name starts with `category`, in insertion order.
    pub fn list_by_category(&self, category: &str) -> Vec<ToolEntry> {
        let mut entries: Vec<ToolEntry> = self
            .tools_by_category
            .get(category)
            .map(|names| {
                names
                    .iter()
                    .filter_map(|name| self.tools.get(name).map(|e| e.clone()))
                    .collect()
            })
            .unwrap_or_default();
        entries.sort_by_key(|e| e.seq);
        entries
    }

    /// Known category prefixes, sorted.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .tools_by_category
            .iter()
            .map(|e| e.key().clone())
            .collect();
        categories.sort();
        categories
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn clear_all(&self) {
        self.tools.clear();
        self.tools_by_category.clear();
    }

    pub fn index_counts(&self) -> IndexCounts {
        IndexCounts {
            tools: self.tools.len(),
            categories: self.tools_by_category.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexCounts {
    pub tools: usize,
    pub categories: usize,
}
