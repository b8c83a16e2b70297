//! Bidirectional cache of exposed tool names.
//!
//! [`NameResolver`] turns the shortener's best-effort candidates into exposed
//! names that are unique per resolver, and answers "which original does this
//! name refer to?" for callers that may use either form.
//!
//! Mappings are created on first request for a `(name, max_length)` pair and are
//! never changed afterwards. When two originals shorten to the same candidate,
//! the first requester keeps it and later ones get `_2`, `_3`, ... appended.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::{
    error::{NamingError, NamingResult},
    shortener::{category_prefix, char_len, shorten, take_chars, SEGMENT_DELIMITER},
};

/// Budget for exposed names: MCP's 64-character limit minus the `mcp__tu__` prefix.
pub const DEFAULT_MAX_LENGTH: usize = 55;

/// Highest numeric suffix tried before giving up on a candidate.
pub const MAX_SUFFIX: usize = 999;

const FIRST_SUFFIX: usize = 2;

/// One committed `original -> exposed` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameMapping {
    pub original: String,
    pub exposed: String,
    pub max_length: usize,
}

impl NameMapping {
    pub fn is_shortened(&self) -> bool {
        self.original != self.exposed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolverCounts {
    /// Committed `(original, max_length)` pairs.
    pub mappings: usize,
    /// Distinct exposed names.
    pub exposed_names: usize,
    pub aliases: usize,
}

#[derive(Debug, Default)]
struct NameCache {
    /// `max_length -> original -> exposed`
    by_budget: HashMap<usize, HashMap<String, String>>,
    /// `exposed -> original`, shared by every budget.
    by_exposed: HashMap<String, String>,
    aliases: HashMap<String, String>,
    /// Commit order, for snapshots.
    history: Vec<NameMapping>,
}

impl NameCache {
    fn exposed_for(&self, name: &str, max_length: usize) -> Option<&str> {
        self.by_budget
            .get(&max_length)
            .and_then(|names| names.get(name))
            .map(String::as_str)
    }

    /// `true` if `exposed` is free or already belongs to `name`. An alias
    /// holds its string for its primary name.
    fn is_available(&self, exposed: &str, name: &str) -> bool {
        match self.by_exposed.get(exposed) {
            Some(owner) => owner == name,
            None => self
                .aliases
                .get(exposed)
                .map_or(true, |primary| primary == name),
        }
    }

    fn disambiguate(&self, name: &str, candidate: &str, max_length: usize) -> NamingResult<String> {
        (FIRST_SUFFIX..=MAX_SUFFIX)
            .map(|n| with_suffix(candidate, n, max_length))
            .find(|suffixed| self.is_available(suffixed, name))
            .ok_or_else(|| NamingError::NameSpaceExhausted {
                base: candidate.to_string(),
                max_length,
                max_suffix: MAX_SUFFIX,
            })
    }

    fn commit(&mut self, name: &str, exposed: &str, max_length: usize) {
        self.by_budget
            .entry(max_length)
            .or_default()
            .insert(name.to_string(), exposed.to_string());
        self.by_exposed
            .entry(exposed.to_string())
            .or_insert_with(|| name.to_string());
        self.history.push(NameMapping {
            original: name.to_string(),
            exposed: exposed.to_string(),
            max_length,
        });
    }
}

/// Append `_n` to `candidate`, trimming its tail so a candidate that fit the
/// budget still fits. The category prefix is never trimmed.
fn with_suffix(candidate: &str, n: usize, max_length: usize) -> String {
    let suffix = format!("{SEGMENT_DELIMITER}{n}");
    let candidate_len = char_len(candidate);

    let mut base = candidate;
    if candidate_len <= max_length && candidate_len + char_len(&suffix) > max_length {
        let room = max_length.saturating_sub(char_len(&suffix));
        let keep = room.max(char_len(category_prefix(candidate)));
        base = take_chars(candidate, keep).trim_end_matches(SEGMENT_DELIMITER);
    }

    format!("{base}{suffix}")
}

/// Collision-free `original <-> exposed` name mapping.
///
/// One instance is shared by the exposure path and the execution entry point.
/// A single lock guards the whole cache so that check-then-commit is atomic:
/// two concurrent first requests for the same name always observe one mapping.
#[derive(Debug, Default)]
pub struct NameResolver {
    cache: Mutex<NameCache>,
}

impl NameResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exposed name for `name` under `max_length`, creating it on first request.
    ///
    /// Repeated calls with the same arguments return the same value no matter
    /// what was shortened in between. Names that already fit are returned
    /// unchanged but still registered, so [`resolve`](Self::resolve) works for
    /// every exposed name.
    ///
    /// # Errors
    /// [`NamingError::NameSpaceExhausted`] when the candidate and all of its
    /// suffixed forms `_2` through `_999` belong to other names. Nothing is
    /// committed in that case.
    pub fn get_exposed_name(&self, name: &str, max_length: usize) -> NamingResult<String> {
        let mut cache = self.cache.lock();

        if let Some(exposed) = cache.exposed_for(name, max_length) {
            return Ok(exposed.to_string());
        }

        let candidate = shorten(name, max_length);
        let exposed = if cache.is_available(&candidate, name) {
            candidate.into_owned()
        } else {
            let exposed = cache.disambiguate(name, &candidate, max_length)?;
            warn!(
                tool_name = name,
                candidate = %candidate,
                exposed = %exposed,
                "Shortened tool name collision, added numeric suffix"
            );
            exposed
        };

        if char_len(name) > max_length && char_len(&exposed) > max_length {
            warn!(
                tool_name = name,
                exposed = %exposed,
                max_length,
                "Exposed tool name still exceeds length budget"
            );
        }

        cache.commit(name, &exposed, max_length);
        debug!(tool_name = name, exposed = %exposed, max_length, "Registered exposed tool name");

        Ok(exposed)
    }

    /// Original name behind `name`.
    ///
    /// Exposed names map back to their original, aliases to their primary name.
    /// Anything else is assumed to be an original already and is returned as-is.
    pub fn resolve(&self, name: &str) -> String {
        let cache = self.cache.lock();
        cache
            .by_exposed
            .get(name)
            .or_else(|| cache.aliases.get(name))
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }

    /// Original for an exposed name, without the passthrough fallback.
    pub fn lookup_original(&self, exposed: &str) -> Option<String> {
        self.cache.lock().by_exposed.get(exposed).cloned()
    }

    /// Previously issued exposed name, without creating one.
    pub fn lookup_exposed(&self, name: &str, max_length: usize) -> Option<String> {
        self.cache
            .lock()
            .exposed_for(name, max_length)
            .map(str::to_string)
    }

    /// Make `alias` resolve to `primary`. Overwrites an existing alias.
    pub fn register_alias(&self, alias: impl Into<String>, primary: impl Into<String>) {
        let alias = alias.into();
        let primary = primary.into();
        let mut cache = self.cache.lock();

        if let Some(existing) = cache.aliases.get(&alias) {
            if *existing != primary {
                warn!(
                    alias = %alias,
                    existing = %existing,
                    primary = %primary,
                    "Alias already registered, overwriting"
                );
            }
        }
        if cache.by_exposed.contains_key(&alias) {
            warn!(alias = %alias, "Alias shadowed by an exposed tool name");
        }

        cache.aliases.insert(alias, primary);
    }

    pub fn resolve_alias(&self, alias: &str) -> Option<String> {
        self.cache.lock().aliases.get(alias).cloned()
    }

    /// All aliases as `(alias, primary)`, sorted by alias.
    pub fn list_aliases(&self) -> Vec<(String, String)> {
        let mut aliases: Vec<_> = self
            .cache
            .lock()
            .aliases
            .iter()
            .map(|(alias, primary)| (alias.clone(), primary.clone()))
            .collect();
        aliases.sort();
        aliases
    }

    /// Committed mappings in the order they were created.
    pub fn mappings(&self) -> Vec<NameMapping> {
        self.cache.lock().history.clone()
    }

    pub fn counts(&self) -> ResolverCounts {
        let cache = self.cache.lock();
        ResolverCounts {
            mappings: cache.history.len(),
            exposed_names: cache.by_exposed.len(),
            aliases: cache.aliases.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        let cache = self.cache.lock();
        cache.history.is_empty() && cache.aliases.is_empty()
    }

    /// Drop every mapping and alias.
    pub fn clear(&self) {
        let mut cache = self.cache.lock();
        *cache = NameCache::default();
    }
}
