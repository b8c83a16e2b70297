//! Tool name length reports.
//!
//! [`audit_lengths`] checks raw names against a protocol limit;
//! [`audit_shortening`] runs every name through a [`NameResolver`] and reports
//! the ones that are still over budget afterwards.

use std::fmt;

use serde::Serialize;

use crate::{error::NamingResult, resolver::NameResolver, shortener::char_len};

/// Raw names split by whether they fit the limit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LengthAudit {
    pub max_length: usize,
    pub valid: Vec<String>,
    pub invalid: Vec<String>,
}

impl LengthAudit {
    pub fn total(&self) -> usize {
        self.valid.len() + self.invalid.len()
    }

    pub fn is_clean(&self) -> bool {
        self.invalid.is_empty()
    }
}

impl fmt::Display for LengthAudit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Max allowed length: {}", self.max_length)?;
        writeln!(f, "Total tools scanned: {}", self.total())?;
        writeln!(f, "Valid (<={}): {}", self.max_length, self.valid.len())?;
        write!(f, "Invalid (>{}): {}", self.max_length, self.invalid.len())?;

        if !self.invalid.is_empty() {
            writeln!(f)?;
            writeln!(f)?;
            write!(f, "Invalid tool names:")?;
            let mut invalid: Vec<&String> = self.invalid.iter().collect();
            invalid.sort();
            for name in invalid {
                writeln!(f)?;
                write!(f, "  - {} ({} chars)", name, char_len(name))?;
            }
        }
        Ok(())
    }
}

/// Split `names` into those within `max_length` characters and those over it.
pub fn audit_lengths<I, S>(names: I, max_length: usize) -> LengthAudit
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut audit = LengthAudit {
        max_length,
        ..LengthAudit::default()
    };
    for name in names {
        let name = name.into();
        if char_len(&name) <= max_length {
            audit.valid.push(name);
        } else {
            audit.invalid.push(name);
        }
    }
    audit
}

/// A name that is still over budget after shortening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverLimit {
    pub original: String,
    pub exposed: String,
    pub length: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShorteningAudit {
    pub max_length: usize,
    pub total: usize,
    /// Names whose exposed form differs from the original.
    pub shortened: usize,
    /// Longest first.
    pub over_limit: Vec<OverLimit>,
}

impl ShorteningAudit {
    pub fn is_clean(&self) -> bool {
        self.over_limit.is_empty()
    }
}

impl fmt::Display for ShorteningAudit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Testing with automatic name shortening enabled")?;
        writeln!(f, "Max allowed length: {}", self.max_length)?;
        writeln!(f, "Total tools scanned: {}", self.total)?;
        writeln!(f, "Tools shortened: {}", self.shortened)?;
        writeln!(
            f,
            "Valid after shortening: {}",
            self.total - self.over_limit.len()
        )?;
        write!(f, "Still invalid: {}", self.over_limit.len())?;

        writeln!(f)?;
        writeln!(f)?;
        if self.over_limit.is_empty() {
            write!(f, "All tools fit within limit after shortening")
        } else {
            write!(f, "Tools still exceeding limit after shortening:")?;
            for entry in &self.over_limit {
                writeln!(f)?;
                writeln!(f, "  - {}", entry.original)?;
                write!(f, "    -> {} ({} chars)", entry.exposed, entry.length)?;
            }
            Ok(())
        }
    }
}

/// Expose every name through `resolver` and report what still does not fit.
///
/// Registers the mappings as a side effect, exactly as the exposure path would.
pub fn audit_shortening<I, S>(
    resolver: &NameResolver,
    names: I,
    max_length: usize,
) -> NamingResult<ShorteningAudit>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut audit = ShorteningAudit {
        max_length,
        ..ShorteningAudit::default()
    };

    for name in names {
        let original = name.as_ref();
        let exposed = resolver.get_exposed_name(original, max_length)?;
        audit.total += 1;

        if exposed != original {
            audit.shortened += 1;
        }
        let length = char_len(&exposed);
        if length > max_length {
            audit.over_limit.push(OverLimit {
                original: original.to_string(),
                exposed,
                length,
            });
        }
    }

    audit
        .over_limit
        .sort_by(|a, b| b.length.cmp(&a.length).then_with(|| a.original.cmp(&b.original)));
    Ok(audit)
}
