//! Word-level truncation of tool names.
//!
//! A tool name is a run of `_`-delimited segments. The first segment is the
//! category prefix (`FDA`, `UniProt`, `euhealthinfo`) and is always kept. Every
//! later segment longer than three characters is cut to its first four; shorter
//! segments (`by`, `get`, `on`, `for`) pass through untouched.
//!
//! Lengths are counted in `char`s, so multi-byte names are never split inside a
//! character.

use std::borrow::Cow;

/// Separator between name segments.
pub const SEGMENT_DELIMITER: char = '_';

/// Segments up to this many characters are kept verbatim.
const VERBATIM_SEGMENT_CHARS: usize = 3;

/// Longer segments are cut down to this many characters.
const TRUNCATED_SEGMENT_CHARS: usize = 4;

/// Length of `s` in characters.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// First segment of `name`. The whole name when it has no delimiter.
pub fn category_prefix(name: &str) -> &str {
    name.split_once(SEGMENT_DELIMITER)
        .map_or(name, |(prefix, _)| prefix)
}

/// Shorten `name` so it fits `max_length` characters where the rule allows.
///
/// Names that already fit are returned as-is. The result is a pure function of
/// its arguments but is not guaranteed to fit: a long category prefix or many
/// short segments can leave it over budget.
pub fn shorten(name: &str, max_length: usize) -> Cow<'_, str> {
    if char_len(name) <= max_length {
        return Cow::Borrowed(name);
    }

    let mut segments = name.split(SEGMENT_DELIMITER);
    let mut shortened = String::with_capacity(name.len());

    if let Some(prefix) = segments.next() {
        shortened.push_str(prefix);
    }
    for segment in segments {
        shortened.push(SEGMENT_DELIMITER);
        shortened.push_str(truncate_segment(segment));
    }

    Cow::Owned(shortened)
}

fn truncate_segment(segment: &str) -> &str {
    if char_len(segment) <= VERBATIM_SEGMENT_CHARS {
        segment
    } else {
        take_chars(segment, TRUNCATED_SEGMENT_CHARS)
    }
}

/// The first `n` characters of `s`.
pub(crate) fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FDA_LONG: &str = "FDA_get_info_on_conditions_for_doctor_consultation_by_drug_name";

    #[test]
    fn test_long_name_is_shortened() {
        let shortened = shorten(FDA_LONG, 55);
        assert_eq!(shortened, "FDA_get_info_on_cond_for_doct_cons_by_drug_name");
        assert_eq!(char_len(&shortened), 47);
    }

    #[test]
    fn test_name_within_budget_is_unchanged() {
        let name = "UniProt_get_function_by_accession";
        let shortened = shorten(name, 55);
        assert!(matches!(shortened, Cow::Borrowed(_)));
        assert_eq!(shortened, name);
    }

    #[test]
    fn test_name_exactly_at_budget_is_unchanged() {
        let name = "FDA_get_drug_labels";
        assert_eq!(shorten(name, char_len(name)), name);
        assert_ne!(shorten(name, char_len(name) - 1), name);
    }

    #[test]
    fn test_segment_rules() {
        // 3 chars verbatim, 4 chars verbatim, 5-6 chars cut, 7+ chars cut
        let shortened = shorten("cat_abc_abcd_abcdef_abcdefghij", 10);
        assert_eq!(shortened, "cat_abc_abcd_abcd_abcd");
    }

    #[test]
    fn test_category_prefix_is_never_truncated() {
        let name = "euhealthinfo_search_diabetes_mellitus_epidemiology_registry";
        let shortened = shorten(name, 55);
        assert_eq!(shortened, "euhealthinfo_sear_diab_mell_epid_regi");
        assert!(shortened.starts_with("euhealthinfo_"));
    }

    #[test]
    fn test_oversized_prefix_is_kept_over_budget() {
        let name = "averyveryverylongcategoryprefix_tool";
        let shortened = shorten(name, 10);
        assert_eq!(shortened, "averyveryverylongcategoryprefix_tool");
        assert!(char_len(&shortened) > 10);
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(shorten("", 1), "");
    }

    #[test]
    fn test_name_without_delimiter() {
        assert_eq!(shorten("monolithicname", 4), "monolithicname");
    }

    #[test]
    fn test_empty_segments_are_preserved() {
        assert_eq!(shorten("FDA__double__underscore", 10), "FDA__doub__unde");
    }

    #[test]
    fn test_multibyte_segments_cut_on_char_boundary() {
        let name = "Gene_ĉĉĉĉĉĉĉ_ñandúes_übersetzung";
        let shortened = shorten(name, 20);
        assert_eq!(shortened, "Gene_ĉĉĉĉ_ñand_über");
        assert_eq!(char_len(&shortened), 19);
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        // 12 chars, 23 bytes
        let name = "ĉĉĉ_ĉĉĉĉĉĉĉĉ";
        assert_eq!(shorten(name, 12), name);
    }

    #[test]
    fn test_shorten_is_deterministic() {
        assert_eq!(shorten(FDA_LONG, 40), shorten(FDA_LONG, 40));
    }

    #[test]
    fn test_category_prefix() {
        assert_eq!(category_prefix(FDA_LONG), "FDA");
        assert_eq!(category_prefix("single"), "single");
        assert_eq!(category_prefix("_leading"), "");
        assert_eq!(category_prefix(""), "");
    }

    #[test]
    fn test_take_chars() {
        assert_eq!(take_chars("abcdef", 4), "abcd");
        assert_eq!(take_chars("abc", 4), "abc");
        assert_eq!(take_chars("ĉĉĉĉĉ", 2), "ĉĉ");
    }
}
