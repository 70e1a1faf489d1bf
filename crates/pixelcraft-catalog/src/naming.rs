//! Id conventions: style lint, duplicate detection and id generation.

use std::collections::HashSet;
use thiserror::Error;

/// A deviation from the `lowercase_with_underscores` id convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum IdStyleIssue {
    /// Id contains a space
    #[error("ID should not contain spaces (use underscores instead)")]
    ContainsSpaces,

    /// Id has uppercase letters
    #[error("ID should be lowercase for consistency")]
    NotLowercase,

    /// Id has characters outside `[a-z0-9_]`
    #[error("ID should only contain lowercase letters, numbers, and underscores")]
    InvalidCharacters,
}

/// Check an id against the naming convention.
///
/// An empty id yields no style issues; a missing id is a structural error
/// reported by validation.
#[must_use]
pub fn lint_id(id: &str) -> Vec<IdStyleIssue> {
    let mut issues = Vec::new();
    if id.is_empty() {
        return issues;
    }
    if id.contains(' ') {
        issues.push(IdStyleIssue::ContainsSpaces);
    }
    if id.chars().any(char::is_uppercase) {
        issues.push(IdStyleIssue::NotLowercase);
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        issues.push(IdStyleIssue::InvalidCharacters);
    }
    issues
}

/// Ids that occur more than once, each listed once, in order of first repeat.
#[must_use]
pub fn find_duplicate_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();
    for id in ids {
        if !seen.insert(id) && reported.insert(id) {
            duplicates.push(id);
        }
    }
    duplicates
}

/// Derive an id from a display name.
///
/// Lowercases the name, collapses every run of non-alphanumeric characters to
/// one underscore and trims underscores at both ends. Returns `None` if
/// nothing usable remains.
#[must_use]
pub fn id_from_name(name: &str) -> Option<String> {
    let mut id = String::with_capacity(name.len());
    let mut pending_separator = false;
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !id.is_empty() {
                id.push('_');
            }
            pending_separator = false;
            id.push(c);
        } else {
            pending_separator = true;
        }
    }
    (!id.is_empty()).then_some(id)
}

/// First free id starting from `base`: `{base}`, then `{base}_2`, `{base}_3`, ...
#[must_use]
pub fn unique_id(base: &str, is_taken: impl Fn(&str) -> bool) -> String {
    if !is_taken(base) {
        return base.to_string();
    }
    let mut n: u32 = 2;
    loop {
        let candidate = format!("{base}_{n}");
        if !is_taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// First free copy id for `base`: `{base}_copy`, then `{base}_copy_2`, ...
#[must_use]
pub fn next_copy_id(base: &str, is_taken: impl Fn(&str) -> bool) -> String {
    unique_id(&format!("{base}_copy"), is_taken)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lint_clean_id() {
        assert!(lint_id("iron_ore_2").is_empty());
        assert!(lint_id("").is_empty());
    }

    #[test]
    fn test_lint_reports_each_rule() {
        assert_eq!(
            lint_id("Iron Ore"),
            vec![
                IdStyleIssue::ContainsSpaces,
                IdStyleIssue::NotLowercase,
                IdStyleIssue::InvalidCharacters
            ]
        );
        assert_eq!(lint_id("iron-ore"), vec![IdStyleIssue::InvalidCharacters]);
    }

    #[test]
    fn test_find_duplicates() {
        let ids = ["a", "b", "a", "c", "b", "a"];
        assert_eq!(find_duplicate_ids(ids), vec!["a", "b"]);
        assert!(find_duplicate_ids(["x", "X"]).is_empty());
    }

    #[test]
    fn test_id_from_name() {
        assert_eq!(id_from_name("Iron Sword +1").as_deref(), Some("iron_sword_1"));
        assert_eq!(id_from_name("  --Oak Plank--  ").as_deref(), Some("oak_plank"));
        assert_eq!(id_from_name("!!!"), None);
    }

    #[test]
    fn test_unique_id() {
        let taken = ["ore", "ore_2"];
        assert_eq!(unique_id("ore", |id| taken.contains(&id)), "ore_3");
        assert_eq!(unique_id("gem", |id| taken.contains(&id)), "gem");
    }

    #[test]
    fn test_next_copy_id() {
        let taken = ["sword", "sword_copy", "sword_copy_2"];
        assert_eq!(next_copy_id("sword", |id| taken.contains(&id)), "sword_copy_3");
        assert_eq!(next_copy_id("axe", |id| taken.contains(&id)), "axe_copy");
    }
}
