//! Alias table value object

use std::collections::HashMap;

use crate::domain::error::MalformedAliasEntry;

/// Built-in trigger bound to the operator identity
pub const ME_TRIGGER: &str = "me";

/// Built-in trigger bound to the wildcard marker
pub const EVERYONE_TRIGGER: &str = "everyone";

/// Replacement for the `everyone` trigger
pub const EVERYONE_WILDCARD: &str = "*";

/// A single trigger → replacement binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    pub trigger: String,
    pub replacement: String,
}

impl AliasEntry {
    /// Parse a `trigger,replacement` line, splitting on the first comma.
    pub fn parse(line: &str, line_number: usize) -> Result<Self, MalformedAliasEntry> {
        let (trigger, replacement) = line.split_once(',').ok_or_else(|| MalformedAliasEntry {
            line_number,
            line: line.to_string(),
        })?;

        Ok(Self {
            trigger: trigger.to_string(),
            replacement: replacement.to_string(),
        })
    }
}

/// Mapping from trigger word to replacement text.
///
/// Lookups are exact: callers pass already lower-cased tokens, so a trigger
/// containing upper-case letters never matches.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: HashMap<String, String>,
}

impl AliasTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table seeded with the built-in `me` and `everyone` aliases
    pub fn with_builtins(operator: &str) -> Self {
        let mut table = Self::new();
        table.insert(ME_TRIGGER, operator);
        table.insert(EVERYONE_TRIGGER, EVERYONE_WILDCARD);
        table
    }

    /// Insert or replace a single alias
    pub fn insert(&mut self, trigger: impl Into<String>, replacement: impl Into<String>) {
        self.entries.insert(trigger.into(), replacement.into());
    }

    /// Parse alias definition lines without touching any table.
    ///
    /// Blank lines are skipped. The first malformed line aborts parsing.
    pub fn parse_lines<'a, I>(lines: I) -> Result<Vec<AliasEntry>, MalformedAliasEntry>
    where
        I: IntoIterator<Item = &'a str>,
    {
        lines
            .into_iter()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| AliasEntry::parse(line, index + 1))
            .collect()
    }

    /// Load alias definition lines on top of the current entries.
    ///
    /// Either every line is applied or, on the first malformed line, none is.
    /// Later duplicates win.
    pub fn load<'a, I>(&mut self, lines: I) -> Result<Vec<AliasEntry>, MalformedAliasEntry>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let entries = Self::parse_lines(lines)?;
        for entry in &entries {
            self.insert(entry.trigger.clone(), entry.replacement.clone());
        }
        Ok(entries)
    }

    /// Look up the replacement bound to a token
    pub fn lookup(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    /// Number of aliases in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no aliases
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_seeded() {
        let table = AliasTable::with_builtins("Player1");
        assert_eq!(table.lookup("me"), Some("Player1"));
        assert_eq!(table.lookup("everyone"), Some("*"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn parse_splits_on_first_comma() {
        let entry = AliasEntry::parse("greet,hello, there", 1).unwrap();
        assert_eq!(entry.trigger, "greet");
        assert_eq!(entry.replacement, "hello, there");
    }

    #[test]
    fn parse_allows_empty_replacement() {
        let entry = AliasEntry::parse("um,", 1).unwrap();
        assert_eq!(entry.trigger, "um");
        assert_eq!(entry.replacement, "");
    }

    #[test]
    fn load_adds_entries() {
        let mut table = AliasTable::new();
        let loaded = table.load(["hello,greetings", "tp,teleport"]).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(table.lookup("hello"), Some("greetings"));
        assert_eq!(table.lookup("tp"), Some("teleport"));
    }

    #[test]
    fn load_overrides_builtins() {
        let mut table = AliasTable::with_builtins("Player1");
        table.load(["everyone,@all"]).unwrap();
        assert_eq!(table.lookup("everyone"), Some("@all"));
        assert_eq!(table.lookup("me"), Some("Player1"));
    }

    #[test]
    fn last_duplicate_wins() {
        let mut table = AliasTable::new();
        table.load(["go,walk", "go,run"]).unwrap();
        assert_eq!(table.lookup("go"), Some("run"));
    }

    #[test]
    fn malformed_line_aborts_whole_load() {
        let mut table = AliasTable::with_builtins("Player1");
        let err = table
            .load(["hello,greetings", "everyone", "tp,teleport"])
            .unwrap_err();

        assert_eq!(err.line_number, 2);
        assert_eq!(err.line, "everyone");
        assert_eq!(table.lookup("hello"), None);
        assert_eq!(table.lookup("tp"), None);
        assert_eq!(table.lookup("everyone"), Some("*"));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let mut table = AliasTable::new();
        table.load(["", "hello,greetings", "   "]).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn line_numbers_count_blank_lines() {
        let err = AliasTable::parse_lines(["a,b", "", "broken"]).unwrap_err();
        assert_eq!(err.line_number, 3);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let mut table = AliasTable::new();
        table.insert("hello", "greetings");
        assert_eq!(table.lookup("Hello"), None);
    }
}
