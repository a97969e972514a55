//! Resolver tuning knobs.

use smol_str::SmolStr;

/// Options controlling completion and hover resolution.
///
/// The typo budgets are empirically tuned: 1 keeps free-symbol completion
/// quiet on short identifiers, 2 tolerates a slip in `receiver.member`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Deserialize))]
#[cfg_attr(feature = "json", serde(default, rename_all = "camelCase"))]
pub struct ResolverConfig {
    /// Max characters of the typed fragment absent from a free-symbol name
    pub free_symbol_typo_budget: usize,
    /// Max characters of `namespace.member` absent from a method's joined name
    pub method_typo_budget: usize,
    /// Lines starting with this (after indentation) get no completions
    pub comment_prefix: SmolStr,
    /// Lines starting with this keyword get no completions
    pub import_keyword: SmolStr,
    /// Method names starting with this live in the hover-only wildcard bucket
    pub wildcard_prefix: char,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            free_symbol_typo_budget: 1,
            method_typo_budget: 2,
            comment_prefix: SmolStr::new_static("//"),
            import_keyword: SmolStr::new_static("import"),
            wildcard_prefix: '*',
        }
    }
}

impl ResolverConfig {
    /// Set the free-symbol typo budget.
    pub fn with_free_symbol_typo_budget(mut self, budget: usize) -> Self {
        self.free_symbol_typo_budget = budget;
        self
    }

    /// Set the method typo budget.
    pub fn with_method_typo_budget(mut self, budget: usize) -> Self {
        self.method_typo_budget = budget;
        self
    }

    /// Set the comment prefix.
    pub fn with_comment_prefix(mut self, prefix: impl Into<SmolStr>) -> Self {
        self.comment_prefix = prefix.into();
        self
    }

    /// Set the marker that starts wildcard-bucket method names.
    pub fn with_wildcard_prefix(mut self, prefix: char) -> Self {
        self.wildcard_prefix = prefix;
        self
    }

    /// Whether completion is suppressed on `line`: comments and import
    /// statements. The keyword must stand alone, so `importance = 1` is
    /// not an import.
    pub fn is_excluded_line(&self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.starts_with(self.comment_prefix.as_str()) {
            return true;
        }
        match trimmed.strip_prefix(self.import_keyword.as_str()) {
            Some(rest) => rest.chars().next().is_none_or(char::is_whitespace),
            None => false,
        }
    }

    /// Whether `name` belongs to the wildcard method bucket.
    pub fn is_wildcard(&self, name: &str) -> bool {
        name.starts_with(self.wildcard_prefix)
    }

    /// The wildcard-bucket key for `member` (`*.member`).
    pub fn wildcard_key(&self, member: &str) -> String {
        format!("{}.{}", self.wildcard_prefix, member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.free_symbol_typo_budget, 1);
        assert_eq!(config.method_typo_budget, 2);
        assert_eq!(config.wildcard_key("copy"), "*.copy");
    }

    #[test]
    fn test_excluded_lines() {
        let config = ResolverConfig::default();
        assert!(config.is_excluded_line("   // plot(close)"));
        assert!(config.is_excluded_line("import TradingView/ta/5 as tav"));
        assert!(config.is_excluded_line("import"));
        assert!(!config.is_excluded_line("x = ta.sma(close, 14)"));
        assert!(!config.is_excluded_line("importance = ta.sm"));
        assert!(!config.is_excluded_line("imports.push(1)"));
    }

    #[test]
    fn test_builders() {
        let config = ResolverConfig::default()
            .with_free_symbol_typo_budget(0)
            .with_method_typo_budget(3)
            .with_comment_prefix("#");
        assert_eq!(config.free_symbol_typo_budget, 0);
        assert_eq!(config.method_typo_budget, 3);
        assert!(config.is_excluded_line("# note"));
    }
}
