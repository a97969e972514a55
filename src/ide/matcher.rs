//! Typo-tolerant name matching.
//!
//! Matching is a cheap stand-in for edit distance: a candidate is accepted
//! when few characters of the typed text are missing from it. Both passes
//! are case-insensitive and the typo count restarts for every candidate.

use tracing::trace;

use super::config::ResolverConfig;

/// Counts characters of `typed` that appear nowhere in `candidate`.
///
/// Counting stops once `limit` is exceeded, so the result is at most
/// `limit + 1`.
pub fn typo_count(typed: &str, candidate: &str, limit: usize) -> usize {
    let candidate = candidate.to_lowercase();
    let mut missing = 0;
    for c in typed.chars().flat_map(char::to_lowercase) {
        if !candidate.contains(c) {
            missing += 1;
            if missing > limit {
                break;
            }
        }
    }
    missing
}

/// Prefix + typo-budget matcher shared by free-symbol and method completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NameMatcher {
    free_budget: usize,
    method_budget: usize,
}

impl Default for NameMatcher {
    fn default() -> Self {
        Self::from_config(&ResolverConfig::default())
    }
}

impl NameMatcher {
    /// Create a matcher with explicit budgets.
    pub fn new(free_budget: usize, method_budget: usize) -> Self {
        Self {
            free_budget,
            method_budget,
        }
    }

    /// Take the budgets from a config.
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(config.free_symbol_typo_budget, config.method_typo_budget)
    }

    /// Free-symbol pass: `candidate` must start with the first character of
    /// `fragment`, and at most the free-symbol budget of `fragment`'s
    /// characters may be missing from it.
    pub fn matches_free(&self, fragment: &str, candidate: &str) -> bool {
        let Some(first) = fragment.chars().next() else {
            return false;
        };
        let starts = candidate
            .chars()
            .next()
            .is_some_and(|c| c.to_lowercase().eq(first.to_lowercase()));
        if !starts {
            return false;
        }

        let typos = typo_count(fragment, candidate, self.free_budget);
        if typos > self.free_budget {
            trace!("[MATCH] '{}' rejects '{}' ({} typos)", fragment, candidate, typos);
            return false;
        }
        true
    }

    /// Namespace pass: joins `namespace` with the last segment of the
    /// candidate method's name and accepts it when at most the method budget
    /// of the characters of `namespace.member` are missing from the join.
    pub fn matches_member(&self, namespace: &str, member: &str, candidate: &str) -> bool {
        if namespace.is_empty() {
            return false;
        }
        let last = candidate.rsplit('.').next().unwrap_or(candidate);
        if last.is_empty() {
            return false;
        }

        let joined = format!("{namespace}.{last}");
        let typed = format!("{namespace}.{member}");
        let typos = typo_count(&typed, &joined, self.method_budget);
        if typos > self.method_budget {
            trace!("[MATCH] '{}' rejects '{}' ({} typos)", typed, joined, typos);
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("avg", "average", true)]
    #[case("xvg", "average", false)]
    #[case("AVG", "average", true)]
    #[case("avq", "average", true)]
    #[case("azq", "average", false)]
    #[case("ta.sm", "ta.sma", true)]
    #[case("", "average", false)]
    fn test_free_symbol_pass(#[case] fragment: &str, #[case] candidate: &str, #[case] expected: bool) {
        assert_eq!(NameMatcher::default().matches_free(fragment, candidate), expected);
    }

    #[rstest]
    #[case("arr", "psh", "array.push", true)]
    #[case("arr", "psh", "xxxxxx", false)]
    #[case("arr", "", "array.clear", true)]
    #[case("arr", "sizx", "array.size", true)]
    #[case("arr", "qwj", "array.size", false)]
    #[case("", "push", "array.push", false)]
    fn test_namespace_pass(
        #[case] namespace: &str,
        #[case] member: &str,
        #[case] candidate: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(
            NameMatcher::default().matches_member(namespace, member, candidate),
            expected
        );
    }

    #[test]
    fn test_typo_count_caps_at_limit() {
        assert_eq!(typo_count("zzzzzz", "abc", 2), 3);
        assert_eq!(typo_count("abc", "cab", 2), 0);
    }

    #[test]
    fn test_budget_resets_per_candidate() {
        let matcher = NameMatcher::default();
        assert!(!matcher.matches_free("azq", "average"));
        // a rejected candidate must not leak its count into the next one
        assert!(matcher.matches_free("azq", "amazing_q"));
    }

    #[test]
    fn test_custom_budgets() {
        let strict = NameMatcher::new(0, 0);
        assert!(!strict.matches_free("avq", "average"));
        assert!(!strict.matches_member("arr", "psx", "array.push"));
        assert!(strict.matches_member("arr", "psh", "array.push"));
    }
}
