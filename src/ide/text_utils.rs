//! Text helpers for extracting the token under or before the cursor.
//!
//! All columns are byte offsets into a single line.

use crate::base::ident::{is_path_char, is_word_char};

/// Byte column where the trailing `[\w.]+` run of `prefix` begins.
///
/// Returns `prefix.len()` if `prefix` does not end in such a run.
pub fn fragment_start(prefix: &str) -> usize {
    prefix
        .char_indices()
        .rev()
        .take_while(|&(_, c)| is_path_char(c))
        .last()
        .map(|(i, _)| i)
        .unwrap_or(prefix.len())
}

/// The trailing `[\w.]+` token of the text before the cursor.
///
/// `"x = ta.sm"` yields `"ta.sm"`; a prefix ending in whitespace or
/// punctuation yields `None`.
pub fn extract_fragment(prefix: &str) -> Option<&str> {
    let fragment = &prefix[fragment_start(prefix)..];
    (!fragment.is_empty()).then_some(fragment)
}

/// Byte column where an argument-slot completion should start replacing.
///
/// Covers the trailing token plus the whitespace and the `(` or `,` that
/// precede it, so that `plot(close, col` replaces `, col`. Without a
/// trailing token the cursor column is returned.
pub fn argument_start(prefix: &str) -> usize {
    let start = fragment_start(prefix);
    if start == prefix.len() {
        return start;
    }
    let head = prefix[..start].trim_end();
    match head.chars().next_back() {
        Some(c @ ('(' | ',')) => head.len() - c.len_utf8(),
        _ => head.len(),
    }
}

/// Split `namespace.member` at the last dot.
///
/// Everything before the final dot is the namespace, so namespaces may
/// themselves contain dots. Without a dot the namespace is empty.
pub fn split_namespace(key: &str) -> (&str, &str) {
    match key.rsplit_once('.') {
        Some((namespace, member)) => (namespace, member),
        None => ("", key),
    }
}

/// The identifier (`\w+`) touching `col`.
pub fn extract_word_at_cursor(line: &str, col: usize) -> Option<&str> {
    span_at(line, col, is_word_char)
}

/// The dotted name (`[\w.]+`) touching `col`, without leading or trailing dots.
///
/// On `plot(myArray.push(1))` with the cursor anywhere in `myArray.push`,
/// this yields `"myArray.push"`.
pub fn extract_qualified_name_at_cursor(line: &str, col: usize) -> Option<&str> {
    let span = span_at(line, col, is_path_char)?.trim_matches('.');
    (!span.is_empty()).then_some(span)
}

fn span_at(line: &str, col: usize, accept: fn(char) -> bool) -> Option<&str> {
    let mut col = col.min(line.len());
    while !line.is_char_boundary(col) {
        col -= 1;
    }

    let start = line[..col]
        .char_indices()
        .rev()
        .take_while(|&(_, c)| accept(c))
        .last()
        .map(|(i, _)| i)
        .unwrap_or(col);
    let end = line[col..]
        .char_indices()
        .find(|&(_, c)| !accept(c))
        .map(|(i, _)| col + i)
        .unwrap_or(line.len());

    (start < end).then(|| &line[start..end])
}
