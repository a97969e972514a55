//! Identifier character classes.
//!
//! Pine identifiers follow the Unicode XID rules; dotted paths
//! (`strategy.entry`, `myArray.push`) join identifiers with `.`.

/// A character that may appear inside an identifier (`\w`).
#[inline]
pub fn is_word_char(c: char) -> bool {
    c == '_' || unicode_ident::is_xid_continue(c)
}

/// A character that may start an identifier.
#[inline]
pub fn is_ident_start(c: char) -> bool {
    c == '_' || unicode_ident::is_xid_start(c)
}

/// A character of a dotted token (`[\w.]`).
#[inline]
pub fn is_path_char(c: char) -> bool {
    c == '.' || is_word_char(c)
}

/// Whether `text` is a single identifier.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if is_ident_start(first) => chars.all(is_word_char),
        _ => false,
    }
}

/// Whether `text` is one or more identifiers joined by single dots.
pub fn is_identifier_path(text: &str) -> bool {
    !text.is_empty() && text.split('.').all(is_identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_path() {
        assert!(is_identifier_path("close"));
        assert!(is_identifier_path("_tmp1"));
        assert!(is_identifier_path("obj.field"));
        assert!(!is_identifier_path(""));
        assert!(!is_identifier_path("a..b"));
        assert!(!is_identifier_path("a."));
        assert!(!is_identifier_path("1abc"));
        assert!(!is_identifier_path("f(x)"));
        assert!(!is_identifier_path("arr[0]"));
    }

    #[test]
    fn test_path_chars() {
        assert!(is_path_char('.'));
        assert!(is_path_char('é'));
        assert!(is_path_char('9'));
        assert!(!is_path_char('('));
        assert!(!is_path_char(' '));
    }
}
