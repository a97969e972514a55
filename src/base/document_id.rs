//! Keys for per-document request state.

use std::fmt;

/// An open document, as numbered by the editor layer.
///
/// The core never interprets the number. It only keys state that must not
/// leak between buffers, such as the completion handoff slot.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct DocumentId(u32);

impl DocumentId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc#{}", self.0)
    }
}
