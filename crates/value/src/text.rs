//! Text values
//!
//! A text value is either a single `char` or a shared UTF-8 string. Both are
//! one logical kind: `'a'` equals `"a"`, orders with it, and hashes like it.
//! Ordering is by Unicode code point, which is byte order for UTF-8.

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::writer::ValueWriter;

/// UTF-8 text, stored as a `char` or as a cheaply clonable `Arc<str>`
#[derive(Debug, Clone)]
pub enum TextValue {
    Char(char),
    String(Arc<str>),
}

impl TextValue {
    /// Create a string text value
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Self::String(s.into())
    }

    /// Run `f` on the text as `&str` without allocating
    #[inline]
    pub fn with_str<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        match self {
            Self::Char(c) => {
                let mut buf = [0_u8; 4];
                f(c.encode_utf8(&mut buf))
            }
            Self::String(s) => f(s),
        }
    }

    /// Byte length of the UTF-8 encoding
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::Char(c) => c.len_utf8(),
            Self::String(s) => s.len(),
        }
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of Unicode scalar values (O(n) for strings)
    pub fn char_count(&self) -> usize {
        match self {
            Self::Char(_) => 1,
            Self::String(s) => s.chars().count(),
        }
    }

    /// Compare by code point
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Char(a), Self::Char(b)) => a.cmp(b),
            (Self::String(a), Self::String(b)) => a.as_ref().cmp(b.as_ref()),
            _ => self.with_str(|a| other.with_str(|b| a.cmp(b))),
        }
    }

    pub(crate) fn hash_into<H: Hasher>(&self, state: &mut H) {
        self.with_str(|s| s.hash(state));
    }

    /// Push this text through `write_char` or `write_string`
    pub fn write_to<W: ValueWriter + ?Sized>(&self, writer: &mut W) -> Result<(), W::Error> {
        match self {
            Self::Char(c) => writer.write_char(*c),
            Self::String(s) => writer.write_string(s),
        }
    }
}

impl From<char> for TextValue {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

impl From<&str> for TextValue {
    fn from(s: &str) -> Self {
        Self::String(Arc::from(s))
    }
}

impl From<String> for TextValue {
    fn from(s: String) -> Self {
        Self::String(Arc::from(s.into_boxed_str()))
    }
}
