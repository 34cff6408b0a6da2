//! Length checked strings.

use crate::prelude::*;
use std::ops::Deref;

/// Returned when a string exceeds the bound of a [BoundedString].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("'{text}' is {len} bytes long, at most {max} are allowed")]
pub struct TooLong {
    pub text: String,
    pub len: usize,
    pub max: usize,
}

/// A string of at most `N` bytes.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoundedString<const N: usize>(String);

impl<const N: usize> BoundedString<N> {
    /// Maximum length in bytes.
    pub const MAX: usize = N;

    /// Creates a new bounded string, failing if `text` exceeds `N` bytes.
    pub fn new(text: &str) -> Result<Self, TooLong> {
        if text.len() > N {
            Err(TooLong { text: text.to_string(), len: text.len(), max: N })
        } else {
            Ok(Self(text.to_string()))
        }
    }
    /// Returns the string as a slice.
    pub fn as_str(self: &Self) -> &str {
        &self.0
    }
    /// Converts into the underlying String.
    pub fn into_string(self: Self) -> String {
        self.0
    }
}

impl<const N: usize> Deref for BoundedString<N> {
    type Target = str;
    fn deref(self: &Self) -> &str {
        &self.0
    }
}

impl<const N: usize> PartialEq<str> for BoundedString<N> {
    fn eq(self: &Self, other: &str) -> bool {
        self.0 == other
    }
}

impl<const N: usize> PartialEq<&str> for BoundedString<N> {
    fn eq(self: &Self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl<const N: usize> Display for BoundedString<N> {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<const N: usize> Debug for BoundedString<N> {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
