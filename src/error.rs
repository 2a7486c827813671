use std::error::Error;
use std::fmt;

/// Returned by [`OrderedIndex::min`](crate::OrderedIndex::min) and
/// [`OrderedIndex::max`](crate::OrderedIndex::max) when the index holds no keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyError;

impl fmt::Display for EmptyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("index is empty")
    }
}

impl Error for EmptyError {}
