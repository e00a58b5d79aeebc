//! Bounds-checked positional access.

use std::fmt;

use crate::errors::{XmlError, XmlResult};

/// A position inside a sequence, with an explicit invalid state.
///
/// The default value is [`Index::INVALID`], which is never in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Index(usize);

impl Index {
    pub const INVALID: Index = Index(usize::MAX);

    pub const fn new(i: usize) -> Self {
        Self(i)
    }

    pub const fn get(self) -> usize {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 != usize::MAX
    }
}

impl Default for Index {
    fn default() -> Self {
        Self::INVALID
    }
}

impl From<usize> for Index {
    fn from(i: usize) -> Self {
        Self(i)
    }
}

impl From<Option<usize>> for Index {
    fn from(i: Option<usize>) -> Self {
        i.map_or(Self::INVALID, Self)
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "<invalid>")
        }
    }
}

pub fn checked_at<T>(items: &[T], index: impl Into<Index>) -> XmlResult<&T> {
    let index = index.into();
    items.get(index.get()).ok_or(XmlError::OutOfRange {
        index: index.get(),
        len: items.len(),
    })
}

pub fn checked_at_mut<T>(items: &mut [T], index: impl Into<Index>) -> XmlResult<&mut T> {
    let index = index.into();
    let len = items.len();
    items.get_mut(index.get()).ok_or(XmlError::OutOfRange {
        index: index.get(),
        len,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_index_then_is_invalid() {
        let idx = Index::default();
        assert!(!idx.is_valid());
        assert_eq!(idx, Index::INVALID);
        assert_eq!(idx.to_string(), "<invalid>");
    }

    #[test]
    fn given_index_in_range_when_checked_at_then_returns_element() {
        let items = vec!["a", "b", "c"];
        assert_eq!(*checked_at(&items, 2).unwrap(), "c");
    }

    #[test]
    fn given_index_past_end_when_checked_at_then_out_of_range() {
        let items = vec![1, 2, 3];
        let err = checked_at(&items, 3).unwrap_err();
        assert!(matches!(err, XmlError::OutOfRange { index: 3, len: 3 }));
    }

    #[test]
    fn given_invalid_index_when_checked_at_then_out_of_range() {
        let items = vec![1];
        assert!(checked_at(&items, Index::INVALID).is_err());
    }

    #[test]
    fn given_mutable_access_when_checked_at_mut_then_writes_through() {
        let mut items = vec![1, 2];
        *checked_at_mut(&mut items, 0).unwrap() = 10;
        assert_eq!(items, vec![10, 2]);
        assert!(checked_at_mut(&mut items, 5).is_err());
    }
}
