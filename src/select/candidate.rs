//! Candidates and the choices built from them

use crate::layout::Row;

/// An item offered for selection, plus where it came from
///
/// Items replayed from the recents store may be stale; the flag travels next
/// to the item so it never leaks into persisted or re-fetched data.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<T> {
    pub item: T,
    pub is_recent: bool,
}

impl<T> Candidate<T> {
    /// A candidate replayed from the recents store
    pub const fn recent(item: T) -> Self {
        Self {
            item,
            is_recent: true,
        }
    }

    /// A candidate fetched from the live source
    pub const fn live(item: T) -> Self {
        Self {
            item,
            is_recent: false,
        }
    }
}

/// One row of the interactive list
///
/// A choice without a value is a placeholder: it can be highlighted but
/// confirming it selects nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice<T> {
    pub title: Row,
    pub value: Option<T>,
}

impl<T> Choice<T> {
    /// A selectable choice
    pub const fn new(title: Row, value: T) -> Self {
        Self {
            title,
            value: Some(value),
        }
    }

    /// A non-selectable, muted row
    pub fn placeholder(text: impl Into<String>) -> Self {
        Self {
            title: Row::muted(text),
            value: None,
        }
    }

    /// Whether confirming this choice selects something
    pub const fn is_selectable(&self) -> bool {
        self.value.is_some()
    }
}
