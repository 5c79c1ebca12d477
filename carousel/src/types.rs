//! Slide items and the strip they are laid out on
//!
//! A [`SlideList`] of `N` items is rendered as a strip of `N + 2` positions:
//!
//! ```text
//! position:  0        1   2   ...   N       N+1
//! shows:     item N   1   2   ...   item N  item 1
//!            (clone)                        (clone)
//! ```
//!
//! Positions `1..=N` hold the real items; positions `0` and `N + 1` are
//! synthetic clones of the last and first item that let the strip animate
//! past either end before snapping back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Stable identifier of a slide item
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Create an id from anything string-like
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// An item the carousel can show
///
/// The controller only needs the id (for keys and activation). Everything
/// else about an item is a rendering concern.
pub trait DisplayItem {
    /// Stable unique id
    fn id(&self) -> ItemId;

    /// Publication time, used to rank items by recency
    ///
    /// Items without one rank after every item that has one.
    fn published_at(&self) -> Option<DateTime<Utc>> {
        None
    }
}

/// Manual navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards higher positions
    Next,
    /// Towards lower positions
    Prev,
}

/// What occupies a strip position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideKind {
    /// Clone of the last item at position 0
    LeadingClone,
    /// A real item at positions `1..=N`
    Original,
    /// Clone of the first item at position `N + 1`
    TrailingClone,
}

/// Immutable ordered list of slide items
///
/// Cloning is cheap; every replacement of the list allocates a new one, so
/// [`SlideList::same_list`] tells whether two handles came from the same
/// delivery.
#[derive(Debug)]
pub struct SlideList<T> {
    items: Arc<[T]>,
}

impl<T> Clone for SlideList<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> Default for SlideList<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> From<Vec<T>> for SlideList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> SlideList<T> {
    /// Wrap the given items
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: items.into(),
        }
    }

    /// Number of real items (`N`)
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The real items in order
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Real item by 0-based index
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Highest strip position (`N + 1`)
    #[must_use]
    pub fn last_position(&self) -> usize {
        self.items.len() + 1
    }

    /// 0-based real index shown at a strip position
    ///
    /// Clones map to the item they duplicate: `0 → N-1`, `N+1 → 0`.
    /// Returns `None` for an empty list or a position past `N + 1`.
    #[must_use]
    pub fn real_index(&self, position: usize) -> Option<usize> {
        let n = self.items.len();
        if n == 0 || position > n + 1 {
            return None;
        }
        Some(match position {
            0 => n - 1,
            p if p == n + 1 => 0,
            p => p - 1,
        })
    }

    /// Item shown at a strip position (see [`SlideList::real_index`])
    #[must_use]
    pub fn item_at(&self, position: usize) -> Option<&T> {
        self.real_index(position).and_then(|i| self.items.get(i))
    }

    /// What kind of slide sits at a strip position
    #[must_use]
    pub fn kind_at(&self, position: usize) -> Option<SlideKind> {
        let n = self.items.len();
        if n == 0 || position > n + 1 {
            return None;
        }
        Some(match position {
            0 => SlideKind::LeadingClone,
            p if p == n + 1 => SlideKind::TrailingClone,
            _ => SlideKind::Original,
        })
    }

    /// Returns true if both handles share the same underlying list
    #[must_use]
    pub fn same_list(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }
}

/// Rank items by recency and keep the first `limit`
///
/// Most recently published first; ties and undated items keep their
/// original relative order.
#[must_use]
pub fn most_recent<T: DisplayItem>(mut items: Vec<T>, limit: usize) -> Vec<T> {
    // Reverse of Option's order puts Some(newest) first and None last.
    items.sort_by(|a, b| b.published_at().cmp(&a.published_at()));
    items.truncate(limit);
    items
}
