// SPDX-License-Identifier: MPL-2.0
//! Sequence controller for managing the ordered media list and the
//! current index.
//!
//! This component is the single source of truth for "which item is on
//! screen". It never touches timing; the engine resets the progress
//! clock whenever the index changes.

use crate::domain::media::{sort_into_sequence, MediaItem};
use crate::error::{Error, Result};

/// Manages navigation through the ordered items of one story/reel.
///
/// The controller is only constructible from a non-empty list, so the
/// current index is valid by construction. All navigation wraps around;
/// reaching the end loops back to the first item rather than closing
/// the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceController {
    items: Vec<MediaItem>,
    current: usize,
}

impl SequenceController {
    /// Creates a controller over the given items, sorted into
    /// presentation order.
    ///
    /// `start_index` resumes mid-sequence; it is clamped to the valid
    /// range. Returns [`Error::EmptySequence`] for an empty list.
    pub fn new(mut items: Vec<MediaItem>, start_index: Option<usize>) -> Result<Self> {
        if items.is_empty() {
            return Err(Error::EmptySequence);
        }
        sort_into_sequence(&mut items);
        let current = start_index.unwrap_or(0).min(items.len() - 1);
        Ok(Self { items, current })
    }

    /// Moves to the next item, wrapping to the first after the last.
    ///
    /// Returns the new index. A single-item sequence wraps onto itself;
    /// that still counts as an index change for the caller.
    pub fn advance(&mut self) -> usize {
        self.current = if self.current < self.items.len() - 1 {
            self.current + 1
        } else {
            0
        };
        self.current
    }

    /// Moves to the previous item, wrapping to the last before the first.
    ///
    /// Returns the new index.
    pub fn retreat(&mut self) -> usize {
        self.current = if self.current > 0 {
            self.current - 1
        } else {
            self.items.len() - 1
        };
        self.current
    }

    /// Jumps to an arbitrary index, clamping silently to the valid range.
    ///
    /// Returns the new index, or `None` when the clamped target equals
    /// the current index (a no-op: no reset, no event).
    pub fn jump_to(&mut self, index: usize) -> Option<usize> {
        let target = index.min(self.items.len() - 1);
        if target == self.current {
            return None;
        }
        self.current = target;
        Some(target)
    }

    /// Returns the current index.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Returns the item at the current index.
    #[must_use]
    pub fn current_item(&self) -> &MediaItem {
        &self.items[self.current]
    }

    /// Returns the item at an arbitrary index, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&MediaItem> {
        self.items.get(index)
    }

    /// Returns the number of items in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false: an empty controller is not constructible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
