// SPDX-License-Identifier: MPL-2.0
//! Media descriptors consumed by the engine.
//!
//! The host supplies one [`MediaItem`] per story entry; the engine never
//! fetches media itself and only looks at the `kind` to pick a timing
//! strategy. Everything else (the URL in particular) is carried through
//! untouched for the renderer.

/// Represents different types of media in a story sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaKind {
    /// Static image (JPEG, PNG, WebP, etc.)
    Image,
    /// Video with its own duration, reported by the playback surface.
    Video,
    /// Unresolved or failed media. Timed like a static image so the
    /// sequence keeps moving past it.
    #[default]
    Unknown,
}

impl MediaKind {
    /// Returns true if the item reports its own position and duration.
    #[must_use]
    pub fn is_video(self) -> bool {
        matches!(self, Self::Video)
    }

    /// Returns true if the item is timed against a fixed budget.
    #[must_use]
    pub fn uses_fixed_timing(self) -> bool {
        !self.is_video()
    }
}

/// A single entry of a story/reel sequence.
///
/// Items are immutable once supplied. The engine sorts them by
/// [`display_order`](MediaItem::display_order) (ties broken by id, so the
/// resulting sequence is deterministic) before building a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    id: String,
    url: String,
    kind: MediaKind,
    order: u32,
}

impl MediaItem {
    /// Creates a new media item descriptor.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        url: impl Into<String>,
        kind: MediaKind,
        order: u32,
    ) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            kind,
            order,
        }
    }

    /// Returns the host-assigned identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the media URL for the renderer.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the media kind used for timing-strategy selection.
    #[must_use]
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Returns the host-assigned display order.
    #[must_use]
    pub fn display_order(&self) -> u32 {
        self.order
    }
}

/// Sorts items into presentation order: by display order, ties by id.
pub(crate) fn sort_into_sequence(items: &mut [MediaItem]) {
    items.sort_by(|a, b| {
        a.order
            .cmp(&b.order)
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_kind_is_unknown() {
        assert_eq!(MediaKind::default(), MediaKind::Unknown);
    }

    #[test]
    fn kind_timing_selection() {
        assert!(MediaKind::Video.is_video());
        assert!(!MediaKind::Image.is_video());

        assert!(MediaKind::Image.uses_fixed_timing());
        assert!(MediaKind::Unknown.uses_fixed_timing());
        assert!(!MediaKind::Video.uses_fixed_timing());
    }

    #[test]
    fn sort_orders_by_display_order_then_id() {
        let mut items = vec![
            MediaItem::new("b", "b.mp4", MediaKind::Video, 2),
            MediaItem::new("c", "c.jpg", MediaKind::Image, 1),
            MediaItem::new("a", "a.jpg", MediaKind::Image, 2),
        ];
        sort_into_sequence(&mut items);

        let ids: Vec<&str> = items.iter().map(MediaItem::id).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }
}
