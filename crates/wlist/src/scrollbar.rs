#![forbid(unsafe_code)]

//! Scrollbar thumb geometry derived from a list's total extent.
//!
//! The renderer only reports `total_extent`; hosts that draw their own
//! scrollbar turn it into a thumb on a track of `track_len` cells.

/// Thumb placement on a scrollbar track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollbarMetrics {
    /// First track cell covered by the thumb.
    pub thumb_offset: usize,
    /// Number of track cells covered by the thumb (at least 1).
    pub thumb_len: usize,
    /// Total track cells.
    pub track_len: usize,
}

impl ScrollbarMetrics {
    /// Compute thumb placement.
    ///
    /// Returns `None` when there is no track or no content. When the content
    /// fits in the viewport the thumb fills the whole track.
    pub fn compute(
        track_len: usize,
        total_extent: f64,
        viewport_height: f64,
        scroll_offset: f64,
    ) -> Option<Self> {
        if track_len == 0 || !(total_extent > 0.0) || !total_extent.is_finite() {
            return None;
        }

        let viewport_ratio = viewport_height.max(0.0) / total_extent;
        let thumb_len = (track_len as f64 * viewport_ratio).max(1.0).round() as usize;
        let thumb_len = thumb_len.min(track_len);

        let max_offset = (total_extent - viewport_height).max(0.0);
        let pos_ratio = if max_offset == 0.0 || !scroll_offset.is_finite() {
            0.0
        } else {
            scroll_offset.clamp(0.0, max_offset) / max_offset
        };

        let available = track_len - thumb_len;
        let thumb_offset = (available as f64 * pos_ratio).round() as usize;

        Some(Self {
            thumb_offset,
            thumb_len,
            track_len,
        })
    }

    /// Whether content overflows the viewport at all.
    #[inline]
    pub fn needs_scrollbar(total_extent: f64, viewport_height: f64) -> bool {
        total_extent > viewport_height
    }

    /// Whether track cell `cell` is part of the thumb.
    #[inline]
    pub fn is_thumb(&self, cell: usize) -> bool {
        cell >= self.thumb_offset && cell < self.thumb_offset + self.thumb_len
    }

    /// Scroll offset that puts the thumb's start at track cell `cell`.
    ///
    /// Used for click-to-jump and drag. Cells past the last thumb position map
    /// to the maximum offset.
    pub fn scroll_offset_for_cell(&self, cell: usize, total_extent: f64, viewport_height: f64) -> f64 {
        let max_offset = (total_extent - viewport_height).max(0.0);
        let available = self.track_len.saturating_sub(self.thumb_len);
        if available == 0 {
            return 0.0;
        }
        let ratio = cell.min(available) as f64 / available as f64;
        ratio * max_offset
    }
}
