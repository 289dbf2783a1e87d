#![forbid(unsafe_code)]

//! Visible range calculation.
//!
//! Given a viewport, uniform item geometry, and a collection length, decide
//! which indices must be materialized. Work is O(1) in the collection length.
//!
//! The strictly visible window is
//!
//! ```text
//! start = floor(scroll_offset / item_size)
//! end   = ceil((scroll_offset + viewport_height) / item_size) - 1
//! ```
//!
//! widened by `overscan` on both sides and clamped to `0..=len - 1`. When the
//! bottom edge lands exactly on an item boundary, the item ending at that edge
//! is the last one included. A partially visible item at either edge is always
//! included.
//!
//! # Example
//!
//! ```
//! use wlist_core::range::{Window, compute_range};
//!
//! let window = compute_range(1000.0, 200.0, 20.0, 100, 0).unwrap();
//! let range = window.range().unwrap();
//! assert_eq!((range.start, range.end), (50, 59));
//!
//! assert_eq!(compute_range(0.0, 200.0, 20.0, 0, 0).unwrap(), Window::Empty);
//! ```

use std::ops::RangeInclusive;

use crate::error::ConfigurationError;
use crate::geometry::{ItemGeometry, ViewportState};

/// Inclusive index interval that must be materialized.
///
/// Always satisfies `start <= end`; an empty collection is expressed by
/// [`Window::Empty`], never by an inverted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisibleRange {
    /// First index to materialize.
    pub start: usize,
    /// Last index to materialize (inclusive).
    pub end: usize,
}

impl VisibleRange {
    /// Number of indices in the range.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Whether `index` falls inside the range.
    #[inline]
    pub const fn contains(&self, index: usize) -> bool {
        index >= self.start && index <= self.end
    }

    /// Iterate the indices in ascending order.
    #[inline]
    pub fn indices(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }

    /// Re-clamp a range computed against an older collection length.
    ///
    /// Returns [`Window::Empty`] when the collection has become empty.
    pub fn clamp_to(self, item_count: usize) -> Window {
        if item_count == 0 {
            return Window::Empty;
        }
        let last = item_count - 1;
        if self.end <= last {
            return Window::Visible(self);
        }
        crate::trace!(
            start = self.start,
            end = self.end,
            item_count,
            "clamping stale range to shrunk collection"
        );
        Window::Visible(Self {
            start: self.start.min(last),
            end: last,
        })
    }
}

/// Result of a range computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub enum Window {
    /// The collection has no items; hosts show the empty-state fallback.
    Empty,
    /// Indices to materialize.
    Visible(VisibleRange),
}

impl Window {
    /// Whether this is the empty-collection marker.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The visible range, if the collection is non-empty.
    #[inline]
    pub const fn range(&self) -> Option<VisibleRange> {
        match *self {
            Self::Empty => None,
            Self::Visible(range) => Some(range),
        }
    }

    /// Number of slots this window materializes.
    #[inline]
    pub const fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Visible(range) => range.len(),
        }
    }
}

/// Compute the window from raw numbers, validating them first.
///
/// Fails with [`ConfigurationError`] when `item_size` or `viewport_height` is
/// not strictly positive and finite, or when `scroll_offset` is not finite.
/// Validation happens before the empty check, so bad geometry is reported even
/// for an empty collection.
pub fn compute_range(
    scroll_offset: f64,
    viewport_height: f64,
    item_size: f64,
    item_count: usize,
    overscan: usize,
) -> Result<Window, ConfigurationError> {
    let geometry = ItemGeometry::new(item_size)?;
    let viewport = ViewportState::new(scroll_offset, viewport_height)?;
    Ok(visible_window(geometry, viewport, item_count, overscan))
}

/// Compute the window from already validated geometry.
pub fn visible_window(
    geometry: ItemGeometry,
    viewport: ViewportState,
    item_count: usize,
    overscan: usize,
) -> Window {
    if item_count == 0 {
        return Window::Empty;
    }
    let size = geometry.item_size();
    let last = item_count - 1;

    let first = to_index((viewport.scroll_offset() / size).floor());
    let past_bottom = to_index((viewport.bottom() / size).ceil());
    let span = to_index((viewport.viewport_height() / size).ceil());

    // Division rounding must neither invert the window nor widen it past
    // `ceil(viewport_height / item_size) + 1` slots.
    let strict_end = past_bottom
        .saturating_sub(1)
        .max(first)
        .min(first.saturating_add(span));

    Window::Visible(VisibleRange {
        start: first.saturating_sub(overscan).min(last),
        end: strict_end.saturating_add(overscan).min(last),
    })
}

/// Saturating conversion of a non-negative, already rounded quotient.
#[inline]
fn to_index(value: f64) -> usize {
    // `as` saturates at both ends and maps NaN to zero.
    value as usize
}
