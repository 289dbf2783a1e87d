#![forbid(unsafe_code)]

//! Geometric primitives for a vertical strip of uniformly sized items.
//!
//! All values live in one caller-chosen 1D coordinate space (logical pixels,
//! terminal rows, ...). Constructors validate once so the hot path can treat
//! geometry as trusted.

use crate::error::{ConfigurationError, positive_finite};

/// Uniform per-item extent along the scroll axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemGeometry {
    item_size: f64,
}

impl ItemGeometry {
    /// Create item geometry, rejecting zero, negative, and non-finite sizes.
    pub fn new(item_size: f64) -> Result<Self, ConfigurationError> {
        if !positive_finite(item_size) {
            return Err(ConfigurationError::NonPositiveItemSize { item_size });
        }
        Ok(Self { item_size })
    }

    /// Extent of a single item.
    #[inline]
    pub const fn item_size(&self) -> f64 {
        self.item_size
    }

    /// Full scrollable extent implied by `item_count` items.
    ///
    /// Independent of any scroll position or visible window.
    #[inline]
    pub fn total_extent(&self, item_count: usize) -> f64 {
        item_count as f64 * self.item_size
    }

    /// Upper bound on slots a viewport of `viewport_height` can need.
    ///
    /// `ceil(viewport_height / item_size) + 1`, plus `overscan` on each side.
    #[inline]
    pub fn max_slots(&self, viewport_height: f64, overscan: usize) -> usize {
        // `as` saturates, so extreme ratios pin to `usize::MAX` instead of wrapping.
        let strict = ((viewport_height / self.item_size).ceil() as usize).saturating_add(1);
        strict.saturating_add(overscan.saturating_mul(2))
    }
}

/// Scroll position and size of the host viewport for one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    scroll_offset: f64,
    viewport_height: f64,
}

impl ViewportState {
    /// Create a viewport state.
    ///
    /// A negative `scroll_offset` (host overscroll) is pinned to zero. NaN or
    /// infinite offsets and non-positive heights are rejected.
    pub fn new(scroll_offset: f64, viewport_height: f64) -> Result<Self, ConfigurationError> {
        if !scroll_offset.is_finite() {
            return Err(ConfigurationError::NonFiniteScrollOffset { scroll_offset });
        }
        if !positive_finite(viewport_height) {
            return Err(ConfigurationError::NonPositiveViewportHeight { viewport_height });
        }
        Ok(Self {
            scroll_offset: scroll_offset.max(0.0),
            viewport_height,
        })
    }

    /// Distance scrolled from the start of the content.
    #[inline]
    pub const fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Visible extent of the viewport.
    #[inline]
    pub const fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Offset of the viewport's bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.scroll_offset + self.viewport_height
    }

    /// Same height at a different scroll offset.
    ///
    /// Negative offsets are pinned to zero; a NaN or infinite offset keeps the
    /// current one.
    #[must_use]
    pub fn at(self, scroll_offset: f64) -> Self {
        if !scroll_offset.is_finite() {
            return self;
        }
        Self {
            scroll_offset: scroll_offset.max(0.0),
            ..self
        }
    }
}

/// Cross-axis presentation width handed through to the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Width {
    /// Take whatever width the host makes available.
    #[default]
    Full,
    /// A fixed width in the same units as the host's cross axis.
    Fixed(f64),
}

impl Width {
    /// Create a fixed width, rejecting zero, negative, and non-finite values.
    pub fn fixed(width: f64) -> Result<Self, ConfigurationError> {
        if !positive_finite(width) {
            return Err(ConfigurationError::NonPositiveWidth { width });
        }
        Ok(Self::Fixed(width))
    }

    /// Resolve against the width the host has available.
    #[inline]
    pub fn resolve(&self, available: f64) -> f64 {
        match *self {
            Self::Full => available,
            Self::Fixed(w) => w.min(available),
        }
    }
}
