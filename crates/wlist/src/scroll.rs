#![forbid(unsafe_code)]

//! Host-side scroll state.
//!
//! The renderer never owns a scroll position; hosts that have no native
//! scroll container can use [`ScrollState`] to keep one and turn it into a
//! [`ViewportState`] for each render pass. Offsets are in the same units as
//! the item size, and every operation clamps to
//! `0..=max(0, content_extent - viewport_height)`.

use wlist_core::{ConfigurationError, ItemGeometry, ViewportState, slot_offset};

/// Where to place an item when scrolling it into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollAlign {
    /// Item's top edge at the viewport's top edge.
    Start,
    /// Item centered in the viewport.
    Center,
    /// Item's bottom edge at the viewport's bottom edge.
    End,
    /// Scroll as little as possible; no-op if already fully visible.
    #[default]
    Nearest,
}

/// Scroll offset, viewport height, and follow mode for one list.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollState {
    viewport: ViewportState,
    /// Stick to the bottom as content grows.
    follow_mode: bool,
}

impl ScrollState {
    /// Create a state scrolled to the top.
    pub fn new(viewport_height: f64) -> Result<Self, ConfigurationError> {
        Ok(Self {
            viewport: ViewportState::new(0.0, viewport_height)?,
            follow_mode: false,
        })
    }

    /// Create with follow mode enabled.
    #[must_use]
    pub fn with_follow(mut self, follow: bool) -> Self {
        self.follow_mode = follow;
        self
    }

    /// Get current scroll offset.
    #[inline]
    pub fn scroll_offset(&self) -> f64 {
        self.viewport.scroll_offset()
    }

    /// Get viewport height.
    #[inline]
    pub fn viewport_height(&self) -> f64 {
        self.viewport.viewport_height()
    }

    /// Check if follow mode is enabled.
    #[inline]
    pub fn follow_mode(&self) -> bool {
        self.follow_mode
    }

    /// Viewport to hand to the renderer for the next pass.
    #[inline]
    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    /// Largest valid scroll offset for `content_extent`.
    #[inline]
    pub fn max_offset(&self, content_extent: f64) -> f64 {
        (content_extent - self.viewport_height()).max(0.0)
    }

    /// Scroll by `delta` (positive = down). Non-finite deltas are ignored.
    ///
    /// Any non-zero delta disables follow mode.
    pub fn scroll_by(&mut self, delta: f64, content_extent: f64) {
        if !delta.is_finite() {
            return;
        }
        self.set_clamped(self.scroll_offset() + delta, content_extent);
        if delta != 0.0 {
            self.follow_mode = false;
        }
    }

    /// Scroll to an absolute offset. Non-finite offsets are ignored.
    pub fn scroll_to(&mut self, offset: f64, content_extent: f64) {
        if !offset.is_finite() {
            return;
        }
        self.set_clamped(offset, content_extent);
        self.follow_mode = false;
    }

    /// Scroll so that `index` is visible according to `align`.
    ///
    /// Indices past the end are clamped to the last item; an empty list
    /// scrolls to the top.
    pub fn scroll_to_index(
        &mut self,
        index: usize,
        align: ScrollAlign,
        geometry: ItemGeometry,
        item_count: usize,
    ) {
        let content_extent = geometry.total_extent(item_count);
        if item_count == 0 {
            self.scroll_to_top();
            return;
        }
        let index = index.min(item_count - 1);
        let top = slot_offset(index, geometry);
        let bottom = top + geometry.item_size();
        let height = self.viewport_height();
        let target = match align {
            ScrollAlign::Start => top,
            ScrollAlign::End => bottom - height,
            ScrollAlign::Center => top - (height - geometry.item_size()) / 2.0,
            ScrollAlign::Nearest => {
                if top < self.scroll_offset() {
                    top
                } else if bottom > self.viewport.bottom() {
                    bottom - height
                } else {
                    self.scroll_offset()
                }
            }
        };
        self.set_clamped(target, content_extent);
        self.follow_mode = false;
    }

    /// Scroll to top.
    pub fn scroll_to_top(&mut self) {
        self.viewport = self.viewport.at(0.0);
        self.follow_mode = false;
    }

    /// Scroll to bottom.
    pub fn scroll_to_bottom(&mut self, content_extent: f64) {
        self.viewport = self.viewport.at(self.max_offset(content_extent));
    }

    /// Page up (scroll by viewport height).
    pub fn page_up(&mut self, content_extent: f64) {
        self.scroll_by(-self.viewport_height(), content_extent);
    }

    /// Page down (scroll by viewport height).
    pub fn page_down(&mut self, content_extent: f64) {
        self.scroll_by(self.viewport_height(), content_extent);
    }

    /// Check if scrolled to bottom.
    pub fn is_at_bottom(&self, content_extent: f64) -> bool {
        self.scroll_offset() >= self.max_offset(content_extent)
    }

    /// Enable/disable follow mode.
    pub fn set_follow(&mut self, follow: bool, content_extent: f64) {
        self.follow_mode = follow;
        if follow {
            self.scroll_to_bottom(content_extent);
        }
    }

    /// Re-clamp after the collection changed size.
    ///
    /// In follow mode the viewport sticks to the bottom.
    pub fn content_changed(&mut self, content_extent: f64) {
        if self.follow_mode {
            self.scroll_to_bottom(content_extent);
        } else {
            self.set_clamped(self.scroll_offset(), content_extent);
        }
    }

    /// Resize the viewport, keeping the offset valid.
    pub fn set_viewport_height(
        &mut self,
        viewport_height: f64,
        content_extent: f64,
    ) -> Result<(), ConfigurationError> {
        self.viewport = ViewportState::new(self.scroll_offset(), viewport_height)?;
        self.content_changed(content_extent);
        Ok(())
    }

    fn set_clamped(&mut self, offset: f64, content_extent: f64) {
        self.viewport = self
            .viewport
            .at(offset.clamp(0.0, self.max_offset(content_extent)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> ItemGeometry {
        ItemGeometry::new(20.0).unwrap()
    }

    #[test]
    fn new_state() {
        let state = ScrollState::new(200.0).unwrap();
        assert_eq!(state.scroll_offset(), 0.0);
        assert_eq!(state.viewport_height(), 200.0);
        assert!(!state.follow_mode());
        assert!(ScrollState::new(0.0).is_err());
    }

    #[test]
    fn scroll_by_clamps() {
        let mut state = ScrollState::new(200.0).unwrap();
        let extent = 2000.0;

        state.scroll_by(150.0, extent);
        assert_eq!(state.scroll_offset(), 150.0);

        state.scroll_by(-100.0, extent);
        assert_eq!(state.scroll_offset(), 50.0);

        // Can't scroll negative
        state.scroll_by(-1000.0, extent);
        assert_eq!(state.scroll_offset(), 0.0);

        // Can't scroll past end
        state.scroll_by(1e9, extent);
        assert_eq!(state.scroll_offset(), 1800.0);

        state.scroll_by(f64::NAN, extent);
        assert_eq!(state.scroll_offset(), 1800.0);
    }

    #[test]
    fn short_content_never_scrolls() {
        let mut state = ScrollState::new(200.0).unwrap();
        state.scroll_by(50.0, 100.0);
        assert_eq!(state.scroll_offset(), 0.0);
        assert!(state.is_at_bottom(100.0));
    }

    #[test]
    fn page_navigation() {
        let mut state = ScrollState::new(200.0).unwrap();
        let extent = 1000.0;

        state.page_down(extent);
        assert_eq!(state.scroll_offset(), 200.0);
        state.page_down(extent);
        assert_eq!(state.scroll_offset(), 400.0);
        state.page_up(extent);
        assert_eq!(state.scroll_offset(), 200.0);
        state.page_up(extent);
        state.page_up(extent);
        assert_eq!(state.scroll_offset(), 0.0);

        for _ in 0..10 {
            state.page_down(extent);
        }
        assert_eq!(state.scroll_offset(), 800.0);
        assert!(state.is_at_bottom(extent));
    }

    #[test]
    fn scroll_to_index_alignments() {
        let mut state = ScrollState::new(200.0).unwrap();
        let g = geometry();

        state.scroll_to_index(50, ScrollAlign::Start, g, 100);
        assert_eq!(state.scroll_offset(), 1000.0);

        state.scroll_to_index(50, ScrollAlign::End, g, 100);
        assert_eq!(state.scroll_offset(), 820.0);

        state.scroll_to_index(50, ScrollAlign::Center, g, 100);
        assert_eq!(state.scroll_offset(), 910.0);

        // Clamped at both ends.
        state.scroll_to_index(0, ScrollAlign::End, g, 100);
        assert_eq!(state.scroll_offset(), 0.0);
        state.scroll_to_index(500, ScrollAlign::Start, g, 100);
        assert_eq!(state.scroll_offset(), 1800.0);

        state.scroll_to_index(3, ScrollAlign::Start, g, 0);
        assert_eq!(state.scroll_offset(), 0.0);
    }

    #[test]
    fn scroll_to_index_nearest() {
        let mut state = ScrollState::new(200.0).unwrap();
        let g = geometry();
        state.scroll_to(1000.0, 2000.0);

        // Already visible: no movement.
        state.scroll_to_index(55, ScrollAlign::Nearest, g, 100);
        assert_eq!(state.scroll_offset(), 1000.0);

        // Below: bottom-align.
        state.scroll_to_index(70, ScrollAlign::Nearest, g, 100);
        assert_eq!(state.scroll_offset(), 1220.0);

        // Above: top-align.
        state.scroll_to_index(10, ScrollAlign::Nearest, g, 100);
        assert_eq!(state.scroll_offset(), 200.0);
    }

    #[test]
    fn follow_mode_sticks_to_bottom() {
        let mut state = ScrollState::new(200.0).unwrap().with_follow(true);
        assert!(state.follow_mode());

        state.content_changed(400.0);
        assert_eq!(state.scroll_offset(), 200.0);
        state.content_changed(1000.0);
        assert_eq!(state.scroll_offset(), 800.0);
        assert!(state.is_at_bottom(1000.0));

        // Manual scroll disables follow
        state.scroll_by(-20.0, 1000.0);
        assert!(!state.follow_mode());
        state.content_changed(2000.0);
        assert_eq!(state.scroll_offset(), 780.0);

        state.set_follow(true, 2000.0);
        assert_eq!(state.scroll_offset(), 1800.0);
    }

    #[test]
    fn shrinking_content_reclamps() {
        let mut state = ScrollState::new(200.0).unwrap();
        state.scroll_to(1500.0, 2000.0);
        state.content_changed(600.0);
        assert_eq!(state.scroll_offset(), 400.0);
    }

    #[test]
    fn resize_keeps_offset_valid() {
        let mut state = ScrollState::new(200.0).unwrap();
        state.scroll_to(1800.0, 2000.0);
        state.set_viewport_height(500.0, 2000.0).unwrap();
        assert_eq!(state.scroll_offset(), 1500.0);
        assert!(state.set_viewport_height(0.0, 2000.0).is_err());
        assert_eq!(state.viewport_height(), 500.0);
    }

    #[test]
    fn viewport_reflects_state() {
        let mut state = ScrollState::new(240.0).unwrap();
        state.scroll_to(480.0, 10_000.0);
        let v = state.viewport();
        assert_eq!(v.scroll_offset(), 480.0);
        assert_eq!(v.viewport_height(), 240.0);
    }

    #[test]
    fn scroll_to_top_disables_follow() {
        let mut state = ScrollState::new(100.0).unwrap().with_follow(true);
        state.scroll_to_top();
        assert!(!state.follow_mode());
        assert_eq!(state.scroll_offset(), 0.0);
    }
}
