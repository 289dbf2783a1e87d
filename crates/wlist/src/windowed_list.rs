#![forbid(unsafe_code)]

//! Windowed list: the configured front end over range calculation, slot
//! positioning, and cached dispatch.
//!
//! A [`WindowedList`] borrows the caller's items and owns only its
//! configuration, the render callback, and a [`SlotCache`]. The host calls
//! [`WindowedList::render`] with the current [`ViewportState`] on every scroll
//! or resize event and places the returned slots itself.

use std::fmt;

use wlist_core::{
    ConfigurationError, ItemGeometry, ViewportState, VisibleRange, Width, Window, visible_window,
};

use crate::RenderItem;
use crate::dispatch::RenderedSlot;
use crate::slot_cache::{CacheStats, SlotCache};

/// A list that materializes only the rows a viewport can show.
pub struct WindowedList<'a, T, R>
where
    R: RenderItem<T>,
{
    /// Borrowed collection; never copied.
    items: &'a [T],
    geometry: ItemGeometry,
    /// Default viewport height for [`WindowedList::viewport_at`].
    viewport_height: f64,
    width: Width,
    /// Extra items rendered above and below the visible range.
    overscan: usize,
    render_item: R,
    /// Bumped whenever `render_item` is replaced.
    renderer_generation: u64,
    /// Shown instead of slots when the collection is empty.
    empty: Option<R::Content>,
    cache: SlotCache<'a, R::Content>,
}

/// What the host should place for one pass.
#[derive(Debug, PartialEq)]
pub enum WindowBody<'w, C> {
    /// The collection is empty; show the placeholder, if one was configured.
    Empty(Option<&'w C>),
    /// Slots in ascending index order.
    Slots(&'w [RenderedSlot<C>]),
}

/// Output of one render pass.
#[derive(Debug, PartialEq)]
pub struct RenderedWindow<'w, C> {
    /// Materialized slots or the empty-state fallback.
    pub body: WindowBody<'w, C>,
    /// `len * item_size`, for scrollbars and host proportionality.
    pub total_extent: f64,
    /// Presentation width requested by the configuration.
    pub width: Width,
    /// Viewport this pass was computed for.
    pub viewport: ViewportState,
    /// Item geometry slot offsets were computed with.
    pub geometry: ItemGeometry,
}

impl<C> RenderedWindow<'_, C> {
    /// Slots of this pass, or an empty slice for the fallback.
    pub fn slots(&self) -> &[RenderedSlot<C>] {
        match self.body {
            WindowBody::Empty(_) => &[],
            WindowBody::Slots(slots) => slots,
        }
    }

    /// Whether this pass produced the empty-state fallback.
    pub fn is_empty(&self) -> bool {
        matches!(self.body, WindowBody::Empty(_))
    }

    /// Index range covered by the slots.
    pub fn range(&self) -> Option<VisibleRange> {
        let slots = self.slots();
        Some(VisibleRange {
            start: slots.first()?.index,
            end: slots.last()?.index,
        })
    }
}

impl<'a, T, R> WindowedList<'a, T, R>
where
    R: RenderItem<T>,
{
    /// Create a windowed list over `items`.
    ///
    /// Fails if `viewport_height` or `item_size` is not strictly positive and
    /// finite.
    pub fn new(
        items: &'a [T],
        viewport_height: f64,
        item_size: f64,
        render_item: R,
    ) -> Result<Self, ConfigurationError> {
        let geometry = ItemGeometry::new(item_size)?;
        // Validates the height; the offset is irrelevant here.
        ViewportState::new(0.0, viewport_height)?;
        Ok(Self {
            items,
            geometry,
            viewport_height,
            width: Width::Full,
            overscan: 0,
            render_item,
            renderer_generation: 0,
            empty: None,
            cache: SlotCache::with_capacity(
                geometry.max_slots(viewport_height, 0).min(items.len()),
            ),
        })
    }

    /// Set overscan amount.
    #[must_use]
    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self.reserve_slots();
        self
    }

    /// Set the presentation width. `Width::Fixed` values must be positive.
    pub fn with_width(mut self, width: Width) -> Result<Self, ConfigurationError> {
        if let Width::Fixed(w) = width {
            Width::fixed(w)?;
        }
        self.width = width;
        Ok(self)
    }

    /// Set the placeholder shown when the collection is empty.
    #[must_use]
    pub fn with_empty(mut self, placeholder: R::Content) -> Self {
        self.empty = Some(placeholder);
        self
    }

    /// Borrowed items.
    #[inline]
    pub fn items(&self) -> &'a [T] {
        self.items
    }

    /// Number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item geometry.
    #[inline]
    pub fn geometry(&self) -> ItemGeometry {
        self.geometry
    }

    /// Configured viewport height.
    #[inline]
    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Configured presentation width.
    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    /// Configured overscan.
    #[inline]
    pub fn overscan(&self) -> usize {
        self.overscan
    }

    /// Full scrollable extent, `len * item_size`.
    #[inline]
    pub fn total_extent(&self) -> f64 {
        self.geometry.total_extent(self.items.len())
    }

    /// Viewport at `scroll_offset` with the configured height.
    pub fn viewport_at(&self, scroll_offset: f64) -> Result<ViewportState, ConfigurationError> {
        ViewportState::new(scroll_offset, self.viewport_height)
    }

    /// Window for `viewport` without rendering anything.
    pub fn window(&self, viewport: ViewportState) -> Window {
        visible_window(self.geometry, viewport, self.items.len(), self.overscan)
    }

    /// Replace the borrowed collection.
    ///
    /// A different slice never reuses cached slots.
    pub fn set_items(&mut self, items: &'a [T]) {
        self.items = items;
        self.reserve_slots();
    }

    /// Replace the render callback and discard content it produced.
    pub fn set_render_item(&mut self, render_item: R) {
        self.render_item = render_item;
        self.renderer_generation = self.renderer_generation.wrapping_add(1);
        self.cache.invalidate_all();
    }

    /// Change the item size. Cached content is kept; offsets are recomputed.
    pub fn set_item_size(&mut self, item_size: f64) -> Result<(), ConfigurationError> {
        self.geometry = ItemGeometry::new(item_size)?;
        self.reserve_slots();
        Ok(())
    }

    /// Change the default viewport height.
    pub fn set_viewport_height(&mut self, viewport_height: f64) -> Result<(), ConfigurationError> {
        ViewportState::new(0.0, viewport_height)?;
        self.viewport_height = viewport_height;
        self.reserve_slots();
        Ok(())
    }

    /// Drop cached slots so the next pass re-renders every slot.
    pub fn invalidate(&mut self) {
        self.cache.invalidate_all();
    }

    /// Slot cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Render the window for `viewport`.
    ///
    /// Only indices inside the computed window are passed to the callback.
    /// The first callback error is returned unchanged and no slots are
    /// produced for this pass.
    pub fn render(
        &mut self,
        viewport: ViewportState,
    ) -> Result<RenderedWindow<'_, R::Content>, R::Error> {
        let window = self.window(viewport);

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "window_render",
            items = self.items.len(),
            scroll_offset = viewport.scroll_offset(),
            viewport_height = viewport.viewport_height(),
            slots = window.len()
        )
        .entered();

        let total_extent = self.total_extent();
        let body = match window {
            Window::Empty => WindowBody::Empty(self.empty.as_ref()),
            Window::Visible(range) => WindowBody::Slots(self.cache.fill(
                self.items,
                self.renderer_generation,
                range,
                self.geometry,
                &mut self.render_item,
            )?),
        };

        Ok(RenderedWindow {
            body,
            total_extent,
            width: self.width,
            viewport,
            geometry: self.geometry,
        })
    }

    fn reserve_slots(&mut self) {
        // A pass never materializes more slots than there are items.
        let slots = self
            .geometry
            .max_slots(self.viewport_height, self.overscan)
            .min(self.items.len());
        self.cache.reserve(slots);
    }
}

impl<T, R> fmt::Debug for WindowedList<'_, T, R>
where
    R: RenderItem<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowedList")
            .field("items", &self.items.len())
            .field("geometry", &self.geometry)
            .field("viewport_height", &self.viewport_height)
            .field("width", &self.width)
            .field("overscan", &self.overscan)
            .field("renderer_generation", &self.renderer_generation)
            .field("has_empty", &self.empty.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infallible;
    use std::cell::Cell;
    use std::convert::Infallible;

    fn rows(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Row {i}")).collect()
    }

    fn indices<C>(window: &RenderedWindow<'_, C>) -> Vec<usize> {
        window.slots().iter().map(|s| s.index).collect()
    }

    #[test]
    fn scenario_top_of_list() {
        let items = rows(100);
        let mut list =
            WindowedList::new(&items, 200.0, 20.0, infallible(|r: &String, _| r.clone())).unwrap();
        let viewport = list.viewport_at(0.0).unwrap();
        let Ok(window) = list.render(viewport);
        assert_eq!(indices(&window), (0..=9).collect::<Vec<_>>());
        assert_eq!(window.range(), Some(VisibleRange { start: 0, end: 9 }));
        assert_eq!(window.total_extent, 2000.0);
    }

    #[test]
    fn scenario_scrolled() {
        let items = rows(100);
        let mut list =
            WindowedList::new(&items, 200.0, 20.0, infallible(|r: &String, _| r.clone())).unwrap();
        let viewport = list.viewport_at(1000.0).unwrap();
        let Ok(window) = list.render(viewport);
        assert_eq!(indices(&window), (50..=59).collect::<Vec<_>>());
        assert_eq!(window.slots()[0].content, "Row 50");
        assert_eq!(window.slots()[0].offset, 1000.0);
    }

    #[test]
    fn scenario_empty_collection() {
        let items: Vec<String> = Vec::new();
        let mut list = WindowedList::new(&items, 200.0, 20.0, infallible(|r: &String, _| r.clone()))
            .unwrap()
            .with_empty("No rows".to_string());
        let viewport = list.viewport_at(0.0).unwrap();
        let Ok(window) = list.render(viewport);
        assert!(window.is_empty());
        assert!(window.slots().is_empty());
        assert_eq!(window.range(), None);
        assert_eq!(window.total_extent, 0.0);
        assert_eq!(window.body, WindowBody::Empty(Some(&"No rows".to_string())));
    }

    #[test]
    fn empty_without_placeholder() {
        let items: Vec<u8> = Vec::new();
        let mut list = WindowedList::new(&items, 10.0, 1.0, infallible(|b: &u8, _| *b)).unwrap();
        let viewport = list.viewport_at(0.0).unwrap();
        let Ok(window) = list.render(viewport);
        assert_eq!(window.body, WindowBody::Empty(None));
    }

    #[test]
    fn scenario_zero_item_size() {
        let items = rows(10);
        let err = WindowedList::new(&items, 200.0, 0.0, infallible(|r: &String, _| r.clone()))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::NonPositiveItemSize { item_size: 0.0 }
        );
        assert!(
            WindowedList::new(&items, 0.0, 20.0, infallible(|r: &String, _| r.clone())).is_err()
        );
    }

    #[test]
    fn scenario_viewport_larger_than_content() {
        let items = rows(5);
        let mut list =
            WindowedList::new(&items, 200.0, 20.0, infallible(|r: &String, _| r.clone())).unwrap();
        let viewport = list.viewport_at(0.0).unwrap();
        let Ok(window) = list.render(viewport);
        assert_eq!(indices(&window), vec![0, 1, 2, 3, 4]);
        assert_eq!(window.total_extent, 100.0);
    }

    #[test]
    fn overscan_and_width_are_applied() {
        let items = rows(100);
        let mut list =
            WindowedList::new(&items, 200.0, 20.0, infallible(|r: &String, _| r.len()))
                .unwrap()
                .with_overscan(2)
                .with_width(Width::Fixed(40.0))
                .unwrap();
        let viewport = list.viewport_at(1000.0).unwrap();
        let Ok(window) = list.render(viewport);
        assert_eq!(window.range(), Some(VisibleRange { start: 48, end: 61 }));
        assert_eq!(window.width, Width::Fixed(40.0));
        assert!(
            WindowedList::new(&items, 200.0, 20.0, infallible(|r: &String, _| r.len()))
                .unwrap()
                .with_width(Width::Fixed(-1.0))
                .is_err()
        );
    }

    #[test]
    fn total_extent_tracks_item_count() {
        let long = rows(100);
        let short = rows(7);
        let mut list =
            WindowedList::new(&long, 200.0, 20.0, infallible(|r: &String, _| r.clone())).unwrap();
        assert_eq!(list.total_extent(), 2000.0);
        list.set_items(&short);
        assert_eq!(list.total_extent(), 140.0);
        let viewport = list.viewport_at(1000.0).unwrap();
        let Ok(window) = list.render(viewport);
        assert_eq!(window.total_extent, 140.0);
        // Scrolled past the end of the shorter list: last item only.
        assert_eq!(indices(&window), vec![6]);
    }

    #[test]
    fn callback_error_propagates() {
        let items = rows(100);
        let mut list = WindowedList::new(&items, 200.0, 20.0, |r: &String, index: usize| {
            if index == 55 {
                Err(format!("cannot render {r}"))
            } else {
                Ok(index)
            }
        })
        .unwrap();
        let viewport = list.viewport_at(1000.0).unwrap();
        let err = list.render(viewport).unwrap_err();
        assert_eq!(err, "cannot render Row 55");

        let viewport = list.viewport_at(0.0).unwrap();
        assert!(list.render(viewport).is_ok());
    }

    #[test]
    fn repeated_render_is_identical_and_cached() {
        let items = rows(1_000);
        let calls = Cell::new(0usize);
        let mut list = WindowedList::new(
            &items,
            240.0,
            20.0,
            infallible(|r: &String, i| {
                calls.set(calls.get() + 1);
                format!("{i}:{r}")
            }),
        )
        .unwrap();
        let viewport = list.viewport_at(333.0).unwrap();
        let Ok(first) = list.render(viewport);
        let first: Vec<_> = first.slots().to_vec();
        let after_first = calls.get();
        let Ok(second) = list.render(viewport);
        assert_eq!(first.as_slice(), second.slots());
        assert_eq!(calls.get(), after_first);
        assert_eq!(list.cache_stats().hits, first.len() as u64);
    }

    #[test]
    fn slot_count_bounded_across_scroll() {
        let items = rows(100_000);
        let mut list =
            WindowedList::new(&items, 240.0, 20.0, infallible(|_: &String, i| i)).unwrap();
        let bound = (240.0f64 / 20.0).ceil() as usize + 1;
        let mut offset = 0.0;
        while offset < list.total_extent() {
            let viewport = list.viewport_at(offset).unwrap();
            let Ok(window) = list.render(viewport);
            assert!(window.slots().len() <= bound);
            offset += 137.5;
        }
    }

    #[test]
    fn set_render_item_invalidates() {
        type Render = fn(&String, usize) -> Result<String, Infallible>;
        fn upper(r: &String, _: usize) -> Result<String, Infallible> {
            Ok(r.to_uppercase())
        }
        fn lower(r: &String, _: usize) -> Result<String, Infallible> {
            Ok(r.to_lowercase())
        }

        let items = rows(50);
        let mut list = WindowedList::new(&items, 100.0, 10.0, upper as Render).unwrap();
        let viewport = list.viewport_at(0.0).unwrap();
        let Ok(window) = list.render(viewport);
        assert_eq!(window.slots()[0].content, "ROW 0");

        list.set_render_item(lower);
        let Ok(window) = list.render(viewport);
        assert_eq!(window.slots()[0].content, "row 0");
        assert_eq!(list.cache_stats().hits, 0);
    }

    #[test]
    fn set_geometry_validates() {
        let items = rows(10);
        let mut list =
            WindowedList::new(&items, 100.0, 10.0, infallible(|_: &String, i| i)).unwrap();
        assert!(list.set_item_size(0.0).is_err());
        assert_eq!(list.geometry().item_size(), 10.0);
        list.set_item_size(5.0).unwrap();
        assert_eq!(list.total_extent(), 50.0);
        assert!(list.set_viewport_height(-1.0).is_err());
        list.set_viewport_height(30.0).unwrap();
        assert_eq!(list.viewport_height(), 30.0);
        assert_eq!(list.window(list.viewport_at(0.0).unwrap()).len(), 6);
    }

    #[test]
    fn huge_viewport_over_few_items_stays_small() {
        let items = rows(5);
        let mut list =
            WindowedList::new(&items, 1e9, 1.0, infallible(|_: &String, i| i)).unwrap();
        assert!(list.cache.capacity() <= items.len());
        let viewport = list.viewport_at(0.0).unwrap();
        let Ok(window) = list.render(viewport);
        assert_eq!(indices(&window), vec![0, 1, 2, 3, 4]);

        let mut extreme =
            WindowedList::new(&items, 1e300, 1e-300, infallible(|_: &String, i| i)).unwrap();
        assert!(extreme.cache.capacity() <= items.len());
        let viewport = extreme.viewport_at(0.0).unwrap();
        let Ok(window) = extreme.render(viewport);
        assert_eq!(window.slots().len(), 5);
    }

    #[test]
    fn reservation_follows_item_count() {
        let few = rows(3);
        let many = rows(1_000);
        let mut list = WindowedList::new(&few, 200.0, 20.0, infallible(|_: &String, i| i))
            .unwrap()
            .with_overscan(1_000_000);
        assert!(list.cache.capacity() <= few.len());
        list.set_items(&many);
        assert!(list.cache.capacity() >= 1_000);
        assert!(list.set_viewport_height(1e12).is_ok());
        assert!(list.set_item_size(1e-12).is_ok());
    }

    #[test]
    fn debug_does_not_require_debug_callback() {
        let items = rows(3);
        let list = WindowedList::new(&items, 10.0, 1.0, infallible(|_: &String, i| i)).unwrap();
        let dbg = format!("{list:?}");
        assert!(dbg.contains("WindowedList"));
        assert!(dbg.contains("items: 3"));
    }
}
