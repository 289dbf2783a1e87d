#![forbid(unsafe_code)]

//! Windowed list rendering.
//!
//! Given a borrowed collection, a viewport, and a uniform item size, render
//! only the rows the viewport can show. Work per scroll event is bounded by the
//! viewport, not the collection.
//!
//! # Example
//!
//! ```
//! use wlist::{WindowBody, WindowedList, infallible};
//!
//! let rows: Vec<String> = (0..100).map(|i| format!("row {i}")).collect();
//! let mut list = WindowedList::new(
//!     &rows,
//!     200.0,
//!     20.0,
//!     infallible(|row: &String, _index| row.to_uppercase()),
//! )
//! .unwrap();
//!
//! let viewport = list.viewport_at(1000.0).unwrap();
//! let Ok(window) = list.render(viewport);
//! assert_eq!(window.total_extent, 2000.0);
//! let WindowBody::Slots(slots) = window.body else { unreachable!() };
//! assert_eq!(slots.first().map(|s| s.index), Some(50));
//! assert_eq!(slots.last().map(|s| s.index), Some(59));
//! ```

pub mod canvas;
pub mod dispatch;
pub mod scroll;
pub mod scrollbar;
pub mod slot_cache;
pub mod windowed_list;

pub use canvas::LineCanvas;
pub use dispatch::{Dispatched, RenderedSlot, render_window};
pub use scroll::{ScrollAlign, ScrollState};
pub use scrollbar::ScrollbarMetrics;
pub use slot_cache::{CacheStats, CollectionId, SlotCache};
pub use windowed_list::{RenderedWindow, WindowBody, WindowedList};

pub use wlist_core::{
    ConfigurationError, ItemGeometry, ViewportState, VisibleRange, Width, Window,
    compute_range,
};

use std::convert::Infallible;

/// Per-item rendering capability.
///
/// Implemented for every `FnMut(&T, usize) -> Result<C, E>`. The result for a
/// given `(item, index)` must not depend on anything else, since a render
/// pass may reuse content produced by an earlier pass.
pub trait RenderItem<T: ?Sized> {
    /// Rendered content for one slot.
    type Content;
    /// Failure raised while rendering one item.
    type Error;

    /// Render `item`, which sits at `index` in the collection.
    fn render_item(&mut self, item: &T, index: usize) -> Result<Self::Content, Self::Error>;
}

impl<T, C, E, F> RenderItem<T> for F
where
    T: ?Sized,
    F: FnMut(&T, usize) -> Result<C, E>,
{
    type Content = C;
    type Error = E;

    #[inline]
    fn render_item(&mut self, item: &T, index: usize) -> Result<C, E> {
        self(item, index)
    }
}

/// Adapt a callback that cannot fail into a [`RenderItem`].
pub fn infallible<T, C, F>(mut render: F) -> impl FnMut(&T, usize) -> Result<C, Infallible>
where
    T: ?Sized,
    F: FnMut(&T, usize) -> C,
{
    move |item, index| Ok(render(item, index))
}
