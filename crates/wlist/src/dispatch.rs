#![forbid(unsafe_code)]

//! Stateless render dispatch.
//!
//! [`render_window`] turns a computed [`Window`] into positioned slots by
//! invoking the caller's [`RenderItem`] once per visible index. It keeps no
//! state between calls; for reuse across scroll events see
//! [`SlotCache`](crate::SlotCache).

use wlist_core::{ItemGeometry, VisibleRange, Window, slot_offset};

use crate::RenderItem;

/// One materialized, positioned unit of rendered content.
///
/// Identity is the index, not the item value.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSlot<C> {
    /// Collection index this slot renders.
    pub index: usize,
    /// Absolute offset within the full content extent (`index * item_size`).
    pub offset: f64,
    /// Output of the render callback for `(items[index], index)`.
    pub content: C,
}

/// Output of a stateless dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatched<C> {
    /// The collection is empty; show the empty-state fallback.
    Empty,
    /// Slots in ascending index order.
    Slots(Vec<RenderedSlot<C>>),
}

impl<C> Dispatched<C> {
    /// Slots produced, or an empty slice for the fallback.
    pub fn slots(&self) -> &[RenderedSlot<C>] {
        match self {
            Self::Empty => &[],
            Self::Slots(slots) => slots,
        }
    }

    /// Whether this is the empty-state fallback.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Render every index of `window` from `items`.
///
/// A window computed against an older, longer collection is re-clamped to
/// `items.len()` first, so the callback never sees an out-of-range index.
/// The first error from `render` is returned as-is and no slots are produced.
pub fn render_window<T, R>(
    items: &[T],
    window: Window,
    geometry: ItemGeometry,
    render: &mut R,
) -> Result<Dispatched<R::Content>, R::Error>
where
    R: RenderItem<T>,
{
    let Some(range) = clamp_window(window, items.len()) else {
        return Ok(Dispatched::Empty);
    };

    let mut slots = Vec::with_capacity(range.len());
    for index in range.indices() {
        let content = render.render_item(&items[index], index)?;
        slots.push(RenderedSlot {
            index,
            offset: slot_offset(index, geometry),
            content,
        });
    }
    Ok(Dispatched::Slots(slots))
}

/// Re-clamp a possibly stale window against the current collection length.
pub(crate) fn clamp_window(window: Window, item_count: usize) -> Option<VisibleRange> {
    window.range()?.clamp_to(item_count).range()
}
