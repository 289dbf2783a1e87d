#![forbid(unsafe_code)]

//! Slot positioning.
//!
//! Every index has exactly one offset, `index * item_size`, so slots tile the
//! content extent contiguously no matter which subset is materialized or in
//! what order slots are placed.

use crate::geometry::ItemGeometry;

/// Absolute offset of `index` within the full content extent.
#[inline]
pub fn slot_offset(index: usize, geometry: ItemGeometry) -> f64 {
    index as f64 * geometry.item_size()
}

/// Offset of `index` relative to the viewport's top edge.
///
/// Negative for a slot that starts above the viewport.
#[inline]
pub fn relative_offset(index: usize, geometry: ItemGeometry, scroll_offset: f64) -> f64 {
    slot_offset(index, geometry) - scroll_offset
}

/// Index of the item covering `offset`, for hit testing.
///
/// Returns `None` for offsets outside `0..total_extent`.
pub fn index_at_offset(offset: f64, geometry: ItemGeometry, item_count: usize) -> Option<usize> {
    if offset.is_nan() || offset < 0.0 || offset >= geometry.total_extent(item_count) {
        return None;
    }
    let index = (offset / geometry.item_size()).floor() as usize;
    Some(index.min(item_count - 1))
}
