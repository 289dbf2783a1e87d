#![forbid(unsafe_code)]

//! Slot cache for reusing rendered content across scroll events.
//!
//! [`SlotCache`] keeps the slots produced by the previous pass. On the next
//! pass, a slot whose index is still inside the window is moved over instead
//! of re-invoking the render callback, provided the cache key still matches:
//!
//! - the collection is the same slice (address and length), and
//! - the callback generation is unchanged.
//!
//! Any key change invalidates every slot. Reuse is purely an optimization:
//! the produced slots are identical to what a fresh dispatch would produce,
//! as long as the callback depends only on `(item, index)`.
//!
//! # Recycling
//!
//! Slots are written into two buffers indexed by window position that swap
//! roles each pass. Both keep their capacity, so a warmed cache allocates
//! nothing per scroll event.
//!
//! # Invalidation
//!
//! ```ignore
//! match msg {
//!     Msg::RowsReplaced(rows) => {
//!         // New slice: address or length differs, nothing to do.
//!         list.set_items(&rows);
//!     }
//!     Msg::RowEditedInPlace(_) => {
//!         // Same slice, different content: drop cached slots explicitly.
//!         list.invalidate();
//!     }
//!     Msg::Resize(_) => {
//!         // Content is keyed by index only, no invalidation needed.
//!     }
//! }
//! ```

use std::marker::PhantomData;

use wlist_core::{ItemGeometry, VisibleRange, slot_offset};

use crate::RenderItem;
use crate::dispatch::RenderedSlot;

/// Identity of a borrowed collection: start address plus length.
///
/// Stable while the same slice is borrowed; a replaced or resized collection
/// gets a different id. Only meaningful while the slice is alive: once it is
/// freed, a new allocation may reuse the address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CollectionId {
    addr: usize,
    len: usize,
}

impl CollectionId {
    /// Identity of `items`.
    #[inline]
    pub fn of<T>(items: &[T]) -> Self {
        Self {
            addr: items.as_ptr() as usize,
            len: items.len(),
        }
    }
}

/// Cache key for one pass.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
struct CacheKey {
    collection: CollectionId,
    generation: u64,
}

/// Statistics about cache performance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    /// Slots currently held.
    pub entries: usize,
    /// Slots reused without invoking the callback.
    pub hits: u64,
    /// Slots rendered by invoking the callback.
    pub misses: u64,
    /// Hit rate as a fraction (0.0 to 1.0).
    pub hit_rate: f64,
}

/// Double-buffered slot storage with index-keyed content reuse.
///
/// Every collection passed to [`fill`](Self::fill) must outlive the cache
/// (`'a`), so a collection can never be freed and its address handed to a
/// different one while cached content still refers to it:
///
/// ```compile_fail
/// use wlist::{ItemGeometry, SlotCache, VisibleRange, infallible};
///
/// let geometry = ItemGeometry::new(1.0).unwrap();
/// let range = VisibleRange { start: 0, end: 3 };
/// let mut render = infallible(|v: &u32, _| *v);
/// let mut cache = SlotCache::new();
///
/// let first = vec![1u32; 64];
/// let _ = cache.fill(&first, 0, range, geometry, &mut render);
/// drop(first);
/// let second = vec![2u32; 64];
/// let _ = cache.fill(&second, 0, range, geometry, &mut render);
/// ```
#[derive(Debug)]
pub struct SlotCache<'a, C> {
    key: Option<CacheKey>,
    front: Vec<RenderedSlot<C>>,
    back: Vec<RenderedSlot<C>>,
    hits: u64,
    misses: u64,
    /// Collections keyed by address must stay borrowed for `'a`.
    borrowed: PhantomData<&'a ()>,
}

impl<C> Default for SlotCache<'_, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, C> SlotCache<'a, C> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a cache with room for `slots` slots per pass.
    ///
    /// Use [`ItemGeometry::max_slots`], capped at the collection length, to
    /// size it for a viewport.
    pub fn with_capacity(slots: usize) -> Self {
        Self {
            key: None,
            front: Vec::with_capacity(slots),
            back: Vec::with_capacity(slots),
            hits: 0,
            misses: 0,
            borrowed: PhantomData,
        }
    }

    /// Render `range` of `items`, reusing slots from the previous pass.
    ///
    /// `generation` identifies the render callback: bump it whenever the
    /// callback is replaced. `range` must lie within `items`; clamp stale
    /// ranges with [`VisibleRange::clamp_to`] first.
    ///
    /// On error nothing is returned and the cache is left empty, so the next
    /// pass renders from scratch.
    pub fn fill<T, R>(
        &mut self,
        items: &'a [T],
        generation: u64,
        range: VisibleRange,
        geometry: ItemGeometry,
        render: &mut R,
    ) -> Result<&[RenderedSlot<C>], R::Error>
    where
        R: RenderItem<T, Content = C>,
    {
        debug_assert!(
            range.end < items.len(),
            "range {range:?} exceeds collection of {}",
            items.len()
        );

        let key = CacheKey {
            collection: CollectionId::of(items),
            generation,
        };
        let reusable = self.key == Some(key);
        if !reusable && self.key.is_some() {
            wlist_core::trace!(?key, "slot cache key changed; re-rendering window");
        }
        // Invalid until this pass completes.
        self.key = None;
        self.back.clear();

        let mut previous = self.front.drain(..).peekable();
        for index in range.indices() {
            while previous.next_if(|slot| slot.index < index).is_some() {}
            let reused = if reusable {
                previous.next_if(|slot| slot.index == index)
            } else {
                None
            };
            let content = match reused {
                Some(slot) => {
                    self.hits += 1;
                    slot.content
                }
                None => {
                    self.misses += 1;
                    render.render_item(&items[index], index)?
                }
            };
            self.back.push(RenderedSlot {
                index,
                offset: slot_offset(index, geometry),
                content,
            });
        }
        drop(previous);

        std::mem::swap(&mut self.front, &mut self.back);
        self.key = Some(key);
        Ok(&self.front)
    }

    /// Slots from the last successful pass.
    pub fn slots(&self) -> &[RenderedSlot<C>] {
        if self.key.is_some() { &self.front } else { &[] }
    }

    /// Drop the cache key so the next pass re-renders every slot.
    ///
    /// Use after mutating items in place through interior mutability, where
    /// the slice identity does not change.
    #[inline]
    pub fn invalidate_all(&mut self) {
        self.key = None;
    }

    /// Drop all slots and the cache key. Buffers keep their capacity.
    pub fn clear(&mut self) {
        self.key = None;
        self.front.clear();
        self.back.clear();
    }

    /// Get current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let total = self.hits + self.misses;
        CacheStats {
            entries: self.slots().len(),
            hits: self.hits,
            misses: self.misses,
            hit_rate: if total > 0 {
                self.hits as f64 / total as f64
            } else {
                0.0
            },
        }
    }

    /// Reset statistics counters to zero.
    #[inline]
    pub fn reset_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }

    /// Slots held from the last successful pass.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots().len()
    }

    /// Returns true if no slots are held.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slot capacity of the recycled buffers.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.front.capacity().min(self.back.capacity())
    }

    /// Grow both buffers to hold at least `slots` slots.
    pub fn reserve(&mut self, slots: usize) {
        self.front.reserve(slots.saturating_sub(self.front.len()));
        self.back.reserve(slots.saturating_sub(self.back.len()));
    }
}
