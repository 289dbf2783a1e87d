#![forbid(unsafe_code)]

//! Core: viewport geometry, visible range calculation, and slot positioning
//! for windowed lists.
//!
//! Everything here is pure and O(1) in the collection length; materializing
//! content for a range lives in the `wlist` crate.

pub mod error;
pub mod geometry;
pub mod logging;
pub mod position;
pub mod range;

pub use error::ConfigurationError;
pub use geometry::{ItemGeometry, ViewportState, Width};
pub use position::{index_at_offset, relative_offset, slot_offset};
pub use range::{VisibleRange, Window, compute_range, visible_window};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, trace_span, warn};
