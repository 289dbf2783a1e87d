#![forbid(unsafe_code)]

//! Configuration errors for windowed list geometry.

use std::fmt;

/// Invalid geometry supplied to the range calculator or a list builder.
///
/// These are never clamped away: a render pass with bad geometry produces no
/// output at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigurationError {
    /// `item_size` was zero, negative, or not finite.
    NonPositiveItemSize { item_size: f64 },
    /// `viewport_height` was zero, negative, or not finite.
    NonPositiveViewportHeight { viewport_height: f64 },
    /// `scroll_offset` was NaN or infinite.
    NonFiniteScrollOffset { scroll_offset: f64 },
    /// A fixed presentation width was zero, negative, or not finite.
    NonPositiveWidth { width: f64 },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveItemSize { item_size } => {
                write!(f, "item size must be positive and finite (got {item_size})")
            }
            Self::NonPositiveViewportHeight { viewport_height } => write!(
                f,
                "viewport height must be positive and finite (got {viewport_height})"
            ),
            Self::NonFiniteScrollOffset { scroll_offset } => {
                write!(f, "scroll offset must be finite (got {scroll_offset})")
            }
            Self::NonPositiveWidth { width } => {
                write!(f, "fixed width must be positive and finite (got {width})")
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// Accept `value` only if it is finite and strictly positive.
pub(crate) fn positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
