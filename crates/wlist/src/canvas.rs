#![forbid(unsafe_code)]

//! Minimal text host for rendered windows.
//!
//! [`LineCanvas`] places textual slot content onto a grid of terminal rows,
//! treating one unit of offset as one row. It is the smallest host that
//! exercises the renderer end to end: offsets relative to the scroll
//! position, clipping at both edges, and width truncation by display width.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::windowed_list::{RenderedWindow, WindowBody};

/// A fixed grid of text rows that windows are painted into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineCanvas {
    cols: usize,
    lines: Vec<String>,
}

impl LineCanvas {
    /// Create a blank canvas of `rows` lines and `cols` columns.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cols,
            lines: vec![String::new(); rows],
        }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.lines.len()
    }

    /// Number of columns available before width resolution.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Painted lines, top to bottom. Unpainted rows are empty.
    #[inline]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Blank every row, keeping line buffers.
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
    }

    /// Change the grid size and blank it.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.cols = cols;
        self.lines.resize_with(rows, String::new);
        self.clear();
    }

    /// Paint one rendered window, replacing whatever was shown before.
    ///
    /// Each slot starts at row `floor(offset - scroll_offset)` and occupies up
    /// to `ceil(item_size)` rows, one per line of its content. Rows outside the
    /// canvas are clipped. Lines are truncated to the window's resolved width
    /// without splitting a grapheme.
    pub fn paint<C>(&mut self, window: &RenderedWindow<'_, C>)
    where
        C: AsRef<str>,
    {
        self.clear();
        let max_cols = window.width.resolve(self.cols as f64).floor() as usize;

        match window.body {
            WindowBody::Empty(placeholder) => {
                let first = placeholder.and_then(|c| c.as_ref().lines().next());
                if let (Some(text), Some(line)) = (first, self.lines.first_mut()) {
                    push_clipped(line, text, max_cols);
                }
            }
            WindowBody::Slots(slots) => {
                let rows_per_item = window.geometry.item_size().ceil() as usize;
                let scroll = window.viewport.scroll_offset();
                for slot in slots {
                    let top = (slot.offset - scroll).floor();
                    let lines = slot.content.as_ref().split('\n').take(rows_per_item);
                    for (k, text) in lines.enumerate() {
                        let row = top + k as f64;
                        if row < 0.0 {
                            continue;
                        }
                        let Some(line) = self.lines.get_mut(row as usize) else {
                            break;
                        };
                        push_clipped(line, text, max_cols);
                    }
                }
            }
        }
    }

    /// Painted rows joined with newlines.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Append `text` to `line`, stopping before `max_cols` display columns.
///
/// Zero-width graphemes are dropped; a wide grapheme that would straddle the
/// edge is not drawn.
fn push_clipped(line: &mut String, text: &str, max_cols: usize) {
    let mut x = 0usize;
    for grapheme in text.graphemes(true) {
        if x >= max_cols {
            break;
        }
        let w = UnicodeWidthStr::width(grapheme);
        if w == 0 {
            continue;
        }
        if x + w > max_cols {
            break;
        }
        line.push_str(grapheme);
        x += w;
    }
}
