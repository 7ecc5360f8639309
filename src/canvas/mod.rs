//! # Sparse layered canvas
//!
//! Every color owns a [`Layer`] of row bit vectors, and every pixel of the
//! canvas belongs to exactly one layer. Rows are stored as runs, so memory
//! follows the number of colored runs instead of `width * height`.
//!
//! ```text
//!   Canvas ── BTreeMap<char, Layer>
//!                  │
//!                  ▼
//!   Layer  ── Vec<Option<RowBits>>   (None = no pixel in that row)
//!                  │
//!                  ▼
//!   RowBits ── BTreeMap<first, last>   (one entry per Span)
//! ```

#[allow(clippy::module_inception)]
mod canvas;
mod layer;
mod render;
mod row_bits;
mod shapes;

pub use canvas::{Canvas, CanvasOptions, DEFAULT_BACKGROUND, DEFAULT_MEMORY_LIMIT, DEFAULT_STROKE};
pub use layer::{Connectivity, Layer};
pub use render::{Borders, FLUSH_THRESHOLD};
pub use row_bits::{RowBits, Span};
pub use shapes::{clip_point, clip_span, Line, Point, Rect, Shape};
