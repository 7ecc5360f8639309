//! # Drawing Shell
//!
//! Text canvas with axis-aligned lines, rectangles and flood fill, driven by
//! a small command shell. Canvases may be declared up to `i32::MAX` on each
//! side: storage grows with the number of colored runs, not with the area.

pub mod canvas;
pub mod config;
pub mod errors;
pub mod shell;

pub use canvas::{Borders, Canvas, CanvasOptions, Connectivity};
pub use config::{load_config, ShellConfig};
pub use errors::{DrawError, Result};
pub use shell::{Flow, Shell};
