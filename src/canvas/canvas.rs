//! Layered canvas: one sparse layer per color

use std::collections::BTreeMap;
use std::mem;

use tracing::{debug, info, warn};

use super::layer::{Connectivity, Layer};
use super::row_bits::RowBits;
use super::shapes::{self, Line, Point, Rect, Shape};
use crate::errors::{DrawError, Result};

/// Default color of lines and rectangles
pub const DEFAULT_STROKE: char = 'x';

/// Default color of a fresh canvas
pub const DEFAULT_BACKGROUND: char = ' ';

/// Default upper bound for the memory a new canvas may reserve (2 GiB)
pub const DEFAULT_MEMORY_LIMIT: u64 = 2 * 1024 * 1024 * 1024;

/// Bookkeeping a heap allocation costs on top of its payload
const ALLOCATION_OVERHEAD: u64 = 16;

/// B-tree leaf holding the single run of a fresh background row
const RUN_LEAF_BYTES: u64 = 112;

/// Options for a new canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasOptions {
    /// Color used when a shape does not name one
    pub stroke: char,
    /// Color every pixel starts with
    pub background: char,
    /// Largest estimated footprint accepted at creation, in bytes
    pub memory_limit: u64,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            stroke: DEFAULT_STROKE,
            background: DEFAULT_BACKGROUND,
            memory_limit: DEFAULT_MEMORY_LIMIT,
        }
    }
}

/// Text canvas
///
/// Every in-bounds pixel is owned by exactly one layer. Drawing a color sets
/// its bits on that color's layer and clears them on all the others.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: i32,
    height: i32,
    stroke: char,
    background: char,
    layers: BTreeMap<char, Layer>,
}

impl Canvas {
    /// Create a blank canvas with default options
    pub fn new(width: i32, height: i32) -> Result<Self> {
        Self::with_options(width, height, &CanvasOptions::default())
    }

    /// Create a blank canvas
    pub fn with_options(width: i32, height: i32, options: &CanvasOptions) -> Result<Self> {
        let (Ok(columns), Ok(rows)) = (u32::try_from(width), u32::try_from(height)) else {
            return Err(DrawError::InvalidDimensions { width, height });
        };

        match Self::estimated_bytes(columns, rows) {
            Some(bytes) if bytes <= options.memory_limit => {
                debug!(width, height, bytes, "canvas footprint estimate");
            }
            estimate => {
                warn!(
                    width,
                    height,
                    ?estimate,
                    limit = options.memory_limit,
                    "canvas does not fit the memory limit"
                );
                return Err(DrawError::AllocationFailed { width, height });
            }
        }

        let mut layers = BTreeMap::new();
        layers.insert(options.background, Layer::try_filled(columns, rows)?);
        if options.stroke != options.background {
            layers.insert(options.stroke, Layer::try_new(columns, rows)?);
        }

        info!(width, height, "canvas created");
        Ok(Self {
            width,
            height,
            stroke: options.stroke,
            background: options.background,
            layers,
        })
    }

    /// Bytes needed by the background and stroke layers of a fresh canvas
    pub fn estimated_bytes(width: u32, height: u32) -> Option<u64> {
        let slot = mem::size_of::<Option<RowBits>>() as u64;
        let tables = u64::from(height).checked_mul(slot)?.checked_mul(2)?;
        let background_runs = if width == 0 {
            0
        } else {
            u64::from(height).checked_mul(RUN_LEAF_BYTES + ALLOCATION_OVERHEAD)?
        };
        tables.checked_add(background_runs)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Color used for shapes that do not name one
    #[inline]
    pub fn stroke(&self) -> char {
        self.stroke
    }

    /// Color the canvas started with
    #[inline]
    pub fn background(&self) -> char {
        self.background
    }

    /// Colors that currently have a layer
    pub fn colors(&self) -> impl Iterator<Item = char> + '_ {
        self.layers.keys().copied()
    }

    /// Draw a shape; nothing is drawn unless every segment is axis-aligned
    pub fn draw<S: Shape>(&mut self, shape: &S) -> Result<()> {
        let segments = shape.segments();
        if let Some(&(start, end)) = segments
            .iter()
            .find(|(start, end)| !shapes::is_axis_aligned(*start, *end))
        {
            return Err(DrawError::UnsupportedLine {
                x1: start.x,
                y1: start.y,
                x2: end.x,
                y2: end.y,
            });
        }

        let color = shape.color().unwrap_or(self.stroke);
        for (start, end) in segments {
            self.draw_segment(start, end, color)?;
        }
        self.collect_empty_layers();
        Ok(())
    }

    /// Draw a horizontal or vertical line between two 1-based points
    pub fn draw_line(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Option<char>,
    ) -> Result<()> {
        let mut line = Line::new((x1, y1), (x2, y2));
        line.color = color;
        self.draw(&line)
    }

    /// Draw the outline of the rectangle with opposite corners `(x1, y1)` and
    /// `(x2, y2)`
    pub fn draw_rectangle(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Option<char>,
    ) -> Result<()> {
        let mut rect = Rect::new((x1, y1), (x2, y2));
        rect.color = color;
        self.draw(&rect)
    }

    fn draw_segment(&mut self, start: Point, end: Point, color: char) -> Result<()> {
        if start.x == end.x {
            let Some(x) = shapes::clip_point(start.x, self.width) else {
                return Ok(());
            };
            let Some((first, last)) = shapes::clip_span(start.y, end.y, self.height) else {
                return Ok(());
            };
            self.ensure_layer(color)?;
            for (&key, layer) in &mut self.layers {
                if key == color {
                    layer.draw_vertical(x, first, last);
                } else {
                    layer.clear_vertical(x, first, last);
                }
            }
        } else {
            let Some(y) = shapes::clip_point(start.y, self.height) else {
                return Ok(());
            };
            let Some((first, last)) = shapes::clip_span(start.x, end.x, self.width) else {
                return Ok(());
            };
            self.ensure_layer(color)?;
            for (&key, layer) in &mut self.layers {
                if key == color {
                    layer.draw_horizontal(first, last, y);
                } else {
                    layer.clear_horizontal(first, last, y);
                }
            }
        }
        Ok(())
    }

    /// Recolor the region connected to the 1-based point `(x, y)`
    pub fn fill(&mut self, x: i32, y: i32, target: char, connectivity: Connectivity) -> Result<()> {
        let (Some(column), Some(row)) = (
            shapes::clip_point(x, self.width),
            shapes::clip_point(y, self.height),
        ) else {
            return Ok(());
        };

        let owner = self.owner_of(column, row);
        debug_assert!(owner.is_some(), "no layer owns pixel ({x}, {y})");
        let Some(owner) = owner else {
            return Err(DrawError::UnownedPixel { x, y });
        };
        if owner == target {
            return Ok(());
        }

        self.ensure_layer(target)?;
        let (Some(mut source), Some(mut destination)) =
            (self.layers.remove(&owner), self.layers.remove(&target))
        else {
            return Err(DrawError::UnownedPixel { x, y });
        };
        let moved = source.fill(column, row, &mut destination, connectivity);
        self.layers.insert(owner, source);
        self.layers.insert(target, destination);

        debug!(x, y, %owner, %target, ?connectivity, moved, "region filled");
        self.collect_empty_layers();
        Ok(())
    }

    /// Color of the 1-based point `(x, y)`, `None` when off the canvas
    pub fn color_at(&self, x: i32, y: i32) -> Option<char> {
        let column = shapes::clip_point(x, self.width)?;
        let row = shapes::clip_point(y, self.height)?;
        self.owner_of(column, row)
    }

    /// Every color claiming the 1-based point `(x, y)`
    ///
    /// Holds exactly one entry for any in-bounds point.
    pub fn owners(&self, x: i32, y: i32) -> Vec<char> {
        let (Some(column), Some(row)) = (
            shapes::clip_point(x, self.width),
            shapes::clip_point(y, self.height),
        ) else {
            return Vec::new();
        };
        self.layers
            .iter()
            .filter(|(_, layer)| layer.get(column, row))
            .map(|(&color, _)| color)
            .collect()
    }

    pub(super) fn layers(&self) -> &BTreeMap<char, Layer> {
        &self.layers
    }

    #[cfg(test)]
    pub(super) fn layers_mut(&mut self) -> &mut BTreeMap<char, Layer> {
        &mut self.layers
    }

    fn owner_of(&self, column: u32, row: u32) -> Option<char> {
        self.layers
            .iter()
            .find(|(_, layer)| layer.get(column, row))
            .map(|(&color, _)| color)
    }

    fn ensure_layer(&mut self, color: char) -> Result<()> {
        if !self.layers.contains_key(&color) {
            // Dimensions were validated as non-negative at creation
            let layer = Layer::try_new(self.width as u32, self.height as u32)?;
            self.layers.insert(color, layer);
            debug!(%color, "layer created");
        }
        Ok(())
    }

    /// Drop layers left without pixels
    fn collect_empty_layers(&mut self) {
        self.layers.retain(|color, layer| {
            let keep = !layer.is_empty();
            if !keep {
                debug!(%color, "layer removed");
            }
            keep
        });
    }
}
