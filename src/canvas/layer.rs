//! Per-color sparse pixel storage and the run-based flood fill

use std::collections::BTreeMap;

use tracing::trace;

use super::row_bits::{RowBits, Span};
use crate::errors::{DrawError, Result};

/// Which neighbours count as connected during a fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// Pixels sharing an edge
    #[default]
    Four,
    /// Pixels sharing an edge or a corner
    Eight,
}

/// Pixels of one color
///
/// One slot per row; `None` means the color has no pixel in that row. Rows are
/// reclaimed as soon as clearing empties them.
#[derive(Debug, Clone)]
pub struct Layer {
    width: u32,
    rows: Vec<Option<RowBits>>,
    occupied: usize,
}

impl Layer {
    /// Create an empty layer
    pub fn try_new(width: u32, height: u32) -> Result<Self> {
        let mut rows = Vec::new();
        rows.try_reserve_exact(height as usize)
            .map_err(|_| allocation_failed(width, height))?;
        rows.resize_with(height as usize, || None);
        Ok(Self {
            width,
            rows,
            occupied: 0,
        })
    }

    /// Create a layer with every pixel set, used for the canvas background
    pub fn try_filled(width: u32, height: u32) -> Result<Self> {
        let mut layer = Self::try_new(width, height)?;
        if width > 0 {
            for row in &mut layer.rows {
                *row = Some(RowBits::filled(width));
            }
            layer.occupied = layer.rows.len();
        }
        Ok(layer)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Number of rows holding at least one pixel
    #[inline]
    pub fn occupied_rows(&self) -> usize {
        self.occupied
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    #[inline]
    pub fn row(&self, y: u32) -> Option<&RowBits> {
        self.rows.get(y as usize).and_then(Option::as_ref)
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.row(y).is_some_and(|row| row.get(x))
    }

    /// Run of row `y` holding column `x`
    #[inline]
    pub fn run_containing(&self, x: u32, y: u32) -> Option<Span> {
        self.row(y).and_then(|row| row.run_containing(x))
    }

    /// Total number of pixels
    pub fn cardinality(&self) -> u64 {
        self.rows.iter().flatten().map(RowBits::cardinality).sum()
    }

    /// Set `first..=last` in row `y`
    pub fn draw_horizontal(&mut self, first: u32, last: u32, y: u32) {
        if first > last || first >= self.width {
            return;
        }
        if let Some(row) = self.row_mut(y) {
            row.set_range(first, last);
        }
    }

    /// Clear `first..=last` in row `y`
    pub fn clear_horizontal(&mut self, first: u32, last: u32, y: u32) {
        let Some(row) = self.rows.get_mut(y as usize).and_then(Option::as_mut) else {
            return;
        };
        row.clear_range(first, last);
        self.reclaim(y);
    }

    /// Set column `x` in rows `first..=last`
    pub fn draw_vertical(&mut self, x: u32, first: u32, last: u32) {
        if x >= self.width {
            return;
        }
        for y in first..=last.min(self.height().saturating_sub(1)) {
            if let Some(row) = self.row_mut(y) {
                row.set(x);
            }
        }
    }

    /// Clear column `x` in rows `first..=last`
    pub fn clear_vertical(&mut self, x: u32, first: u32, last: u32) {
        for y in first..=last.min(self.height().saturating_sub(1)) {
            if let Some(row) = self.rows.get_mut(y as usize).and_then(Option::as_mut) {
                row.clear(x);
                self.reclaim(y);
            }
        }
    }

    /// Move the region connected to `(x, y)` into `destination`
    ///
    /// Works on whole runs inside a window bounded by the nearest empty rows
    /// above and below the seed. A run is taken out of this layer once, and
    /// the runs it touches in the neighbouring rows are queued on their row;
    /// rows are swept until no queued run is left. Returns the number of
    /// pixels moved.
    pub fn fill(
        &mut self,
        x: u32,
        y: u32,
        destination: &mut Layer,
        connectivity: Connectivity,
    ) -> u64 {
        let Some(seed) = self.run_containing(x, y) else {
            return 0;
        };

        let (top, bottom) = self.window(y);
        let mut region = Region::new(self.width, top, bottom);
        region.queue(y, seed);

        let mut sweeps = 0_u64;
        while let Some((row, spans)) = region.queued.pop_first() {
            self.sweep(row, spans, &mut region, connectivity);
            sweeps += 1;
        }

        let moved = region.cardinality();
        trace!(x, y, top, bottom, sweeps, moved, "fill converged");
        destination.merge(region);
        moved
    }

    /// Rows around `y` up to, not including, the first empty one
    fn window(&self, y: u32) -> (u32, u32) {
        let occupied = |row: u32| self.row(row).is_some_and(|bits| !bits.is_empty());
        let mut top = y;
        while top > 0 && occupied(top - 1) {
            top -= 1;
        }
        let mut bottom = y;
        while bottom + 1 < self.height() && occupied(bottom + 1) {
            bottom += 1;
        }
        (top, bottom)
    }

    /// Take the runs of `row` holding `spans` out of this layer and queue the
    /// runs they touch in the neighbouring rows
    fn sweep(
        &mut self,
        row: u32,
        spans: Vec<Span>,
        region: &mut Region,
        connectivity: Connectivity,
    ) {
        for span in spans {
            // The same run can be queued more than once; only the first takes it
            let Some(run) = self.run_containing(span.first, row) else {
                continue;
            };
            self.clear_horizontal(run.first, run.last, row);
            region.mark(row, run);

            let (reach_first, reach_last) = match connectivity {
                Connectivity::Four => (run.first, run.last),
                Connectivity::Eight => (
                    run.first.saturating_sub(1),
                    run.last.saturating_add(1).min(self.width - 1),
                ),
            };
            let neighbours = [row.checked_sub(1), row.checked_add(1)];
            for neighbour in neighbours.into_iter().flatten() {
                if !region.covers(neighbour) {
                    continue;
                }
                if let Some(bits) = self.row(neighbour) {
                    for touched in bits.runs_overlapping(reach_first, reach_last) {
                        region.queue(neighbour, touched);
                    }
                }
            }
        }
    }

    /// OR every row of `region` into this layer
    fn merge(&mut self, region: Region) {
        let top = region.top as usize;
        for (offset, bits) in region.rows.into_iter().enumerate() {
            let Some(bits) = bits.filter(|bits| !bits.is_empty()) else {
                continue;
            };
            let Some(slot) = self.rows.get_mut(top + offset) else {
                break;
            };
            match slot {
                Some(existing) => existing.union_with(&bits),
                None => {
                    *slot = Some(bits);
                    self.occupied += 1;
                }
            }
        }
    }

    /// Row `y`, created on demand; `None` past the last row
    fn row_mut(&mut self, y: u32) -> Option<&mut RowBits> {
        let slot = self.rows.get_mut(y as usize)?;
        if slot.is_none() {
            self.occupied += 1;
        }
        Some(slot.get_or_insert_with(|| RowBits::new(self.width)))
    }

    fn reclaim(&mut self, y: u32) {
        let Some(slot) = self.rows.get_mut(y as usize) else {
            return;
        };
        if slot.as_ref().is_some_and(RowBits::is_empty) {
            *slot = None;
            self.occupied -= 1;
        }
    }
}

/// Fill state for the rows of the processing window
///
/// `rows` holds the runs already taken and `queued` the runs found connected
/// but not yet taken, by row.
struct Region {
    width: u32,
    top: u32,
    bottom: u32,
    rows: Vec<Option<RowBits>>,
    queued: BTreeMap<u32, Vec<Span>>,
}

impl Region {
    fn new(width: u32, top: u32, bottom: u32) -> Self {
        Self {
            width,
            top,
            bottom,
            rows: vec![None; (bottom - top) as usize + 1],
            queued: BTreeMap::new(),
        }
    }

    #[inline]
    fn covers(&self, row: u32) -> bool {
        self.top <= row && row <= self.bottom
    }

    fn queue(&mut self, row: u32, span: Span) {
        self.queued.entry(row).or_default().push(span);
    }

    fn mark(&mut self, row: u32, span: Span) {
        let width = self.width;
        self.rows[(row - self.top) as usize]
            .get_or_insert_with(|| RowBits::new(width))
            .set_range(span.first, span.last);
    }

    fn cardinality(&self) -> u64 {
        self.rows.iter().flatten().map(RowBits::cardinality).sum()
    }
}

fn allocation_failed(width: u32, height: u32) -> DrawError {
    DrawError::AllocationFailed {
        width: i32::try_from(width).unwrap_or(i32::MAX),
        height: i32::try_from(height).unwrap_or(i32::MAX),
    }
}
