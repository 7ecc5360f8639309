//! Streaming text output of a canvas
//!
//! The canvas is written row by row into a bounded buffer that is handed to
//! the sink whenever it reaches [`FLUSH_THRESHOLD`] bytes, so rendering a
//! canvas of any size needs a fixed amount of memory.

use std::io::{self, Write};

use super::canvas::Canvas;
use crate::errors::Result;

/// Buffered bytes that trigger a write to the sink
pub const FLUSH_THRESHOLD: usize = 64 * 1024;

/// Border symbols around the rendered canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Borders {
    pub horizontal: char,
    pub vertical: char,
}

impl Default for Borders {
    fn default() -> Self {
        Self {
            horizontal: '-',
            vertical: '|',
        }
    }
}

/// Bounded accumulation buffer in front of a sink
struct ChunkWriter<'a, W: Write + ?Sized> {
    sink: &'a mut W,
    buffer: String,
    threshold: usize,
}

impl<'a, W: Write + ?Sized> ChunkWriter<'a, W> {
    fn new(sink: &'a mut W, threshold: usize) -> Self {
        Self {
            sink,
            buffer: String::with_capacity(threshold + 4),
            threshold,
        }
    }

    fn push(&mut self, ch: char) -> io::Result<()> {
        self.push_repeated(ch, 1)
    }

    fn push_repeated(&mut self, ch: char, count: u64) -> io::Result<()> {
        let width = ch.len_utf8();
        let mut remaining = count;
        while remaining > 0 {
            let room = (self.threshold.saturating_sub(self.buffer.len()) / width).max(1);
            let n = remaining.min(room as u64);
            self.buffer.extend(std::iter::repeat(ch).take(n as usize));
            remaining -= n;
            if self.buffer.len() >= self.threshold {
                self.drain()?;
            }
        }
        Ok(())
    }

    fn drain(&mut self) -> io::Result<()> {
        if !self.buffer.is_empty() {
            self.sink.write_all(self.buffer.as_bytes())?;
            self.buffer.clear();
        }
        Ok(())
    }

    fn finish(mut self) -> io::Result<()> {
        self.drain()?;
        self.sink.flush()
    }
}

/// Symbol shown for a cell; control characters show as blanks
#[inline]
fn printable(ch: char) -> char {
    if ch.is_control() {
        ' '
    } else {
        ch
    }
}

impl Canvas {
    /// Write the bordered canvas to `sink`
    pub fn render<W: Write + ?Sized>(&self, sink: &mut W, borders: Borders) -> Result<()> {
        self.render_chunked(sink, borders, FLUSH_THRESHOLD)
    }

    /// Render into a string; meant for small canvases
    pub fn render_to_string(&self, borders: Borders) -> Result<String> {
        let mut out = Vec::new();
        self.render(&mut out, borders)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    pub(crate) fn render_chunked<W: Write + ?Sized>(
        &self,
        sink: &mut W,
        borders: Borders,
        threshold: usize,
    ) -> Result<()> {
        // Dimensions are non-negative once the canvas exists
        let width = self.width() as u32;
        let height = self.height() as u32;
        let horizontal = printable(borders.horizontal);
        let vertical = printable(borders.vertical);

        let mut out = ChunkWriter::new(sink, threshold);
        let border = u64::from(width) + 2;
        out.push_repeated(horizontal, border)?;
        out.push('\n')?;

        for y in 0..height {
            out.push(vertical)?;
            let mut x = 0u32;
            while x < width {
                let (color, last) = self.run_at(x, y);
                out.push_repeated(printable(color), u64::from(last - x) + 1)?;
                x = last + 1;
            }
            out.push(vertical)?;
            out.push('\n')?;
        }

        out.push_repeated(horizontal, border)?;
        out.push('\n')?;
        out.finish()?;
        Ok(())
    }

    /// Color of the run holding `(x, y)` and the last column of that run
    fn run_at(&self, x: u32, y: u32) -> (char, u32) {
        let found = self
            .layers()
            .iter()
            .find_map(|(&color, layer)| Some((color, layer.run_containing(x, y)?.last)));
        debug_assert!(found.is_some(), "no layer owns pixel ({x}, {y})");
        found.unwrap_or((self.background(), x))
    }
}
