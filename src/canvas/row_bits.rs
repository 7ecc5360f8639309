//! Fixed-capacity bit vector for a single canvas row
//!
//! Bits are stored as disjoint, non-adjacent runs keyed by their first index,
//! so a fully set row of `i32::MAX` columns costs one [`Span`]. Setting or
//! clearing a range costs `O(log r)` for a row of `r` runs, plus one removal
//! per run it absorbs; every run is removed at most once after being
//! inserted, so that part is amortized constant.

use std::cmp;
use std::collections::BTreeMap;

/// Inclusive run of set bits `first..=last`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub first: u32,
    pub last: u32,
}

impl Span {
    #[inline]
    pub const fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }

    /// Number of bits covered by the run, never zero
    #[inline]
    pub fn bit_count(self) -> u64 {
        u64::from(self.last - self.first) + 1
    }
}

/// Bits of one row, indices `0..width`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowBits {
    width: u32,
    /// `first -> last` of every run
    runs: BTreeMap<u32, u32>,
}

impl RowBits {
    /// Create an empty row
    pub fn new(width: u32) -> Self {
        Self {
            width,
            runs: BTreeMap::new(),
        }
    }

    /// Create a row with every bit set
    pub fn filled(width: u32) -> Self {
        let mut row = Self::new(width);
        if width > 0 {
            row.runs.insert(0, width - 1);
        }
        row
    }

    /// Create a row holding a single run
    pub fn with_span(width: u32, first: u32, last: u32) -> Self {
        let mut row = Self::new(width);
        row.set_range(first, last);
        row
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Number of set bits
    pub fn cardinality(&self) -> u64 {
        self.runs().map(Span::bit_count).sum()
    }

    #[inline]
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// All runs, left to right
    pub fn runs(&self) -> impl Iterator<Item = Span> + '_ {
        self.runs
            .iter()
            .map(|(&first, &last)| Span::new(first, last))
    }

    #[inline]
    pub fn get(&self, index: u32) -> bool {
        self.run_containing(index).is_some()
    }

    #[inline]
    pub fn set(&mut self, index: u32) {
        self.set_range(index, index);
    }

    #[inline]
    pub fn clear(&mut self, index: u32) {
        self.clear_range(index, index);
    }

    /// Run that contains `index`, if the bit is set
    pub fn run_containing(&self, index: u32) -> Option<Span> {
        let (&first, &last) = self.runs.range(..=index).next_back()?;
        (last >= index).then_some(Span::new(first, last))
    }

    /// Runs intersecting the inclusive interval `first..=last`, left to right
    pub fn runs_overlapping(&self, first: u32, last: u32) -> impl Iterator<Item = Span> + '_ {
        // A run starting left of `first` can still reach into the interval
        let start = self.run_containing(first).map_or(first, |run| run.first);
        (first <= last)
            .then_some(start..=last)
            .into_iter()
            .flat_map(move |keys| self.runs.range(keys))
            .map(|(&first, &last)| Span::new(first, last))
    }

    /// Set every bit of `first..=last`, clamped to the row width
    pub fn set_range(&mut self, first: u32, last: u32) {
        let Some((first, last)) = self.clamp(first, last) else {
            return;
        };
        let (mut start, mut end) = (first, last);

        // A run ending at `first - 1` or later is adjacent or overlapping
        if let Some((&before, &before_last)) = self.runs.range(..=first).next_back() {
            if u64::from(before_last) + 1 >= u64::from(first) {
                start = before;
                end = cmp::max(end, before_last);
            }
        }
        // So is every run starting inside `start..=last + 1`
        let reach = last.saturating_add(1);
        while let Some((&key, &run_last)) = self.runs.range(start..=reach).next() {
            self.runs.remove(&key);
            end = cmp::max(end, run_last);
        }
        self.runs.insert(start, end);
    }

    /// Clear every bit of `first..=last`, clamped to the row width
    pub fn clear_range(&mut self, first: u32, last: u32) {
        let Some((first, last)) = self.clamp(first, last) else {
            return;
        };

        if let Some((&before, &before_last)) = self.runs.range(..first).next_back() {
            if before_last >= first {
                self.runs.insert(before, first - 1);
                if before_last > last {
                    self.runs.insert(last + 1, before_last);
                    return;
                }
            }
        }
        while let Some((&key, &run_last)) = self.runs.range(first..=last).next() {
            self.runs.remove(&key);
            if run_last > last {
                self.runs.insert(last + 1, run_last);
                break;
            }
        }
    }

    /// First set bit at or after `from`
    pub fn next_set_bit(&self, from: u32) -> Option<u32> {
        if self.get(from) {
            return Some(from);
        }
        self.runs.range(from..).next().map(|(&first, _)| first)
    }

    /// First clear bit at or after `from`; equals `width` when none is left
    pub fn next_clear_bit(&self, from: u32) -> u32 {
        self.run_containing(from).map_or(from, |run| run.last + 1)
    }

    /// Last set bit at or before `from`
    pub fn previous_set_bit(&self, from: u32) -> Option<u32> {
        self.runs
            .range(..=from)
            .next_back()
            .map(|(_, &last)| cmp::min(last, from))
    }

    /// Last clear bit at or before `from`
    pub fn previous_clear_bit(&self, from: u32) -> Option<u32> {
        self.run_containing(from)
            .map_or(Some(from), |run| run.first.checked_sub(1))
    }

    /// Bitwise OR of `other` into `self`
    pub fn union_with(&mut self, other: &RowBits) {
        if self.is_empty() {
            self.runs.clone_from(&other.runs);
            return;
        }
        for run in other.runs() {
            self.set_range(run.first, run.last);
        }
    }

    fn clamp(&self, first: u32, last: u32) -> Option<(u32, u32)> {
        if self.width == 0 || first > last || first >= self.width {
            return None;
        }
        Some((first, cmp::min(last, self.width - 1)))
    }
}
