//! Relative-size bookkeeping for the slave stack.
//!
//! Sizes are stored as fractions of the full split-axis extent and nominally
//! sum to 1. Pixel amounts coming in from interactive resize are converted
//! against the extent of the screen rect the host supplied for the current
//! pass. The minimum slave size is a hard floor: no redistribution path may
//! push a pane below it, and whatever a neighbour group cannot supply is
//! dropped rather than reported.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RelativeSizes {
    sizes: Vec<f64>,
}

impl RelativeSizes {
    pub fn len(&self) -> usize { self.sizes.len() }

    pub fn is_empty(&self) -> bool { self.sizes.is_empty() }

    pub fn get(&self, idx: usize) -> f64 { self.sizes[idx] }

    pub fn as_slice(&self) -> &[f64] { &self.sizes }

    /// Resets to `count` equal shares.
    pub fn reset(&mut self, count: usize) {
        self.sizes.clear();
        if count > 0 {
            self.sizes.resize(count, 1.0 / count as f64);
        }
    }

    /// Repairs the length invariant: the vector must have exactly one entry
    /// per slave. Any mismatch discards the current proportions.
    pub fn repair(&mut self, count: usize) -> bool {
        if self.sizes.len() != count {
            self.reset(count);
            return true;
        }
        false
    }

    pub fn absolute(&self, idx: usize, extent: f64) -> f64 { self.sizes[idx] * extent }

    /// Remaining pixels `idx` can give up before hitting the floor.
    fn shrink_margin(&self, idx: usize, extent: f64, min_size: f64) -> f64 {
        (self.absolute(idx, extent) - min_size).max(0.0)
    }

    pub fn grow(&mut self, idx: usize, amount: f64, extent: f64) {
        self.sizes[idx] += amount / extent;
    }

    /// Shrinks `idx` by up to `amount` pixels, stopping at the floor.
    /// Returns the portion of `amount` that could not be applied.
    pub fn shrink(&mut self, idx: usize, amount: f64, extent: f64, min_size: f64) -> f64 {
        let margin = self.shrink_margin(idx, extent, min_size);
        if amount > margin {
            self.sizes[idx] -= margin / extent;
            amount - margin
        } else {
            self.sizes[idx] -= amount / extent;
            0.0
        }
    }

    /// Shrinks every entry above `idx` in order, each absorbing as much of
    /// the remaining amount as it can. Returns the unapplied remainder.
    pub fn shrink_up(&mut self, idx: usize, amount: f64, extent: f64, min_size: f64) -> f64 {
        let mut left = amount;
        for i in 0..idx {
            left = self.shrink(i, left, extent, min_size);
        }
        left
    }

    /// Shrinks the entries above `idx` by an equal share each, then runs a
    /// sequential pass to absorb whatever the equal split left over.
    pub fn shrink_up_shared(&mut self, idx: usize, amount: f64, extent: f64, min_size: f64) -> f64 {
        debug_assert!(idx > 0);
        let per_amount = amount / idx as f64;
        let mut left = amount;
        for i in 0..idx {
            left -= per_amount - self.shrink(i, per_amount, extent, min_size);
        }
        self.shrink_up(idx, left, extent, min_size)
    }

    /// Shrinks every entry below `idx` in order. Returns the remainder.
    pub fn shrink_down(&mut self, idx: usize, amount: f64, extent: f64, min_size: f64) -> f64 {
        let mut left = amount;
        for i in idx + 1..self.sizes.len() {
            left = self.shrink(i, left, extent, min_size);
        }
        left
    }

    /// Equal-share variant of [`RelativeSizes::shrink_down`], with the same
    /// absorption pass.
    pub fn shrink_down_shared(
        &mut self,
        idx: usize,
        amount: f64,
        extent: f64,
        min_size: f64,
    ) -> f64 {
        debug_assert!(idx + 1 < self.sizes.len());
        let per_amount = amount / (self.sizes.len() - 1 - idx) as f64;
        let mut left = amount;
        for i in idx + 1..self.sizes.len() {
            left -= per_amount - self.shrink(i, per_amount, extent, min_size);
        }
        self.shrink_down(idx, left, extent, min_size)
    }

    /// Grows every entry above `idx` by an equal share of `amount`.
    pub fn grow_up_shared(&mut self, idx: usize, amount: f64, extent: f64) {
        debug_assert!(idx > 0);
        let per_amount = amount / idx as f64;
        for i in 0..idx {
            self.grow(i, per_amount, extent);
        }
    }

    /// Grows every entry below `idx` by an equal share of `amount`.
    pub fn grow_down_shared(&mut self, idx: usize, amount: f64, extent: f64) {
        debug_assert!(idx + 1 < self.sizes.len());
        let per_amount = amount / (self.sizes.len() - 1 - idx) as f64;
        for i in idx + 1..self.sizes.len() {
            self.grow(i, per_amount, extent);
        }
    }

    /// Converts the fractions into `(offset, length)` pixel spans along the
    /// stacking axis. Boundaries are rounded cumulatively so the spans
    /// partition the extent exactly.
    pub fn spans(&self, extent: f64) -> Vec<(f64, f64)> {
        let mut out = Vec::with_capacity(self.sizes.len());
        let mut acc = 0.0;
        let mut start = 0.0;
        for &size in &self.sizes {
            acc += size;
            let end = (acc * extent).round();
            out.push((start, end - start));
            start = end;
        }
        out
    }
}
