//! Interval index for efficient overlap queries
//!
//! Uses rust-lapper for O(log n + k) interval queries. Every query is closed
//! on both ends: `[a, b]` and `[c, d]` overlap when `a <= d && c <= b`.

use crate::core::region::ChromId;
use rust_lapper::{Interval, Lapper};
use std::collections::HashMap;

/// Type alias for stored intervals; `val` is a position in the backing sequence
pub type IndexedInterval = Interval<u64, usize>;

/// Map a signed coordinate onto an order-preserving unsigned key
#[inline]
fn key(coord: i32) -> u64 {
    (coord as i64 - i32::MIN as i64) as u64
}

/// Static interval index for a single chromosome
///
/// Built once from `(start, end, payload)` triples and never updated. The
/// payload is an opaque position chosen by the caller.
#[derive(Debug, Clone)]
pub struct IntervalIndex {
    lapper: Lapper<u64, usize>,
}

impl IntervalIndex {
    /// Build from `(start, end, payload)` triples
    pub fn new(entries: Vec<(i32, i32, usize)>) -> Self {
        // Closed [start, end] is stored half-open as [key(start), key(end) + 1)
        let intervals: Vec<IndexedInterval> = entries
            .into_iter()
            .map(|(start, end, val)| Interval {
                start: key(start),
                stop: key(end) + 1,
                val,
            })
            .collect();
        Self {
            lapper: Lapper::new(intervals),
        }
    }

    /// Payloads of every stored interval intersecting `[start, end]`
    pub fn find_overlapping(&self, start: i32, end: i32) -> Vec<usize> {
        if start > end {
            return Vec::new();
        }
        self.lapper
            .find(key(start), key(end) + 1)
            .map(|iv| iv.val)
            .collect()
    }

    /// Number of stored intervals intersecting `[start, end]`
    pub fn count_overlapping(&self, start: i32, end: i32) -> usize {
        if start > end {
            return 0;
        }
        self.lapper.find(key(start), key(end) + 1).count()
    }

    pub fn len(&self) -> usize {
        self.lapper.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lapper.is_empty()
    }
}

/// One [`IntervalIndex`] per chromosome, stamped with the generation of the
/// collection it was built from
#[derive(Debug, Clone)]
pub struct GenomeIndex {
    trees: HashMap<ChromId, IntervalIndex>,
    generation: u64,
}

impl GenomeIndex {
    /// Build from chromosome-bucketed `(start, end, payload)` triples
    pub fn new(buckets: HashMap<ChromId, Vec<(i32, i32, usize)>>, generation: u64) -> Self {
        let trees = buckets
            .into_iter()
            .map(|(chrom, entries)| {
                log::debug!("indexing {} intervals on chromosome id {}", entries.len(), chrom);
                (chrom, IntervalIndex::new(entries))
            })
            .collect();
        Self { trees, generation }
    }

    /// Payloads overlapping `[start, end]` on `chrom`; empty for unseen chromosomes
    pub fn find_overlapping(&self, chrom: ChromId, start: i32, end: i32) -> Vec<usize> {
        self.trees
            .get(&chrom)
            .map(|tree| tree.find_overlapping(start, end))
            .unwrap_or_default()
    }

    /// Count of intervals overlapping `[start, end]` on `chrom`
    pub fn count_overlapping(&self, chrom: ChromId, start: i32, end: i32) -> usize {
        self.trees
            .get(&chrom)
            .map(|tree| tree.count_overlapping(start, end))
            .unwrap_or(0)
    }

    /// Index for one chromosome
    pub fn chrom(&self, chrom: ChromId) -> Option<&IntervalIndex> {
        self.trees.get(&chrom)
    }

    /// Check if a chromosome has any stored intervals
    pub fn has_chrom(&self, chrom: ChromId) -> bool {
        self.trees.contains_key(&chrom)
    }

    /// Generation of the collection at build time
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Get total number of intervals across all chromosomes
    pub fn total_intervals(&self) -> usize {
        self.trees.values().map(|t| t.len()).sum()
    }
}
