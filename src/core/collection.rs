//! Region collections
//!
//! A [`RegionCollection`] owns an ordered sequence of region-like values and
//! an optional per-chromosome [`GenomeIndex`] over them.
//!
//! The index stores positions into the backing sequence, so every call that
//! adds, removes or reorders elements bumps the collection's generation.
//! Queries compare that generation with the one stamped on the index and fail
//! with [`RegionError::StaleIndex`] instead of answering from stale positions.

use crate::core::arithmetic::{default_backend, IntervalArithmetic, MISSING_BACKEND};
use crate::core::error::{RegionError, RegionResult};
use crate::core::index::GenomeIndex;
use crate::core::region::{ChromId, Ranged, Region, Strand};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::Index;

/// Where a collection stands with respect to its index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexState {
    /// No regions and no index
    Empty,
    /// Populated, never indexed or mutated since the last build
    Unindexed,
    /// Index matches the current contents
    Indexed,
}

/// Pairs produced by [`RegionCollection::find_overlaps`]
///
/// `query_ids[i]` and `subject_ids[i]` are positions in the query and subject
/// collections; `regions[i]` is the clipped overlap of that pair.
#[derive(Debug, Clone, Default)]
pub struct OverlapHits {
    pub regions: RegionCollection<Region>,
    pub query_ids: Vec<usize>,
    pub subject_ids: Vec<usize>,
}

impl OverlapHits {
    /// Number of (query, subject) hits
    pub fn len(&self) -> usize {
        self.query_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.query_ids.is_empty()
    }

    /// `(query_id, subject_id)` pairs in discovery order
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.query_ids.iter().copied().zip(self.subject_ids.iter().copied())
    }
}

/// Ordered, owned sequence of region-like values plus an optional index
#[derive(Debug, Clone)]
pub struct RegionCollection<T = Region> {
    regions: Vec<T>,
    index: Option<GenomeIndex>,
    generation: u64,
}

impl<T> Default for RegionCollection<T> {
    fn default() -> Self {
        Self {
            regions: Vec::new(),
            index: None,
            generation: 0,
        }
    }
}

impl<T: Ranged> RegionCollection<T> {
    /// Empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection holding exactly one element
    pub fn from_region(item: T) -> Self {
        Self::from(vec![item])
    }

    /// Mark the backing sequence as changed
    fn touch(&mut self) {
        self.generation += 1;
    }

    /// Append one element; invalidates the index
    pub fn add(&mut self, item: T) {
        self.regions.push(item);
        self.touch();
    }

    /// Append copies of every element of `other`; invalidates the index
    pub fn concat(&mut self, other: &RegionCollection<T>)
    where
        T: Clone,
    {
        self.regions.extend(other.regions.iter().cloned());
        self.touch();
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Backing sequence in its current order
    pub fn regions(&self) -> &[T] {
        &self.regions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.regions.iter()
    }

    /// Mutable access to every element; invalidates the index
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.touch();
        self.regions.iter_mut()
    }

    /// Element at `index`, or [`RegionError::OutOfBounds`]
    pub fn at(&self, index: usize) -> RegionResult<&T> {
        self.regions.get(index).ok_or(RegionError::OutOfBounds {
            index,
            len: self.regions.len(),
        })
    }

    /// Give up the backing sequence
    pub fn into_inner(self) -> Vec<T> {
        self.regions
    }

    /// Distinct chromosome ids, ascending
    pub fn chromosomes(&self) -> Vec<ChromId> {
        self.regions
            .iter()
            .map(|r| r.region().chrom)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Mutation counter; the index is valid only for the generation it was built at
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> IndexState {
        match &self.index {
            Some(index) if index.generation() == self.generation => IndexState::Indexed,
            _ if self.regions.is_empty() => IndexState::Empty,
            _ => IndexState::Unindexed,
        }
    }

    pub fn is_indexed(&self) -> bool {
        self.state() == IndexState::Indexed
    }

    /// Sort by `(chrom, start, end)`; invalidates the index
    pub fn sort(&mut self) {
        self.regions.sort_by(|a, b| a.region().cmp(b.region()));
        self.touch();
    }

    /// Sort the backing sequence and build one interval index per chromosome.
    ///
    /// The sort is destructive: insertion order is lost. Payloads are
    /// positions in the sorted sequence.
    pub fn build_index(&mut self) {
        self.sort();

        let mut buckets: HashMap<ChromId, Vec<(i32, i32, usize)>> = HashMap::new();
        for (i, item) in self.regions.iter().enumerate() {
            let r = item.region();
            buckets.entry(r.chrom).or_default().push((r.start, r.end, i));
        }
        log::debug!(
            "built index over {} regions on {} chromosomes",
            self.regions.len(),
            buckets.len()
        );
        self.index = Some(GenomeIndex::new(buckets, self.generation));
    }

    /// The index, if it matches the current contents.
    ///
    /// `Ok(None)` for an empty collection that was never indexed; there is
    /// nothing it could under-report.
    fn fresh_index(&self) -> RegionResult<Option<&GenomeIndex>> {
        match &self.index {
            Some(index) if index.generation() == self.generation => Ok(Some(index)),
            Some(index) => Err(RegionError::StaleIndex {
                built: index.generation(),
                current: self.generation,
            }),
            None if self.regions.is_empty() => Ok(None),
            None => Err(RegionError::NotIndexed {
                len: self.regions.len(),
            }),
        }
    }

    /// Number of stored elements overlapping `region` (closed on both ends)
    pub fn find_overlapping(&self, region: &Region) -> RegionResult<usize> {
        Ok(self
            .fresh_index()?
            .map(|index| index.count_overlapping(region.chrom, region.start, region.end))
            .unwrap_or(0))
    }

    /// Positions of stored elements overlapping `region`, in unspecified order
    pub fn overlapping_ids(&self, region: &Region) -> RegionResult<Vec<usize>> {
        Ok(self
            .fresh_index()?
            .map(|index| index.find_overlapping(region.chrom, region.start, region.end))
            .unwrap_or_default())
    }

    /// Overlap join with `self` as the query and `subject` as the indexed side.
    ///
    /// Every query element is looked up in the subject's index; each hit that
    /// passes the strand filter yields one pair and one clipped region
    /// `[max(q.start, s.start), min(q.end, s.end)]`. Results follow query
    /// order, then the index's hit order, which is unspecified.
    pub fn find_overlaps<K: Ranged>(
        &self,
        subject: &RegionCollection<K>,
        ignore_strand: bool,
    ) -> RegionResult<OverlapHits> {
        let mut hits = OverlapHits::default();
        let Some(index) = subject.fresh_index()? else {
            return Ok(hits);
        };

        let mut clipped = Vec::new();
        for (qi, item) in self.regions.iter().enumerate() {
            let q = item.region();
            for si in index.find_overlapping(q.chrom, q.start, q.end) {
                let s = subject.regions[si].region();
                if !ignore_strand && q.strand != s.strand {
                    continue;
                }
                hits.query_ids.push(qi);
                hits.subject_ids.push(si);
                clipped.push(Region {
                    chrom: q.chrom,
                    start: q.start.max(s.start),
                    end: q.end.min(s.end),
                    strand: if ignore_strand { Strand::Unstranded } else { q.strand },
                });
            }
        }
        hits.regions = RegionCollection::from(clipped);
        Ok(hits)
    }

    /// Clipped overlaps of `self` against an indexed `subject`
    pub fn intersection<K: Ranged>(
        &self,
        subject: &RegionCollection<K>,
        ignore_strand: bool,
    ) -> RegionResult<RegionCollection<Region>> {
        Ok(self.find_overlaps(subject, ignore_strand)?.regions)
    }

    /// Reduce to the minimal set of non-overlapping intervals.
    ///
    /// After sorting, neighbours merge only when they share a chromosome and
    /// the earlier end is strictly greater than the later start; touching
    /// intervals stay separate. The earlier element survives with the larger
    /// end. Invalidates the index.
    pub fn merge_overlapping_intervals(&mut self) {
        let mut items = std::mem::take(&mut self.regions);
        items.sort_by(|a, b| a.region().cmp(b.region()));

        let mut merged: Vec<T> = Vec::with_capacity(items.len());
        for item in items {
            if let Some(last) = merged.last_mut() {
                let (prev, next) = (*last.region(), *item.region());
                if prev.chrom == next.chrom && prev.end > next.start {
                    if next.end > prev.end {
                        last.region_mut().end = next.end;
                    }
                    continue;
                }
            }
            merged.push(item);
        }

        self.regions = merged;
        self.touch();
    }

    /// Expand every element by `amount` on both sides (negative shrinks).
    /// No clamping at zero. Invalidates the index.
    pub fn pad(&mut self, amount: i32) {
        for item in self.regions.iter_mut() {
            item.region_mut().pad(amount);
        }
        self.touch();
    }

    /// `self - subject` per chromosome using the compiled-in arithmetic backend.
    ///
    /// Without a backend this logs a diagnostic and returns an empty
    /// collection.
    pub fn complement<K: Ranged>(
        &self,
        subject: &RegionCollection<K>,
        ignore_strand: bool,
    ) -> RegionCollection<Region> {
        match self.complement_with(subject, ignore_strand, default_backend()) {
            Ok(out) => out,
            Err(e) => {
                log::error!("complement not computed: {}; returning an empty collection", e);
                RegionCollection::new()
            }
        }
    }

    /// `self - subject` with an explicit arithmetic backend.
    ///
    /// Both operands are reduced first (on copies). Chromosomes of `self`
    /// with nothing in `subject` pass through merged, strand included. With
    /// `ignore_strand == false` only same-strand intervals are subtracted and
    /// the output keeps the strand; otherwise strands are pooled and the
    /// subtracted output is unstranded. Output is sorted.
    pub fn complement_with<K: Ranged>(
        &self,
        subject: &RegionCollection<K>,
        ignore_strand: bool,
        backend: &dyn IntervalArithmetic,
    ) -> RegionResult<RegionCollection<Region>> {
        if !backend.is_available() {
            return Err(RegionError::Unsupported(MISSING_BACKEND));
        }

        let subject_chroms: BTreeSet<ChromId> = subject.iter().map(|t| t.region().chrom).collect();

        let mut passthrough: RegionCollection<Region> = self
            .regions
            .iter()
            .map(|t| *t.region())
            .filter(|r| !subject_chroms.contains(&r.chrom))
            .collect();
        passthrough.merge_overlapping_intervals();
        let mut out = passthrough.into_inner();

        let ours = partition_spans(
            self.regions
                .iter()
                .map(|t| t.region())
                .filter(|r| subject_chroms.contains(&r.chrom)),
            ignore_strand,
        );
        let theirs = partition_spans(subject.iter().map(|t| t.region()), ignore_strand);

        for (&(chrom, strand), spans) in &ours {
            let remaining = match theirs.get(&(chrom, strand)) {
                Some(cut) => backend.subtract(spans, cut)?,
                None => spans.clone(),
            };
            out.extend(remaining.into_iter().map(|(start, end)| Region {
                chrom,
                start,
                end,
                strand,
            }));
        }
        out.sort();
        Ok(RegionCollection::from(out))
    }
}

impl RegionCollection<Region> {
    /// Split `region` into windows of `width` sharing `overlap` bases.
    ///
    /// A region no wider than `width` comes back whole. Otherwise windows
    /// advance by `width - overlap` while they fit; if the last one stops
    /// short of `region.end`, a final window `[last.end - overlap, region.end)`
    /// closes the gap.
    ///
    /// # Examples
    /// ```
    /// use genomic_regions::{Region, RegionCollection};
    /// let region = Region::new(0, 0, 250).unwrap();
    /// let tiles = RegionCollection::tile(100, 10, &region).unwrap();
    /// let spans: Vec<_> = tiles.iter().map(|r| (r.start, r.end)).collect();
    /// assert_eq!(spans, vec![(0, 100), (90, 190), (180, 250)]);
    /// ```
    pub fn tile(width: i32, overlap: i32, region: &Region) -> RegionResult<Self> {
        if overlap < 0 || width <= overlap {
            return Err(RegionError::InvalidTiling { width, overlap });
        }
        if i64::from(width) >= region.width() {
            return Ok(Self::from_region(*region));
        }

        let step = width - overlap;
        let window = |start: i32, end: i32| Region {
            chrom: region.chrom,
            start,
            end,
            strand: region.strand,
        };

        let mut windows = Vec::new();
        let (mut start, mut end) = (region.start, region.start + width);
        while end <= region.end {
            windows.push(window(start, end));
            match end.checked_add(step) {
                Some(next) => {
                    start += step;
                    end = next;
                }
                None => break,
            }
        }

        if let Some(last) = windows.last().copied() {
            if last.end != region.end {
                windows.push(window(last.end - overlap, region.end));
            }
        }
        Ok(Self::from(windows))
    }
}

/// Group spans by `(chrom, strand)` and reduce each group with the strict
/// merge rule. Strand is pooled to [`Strand::Unstranded`] when ignored.
fn partition_spans<'a>(
    regions: impl Iterator<Item = &'a Region>,
    ignore_strand: bool,
) -> BTreeMap<(ChromId, Strand), Vec<(i32, i32)>> {
    let mut groups: BTreeMap<(ChromId, Strand), Vec<(i32, i32)>> = BTreeMap::new();
    for r in regions {
        let strand = if ignore_strand { Strand::Unstranded } else { r.strand };
        groups.entry((r.chrom, strand)).or_default().push((r.start, r.end));
    }

    for spans in groups.values_mut() {
        spans.sort_unstable();
        let mut reduced: Vec<(i32, i32)> = Vec::with_capacity(spans.len());
        for &(start, end) in spans.iter() {
            match reduced.last_mut() {
                Some(last) if last.1 > start => last.1 = last.1.max(end),
                _ => reduced.push((start, end)),
            }
        }
        *spans = reduced;
    }
    groups
}

impl<T> From<Vec<T>> for RegionCollection<T> {
    fn from(regions: Vec<T>) -> Self {
        Self {
            regions,
            index: None,
            generation: 0,
        }
    }
}

impl<T> FromIterator<T> for RegionCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T: Ranged> Extend<T> for RegionCollection<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.regions.extend(iter);
        self.touch();
    }
}

impl<T> Index<usize> for RegionCollection<T> {
    type Output = T;

    /// Panics when out of bounds, like slice indexing
    fn index(&self, index: usize) -> &T {
        &self.regions[index]
    }
}

impl<'a, T> IntoIterator for &'a RegionCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}

impl<T> IntoIterator for RegionCollection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(chrom: ChromId, start: i32, end: i32) -> Region {
        Region::new(chrom, start, end).unwrap()
    }

    fn rs(chrom: ChromId, start: i32, end: i32, strand: Strand) -> Region {
        Region::with_strand(chrom, start, end, strand).unwrap()
    }

    fn spans(c: &RegionCollection<Region>) -> Vec<(ChromId, i32, i32)> {
        c.iter().map(|r| (r.chrom, r.start, r.end)).collect()
    }

    #[test]
    fn test_state_machine() {
        let mut c = RegionCollection::new();
        assert_eq!(c.state(), IndexState::Empty);
        assert_eq!(c.find_overlapping(&r(0, 0, 10)), Ok(0));

        c.add(r(0, 5, 15));
        assert_eq!(c.state(), IndexState::Unindexed);
        assert_eq!(
            c.find_overlapping(&r(0, 0, 10)),
            Err(RegionError::NotIndexed { len: 1 })
        );

        c.build_index();
        assert_eq!(c.state(), IndexState::Indexed);
        assert_eq!(c.find_overlapping(&r(0, 0, 10)), Ok(1));

        let built = c.generation();
        c.pad(1);
        assert_eq!(c.state(), IndexState::Unindexed);
        assert_eq!(
            c.find_overlapping(&r(0, 0, 10)),
            Err(RegionError::StaleIndex {
                built,
                current: built + 1
            })
        );
    }

    #[test]
    fn test_every_mutation_invalidates() {
        let mut c: RegionCollection = vec![r(0, 0, 10), r(0, 5, 20)].into();
        let other: RegionCollection = vec![r(1, 0, 10)].into();

        let mutations: Vec<Box<dyn Fn(&mut RegionCollection)>> = vec![
            Box::new(|c: &mut RegionCollection| c.add(r(0, 1, 2))),
            Box::new(move |c: &mut RegionCollection| c.concat(&other)),
            Box::new(|c: &mut RegionCollection| c.pad(3)),
            Box::new(|c: &mut RegionCollection| c.merge_overlapping_intervals()),
            Box::new(|c: &mut RegionCollection| c.sort()),
            Box::new(|c: &mut RegionCollection| c.extend([r(2, 0, 1)])),
            Box::new(|c: &mut RegionCollection| {
                let _ = c.iter_mut();
            }),
        ];
        for mutate in mutations {
            c.build_index();
            assert!(c.is_indexed());
            mutate(&mut c);
            assert!(!c.is_indexed());
            assert!(matches!(
                c.find_overlapping(&r(0, 0, 1)),
                Err(RegionError::StaleIndex { .. })
            ));
        }
    }

    #[test]
    fn test_build_index_sorts() {
        let mut c: RegionCollection = vec![r(1, 0, 5), r(0, 50, 60), r(0, 10, 20)].into();
        c.build_index();
        assert_eq!(spans(&c), vec![(0, 10, 20), (0, 50, 60), (1, 0, 5)]);
    }

    #[test]
    fn test_find_overlapping_unseen_chrom() {
        let mut c: RegionCollection = vec![r(0, 10, 20)].into();
        c.build_index();
        assert_eq!(c.find_overlapping(&r(5, 10, 20)), Ok(0));
        assert_eq!(c.overlapping_ids(&r(5, 10, 20)), Ok(vec![]));
    }

    #[test]
    fn test_find_overlaps_clips_and_pairs() {
        let query: RegionCollection = vec![r(0, 100, 200), r(1, 0, 10), r(0, 500, 600)].into();
        let mut subject: RegionCollection = vec![r(0, 150, 300), r(0, 50, 120), r(2, 0, 10)].into();
        subject.build_index();

        let hits = query.find_overlaps(&subject, true).unwrap();
        assert_eq!(hits.len(), 2);

        let mut got: Vec<_> = hits
            .pairs()
            .zip(hits.regions.iter())
            .map(|((q, s), c)| (q, s, c.start, c.end))
            .collect();
        got.sort_unstable();
        // Subject sorted by build_index: [50,120] at 0, [150,300] at 1
        assert_eq!(got, vec![(0, 0, 100, 120), (0, 1, 150, 200)]);
    }

    #[test]
    fn test_find_overlaps_strand_filter() {
        let query: RegionCollection = vec![rs(0, 0, 100, Strand::Plus)].into();
        let mut subject: RegionCollection =
            vec![rs(0, 10, 20, Strand::Plus), rs(0, 30, 40, Strand::Minus)].into();
        subject.build_index();

        let stranded = query.find_overlaps(&subject, false).unwrap();
        assert_eq!(stranded.len(), 1);
        assert_eq!(stranded.regions[0].strand, Strand::Plus);
        assert_eq!((stranded.regions[0].start, stranded.regions[0].end), (10, 20));

        let pooled = query.find_overlaps(&subject, true).unwrap();
        assert_eq!(pooled.len(), 2);
        assert!(pooled.regions.iter().all(|r| r.strand == Strand::Unstranded));
    }

    #[test]
    fn test_find_overlaps_requires_fresh_subject() {
        let query: RegionCollection = vec![r(0, 0, 10)].into();
        let subject: RegionCollection = vec![r(0, 0, 10)].into();
        assert_eq!(
            query.find_overlaps(&subject, true).map(|h| h.len()),
            Err(RegionError::NotIndexed { len: 1 })
        );
        assert!(query.intersection(&RegionCollection::<Region>::new(), true).unwrap().is_empty());
    }

    #[test]
    fn test_touching_intervals_overlap_in_queries() {
        let query: RegionCollection = vec![r(0, 0, 100)].into();
        let mut subject: RegionCollection = vec![r(0, 100, 200)].into();
        subject.build_index();
        let out = query.intersection(&subject, true).unwrap();
        assert_eq!(spans(&out), vec![(0, 100, 100)]);
    }

    #[test]
    fn test_merge_overlapping() {
        let mut c: RegionCollection = vec![
            r(0, 50, 80),
            r(0, 10, 60),
            r(0, 80, 90),
            r(1, 0, 5),
            r(0, 12, 20),
        ]
        .into();
        c.merge_overlapping_intervals();
        // [80,90] only touches [10,80] and stays separate
        assert_eq!(spans(&c), vec![(0, 10, 80), (0, 80, 90), (1, 0, 5)]);
    }

    #[test]
    fn test_merge_does_not_cross_chromosomes() {
        let mut c: RegionCollection = vec![r(0, 0, 100), r(1, 10, 20)].into();
        c.merge_overlapping_intervals();
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_pad_round_trip() {
        let mut c: RegionCollection = vec![r(0, 100, 200), r(3, 5, 5)].into();
        let before = c.clone().into_inner();
        c.pad(5);
        assert_eq!(spans(&c), vec![(0, 95, 205), (3, 0, 10)]);
        c.pad(-5);
        assert_eq!(c.into_inner(), before);
    }

    #[test]
    fn test_tile() {
        let region = r(4, 0, 250);
        let tiles = RegionCollection::tile(100, 10, &region).unwrap();
        assert_eq!(spans(&tiles), vec![(4, 0, 100), (4, 90, 190), (4, 180, 250)]);

        let exact = RegionCollection::tile(100, 0, &r(0, 0, 300)).unwrap();
        assert_eq!(spans(&exact), vec![(0, 0, 100), (0, 100, 200), (0, 200, 300)]);

        let whole = RegionCollection::tile(500, 10, &region).unwrap();
        assert_eq!(spans(&whole), vec![(4, 0, 250)]);
    }

    #[test]
    fn test_tile_full_range_region() {
        let region = r(0, -10, i32::MAX);
        assert_eq!(region.width(), i32::MAX as i64 + 10);

        let tiles = RegionCollection::tile(1_000_000_000, 0, &region).unwrap();
        assert_eq!(
            spans(&tiles),
            vec![
                (0, -10, 999_999_990),
                (0, 999_999_990, 1_999_999_990),
                (0, 1_999_999_990, i32::MAX),
            ]
        );

        let whole = RegionCollection::tile(i32::MAX, 0, &r(0, 0, i32::MAX)).unwrap();
        assert_eq!(spans(&whole), vec![(0, 0, i32::MAX)]);
    }

    #[test]
    fn test_tile_rejects_bad_parameters() {
        let region = r(0, 0, 250);
        assert_eq!(
            RegionCollection::tile(10, 10, &region).map(|c| c.len()),
            Err(RegionError::InvalidTiling { width: 10, overlap: 10 })
        );
        assert!(RegionCollection::tile(10, -1, &region).is_err());
    }

    #[test]
    fn test_at_out_of_bounds() {
        let c: RegionCollection = vec![r(0, 0, 1)].into();
        assert!(c.at(0).is_ok());
        assert_eq!(c.at(1), Err(RegionError::OutOfBounds { index: 1, len: 1 }));
    }

    #[test]
    #[should_panic]
    fn test_index_operator_panics() {
        let c: RegionCollection = RegionCollection::new();
        let _region: Region = c[0];
    }

    #[test]
    fn test_chromosomes() {
        let c: RegionCollection = vec![r(3, 0, 1), r(1, 0, 1), r(3, 5, 6)].into();
        assert_eq!(c.chromosomes(), vec![1, 3]);
    }

    #[cfg(feature = "interval-arithmetic")]
    #[test]
    fn test_complement() {
        let this: RegionCollection = vec![r(0, 0, 100), r(0, 50, 150), r(1, 10, 20)].into();
        let subject: RegionCollection = vec![r(0, 40, 60)].into();

        let out = this.complement(&subject, true);
        assert_eq!(spans(&out), vec![(0, 0, 39), (0, 61, 150), (1, 10, 20)]);
        // Operands are untouched
        assert_eq!(this.len(), 3);
    }

    #[cfg(feature = "interval-arithmetic")]
    #[test]
    fn test_complement_respects_strand() {
        let this: RegionCollection = vec![rs(0, 0, 100, Strand::Plus)].into();
        let subject: RegionCollection = vec![rs(0, 40, 60, Strand::Minus)].into();

        let stranded = this.complement(&subject, false);
        assert_eq!(spans(&stranded), vec![(0, 0, 100)]);
        assert_eq!(stranded[0].strand, Strand::Plus);

        let pooled = this.complement(&subject, true);
        assert_eq!(spans(&pooled), vec![(0, 0, 39), (0, 61, 100)]);
    }

    #[cfg(feature = "interval-arithmetic")]
    #[test]
    fn test_complement_passthrough_keeps_strand() {
        let this: RegionCollection = vec![
            rs(0, 0, 100, Strand::Plus),
            rs(2, 5, 9, Strand::Minus),
            rs(2, 8, 20, Strand::Plus),
        ]
        .into();
        let subject: RegionCollection = vec![r(0, 40, 60)].into();

        let pooled = this.complement(&subject, true);
        assert_eq!(spans(&pooled), vec![(0, 0, 39), (0, 61, 100), (2, 5, 20)]);
        assert_eq!(pooled[0].strand, Strand::Unstranded);
        // Chromosome 2 is absent from the subject: merged, earlier strand kept
        assert_eq!(pooled[2].strand, Strand::Minus);
    }

    #[test]
    fn test_complement_without_backend() {
        use crate::core::arithmetic::Unavailable;

        let this: RegionCollection = vec![r(0, 0, 100)].into();
        let subject: RegionCollection = RegionCollection::new();
        assert_eq!(
            this.complement_with(&subject, true, &Unavailable).map(|c| c.len()),
            Err(RegionError::Unsupported(MISSING_BACKEND))
        );
    }
}
