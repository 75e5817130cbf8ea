//! Sampling fractions over genomic intervals
//!
//! A BED file whose fourth column is the fraction of records to keep inside
//! each interval, used to down-sample reads or calls region by region.

use crate::core::io::open_reader;
use crate::core::{
    ChromDict, ParseError, ParseResult, Ranged, Region, RegionCollection, RegionResult, Result,
};
use crate::formats::bed::{is_bed_header, BedRecordView};
use crate::formats::{ingest, ReadOptions, ReadStats};
use rand::Rng;
use std::io::BufRead;
use std::path::Path;

/// An interval with the fraction of records to keep inside it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FracRegion {
    pub region: Region,
    /// Keep probability in `[0, 1]`
    pub fraction: f64,
}

impl Ranged for FracRegion {
    fn region(&self) -> &Region {
        &self.region
    }

    fn region_mut(&mut self) -> &mut Region {
        &mut self.region
    }
}

impl FracRegion {
    fn parse(line: &str, line_number: usize, dict: &mut ChromDict) -> ParseResult<Self> {
        let view = BedRecordView::parse(line, line_number)?;
        let raw = view.field(3).ok_or(ParseError::TooFewFields {
            line: line_number,
            expected: 4,
            found: view.field_count(),
        })?;
        let fraction: f64 = raw
            .trim()
            .parse()
            .ok()
            .filter(|f: &f64| (0.0..=1.0).contains(f))
            .ok_or_else(|| ParseError::InvalidNumber {
                line: line_number,
                field: "fraction",
                value: raw.to_string(),
            })?;

        Ok(Self {
            region: view.to_region(dict, line_number)?,
            fraction,
        })
    }
}

/// Indexed collection of [`FracRegion`]s
#[derive(Debug, Clone, Default)]
pub struct Fractions {
    regions: RegionCollection<FracRegion>,
}

impl Fractions {
    /// Parse `chrom start end fraction` lines and build the index
    pub fn from_reader<R: BufRead>(reader: R, dict: &mut ChromDict) -> Result<(Self, ReadStats)> {
        let (mut regions, stats) = ingest(reader, dict, ReadOptions::default(), |line, line_number, dict| {
            if is_bed_header(line) {
                return None;
            }
            Some(FracRegion::parse(line, line_number, dict))
        })?;
        regions.build_index();
        Ok((Self { regions }, stats))
    }

    /// Load a (possibly compressed) fractions BED file
    pub fn read_bed<P: AsRef<Path>>(path: P, dict: &mut ChromDict) -> Result<(Self, ReadStats)> {
        let loaded = Self::from_reader(open_reader(path.as_ref())?, dict)?;
        log::info!(
            "loaded {} sampling intervals from {}",
            loaded.0.len(),
            path.as_ref().display()
        );
        Ok(loaded)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Intervals in sorted order
    pub fn regions(&self) -> &[FracRegion] {
        self.regions.regions()
    }

    /// Fraction of the first (in sorted order) interval overlapping `region`
    pub fn fraction_for(&self, region: &Region) -> RegionResult<Option<f64>> {
        let ids = self.regions.overlapping_ids(region)?;
        Ok(ids.into_iter().min().map(|i| self.regions[i].fraction))
    }

    /// Sample whether to keep `region`; regions outside every interval are kept
    pub fn keep<R: Rng + ?Sized>(&self, region: &Region, rng: &mut R) -> RegionResult<bool> {
        Ok(match self.fraction_for(region)? {
            Some(fraction) => rng.gen::<f64>() < fraction,
            None => true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const FRACTIONS: &str = "chr1\t100\t200\t0.0\nchr1\t150\t300\t1.0\nchr2\t0\t50\t0.5\nchr2\t60\t70\t1.5\nchr2\t80\t90\n";

    fn load() -> (Fractions, ReadStats, ChromDict) {
        let mut dict = ChromDict::new();
        let (fractions, stats) = Fractions::from_reader(FRACTIONS.as_bytes(), &mut dict).unwrap();
        (fractions, stats, dict)
    }

    #[test]
    fn test_invalid_fractions_skipped() {
        let (fractions, stats, _) = load();
        assert_eq!(fractions.len(), 3);
        assert_eq!(stats, ReadStats { total: 5, added: 3, skipped: 2 });
    }

    #[test]
    fn test_fraction_for_first_sorted_hit() {
        let (fractions, _, dict) = load();
        let chr1 = dict.id("chr1").unwrap();
        assert_eq!(fractions.fraction_for(&Region::new(chr1, 160, 170).unwrap()), Ok(Some(0.0)));
        assert_eq!(fractions.fraction_for(&Region::new(chr1, 250, 260).unwrap()), Ok(Some(1.0)));
        assert_eq!(fractions.fraction_for(&Region::new(chr1, 400, 500).unwrap()), Ok(None));
    }

    #[test]
    fn test_keep_extremes() {
        let (fractions, _, dict) = load();
        let chr1 = dict.id("chr1").unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            assert!(!fractions.keep(&Region::new(chr1, 110, 120).unwrap(), &mut rng).unwrap());
            assert!(fractions.keep(&Region::new(chr1, 250, 260).unwrap(), &mut rng).unwrap());
            assert!(fractions.keep(&Region::new(chr1, 1000, 1001).unwrap(), &mut rng).unwrap());
        }
    }

    #[test]
    fn test_keep_half_is_roughly_half() {
        let (fractions, _, dict) = load();
        let chr2 = dict.id("chr2").unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let query = Region::new(chr2, 10, 20).unwrap();
        let kept = (0..2000)
            .filter(|_| fractions.keep(&query, &mut rng).unwrap())
            .count();
        assert!((800..1200).contains(&kept), "kept {}", kept);
    }
}
