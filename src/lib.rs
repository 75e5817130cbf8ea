//! genomic-regions - genomic interval collections with fast overlap queries
//!
//! Collections of chromosome intervals that can be sorted, merged, padded,
//! tiled, complemented and intersected, backed by a per-chromosome interval
//! index.
//!
//! # Features
//!
//! - Closed-interval overlap queries through a per-chromosome index
//! - Stale-index detection: queries after a mutation fail instead of lying
//! - BED, VCF and MuTect call-stats readers (plain, gzip or bzip2)
//! - Complement behind the `interval-arithmetic` feature
//!
//! # Example
//!
//! ```
//! use genomic_regions::{ChromDict, Region, RegionCollection};
//!
//! let mut dict = ChromDict::new();
//! let chr1 = dict.get_or_insert("chr1").unwrap();
//!
//! let mut peaks: RegionCollection = vec![
//!     Region::new(chr1, 100, 200).unwrap(),
//!     Region::new(chr1, 150, 300).unwrap(),
//! ]
//! .into();
//! peaks.merge_overlapping_intervals();
//! peaks.build_index();
//!
//! let query = Region::new(chr1, 250, 260).unwrap();
//! assert_eq!(peaks.find_overlapping(&query).unwrap(), 1);
//! ```

pub mod annotate;
pub mod core;
pub mod formats;

// Re-export commonly used types
pub use annotate::{VariantSite, VariantSiteIndex};
pub use core::{
    ChromDict, ChromId, GenomicRegionsError, IndexState, IntervalIndex, OverlapHits, ParseError,
    Ranged, Region, RegionCollection, RegionError, Result, Strand,
};
pub use formats::{read_region_file, ReadOptions, ReadStats};
