//! Core region algebra
//!
//! This module contains the region and chromosome types, the interval
//! index, region collections and the set-arithmetic backend.

pub mod arithmetic;
mod collection;
mod error;
mod index;
pub mod io;
mod region;
pub mod sampling;

pub use arithmetic::{default_backend, IntervalArithmetic, Unavailable, MISSING_BACKEND};
#[cfg(feature = "interval-arithmetic")]
pub use arithmetic::SweepArithmetic;
pub use collection::{IndexState, OverlapHits, RegionCollection};
pub use error::{
    GenomicRegionsError, ParseError, ParseResult, RegionError, RegionResult, Result,
};
pub use index::{GenomeIndex, IndexedInterval, IntervalIndex};
pub use io::{
    create_writer, detect_compression, open_reader, ByteLineIterator, CompressionFormat, LineIterator,
    DEFAULT_BUFFER_SIZE,
};
pub use region::{ChromDict, ChromId, Ranged, Region, Strand};
