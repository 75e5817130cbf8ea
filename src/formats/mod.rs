//! File format adapters
//!
//! Readers that turn BED, VCF and MuTect call-stats text into region
//! collections, plus the BED exporter. Malformed records are logged and
//! skipped; reading continues with the next line.

pub mod bed;
pub mod fractions;
pub mod mutect;
pub mod vcf;

pub use bed::{read_bed, read_bed_from, to_bed_string, write_bed, BedRecordView};
pub use fractions::{FracRegion, Fractions};
pub use mutect::{read_call_stats, read_call_stats_from};
pub use vcf::{read_vcf, read_vcf_from};

use crate::core::io::{open_reader, ByteLineIterator};
use crate::core::{
    ChromDict, ChromId, ParseError, ParseResult, Ranged, RegionCollection, RegionError, Result,
};
use memchr::memchr;
use std::io::BufRead;
use std::path::Path;

/// Options applied while ingesting records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Bases added to both sides of every record; must be non-negative
    pub pad: i32,
}

impl ReadOptions {
    pub fn with_pad(pad: i32) -> Self {
        Self { pad }
    }

    fn validate(&self) -> std::result::Result<(), RegionError> {
        if self.pad < 0 {
            return Err(RegionError::InvalidPadding(self.pad));
        }
        Ok(())
    }
}

/// Ingestion statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadStats {
    /// Data records seen (comments and filtered lines excluded)
    pub total: usize,
    /// Records added to the collection
    pub added: usize,
    /// Malformed records that were skipped
    pub skipped: usize,
}

/// Region file flavours understood by [`read_region_file`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionFileFormat {
    Bed,
    Vcf,
    MuTect,
}

impl RegionFileFormat {
    /// Pick a reader from the file name and its first line
    pub fn detect(path: &Path, header: &str) -> Self {
        let name = path.to_string_lossy();
        if header.contains("MuTect") || name.contains("call_stats") || name.contains("callstats") {
            RegionFileFormat::MuTect
        } else if name.contains(".bed") {
            RegionFileFormat::Bed
        } else if name.contains(".vcf") {
            RegionFileFormat::Vcf
        } else {
            RegionFileFormat::Bed
        }
    }
}

/// Read a BED, VCF or MuTect call-stats file, choosing the reader by name and header
pub fn read_region_file<P: AsRef<Path>>(
    path: P,
    dict: &mut ChromDict,
    options: ReadOptions,
) -> Result<(RegionCollection, ReadStats)> {
    let path = path.as_ref();
    let mut header = Vec::new();
    if open_reader(path)?.read_until(b'\n', &mut header)? == 0 {
        log::warn!("region file is empty: {}", path.display());
    }

    let format = RegionFileFormat::detect(path, &String::from_utf8_lossy(&header));
    log::info!("reading {:?} regions from {}", format, path.display());
    match format {
        RegionFileFormat::MuTect => read_call_stats(path, dict, options),
        RegionFileFormat::Vcf => read_vcf(path, dict, options),
        RegionFileFormat::Bed => read_bed(path, dict, options),
    }
}

/// Tab-separated field boundaries of one line, found with memchr
pub struct TabFields<'a> {
    line: &'a str,
    bounds: Vec<(usize, usize)>,
}

impl<'a> TabFields<'a> {
    pub fn new(line: &'a str) -> Self {
        let bytes = line.as_bytes();
        let mut bounds = Vec::with_capacity(12);
        let mut start = 0;
        while let Some(tab) = memchr(b'\t', &bytes[start..]) {
            bounds.push((start, start + tab));
            start += tab + 1;
        }
        bounds.push((start, bytes.len()));
        Self { line, bounds }
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }

    /// Field `index`, if present
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.bounds.get(index).map(|&(s, e)| &self.line[s..e])
    }

    /// Field `index` or a `TooFewFields` error
    pub fn require(&self, index: usize, line: usize) -> ParseResult<&'a str> {
        self.get(index).ok_or(ParseError::TooFewFields {
            line,
            expected: index + 1,
            found: self.len(),
        })
    }
}

/// Parse a coordinate column
pub(crate) fn parse_coord(value: &str, field: &'static str, line: usize) -> ParseResult<i32> {
    value.trim().parse().map_err(|_| ParseError::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    })
}

/// Resolve a chromosome name through the dictionary
pub(crate) fn resolve_chrom(dict: &mut ChromDict, name: &str, line: usize) -> ParseResult<ChromId> {
    dict.get_or_insert(name).map_err(|_| ParseError::UnknownChromosome {
        line,
        chrom: name.to_string(),
    })
}

/// Shared ingestion loop.
///
/// `parse` returns `None` for lines that carry no record (headers, filtered
/// records), `Some(Err)` for malformed records and `Some(Ok)` otherwise.
pub(crate) fn ingest<T, R, F>(
    reader: R,
    dict: &mut ChromDict,
    options: ReadOptions,
    mut parse: F,
) -> Result<(RegionCollection<T>, ReadStats)>
where
    T: Ranged,
    R: BufRead,
    F: FnMut(&str, usize, &mut ChromDict) -> Option<ParseResult<T>>,
{
    options.validate()?;

    let mut records = Vec::new();
    let mut stats = ReadStats::default();
    let mut lines = ByteLineIterator::new(reader);

    loop {
        // next_line borrows the iterator, so take the number up front
        let line_number = lines.line_number() + 1;
        let Some(bytes) = lines.next_line() else {
            break;
        };
        let parsed = match std::str::from_utf8(bytes?) {
            Ok(line) => parse(line, line_number, dict),
            Err(_) => Some(Err(ParseError::InvalidUtf8 {
                line: line_number,
                field: "record",
            })),
        };
        let Some(parsed) = parsed else {
            continue;
        };

        stats.total += 1;
        match parsed {
            Ok(mut record) => {
                record.region_mut().pad(options.pad);
                records.push(record);
                stats.added += 1;
            }
            Err(e) => {
                log::warn!("skipping record: {}", e);
                stats.skipped += 1;
            }
        }
    }

    Ok((RegionCollection::from(records), stats))
}
