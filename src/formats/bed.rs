//! BED format adapter
//!
//! Reads BED3+ records into region collections and writes collections back as
//! three-column BED.

use crate::core::io::open_reader;
use crate::core::{ChromDict, ParseError, ParseResult, Ranged, Region, RegionCollection, Result, Strand};
use crate::formats::{ingest, parse_coord, resolve_chrom, ReadOptions, ReadStats, TabFields};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// BED record view over one line
/// Only parses chrom, start, end immediately; other columns stay as slices
pub struct BedRecordView<'a> {
    fields: TabFields<'a>,
    /// Chromosome name
    pub chrom: &'a str,
    /// Start position
    pub start: i32,
    /// End position
    pub end: i32,
}

impl<'a> BedRecordView<'a> {
    /// Parse a BED line; `line_number` is only used in errors
    pub fn parse(line: &'a str, line_number: usize) -> ParseResult<Self> {
        let fields = TabFields::new(line);
        // Need at least 3 fields (BED3)
        if fields.len() < 3 {
            return Err(ParseError::TooFewFields {
                line: line_number,
                expected: 3,
                found: fields.len(),
            });
        }

        let chrom = fields.require(0, line_number)?;
        let start = parse_coord(fields.require(1, line_number)?, "start", line_number)?;
        let end = parse_coord(fields.require(2, line_number)?, "end", line_number)?;

        Ok(Self {
            fields,
            chrom,
            start,
            end,
        })
    }

    /// Get the number of fields
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Get field as string slice
    pub fn field(&self, index: usize) -> Option<&'a str> {
        self.fields.get(index)
    }

    /// Get name field (field 3) if present
    pub fn name(&self) -> Option<&'a str> {
        self.field(3)
    }

    /// Get strand field (field 5); unstranded when absent or unrecognized
    pub fn strand(&self) -> Strand {
        self.field(5).and_then(Strand::from_field).unwrap_or_default()
    }

    /// Resolve into a [`Region`], enforcing `start <= end`
    pub fn to_region(&self, dict: &mut ChromDict, line_number: usize) -> ParseResult<Region> {
        let chrom = resolve_chrom(dict, self.chrom, line_number)?;
        Region::with_strand(chrom, self.start, self.end, self.strand()).map_err(|_| {
            ParseError::InvalidGeometry {
                line: line_number,
                start: self.start,
                end: self.end,
            }
        })
    }
}

/// Header, comment and blank lines carry no record
pub(crate) fn is_bed_header(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("track")
        || trimmed.starts_with("browser")
}

/// Read BED records from any buffered reader
pub fn read_bed_from<R: BufRead>(
    reader: R,
    dict: &mut ChromDict,
    options: ReadOptions,
) -> Result<(RegionCollection, ReadStats)> {
    ingest(reader, dict, options, |line, line_number, dict| {
        if is_bed_header(line) {
            return None;
        }
        Some(BedRecordView::parse(line, line_number).and_then(|view| view.to_region(dict, line_number)))
    })
}

/// Read a (possibly compressed) BED file
pub fn read_bed<P: AsRef<Path>>(
    path: P,
    dict: &mut ChromDict,
    options: ReadOptions,
) -> Result<(RegionCollection, ReadStats)> {
    let (regions, stats) = read_bed_from(open_reader(path.as_ref())?, dict, options)?;
    log::info!(
        "read {} BED regions from {} ({} skipped)",
        stats.added,
        path.as_ref().display(),
        stats.skipped
    );
    Ok((regions, stats))
}

/// One `chrom \t start \t end` line; ids missing from `dict` are written as numbers
fn bed_line(region: &Region, dict: &ChromDict) -> String {
    match dict.name(region.chrom) {
        Some(name) => format!("{}\t{}\t{}\n", name, region.start, region.end),
        None => format!("{}\t{}\t{}\n", region.chrom, region.start, region.end),
    }
}

/// Write one BED line per element in current order.
///
/// Returns the number of lines written.
pub fn write_bed<T: Ranged, W: Write>(
    regions: &RegionCollection<T>,
    dict: &ChromDict,
    mut writer: W,
) -> io::Result<usize> {
    if regions.is_empty() {
        log::warn!("write_bed: collection is empty");
        return Ok(0);
    }

    for item in regions {
        writer.write_all(bed_line(item.region(), dict).as_bytes())?;
    }
    writer.flush()?;
    Ok(regions.len())
}

/// BED text of a collection
pub fn to_bed_string<T: Ranged>(regions: &RegionCollection<T>, dict: &ChromDict) -> String {
    regions.iter().map(|item| bed_line(item.region(), dict)).collect()
}
