//! VCF format adapter
//!
//! Only the CHROM and POS columns are used; each record becomes the
//! single-base region `pos..pos`.

use crate::core::io::open_reader;
use crate::core::{ChromDict, ParseError, ParseResult, Region, RegionCollection, Result};
use crate::formats::{ingest, parse_coord, resolve_chrom, ReadOptions, ReadStats, TabFields};
use std::io::BufRead;
use std::path::Path;

/// Minimum columns for a data line to count as a VCF record
const MIN_VCF_FIELDS: usize = 3;

/// Parse one VCF data line into a point region
pub(crate) fn parse_vcf_point(line: &str, line_number: usize, dict: &mut ChromDict) -> ParseResult<Region> {
    let fields = TabFields::new(line);
    if fields.len() < MIN_VCF_FIELDS {
        return Err(ParseError::TooFewFields {
            line: line_number,
            expected: MIN_VCF_FIELDS,
            found: fields.len(),
        });
    }

    let chrom_name = fields.require(0, line_number)?;
    let pos = parse_coord(fields.require(1, line_number)?, "pos", line_number)?;
    let chrom = resolve_chrom(dict, chrom_name, line_number)?;
    Region::new(chrom, pos, pos).map_err(|_| ParseError::InvalidGeometry {
        line: line_number,
        start: pos,
        end: pos,
    })
}

/// Read VCF records from any buffered reader
pub fn read_vcf_from<R: BufRead>(
    reader: R,
    dict: &mut ChromDict,
    options: ReadOptions,
) -> Result<(RegionCollection, ReadStats)> {
    ingest(reader, dict, options, |line, line_number, dict| {
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        Some(parse_vcf_point(line, line_number, dict))
    })
}

/// Read a (possibly compressed) VCF file
pub fn read_vcf<P: AsRef<Path>>(
    path: P,
    dict: &mut ChromDict,
    options: ReadOptions,
) -> Result<(RegionCollection, ReadStats)> {
    log::info!("parsing VCF file {}", path.as_ref().display());
    read_vcf_from(open_reader(path.as_ref())?, dict, options)
}
