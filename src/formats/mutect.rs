//! MuTect call-stats adapter
//!
//! Only calls judged `KEEP` are loaded, each as the point region
//! `position..position`.

use crate::core::io::open_reader;
use crate::core::{ChromDict, ParseError, ParseResult, Region, RegionCollection, Result};
use crate::formats::{ingest, parse_coord, resolve_chrom, ReadOptions, ReadStats, TabFields};
use std::io::BufRead;
use std::path::Path;

/// Columns 1 and 2 (contig, position) of a call line
fn parse_keep_call(fields: &TabFields<'_>, line_number: usize, dict: &mut ChromDict) -> ParseResult<Region> {
    let chrom_name = fields.require(0, line_number)?;
    let pos = parse_coord(fields.require(1, line_number)?, "position", line_number)?;
    let chrom = resolve_chrom(dict, chrom_name, line_number)?;
    Region::new(chrom, pos, pos).map_err(|_| ParseError::InvalidGeometry {
        line: line_number,
        start: pos,
        end: pos,
    })
}

/// Read KEEP calls from any buffered reader
pub fn read_call_stats_from<R: BufRead>(
    reader: R,
    dict: &mut ChromDict,
    options: ReadOptions,
) -> Result<(RegionCollection, ReadStats)> {
    let mut current_chrom = String::new();

    ingest(reader, dict, options, |line, line_number, dict| {
        if !line.contains("KEEP") {
            return None;
        }

        let fields = TabFields::new(line);
        if let Some(name) = fields.get(0) {
            if name != current_chrom {
                log::info!("reading MuTect call-stats: {}", name);
                current_chrom = name.to_string();
            }
        }
        let parsed = parse_keep_call(&fields, line_number, dict);
        Some(parsed)
    })
}

/// Read a (possibly compressed) MuTect call-stats file
pub fn read_call_stats<P: AsRef<Path>>(
    path: P,
    dict: &mut ChromDict,
    options: ReadOptions,
) -> Result<(RegionCollection, ReadStats)> {
    log::info!("reading MuTect call-stats from {}", path.as_ref().display());
    read_call_stats_from(open_reader(path.as_ref())?, dict, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CALL_STATS: &str = "## muTector v1.0.47986 MuTect\n\
contig\tposition\tcontext\tref_allele\talt_allele\tjudgement\n\
1\t12345\tATG\tA\tT\tKEEP\n\
1\t22222\tATG\tA\tT\tREJECT\n\
2\t500\tCCG\tC\tG\tKEEP\n";

    #[test]
    fn test_only_keep_calls_loaded() {
        let mut dict = ChromDict::new();
        let (regions, stats) =
            read_call_stats_from(CALL_STATS.as_bytes(), &mut dict, ReadOptions::default()).unwrap();
        assert_eq!(stats, ReadStats { total: 2, added: 2, skipped: 0 });
        assert_eq!((regions[0].start, regions[0].end), (12345, 12345));
        assert_eq!(dict.name(regions[1].chrom), Some("2"));
    }

    #[test]
    fn test_call_stats_padding() {
        let mut dict = ChromDict::new();
        let (regions, _) =
            read_call_stats_from(CALL_STATS.as_bytes(), &mut dict, ReadOptions::with_pad(5)).unwrap();
        assert_eq!((regions[1].start, regions[1].end), (495, 505));
    }
}
