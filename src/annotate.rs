//! Breakpoint annotation against known variant sites
//!
//! Loads indel-like VCF records as sites and reports which of them lie near
//! a breakpoint.

use crate::core::io::open_reader;
use crate::core::{
    ChromDict, ParseError, ParseResult, Ranged, Region, RegionCollection, RegionResult, Result,
};
use crate::formats::{ingest, parse_coord, resolve_chrom, ReadOptions, ReadStats, TabFields};
use std::io::BufRead;
use std::path::Path;

/// Padding applied around a breakpoint before the site lookup
pub const BREAKPOINT_PAD: i32 = 2;

/// A known variant site from a VCF record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSite {
    pub region: Region,
    pub id: String,
    pub reference: String,
    pub alternate: String,
}

impl Ranged for VariantSite {
    fn region(&self) -> &Region {
        &self.region
    }

    fn region_mut(&mut self) -> &mut Region {
        &mut self.region
    }
}

impl VariantSite {
    /// Site from its VCF columns; a multi-base reference extends the span
    pub fn new(chrom: u32, pos: i32, id: &str, reference: &str, alternate: &str) -> RegionResult<Self> {
        let extra = if reference.len() == 1 { 1 } else { reference.len() as i32 + 1 };
        Ok(Self {
            region: Region::new(chrom, pos, pos.saturating_add(extra))?,
            id: id.to_string(),
            reference: reference.to_string(),
            alternate: alternate.to_string(),
        })
    }

    /// True for single-nucleotide substitutions
    pub fn is_snv(&self) -> bool {
        self.reference.len() + self.alternate.len() <= 2
    }

    fn parse(line: &str, line_number: usize, dict: &mut ChromDict) -> ParseResult<Self> {
        let fields = TabFields::new(line);
        let chrom_name = fields.require(0, line_number)?;
        let pos = parse_coord(fields.require(1, line_number)?, "pos", line_number)?;
        let id = fields.require(2, line_number)?;
        let reference = fields.require(3, line_number)?;
        let alternate = fields.require(4, line_number)?;

        let chrom = resolve_chrom(dict, chrom_name, line_number)?;
        Self::new(chrom, pos, id, reference, alternate).map_err(|_| ParseError::InvalidGeometry {
            line: line_number,
            start: pos,
            end: pos,
        })
    }
}

/// Indexed non-SNV sites
#[derive(Debug, Clone, Default)]
pub struct VariantSiteIndex {
    sites: RegionCollection<VariantSite>,
}

impl VariantSiteIndex {
    /// Load sites from VCF text; SNVs are dropped
    pub fn from_reader<R: BufRead>(reader: R, dict: &mut ChromDict) -> Result<(Self, ReadStats)> {
        let (mut sites, stats) = ingest(reader, dict, ReadOptions::default(), |line, line_number, dict| {
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            match VariantSite::parse(line, line_number, dict) {
                Ok(site) if site.is_snv() => None,
                parsed => Some(parsed),
            }
        })?;
        sites.build_index();
        Ok((Self { sites }, stats))
    }

    /// Load sites from a (possibly compressed) VCF file
    pub fn from_vcf<P: AsRef<Path>>(path: P, dict: &mut ChromDict) -> Result<(Self, ReadStats)> {
        let loaded = Self::from_reader(open_reader(path.as_ref())?, dict)?;
        log::info!(
            "loaded {} variant sites from {}",
            loaded.0.len(),
            path.as_ref().display()
        );
        Ok(loaded)
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn sites(&self) -> &RegionCollection<VariantSite> {
        &self.sites
    }

    /// Identifiers of the sites within [`BREAKPOINT_PAD`] of `breakpoint`,
    /// joined with `_` in hit order without repeats; `None` when nothing hits.
    pub fn query_breakpoint(&self, breakpoint: &Region) -> RegionResult<Option<String>> {
        let query = RegionCollection::from_region(breakpoint.padded(BREAKPOINT_PAD));
        let hits = query.find_overlaps(&self.sites, true)?;
        if hits.is_empty() {
            return Ok(None);
        }

        let mut ids: Vec<&str> = Vec::new();
        for si in &hits.subject_ids {
            let id = self.sites[*si].id.as_str();
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Ok(Some(ids.join("_")))
    }
}
