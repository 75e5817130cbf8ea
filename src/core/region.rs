//! Genomic regions and the chromosome dictionary
//!
//! A [`Region`] is a chromosome id plus a coordinate range and a strand.
//! Chromosome names are resolved to ids through a [`ChromDict`], which plays
//! the role of an alignment header's target list.

use crate::core::error::{ParseError, RegionError, RegionResult};
use crate::core::io::{open_reader, LineIterator};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::io::{self, BufRead};
use std::path::Path;

/// Integer chromosome identifier, an index into a [`ChromDict`]
pub type ChromId = u32;

/// Strand orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub enum Strand {
    Plus,
    Minus,
    /// Unknown or not applicable (`*` / `.`)
    #[default]
    Unstranded,
}

impl Strand {
    /// Parse strand from char
    ///
    /// # Examples
    /// ```
    /// use genomic_regions::Strand;
    /// assert_eq!(Strand::from_char('+'), Some(Strand::Plus));
    /// assert_eq!(Strand::from_char('-'), Some(Strand::Minus));
    /// assert_eq!(Strand::from_char('.'), Some(Strand::Unstranded));
    /// assert_eq!(Strand::from_char('x'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Strand::Plus),
            '-' => Some(Strand::Minus),
            '*' | '.' => Some(Strand::Unstranded),
            _ => None,
        }
    }

    /// Parse strand from a text field
    pub fn from_field(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    /// Convert to char
    pub fn to_char(&self) -> char {
        match self {
            Strand::Plus => '+',
            Strand::Minus => '-',
            Strand::Unstranded => '*',
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// One genomic interval
///
/// Ordering is by `(chrom, start, end)`; strand only breaks the remaining
/// ties so that `Ord` stays consistent with `Eq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub chrom: ChromId,
    pub start: i32,
    pub end: i32,
    pub strand: Strand,
}

impl Region {
    /// Create an unstranded region, rejecting `start > end`
    pub fn new(chrom: ChromId, start: i32, end: i32) -> RegionResult<Self> {
        Self::with_strand(chrom, start, end, Strand::Unstranded)
    }

    /// Create a stranded region, rejecting `start > end`
    pub fn with_strand(chrom: ChromId, start: i32, end: i32, strand: Strand) -> RegionResult<Self> {
        if start > end {
            return Err(RegionError::InvalidGeometry { start, end });
        }
        Ok(Self {
            chrom,
            start,
            end,
            strand,
        })
    }

    /// Distance between start and end, widened so full-range regions cannot overflow
    pub fn width(&self) -> i64 {
        i64::from(self.end) - i64::from(self.start)
    }

    /// Whether `start <= end` still holds
    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    /// Expand both ends by `amount` in place. Negative amounts shrink.
    /// Coordinates are not clamped at zero.
    pub fn pad(&mut self, amount: i32) {
        self.start = self.start.saturating_sub(amount);
        self.end = self.end.saturating_add(amount);
    }

    /// Padded copy
    pub fn padded(mut self, amount: i32) -> Self {
        self.pad(amount);
        self
    }

    /// Closed-interval overlap test on the same chromosome
    pub fn overlaps(&self, other: &Region) -> bool {
        self.chrom == other.chrom && self.start <= other.end && other.start <= self.end
    }

    /// Parse a locus string like `chr1:1,000-2,000` or `chr1:100-200:-`,
    /// registering the chromosome in `dict` when it is not frozen
    pub fn parse_locus(locus: &str, dict: &mut ChromDict) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidLocus(locus.to_string());

        let (body, strand) = match locus.rsplit_once(':') {
            Some((head, tail)) if Strand::from_field(tail).is_some() => {
                (head, Strand::from_field(tail).unwrap_or_default())
            }
            _ => (locus, Strand::Unstranded),
        };

        let (chrom, range) = body.rsplit_once(':').ok_or_else(invalid)?;
        let (start, end) = range.split_once('-').ok_or_else(invalid)?;
        let start: i32 = start.replace(',', "").parse().map_err(|_| invalid())?;
        let end: i32 = end.replace(',', "").parse().map_err(|_| invalid())?;

        if chrom.is_empty() {
            return Err(invalid());
        }
        let id = dict
            .get_or_insert(chrom)
            .map_err(|_| ParseError::UnknownChromosome {
                line: 0,
                chrom: chrom.to_string(),
            })?;

        Region::with_strand(id, start, end, strand).map_err(|_| invalid())
    }
}

impl PartialOrd for Region {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Region {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.chrom, self.start, self.end, self.strand).cmp(&(
            other.chrom,
            other.start,
            other.end,
            other.strand,
        ))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}({})", self.chrom, self.start, self.end, self.strand)
    }
}

/// Anything a collection can hold: a value that carries a [`Region`]
pub trait Ranged {
    fn region(&self) -> &Region;
    fn region_mut(&mut self) -> &mut Region;
}

impl Ranged for Region {
    fn region(&self) -> &Region {
        self
    }

    fn region_mut(&mut self) -> &mut Region {
        self
    }
}

/// Ordered chromosome names and their integer ids
///
/// Lookups tolerate the usual naming variants (`chr1`, `1`, `CHR1`). A frozen
/// dictionary rejects names it has not seen.
#[derive(Debug, Clone, Default)]
pub struct ChromDict {
    names: Vec<String>,
    ids: HashMap<String, ChromId>,
    /// Normalized name -> id for flexible lookup
    aliases: HashMap<String, ChromId>,
    frozen: bool,
}

impl ChromDict {
    /// Empty, growable dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Frozen dictionary from a list of names, ids in list order
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dict = Self::new();
        for name in names {
            dict.insert(name.as_ref());
        }
        dict.freeze();
        dict
    }

    /// Frozen dictionary from a `.genome` / `.fai` style listing.
    /// The first tab-separated column is the name; blank and `#` lines are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut dict = Self::new();
        let mut lines = LineIterator::new(reader);
        while let Some(line) = lines.next_line() {
            let line = line?.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(name) = line.split('\t').next() {
                dict.insert(name.trim());
            }
        }
        dict.freeze();
        Ok(dict)
    }

    /// Load a frozen dictionary from a (possibly compressed) file
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Self::from_reader(open_reader(path.as_ref())?)
    }

    fn insert(&mut self, name: &str) -> ChromId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.names.len() as ChromId;
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        self.aliases.entry(normalize_chrom_key(name)).or_insert(id);
        id
    }

    /// Resolve a name, inserting it when the dictionary is not frozen
    pub fn get_or_insert(&mut self, name: &str) -> RegionResult<ChromId> {
        if let Some(id) = self.id(name) {
            return Ok(id);
        }
        if self.frozen {
            return Err(RegionError::UnknownChromosome(name.to_string()));
        }
        Ok(self.insert(name))
    }

    /// Look up a name, trying exact then normalized matches
    pub fn id(&self, name: &str) -> Option<ChromId> {
        self.ids
            .get(name)
            .or_else(|| self.aliases.get(&normalize_chrom_key(name)))
            .copied()
    }

    /// Name registered for an id
    pub fn name(&self, id: ChromId) -> Option<&str> {
        self.names.get(id as usize).map(|s| s.as_str())
    }

    /// Stop accepting new names
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All names in id order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|s| s.as_str())
    }

    /// Render a region with its chromosome name (`chr1:100-200(+)`)
    pub fn format_region(&self, region: &Region) -> String {
        match self.name(region.chrom) {
            Some(name) => format!("{}:{}-{}({})", name, region.start, region.end, region.strand),
            None => region.to_string(),
        }
    }
}

/// Normalize chromosome name for flexible matching
///
/// Converts to lowercase and removes the `chr` prefix.
fn normalize_chrom_key(chrom: &str) -> String {
    let lower = chrom.to_lowercase();
    match lower.strip_prefix("chr") {
        Some(rest) => rest.to_string(),
        None => lower,
    }
}
