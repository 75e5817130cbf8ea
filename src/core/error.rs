//! Error types for genomic-regions
//!
//! Defines all error types used throughout the library.

use thiserror::Error;

/// Main error type for genomic-regions operations
#[derive(Debug, Error)]
pub enum GenomicRegionsError {
    /// Collection and index errors
    #[error("Region error: {0}")]
    Region(#[from] RegionError),

    /// Record parsing errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by regions, collections and their indexes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionError {
    /// Positional access beyond the backing sequence
    #[error("Index {index} out of bounds for collection of {len} regions")]
    OutOfBounds { index: usize, len: usize },

    /// Query issued on a populated collection that was never indexed
    #[error("Collection of {len} regions has no index; call build_index() first")]
    NotIndexed { len: usize },

    /// Query issued after a mutation invalidated the index
    #[error("Index is stale: built at generation {built}, collection is at generation {current}")]
    StaleIndex { built: u64, current: u64 },

    /// Region with start after end
    #[error("Invalid region geometry: start ({start}) > end ({end})")]
    InvalidGeometry { start: i32, end: i32 },

    /// Tiling parameters that cannot make progress
    #[error("Invalid tiling: width ({width}) must exceed overlap ({overlap}) and overlap must be non-negative")]
    InvalidTiling { width: i32, overlap: i32 },

    /// Negative padding at ingestion time
    #[error("Ingestion padding must be non-negative, got {0}")]
    InvalidPadding(i32),

    /// Chromosome name missing from a frozen dictionary
    #[error("Unknown chromosome: {0}")]
    UnknownChromosome(String),

    /// Capability not compiled into this build
    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),
}

/// Errors that can occur while parsing a single text record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Not enough tab-separated columns
    #[error("Too few fields at line {line}: expected at least {expected}, found {found}")]
    TooFewFields {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Coordinate or numeric column failed to parse
    #[error("Invalid {field} value '{value}' at line {line}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// Parsed coordinates violate start <= end
    #[error("Invalid coordinates at line {line}: start ({start}) > end ({end})")]
    InvalidGeometry { line: usize, start: i32, end: i32 },

    /// Chromosome rejected by a frozen dictionary
    #[error("Unknown chromosome '{chrom}' at line {line}")]
    UnknownChromosome { line: usize, chrom: String },

    /// Malformed locus string such as `chr1:100-200`
    #[error("Invalid locus '{0}': expected chrom:start-end")]
    InvalidLocus(String),

    /// Non UTF-8 bytes in a text field
    #[error("Invalid UTF-8 in field {field} at line {line}")]
    InvalidUtf8 { line: usize, field: &'static str },
}

/// Result type alias for genomic-regions operations
pub type Result<T> = std::result::Result<T, GenomicRegionsError>;

/// Result type alias for collection and index operations
pub type RegionResult<T> = std::result::Result<T, RegionError>;

/// Result type alias for record parsing
pub type ParseResult<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_error_converts() {
        let err: GenomicRegionsError = RegionError::NotIndexed { len: 3 }.into();
        assert!(matches!(err, GenomicRegionsError::Region(RegionError::NotIndexed { len: 3 })));
        assert!(err.to_string().contains("build_index"));
    }

    #[test]
    fn test_stale_index_message() {
        let err = RegionError::StaleIndex { built: 1, current: 3 };
        assert_eq!(
            err.to_string(),
            "Index is stale: built at generation 1, collection is at generation 3"
        );
    }
}
