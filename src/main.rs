//! genomic-regions CLI entry point
//!
//! Merge, intersect, complement, count, pad, tile and annotate genomic
//! region files.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use genomic_regions::core::io::create_writer;
use genomic_regions::formats::{self, ReadOptions, ReadStats, RegionFileFormat};
use genomic_regions::{ChromDict, Region, RegionCollection, VariantSiteIndex};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Input format selection (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum FormatArg {
    /// Pick the reader from the file name and header
    #[default]
    #[value(name = "auto")]
    Auto,
    /// BED3+ (strand in column 6)
    #[value(name = "bed")]
    Bed,
    /// VCF (one base per record)
    #[value(name = "vcf")]
    Vcf,
    /// MuTect call-stats (KEEP calls only)
    #[value(name = "mutect")]
    MuTect,
}

#[derive(Parser)]
#[command(name = "genomic-regions")]
#[command(about = "Genomic interval collections with fast overlap queries")]
#[command(version)]
struct Cli {
    /// Chromosome listing (.genome / .fai); unknown chromosomes are rejected when given
    #[arg(long, global = true)]
    genome: Option<PathBuf>,

    /// Padding added to both sides of every record while reading
    #[arg(long, global = true, default_value = "0")]
    pad: i32,

    /// Input format
    #[arg(long, global = true, default_value = "auto")]
    format: FormatArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge overlapping regions
    Merge {
        /// Input region file
        input: PathBuf,
        /// Output BED file (stdout if not specified)
        output: Option<PathBuf>,
    },
    /// Clipped overlaps of query regions against subject regions
    Intersect {
        /// Query region file
        query: PathBuf,
        /// Subject region file
        subject: PathBuf,
        /// Output BED file (stdout if not specified)
        output: Option<PathBuf>,
        /// Match regions regardless of strand
        #[arg(long)]
        ignore_strand: bool,
    },
    /// Parts of the input not covered by the subject
    Complement {
        /// Input region file
        input: PathBuf,
        /// Subject region file
        subject: PathBuf,
        /// Output BED file (stdout if not specified)
        output: Option<PathBuf>,
        /// Pool strands before subtracting
        #[arg(long)]
        ignore_strand: bool,
    },
    /// Number of subject regions overlapping each query region
    Count {
        /// Query region file
        query: PathBuf,
        /// Subject region file
        subject: PathBuf,
        /// Output file, BED plus a count column (stdout if not specified)
        output: Option<PathBuf>,
    },
    /// Widen (or narrow, when negative) every region
    Pad {
        /// Input region file
        input: PathBuf,
        /// Bases added to each side
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        amount: i32,
        /// Output BED file (stdout if not specified)
        output: Option<PathBuf>,
    },
    /// Split a locus into fixed-width windows
    Tile {
        /// Locus such as chr1:1,000-2,000
        locus: String,
        /// Window width
        #[arg(short = 'w', long)]
        width: i32,
        /// Overlap between consecutive windows
        #[arg(short = 'o', long, default_value = "0")]
        overlap: i32,
        /// Output BED file (stdout if not specified)
        output: Option<PathBuf>,
    },
    /// Label breakpoints with nearby indel sites from a VCF
    Annotate {
        /// Breakpoint region file
        breakpoints: PathBuf,
        /// VCF of known variant sites
        sites: PathBuf,
        /// Output file, BED plus a site column (stdout if not specified)
        output: Option<PathBuf>,
    },
}

fn load_dict(genome: Option<&Path>) -> anyhow::Result<ChromDict> {
    match genome {
        Some(path) => {
            let dict = ChromDict::from_file(path)
                .with_context(|| format!("Failed to load genome file: {}", path.display()))?;
            eprintln!("Loaded {} chromosomes from {:?}", dict.len(), path);
            Ok(dict)
        }
        None => Ok(ChromDict::new()),
    }
}

fn load_regions(
    path: &Path,
    format: FormatArg,
    dict: &mut ChromDict,
    options: ReadOptions,
) -> anyhow::Result<(RegionCollection, ReadStats)> {
    let format = match format {
        FormatArg::Auto => None,
        FormatArg::Bed => Some(RegionFileFormat::Bed),
        FormatArg::Vcf => Some(RegionFileFormat::Vcf),
        FormatArg::MuTect => Some(RegionFileFormat::MuTect),
    };
    let loaded = match format {
        None => formats::read_region_file(path, dict, options),
        Some(RegionFileFormat::Bed) => formats::read_bed(path, dict, options),
        Some(RegionFileFormat::Vcf) => formats::read_vcf(path, dict, options),
        Some(RegionFileFormat::MuTect) => formats::read_call_stats(path, dict, options),
    }
    .with_context(|| format!("Failed to read regions: {}", path.display()))?;

    eprintln!(
        "Read {:?}: {} records, {} added, {} skipped",
        path, loaded.1.total, loaded.1.added, loaded.1.skipped
    );
    Ok(loaded)
}

fn write_regions(regions: &RegionCollection, dict: &ChromDict, output: Option<&Path>) -> anyhow::Result<usize> {
    let writer = create_writer(output).context("Failed to open output")?;
    formats::write_bed(regions, dict, writer).context("Failed to write BED output")
}

fn print_stats(input: usize, output: usize, start: Instant) {
    eprintln!("\n=== Run Statistics ===");
    eprintln!("Input regions:   {}", input);
    eprintln!("Output regions:  {}", output);
    eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    let mut dict = load_dict(cli.genome.as_deref())?;
    let options = ReadOptions::with_pad(cli.pad);

    match cli.command {
        Commands::Merge { input, output } => {
            let (mut regions, stats) = load_regions(&input, cli.format, &mut dict, options)?;
            regions.merge_overlapping_intervals();
            let written = write_regions(&regions, &dict, output.as_deref())?;
            print_stats(stats.added, written, start);
        }

        Commands::Intersect { query, subject, output, ignore_strand } => {
            let (queries, stats) = load_regions(&query, cli.format, &mut dict, options)?;
            let (mut subjects, _) = load_regions(&subject, cli.format, &mut dict, options)?;
            subjects.build_index();

            let hits = queries.find_overlaps(&subjects, ignore_strand)?;
            let written = write_regions(&hits.regions, &dict, output.as_deref())?;
            print_stats(stats.added, written, start);
        }

        Commands::Complement { input, subject, output, ignore_strand } => {
            let (regions, stats) = load_regions(&input, cli.format, &mut dict, options)?;
            let (subjects, _) = load_regions(&subject, cli.format, &mut dict, options)?;

            let remainder = regions
                .complement_with(&subjects, ignore_strand, genomic_regions::core::default_backend())
                .context("Complement failed")?;
            let written = write_regions(&remainder, &dict, output.as_deref())?;
            print_stats(stats.added, written, start);
        }

        Commands::Count { query, subject, output } => {
            let (queries, stats) = load_regions(&query, cli.format, &mut dict, options)?;
            let (mut subjects, _) = load_regions(&subject, cli.format, &mut dict, options)?;
            subjects.build_index();

            let mut writer = create_writer(output.as_deref()).context("Failed to open output")?;
            for q in &queries {
                let count = subjects.find_overlapping(q)?;
                let name = dict.name(q.chrom).map(str::to_string).unwrap_or_else(|| q.chrom.to_string());
                writeln!(writer, "{}\t{}\t{}\t{}", name, q.start, q.end, count)?;
            }
            writer.flush()?;
            print_stats(stats.added, queries.len(), start);
        }

        Commands::Pad { input, amount, output } => {
            let (mut regions, stats) = load_regions(&input, cli.format, &mut dict, options)?;
            regions.pad(amount);
            let written = write_regions(&regions, &dict, output.as_deref())?;
            print_stats(stats.added, written, start);
        }

        Commands::Tile { locus, width, overlap, output } => {
            let region = Region::parse_locus(&locus, &mut dict)
                .with_context(|| format!("Invalid locus: {}", locus))?;
            let tiles = RegionCollection::tile(width, overlap, &region)?;
            let written = write_regions(&tiles, &dict, output.as_deref())?;
            print_stats(1, written, start);
        }

        Commands::Annotate { breakpoints, sites, output } => {
            let (points, stats) = load_regions(&breakpoints, cli.format, &mut dict, options)?;
            let (index, site_stats) = VariantSiteIndex::from_vcf(&sites, &mut dict)
                .with_context(|| format!("Failed to load variant sites: {}", sites.display()))?;
            eprintln!("Indexed {} variant sites ({} skipped)", index.len(), site_stats.skipped);

            let mut writer = create_writer(output.as_deref()).context("Failed to open output")?;
            let mut annotated = 0;
            for bp in &points {
                let label = index.query_breakpoint(bp)?;
                if label.is_some() {
                    annotated += 1;
                }
                writeln!(
                    writer,
                    "{}\t{}\t{}\t{}",
                    dict.name(bp.chrom).map(str::to_string).unwrap_or_else(|| bp.chrom.to_string()),
                    bp.start,
                    bp.end,
                    label.as_deref().unwrap_or(".")
                )?;
            }
            writer.flush()?;

            print_stats(stats.added, points.len(), start);
            eprintln!("Annotated:       {}", annotated);
        }
    }

    Ok(())
}
