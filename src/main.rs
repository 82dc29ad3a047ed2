//! Claims Triangle CLI
//!
//! Reads incremental claims from CSV and writes the cumulative triangle

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use claims_triangle::{
    claims::load_claims,
    cumulative::{DEFAULT_MAX_DEVELOPMENT_LAG, DEFAULT_MIN_PARALLEL_PARTITIONS},
    triangle::{write_triangle, write_triangle_to_writer},
    CumulativeEngine, CumulativeResult, EngineConfig, Triangle,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "claims_triangle", version, about = "Build cumulative claims triangles from incremental data")]
struct Args {
    /// Incremental claims CSV (product, origin year, development year, value)
    input: PathBuf,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Accumulate lineages in parallel
    #[arg(long)]
    parallel: bool,

    /// Lineage count below which accumulation stays sequential
    #[arg(long, default_value_t = DEFAULT_MIN_PARALLEL_PARTITIONS)]
    min_parallel_partitions: usize,

    /// Reject claims developed more than this many years after their origin
    #[arg(long, default_value_t = DEFAULT_MAX_DEVELOPMENT_LAG)]
    max_development_lag: i64,

    /// Print every cumulative cell to stderr, filled cells marked
    #[arg(long)]
    show_cells: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let claims = load_claims(&args.input)
        .with_context(|| format!("Failed to load claims from {}", args.input.display()))?;
    log::info!("Loaded {} claims in {:?}", claims.len(), start.elapsed());

    let config = EngineConfig {
        parallel: args.parallel,
        min_parallel_partitions: args.min_parallel_partitions,
        max_development_lag: args.max_development_lag,
    };
    let engine = CumulativeEngine::new(config);
    log::debug!("Engine config: {:?}", engine.config());
    let result = engine
        .run(Some(&claims))
        .context("Failed to build cumulative triangle")?;

    log::info!(
        "Triangle: {}..={} ({} development years), {} products, {} cells ({} filled)",
        result.triangle.header.min_origin_year,
        result.triangle.header.max_development_year(),
        result.triangle.header.development_years,
        result.triangle.series.len(),
        result.cumulative_claims.len(),
        result.filled_cells()
    );

    if args.show_cells {
        print_cells(&result);
    }

    match &args.output {
        Some(path) => {
            write_output(path, &result.triangle, args.format)
                .with_context(|| format!("Failed to write triangle to {}", path.display()))?;
            log::info!("Output written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            write_stdout(stdout.lock(), &result.triangle, args.format)?;
        }
    }

    log::info!("Total time: {:?}", start.elapsed());
    Ok(())
}

fn write_output(path: &Path, triangle: &Triangle, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => write_triangle(path, triangle)?,
        OutputFormat::Json => {
            let file = std::fs::File::create(path)?;
            serde_json::to_writer_pretty(file, triangle)?;
        }
    }
    Ok(())
}

fn write_stdout<W: Write>(mut out: W, triangle: &Triangle, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => write_triangle_to_writer(out, triangle)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, triangle)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn print_cells(result: &CumulativeResult) {
    eprintln!("{:<10} {:>6} {:>6} {:>14}", "Product", "Origin", "Dev", "Cumulative");
    eprintln!("{}", "-".repeat(40));
    for cell in &result.cumulative_claims {
        eprintln!(
            "{:<10} {:>6} {:>6} {:>14.2}{}",
            cell.product_type.display_name(),
            cell.origin_year,
            cell.development_year,
            cell.value,
            if cell.is_filled() { " *" } else { "" }
        );
    }
}
