//! Collect per-k relative errors of a sweep into `Relerr_Avg.csv`.
//!
//! Usage: `collect-rel <dir> [--k-min 2] [--k-max 20]`

use clap::Parser;
use nmfk_experiments::{collect_relative_errors, write_relative_error_summary, AggregateConfig};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "collect-rel", version)]
#[command(about = "Mean relative error per k")]
struct Args {
    /// Run directory containing `silhouettes/`
    dir: String,

    /// First k of the sweep
    #[arg(long, default_value_t = 2)]
    k_min: usize,

    /// Last k of the sweep (inclusive)
    #[arg(long, default_value_t = 20)]
    k_max: usize,

    /// Log every file read
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let config = AggregateConfig::new(args.k_min..=args.k_max);
    let series = collect_relative_errors(&args.dir, &config)?;
    let path = write_relative_error_summary(&args.dir, &series)?;

    eprintln!("Saved {} values to {}", series.len(), path.display());

    Ok(())
}
