//! Collect per-k silhouettes of a sweep into `Avg_sil.csv` and `Min_sil.csv`.
//!
//! Reads `<dir>/silhouettes/Si_at_k<k>` for every k and writes
//! `<dir>Avg_sil.csv` and `<dir>Min_sil.csv` next to the run directory.
//!
//! Usage: `collect-sil <dir> [--k-min 2] [--k-max 20]`

use clap::Parser;
use nmfk_experiments::{collect_silhouettes, write_silhouette_summary, AggregateConfig};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "collect-sil", version)]
#[command(about = "Average and minimum silhouette per k")]
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
    let summary = collect_silhouettes(&args.dir, &config)?;
    let (avg_path, min_path) = write_silhouette_summary(&args.dir, &summary)?;

    eprintln!(
        "Saved {} values to {} and {}",
        summary.avg.len(),
        avg_path.display(),
        min_path.display()
    );

    Ok(())
}
