//! Plot silhouette widths and relative error against k.
//!
//! Reads `<prefix>Min_sil.csv`, `<prefix>Avg_sil.csv` and
//! `<prefix>Relerr_Avg.csv` and saves the chart as `<prefix><figure_name>`.
//!
//! Usage: `plot-results <prefix> <figure_name>`

use clap::Parser;
use nmfk_experiments::{figure_path, render_summary, PlotConfig, SummaryTable};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "plot-results", version)]
#[command(about = "Dual-axis chart of silhouettes and relative error per k")]
struct Args {
    /// Path prefix of the summary CSV files
    prefix: String,

    /// Figure file name, appended to the prefix; also used in the title
    figure_name: String,

    /// k of the first summary entry
    #[arg(long, default_value_t = 2)]
    k_min: usize,

    /// Image width in pixels
    #[arg(long, default_value_t = 1600)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 1000)]
    height: u32,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    eprintln!("Name {}", args.prefix);

    let table = SummaryTable::load(&args.prefix)?;
    let config = PlotConfig::default()
        .with_size(args.width, args.height)
        .with_k_start(args.k_min);

    let out = figure_path(&args.prefix, &args.figure_name);
    render_summary(&table, &out, &args.figure_name, &config)?;

    eprintln!("Saved figure to {}", out.display());

    Ok(())
}
