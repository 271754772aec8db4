//! Split an input matrix into per-worker blocks for a distributed NMFk run.
//!
//! Reads the matrix stored under `X` in a `.mat` file and writes a `pr x pc`
//! grid of tab-delimited blocks to `<output_dir>/<pr*pc>cores/A_0 .. A_{p-1}`.
//!
//! Usage: `split-data <data_file.mat> <pr> <pc> <output_dir>`

use clap::Parser;
use nmfk_experiments::{split_mat_file, ExperimentError, SplitConfig};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "split-data", version)]
#[command(about = "Split a .mat matrix into a grid of per-worker blocks")]
struct Args {
    /// Input matrix (.mat)
    data_file: PathBuf,

    /// Number of row partitions
    pr: usize,

    /// Number of column partitions
    pc: usize,

    /// Directory receiving the `<p>cores/` block directory
    output_dir: PathBuf,

    /// Variable holding the matrix inside the .mat file
    #[arg(long, default_value = "X")]
    variable: String,

    /// Log per-block detail
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let config = SplitConfig::default().with_variable(args.variable);

    match split_mat_file(&args.data_file, args.pr, args.pc, &args.output_dir, &config) {
        Ok(report) => {
            eprintln!(
                "Wrote {} blocks of {}x{} to {}",
                report.block_paths.len(),
                report.block_shape.0,
                report.block_shape.1,
                report.partition_dir.display()
            );
            Ok(())
        }
        Err(ExperimentError::InvalidFormat(_)) => {
            println!("Wrong input format, can only deal with '*.mat' files for now.");
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
