use clap::Parser;
use log::{error, info};
use render_bench::stats::{Summary, load_metrics};
use std::path::PathBuf;
use std::process::ExitCode;

/// Summarize the GPU timings recorded by a benchmark run
#[derive(Debug, Parser)]
#[command(name = "collect-stat")]
struct Args {
    /// Statistics file written by a bench run
    #[arg(default_value = "stats.json")]
    filename: PathBuf,

    /// Subtract the culling pass from the GPU time before computing statistics
    #[arg(long)]
    without_culling_time: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();

    let records = match load_metrics(&args.filename) {
        Ok(records) => records,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match Summary::compute(&records, args.without_culling_time) {
        Some(summary) => println!("{summary}"),
        None => info!("No records to compute statistics from"),
    }

    ExitCode::SUCCESS
}
