use log::{debug, error, info};
use render_bench::cli::{CliOptions, ParseOutcome, RunMode};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_level(true)
        .init();

    let options = match CliOptions::parse(std::env::args_os()) {
        Ok(ParseOutcome::Run(options)) => options,
        Ok(ParseOutcome::Help(usage)) => {
            println!("{usage}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            error!("{e}");
            error!("Run with --help for usage.");
            return ExitCode::FAILURE;
        }
    };

    options.print();

    match &options.mode {
        RunMode::Default => info!(
            "Interactive rendering at {}x{} (vsync {})",
            options.width,
            options.height,
            if options.enable_vsync { "on" } else { "off" }
        ),
        RunMode::Frames {
            frames_number,
            dst_dir,
        } => info!(
            "Rendering {} frame(s) into '{}'",
            frames_number,
            dst_dir.display()
        ),
        RunMode::Bench { bench_name, .. } => {
            if let Some(stat_file) = options.stat_file() {
                info!(
                    "Benchmark '{}' writes statistics to '{}'",
                    bench_name,
                    stat_file.display()
                );
            }
        }
    }

    if let Some(camera) = &options.camera {
        debug!(
            "Initial view-projection matrix:{}",
            camera.projection_matrix(options.aspect_ratio()) * camera.view_matrix()
        );
    }

    ExitCode::SUCCESS
}
