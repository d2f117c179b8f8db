use super::args::{self, Tokens};
use super::errors::CliError;
use super::validate;
use crate::scene::camera::Camera;
use clap::ValueEnum;
use log::debug;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

/// Mode token accepted by `--mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeName {
    Default,
    Frames,
    Bench,
}

/// Top-level operating mode, carrying the fields only that mode uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Interactive, continuous rendering.
    Default,
    /// Render a fixed number of frames to disk.
    Frames { frames_number: u32, dst_dir: PathBuf },
    /// Performance benchmark run.
    Bench { stat_dir: PathBuf, bench_name: String },
}

impl RunMode {
    pub fn name(&self) -> &'static str {
        match self {
            RunMode::Default => "default",
            RunMode::Frames { .. } => "frames",
            RunMode::Bench { .. } => "bench",
        }
    }
}

/// Validated run configuration, built once per invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    pub mode: RunMode,
    pub width: u32,
    pub height: u32,
    /// `None` keeps the engine's default camera.
    pub camera: Option<Camera>,
    pub disable_culling: bool,
    pub enable_vsync: bool,
    pub enable_bound_boxes: bool,
    /// Model files in load order.
    pub models: Vec<PathBuf>,
}

/// What a successful parse asks the caller to do.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// Start the renderer with this configuration.
    Run(CliOptions),
    /// Print the carried usage text and exit successfully.
    Help(String),
}

impl CliOptions {
    /// Parses a full argument vector, program name first.
    ///
    /// No partial configuration is ever returned: any rejected token or
    /// value fails the whole parse.
    pub fn parse<I, T>(args: I) -> Result<ParseOutcome, CliError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

        match args::tokenize(&args)? {
            Tokens::Help => Ok(ParseOutcome::Help(args::usage())),
            Tokens::Args(raw) => {
                let options = validate::resolve(raw)?;
                debug!(
                    "Parsed {} mode configuration with {} model(s)",
                    options.mode.name(),
                    options.models.len()
                );
                Ok(ParseOutcome::Run(options))
            }
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn frames_number(&self) -> Option<u32> {
        match &self.mode {
            RunMode::Frames { frames_number, .. } => Some(*frames_number),
            _ => None,
        }
    }

    pub fn dst_dir(&self) -> Option<&Path> {
        match &self.mode {
            RunMode::Frames { dst_dir, .. } => Some(dst_dir),
            _ => None,
        }
    }

    pub fn stat_dir(&self) -> Option<&Path> {
        match &self.mode {
            RunMode::Bench { stat_dir, .. } => Some(stat_dir),
            _ => None,
        }
    }

    pub fn bench_name(&self) -> Option<&str> {
        match &self.mode {
            RunMode::Bench { bench_name, .. } => Some(bench_name),
            _ => None,
        }
    }

    /// File a benchmark run writes its per-frame statistics to.
    pub fn stat_file(&self) -> Option<PathBuf> {
        match &self.mode {
            RunMode::Bench {
                stat_dir,
                bench_name,
            } => Some(stat_dir.join(format!("{bench_name}.json"))),
            _ => None,
        }
    }
}
