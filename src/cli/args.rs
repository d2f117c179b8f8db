use super::errors::CliError;
use crate::scene::camera::CAMERA_COMPONENTS;
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{ArgAction, CommandFactory, Parser};
use log::debug;
use std::ffi::{OsStr, OsString};

/// Flag grammar of the renderer. Values are kept as raw text here and
/// interpreted by the validator.
///
/// Repeating a flag replaces its earlier value.
#[derive(Parser, Debug, Default, Clone, PartialEq)]
#[command(
    name = "render-bench",
    about = "Render models interactively, to image frames, or as a benchmark",
    long_about = None,
    args_override_self = true
)]
pub struct RawArgs {
    /// Run mode: default, frames or bench
    #[arg(long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Number of frames to render (frames mode)
    #[arg(long, value_name = "N")]
    pub frames: Option<String>,

    /// Directory the rendered frames are written to (frames mode)
    #[arg(long, value_name = "DIR")]
    pub dst: Option<String>,

    /// Output width in pixels [default: 800]
    #[arg(long, value_name = "N")]
    pub width: Option<String>,

    /// Output height in pixels [default: 600]
    #[arg(long, value_name = "N")]
    pub height: Option<String>,

    /// Initial camera: position, target, up, vertical fov (degrees), near, far
    #[arg(
        long,
        num_args = CAMERA_COMPONENTS,
        action = ArgAction::Set,
        allow_negative_numbers = true,
        value_names = ["PX", "PY", "PZ", "TX", "TY", "TZ", "UX", "UY", "UZ", "FOV", "NEAR", "FAR"]
    )]
    pub camera: Option<Vec<String>>,

    /// Disable culling
    #[arg(long)]
    pub disable_culling: bool,

    /// Enable vertical sync
    #[arg(long)]
    pub enable_vsync: bool,

    /// Directory benchmark statistics are written to (bench mode)
    #[arg(long, value_name = "DIR")]
    pub stat_dir: Option<String>,

    /// Label of the benchmark run (bench mode)
    #[arg(long, value_name = "NAME")]
    pub bench_name: Option<String>,

    /// Draw model bounding boxes
    #[arg(long)]
    pub bound_boxes: bool,

    /// Model files to load, in load order
    #[arg(value_name = "MODEL")]
    pub models: Vec<String>,
}

/// Result of walking the argument list.
#[derive(Debug, Clone, PartialEq)]
pub enum Tokens {
    Help,
    Args(RawArgs),
}

/// Classifies the argument list. The first element is the program name.
///
/// A help flag anywhere before a bare `--` wins over every other token,
/// malformed ones included.
pub fn tokenize(args: &[OsString]) -> Result<Tokens, CliError> {
    if wants_help(args) {
        debug!("Help flag found, skipping argument parsing");
        return Ok(Tokens::Help);
    }

    match RawArgs::try_parse_from(args.iter().cloned()) {
        Ok(raw) => Ok(Tokens::Args(raw)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp => Ok(Tokens::Help),
            ErrorKind::UnknownArgument => Err(CliError::UnknownFlag(offending_arg(&err))),
            ErrorKind::InvalidValue
            | ErrorKind::WrongNumberOfValues
            | ErrorKind::TooFewValues
            | ErrorKind::NoEquals => Err(CliError::MissingValue(offending_arg(&err))),
            _ => Err(CliError::Tokenize(first_line(&err))),
        },
    }
}

/// Usage text shown for `--help`.
pub fn usage() -> String {
    RawArgs::command().render_help().to_string()
}

fn wants_help(args: &[OsString]) -> bool {
    args.iter()
        .skip(1)
        .map(OsString::as_os_str)
        .take_while(|arg| *arg != OsStr::new("--"))
        .any(|arg| arg == OsStr::new("--help") || arg == OsStr::new("-h"))
}

fn offending_arg(err: &clap::Error) -> String {
    match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(arg)) => arg.clone(),
        _ => first_line(err),
    }
}

fn first_line(err: &clap::Error) -> String {
    let text = err.to_string();
    text.lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .to_string()
}
