use super::args::RawArgs;
use super::errors::CliError;
use super::options::{CliOptions, DEFAULT_HEIGHT, DEFAULT_WIDTH, ModeName, RunMode};
use crate::scene::camera::Camera;
use clap::ValueEnum;
use log::debug;
use std::path::{Path, PathBuf};

/// Turns raw flag values into a checked configuration, filling defaults.
///
/// Flags that the selected mode does not use are ignored without being
/// checked.
pub fn resolve(raw: RawArgs) -> Result<CliOptions, CliError> {
    let width = parse_dimension("--width", raw.width.as_deref(), DEFAULT_WIDTH)?;
    let height = parse_dimension("--height", raw.height.as_deref(), DEFAULT_HEIGHT)?;

    let models = raw
        .models
        .iter()
        .map(|model| parse_path("MODEL", model))
        .collect::<Result<Vec<_>, _>>()?;

    let camera = raw.camera.as_deref().map(parse_camera).transpose()?;

    let mode = match parse_mode(raw.mode.as_deref())? {
        ModeName::Default => {
            ignore_unused(&[
                ("--frames", &raw.frames),
                ("--dst", &raw.dst),
                ("--stat-dir", &raw.stat_dir),
                ("--bench-name", &raw.bench_name),
            ]);
            RunMode::Default
        }
        ModeName::Frames => {
            ignore_unused(&[
                ("--stat-dir", &raw.stat_dir),
                ("--bench-name", &raw.bench_name),
            ]);
            let frames = required("--frames", "frames", &raw.frames)?;
            let dst = required("--dst", "frames", &raw.dst)?;
            RunMode::Frames {
                frames_number: parse_positive("--frames", frames)?,
                dst_dir: parse_path("--dst", dst)?,
            }
        }
        ModeName::Bench => {
            ignore_unused(&[("--frames", &raw.frames), ("--dst", &raw.dst)]);
            let stat_dir = required("--stat-dir", "bench", &raw.stat_dir)?;
            let bench_name = match raw.bench_name.as_deref() {
                Some(name) => parse_bench_name(name)?,
                None => default_bench_name(width, height, &models),
            };
            RunMode::Bench {
                stat_dir: parse_path("--stat-dir", stat_dir)?,
                bench_name,
            }
        }
    };

    Ok(CliOptions {
        mode,
        width,
        height,
        camera,
        disable_culling: raw.disable_culling,
        enable_vsync: raw.enable_vsync,
        enable_bound_boxes: raw.bound_boxes,
        models,
    })
}

fn parse_mode(raw: Option<&str>) -> Result<ModeName, CliError> {
    match raw {
        None => Ok(ModeName::Default),
        Some(token) => {
            ModeName::from_str(token, true).map_err(|_| CliError::InvalidMode(token.to_string()))
        }
    }
}

fn required<'a>(
    flag: &'static str,
    mode: &'static str,
    value: &'a Option<String>,
) -> Result<&'a str, CliError> {
    value
        .as_deref()
        .ok_or(CliError::MissingRequired { flag, mode })
}

fn ignore_unused(fields: &[(&str, &Option<String>)]) {
    for (flag, value) in fields {
        if let Some(value) = value {
            debug!("Ignoring {flag} '{value}': not used by the selected mode");
        }
    }
}

fn parse_positive(flag: &'static str, raw: &str) -> Result<u32, CliError> {
    let value: u32 = raw.parse().map_err(|_| CliError::InvalidNumber {
        flag,
        value: raw.to_string(),
    })?;
    if value == 0 {
        return Err(CliError::NotPositive { flag });
    }
    Ok(value)
}

fn parse_dimension(flag: &'static str, raw: Option<&str>, default: u32) -> Result<u32, CliError> {
    raw.map_or(Ok(default), |raw| parse_positive(flag, raw))
}

/// Syntax check only; the filesystem is never consulted.
fn parse_path(flag: &'static str, raw: &str) -> Result<PathBuf, CliError> {
    if raw.is_empty() {
        return Err(CliError::InvalidPath {
            flag,
            reason: "path is empty",
        });
    }
    if raw.contains('\0') {
        return Err(CliError::InvalidPath {
            flag,
            reason: "path contains a NUL byte",
        });
    }
    Ok(PathBuf::from(raw))
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\' || c == '\0'
}

fn parse_bench_name(raw: &str) -> Result<String, CliError> {
    if raw.trim().is_empty() || raw.contains(is_separator) {
        return Err(CliError::InvalidBenchName(raw.to_string()));
    }
    Ok(raw.to_string())
}

/// Label used when a benchmark is started without `--bench-name`.
fn default_bench_name(width: u32, height: u32, models: &[PathBuf]) -> String {
    let scene = models
        .first()
        .and_then(|model| Path::new(model).file_stem())
        .map(|stem| stem.to_string_lossy().replace(is_separator, "_"))
        .unwrap_or_else(|| "empty".to_string());
    format!("bench-{width}x{height}-{scene}")
}

fn parse_camera(raw: &[String]) -> Result<Camera, CliError> {
    let components = raw
        .iter()
        .enumerate()
        .map(|(i, value)| {
            value.parse::<f32>().map_err(|_| {
                CliError::InvalidCamera(format!("component {} ('{}') is not a number", i + 1, value))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Camera::from_components(&components).map_err(CliError::InvalidCamera)
}
