use super::errors::StatsError;
use log::{debug, info, warn};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Timings the renderer records for a single benchmark frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    #[serde(deserialize_with = "count")]
    pub frame_number: u64,
    pub cpu_fps: f64,
    pub cpu_time_ms: f64,
    pub gpu_fps: f64,
    pub gpu_time_ms: f64,
    pub cpu_rendering_time_ms: f64,

    // --- GPU passes ---
    pub culling_gpu_time_ms: f64,
    pub build_depth_pyramid_gpu_time_ms: f64,
    pub late_culling_gpu_time_ms: f64,
    pub gpu_rendering_time_ms: f64,
    pub gpu_models_time_ms: f64,
    pub gpu_shading_time_ms: f64,

    // --- Throughput ---
    pub triangles_per_second: f64,
    pub triangles_per_second_millions: f64,
    #[serde(deserialize_with = "count")]
    pub triangles_number: u64,
    #[serde(deserialize_with = "count")]
    pub vertexes_number: u64,
}

/// Reads a statistics file written by a benchmark run.
pub fn load_metrics<P: AsRef<Path>>(path: P) -> Result<Vec<PerformanceMetrics>, StatsError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| StatsError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse_metrics(&content);
    info!(
        "Loaded {} record(s) from '{}'",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Parses a stream of concatenated JSON objects.
///
/// Each top-level object is decoded on its own, so a malformed or
/// incomplete one is skipped and the objects after it are still read.
/// Text between objects is ignored. An unfinished object at the end of the
/// stream (the run was stopped mid-write) is dropped silently.
pub fn parse_metrics(content: &str) -> Vec<PerformanceMetrics> {
    let (objects, unfinished) = split_objects(content);
    if unfinished {
        debug!("Ignoring unfinished record at end of stream");
    }

    objects
        .into_iter()
        .enumerate()
        .filter_map(|(index, object)| {
            serde_json::from_str::<PerformanceMetrics>(object)
                .map_err(|e| warn!("Skipping record #{}: {}", index + 1, e))
                .ok()
        })
        .collect()
}

/// Slices `content` into its top-level `{...}` spans by brace depth, skipping
/// braces inside strings. The flag is set when the last object never closes.
fn split_objects(content: &str) -> (Vec<&str>, bool) {
    let mut objects = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (pos, c) in content.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => {
                if depth == 0 {
                    start = pos;
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    objects.push(&content[start..=pos]);
                }
            }
            _ => {}
        }
    }

    (objects, depth > 0)
}

/// Counts are written as plain integers by some renderers and as floats
/// (`1e6`, `42.0`) by others.
fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(value) = number.as_u64() {
        return Ok(value);
    }
    match number.as_f64() {
        Some(value) if value.is_finite() && value >= 0.0 => Ok(value as u64),
        _ => Err(de::Error::custom(format!(
            "expected a non-negative count, got {number}"
        ))),
    }
}
