use super::options::{CliOptions, RunMode};
use crate::scene::camera::Camera;
use log::info;
use std::fmt;
use std::path::Path;

const UNSET: &str = "unset";

impl CliOptions {
    /// One `name: value` line per field, in a fixed order. Fields the active
    /// mode does not use are shown as unset.
    pub fn report_lines(&self) -> Vec<String> {
        let (frames_number, dst_dir, stat_dir, bench_name) = match &self.mode {
            RunMode::Default => (
                UNSET.to_string(),
                UNSET.to_string(),
                UNSET.to_string(),
                UNSET.to_string(),
            ),
            RunMode::Frames {
                frames_number,
                dst_dir,
            } => (
                frames_number.to_string(),
                display_path(dst_dir),
                UNSET.to_string(),
                UNSET.to_string(),
            ),
            RunMode::Bench {
                stat_dir,
                bench_name,
            } => (
                UNSET.to_string(),
                UNSET.to_string(),
                display_path(stat_dir),
                bench_name.clone(),
            ),
        };

        let camera = self
            .camera
            .as_ref()
            .map_or_else(|| "engine default".to_string(), describe_camera);

        let models = if self.models.is_empty() {
            "none".to_string()
        } else {
            self.models
                .iter()
                .map(|model| display_path(model))
                .collect::<Vec<_>>()
                .join(", ")
        };

        vec![
            format!("mode: {}", self.mode.name()),
            format!("frames_number: {frames_number}"),
            format!("dst_dir: {dst_dir}"),
            format!("width: {}", self.width),
            format!("height: {}", self.height),
            format!("camera: {camera}"),
            format!("disable_culling: {}", self.disable_culling),
            format!("enable_vsync: {}", self.enable_vsync),
            format!("stat_dir: {stat_dir}"),
            format!("models ({}): {models}", self.models.len()),
            format!("bench_name: {bench_name}"),
            format!("enable_bound_boxes: {}", self.enable_bound_boxes),
        ]
    }

    /// Logs the configuration at info level.
    pub fn print(&self) {
        info!("--- Run configuration ---");
        for line in self.report_lines() {
            info!("{line}");
        }
    }

    /// Command line that parses back to this exact configuration.
    /// The first element is the program name.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "render-bench".to_string(),
            "--mode".to_string(),
            self.mode.name().to_string(),
        ];

        match &self.mode {
            RunMode::Default => {}
            RunMode::Frames {
                frames_number,
                dst_dir,
            } => {
                args.push(format!("--frames={frames_number}"));
                args.push(format!("--dst={}", display_path(dst_dir)));
            }
            RunMode::Bench {
                stat_dir,
                bench_name,
            } => {
                args.push(format!("--stat-dir={}", display_path(stat_dir)));
                args.push(format!("--bench-name={bench_name}"));
            }
        }

        args.push(format!("--width={}", self.width));
        args.push(format!("--height={}", self.height));

        if let Some(camera) = &self.camera {
            args.push("--camera".to_string());
            args.extend(camera.components().iter().map(|c| c.to_string()));
        }

        if self.disable_culling {
            args.push("--disable-culling".to_string());
        }
        if self.enable_vsync {
            args.push("--enable-vsync".to_string());
        }
        if self.enable_bound_boxes {
            args.push("--bound-boxes".to_string());
        }

        // Models may start with '-'; keep them out of flag parsing.
        if !self.models.is_empty() {
            args.push("--".to_string());
            args.extend(self.models.iter().map(|model| display_path(model)));
        }

        args
    }
}

impl fmt::Display for CliOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.report_lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn describe_camera(camera: &Camera) -> String {
    let p = camera.position;
    let t = camera.target;
    let u = camera.up;
    format!(
        "position=({}, {}, {}) target=({}, {}, {}) up=({}, {}, {}) fov={}deg near={} far={}",
        p.x, p.y, p.z, t.x, t.y, t.z, u.x, u.y, u.z, camera.fov_y_deg, camera.near, camera.far
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::options::ParseOutcome;
    use std::path::PathBuf;

    fn bench_options() -> CliOptions {
        CliOptions {
            mode: RunMode::Bench {
                stat_dir: PathBuf::from("stats"),
                bench_name: "run1".to_string(),
            },
            width: 1280,
            height: 720,
            camera: None,
            disable_culling: true,
            enable_vsync: false,
            enable_bound_boxes: true,
            models: vec![PathBuf::from("a.obj"), PathBuf::from("-odd.obj")],
        }
    }

    #[test]
    fn report_covers_every_field() {
        let lines = bench_options().report_lines();
        assert_eq!(lines.len(), 12);
        assert!(lines.contains(&"mode: bench".to_string()));
        assert!(lines.contains(&"frames_number: unset".to_string()));
        assert!(lines.contains(&"dst_dir: unset".to_string()));
        assert!(lines.contains(&"stat_dir: stats".to_string()));
        assert!(lines.contains(&"bench_name: run1".to_string()));
        assert!(lines.contains(&"camera: engine default".to_string()));
        assert!(lines.contains(&"models (2): a.obj, -odd.obj".to_string()));
    }

    #[test]
    fn display_matches_report_lines() {
        let options = bench_options();
        let text = options.to_string();
        assert_eq!(text.lines().collect::<Vec<_>>(), options.report_lines());
    }

    #[test]
    fn to_args_parses_back() {
        let options = bench_options();
        match CliOptions::parse(options.to_args()).unwrap() {
            ParseOutcome::Run(parsed) => assert_eq!(parsed, options),
            ParseOutcome::Help(_) => panic!("unexpected help"),
        }
    }
}
