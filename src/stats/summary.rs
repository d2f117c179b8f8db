use super::metrics::PerformanceMetrics;
use std::fmt;

/// Spread of the per-frame GPU time, in milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct GpuTimeStats {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Figures taken from the trimmed window of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowStats {
    pub gpu_time: GpuTimeStats,
    pub mean_culling_ms: f64,
    pub mean_occlusion_culling_ms: f64,
}

/// Statistics over the steady-state part of a benchmark run.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub used: usize,
    pub dropped_head: usize,
    pub dropped_tail: usize,
    pub triangles_number: u64,
    /// GPU time had the culling pass subtracted.
    pub without_culling: bool,
    /// `None` when trimming leaves no frames.
    pub window: Option<WindowStats>,
}

impl Summary {
    /// Drops the first 10% of frames (warm-up) and the last 5%, then
    /// summarizes the rest. `None` only for an empty run.
    pub fn compute(records: &[PerformanceMetrics], without_culling: bool) -> Option<Self> {
        let first = records.first()?;
        let total = records.len();
        let start = total / 10;
        let end = total * 19 / 20;
        let window = records.get(start..end).unwrap_or_default();

        Some(Self {
            total,
            used: window.len(),
            dropped_head: start,
            dropped_tail: total - end,
            triangles_number: first.triangles_number,
            without_culling,
            window: WindowStats::compute(window, without_culling),
        })
    }
}

impl WindowStats {
    fn compute(window: &[PerformanceMetrics], without_culling: bool) -> Option<Self> {
        if window.is_empty() {
            return None;
        }

        let times: Vec<f64> = window
            .iter()
            .map(|m| {
                if without_culling {
                    m.gpu_time_ms - m.culling_gpu_time_ms
                } else {
                    m.gpu_time_ms
                }
            })
            .collect();

        Some(Self {
            gpu_time: GpuTimeStats::from_samples(&times),
            mean_culling_ms: mean(window.iter().map(|m| m.culling_gpu_time_ms)),
            mean_occlusion_culling_ms: mean(
                window
                    .iter()
                    .map(|m| m.late_culling_gpu_time_ms + m.build_depth_pyramid_gpu_time_ms),
            ),
        })
    }
}

impl GpuTimeStats {
    /// `samples` must not be empty.
    fn from_samples(samples: &[f64]) -> Self {
        let mean = mean(samples.iter().copied());
        let variance = mean_of(samples.iter().map(|t| (t - mean).powi(2)), samples.len());

        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);
        let n = sorted.len();
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        Self {
            mean,
            median,
            std_dev: variance.sqrt(),
            min: sorted[0],
            max: sorted[n - 1],
        }
    }
}

fn mean<I: ExactSizeIterator<Item = f64>>(values: I) -> f64 {
    let len = values.len();
    mean_of(values, len)
}

fn mean_of<I: Iterator<Item = f64>>(values: I, len: usize) -> f64 {
    values.sum::<f64>() / len as f64
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Triangles: {}", self.triangles_number)?;
        writeln!(f, "Total records: {}", self.total)?;
        writeln!(
            f,
            "Used for statistics: {} (dropped {} leading, {} trailing)",
            self.used, self.dropped_head, self.dropped_tail
        )?;
        let Some(window) = &self.window else {
            return write!(f, "Not enough records after trimming");
        };
        if self.without_culling {
            writeln!(f, "GPU time excludes the culling pass")?;
        }
        writeln!(f, "GPU time (ms):")?;
        writeln!(f, "  mean:    {:.2}", window.gpu_time.mean)?;
        writeln!(f, "  median:  {:.2}", window.gpu_time.median)?;
        writeln!(f, "  std dev: {:.2}", window.gpu_time.std_dev)?;
        writeln!(f, "  min:     {:.2}", window.gpu_time.min)?;
        writeln!(f, "  max:     {:.2}", window.gpu_time.max)?;
        writeln!(f, "Mean culling time: {:.2} ms", window.mean_culling_ms)?;
        write!(
            f,
            "Mean occlusion culling time: {:.2} ms",
            window.mean_occlusion_culling_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(frame_number: u64, gpu_time_ms: f64) -> PerformanceMetrics {
        PerformanceMetrics {
            frame_number,
            cpu_fps: 0.0,
            cpu_time_ms: 0.0,
            gpu_fps: 0.0,
            gpu_time_ms,
            cpu_rendering_time_ms: 0.0,
            culling_gpu_time_ms: 1.0,
            build_depth_pyramid_gpu_time_ms: 0.5,
            late_culling_gpu_time_ms: 0.25,
            gpu_rendering_time_ms: 0.0,
            gpu_models_time_ms: 0.0,
            gpu_shading_time_ms: 0.0,
            triangles_per_second: 0.0,
            triangles_per_second_millions: 0.0,
            triangles_number: 42,
            vertexes_number: 0,
        }
    }

    fn run(times: &[f64]) -> Vec<PerformanceMetrics> {
        times
            .iter()
            .enumerate()
            .map(|(i, &t)| record(i as u64, t))
            .collect()
    }

    #[test]
    fn empty_run_has_no_summary() {
        assert_eq!(Summary::compute(&[], false), None);
    }

    #[test]
    fn trims_warm_up_and_tail() {
        // Outliers at both ends fall outside the window.
        let records = run(&[100.0, 2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0, 100.0]);
        let summary = Summary::compute(&records, false).unwrap();

        assert_eq!(summary.total, 10);
        assert_eq!(summary.used, 8);
        assert_eq!(summary.dropped_head, 1);
        assert_eq!(summary.dropped_tail, 1);
        assert_eq!(summary.triangles_number, 42);
        let window = summary.window.unwrap();
        assert_eq!(window.gpu_time.mean, 5.0);
        assert_eq!(window.gpu_time.median, 4.5);
        assert_eq!(window.gpu_time.std_dev, 2.0);
        assert_eq!(window.gpu_time.min, 2.0);
        assert_eq!(window.gpu_time.max, 9.0);
        assert_eq!(window.mean_culling_ms, 1.0);
        assert_eq!(window.mean_occlusion_culling_ms, 0.75);
    }

    #[test]
    fn subtracts_culling_when_asked() {
        let records = run(&[3.0, 3.0, 5.0]);
        let summary = Summary::compute(&records, true).unwrap();
        // Three records: nothing dropped at the head, the last one at the tail.
        assert_eq!((summary.dropped_head, summary.dropped_tail), (0, 1));
        let window = summary.window.as_ref().unwrap();
        assert_eq!(window.gpu_time.mean, 2.0);
        assert_eq!(window.gpu_time.median, 2.0);
        assert!(summary.to_string().contains("excludes the culling pass"));
    }

    #[test]
    fn single_record_keeps_counts_without_window() {
        let summary = Summary::compute(&run(&[3.0]), false).unwrap();
        assert_eq!(summary.total, 1);
        assert_eq!(summary.used, 0);
        assert_eq!((summary.dropped_head, summary.dropped_tail), (0, 1));
        assert_eq!(summary.triangles_number, 42);
        assert_eq!(summary.window, None);

        let text = summary.to_string();
        assert!(text.contains("Triangles: 42"));
        assert!(text.contains("Total records: 1"));
        assert!(text.contains("Not enough records after trimming"));
    }
}
