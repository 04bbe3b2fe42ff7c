use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use umbral_core::collective::{adaptive_threshold_distributed, WorkerGroup};
use umbral_core::config::JobConfig;
use umbral_core::integral::IntegralImage;
use umbral_core::threshold::ThresholdParams;

use crate::summary;
use crate::timing::{self, TimingRecord};

#[derive(Args)]
pub struct RunArgs {
    /// Input image (PNG, PGM/PNM, TIFF, ...)
    pub input: PathBuf,

    /// Output image path
    pub output: PathBuf,

    /// Neighborhood side length (odd, > 1)
    #[arg(long, default_value = "31")]
    pub window: usize,

    /// Constant subtracted from the local mean
    #[arg(short = 'c', long, default_value = "5")]
    pub offset: i32,

    /// Distributed worker count
    #[arg(long, default_value = "1")]
    pub workers: usize,

    /// Shared-memory threads per worker (0 = all cores)
    #[arg(long, default_value = "0")]
    pub threads: usize,

    /// Read window/offset/workers/threads from a TOML job config instead
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Append a timing row to this CSV file
    #[arg(long)]
    pub log: Option<PathBuf>,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let job = resolve_job(args)?;
    let raster = super::load_raster(&args.input)?;

    let integral = IntegralImage::build(&raster);
    let group = WorkerGroup::new(job.workers)?.with_inner_threads(job.inner_threads);

    let started = Instant::now();
    let out = adaptive_threshold_distributed(&raster, &integral, &job.threshold, &group)?;
    let elapsed = started.elapsed().as_secs_f64();
    info!(
        elapsed_s = elapsed,
        workers = job.workers,
        "thresholding complete"
    );

    super::save_raster(&out, &args.output)?;

    if let Some(ref log) = args.log {
        timing::append_row(
            log,
            &TimingRecord {
                width: raster.width(),
                height: raster.height(),
                window_size: job.threshold.window_size,
                c: job.threshold.c,
                workers: job.workers,
                threads: resolve_threads(job.inner_threads),
                seconds: elapsed,
            },
        )?;
    }

    summary::print_run_summary(&args.input, &args.output, &job, elapsed);
    Ok(())
}

fn resolve_job(args: &RunArgs) -> Result<JobConfig> {
    if let Some(ref path) = args.config {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let job = toml::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(job)
    } else {
        Ok(JobConfig {
            threshold: ThresholdParams {
                window_size: args.window,
                c: args.offset,
            },
            workers: args.workers,
            inner_threads: args.threads,
        })
    }
}

/// The thread count that actually applies when the config says "auto".
pub(crate) fn resolve_threads(inner_threads: usize) -> usize {
    if inner_threads == 0 {
        rayon::current_num_threads()
    } else {
        inner_threads
    }
}
