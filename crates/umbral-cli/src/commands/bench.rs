use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use umbral_core::collective::{adaptive_threshold_distributed, WorkerGroup};
use umbral_core::integral::IntegralImage;
use umbral_core::threshold::ThresholdParams;

use crate::summary;
use crate::timing::{self, TimingRecord};

#[derive(Args)]
pub struct BenchArgs {
    /// Input image to threshold repeatedly
    pub input: PathBuf,

    /// Neighborhood side length (odd, > 1)
    #[arg(long, default_value = "31")]
    pub window: usize,

    /// Constant subtracted from the local mean
    #[arg(short = 'c', long, default_value = "5")]
    pub offset: i32,

    /// Highest worker count in the sweep (1..=max)
    #[arg(long, default_value = "8")]
    pub max_workers: usize,

    /// Shared-memory threads per worker (0 = all cores)
    #[arg(long, default_value = "0")]
    pub threads: usize,

    /// CSV file receiving one timing row per worker count
    #[arg(long, default_value = "timings.csv")]
    pub log: PathBuf,
}

pub fn run(args: &BenchArgs) -> Result<()> {
    let raster = super::load_raster(&args.input)?;
    let params = ThresholdParams {
        window_size: args.window,
        c: args.offset,
    };
    let integral = IntegralImage::build(&raster);

    let pb = ProgressBar::new(args.max_workers as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Benchmark [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let mut results = Vec::with_capacity(args.max_workers);
    for workers in 1..=args.max_workers {
        let group = WorkerGroup::new(workers)?.with_inner_threads(args.threads);

        let started = Instant::now();
        adaptive_threshold_distributed(&raster, &integral, &params, &group)?;
        let seconds = started.elapsed().as_secs_f64();

        timing::append_row(
            &args.log,
            &TimingRecord {
                width: raster.width(),
                height: raster.height(),
                window_size: params.window_size,
                c: params.c,
                workers,
                threads: super::run::resolve_threads(args.threads),
                seconds,
            },
        )?;
        results.push((workers, seconds));
        pb.inc(1);
    }
    pb.finish();

    summary::print_bench_table(&results);
    println!("Timing rows appended to {}", args.log.display());
    Ok(())
}
