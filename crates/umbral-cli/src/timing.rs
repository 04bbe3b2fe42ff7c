use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// One CSV row of the performance log.
pub struct TimingRecord {
    pub width: usize,
    pub height: usize,
    pub window_size: usize,
    pub c: i32,
    pub workers: usize,
    pub threads: usize,
    pub seconds: f64,
}

/// Append one row, writing the header line when the file is created.
pub fn append_row(path: &Path, record: &TimingRecord) -> Result<()> {
    let write_header = !path.exists();

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open CSV log {}", path.display()))?;

    if write_header {
        writeln!(file, "width,height,window_size,c,workers,threads,time_seconds")?;
    }
    writeln!(
        file,
        "{},{},{},{},{},{},{}",
        record.width,
        record.height,
        record.window_size,
        record.c,
        record.workers,
        record.threads,
        record.seconds
    )?;

    Ok(())
}
