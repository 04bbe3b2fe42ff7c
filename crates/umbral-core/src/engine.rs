use rayon::prelude::*;
use tracing::debug;

use crate::error::{Result, UmbralError};
use crate::integral::IntegralImage;
use crate::partition::RowPartition;
use crate::raster::Raster;
use crate::threshold::{threshold_rows, validate_inputs, ThresholdParams};

/// The local result of thresholding one row partition.
#[derive(Clone, Debug)]
pub struct PartitionOutput {
    pub partition: RowPartition,
    /// Row-major output rows, length = `partition.row_count * width`,
    /// values restricted to {0, 255}.
    pub pixels: Vec<u8>,
}

/// Threshold the caller's own partition of the image.
///
/// This is the single-worker entry point: the partition is derived from
/// `(height, worker_count, owner_id)` and processed with the inner
/// shared-memory pool. With `worker_count = 1` it covers the whole image.
pub fn adaptive_threshold(
    raster: &Raster,
    integral: &IntegralImage,
    params: &ThresholdParams,
    worker_count: usize,
    owner_id: usize,
) -> Result<PartitionOutput> {
    validate_inputs(raster, integral, params)?;
    if worker_count == 0 || owner_id >= worker_count {
        return Err(UmbralError::CollectiveMismatch(format!(
            "owner {owner_id} out of range for {worker_count} workers"
        )));
    }

    let partition = RowPartition::plan(raster.height(), worker_count, owner_id);
    let pixels = process_partition(raster, integral, params, &partition, 0);
    Ok(PartitionOutput { partition, pixels })
}

/// Run the kernel over one partition using `inner_threads` shared-memory
/// threads (0 = rayon's current pool width).
///
/// The partition's rows are split into contiguous chunks, one per inner
/// thread, decided once up front; per-row cost is uniform apart from
/// boundary effects, so static scheduling balances. Each chunk is a
/// disjoint `&mut` slice of the local buffer, so no element is ever
/// written by two threads and the compute path takes no locks.
pub(crate) fn process_partition(
    raster: &Raster,
    integral: &IntegralImage,
    params: &ThresholdParams,
    partition: &RowPartition,
    inner_threads: usize,
) -> Vec<u8> {
    let width = raster.width();
    let mut out = vec![0u8; partition.len_bytes(width)];
    if partition.row_count == 0 {
        return out;
    }

    let threads = if inner_threads == 0 {
        rayon::current_num_threads()
    } else {
        inner_threads
    };

    if threads <= 1 {
        threshold_rows(
            raster,
            integral,
            params,
            partition.start_row,
            partition.end_row(),
            &mut out,
        );
    } else {
        let chunk_rows = partition.row_count.div_ceil(threads);
        out.par_chunks_mut(chunk_rows * width)
            .enumerate()
            .for_each(|(i, chunk)| {
                let chunk_start = partition.start_row + i * chunk_rows;
                let chunk_end = chunk_start + chunk.len() / width;
                threshold_rows(raster, integral, params, chunk_start, chunk_end, chunk);
            });
    }

    debug!(
        owner_id = partition.owner_id,
        start_row = partition.start_row,
        row_count = partition.row_count,
        threads,
        "partition thresholded"
    );

    out
}
