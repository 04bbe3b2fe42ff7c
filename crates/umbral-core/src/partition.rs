/// A contiguous range of image rows owned by one worker.
///
/// Partitions for owners `0..worker_count` are disjoint, gapless, and
/// cover `[0, height)` exactly; row counts differ by at most one, with
/// the first `height % worker_count` owners taking the extra row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowPartition {
    pub owner_id: usize,
    pub start_row: usize,
    pub row_count: usize,
}

impl RowPartition {
    /// Derive the partition for `owner_id` out of `worker_count` owners.
    ///
    /// Pure function of its arguments: every worker computes its own
    /// partition locally, no communication required. `worker_count` must
    /// be non-zero and `owner_id < worker_count`.
    pub fn plan(height: usize, worker_count: usize, owner_id: usize) -> Self {
        debug_assert!(worker_count > 0);
        debug_assert!(owner_id < worker_count);

        let base = height / worker_count;
        let remainder = height % worker_count;

        let row_count = if owner_id < remainder { base + 1 } else { base };
        let start_row = base * owner_id + owner_id.min(remainder);

        Self {
            owner_id,
            start_row,
            row_count,
        }
    }

    /// Partitions for every owner, in rank order.
    pub fn plan_all(height: usize, worker_count: usize) -> Vec<Self> {
        (0..worker_count)
            .map(|owner_id| Self::plan(height, worker_count, owner_id))
            .collect()
    }

    /// One past the last owned row.
    pub fn end_row(&self) -> usize {
        self.start_row + self.row_count
    }

    /// Length in bytes of this partition's local output buffer.
    pub fn len_bytes(&self, width: usize) -> usize {
        self.row_count * width
    }
}

/// Byte offset of each owner's contribution in the gathered output:
/// the running sum of `row_count(p) * width` for `p < owner_id`.
pub fn gather_offsets(partitions: &[RowPartition], width: usize) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(partitions.len());
    let mut displacement = 0;
    for part in partitions {
        offsets.push(displacement);
        displacement += part.len_bytes(width);
    }
    offsets
}
