use std::sync::mpsc;
use std::thread;

use tracing::info;

use crate::engine;
use crate::error::{Result, UmbralError};
use crate::integral::IntegralImage;
use crate::partition::{gather_offsets, RowPartition};
use crate::raster::Raster;
use crate::threshold::{validate_inputs, ThresholdParams};

/// Opaque handle to the distributed worker set.
///
/// Carries the group geometry: how many workers take part in the
/// collective, and how many shared-memory threads each worker uses for
/// its own partition (0 = rayon's current pool width).
#[derive(Clone, Copy, Debug)]
pub struct WorkerGroup {
    worker_count: usize,
    inner_threads: usize,
}

impl WorkerGroup {
    pub fn new(worker_count: usize) -> Result<Self> {
        if worker_count == 0 {
            return Err(UmbralError::CollectiveMismatch(
                "worker group must have at least one worker".into(),
            ));
        }
        Ok(Self {
            worker_count,
            inner_threads: 0,
        })
    }

    pub fn with_inner_threads(mut self, inner_threads: usize) -> Self {
        self.inner_threads = inner_threads;
        self
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    pub fn inner_threads(&self) -> usize {
        self.inner_threads
    }
}

/// The full read-only input set, one copy per worker.
struct Broadcast {
    raster: Raster,
    integral: IntegralImage,
    params: ThresholdParams,
    worker_count: usize,
    owner_id: usize,
    inner_threads: usize,
}

/// One worker's gathered output, tagged with everything the coordinator
/// cross-checks before accepting it.
struct Contribution {
    owner_id: usize,
    width: usize,
    height: usize,
    params: ThresholdParams,
    pixels: Vec<u8>,
}

/// What the coordinator expects from a given owner.
struct ExpectedContribution {
    owner_id: usize,
    width: usize,
    height: usize,
    params: ThresholdParams,
    len: usize,
}

fn verify_contribution(expected: &ExpectedContribution, contrib: &Contribution) -> Result<()> {
    if contrib.owner_id != expected.owner_id {
        return Err(UmbralError::CollectiveMismatch(format!(
            "contribution from owner {} checked against slot {}",
            contrib.owner_id, expected.owner_id
        )));
    }
    if contrib.width != expected.width || contrib.height != expected.height {
        return Err(UmbralError::CollectiveMismatch(format!(
            "owner {} computed on {}x{}, coordinator holds {}x{}",
            contrib.owner_id, contrib.width, contrib.height, expected.width, expected.height
        )));
    }
    if contrib.params != expected.params {
        return Err(UmbralError::CollectiveMismatch(format!(
            "owner {} used window {} c {}, coordinator expects window {} c {}",
            contrib.owner_id,
            contrib.params.window_size,
            contrib.params.c,
            expected.params.window_size,
            expected.params.c
        )));
    }
    if contrib.pixels.len() != expected.len {
        return Err(UmbralError::CollectiveMismatch(format!(
            "owner {} contributed {} bytes, expected {}",
            contrib.owner_id,
            contrib.pixels.len(),
            expected.len
        )));
    }
    Ok(())
}

fn worker_main(input_rx: mpsc::Receiver<Broadcast>, contrib_tx: mpsc::Sender<Contribution>) {
    // Broadcast barrier: nothing happens until this worker's copy of the
    // read-only inputs has arrived.
    let Ok(msg) = input_rx.recv() else {
        return;
    };

    // Each worker derives its own partition locally; no communication.
    let partition = RowPartition::plan(msg.raster.height(), msg.worker_count, msg.owner_id);
    let pixels = engine::process_partition(
        &msg.raster,
        &msg.integral,
        &msg.params,
        &partition,
        msg.inner_threads,
    );

    let _ = contrib_tx.send(Contribution {
        owner_id: msg.owner_id,
        width: msg.raster.width(),
        height: msg.raster.height(),
        params: msg.params,
        pixels,
    });
}

/// Threshold the whole image across a worker group.
///
/// Broadcast-then-gather: the coordinator sends every worker its own full
/// copy of the raster, integral table and params (ownership transfer over
/// a channel, no shared memory between workers); each worker thresholds
/// its row partition with the inner pool; the coordinator assembles the
/// contributions at precomputed per-owner byte offsets, in rank order
/// regardless of completion order. Any disagreement between a
/// contribution and what the coordinator expects is fatal to the run:
/// the offsets are a function of every partition at once, so there is no
/// way to retry or exclude a single participant.
pub fn adaptive_threshold_distributed(
    raster: &Raster,
    integral: &IntegralImage,
    params: &ThresholdParams,
    group: &WorkerGroup,
) -> Result<Raster> {
    validate_inputs(raster, integral, params)?;

    let width = raster.width();
    let height = raster.height();
    let worker_count = group.worker_count();

    let partitions = RowPartition::plan_all(height, worker_count);
    let offsets = gather_offsets(&partitions, width);

    info!(
        workers = worker_count,
        width, height, "broadcasting input to worker group"
    );

    let (contrib_tx, contrib_rx) = mpsc::channel::<Contribution>();
    let mut input_txs = Vec::with_capacity(worker_count);
    let mut handles = Vec::with_capacity(worker_count);

    for owner_id in 0..worker_count {
        let (input_tx, input_rx) = mpsc::channel::<Broadcast>();
        let tx = contrib_tx.clone();
        let handle = thread::Builder::new()
            .name(format!("umbral-worker-{owner_id}"))
            .spawn(move || worker_main(input_rx, tx))?;
        input_txs.push(input_tx);
        handles.push(handle);
    }
    drop(contrib_tx);

    // Broadcast: byte-identical full copies, one per worker.
    for (owner_id, input_tx) in input_txs.into_iter().enumerate() {
        let msg = Broadcast {
            raster: raster.clone(),
            integral: integral.clone(),
            params: *params,
            worker_count,
            owner_id,
            inner_threads: group.inner_threads(),
        };
        if input_tx.send(msg).is_err() {
            return Err(UmbralError::CollectiveMismatch(format!(
                "worker {owner_id} exited before receiving its broadcast"
            )));
        }
    }

    // Gather barrier: exactly one contribution per owner, accepted in any
    // completion order, placed by owner-rank offset.
    let mut out = vec![0u8; width * height];
    let mut filled = vec![false; worker_count];
    for _ in 0..worker_count {
        let contrib = contrib_rx.recv().map_err(|_| {
            UmbralError::CollectiveMismatch("a worker exited before contributing".into())
        })?;

        let owner_id = contrib.owner_id;
        if owner_id >= worker_count {
            return Err(UmbralError::CollectiveMismatch(format!(
                "contribution from unknown owner {owner_id}"
            )));
        }
        if filled[owner_id] {
            return Err(UmbralError::CollectiveMismatch(format!(
                "duplicate contribution from owner {owner_id}"
            )));
        }

        let expected = ExpectedContribution {
            owner_id,
            width,
            height,
            params: *params,
            len: partitions[owner_id].len_bytes(width),
        };
        verify_contribution(&expected, &contrib)?;

        let offset = offsets[owner_id];
        out[offset..offset + contrib.pixels.len()].copy_from_slice(&contrib.pixels);
        filled[owner_id] = true;
    }

    for handle in handles {
        handle
            .join()
            .map_err(|_| UmbralError::CollectiveMismatch("a worker panicked".into()))?;
    }

    info!(workers = worker_count, "gather complete");

    Raster::new(width, height, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected() -> ExpectedContribution {
        ExpectedContribution {
            owner_id: 1,
            width: 8,
            height: 6,
            params: ThresholdParams {
                window_size: 3,
                c: 5,
            },
            len: 16,
        }
    }

    fn contribution() -> Contribution {
        Contribution {
            owner_id: 1,
            width: 8,
            height: 6,
            params: ThresholdParams {
                window_size: 3,
                c: 5,
            },
            pixels: vec![0; 16],
        }
    }

    #[test]
    fn accepts_matching_contribution() {
        assert!(verify_contribution(&expected(), &contribution()).is_ok());
    }

    #[test]
    fn rejects_dimension_disagreement() {
        let mut contrib = contribution();
        contrib.height = 7;
        let err = verify_contribution(&expected(), &contrib).unwrap_err();
        assert!(matches!(err, UmbralError::CollectiveMismatch(_)));
    }

    #[test]
    fn rejects_param_disagreement() {
        let mut contrib = contribution();
        contrib.params.c = 0;
        let err = verify_contribution(&expected(), &contrib).unwrap_err();
        assert!(matches!(err, UmbralError::CollectiveMismatch(_)));
    }

    #[test]
    fn rejects_short_buffer() {
        let mut contrib = contribution();
        contrib.pixels.truncate(8);
        let err = verify_contribution(&expected(), &contrib).unwrap_err();
        assert!(matches!(err, UmbralError::CollectiveMismatch(_)));
    }
}
