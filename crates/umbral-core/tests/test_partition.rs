use umbral_core::partition::{gather_offsets, RowPartition};

#[test]
fn partitions_cover_the_row_space_exactly() {
    for height in [1, 2, 3, 7, 10, 64, 97, 480] {
        for worker_count in [1, 2, 3, 4, 5, 7, 8, 16] {
            let partitions = RowPartition::plan_all(height, worker_count);
            assert_eq!(partitions.len(), worker_count);

            // Contiguous and gapless in rank order, starting at row 0.
            let mut next_row = 0;
            for (owner_id, part) in partitions.iter().enumerate() {
                assert_eq!(part.owner_id, owner_id);
                assert_eq!(
                    part.start_row, next_row,
                    "gap before owner {owner_id} at height {height}, workers {worker_count}"
                );
                next_row = part.end_row();
            }
            assert_eq!(next_row, height);

            let total: usize = partitions.iter().map(|p| p.row_count).sum();
            assert_eq!(total, height);

            // Near-equal split: counts differ by at most one.
            let max = partitions.iter().map(|p| p.row_count).max().unwrap();
            let min = partitions.iter().map(|p| p.row_count).min().unwrap();
            assert!(max - min <= 1);
        }
    }
}

#[test]
fn first_owners_take_the_remainder_rows() {
    // height = 7, workers = 3: counts [3, 2, 2], starts [0, 3, 5].
    let partitions = RowPartition::plan_all(7, 3);
    let counts: Vec<usize> = partitions.iter().map(|p| p.row_count).collect();
    let starts: Vec<usize> = partitions.iter().map(|p| p.start_row).collect();
    assert_eq!(counts, vec![3, 2, 2]);
    assert_eq!(starts, vec![0, 3, 5]);
}

#[test]
fn more_workers_than_rows_yields_zero_row_partitions() {
    let partitions = RowPartition::plan_all(2, 5);
    let counts: Vec<usize> = partitions.iter().map(|p| p.row_count).collect();
    assert_eq!(counts, vec![1, 1, 0, 0, 0]);
    assert_eq!(partitions[2].start_row, 2);
    assert_eq!(partitions[4].end_row(), 2);
}

#[test]
fn plan_is_consistent_with_plan_all() {
    for owner_id in 0..6 {
        assert_eq!(
            RowPartition::plan(100, 6, owner_id),
            RowPartition::plan_all(100, 6)[owner_id]
        );
    }
}

#[test]
fn gather_offsets_are_running_byte_sums() {
    let width = 10;
    let partitions = RowPartition::plan_all(7, 3);
    let offsets = gather_offsets(&partitions, width);
    assert_eq!(offsets, vec![0, 30, 50]);

    // Offsets of zero-row owners collapse onto the next owner's offset.
    let partitions = RowPartition::plan_all(2, 4);
    let offsets = gather_offsets(&partitions, width);
    assert_eq!(offsets, vec![0, 10, 20, 20]);
}
