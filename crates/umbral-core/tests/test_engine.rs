#[allow(dead_code)]
mod common;

use umbral_core::engine::adaptive_threshold;
use umbral_core::error::UmbralError;
use umbral_core::integral::IntegralImage;
use umbral_core::threshold::ThresholdParams;

#[test]
fn partition_outputs_concatenate_to_the_single_worker_result() {
    let raster = common::gradient_raster(17, 29);
    let integral = IntegralImage::build(&raster);
    let params = ThresholdParams {
        window_size: 7,
        c: 4,
    };

    let whole = adaptive_threshold(&raster, &integral, &params, 1, 0).unwrap();

    for worker_count in [2, 3, 5, 8] {
        let mut assembled = Vec::with_capacity(raster.width() * raster.height());
        for owner_id in 0..worker_count {
            let part = adaptive_threshold(&raster, &integral, &params, worker_count, owner_id)
                .unwrap();
            assert_eq!(part.partition.owner_id, owner_id);
            assert_eq!(
                part.pixels.len(),
                part.partition.row_count * raster.width()
            );
            assembled.extend_from_slice(&part.pixels);
        }
        assert_eq!(assembled, whole.pixels, "worker_count {worker_count}");
    }
}

#[test]
fn partition_rows_match_the_corresponding_whole_image_rows() {
    let raster = common::gradient_raster(11, 7);
    let integral = IntegralImage::build(&raster);
    let params = ThresholdParams {
        window_size: 3,
        c: 2,
    };
    let width = raster.width();

    let whole = adaptive_threshold(&raster, &integral, &params, 1, 0).unwrap();
    let part = adaptive_threshold(&raster, &integral, &params, 3, 2).unwrap();

    // height = 7, workers = 3: owner 2 owns rows [5, 7). Its local row 0
    // is global row 5.
    assert_eq!(part.partition.start_row, 5);
    assert_eq!(
        &part.pixels[..width],
        &whole.pixels[5 * width..6 * width]
    );
}

#[test]
fn zero_row_partition_produces_an_empty_buffer() {
    let raster = common::gradient_raster(6, 2);
    let integral = IntegralImage::build(&raster);
    let params = ThresholdParams {
        window_size: 3,
        c: 0,
    };

    let part = adaptive_threshold(&raster, &integral, &params, 5, 4).unwrap();
    assert_eq!(part.partition.row_count, 0);
    assert!(part.pixels.is_empty());
}

#[test]
fn rejects_owner_out_of_range() {
    let raster = common::gradient_raster(6, 6);
    let integral = IntegralImage::build(&raster);
    let params = ThresholdParams {
        window_size: 3,
        c: 0,
    };

    let err = adaptive_threshold(&raster, &integral, &params, 3, 3).unwrap_err();
    assert!(matches!(err, UmbralError::CollectiveMismatch(_)));

    let err = adaptive_threshold(&raster, &integral, &params, 0, 0).unwrap_err();
    assert!(matches!(err, UmbralError::CollectiveMismatch(_)));
}
