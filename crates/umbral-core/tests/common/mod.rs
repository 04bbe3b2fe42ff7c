use umbral_core::raster::Raster;

/// Raster where every pixel holds the same value.
pub fn uniform_raster(width: usize, height: usize, value: u8) -> Raster {
    Raster::new(width, height, vec![value; width * height]).unwrap()
}

/// Deterministic non-uniform raster: a sheared gradient that varies in
/// both axes, so rectangle sums differ everywhere.
pub fn gradient_raster(width: usize, height: usize) -> Raster {
    let pixels: Vec<u8> = (0..height)
        .flat_map(|r| (0..width).map(move |c| ((r * 31 + c * 7) % 256) as u8))
        .collect();
    Raster::new(width, height, pixels).unwrap()
}

/// The 4x4 scenario: a dark frame around a bright 2x2 center.
pub fn bright_square_raster() -> Raster {
    #[rustfmt::skip]
    let pixels = vec![
        10,  10,  10,  10,
        10, 200, 200,  10,
        10, 200, 200,  10,
        10,  10,  10,  10,
    ];
    Raster::new(4, 4, pixels).unwrap()
}

/// O(area) reference sum over an inclusive rectangle, straight off the
/// pixel buffer.
pub fn brute_force_sum(raster: &Raster, r0: usize, c0: usize, r1: usize, c1: usize) -> u64 {
    let mut sum = 0u64;
    for r in r0..=r1 {
        for c in c0..=c1 {
            sum += u64::from(raster.get(r, c));
        }
    }
    sum
}
