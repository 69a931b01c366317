use idlut_core::{
    ByteLut, GrayImage, LUT_SIZE, Lut, LutError, NarrowingPolicy, WindowParams, auto_window,
    check_is_8bit, compute_linear, to_byte_lut,
};

/// Horizontal gradient covering `lo..=hi`, one pixel per intensity.
fn gradient(lo: u8, hi: u8) -> GrayImage {
    let pixels: Vec<u8> = (lo..=hi).collect();
    GrayImage::new(pixels.len() as u32, 1, pixels).expect("gradient dimensions")
}

#[test]
fn linear_tables_within_byte_range_pass_the_8bit_check() {
    let windows = [(0, 255, 0, 255), (40, 60, 0, 255), (0, 1, 128, 128), (-10, 500, 3, 250)];
    for (a, b, c, d) in windows {
        let lut = compute_linear(a, b, c, d).unwrap();
        assert_eq!(lut.as_slice().len(), LUT_SIZE);
        assert!(check_is_8bit(&lut), "window ({a}, {b}, {c}, {d})");
    }
}

#[test]
fn linear_endpoints_are_exact() {
    for (a, b) in [(0, 255), (12, 13), (100, 200), (1, 254)] {
        let lut = compute_linear(a, b, -40, 4000).unwrap();
        assert_eq!(lut.get(a as u8), -40);
        assert_eq!(lut.get(b as u8), 4000);
    }
}

#[test]
fn table_with_single_outlier_fails_check_and_strict_narrowing() {
    let mut values = Lut::identity().as_array().to_owned();
    values[10] = 300;
    let lut = Lut::from(values);

    assert!(!check_is_8bit(&lut));
    assert!(matches!(
        lut.narrow(NarrowingPolicy::Reject),
        Err(LutError::OutOfRange { index: 10, value: 300 })
    ));
    assert_eq!(to_byte_lut(&lut).get(10), 255);
}

#[test]
fn byte_conversion_round_trips_in_range_tables() {
    let lut = compute_linear(20, 240, 255, 0).unwrap();
    let bytes = to_byte_lut(&lut);
    assert_eq!(bytes.to_lut(), lut);
}

#[test]
fn degenerate_window_is_deterministic_step() {
    let first = compute_linear(10, 10, 0, 100).unwrap();
    let second = compute_linear(10, 10, 0, 100).unwrap();
    assert_eq!(first, second);
    assert!((0..10).all(|i| first.get(i) == 0));
    assert!((10..=255).all(|i| first.get(i) == 100));
}

#[test]
fn auto_window_stretches_low_contrast_image() {
    let image = gradient(64, 191);
    let (lo, hi) = auto_window(&image, 0.0, 100.0).unwrap();
    assert_eq!((lo, hi), (64, 191));

    let params = WindowParams {
        input_min: lo,
        input_max: hi,
        ..WindowParams::default()
    };
    let lut = params.to_lut().unwrap().narrow(params.narrowing).unwrap();
    let out = lut.apply(&image);

    assert_eq!(out.pixels.first(), Some(&0));
    assert_eq!(out.pixels.last(), Some(&255));
    assert!(out.pixels.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn windowed_image_survives_disk_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src.png");
    let dst = dir.path().join("dst.png");

    gradient(0, 255).save(&src).unwrap();
    let loaded = GrayImage::load(&src).unwrap();
    assert_eq!(loaded, gradient(0, 255));

    let negative = ByteLut::identity().invert();
    negative.apply(&loaded).save(&dst).unwrap();

    let reloaded = GrayImage::load(&dst).unwrap();
    assert_eq!(reloaded.pixels[0], 255);
    assert_eq!(reloaded.pixels[255], 0);
}

#[test]
fn lut_json_is_a_flat_array() {
    let lut = compute_linear(0, 255, 255, 0).unwrap().to_byte_lut();
    let json = serde_json::to_string(&lut).unwrap();
    let values: Vec<u8> = serde_json::from_str(&json).unwrap();
    assert_eq!(values.len(), LUT_SIZE);
    assert_eq!(values[0], 255);

    let back: ByteLut = serde_json::from_str(&json).unwrap();
    assert_eq!(back, lut);
}
