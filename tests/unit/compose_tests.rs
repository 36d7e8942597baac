// Compositor tests against files on disk
// Covers the geometry, opacity, and channel guarantees of a single slide

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use owl_overlay::overlay::{
    calculate_padding, calculate_position, compose, compose_image, scaled_overlay_size,
    AnchorPosition, Dimensions, OverlayCompositor, OverlayError, PlacementPosition, PresetTable,
};
use std::path::Path;

/// Mascot with an opaque 40x30 body and a transparent border
fn mascot() -> RgbaImage {
    RgbaImage::from_fn(60, 45, |x, y| {
        if (10..50).contains(&x) && (8..38).contains(&y) {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([255, 0, 0, 0])
        }
    })
}

fn write_mascot(path: &Path) {
    mascot().save(path).unwrap();
}

#[test]
fn test_overlay_width_matches_every_preset() {
    let table = PresetTable::builtin();
    let source = Dimensions::new(600, 450);

    for preset in table.iter() {
        for base_width in [720u32, 1000, 1080, 1920] {
            let size = scaled_overlay_size(base_width, &source, preset.placement.size_percent);
            assert_eq!(
                size.width,
                base_width * preset.placement.size_percent / 100,
                "preset {} base {}",
                preset.name,
                base_width
            );

            let ratio = size.height as f64 / size.width as f64;
            let max_err = 1.0 / size.width as f64;
            assert!((ratio - 0.75).abs() <= max_err, "aspect ratio drifted");
        }
    }
}

#[test]
fn test_reference_bottom_right_coordinate() {
    // 1000x1000 slide, default preset (10%), padding 5%
    let base = Dimensions::new(1000, 1000);
    let placement = PresetTable::builtin().default_preset().placement;
    let overlay = scaled_overlay_size(base.width, &Dimensions::new(600, 450), placement.size_percent);
    assert_eq!(overlay.width, 100);

    let pos = calculate_position(
        placement.position,
        &base,
        &overlay,
        calculate_padding(base.width),
    );
    assert_eq!(pos, PlacementPosition::new(850, 950 - overlay.height as i64));
}

#[test]
fn test_default_opacity_on_opaque_pixel() {
    let base = DynamicImage::ImageRgb8(RgbImage::from_pixel(1000, 1000, Rgb([0, 0, 0])));
    let owl = DynamicImage::ImageRgba8(RgbaImage::from_pixel(100, 100, Rgba([255, 255, 255, 255])));
    let placement = PresetTable::builtin().resolve("bottom-right").preset().placement;

    let out = compose_image(&base, &owl, &placement).unwrap();
    // round(255 * 0.18) = 46, blended white-over-black yields 46
    assert_eq!(*out.get_pixel(900, 900), Rgb([46, 46, 46]));
    assert_eq!(*out.get_pixel(10, 10), Rgb([0, 0, 0]));
}

#[test]
fn test_output_is_rgb_for_any_input_depth() {
    let dir = tempfile::tempdir().unwrap();
    let owl = dir.path().join("owl.png");
    write_mascot(&owl);

    let gray = dir.path().join("slide_gray.png");
    GrayImage::from_pixel(300, 200, Luma([128])).save(&gray).unwrap();
    let rgb = dir.path().join("slide_rgb.png");
    RgbImage::from_pixel(300, 200, Rgb([10, 20, 30])).save(&rgb).unwrap();
    let rgba = dir.path().join("slide_rgba.png");
    RgbaImage::from_pixel(300, 200, Rgba([10, 20, 30, 90])).save(&rgba).unwrap();

    let placement = PresetTable::builtin().resolve("mid-right").preset().placement;
    for input in [&gray, &rgb, &rgba] {
        let out = dir.path().join(format!(
            "out_{}",
            input.file_name().unwrap().to_string_lossy()
        ));
        compose(input, &owl, &out, &placement).unwrap();

        let decoded = image::open(&out).unwrap();
        assert_eq!(decoded.color(), image::ColorType::Rgb8);
        assert_eq!((decoded.width(), decoded.height()), (300, 200));
    }
}

#[test]
fn test_unknown_preset_matches_default_output() {
    let dir = tempfile::tempdir().unwrap();
    let owl = dir.path().join("owl.png");
    write_mascot(&owl);

    let slide = dir.path().join("slide_01.png");
    RgbImage::from_fn(400, 300, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 90]))
        .save(&slide)
        .unwrap();

    let compositor = OverlayCompositor::new(&owl, PresetTable::builtin());
    let named = dir.path().join("named.png");
    let unknown = dir.path().join("unknown.png");
    compositor.compose(&slide, &named, "bottom-right").unwrap();
    compositor.compose(&slide, &unknown, "nonexistent").unwrap();

    let a = image::open(&named).unwrap().to_rgb8();
    let b = image::open(&unknown).unwrap().to_rgb8();
    assert_eq!(a, b);
}

#[test]
fn test_transparent_border_leaves_slide_untouched() {
    let base = DynamicImage::ImageRgb8(RgbImage::from_pixel(600, 600, Rgb([5, 5, 5])));
    let owl = DynamicImage::ImageRgba8(mascot());
    let placement = PresetTable::builtin().resolve("top-right").preset().placement;

    let out = compose_image(&base, &owl, &placement).unwrap();

    // Overlay is 48x36 at (600 - 48 - 30, 30); its corner is transparent
    assert_eq!(*out.get_pixel(522, 30), Rgb([5, 5, 5]));
    // Body pixel gets round(255 * 0.15) = 38 coverage of white
    let body = out.get_pixel(546, 48);
    assert!(body[0] > 5 && body[0] < 60);
}

#[test]
fn test_missing_overlay_is_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let slide = dir.path().join("slide_01.png");
    RgbImage::new(100, 100).save(&slide).unwrap();

    let placement = PresetTable::builtin().default_preset().placement;
    let err = compose(
        &slide,
        &dir.path().join("owl_image_nobg.png"),
        &dir.path().join("out.png"),
        &placement,
    )
    .unwrap_err();

    match err {
        OverlayError::DecodeFailed { path, .. } => {
            assert!(path.ends_with("owl_image_nobg.png"));
        }
        other => panic!("Expected DecodeFailed, got {:?}", other),
    }
}

#[test]
fn test_oversized_overlay_is_clamped_and_clipped() {
    // Short, wide slide: a 12% overlay of a tall mascot exceeds the height
    let base = DynamicImage::ImageRgb8(RgbImage::from_pixel(1000, 20, Rgb([0, 0, 0])));
    let tall = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 100, Rgba([255, 255, 255, 255])));
    let placement = owl_overlay::overlay::PlacementConfig::new(AnchorPosition::MidRight, 12, 1.0);

    let out = compose_image(&base, &tall, &placement).unwrap();
    assert_eq!(out.dimensions(), (1000, 20));
    // Overlay is 120x1200, clamped to y = 0 and x = 1000 - 120 - 50
    assert!(out.get_pixel(900, 0)[0] > 200);
    assert!(out.get_pixel(900, 19)[0] > 200);
    assert_eq!(*out.get_pixel(800, 10), Rgb([0, 0, 0]));
}
