use image::{DynamicImage, GrayImage, Luma, Rgb, Rgba, RgbImage, RgbaImage};
use ndarray::Array2;
use tempfile::TempDir;

use relief_core::error::ReliefError;
use relief_core::frame::Frame;
use relief_core::io::image_io::{load_normal_map, probe, save_height_map, save_png, save_tiff};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn make_ramp_frame(h: usize, w: usize, bit_depth: u8) -> Frame {
    let data = Array2::from_shape_fn((h, w), |(r, c)| (r * w + c) as f32 / (h * w) as f32);
    Frame::new(data, bit_depth)
}

// ---------------------------------------------------------------------------
// load_normal_map
// ---------------------------------------------------------------------------

#[test]
fn test_load_rgb_png() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("normal.png");

    let mut img = RgbImage::new(4, 3);
    for y in 0..3 {
        for x in 0..4 {
            img.put_pixel(x, y, Rgb([(x * 60) as u8, (y * 80) as u8, 255]));
        }
    }
    img.save(&path).unwrap();

    let map = load_normal_map(&path).unwrap();
    assert_eq!(map.width(), 4);
    assert_eq!(map.height(), 3);
    assert_eq!(map.bit_depth(), 8);

    for y in 0..3usize {
        for x in 0..4usize {
            let expected_red = (x * 60) as f32 / 255.0;
            let expected_green = (y * 80) as f32 / 255.0;
            assert!((map.red.data[[y, x]] - expected_red).abs() < 1e-6);
            assert!((map.green.data[[y, x]] - expected_green).abs() < 1e-6);
        }
    }
}

#[test]
fn test_load_rgba_ignores_alpha() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("normal.png");

    let mut img = RgbaImage::new(2, 2);
    img.put_pixel(0, 0, Rgba([128, 64, 255, 10]));
    img.put_pixel(1, 0, Rgba([0, 255, 255, 200]));
    img.put_pixel(0, 1, Rgba([255, 0, 255, 0]));
    img.put_pixel(1, 1, Rgba([32, 16, 255, 255]));
    img.save(&path).unwrap();

    let map = load_normal_map(&path).unwrap();
    assert_eq!((map.height(), map.width()), (2, 2));
    assert!((map.red.data[[0, 0]] - 128.0 / 255.0).abs() < 1e-6);
    assert!((map.green.data[[0, 1]] - 255.0 / 255.0).abs() < 1e-6);
}

#[test]
fn test_load_grayscale_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gray.png");
    GrayImage::from_pixel(4, 4, Luma([90])).save(&path).unwrap();

    let result = load_normal_map(&path);
    assert!(matches!(
        result,
        Err(ReliefError::ChannelCount { channels: 1 })
    ));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let result = load_normal_map(std::path::Path::new("/nonexistent/normal.png"));
    assert!(matches!(result, Err(ReliefError::Io(_))));
}

// ---------------------------------------------------------------------------
// save_png / save_tiff / save_height_map
// ---------------------------------------------------------------------------

#[test]
fn test_save_png_8bit_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("height.png");
    let frame = make_ramp_frame(4, 4, 8);

    save_png(&frame, &path).unwrap();

    let img = image::open(&path).unwrap().to_luma8();
    assert_eq!(img.dimensions(), (4, 4));
    for r in 0..4usize {
        for c in 0..4usize {
            let expected = (frame.data[[r, c]].clamp(0.0, 1.0) * 255.0) as u8;
            assert_eq!(img.get_pixel(c as u32, r as u32)[0], expected);
        }
    }
}

#[test]
fn test_save_png_keeps_16bit_precision() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("height.png");
    let frame = make_ramp_frame(4, 6, 16);

    save_png(&frame, &path).unwrap();

    let img = image::open(&path).unwrap();
    assert!(matches!(img, DynamicImage::ImageLuma16(_)));
    let gray = img.to_luma16();
    assert_eq!(gray.dimensions(), (6, 4));
    for r in 0..4usize {
        for c in 0..6usize {
            let expected = (frame.data[[r, c]].clamp(0.0, 1.0) * 65535.0) as u16;
            assert_eq!(gray.get_pixel(c as u32, r as u32)[0], expected);
        }
    }
}

#[test]
fn test_save_tiff_is_16bit() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("height.tiff");
    let frame = make_ramp_frame(3, 5, 8);

    save_tiff(&frame, &path).unwrap();

    let img = image::open(&path).unwrap();
    assert_eq!((img.width(), img.height()), (5, 3));
    assert!(matches!(img, DynamicImage::ImageLuma16(_)));
}

#[test]
fn test_save_height_map_dispatches_on_extension() {
    let dir = TempDir::new().unwrap();
    let frame = make_ramp_frame(4, 4, 8);

    let png_path = dir.path().join("out.png");
    save_height_map(&frame, &png_path).unwrap();
    assert!(matches!(
        image::open(&png_path).unwrap(),
        DynamicImage::ImageLuma8(_)
    ));

    let tiff_path = dir.path().join("out.tif");
    save_height_map(&frame, &tiff_path).unwrap();
    assert!(matches!(
        image::open(&tiff_path).unwrap(),
        DynamicImage::ImageLuma16(_)
    ));
}

// ---------------------------------------------------------------------------
// probe
// ---------------------------------------------------------------------------

#[test]
fn test_probe_reports_color_channels_without_alpha() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("normal.png");
    RgbaImage::from_pixel(7, 5, Rgba([10, 20, 30, 40]))
        .save(&path)
        .unwrap();

    let info = probe(&path).unwrap();
    assert_eq!((info.width, info.height), (7, 5));
    assert_eq!(info.color_channels, 3);
    assert_eq!(info.bit_depth, 8);
}

#[test]
fn test_probe_reports_16bit_depth() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gray16.png");
    let img = image::ImageBuffer::<Luma<u16>, Vec<u16>>::from_pixel(2, 2, Luma([40000]));
    img.save(&path).unwrap();

    let info = probe(&path).unwrap();
    assert_eq!(info.color_channels, 1);
    assert_eq!(info.bit_depth, 16);
}
