use std::path::Path;

use image::{GrayImage, ImageFormat, ImageReader, Luma};
use ndarray::Array2;

use crate::error::{ReliefError, Result};
use crate::frame::{Frame, NormalMap};

/// Basic metadata of an image file.
#[derive(Clone, Debug)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Color channels, alpha excluded.
    pub color_channels: usize,
    /// Bits per channel (8 or 16).
    pub bit_depth: u8,
}

fn color_channels(color: image::ColorType) -> usize {
    let alpha = usize::from(color.has_alpha());
    color.channel_count() as usize - alpha
}

fn bit_depth(color: image::ColorType) -> u8 {
    let per_channel = color.bytes_per_pixel() / color.channel_count();
    per_channel * 8
}

/// Read image metadata without keeping the pixel data around.
pub fn probe(path: &Path) -> Result<ImageInfo> {
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    let color = img.color();
    Ok(ImageInfo {
        width: img.width(),
        height: img.height(),
        color_channels: color_channels(color),
        bit_depth: bit_depth(color),
    })
}

/// Load a normal map, keeping the red (x) and green (y) component planes.
///
/// Grayscale sources are rejected: one color channel cannot carry a
/// two-component orientation vector.
pub fn load_normal_map(path: &Path) -> Result<NormalMap> {
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    let color = img.color();

    let channels = color_channels(color);
    if channels < 2 {
        return Err(ReliefError::ChannelCount { channels });
    }
    let depth = bit_depth(color);

    let rgb = img.into_rgb32f();
    let w = rgb.width() as usize;
    let h = rgb.height() as usize;

    let mut red = Array2::<f32>::zeros((h, w));
    let mut green = Array2::<f32>::zeros((h, w));
    for (x, y, px) in rgb.enumerate_pixels() {
        red[[y as usize, x as usize]] = px[0];
        green[[y as usize, x as usize]] = px[1];
    }

    NormalMap::new(Frame::new(red, depth), Frame::new(green, depth))
}

/// Save a height frame as grayscale PNG, 8- or 16-bit per the source depth.
pub fn save_png(frame: &Frame, path: &Path) -> Result<()> {
    let h = frame.height();
    let w = frame.width();

    if frame.original_bit_depth > 8 {
        let mut pixels: Vec<u16> = Vec::with_capacity(h * w);
        for row in 0..h {
            for col in 0..w {
                let val = (frame.data[[row, col]].clamp(0.0, 1.0) * 65535.0) as u16;
                pixels.push(val);
            }
        }
        let img = image::ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(w as u32, h as u32, pixels)
            .expect("buffer size matches dimensions");
        img.save_with_format(path, ImageFormat::Png)?;
    } else {
        let mut img = GrayImage::new(w as u32, h as u32);
        for row in 0..h {
            for col in 0..w {
                let val = (frame.data[[row, col]].clamp(0.0, 1.0) * 255.0) as u8;
                img.put_pixel(col as u32, row as u32, Luma([val]));
            }
        }
        img.save_with_format(path, ImageFormat::Png)?;
    }

    Ok(())
}

/// Save a height frame as 16-bit grayscale TIFF.
pub fn save_tiff(frame: &Frame, path: &Path) -> Result<()> {
    let h = frame.height();
    let w = frame.width();

    let mut pixels: Vec<u16> = Vec::with_capacity(h * w);
    for row in 0..h {
        for col in 0..w {
            let val = (frame.data[[row, col]].clamp(0.0, 1.0) * 65535.0) as u16;
            pixels.push(val);
        }
    }

    let img = image::ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(w as u32, h as u32, pixels)
        .expect("buffer size matches dimensions");
    img.save(path)?;
    Ok(())
}

/// Save a height frame, choosing the format from the file extension.
pub fn save_height_map(frame: &Frame, path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("tiff" | "tif") => save_tiff(frame, path),
        _ => save_png(frame, path),
    }
}
