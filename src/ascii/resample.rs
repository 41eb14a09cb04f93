//! Resampling decoded images onto the output grid.

use image::imageops::{self, FilterType};
use image::DynamicImage;
use serde::Serialize;

/// RGB color of one output cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CellColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// RGBA samples on the output grid, row-major, four bytes per pixel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes.
    ///
    /// Returns `None` if `data.len() != width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }
        Some(Self {
            data,
            width,
            height,
        })
    }

    /// A buffer where every pixel is `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(pixel_count * 4);
        for _ in 0..pixel_count {
            data.extend_from_slice(&rgba);
        }
        Self {
            data,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len() / 4
    }

    /// Color of the pixel at row-major index `i`, alpha dropped.
    #[inline]
    pub fn color(&self, i: usize) -> CellColor {
        let idx = i * 4;
        CellColor {
            r: self.data[idx],
            g: self.data[idx + 1],
            b: self.data[idx + 2],
        }
    }
}

/// Resize a decoded image to exactly `width` x `height` RGBA samples.
///
/// Uses bilinear filtering, so the result is deterministic for identical
/// inputs.
pub fn resample(image: &DynamicImage, width: u32, height: u32) -> PixelBuffer {
    let rgba = image.to_rgba8();
    let resized = if rgba.dimensions() == (width, height) {
        rgba
    } else {
        imageops::resize(&rgba, width, height, FilterType::Triangle)
    };
    PixelBuffer {
        width,
        height,
        data: resized.into_raw(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_from_rgba_checks_length() {
        assert!(PixelBuffer::from_rgba(2, 2, vec![0; 16]).is_some());
        assert!(PixelBuffer::from_rgba(2, 2, vec![0; 15]).is_none());
    }

    #[test]
    fn test_resample_exact_size() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(40, 20, Rgba([10, 20, 30, 255])));
        let pixels = resample(&img, 7, 3);
        assert_eq!(pixels.width(), 7);
        assert_eq!(pixels.height(), 3);
        assert_eq!(pixels.data().len(), 7 * 3 * 4);
        assert_eq!(pixels.color(5), CellColor { r: 10, g: 20, b: 30 });
    }

    #[test]
    fn test_resample_same_size_is_copy() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 0, 255, 255]));
        let pixels = resample(&DynamicImage::ImageRgba8(img), 2, 1);
        assert_eq!(pixels.data(), &[255, 0, 0, 255, 0, 0, 255, 255]);
    }

    #[test]
    fn test_resample_deterministic() {
        let mut img = RgbaImage::new(16, 16);
        for (x, y, p) in img.enumerate_pixels_mut() {
            *p = Rgba([(x * 16) as u8, (y * 16) as u8, 128, 255]);
        }
        let img = DynamicImage::ImageRgba8(img);
        assert_eq!(resample(&img, 5, 5), resample(&img, 5, 5));
    }

    #[test]
    fn test_filled() {
        let pixels = PixelBuffer::filled(3, 2, [1, 2, 3, 4]);
        assert_eq!(pixels.pixel_count(), 6);
        assert_eq!(&pixels.data()[20..24], &[1, 2, 3, 4]);
    }
}
