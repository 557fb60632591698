//! Raster surface abstraction for 2D pixel access.
//!
//! The drawing routines only ever talk to a surface through the
//! [`RasterSurface`] trait. [`Surface`] is the owned implementation used by the
//! engine, the demo window and the tests; it also knows how to move pixels in
//! and out of the `image` crate.

use std::path::Path;

use image::{DynamicImage, Rgba, RgbaImage};
use thiserror::Error;

use crate::colors::{self, Color};

/// Errors raised when moving pixels between a surface and an image file.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("image i/o failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("buffer holds {actual} pixels, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// A fixed-size 2D grid of colors, addressed by `(x, y)` with the origin at
/// the top-left pixel.
pub trait RasterSurface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Color at `(x, y)`, or `None` when outside the surface.
    fn get_pixel(&self, x: i32, y: i32) -> Option<Color>;

    /// Writes `(x, y)`. Coordinates outside the surface are ignored.
    fn set_pixel(&mut self, x: i32, y: i32, color: Color);

    #[inline]
    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as i64) < self.width() as i64 && (y as i64) < self.height() as i64
    }
}

/// An owned row-major color buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    color_buffer: Vec<Color>,
    width: u32,
    height: u32,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, colors::BLACK)
    }

    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            color_buffer: vec![color; size],
            width,
            height,
        }
    }

    /// Wraps an existing row-major buffer.
    pub fn from_buffer(width: u32, height: u32, buffer: Vec<Color>) -> Result<Self, SurfaceError> {
        let expected = (width as usize) * (height as usize);
        if buffer.len() != expected {
            return Err(SurfaceError::SizeMismatch {
                expected,
                actual: buffer.len(),
            });
        }
        Ok(Self {
            color_buffer: buffer,
            width,
            height,
        })
    }

    pub fn clear(&mut self, color: Color) {
        self.color_buffer.fill(color);
    }

    pub fn pixels(&self) -> &[Color] {
        &self.color_buffer
    }

    /// Number of pixels holding exactly `color`.
    pub fn count(&self, color: Color) -> usize {
        self.color_buffer.iter().filter(|&&c| c == color).count()
    }

    /// Pixel data as native-endian ARGB8888 bytes, ready for a streaming
    /// texture upload.
    pub fn to_argb_bytes(&self) -> Vec<u8> {
        self.color_buffer
            .iter()
            .flat_map(|c| c.to_ne_bytes())
            .collect()
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let color = self.color_buffer[self.index(x, y)];
            let (r, g, b) = colors::unpack_color(color);
            Rgba([r, g, b, (color >> 24) as u8])
        })
    }

    pub fn from_image(image: &DynamicImage) -> Self {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        let color_buffer = rgba
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
            })
            .collect();
        Self {
            color_buffer,
            width,
            height,
        }
    }

    /// Loads any format the `image` crate can decode.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SurfaceError> {
        Ok(Self::from_image(&image::open(path)?))
    }

    /// Saves the surface; the format follows the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SurfaceError> {
        self.to_rgba_image().save(path)?;
        Ok(())
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl RasterSurface for Surface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        if self.contains(x, y) {
            Some(self.color_buffer[self.index(x as u32, y as u32)])
        } else {
            None
        }
    }

    #[inline]
    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if self.contains(x, y) {
            let index = self.index(x as u32, y as u32);
            self.color_buffer[index] = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_enforced() {
        let mut s = Surface::new(4, 3);
        s.set_pixel(4, 0, colors::WHITE);
        s.set_pixel(-1, 0, colors::WHITE);
        s.set_pixel(0, 3, colors::WHITE);
        assert_eq!(s.count(colors::WHITE), 0);
        assert_eq!(s.get_pixel(4, 0), None);

        s.set_pixel(3, 2, colors::WHITE);
        assert_eq!(s.get_pixel(3, 2), Some(colors::WHITE));
    }

    #[test]
    fn test_from_buffer_checks_size() {
        assert!(matches!(
            Surface::from_buffer(2, 2, vec![0; 3]),
            Err(SurfaceError::SizeMismatch { expected: 4, actual: 3 })
        ));
        assert!(Surface::from_buffer(2, 2, vec![0; 4]).is_ok());
    }

    #[test]
    fn test_image_conversion_preserves_pixels() {
        let mut s = Surface::new(3, 2);
        s.set_pixel(2, 1, colors::pack_color(1, 2, 3));
        let image = DynamicImage::ImageRgba8(s.to_rgba_image());
        assert_eq!(Surface::from_image(&image), s);
    }
}
