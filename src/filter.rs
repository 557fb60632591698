//! Sobel edge detection.
//!
//! Each pixel is reduced to the mean of its RGB channels, then the 3x3 Sobel
//! kernels are applied:
//!
//! ```text
//!        -1 -2 -1            -1  0  1
//! G_y =   0  0  0     G_x = -2  0  2
//!         1  2  1            -1  0  1
//! ```
//!
//! The output pixel is the gray level `round(sqrt(G_x² + G_y²))`, saturated at
//! 255. The one-pixel border has no full neighborhood and is left black.

use std::path::Path;

use crate::colors;
use crate::render::{RasterSurface, Surface, SurfaceError};

pub fn sobel<S: RasterSurface + ?Sized>(source: &S) -> Surface {
    let width = source.width();
    let height = source.height();
    let mut out = Surface::new(width, height);

    let lum = |x: i32, y: i32| source.get_pixel(x, y).map(colors::intensity).unwrap_or(0.0);

    for y in 1..height as i32 - 1 {
        for x in 1..width as i32 - 1 {
            let (z1, z2, z3) = (lum(x - 1, y - 1), lum(x, y - 1), lum(x + 1, y - 1));
            let (z4, z6) = (lum(x - 1, y), lum(x + 1, y));
            let (z7, z8, z9) = (lum(x - 1, y + 1), lum(x, y + 1), lum(x + 1, y + 1));

            let g_y = (z7 + 2.0 * z8 + z9) - (z1 + 2.0 * z2 + z3);
            let g_x = (z3 + 2.0 * z6 + z9) - (z1 + 2.0 * z4 + z7);
            let magnitude = (g_x * g_x + g_y * g_y).sqrt().round().min(255.0);

            out.set_pixel(x, y, colors::gray(magnitude as u8));
        }
    }

    out
}

/// Runs [`sobel`] over an image file and writes the result to `output`.
pub fn sobel_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<(), SurfaceError> {
    let source = Surface::open(input)?;
    sobel(&source).save(output)
}
