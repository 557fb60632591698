//! Color constants and helpers.
//!
//! Colors are packed `u32` values in ARGB8888 layout, the same layout the
//! demo window streams to SDL.

/// A packed ARGB8888 color.
pub type Color = u32;

pub const BACKGROUND: Color = 0xFF1E1E1E;
pub const BLACK: Color = 0xFF000000;
pub const WHITE: Color = 0xFFFFFFFF;
pub const OUTLINE: Color = 0xFF808080;
pub const SEGMENT: Color = 0xFFFFD700;
pub const WIREFRAME: Color = 0xFF00FF7F;

/// Default face colors, cycled by face index when a mesh carries none.
pub const FACE_PALETTE: [Color; 6] = [
    0xFFE6194B, 0xFF3CB44B, 0xFF4363D8, 0xFFF58231, 0xFF911EB4, 0xFF42D4F4,
];

/// Packs 8-bit channels into an opaque ARGB color.
#[inline]
pub const fn pack_color(r: u8, g: u8, b: u8) -> Color {
    0xFF00_0000 | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Splits a color into its `(r, g, b)` channels. Alpha is dropped.
#[inline]
pub const fn unpack_color(color: Color) -> (u8, u8, u8) {
    (
        ((color >> 16) & 0xFF) as u8,
        ((color >> 8) & 0xFF) as u8,
        (color & 0xFF) as u8,
    )
}

/// An opaque gray with all channels set to `level`.
#[inline]
pub const fn gray(level: u8) -> Color {
    pack_color(level, level, level)
}

/// Mean of the three channels, used as the luminance of a pixel.
#[inline]
pub fn intensity(color: Color) -> f32 {
    let (r, g, b) = unpack_color(color);
    (r as f32 + g as f32 + b as f32) / 3.0
}

/// Scales every channel by `factor`, clamped to `[0, 1]`.
pub fn scale(color: Color, factor: f32) -> Color {
    let factor = factor.clamp(0.0, 1.0);
    let (r, g, b) = unpack_color(color);
    let channel = |c: u8| (c as f32 * factor).round() as u8;
    (color & 0xFF00_0000) | pack_color(channel(r), channel(g), channel(b)) & 0x00FF_FFFF
}
