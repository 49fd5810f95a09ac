use image::{ImageBuffer, Rgba, RgbaImage};
use palette::Srgb;

/// Tints every pixel of `img` with `target`, scaled by the pixel's brightness.
/// Alpha is copied through untouched.
pub fn colorize(img: &RgbaImage, target: Srgb<u8>) -> RgbaImage {
    ImageBuffer::from_fn(img.width(), img.height(), |x, y| {
        tint_pixel(img.get_pixel(x, y), target)
    })
}

/// Unweighted channel average in `[0, 1]`. Not perceptual luminance; output parity
/// with the existing assets depends on this exact formula in `f32`.
pub fn brightness(pixel: &Rgba<u8>) -> f32 {
    (pixel[0] as f32 + pixel[1] as f32 + pixel[2] as f32) / 3.0 / 255.0
}

pub fn tint_pixel(pixel: &Rgba<u8>, target: Srgb<u8>) -> Rgba<u8> {
    let brightness = brightness(pixel);
    Rgba([
        tint_channel(target.red, brightness),
        tint_channel(target.green, brightness),
        tint_channel(target.blue, brightness),
        pixel[3],
    ])
}

// Float to int `as` casts truncate toward zero.
fn tint_channel(target: u8, brightness: f32) -> u8 {
    (target as f32 * brightness).clamp(0.0, 255.0) as u8
}
