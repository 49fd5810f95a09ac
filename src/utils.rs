use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::io::Reader;
use image::{ColorType, DynamicImage, ImageEncoder, RgbaImage};
use palette::Srgb;

/// Parses `#RRGGBB` or `RRGGBB`.
pub fn hex_to_rgb(hex: &str) -> Result<Srgb<u8>> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("Hex color must be 6 characters long, got '{}'", hex);
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16)
            .with_context(|| format!("Invalid hex color '{}'", hex))
    };

    Ok(Srgb::<u8>::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

pub fn sticker_file_name(index: u32) -> String {
    format!("sticker-{}.png", index)
}

/// `{set_dir}/{color}/sticker-{index}.png`
pub fn variant_path(set_dir: &Path, color_name: &str, index: u32) -> PathBuf {
    set_dir.join(color_name).join(sticker_file_name(index))
}

/// Decodes by content rather than extension, so a misnamed source still opens.
pub fn open_image(path: &Path) -> Result<DynamicImage> {
    let img = Reader::open(path)?.with_guessed_format()?.decode()?;
    Ok(img)
}

pub fn save_png(img: &RgbaImage, path: &Path, optimize: bool) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    let compression = if optimize {
        CompressionType::Best
    } else {
        CompressionType::Default
    };
    let encoder =
        PngEncoder::new_with_quality(BufWriter::new(file), compression, FilterType::Adaptive);

    encoder
        .write_image(img.as_raw(), img.width(), img.height(), ColorType::Rgba8)
        .with_context(|| format!("Failed to encode {}", path.display()))
}
