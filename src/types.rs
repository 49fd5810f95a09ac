use palette::Srgb;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct PaletteEntry {
    pub name: String,
    pub color: Srgb<u8>,
}

/// A directory of `sticker-{n}.png` sources, relative to the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StickerSet {
    pub dir: PathBuf,
    pub indices: Vec<u32>,
}

#[derive(Debug)]
pub struct AppConfig {
    pub root: PathBuf,
    pub palette_name: String,
    pub palette: Vec<PaletteEntry>,
    pub sticker_sets: Vec<StickerSet>,
    pub optimize: bool,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: usize,
    pub missing: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}
