use crate::types::PaletteEntry;
use crate::utils::hex_to_rgb;

use crate::constants::DEFAULT_PALETTE;

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path};

use anyhow::{bail, Context, Result};
use serde_derive::Deserialize;

/// Sticker colors offered by the boat configurator.
pub const CONFIGURATOR: [(&str, &str); 10] = [
    ("red", "#FF0000"),
    ("orange", "#FF6B00"),
    ("yellow", "#FFD700"),
    ("green", "#00CC00"),
    ("cyan", "#00CCCC"),
    ("blue", "#0066FF"),
    ("purple", "#9900FF"),
    ("pink", "#FF00CC"),
    ("white", "#FFFFFF"),
    ("black", "#333333"),
];

#[derive(Debug, Deserialize)]
struct PaletteFile {
    colors: Vec<SerializedColor>,
}

#[derive(Debug, Deserialize)]
struct SerializedColor {
    name: String,
    hex: String,
}

/// Color names become output directories, so each must be a single plain path segment.
fn check_color_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(segment)), None) if segment == name => Ok(()),
        _ => bail!("Color name '{}' must be a single directory name", name),
    }
}

fn parse_entries<'a>(
    colors: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Result<Vec<PaletteEntry>> {
    let mut seen = HashSet::new();
    colors
        .into_iter()
        .map(|(name, hex)| -> Result<PaletteEntry> {
            check_color_name(name)?;
            if !seen.insert(name) {
                bail!("Color name '{}' appears more than once", name);
            }
            let color = hex_to_rgb(hex).with_context(|| format!("Invalid color '{}'", name))?;
            Ok(PaletteEntry {
                name: name.to_string(),
                color,
            })
        })
        .collect()
}

/// Resolves a palette by name. `<name>.toml` in `config_dir` wins over the built-in palette.
pub fn load_palette(name: &str, config_dir: &Path) -> Result<Vec<PaletteEntry>> {
    let palette_path = config_dir.join(format!("{}.toml", name));
    let entries = if palette_path.exists() {
        let palette_str = fs::read_to_string(&palette_path)
            .with_context(|| format!("Failed to read {}", palette_path.display()))?;
        let palette: PaletteFile = toml::from_str(&palette_str)
            .with_context(|| format!("Failed to parse {}", palette_path.display()))?;
        parse_entries(
            palette
                .colors
                .iter()
                .map(|c| (c.name.as_str(), c.hex.as_str())),
        )?
    } else if name == DEFAULT_PALETTE {
        parse_entries(CONFIGURATOR)?
    } else {
        bail!("Palette '{}' not found", name);
    };

    if entries.is_empty() {
        bail!("Palette '{}' has no colors", name);
    }

    Ok(entries)
}
