use crate::colors::load_palette;
use crate::constants::{CONFIG_DIR, DEFAULT_PALETTE, STICKER_SETS, VERSION};
use crate::types::{AppConfig, StickerSet};

use clap::{Arg, ArgMatches, Command};
use config::builder::DefaultState;
use config::{ConfigBuilder, File};
use serde_derive::Deserialize;
use std::path::{Path, PathBuf};

pub type AppError = anyhow::Error;

#[derive(Debug, Deserialize)]
struct SerializedAppConfig {
    root: Option<String>,
    palette: String,
    optimize: bool,
    sticker_sets: Option<Vec<SerializedStickerSet>>,
}

#[derive(Debug, Deserialize)]
struct SerializedStickerSet {
    dir: String,
    indices: Vec<u32>,
}

fn load_config(
    config_path: Option<&str>,
    config_dir: &Path,
) -> Result<SerializedAppConfig, config::ConfigError> {
    let mut builder = ConfigBuilder::<DefaultState>::default();

    builder = builder
        .set_default("palette", DEFAULT_PALETTE)?
        .set_default("optimize", true)?;

    let default_config_path = config_dir.join("config.toml");

    if default_config_path.exists() {
        builder = builder.add_source(File::from(default_config_path).required(false));
    }

    if let Some(path) = config_path {
        builder = builder.add_source(File::with_name(path).required(true));
    }

    let config = builder.build()?;

    config.try_deserialize()
}

fn default_sticker_sets() -> Vec<StickerSet> {
    STICKER_SETS
        .iter()
        .map(|(dir, indices)| StickerSet {
            dir: PathBuf::from(dir),
            indices: indices.to_vec(),
        })
        .collect()
}

/// The web project this tool ships with; sources live under `public/`.
fn default_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn resolve_root(root: &str) -> PathBuf {
    let root = PathBuf::from(root);
    if root.is_absolute() {
        root
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(root)
    }
}

pub fn cli() -> Command<'static> {
    Command::new("Sticker Colorizer")
        .version(VERSION)
        .author("Taylor Beeston")
        .about("Generates color-tinted variants of grayscale stickers")
        .after_help("With no arguments every sticker set under the project root is rendered in every color of the 'configurator' palette.\n\nConfig is a TOML file that may set 'root', 'palette', 'optimize' and a list of 'sticker_sets' ({ dir, indices }). A palette other than 'configurator' should be a TOML file (minus the extension) in ~/.config/sticker-colorizer containing [[colors]] tables with a 'name' and a 'hex'.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("/path/to/config.toml")
                .help("Sets a custom config file")
                .takes_value(true),
        )
        .arg(
            Arg::new("root")
                .short('r')
                .long("root")
                .value_name("DIR")
                .help("Overrides the project root the sticker sets are relative to")
                .takes_value(true),
        )
        .arg(
            Arg::new("palette")
                .short('p')
                .long("palette")
                .value_name("NAME")
                .help("Overrides the palette set in config")
                .takes_value(true),
        )
        .arg(
            Arg::new("no-optimize")
                .long("no-optimize")
                .help("Writes PNGs with default compression instead of the smallest output"),
        )
}

fn build(
    matches: &ArgMatches,
    config: SerializedAppConfig,
    config_dir: &Path,
) -> Result<AppConfig, AppError> {
    let root = matches
        .value_of("root")
        .map(str::to_string)
        .or(config.root)
        .map(|root| resolve_root(&root))
        .unwrap_or_else(default_root);

    let palette_name = matches
        .value_of("palette")
        .unwrap_or(&config.palette)
        .to_string();
    let palette = load_palette(&palette_name, config_dir)?;

    let sticker_sets = match config.sticker_sets {
        Some(sets) => sets
            .into_iter()
            .map(|set| StickerSet {
                dir: PathBuf::from(set.dir),
                indices: set.indices,
            })
            .collect(),
        None => default_sticker_sets(),
    };

    let optimize = config.optimize && !matches.is_present("no-optimize");

    Ok(AppConfig {
        root,
        palette_name,
        palette,
        sticker_sets,
        optimize,
    })
}

pub fn init() -> Result<AppConfig, AppError> {
    let matches = cli().get_matches();

    let config_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from(""))
        .join(CONFIG_DIR);

    let config = load_config(matches.value_of("config"), &config_dir)?;

    build(&matches, config, &config_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette::Srgb;
    use std::fs;

    fn init_from(args: &[&str], config_dir: &Path) -> Result<AppConfig, AppError> {
        let matches = cli().try_get_matches_from(args)?;
        let config = load_config(matches.value_of("config"), config_dir)?;
        build(&matches, config, config_dir)
    }

    #[test]
    fn test_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = init_from(&["sticker-colorizer"], dir.path()).unwrap();

        assert_eq!(config.root, default_root());
        assert_eq!(config.palette_name, "configurator");
        assert_eq!(config.palette.len(), 10);
        assert_eq!(config.palette[0].color, Srgb::<u8>::new(255, 0, 0));
        assert!(config.optimize);

        let dirs: Vec<_> = config.sticker_sets.iter().map(|s| s.dir.clone()).collect();
        assert_eq!(
            dirs,
            [
                "public/boat/left/group1",
                "public/boat/left/group2",
                "public/boat/top",
                "public/boat/back"
            ]
            .map(PathBuf::from)
        );
        assert_eq!(config.sticker_sets[0].indices, vec![1, 2, 3, 4, 5, 6, 7, 9, 10, 11]);
        assert_eq!(config.sticker_sets[2].indices.len(), 15);
        assert!(!config.sticker_sets[2].indices.contains(&8));
        assert_eq!(config.sticker_sets[3].indices, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_config_file_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("custom.toml");
        fs::write(
            &config_path,
            "root = \"/srv/site\"\noptimize = false\n\n[[sticker_sets]]\ndir = \"public/boat/side\"\nindices = [3, 1]\n",
        )
        .unwrap();

        let config = init_from(
            &["sticker-colorizer", "--config", config_path.to_str().unwrap()],
            dir.path(),
        )
        .unwrap();

        assert_eq!(config.root, PathBuf::from("/srv/site"));
        assert!(!config.optimize);
        assert_eq!(
            config.sticker_sets,
            vec![StickerSet {
                dir: PathBuf::from("public/boat/side"),
                indices: vec![3, 1],
            }]
        );
    }

    #[test]
    fn test_user_config_and_flags() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), "palette = \"mono\"\n").unwrap();
        fs::write(
            dir.path().join("mono.toml"),
            "[[colors]]\nname = \"gray\"\nhex = \"#808080\"\n",
        )
        .unwrap();

        let config = init_from(&["sticker-colorizer"], dir.path()).unwrap();
        assert_eq!(config.palette_name, "mono");
        assert_eq!(config.palette[0].name, "gray");

        let config = init_from(
            &[
                "sticker-colorizer",
                "--palette",
                "configurator",
                "--root",
                "/tmp/site",
                "--no-optimize",
            ],
            dir.path(),
        )
        .unwrap();
        assert_eq!(config.palette_name, "configurator");
        assert_eq!(config.palette.len(), 10);
        assert_eq!(config.root, PathBuf::from("/tmp/site"));
        assert!(!config.optimize);
    }

    #[test]
    fn test_unknown_palette_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(init_from(&["sticker-colorizer", "-p", "sunset"], dir.path()).is_err());
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(init_from(
            &["sticker-colorizer", "-c", missing.to_str().unwrap()],
            dir.path()
        )
        .is_err());
    }
}
