pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_PALETTE: &str = "configurator";

pub const CONFIG_DIR: &str = ".config/sticker-colorizer";

pub const STICKER_SETS: [(&str, &[u32]); 4] = [
    ("public/boat/left/group1", &[1, 2, 3, 4, 5, 6, 7, 9, 10, 11]),
    ("public/boat/left/group2", &[1, 2, 3, 4, 5, 6, 7, 8, 9]),
    (
        "public/boat/top",
        &[1, 2, 3, 4, 5, 6, 7, 9, 10, 11, 12, 13, 14, 15, 16],
    ),
    ("public/boat/back", &[1, 2, 3, 4, 5, 6]),
];
