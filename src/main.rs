mod batch;
mod colorize;
mod colors;
mod config;
mod constants;
mod types;
mod utils;

use crate::config::{init, AppError};

use std::io::Write;

use env_logger::{Env, Target};
use indicatif::MultiProgress;
use log::{info, warn};

fn init_logger() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stdout)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

fn main() -> Result<(), AppError> {
    init_logger();

    let config = init()?;
    info!(
        "Colorizing stickers under {} with the '{}' palette ({} colors)",
        config.root.display(),
        config.palette_name,
        config.palette.len()
    );

    let multi_progress = MultiProgress::new();
    let report = batch::run(&config, &multi_progress)?;

    info!("Done! {} colored stickers generated.", report.written);

    if !report.missing.is_empty() || !report.failed.is_empty() {
        warn!(
            "Skipped {} missing and {} unreadable stickers:",
            report.missing.len(),
            report.failed.len()
        );
        for path in report.missing.iter().chain(&report.failed) {
            warn!(" - {}", path.display());
        }
    }

    Ok(())
}
