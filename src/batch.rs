use crate::colorize::colorize;
use crate::config::AppError;
use crate::types::{AppConfig, BatchReport, PaletteEntry};
use crate::utils::{open_image, save_png, sticker_file_name, variant_path};

use std::fs;
use std::path::Path;

use anyhow::Context;
use image::RgbaImage;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{error, info, warn};
use rayon::prelude::*;

/// Renders every sticker of every set in every palette color.
///
/// Missing or unreadable sources are logged and skipped. Any other failure aborts
/// the run, leaving the variants written so far on disk.
pub fn run(config: &AppConfig, multi_progress: &MultiProgress) -> Result<BatchReport, AppError> {
    let mut report = BatchReport::default();

    for set in &config.sticker_sets {
        let set_dir = config.root.join(&set.dir);

        let pb = multi_progress.add(ProgressBar::new(
            (set.indices.len() * config.palette.len()) as u64,
        ));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message(set.dir.display().to_string());
        pb.suspend(|| info!("Processing {}...", set.dir.display()));

        for &index in &set.indices {
            process_sticker(&set_dir, index, config, &pb, &mut report)?;
            pb.inc(config.palette.len() as u64);
        }

        pb.finish_with_message(format!("Finished: {}", set.dir.display()));
    }

    Ok(report)
}

pub fn process_sticker(
    set_dir: &Path,
    index: u32,
    config: &AppConfig,
    pb: &ProgressBar,
    report: &mut BatchReport,
) -> Result<(), AppError> {
    let source_path = set_dir.join(sticker_file_name(index));

    if !source_path.exists() {
        pb.suspend(|| warn!("{} not found", source_path.display()));
        report.missing.push(source_path);
        return Ok(());
    }

    pb.suspend(|| info!("Processing {}", sticker_file_name(index)));

    let img = match open_image(&source_path) {
        Ok(img) => img.to_rgba8(),
        Err(e) => {
            pb.suspend(|| error!("Error opening {}: {}", source_path.display(), e));
            report.failed.push(source_path);
            return Ok(());
        }
    };

    let created = render_variants(&img, set_dir, index, &config.palette, config.optimize)?;

    pb.suspend(|| {
        for name in &created {
            info!("Created {}/{}", name, sticker_file_name(index));
        }
    });
    report.written += created.len();

    Ok(())
}

/// Results come back in palette order regardless of which variant finishes first.
fn render_variants<'a>(
    img: &RgbaImage,
    set_dir: &Path,
    index: u32,
    palette: &'a [PaletteEntry],
    optimize: bool,
) -> Result<Vec<&'a str>, AppError> {
    palette
        .par_iter()
        .map(|entry| -> Result<&'a str, AppError> {
            let output_path = variant_path(set_dir, &entry.name, index);
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }

            let colored = colorize(img, entry.color);
            save_png(&colored, &output_path, optimize)?;

            Ok(entry.name.as_str())
        })
        .collect()
}
