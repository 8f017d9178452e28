//! Logo sampling.
//!
//! The logo is drawn into a transparent `logo_size` square at
//! `logo_scale`, centered, and then scanned on a fixed stride (every
//! `row_stride`-th row, every `column_stride`-th column). Each pixel whose
//! alpha exceeds the threshold becomes one [`Sample`], placed so the square
//! is centered on the canvas and tinted by the logo color.

use std::path::Path;

use image::{imageops, RgbaImage};

use crate::config::FieldConfig;
use crate::error::SampleError;
use crate::store::Sample;

/// Decode a logo file to RGBA.
pub fn load_logo<P: AsRef<Path>>(path: P) -> Result<RgbaImage, SampleError> {
    Ok(image::open(path.as_ref())?.into_rgba8())
}

/// Draw `logo` scaled into the configured square.
pub fn rasterize(logo: &RgbaImage, config: &FieldConfig) -> Result<RgbaImage, SampleError> {
    let size = config.logo_size;
    if size == 0 {
        return Err(SampleError::ZeroSize);
    }

    let mut square = RgbaImage::new(size, size);
    let inner = size as f32 * config.logo_scale;
    let inner_px = (inner.round() as u32).min(size);
    if inner_px == 0 || logo.width() == 0 || logo.height() == 0 {
        return Ok(square);
    }

    let scaled = imageops::resize(logo, inner_px, inner_px, imageops::FilterType::Triangle);
    // Nearest whole pixel to the exact inset.
    let offset = ((size as f32 - inner) / 2.0).round() as i64;
    imageops::overlay(&mut square, &scaled, offset, offset);
    Ok(square)
}

/// Scan a rasterized square and place samples on a `canvas_width` x
/// `canvas_height` canvas (device pixels).
pub fn sample_square(square: &RgbaImage, config: &FieldConfig, canvas_width: u32, canvas_height: u32) -> Vec<Sample> {
    let center_x = canvas_width as f32 / 2.0;
    let center_y = canvas_height as f32 / 2.0;
    let half = config.logo_size as f32 / 2.0;
    let tint = config.logo_color;

    let rows = square.height().min(config.logo_size);
    let columns = square.width().min(config.logo_size);

    let mut samples = Vec::new();
    for row in (0..rows).step_by(config.row_stride.max(1) as usize) {
        for column in (0..columns).step_by(config.column_stride.max(1) as usize) {
            let [r, g, b, a] = square.get_pixel(column, row).0;
            if a <= config.alpha_threshold {
                continue;
            }

            samples.push(Sample::new(
                center_x + (column as f32 - half),
                center_y + (row as f32 - half),
                r as f32 / 255.0 * tint.r,
                g as f32 / 255.0 * tint.g,
                b as f32 / 255.0 * tint.b,
                a as f32 / 255.0,
            ));
        }
    }
    samples
}

/// Load, rasterize and sample a logo file in one go.
pub fn sample_logo<P: AsRef<Path>>(
    path: P,
    config: &FieldConfig,
    canvas_width: u32,
    canvas_height: u32,
) -> Result<Vec<Sample>, SampleError> {
    let logo = load_logo(path)?;
    let square = rasterize(&logo, config)?;
    let samples = sample_square(&square, config, canvas_width, canvas_height);
    tracing::info!(
        particles = samples.len(),
        logo_size = config.logo_size,
        "sampled logo"
    );
    Ok(samples)
}
