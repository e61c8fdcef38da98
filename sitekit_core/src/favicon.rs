// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! Downscales the large site icon into the 48x48 favicon search engines ask for.
use crate::error::Result;
use crate::file_io::{read_bytes, write_to_all};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

pub const FAVICON_SIZE: u32 = 48;

/// Fits `source` inside a `size`x`size` square, centred on transparency.
pub fn fit_square(source: &DynamicImage, size: u32) -> RgbaImage {
    // `resize` keeps the aspect ratio.
    let scaled = source.resize(size, size, FilterType::Lanczos3).to_rgba8();

    let mut canvas = RgbaImage::new(size, size);
    let x = (size - scaled.width()) / 2;
    let y = (size - scaled.height()) / 2;
    imageops::overlay(&mut canvas, &scaled, x.into(), y.into());
    canvas
}

pub async fn generate_favicon(source: &Path, size: u32, outputs: &[PathBuf]) -> Result<RgbaImage> {
    log::info!("Generating {size}x{size} favicon from {}", source.display());

    let bytes = read_bytes(source).await?;
    let icon = fit_square(&image::load_from_memory(&bytes)?, size);

    let mut png = Vec::new();
    icon.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    write_to_all(outputs, &png).await?;

    log::info!("✅ Favicon generated");
    Ok(icon)
}
