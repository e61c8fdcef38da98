// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! Measuring and drawing single lines of text onto an image.
pub mod builtin;

use crate::error::{Error, Result};
use crate::file_io::read_bytes;
use ab_glyph::{Font as _, FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::{Path, PathBuf};

/// System fonts to try, in order, before falling back to the built-in face.
pub const DEFAULT_FONT_CANDIDATES: [&str; 4] = [
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
];

pub fn default_font_candidates() -> Vec<PathBuf> {
    DEFAULT_FONT_CANDIDATES.iter().map(PathBuf::from).collect()
}

/// A typeface sized in pixels per em.
pub enum TextFace {
    Truetype { font: FontVec, path: PathBuf },
    Builtin,
}

impl TextFace {
    /// Loads a TrueType/OpenType font, or the first face of a collection.
    pub async fn load(path: &Path) -> Result<Self> {
        let bytes = read_bytes(path).await?;
        let font = FontVec::try_from_vec_and_index(bytes, 0).map_err(|e| Error::InvalidFont {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self::Truetype {
            font,
            path: path.to_path_buf(),
        })
    }

    /// Returns the first candidate that exists and parses, else `Builtin`.
    pub async fn load_first_available(candidates: &[PathBuf]) -> Self {
        for path in candidates {
            if !tokio::fs::try_exists(path).await.unwrap_or(false) {
                continue;
            }
            match Self::load(path).await {
                Ok(face) => {
                    log::info!("✓ Using font: {}", path.display());
                    return face;
                }
                Err(e) => log::debug!("Skipping font: {e}"),
            }
        }

        log::warn!("⚠ Could not load system fonts, using basic rendering");
        Self::Builtin
    }

    pub fn source(&self) -> Option<&Path> {
        match self {
            Self::Truetype { path, .. } => Some(path),
            Self::Builtin => None,
        }
    }

    /// Width and height of `text` when drawn at `size`.
    pub fn measure(&self, text: &str, size: f32) -> (u32, u32) {
        match self {
            Self::Truetype { font, .. } => text_size(em_scale(font, size), font, text),
            Self::Builtin => builtin::measure(text, size),
        }
    }

    /// Draws `text` with its top-left corner at (`x`, `y`).
    pub fn draw(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        (x, y): (i32, i32),
        size: f32,
        colour: Rgba<u8>,
    ) {
        match self {
            Self::Truetype { font, .. } => {
                draw_text_mut(canvas, colour, x, y, em_scale(font, size), font, text);
            }
            Self::Builtin => builtin::draw(canvas, text, x, y, size, colour),
        }
    }
}

/// `ab_glyph` scales by ascent-to-descent height; convert from an em size.
fn em_scale(font: &FontVec, size: f32) -> PxScale {
    match font.units_per_em() {
        Some(units_per_em) if units_per_em > 0.0 => {
            PxScale::from(size * font.height_unscaled() / units_per_em)
        }
        _ => PxScale::from(size),
    }
}
