// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! The Open Graph preview image shown when a site URL is shared.
use crate::error::Result;
use crate::file_io::write_to_all;
use crate::logo::LogoRasteriser;
use crate::text::{TextFace, default_font_candidates};
use crate::types::Rgb;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbImage, RgbaImage, imageops};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Standard OG image size.
pub const OG_WIDTH: u32 = 1200;
pub const OG_HEIGHT: u32 = 630;

const BRAND_CYAN: Rgb = Rgb::new(0x06, 0xb6, 0xd4);

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    /// Pixels per em.
    pub size: f32,
    /// Top edge of the text.
    pub top: i32,
    pub colour: Rgb,
}

/// Everything that decides what the image looks like.
#[derive(Debug, Clone, PartialEq)]
pub struct OgImageStyle {
    pub background: Rgb,
    /// Top edge of the logo, which is always centred horizontally.
    pub logo_top: i32,
    pub title: TextLine,
    pub tagline: TextLine,
    pub shadow: Rgb,
    pub shadow_offset: i32,
    pub accent: Rgb,
    pub accent_y: i32,
    pub accent_half_width: i32,
    pub accent_thickness: u32,
    pub jpeg_quality: u8,
    pub font_candidates: Vec<PathBuf>,
}

impl Default for OgImageStyle {
    fn default() -> Self {
        Self {
            background: Rgb::new(0x0a, 0x16, 0x28),
            logo_top: 140,
            title: TextLine {
                text: "KubeGraf".to_owned(),
                size: 76.0,
                top: 360,
                colour: Rgb::WHITE,
            },
            tagline: TextLine {
                text: "Local-first Kubernetes incident intelligence".to_owned(),
                size: 38.0,
                top: 450,
                colour: BRAND_CYAN,
            },
            shadow: Rgb::BLACK,
            shadow_offset: 4,
            accent: BRAND_CYAN,
            accent_y: 420,
            accent_half_width: 300,
            accent_thickness: 4,
            jpeg_quality: 95,
            font_candidates: default_font_candidates(),
        }
    }
}

/// What a `generate` run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OgImageReport {
    pub width: u32,
    pub height: u32,
    pub logo_included: bool,
    /// `None` when the built-in face was used.
    pub font: Option<PathBuf>,
    pub outputs: Vec<PathBuf>,
}

/// Composes the image. Always `OG_WIDTH` x `OG_HEIGHT`.
pub fn render(style: &OgImageStyle, logo: Option<&RgbaImage>, face: &TextFace) -> RgbImage {
    let mut canvas = RgbaImage::from_pixel(OG_WIDTH, OG_HEIGHT, style.background.to_rgba());

    if let Some(logo) = logo {
        let logo_x = centred_x(logo.width());
        // `overlay` blends using the logo's own alpha channel.
        imageops::overlay(&mut canvas, logo, logo_x.into(), style.logo_top.into());
        log::info!("✓ Logo placed at ({logo_x}, {})", style.logo_top);
    }

    let title_x = draw_shadowed(&mut canvas, style, &style.title, face);

    let centre = (OG_WIDTH / 2) as i32;
    let half_thickness = (style.accent_thickness.max(1) as i32 - 1) / 2;
    let accent = Rect::at(centre - style.accent_half_width, style.accent_y - half_thickness)
        .of_size(
            (style.accent_half_width * 2 + 1).max(1) as u32,
            style.accent_thickness.max(1),
        );
    draw_filled_rect_mut(&mut canvas, accent, style.accent.to_rgba());

    let tagline_x = draw_shadowed(&mut canvas, style, &style.tagline, face);

    log::info!(
        "✓ Text rendered at title:({title_x}, {}) tagline:({tagline_x}, {})",
        style.title.top,
        style.tagline.top
    );

    DynamicImage::ImageRgba8(canvas).to_rgb8()
}

/// Draws the shadow then the text itself, returning the text's left edge.
fn draw_shadowed(canvas: &mut RgbaImage, style: &OgImageStyle, line: &TextLine, face: &TextFace) -> i32 {
    let (width, _) = face.measure(&line.text, line.size);
    let x = centred_x(width);
    let shadow_at = (x + style.shadow_offset, line.top + style.shadow_offset);

    face.draw(canvas, &line.text, shadow_at, line.size, style.shadow.to_rgba());
    face.draw(canvas, &line.text, (x, line.top), line.size, line.colour.to_rgba());
    x
}

/// Left edge that centres something `width` wide, rounding down.
fn centred_x(width: u32) -> i32 {
    (i64::from(OG_WIDTH) - i64::from(width)).div_euclid(2) as i32
}

pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
    encoder.encode_image(image)?;
    Ok(bytes)
}

/// Renders the image and writes it to every path in `outputs`.
///
/// A logo that cannot be rasterised, or fonts that cannot be loaded, only
/// degrade the result. Failing to write any output is an error.
pub async fn generate(
    style: &OgImageStyle,
    logo_svg: &Path,
    rasteriser: &LogoRasteriser,
    outputs: &[PathBuf],
) -> Result<OgImageReport> {
    log::info!("Generating OpenGraph image...");
    log::info!("Logo: {}", logo_svg.display());

    let logo = match rasteriser.rasterise(logo_svg).await {
        Ok(logo) => {
            log::info!("✓ Logo converted successfully");
            Some(logo)
        }
        Err(e) => {
            log::warn!("⚠ Could not convert SVG logo: {e}");
            None
        }
    };

    let face = TextFace::load_first_available(&style.font_candidates).await;
    let image = render(style, logo.as_ref(), &face);
    let bytes = encode_jpeg(&image, style.jpeg_quality)?;

    write_to_all(outputs, &bytes).await?;
    log::info!("✅ New OpenGraph image generated ({OG_WIDTH}x{OG_HEIGHT})");

    Ok(OgImageReport {
        width: image.width(),
        height: image.height(),
        logo_included: logo.is_some(),
        font: face.source().map(Path::to_path_buf),
        outputs: outputs.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logo::ConverterCommand;
    use image::Rgb as Pixel;

    fn builtin_style() -> OgImageStyle {
        OgImageStyle {
            font_candidates: Vec::new(),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_dimensions_and_layout() {
        let style = builtin_style();
        let image = render(&style, None, &TextFace::Builtin);

        assert_eq!(image.dimensions(), (OG_WIDTH, OG_HEIGHT));
        assert_eq!(*image.get_pixel(5, 5), Pixel([0x0a, 0x16, 0x28]));
        // Accent line spans 300..=900 at y=420.
        assert_eq!(*image.get_pixel(600, 420), Pixel([0x06, 0xb6, 0xd4]));
        assert_eq!(*image.get_pixel(300, 420), Pixel([0x06, 0xb6, 0xd4]));
        assert_eq!(*image.get_pixel(299, 420), Pixel([0x0a, 0x16, 0x28]));
        assert_eq!(*image.get_pixel(600, 425), Pixel([0x0a, 0x16, 0x28]));
    }

    #[test]
    fn test_render_draws_title_and_shadow() {
        let style = builtin_style();
        let image = render(&style, None, &TextFace::Builtin);

        let title_band = (360..420).flat_map(|y| (0..OG_WIDTH).map(move |x| (x, y)));
        let colours: Vec<_> = title_band.map(|(x, y)| *image.get_pixel(x, y)).collect();

        assert!(colours.contains(&Pixel([255, 255, 255])));
        assert!(colours.contains(&Pixel([0, 0, 0])));
    }

    #[test]
    fn test_render_centres_logo_with_alpha() {
        let mut logo = RgbaImage::from_pixel(10, 10, image::Rgba([255, 0, 0, 255]));
        logo.put_pixel(0, 0, image::Rgba([0, 255, 0, 0]));

        let image = render(&builtin_style(), Some(&logo), &TextFace::Builtin);

        assert_eq!(*image.get_pixel(600, 145), Pixel([255, 0, 0]));
        // Fully transparent logo pixel leaves the background showing.
        assert_eq!(*image.get_pixel(595, 140), Pixel([0x0a, 0x16, 0x28]));
        assert_eq!(*image.get_pixel(594, 145), Pixel([0x0a, 0x16, 0x28]));
    }

    #[test]
    fn test_centred_x_rounds_down() {
        assert_eq!(centred_x(101), 549);
        assert_eq!(centred_x(1200), 0);
        assert_eq!(centred_x(1201), -1);
    }

    #[tokio::test]
    async fn test_generate_without_converter_still_writes_every_output() {
        let dir = tempfile::tempdir().unwrap();
        let svg = dir.path().join("logo.svg");
        std::fs::write(&svg, "<svg/>").unwrap();
        let outputs = vec![dir.path().join("a.jpg"), dir.path().join("b.jpg")];
        let rasteriser = LogoRasteriser {
            converters: vec![ConverterCommand::new("sitekit-no-such-converter", &[])],
            size: 180,
        };

        let report = generate(&builtin_style(), &svg, &rasteriser, &outputs)
            .await
            .unwrap();

        assert!(!report.logo_included);
        assert_eq!(report.font, None);
        assert_eq!((report.width, report.height), (1200, 630));
        for output in &outputs {
            let written = image::open(output).unwrap();
            assert_eq!(written.width(), OG_WIDTH);
            assert_eq!(written.height(), OG_HEIGHT);
        }
    }

    #[tokio::test]
    async fn test_generate_fails_on_unwritable_output() {
        let dir = tempfile::tempdir().unwrap();
        let rasteriser = LogoRasteriser {
            converters: Vec::new(),
            size: 180,
        };
        let outputs = vec![dir.path().join("no/such/dir/og.jpg")];

        let result = generate(&builtin_style(), &dir.path().join("x.svg"), &rasteriser, &outputs).await;

        assert!(result.is_err());
    }
}
