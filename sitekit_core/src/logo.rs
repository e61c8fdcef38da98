// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! Rasterising the SVG logo by shelling out to ImageMagick.
use crate::error::{Error, Result};
use crate::file_io::read_bytes;
use image::RgbaImage;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// One way of invoking the converter, e.g. `magick convert` or plain `convert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterCommand {
    pub program: String,
    pub leading_args: Vec<String>,
}

impl ConverterCommand {
    pub fn new(program: &str, leading_args: &[&str]) -> Self {
        Self {
            program: program.to_owned(),
            leading_args: leading_args.iter().map(|&a| a.to_owned()).collect(),
        }
    }

    /// Renders `svg` into `png`, fitted inside a `size`x`size` box with a
    /// transparent background.
    async fn run(&self, svg: &Path, png: &Path, size: u32) -> std::result::Result<(), String> {
        let output = Command::new(&self.program)
            .args(&self.leading_args)
            .args(["-background", "none", "-resize", &format!("{size}x{size}")])
            .arg(svg)
            .arg(png)
            .output()
            .await
            .map_err(|e| e.to_string())?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(format!("{} ({})", output.status, stderr.trim()))
        }
    }
}

/// Converts the vector logo into an RGBA thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoRasteriser {
    /// Tried in order until one succeeds.
    pub converters: Vec<ConverterCommand>,
    pub size: u32,
}

impl Default for LogoRasteriser {
    fn default() -> Self {
        Self {
            converters: vec![
                ConverterCommand::new("magick", &["convert"]),
                ConverterCommand::new("convert", &[]),
            ],
            size: 180,
        }
    }
}

impl LogoRasteriser {
    /// Scratch file the converter writes: `logo.svg` -> `logo_temp_og.png`.
    pub fn temp_png_path(svg: &Path) -> PathBuf {
        let stem = svg.file_stem().unwrap_or_default().to_string_lossy();
        svg.with_file_name(format!("{stem}_temp_og.png"))
    }

    pub async fn rasterise(&self, svg: &Path) -> Result<RgbaImage> {
        let rasterise_error = |reason: String| Error::Rasterise {
            path: svg.to_path_buf(),
            reason,
        };

        if !tokio::fs::try_exists(svg).await.unwrap_or(false) {
            return Err(rasterise_error("file not found".to_owned()));
        }

        let png = Self::temp_png_path(svg);
        let mut failures = Vec::new();

        for converter in &self.converters {
            match converter.run(svg, &png, self.size).await {
                Ok(()) => {
                    log::debug!("Rasterised with {}", converter.program);
                    let loaded = load_rgba(&png).await;
                    remove_scratch(&png).await;
                    return loaded;
                }
                Err(reason) => failures.push(format!("{}: {reason}", converter.program)),
            }
        }

        // A failing converter may still have left partial output behind.
        remove_scratch(&png).await;
        Err(rasterise_error(failures.join("; ")))
    }
}

async fn remove_scratch(png: &Path) {
    if !tokio::fs::try_exists(png).await.unwrap_or(false) {
        return;
    }
    if let Err(e) = tokio::fs::remove_file(png).await {
        log::warn!("Could not remove {}: {e}", png.display());
    }
}

async fn load_rgba(path: &Path) -> Result<RgbaImage> {
    let bytes = read_bytes(path).await?;
    Ok(image::load_from_memory(&bytes)?.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(path: &Path, width: u32, height: u32) {
        let mut image = RgbaImage::new(width, height);
        image.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        image.save_with_format(path, image::ImageFormat::Png).unwrap();
    }

    #[test]
    fn test_temp_png_path() {
        assert_eq!(
            LogoRasteriser::temp_png_path(Path::new("client/public/kubegraf.svg")),
            PathBuf::from("client/public/kubegraf_temp_og.png")
        );
    }

    #[tokio::test]
    async fn test_missing_converters_report_each_attempt() {
        let dir = tempfile::tempdir().unwrap();
        let svg = dir.path().join("logo.svg");
        std::fs::write(&svg, "<svg/>").unwrap();

        let rasteriser = LogoRasteriser {
            converters: vec![
                ConverterCommand::new("sitekit-no-such-magick", &["convert"]),
                ConverterCommand::new("sitekit-no-such-convert", &[]),
            ],
            size: 180,
        };

        let err = rasteriser.rasterise(&svg).await.unwrap_err();
        let Error::Rasterise { reason, .. } = err else {
            panic!("expected a rasterise error");
        };
        assert!(reason.contains("sitekit-no-such-magick"));
        assert!(reason.contains("sitekit-no-such-convert"));
    }

    #[tokio::test]
    async fn test_missing_svg() {
        let err = LogoRasteriser::default()
            .rasterise(Path::new("/no/such/logo.svg"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Rasterise { .. }));
    }

    /// Stands in for ImageMagick by copying the input (already a PNG) to the output.
    #[cfg(unix)]
    #[tokio::test]
    async fn test_falls_through_to_working_converter_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let svg = dir.path().join("logo.svg");
        write_png(&svg, 3, 2);

        // Arguments after the script: $0=-background $1=none $2=-resize $3=WxH $4=in $5=out
        let rasteriser = LogoRasteriser {
            converters: vec![
                ConverterCommand::new("sh", &["-c", "exit 1"]),
                ConverterCommand::new("sh", &["-c", r#"cp "$4" "$5""#]),
            ],
            size: 180,
        };

        let logo = rasteriser.rasterise(&svg).await.unwrap();

        assert_eq!(logo.dimensions(), (3, 2));
        assert_eq!(*logo.get_pixel(0, 0), image::Rgba([255, 0, 0, 255]));
        assert!(!LogoRasteriser::temp_png_path(&svg).exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failed_converter_output_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let svg = dir.path().join("logo.svg");
        write_png(&svg, 3, 2);

        // Writes the output file, then reports failure anyway.
        let rasteriser = LogoRasteriser {
            converters: vec![ConverterCommand::new("sh", &["-c", r#"cp "$4" "$5"; exit 1"#])],
            size: 180,
        };

        let err = rasteriser.rasterise(&svg).await.unwrap_err();

        assert!(matches!(err, Error::Rasterise { .. }));
        assert!(!LogoRasteriser::temp_png_path(&svg).exists());
        assert!(svg.exists());
    }
}
