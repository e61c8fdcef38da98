// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! Maintenance tools for the KubeGraf website: social images, favicons and
//! bulk edits of the generated docs HTML.
use clap::{Parser, Subcommand};
use serde::Serialize;
use sitekit_core::favicon::{FAVICON_SIZE, generate_favicon};
use sitekit_core::file_io::read_text;
use sitekit_core::layout::SiteLayout;
use sitekit_core::logo::LogoRasteriser;
use sitekit_core::og_image::{self, OgImageStyle};
use sitekit_core::patch::{HtmlPatch, apply_to_roots};
use sitekit_core::patches::bg_colour::{NEW_LIGHT_BG, OLD_LIGHT_BG};
use sitekit_core::patches::{
    BackgroundColourPatch, FaviconLinksPatch, FooterPatch, FooterVariant,
    ThemeSwitcherScriptPatch, ThemeTogglePatch, ToggleVariant, docs_roots,
};
use sitekit_core::types::Rgb;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sitekit")]
#[command(version)]
#[command(about = "Website maintenance tools", long_about = None)]
struct Cli {
    /// Project root that default paths and relative --dir values resolve against
    #[arg(long, global = true, value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// Also write the run's outcome as JSON
    #[arg(long, global = true, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the 1200x630 OpenGraph preview image
    OgImage {
        /// SVG logo (default: client/public/kubegraf.svg)
        #[arg(long, value_name = "FILE")]
        logo: Option<PathBuf>,

        /// Where to save the JPEG; repeat for several copies
        #[arg(short, long, value_name = "FILE")]
        output: Vec<PathBuf>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        tagline: Option<String>,
    },

    /// Change the light theme's --bg colour in docs pages
    BgColour {
        #[arg(long, value_name = "DIR")]
        dir: Vec<PathBuf>,

        #[arg(long, value_name = "HEX", default_value_t = OLD_LIGHT_BG)]
        from: Rgb,

        #[arg(long, value_name = "HEX", default_value_t = NEW_LIGHT_BG)]
        to: Rgb,
    },

    /// Replace the docs footer block
    Footer {
        /// layout or deployment
        #[arg(long)]
        variant: FooterVariant,

        #[arg(long, value_name = "DIR")]
        dir: Vec<PathBuf>,

        /// Footer HTML to use instead of the built-in one
        #[arg(long, value_name = "FILE")]
        markup: Option<PathBuf>,
    },

    /// Migrate the docs theme switcher markup
    ThemeToggle {
        /// single-button or svg-icon
        #[arg(long)]
        variant: ToggleVariant,

        #[arg(long, value_name = "DIR")]
        dir: Vec<PathBuf>,

        /// Toggle HTML to use instead of the built-in one
        #[arg(long, value_name = "FILE")]
        markup: Option<PathBuf>,
    },

    /// Load the script and stylesheet that make the theme toggle work
    ThemeSwitcher {
        #[arg(long, value_name = "DIR")]
        dir: Vec<PathBuf>,
    },

    /// Generate the 48x48 favicon from the 192x192 icon
    Favicon {
        #[arg(long, value_name = "FILE")]
        source: Option<PathBuf>,

        #[arg(short, long, value_name = "FILE")]
        output: Vec<PathBuf>,
    },

    /// Add the 48x48 favicon link to docs pages
    FaviconLinks {
        #[arg(long, value_name = "DIR")]
        dir: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    simple_logger::init_with_level(level)?;

    let layout = SiteLayout::new(&cli.root);

    match cli.command {
        Commands::OgImage {
            logo,
            output,
            title,
            tagline,
        } => {
            let mut style = OgImageStyle::default();
            if let Some(title) = title {
                style.title.text = title;
            }
            if let Some(tagline) = tagline {
                style.tagline.text = tagline;
            }
            let logo = logo.map_or_else(|| layout.logo_svg(), |p| layout.resolve(p));
            let outputs = paths_or(&layout, output, layout.og_image_outputs());

            let report =
                og_image::generate(&style, &logo, &LogoRasteriser::default(), &outputs).await?;
            write_report(cli.report.as_deref(), &report).await?;
        }
        Commands::BgColour { dir, from, to } => {
            let patch = BackgroundColourPatch::new(from, to)?;
            let roots = paths_or(&layout, dir, docs_roots(&layout));
            run_patch(&patch, &roots, cli.report.as_deref()).await?;
        }
        Commands::Footer {
            variant,
            dir,
            markup,
        } => {
            let patch = match markup {
                Some(path) => {
                    let markup = read_text(&layout.resolve(path)).await?;
                    FooterPatch::new(format!("{variant} footer"), markup.trim_end())?
                }
                None => FooterPatch::for_variant(variant)?,
            };
            let roots = paths_or(&layout, dir, variant.default_roots(&layout));
            run_patch(&patch, &roots, cli.report.as_deref()).await?;
        }
        Commands::ThemeToggle {
            variant,
            dir,
            markup,
        } => {
            let patch = match markup {
                Some(path) => {
                    let markup = read_text(&layout.resolve(path)).await?;
                    ThemeTogglePatch::new(variant, markup.trim_end())?
                }
                None => ThemeTogglePatch::for_variant(variant)?,
            };
            let roots = paths_or(&layout, dir, docs_roots(&layout));
            run_patch(&patch, &roots, cli.report.as_deref()).await?;
        }
        Commands::ThemeSwitcher { dir } => {
            let patch = ThemeSwitcherScriptPatch::new()?;
            let roots = paths_or(&layout, dir, vec![layout.deployment_docs()]);
            run_patch(&patch, &roots, cli.report.as_deref()).await?;
        }
        Commands::Favicon { source, output } => {
            let source = source.map_or_else(|| layout.favicon_source(), |p| layout.resolve(p));
            let outputs = paths_or(&layout, output, layout.favicon_outputs());

            generate_favicon(&source, FAVICON_SIZE, &outputs).await?;
            write_report(cli.report.as_deref(), &outputs).await?;
        }
        Commands::FaviconLinks { dir } => {
            let patch = FaviconLinksPatch::new()?;
            let roots = paths_or(&layout, dir, vec![layout.public_docs()]);
            run_patch(&patch, &roots, cli.report.as_deref()).await?;
        }
    }

    Ok(())
}

/// Resolves user-supplied paths, or falls back to `defaults` when none were given.
fn paths_or(layout: &SiteLayout, given: Vec<PathBuf>, defaults: Vec<PathBuf>) -> Vec<PathBuf> {
    if given.is_empty() {
        defaults
    } else {
        given.into_iter().map(|p| layout.resolve(p)).collect()
    }
}

/// Individual file failures are reported, not fatal.
async fn run_patch(
    patch: &(dyn HtmlPatch + Sync),
    roots: &[PathBuf],
    report_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = apply_to_roots(patch, roots).await;
    if report.failed() > 0 {
        log::warn!("{} file(s) could not be processed", report.failed());
    }
    write_report(report_path, &report).await
}

async fn write_report<T: Serialize>(
    path: Option<&Path>,
    report: &T,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(());
    };
    let json = serde_json::to_string_pretty(report)?;
    tokio::fs::write(path, json).await?;
    log::info!("Report written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_footer_variant_and_dirs() {
        let cli = Cli::parse_from([
            "sitekit", "--root", "/srv/site", "footer", "--variant", "deployment", "--dir", "docs",
            "--dir", "/abs",
        ]);
        let Commands::Footer { variant, dir, markup } = cli.command else {
            panic!("expected footer command");
        };
        assert_eq!(variant, FooterVariant::Deployment);
        assert_eq!(markup, None);

        let layout = SiteLayout::new(&cli.root);
        assert_eq!(
            paths_or(&layout, dir, Vec::new()),
            vec![PathBuf::from("/srv/site/docs"), PathBuf::from("/abs")]
        );
    }

    #[test]
    fn test_bg_colour_defaults() {
        let cli = Cli::parse_from(["sitekit", "bg-colour"]);
        let Commands::BgColour { dir, from, to } = cli.command else {
            panic!("expected bg-colour command");
        };
        assert!(dir.is_empty());
        assert_eq!(from, Rgb::WHITE);
        assert_eq!(to, Rgb::new(0xfa, 0xf6, 0xe9));
    }

    #[test]
    fn test_rejects_unknown_variant() {
        assert!(Cli::try_parse_from(["sitekit", "theme-toggle", "--variant", "emoji"]).is_err());
    }

    #[test]
    fn test_parses_theme_switcher() {
        let cli = Cli::parse_from(["sitekit", "theme-switcher", "--dir", "site/docs"]);
        let Commands::ThemeSwitcher { dir } = cli.command else {
            panic!("expected theme-switcher command");
        };
        assert_eq!(dir, vec![PathBuf::from("site/docs")]);
    }

    #[test]
    fn test_paths_or_uses_defaults_when_empty() {
        let layout = SiteLayout::new("/srv/site");
        assert_eq!(
            paths_or(&layout, Vec::new(), layout.favicon_outputs()),
            layout.favicon_outputs()
        );
    }
}
