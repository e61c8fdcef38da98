// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! Light theme page background, as declared in each page's inline `<style>`.
use crate::error::Result;
use crate::patch::{HtmlPatch, Rewrite};
use crate::types::Rgb;
use regex::{Captures, Regex};

/// The old light theme background.
pub const OLD_LIGHT_BG: Rgb = Rgb::WHITE;
/// Cream background matching the landing page.
pub const NEW_LIGHT_BG: Rgb = Rgb::new(0xfa, 0xf6, 0xe9);

/// Rewrites `--bg` inside the `:root[data-theme="light"] { ... }` block.
///
/// Only the `--bg` declaration inside that block is touched; the same colour
/// used anywhere else in the document is left alone.
#[derive(Debug, Clone)]
pub struct BackgroundColourPatch {
    to: Rgb,
    old_declaration: Regex,
    new_declaration: Regex,
}

impl BackgroundColourPatch {
    pub fn new(from: Rgb, to: Rgb) -> Result<Self> {
        Ok(Self {
            to,
            old_declaration: Regex::new(&light_bg_pattern(from))?,
            new_declaration: Regex::new(&light_bg_pattern(to))?,
        })
    }
}

fn light_bg_pattern(colour: Rgb) -> String {
    // `[^}]` keeps the match from leaving the light theme block.
    format!(
        r#"(:root\[data-theme="light"\]\s*\{{[^}}]*--bg:\s*){};"#,
        regex::escape(&colour.to_string())
    )
}

impl HtmlPatch for BackgroundColourPatch {
    fn name(&self) -> &str {
        "light theme background"
    }

    fn target(&self) -> &str {
        "light theme --bg declaration"
    }

    fn rewrite(&self, html: &str) -> Rewrite {
        if !self.old_declaration.is_match(html) {
            return if self.new_declaration.is_match(html) {
                Rewrite::Unchanged
            } else {
                Rewrite::Missing
            };
        }

        let updated = self
            .old_declaration
            .replace_all(html, |caps: &Captures<'_>| format!("{}{};", &caps[1], self.to));
        Rewrite::compare(html, updated.into_owned())
    }
}
