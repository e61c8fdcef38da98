// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
use crate::error::Result;
use crate::patch::{HtmlPatch, Rewrite};
use regex::{NoExpand, Regex};
use strum_macros::{Display, EnumString};

/// Light/dark button pair: ☀️ then 🌙, separated only by whitespace.
const BUTTON_PAIR: &str = r#"<button id="theme-light-btn"[^>]*>\x{2600}\x{FE0F}</button>\s*<button id="theme-dark-btn"[^>]*>\x{1F319}</button>"#;
/// The single toggle whose label is still the ☀️ emoji.
const EMOJI_TOGGLE: &str = r#"<button id="theme-toggle-btn"[^>]*>\x{2600}\x{FE0F}</button>"#;

/// The two migration steps. Run `SingleButton` first, then `SvgIcon`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum ToggleVariant {
    /// Light and dark buttons become one emoji toggle.
    SingleButton,
    /// The emoji toggle gets an SVG sun icon.
    SvgIcon,
}

impl ToggleVariant {
    pub fn markup(self) -> &'static str {
        match self {
            Self::SingleButton => include_str!("../../assets/theme_toggle_single.html").trim_end(),
            Self::SvgIcon => include_str!("../../assets/theme_toggle_svg.html").trim_end(),
        }
    }

    fn old_pattern(self) -> &'static str {
        match self {
            Self::SingleButton => BUTTON_PAIR,
            Self::SvgIcon => EMOJI_TOGGLE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ThemeTogglePatch {
    name: String,
    markup: String,
    old_buttons: Regex,
}

impl ThemeTogglePatch {
    pub fn new(variant: ToggleVariant, markup: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: format!("{variant} theme toggle"),
            markup: markup.into(),
            old_buttons: Regex::new(variant.old_pattern())?,
        })
    }

    pub fn for_variant(variant: ToggleVariant) -> Result<Self> {
        Self::new(variant, variant.markup())
    }
}

impl HtmlPatch for ThemeTogglePatch {
    fn name(&self) -> &str {
        &self.name
    }

    fn target(&self) -> &str {
        "old theme button markup"
    }

    fn rewrite(&self, html: &str) -> Rewrite {
        if !self.old_buttons.is_match(html) {
            return if html.contains(&self.markup) {
                Rewrite::Unchanged
            } else {
                Rewrite::Missing
            };
        }
        let updated = self.old_buttons.replace_all(html, NoExpand(&self.markup));
        Rewrite::compare(html, updated.into_owned())
    }
}
