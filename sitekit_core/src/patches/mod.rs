// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! The individual HTML patches. Each is a `HtmlPatch` driven by `patch::apply_to_roots`.
pub mod bg_colour;
pub mod favicon_links;
pub mod footer;
pub mod theme_switcher;
pub mod theme_toggle;

pub use bg_colour::BackgroundColourPatch;
pub use favicon_links::FaviconLinksPatch;
pub use footer::{FooterPatch, FooterVariant};
pub use theme_switcher::ThemeSwitcherScriptPatch;
pub use theme_toggle::{ThemeTogglePatch, ToggleVariant};

use crate::layout::SiteLayout;
use std::path::PathBuf;

/// Both docs trees, deployed copy first.
pub fn docs_roots(layout: &SiteLayout) -> Vec<PathBuf> {
    vec![layout.deployment_docs(), layout.public_docs()]
}
