// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
use crate::error::Result;
use crate::patch::{HtmlPatch, Rewrite};
use regex::{Captures, Regex};

const FAVICON_48_LINK: &str =
    r#"<link rel="icon" type="image/png" sizes="48x48" href="/favicon-48x48.png">"#;

/// Adds a `<link>` for the 48x48 favicon that search result pages prefer.
///
/// The link goes right after the `.ico` shortcut link when the page has one,
/// otherwise on its own line before the 32x32 icon link.
#[derive(Debug, Clone)]
pub struct FaviconLinksPatch {
    shortcut_icon: Regex,
    icon_32: Regex,
}

impl FaviconLinksPatch {
    pub fn new() -> Result<Self> {
        Ok(Self {
            shortcut_icon: Regex::new(r#"<link rel="shortcut icon" href="/favicon\.ico">"#)?,
            icon_32: Regex::new(
                r#"<link rel="icon" type="image/png" sizes="32x32" href="/favicon\.png">"#,
            )?,
        })
    }
}

impl HtmlPatch for FaviconLinksPatch {
    fn name(&self) -> &str {
        "48x48 favicon link"
    }

    fn target(&self) -> &str {
        "favicon link to anchor on"
    }

    fn rewrite(&self, html: &str) -> Rewrite {
        if html.contains(r#"sizes="48x48""#) {
            return Rewrite::Unchanged;
        }

        let updated = if self.shortcut_icon.is_match(html) {
            self.shortcut_icon.replace(html, |caps: &Captures<'_>| {
                format!("{}\n    {FAVICON_48_LINK}", &caps[0])
            })
        } else if self.icon_32.is_match(html) {
            self.icon_32.replace(html, |caps: &Captures<'_>| {
                format!("    {FAVICON_48_LINK}\n{}", &caps[0])
            })
        } else {
            return Rewrite::Missing;
        };

        Rewrite::compare(html, updated.into_owned())
    }
}
