// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
use crate::error::Result;
use crate::patch::{HtmlPatch, Rewrite};
use regex::{NoExpand, Regex};

/// Defines `toggleTheme()`, which the theme toggle buttons call.
const SWITCHER_SCRIPT: &str = r#"<script src="/docs/theme-switcher.js"></script>"#;
const MOBILE_MENU_SCRIPT: &str = r#"<script src="/docs/mobile-menu.js"></script>"#;
const THEME_STYLES_LINK: &str = r#"<link rel="stylesheet" href="/docs/theme-styles.css">"#;

/// Wires the theme switcher script and stylesheet into docs pages.
///
/// The script belongs at the end of the body: right after the mobile menu
/// script when there is one, otherwise just before `</body>`. A copy sitting
/// in the head straight after the theme stylesheet is moved down. The
/// stylesheet goes after the page's first stylesheet link.
#[derive(Debug, Clone)]
pub struct ThemeSwitcherScriptPatch {
    script_in_head: Regex,
    first_stylesheet: Regex,
}

impl ThemeSwitcherScriptPatch {
    pub fn new() -> Result<Self> {
        Ok(Self {
            script_in_head: Regex::new(&format!(
                r"{}\s*{}",
                regex::escape(THEME_STYLES_LINK),
                regex::escape(SWITCHER_SCRIPT)
            ))?,
            first_stylesheet: Regex::new(r"<link[^>]*stylesheet[^>]*>")?,
        })
    }
}

impl HtmlPatch for ThemeSwitcherScriptPatch {
    fn name(&self) -> &str {
        "theme switcher script"
    }

    fn target(&self) -> &str {
        "mobile menu script or </body>"
    }

    fn rewrite(&self, html: &str) -> Rewrite {
        let mut updated = self
            .script_in_head
            .replace(html, NoExpand(THEME_STYLES_LINK))
            .into_owned();

        if !updated.contains(SWITCHER_SCRIPT) {
            if let Some(at) = updated.find(MOBILE_MENU_SCRIPT) {
                let end = at + MOBILE_MENU_SCRIPT.len();
                updated.insert_str(end, &format!("\n    {SWITCHER_SCRIPT}"));
            } else if let Some(at) = updated.find("</body>") {
                updated.insert_str(at, &format!("    {SWITCHER_SCRIPT}\n"));
            }
        }

        if !updated.contains(THEME_STYLES_LINK)
            && let Some(link) = self.first_stylesheet.find(&updated)
        {
            let end = link.end();
            updated.insert_str(end, &format!("\n    {THEME_STYLES_LINK}"));
        }

        if updated != html {
            Rewrite::Changed(updated)
        } else if html.contains(SWITCHER_SCRIPT) {
            Rewrite::Unchanged
        } else {
            Rewrite::Missing
        }
    }
}
