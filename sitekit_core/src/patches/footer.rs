// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
use crate::error::Result;
use crate::layout::SiteLayout;
use crate::patch::{HtmlPatch, Rewrite};
use regex::{NoExpand, Regex};
use std::path::PathBuf;
use strum_macros::{Display, EnumString};

/// Which footer design to install, and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum FooterVariant {
    /// Grid footer matching the landing page, for both docs trees.
    Layout,
    /// Inline-styled footer, for the deployed docs only.
    Deployment,
}

impl FooterVariant {
    pub fn markup(self) -> &'static str {
        match self {
            Self::Layout => include_str!("../../assets/footer_layout.html").trim_end(),
            Self::Deployment => include_str!("../../assets/footer_deployment.html").trim_end(),
        }
    }

    pub fn default_roots(self, layout: &SiteLayout) -> Vec<PathBuf> {
        match self {
            Self::Layout => vec![layout.public_docs(), layout.deployment_docs()],
            Self::Deployment => vec![layout.deployment_docs()],
        }
    }
}

/// Swaps the whole `<footer class="docs-footer">` element for new markup.
///
/// The match is lazy and spans lines, so a footer containing another
/// `</footer>` is cut short. Only the first footer in a file is replaced.
#[derive(Debug, Clone)]
pub struct FooterPatch {
    name: String,
    markup: String,
    footer: Regex,
}

impl FooterPatch {
    pub fn new(name: impl Into<String>, markup: impl Into<String>) -> Result<Self> {
        // Indentation before the tag belongs to the span, so markup that
        // carries its own indentation replaces it rather than stacking on it.
        let footer = Regex::new(r#"(?s)[ \t]*<footer class="docs-footer">.*?</footer>"#)?;
        Ok(Self {
            name: name.into(),
            markup: markup.into(),
            footer,
        })
    }

    pub fn for_variant(variant: FooterVariant) -> Result<Self> {
        Self::new(format!("{variant} footer"), variant.markup())
    }
}

impl HtmlPatch for FooterPatch {
    fn name(&self) -> &str {
        &self.name
    }

    fn target(&self) -> &str {
        "docs footer"
    }

    fn rewrite(&self, html: &str) -> Rewrite {
        if !self.footer.is_match(html) {
            return Rewrite::Missing;
        }
        let updated = self.footer.replace(html, NoExpand(&self.markup));
        Rewrite::compare(html, updated.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "<main>\n  <p>Body</p>\n</main>\n    <footer class=\"docs-footer\">\n      <p>&copy; old</p>\n    </footer>\n</body>\n";

    #[test]
    fn test_replaces_footer_block_byte_for_byte() {
        let patch = FooterPatch::new("test", "  <footer class=\"docs-footer\">new</footer>").unwrap();

        let Rewrite::Changed(updated) = patch.rewrite(PAGE) else {
            panic!("expected footer to be replaced");
        };

        assert_eq!(
            updated,
            "<main>\n  <p>Body</p>\n</main>\n  <footer class=\"docs-footer\">new</footer>\n</body>\n"
        );
    }

    #[test]
    fn test_second_run_is_unchanged() {
        let patch = FooterPatch::for_variant(FooterVariant::Layout).unwrap();

        let Rewrite::Changed(updated) = patch.rewrite(PAGE) else {
            panic!("expected footer to be replaced");
        };

        assert!(updated.contains(FooterVariant::Layout.markup()));
        assert_eq!(patch.rewrite(&updated), Rewrite::Unchanged);
    }

    #[test]
    fn test_missing_footer() {
        let patch = FooterPatch::for_variant(FooterVariant::Deployment).unwrap();
        assert_eq!(
            patch.rewrite("<footer class=\"site-footer\"></footer>"),
            Rewrite::Missing
        );
    }

    #[test]
    fn test_only_first_footer_is_replaced() {
        let patch = FooterPatch::new("test", "<footer class=\"docs-footer\">N</footer>").unwrap();
        let html = "<footer class=\"docs-footer\">1</footer><footer class=\"docs-footer\">2</footer>";

        assert_eq!(
            patch.rewrite(html),
            Rewrite::Changed(
                "<footer class=\"docs-footer\">N</footer><footer class=\"docs-footer\">2</footer>"
                    .to_owned()
            )
        );
    }

    #[test]
    fn test_dollar_signs_in_markup_are_literal() {
        let patch = FooterPatch::new("test", "<footer class=\"docs-footer\">$0 ${1}</footer>").unwrap();
        let Rewrite::Changed(updated) = patch.rewrite(PAGE) else {
            panic!("expected footer to be replaced");
        };
        assert!(updated.contains(">$0 ${1}</footer>"));
    }

    #[test]
    fn test_variant_markup_shape() {
        for variant in [FooterVariant::Layout, FooterVariant::Deployment] {
            let markup = variant.markup();
            assert!(markup.trim_start().starts_with("<footer class=\"docs-footer\">"));
            assert!(markup.ends_with("</footer>"));
            assert!(markup.contains("id=\"theme-light-btn\""));
        }
    }

    #[test]
    fn test_variant_parse_and_roots() {
        assert_eq!("layout".parse::<FooterVariant>().unwrap(), FooterVariant::Layout);
        assert_eq!(
            "deployment".parse::<FooterVariant>().unwrap(),
            FooterVariant::Deployment
        );
        assert!("grid".parse::<FooterVariant>().is_err());

        let layout = SiteLayout::new("site");
        assert_eq!(
            FooterVariant::Layout.default_roots(&layout),
            vec![PathBuf::from("site/client/public/docs"), PathBuf::from("site/docs")]
        );
        assert_eq!(
            FooterVariant::Deployment.default_roots(&layout),
            vec![PathBuf::from("site/docs")]
        );
    }
}
