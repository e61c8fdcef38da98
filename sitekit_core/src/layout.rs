// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! Where things live in a checkout of the website.
use std::path::{Path, PathBuf};

/// Resolves the site's well-known paths against a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    root: PathBuf,
}

impl SiteLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Joins `path` onto the root unless it is already absolute.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    pub fn public_dir(&self) -> PathBuf {
        self.root.join("client").join("public")
    }

    /// Docs as deployed (`docs/`).
    pub fn deployment_docs(&self) -> PathBuf {
        self.root.join("docs")
    }

    /// Docs served by the dev server (`client/public/docs/`).
    pub fn public_docs(&self) -> PathBuf {
        self.public_dir().join("docs")
    }

    pub fn logo_svg(&self) -> PathBuf {
        self.public_dir().join("kubegraf.svg")
    }

    pub fn og_image_outputs(&self) -> Vec<PathBuf> {
        vec![
            self.public_dir().join("opengraph-v2.jpg"),
            self.root.join("opengraph-v2.jpg"),
        ]
    }

    pub fn favicon_source(&self) -> PathBuf {
        self.public_dir().join("favicon-192x192.png")
    }

    pub fn favicon_outputs(&self) -> Vec<PathBuf> {
        vec![
            self.root.join("favicon-48x48.png"),
            self.public_dir().join("favicon-48x48.png"),
        ]
    }
}

impl Default for SiteLayout {
    fn default() -> Self {
        Self::new(".")
    }
}
