// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! Applying textual HTML patches across directory trees.
use crate::file_io::{find_html_files, read_text, write_text};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// What a patch decided to do with one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    Changed(String),
    /// The target markup is present and already in its final form.
    Unchanged,
    /// The markup this patch looks for is absent.
    Missing,
}

impl Rewrite {
    /// Builds the outcome of a substitution, treating identical output as `Unchanged`.
    pub fn compare(original: &str, rewritten: String) -> Self {
        if rewritten == original {
            Self::Unchanged
        } else {
            Self::Changed(rewritten)
        }
    }
}

/// A regex-driven edit applied to the full text of an HTML file.
pub trait HtmlPatch {
    /// Human readable name used in logs and reports.
    fn name(&self) -> &str;

    /// Phrase describing the markup being looked for, e.g. "footer".
    fn target(&self) -> &str;

    fn rewrite(&self, html: &str) -> Rewrite;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum FileStatus {
    Updated,
    Unchanged,
    Skipped,
    Failed(String),
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Updated => f.write_str("updated"),
            Self::Unchanged => f.write_str("unchanged"),
            Self::Skipped => f.write_str("skipped"),
            Self::Failed(e) => write!(f, "failed: {e}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: FileStatus,
}

/// Outcome of running one patch over a set of root directories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatchReport {
    pub patch: String,
    pub files: Vec<FileReport>,
    pub missing_roots: Vec<PathBuf>,
}

impl PatchReport {
    pub fn new(patch: &str) -> Self {
        Self {
            patch: patch.to_owned(),
            ..Default::default()
        }
    }

    pub fn total(&self) -> usize {
        self.files.len()
    }

    pub fn updated(&self) -> usize {
        self.count(|s| *s == FileStatus::Updated)
    }

    pub fn unchanged(&self) -> usize {
        self.count(|s| *s == FileStatus::Unchanged)
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| *s == FileStatus::Skipped)
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::Failed(_)))
    }

    fn count(&self, predicate: impl Fn(&FileStatus) -> bool) -> usize {
        self.files.iter().filter(|f| predicate(&f.status)).count()
    }

    fn record(&mut self, path: PathBuf, status: FileStatus) {
        self.files.push(FileReport { path, status });
    }
}

/// Applies `patch` to every HTML file below each of `roots`, in order.
///
/// Files are only written when the patch changes them. Per-file I/O failures
/// are logged and recorded; they never stop the traversal.
pub async fn apply_to_roots(patch: &(dyn HtmlPatch + Sync), roots: &[PathBuf]) -> PatchReport {
    let mut report = PatchReport::new(patch.name());
    log::info!("Applying {}", patch.name());

    for root in roots {
        if !root.is_dir() {
            log::warn!("⚠ Directory not found: {}", root.display());
            report.missing_roots.push(root.clone());
            continue;
        }

        log::info!("📁 Processing {}", root.display());

        let files = match find_html_files(root) {
            Ok(files) => files,
            Err(e) => {
                log::error!("✗ Could not scan {}: {e}", root.display());
                report.missing_roots.push(root.clone());
                continue;
            }
        };

        for file in files {
            let status = apply_to_file(patch, &file).await;
            let shown = file.strip_prefix(root).unwrap_or(file.as_path());
            match &status {
                FileStatus::Updated => log::info!("  ✓ Updated: {}", shown.display()),
                FileStatus::Unchanged => log::info!("  = Up to date: {}", shown.display()),
                FileStatus::Skipped => {
                    log::warn!("  ⏭ Skipped: {} (no {} found)", shown.display(), patch.target());
                }
                FileStatus::Failed(e) => log::error!("  ✗ Error processing {}: {e}", shown.display()),
            }
            report.record(file, status);
        }
    }

    log::info!(
        "{}: updated {} of {} files ({} up to date, {} skipped, {} failed)",
        report.patch,
        report.updated(),
        report.total(),
        report.unchanged(),
        report.skipped(),
        report.failed()
    );

    report
}

async fn apply_to_file(patch: &(dyn HtmlPatch + Sync), file: &Path) -> FileStatus {
    let html = match read_text(file).await {
        Ok(html) => html,
        Err(e) => return FileStatus::Failed(e.to_string()),
    };

    match patch.rewrite(&html) {
        Rewrite::Changed(updated) => match write_text(file, &updated).await {
            Ok(()) => FileStatus::Updated,
            Err(e) => FileStatus::Failed(e.to_string()),
        },
        Rewrite::Unchanged => FileStatus::Unchanged,
        Rewrite::Missing => FileStatus::Skipped,
    }
}
