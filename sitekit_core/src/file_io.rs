// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Recursively finds every `*.html` file under `root`, sorted by path.
///
/// Entries that cannot be read while walking are logged and skipped.
pub fn find_html_files(root: &Path) -> Result<Vec<PathBuf>> {
    let escaped_root = glob::Pattern::escape(&root.to_string_lossy());
    let path_pattern = format!("{escaped_root}/**/*.html");

    let mut files = Vec::new();
    for entry in glob::glob(&path_pattern)? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => log::warn!("Skipping unreadable entry: {e}"),
        }
    }

    files.sort();
    Ok(files)
}

pub async fn read_text(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::io(path, e))
}

pub async fn write_text(path: &Path, contents: &str) -> Result<()> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| Error::io(path, e))
}

pub async fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path).await.map_err(|e| Error::io(path, e))
}

/// Writes `bytes` to every path in `outputs`, stopping at the first failure.
pub async fn write_to_all(outputs: &[PathBuf], bytes: &[u8]) -> Result<()> {
    for path in outputs {
        tokio::fs::write(path, bytes)
            .await
            .map_err(|e| Error::io(path, e))?;
        log::info!("✓ Saved: {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_find_html_files_recurses_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("guides/deep")).unwrap();
        fs::write(dir.path().join("index.html"), "").unwrap();
        fs::write(dir.path().join("guides/b.html"), "").unwrap();
        fs::write(dir.path().join("guides/deep/a.html"), "").unwrap();
        fs::write(dir.path().join("guides/notes.md"), "").unwrap();

        let files = find_html_files(dir.path()).unwrap();
        let relative: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            relative,
            vec![
                PathBuf::from("guides/b.html"),
                PathBuf::from("guides/deep/a.html"),
                PathBuf::from("index.html"),
            ]
        );
    }

    #[test]
    fn test_find_html_files_ignores_directories_named_like_html() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("weird.html")).unwrap();

        assert!(find_html_files(dir.path()).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_write_to_all_reports_failing_path() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("a.bin");
        let bad = dir.path().join("missing/b.bin");

        let err = write_to_all(&[good.clone(), bad.clone()], b"x")
            .await
            .unwrap_err();

        assert_eq!(fs::read(&good).unwrap(), b"x");
        assert!(matches!(err, Error::Io { path, .. } if path == bad));
    }
}
