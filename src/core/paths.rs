// src/core/paths.rs

use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Could not determine the current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
    #[error("Could not expand path '{path}': {reason}")]
    Expansion { path: String, reason: String },
    #[error("Working directory '{path}' is not accessible: {source}")]
    WorkDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'{0}' is not a directory.")]
    NotADirectory(String),
}

/// Resolves the console's working directory.
///
/// `None` means the process' current directory. A given path may contain `~` and
/// environment variables (`$VAR` or `%VAR%`); it is expanded and canonicalized.
pub fn resolve_workdir(requested: Option<&str>) -> Result<PathBuf, PathError> {
    let raw = match requested {
        Some(template) => {
            let expanded = shellexpand::full(template).map_err(|e| PathError::Expansion {
                path: template.to_string(),
                reason: e.to_string(),
            })?;
            PathBuf::from(expanded.into_owned())
        }
        None => env::current_dir().map_err(PathError::CurrentDir)?,
    };

    let canonical = dunce::canonicalize(&raw).map_err(|e| PathError::WorkDir {
        path: raw.display().to_string(),
        source: e,
    })?;
    if !canonical.is_dir() {
        return Err(PathError::NotADirectory(canonical.display().to_string()));
    }
    log::debug!("Working directory: {}", canonical.display());
    Ok(canonical)
}

/// Returns `path` itself if nothing exists there, otherwise the first free sibling
/// named `stem(n).ext` with `n` counting up from 1.
pub fn escape_existing_file(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut n: u32 = 1;
    loop {
        let candidate = parent.join(format!("{}({}){}", stem, n, extension));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_escape_returns_free_path_unchanged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dump.txt");
        assert_eq!(escape_existing_file(&path), path);
    }

    #[test]
    fn test_escape_counts_up() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("dump.txt"), "a").unwrap();
        assert_eq!(
            escape_existing_file(&dir.path().join("dump.txt")),
            dir.path().join("dump(1).txt")
        );

        fs::write(dir.path().join("dump(1).txt"), "b").unwrap();
        assert_eq!(
            escape_existing_file(&dir.path().join("dump.txt")),
            dir.path().join("dump(2).txt")
        );
    }

    #[test]
    fn test_escape_without_extension() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("README"), "a").unwrap();
        assert_eq!(
            escape_existing_file(&dir.path().join("README")),
            dir.path().join("README(1)")
        );
    }

    #[test]
    fn test_resolve_workdir_rejects_files_and_missing_paths() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "x").unwrap();

        let file_str = file.display().to_string();
        assert!(matches!(
            resolve_workdir(Some(&file_str)),
            Err(PathError::NotADirectory(_))
        ));

        let missing = dir.path().join("missing").display().to_string();
        assert!(matches!(
            resolve_workdir(Some(&missing)),
            Err(PathError::WorkDir { .. })
        ));
    }

    #[test]
    fn test_resolve_workdir_accepts_directory() {
        let dir = tempdir().unwrap();
        let dir_str = dir.path().display().to_string();
        let resolved = resolve_workdir(Some(&dir_str)).unwrap();
        assert!(resolved.is_dir());
    }
}
