// src/system/files.rs

use crate::{constants::TEXT_EXTENSION, core::paths::escape_existing_file};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("File '{0}' does not exist.")]
    NotFound(String),
    #[error("Could not open '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not create '{path}': {source}")]
    Create {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Opens `file_name` relative to `root` for reading.
///
/// If the name has no `.txt` suffix and does not exist as given, `<name>.txt` is tried.
pub fn open_reader(root: &Path, file_name: &str) -> Result<BufReader<File>, FileError> {
    let mut path = root.join(file_name);
    let has_text_suffix = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TEXT_EXTENSION));
    if !has_text_suffix && !path.exists() {
        path = root.join(format!("{}.{}", file_name, TEXT_EXTENSION));
    }
    if !path.is_file() {
        return Err(FileError::NotFound(path.display().to_string()));
    }

    log::debug!("Opening '{}' for reading", path.display());
    let file = File::open(&path).map_err(|e| FileError::Open {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(BufReader::new(file))
}

/// Creates a file for `file_name` relative to `root` without clobbering an existing
/// one. Returns the path actually used together with the writer.
pub fn open_writer(root: &Path, file_name: &str) -> Result<(PathBuf, BufWriter<File>), FileError> {
    let path = escape_existing_file(&root.join(file_name));
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| FileError::Create {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    log::debug!("Opening '{}' for writing", path.display());
    let file = File::create(&path).map_err(|e| FileError::Create {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok((path, BufWriter::new(file)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, Write};
    use tempfile::tempdir;

    #[test]
    fn test_reader_falls_back_to_txt() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "line one\nline two\n").unwrap();

        let reader = open_reader(dir.path(), "notes").unwrap();
        let lines: Vec<String> = reader.lines().map(Result::unwrap).collect();
        assert_eq!(lines, vec!["line one", "line two"]);
    }

    #[test]
    fn test_reader_missing_file() {
        let dir = tempdir().unwrap();
        let err = open_reader(dir.path(), "nothing").unwrap_err();
        assert!(matches!(err, FileError::NotFound(path) if path.ends_with("nothing.txt")));
    }

    #[test]
    fn test_writer_never_clobbers() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("out.log"), "keep me").unwrap();

        let (path, mut writer) = open_writer(dir.path(), "out.log").unwrap();
        writer.write_all(b"new").unwrap();
        writer.flush().unwrap();

        assert_eq!(path, dir.path().join("out(1).log"));
        assert_eq!(fs::read_to_string(dir.path().join("out.log")).unwrap(), "keep me");
        assert_eq!(fs::read_to_string(path).unwrap(), "new");
    }

    #[test]
    fn test_writer_creates_parent_folders() {
        let dir = tempdir().unwrap();
        let (path, _writer) = open_writer(dir.path(), "dumps/today/a.txt").unwrap();
        assert!(path.exists());
    }
}
