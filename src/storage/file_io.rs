//! File I/O for user store documents
//!
//! A store document is replaced as a whole on every commit, so writes go to a
//! sibling temp file that is synced and then renamed over the target. A crash
//! leaves either the old or the new document on disk, never a mix.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::TrackerError;

/// State of a document on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    Missing,
    Valid,
    Corrupt,
}

impl FileState {
    pub fn label(&self) -> &'static str {
        match self {
            FileState::Missing => "not created yet",
            FileState::Valid => "ok",
            FileState::Corrupt => "unreadable",
        }
    }
}

/// Read a JSON document, falling back to `T::default()` for a missing or empty file
pub fn read_json<T, P>(path: P) -> Result<T, TrackerError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => {
            return Err(TrackerError::Storage(format!(
                "Failed to stat {}: {}",
                path.display(),
                e
            )))
        }
    };
    if metadata.len() == 0 {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| TrackerError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| TrackerError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Replace the document at `path` with `data` atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), TrackerError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            TrackerError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = temp_path_for(path);

    let result = write_and_sync(&temp_path, data).and_then(|()| {
        fs::rename(&temp_path, path)
            .map_err(|e| TrackerError::Storage(format!("Failed to replace {}: {}", path.display(), e)))
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

/// Classify the document at `path`
pub fn inspect<P: AsRef<Path>>(path: P) -> FileState {
    let path = path.as_ref();
    let Ok(file) = File::open(path) else {
        return FileState::Missing;
    };
    match serde_json::from_reader::<_, serde_json::Value>(BufReader::new(file)) {
        Ok(_) => FileState::Valid,
        Err(_) => FileState::Corrupt,
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "store".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

fn write_and_sync<T: Serialize>(temp_path: &Path, data: &T) -> Result<(), TrackerError> {
    let file = File::create(temp_path)
        .map_err(|e| TrackerError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| TrackerError::Storage(format!("Failed to serialize store: {}", e)))?;
    writer
        .flush()
        .map_err(|e| TrackerError::Storage(format!("Failed to flush store: {}", e)))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| TrackerError::Storage(format!("Failed to sync store: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Doc {
        months: Vec<String>,
    }

    fn doc() -> Doc {
        Doc {
            months: vec!["Jan 2025".into(), "Feb 2025".into()],
        }
    }

    #[test]
    fn test_missing_and_empty_files_read_as_default() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.json");
        let empty = temp_dir.path().join("empty.json");
        fs::write(&empty, "").unwrap();

        assert_eq!(read_json::<Doc, _>(&missing).unwrap(), Doc::default());
        assert_eq!(read_json::<Doc, _>(&empty).unwrap(), Doc::default());
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("users").join("alice.json");

        write_json_atomic(&path, &doc()).unwrap();
        assert_eq!(read_json::<Doc, _>(&path).unwrap(), doc());
        assert!(!temp_dir.path().join("users").join(".alice.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_a_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_json::<Doc, _>(&path).unwrap_err();
        assert!(matches!(err, TrackerError::Storage(_)));
    }

    #[test]
    fn test_inspect() {
        let temp_dir = TempDir::new().unwrap();
        let valid = temp_dir.path().join("valid.json");
        let corrupt = temp_dir.path().join("corrupt.json");
        write_json_atomic(&valid, &doc()).unwrap();
        fs::write(&corrupt, "nope").unwrap();

        assert_eq!(inspect(&valid), FileState::Valid);
        assert_eq!(inspect(&corrupt), FileState::Corrupt);
        assert_eq!(inspect(temp_dir.path().join("none.json")), FileState::Missing);
    }
}
