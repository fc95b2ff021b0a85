//! Flat-file stores backing the moderation service.
//!
//! Every collection is a single JSON array (or, for reviews, a per-movie
//! CSV file) that is read and rewritten whole on each operation. Each
//! store guards its file with its own mutex, so operations within one
//! process serialize cleanly; there is no cross-process locking — the
//! deployment assumes a single writer.

pub mod bans;
pub mod reports;
pub mod reviews;
pub mod users;

pub use bans::BansDb;
pub use reports::ReportsDb;
pub use reviews::ReviewsDb;
pub use users::UsersDb;

use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{AppError, Result};

pub(crate) fn acquire<T>(lock: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    lock.lock()
        .map_err(|_| AppError::Internal("store lock poisoned".to_string()))
}

/// Read a whole JSON collection. An absent or empty file is an empty
/// collection; corrupt JSON propagates as a decode error, never as an
/// empty result.
pub(crate) fn read_json_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = fs::read_to_string(path)?;
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&raw)?)
}

/// Serialize the whole collection next to `path` and atomically rename
/// it into place, so a crash mid-write leaves either the old or the new
/// file on disk, never a torn one.
pub(crate) fn write_json_collection<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, serde_json::to_vec_pretty(items)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_file_reads_as_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let items: Vec<i64> = read_json_collection(&dir.path().join("missing.json")).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn blank_file_reads_as_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.json");
        fs::write(&path, "  \n").unwrap();
        let items: Vec<i64> = read_json_collection(&path).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn collections_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/items.json");
        write_json_collection(&path, &[1i64, 2, 3]).unwrap();
        let items: Vec<i64> = read_json_collection(&path).unwrap();
        assert_eq!(items, vec![1, 2, 3]);
        // No leftover temp file after the rename.
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn corrupt_json_propagates_as_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "[{\"truncated\":").unwrap();
        let result: Result<Vec<serde_json::Value>> = read_json_collection(&path);
        assert!(matches!(result, Err(AppError::Decode(_))));
    }
}
