use crate::domain::ports::ReportStore;
use crate::utils::error::{DiffError, Result};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// 寫入本機目錄；先寫暫存檔再原子性地取代目標檔
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl ReportStore for LocalStorage {
    fn write_report(&self, file_name: &str, contents: &[u8]) -> Result<PathBuf> {
        let full_path = self.base_path.join(file_name);
        let parent = match full_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        fs::create_dir_all(&parent).map_err(|e| DiffError::io(&parent, e))?;

        let mut temp = NamedTempFile::new_in(&parent).map_err(|e| DiffError::io(&parent, e))?;
        temp.write_all(contents)
            .and_then(|_| temp.as_file().sync_all())
            .map_err(|e| DiffError::io(temp.path(), e))?;

        // 暫存檔在 persist 失敗時會被自動刪除
        temp.persist(&full_path).map_err(|e| DiffError::Persist {
            path: full_path.clone(),
            source: e.error,
        })?;

        tracing::debug!("Wrote {} bytes to {}", contents.len(), full_path.display());
        Ok(full_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parent_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        let path = storage.write_report("reports/models_diff_ld.txt", b"first").unwrap();
        assert_eq!(path, dir.path().join("reports/models_diff_ld.txt"));

        storage.write_report("reports/models_diff_ld.txt", b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");

        // 不留下暫存檔
        let entries = fs::read_dir(dir.path().join("reports")).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_write_fails_when_target_is_directory() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("taken")).unwrap();
        fs::write(dir.path().join("taken").join("x"), b"x").unwrap();

        let storage = LocalStorage::new(dir.path());
        let err = storage.write_report("taken", b"report").unwrap_err();
        assert!(matches!(err, DiffError::Persist { .. }));

        let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }
}
