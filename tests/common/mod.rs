#![allow(dead_code)]

use mdl_diff::domain::ports::ContentComparator;
use mdl_diff::DiffError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// 建立一個含有多個 variant 目錄的暫存遊戲根目錄
pub struct ModelTree {
    pub root: TempDir,
}

impl ModelTree {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn dir(&self, variant: &str) -> PathBuf {
        self.root.path().join(variant)
    }

    pub fn model(&self, variant: &str, name: &str, bytes: &[u8]) -> PathBuf {
        let dir = self.dir(variant);
        fs::create_dir_all(&dir).expect("create variant dir");
        let path = dir.join(name);
        fs::write(&path, bytes).expect("write model");
        path
    }

    pub fn empty_dir(&self, variant: &str) -> PathBuf {
        let dir = self.dir(variant);
        fs::create_dir_all(&dir).expect("create variant dir");
        dir
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }
}

/// 把 Windows 路徑轉成 TOML 可用的正斜線
pub fn toml_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// 每次比對都回報讀取失敗 (模擬被鎖住的模型檔)
pub struct FailingComparator;

impl ContentComparator for FailingComparator {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn equal(&self, a: &Path, _b: &Path) -> mdl_diff::Result<bool> {
        Err(DiffError::io(
            a,
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "locked"),
        ))
    }
}
