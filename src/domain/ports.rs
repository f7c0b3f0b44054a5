use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// 判斷兩個檔案內容是否相同的策略
pub trait ContentComparator {
    fn name(&self) -> &'static str;
    fn equal(&self, a: &Path, b: &Path) -> Result<bool>;
}

impl<C: ContentComparator + ?Sized> ContentComparator for Box<C> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn equal(&self, a: &Path, b: &Path) -> Result<bool> {
        (**self).equal(a, b)
    }
}

/// 報表輸出目的地
pub trait ReportStore {
    /// Writes the whole report or nothing. Returns the final path.
    fn write_report(&self, file_name: &str, contents: &[u8]) -> Result<PathBuf>;
}
