use crate::core::pattern::FilePattern;
use crate::domain::model::Variant;
use crate::utils::error::{DiffError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// 列出目錄中符合樣式的檔名 (只取檔名，不含目錄)
///
/// A path that is not an existing directory (missing, a regular file, or
/// below a regular file) yields an empty list. Listing failures on an
/// existing directory are returned to the caller.
pub fn scan_directory(directory: &Path, pattern: &FilePattern) -> Result<Vec<String>> {
    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(
                "Directory {} does not exist, treating it as empty",
                directory.display()
            );
            return Ok(Vec::new());
        }
        Err(e) if !directory.is_dir() => {
            tracing::warn!(
                "{} is not a directory ({}), treating it as empty",
                directory.display(),
                e
            );
            return Ok(Vec::new());
        }
        Err(e) => return Err(DiffError::io(directory, e)),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DiffError::io(directory, e))?;
        let file_type = entry.file_type().map_err(|e| DiffError::io(entry.path(), e))?;

        // symlink 指向檔案時也算
        let is_file = file_type.is_file() || (file_type.is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }

        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            tracing::warn!("Skipping non UTF-8 file name {:?}", entry.path());
            continue;
        };

        if pattern.matches(name) {
            names.push(name.to_string());
        }
    }

    tracing::debug!(
        "Scanned {}: {} files match {}",
        directory.display(),
        names.len(),
        pattern.as_str()
    );
    Ok(names)
}

/// 合併多個名單，排序並去除重複
pub fn union_names<I>(lists: I) -> Vec<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut all: Vec<String> = lists.into_iter().flatten().collect();
    all.sort();
    all.dedup();
    all
}

/// Scans every variant and returns the ModelName universe.
pub fn collect_model_names(variants: &[Variant], pattern: &FilePattern) -> Result<Vec<String>> {
    let mut lists = Vec::with_capacity(variants.len());
    for variant in variants {
        let names = scan_directory(&variant.directory, pattern)?;
        tracing::info!("{}: {} model files", variant.display_name(), names.len());
        lists.push(names);
    }
    Ok(union_names(lists))
}

/// 名稱欄寬 = 最長名稱 + 1；空集合為 1
pub fn name_column_width(names: &[String]) -> usize {
    names.iter().map(|n| n.len()).max().unwrap_or(0) + 1
}
