use crate::utils::error::{DiffError, Result};
use globset::{GlobBuilder, GlobMatcher};

pub const DEFAULT_MODEL_PATTERN: &str = "*.mdl";

/// 檔名萬用字元比對 (`*.mdl`)，不分大小寫
#[derive(Debug, Clone)]
pub struct FilePattern {
    glob: String,
    matcher: GlobMatcher,
}

impl FilePattern {
    pub fn new(glob: &str) -> Result<Self> {
        if glob.trim().is_empty() {
            return Err(DiffError::InvalidConfigValue {
                field: "pattern".to_string(),
                value: glob.to_string(),
                reason: "Pattern cannot be empty".to_string(),
            });
        }

        let matcher = GlobBuilder::new(glob)
            .case_insensitive(true)
            .literal_separator(true)
            .build()
            .map_err(|source| DiffError::InvalidConfigValue {
                field: "pattern".to_string(),
                value: glob.to_string(),
                reason: format!("Invalid glob pattern: {}", source),
            })?
            .compile_matcher();

        Ok(Self {
            glob: glob.to_string(),
            matcher,
        })
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.matcher.is_match(file_name)
    }

    pub fn as_str(&self) -> &str {
        &self.glob
    }
}

impl Default for FilePattern {
    fn default() -> Self {
        // 預設樣式為常數，編譯失敗只可能是程式錯誤
        Self::new(DEFAULT_MODEL_PATTERN).expect("default model pattern is valid")
    }
}
