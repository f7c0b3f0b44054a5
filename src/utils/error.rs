use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiffError {
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to persist report to {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfig { field: String },

    #[error("Unknown run '{name}'. Available runs: {available}")]
    UnknownRun { name: String, available: String },
}

pub type Result<T> = std::result::Result<T, DiffError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    FileSystem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DiffError {
    /// 附帶路徑的 IO 錯誤
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        DiffError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            DiffError::Io { .. } | DiffError::Persist { .. } => ErrorCategory::FileSystem,
            DiffError::TomlParse(_)
            | DiffError::InvalidConfigValue { .. }
            | DiffError::MissingConfig { .. }
            | DiffError::UnknownRun { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::FileSystem => ErrorSeverity::Critical,
        }
    }

    /// 對應的程序結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DiffError::Io { .. } => {
                "Check that the model files are readable and not locked by another process"
            }
            DiffError::Persist { .. } => {
                "Check that the output directory exists and is writable"
            }
            DiffError::TomlParse(_) => "Make sure the configuration file is valid TOML",
            DiffError::InvalidConfigValue { .. } | DiffError::MissingConfig { .. } => {
                "Review the run configuration; use --dry-run to inspect the resolved runs"
            }
            DiffError::UnknownRun { .. } => "Pass one of the configured run names to --run",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DiffError::Io { path, .. } => {
                format!("Could not read '{}'", path.display())
            }
            DiffError::Persist { path, .. } => {
                format!("Could not write report '{}'", path.display())
            }
            DiffError::InvalidConfigValue { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}
