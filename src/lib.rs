pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::LocalStorage;
pub use config::toml_config::TomlConfig;
pub use crate::core::{comparator::DirectorySetComparator, engine::DiffEngine, engine::RunOutcome};
pub use utils::error::{DiffError, Result};
