pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::equality::Strategy;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "mdl-diff")]
#[command(about = "Compare model files across parallel content directories")]
pub struct CliConfig {
    /// Path to a TOML run configuration; the built-in Half-Life layout is used otherwise
    #[arg(short, long)]
    pub config: Option<String>,

    /// Game root for the built-in layout
    #[arg(long, default_value = ".")]
    pub game_root: String,

    /// Directory the reports are written to
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Override the equality strategy from config
    #[arg(long, value_enum)]
    pub strategy: Option<Strategy>,

    /// Only execute the named runs (repeatable)
    #[arg(long = "run")]
    pub runs: Vec<String>,

    /// Show the run plan without comparing or writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入 TOML 或內建配置，並套用命令列覆蓋設定
    pub fn load(&self) -> crate::Result<toml_config::TomlConfig> {
        let mut config = match &self.config {
            Some(path) => toml_config::TomlConfig::from_file(path)?,
            None => toml_config::TomlConfig::half_life(&self.game_root),
        };

        if let Some(output_dir) = &self.output_dir {
            config.output_dir = Some(output_dir.clone());
        }
        if let Some(strategy) = self.strategy {
            config.strategy = Some(strategy);
        }
        Ok(config)
    }
}
