use crate::core::equality::Strategy;
use crate::core::pattern::{FilePattern, DEFAULT_MODEL_PATTERN};
use crate::core::render::{group_cell_width, CELL_WIDTH};
use crate::domain::model::{Variant, VariantGroup};
use crate::utils::error::{DiffError, Result};
use crate::utils::validation::{
    validate_file_name, validate_max_chars, validate_non_empty_list, validate_non_empty_string,
    validate_path, validate_unique, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pattern: Option<String>,
    pub strategy: Option<Strategy>,
    pub output_dir: Option<String>,
    pub runs: Vec<RunConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub name: String,
    pub output: String,
    pub summary: Option<bool>,
    pub enabled: Option<bool>,
    pub groups: Vec<GroupConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupConfig {
    pub title: String,
    pub variants: Vec<VariantConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantConfig {
    pub label: Option<String>,
    pub path: String,
}

fn env_var_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"))
}

/// 未定義的變數保持原樣
fn expand_env_vars(value: &str) -> String {
    env_var_regex()
        .replace_all(value, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(&path).map_err(|e| DiffError::io(path.as_ref(), e))?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content)?;
        config.substitute_env_vars();
        Ok(config)
    }

    /// 解析後才替換路徑欄位中的環境變數 (例如 ${HL_ROOT})，值不需 TOML 跳脫
    fn substitute_env_vars(&mut self) {
        if let Some(output_dir) = self.output_dir.as_mut() {
            *output_dir = expand_env_vars(output_dir);
        }
        for run in &mut self.runs {
            run.output = expand_env_vars(&run.output);
            for variant in run.groups.iter_mut().flat_map(|g| g.variants.iter_mut()) {
                variant.path = expand_env_vars(&variant.path);
            }
        }
    }

    /// 內建的 Half-Life 目錄配置: ld、hd 與 (預設停用的) all
    pub fn half_life<P: AsRef<Path>>(game_root: P) -> Self {
        let root = game_root.as_ref();
        let models = |game: String| root.join(game).join("models").to_string_lossy().into_owned();
        let games = [("Valve", "valve"), ("Gearbox", "gearbox"), ("BShift", "bshift")];

        let single = |suffix: &str| -> Vec<GroupConfig> {
            games
                .iter()
                .map(|(title, dir)| GroupConfig {
                    title: title.to_string(),
                    variants: vec![VariantConfig {
                        label: None,
                        path: models(format!("{}{}", dir, suffix)),
                    }],
                })
                .collect()
        };

        let all_groups = games
            .iter()
            .map(|(title, dir)| GroupConfig {
                title: title.to_string(),
                variants: vec![
                    VariantConfig {
                        label: Some("LD".to_string()),
                        path: models(dir.to_string()),
                    },
                    VariantConfig {
                        label: Some("HD".to_string()),
                        path: models(format!("{}_hd", dir)),
                    },
                ],
            })
            .collect();

        Self {
            pattern: None,
            strategy: None,
            output_dir: None,
            runs: vec![
                RunConfig {
                    name: "ld".to_string(),
                    output: "models_diff_ld.txt".to_string(),
                    summary: None,
                    enabled: None,
                    groups: single(""),
                },
                RunConfig {
                    name: "hd".to_string(),
                    output: "models_diff_hd.txt".to_string(),
                    summary: None,
                    enabled: None,
                    groups: single("_hd"),
                },
                RunConfig {
                    name: "all".to_string(),
                    output: "models_diff_all.txt".to_string(),
                    summary: Some(true),
                    enabled: Some(false),
                    groups: all_groups,
                },
            ],
        }
    }

    pub fn pattern(&self) -> Result<FilePattern> {
        FilePattern::new(self.pattern.as_deref().unwrap_or(DEFAULT_MODEL_PATTERN))
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy.unwrap_or_default()
    }

    pub fn output_dir(&self) -> &str {
        self.output_dir.as_deref().unwrap_or(".")
    }

    pub fn run_names(&self) -> Vec<&str> {
        self.runs.iter().map(|r| r.name.as_str()).collect()
    }

    /// 選出要執行的 run；未指定時使用所有啟用中的 run，重複名稱只執行一次
    pub fn select_runs(&self, names: &[String]) -> Result<Vec<&RunConfig>> {
        if names.is_empty() {
            return Ok(self.runs.iter().filter(|r| r.is_enabled()).collect());
        }

        let mut seen = HashSet::new();
        names
            .iter()
            .filter(|name| seen.insert(name.as_str()))
            .map(|name| {
                self.runs
                    .iter()
                    .find(|r| &r.name == name)
                    .ok_or_else(|| DiffError::UnknownRun {
                        name: name.clone(),
                        available: self.run_names().join(", "),
                    })
            })
            .collect()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(pattern) = &self.pattern {
            validate_non_empty_string("pattern", pattern)?;
        }
        self.pattern()?;

        if let Some(output_dir) = &self.output_dir {
            validate_path("output_dir", output_dir)?;
        }

        validate_non_empty_list("runs", &self.runs)?;
        validate_unique("runs.name", self.runs.iter().map(|r| r.name.as_str()))?;

        for run in &self.runs {
            run.validate()?;
        }

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

impl RunConfig {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn summary(&self) -> bool {
        self.summary.unwrap_or(true)
    }

    pub fn variant_groups(&self) -> Vec<VariantGroup> {
        self.groups
            .iter()
            .map(|group| {
                group
                    .variants
                    .iter()
                    .fold(VariantGroup::new(&group.title), |acc, v| match &v.label {
                        Some(label) => acc.labeled_variant(label, PathBuf::from(&v.path)),
                        None => acc.variant(PathBuf::from(&v.path)),
                    })
            })
            .collect()
    }

    pub fn variants(&self) -> Vec<Variant> {
        crate::domain::model::flatten_groups(&self.variant_groups())
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("runs.name", &self.name)?;
        validate_file_name(&format!("runs.{}.output", self.name), &self.output)?;
        validate_non_empty_list(&format!("runs.{}.groups", self.name), &self.groups)?;

        for group in &self.groups {
            validate_non_empty_string(&format!("runs.{}.groups.title", self.name), &group.title)?;
            validate_non_empty_list(
                &format!("runs.{}.groups.{}.variants", self.name, group.title),
                &group.variants,
            )?;
            validate_max_chars(
                &format!("runs.{}.groups.title", self.name),
                &group.title,
                group_cell_width(group.variants.len()),
            )?;
            for variant in &group.variants {
                if let Some(label) = &variant.label {
                    validate_max_chars(
                        &format!("runs.{}.groups.{}.variants.label", self.name, group.title),
                        label,
                        CELL_WIDTH,
                    )?;
                }
                validate_path(
                    &format!("runs.{}.groups.{}.variants.path", self.name, group.title),
                    &variant.path,
                )?;
            }
        }
        Ok(())
    }
}
