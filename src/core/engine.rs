use crate::config::toml_config::{RunConfig, TomlConfig};
use crate::core::comparator::DirectorySetComparator;
use crate::core::pattern::FilePattern;
use crate::core::render::{render, RenderOptions};
use crate::domain::ports::{ContentComparator, ReportStore};
use crate::utils::error::Result;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub name: String,
    pub output_path: PathBuf,
    pub total_models: usize,
    pub mismatches: Vec<String>,
}

type ComparatorFactory = Box<dyn Fn() -> Box<dyn ContentComparator>>;

pub struct DiffEngine<S: ReportStore> {
    storage: S,
    config: TomlConfig,
    comparator_factory: Option<ComparatorFactory>,
}

impl<S: ReportStore> DiffEngine<S> {
    pub fn new(storage: S, config: TomlConfig) -> Self {
        Self {
            storage,
            config,
            comparator_factory: None,
        }
    }

    /// 以自訂的內容比對取代配置中的 strategy，每個 run 呼叫一次 factory
    pub fn with_comparator<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn ContentComparator> + 'static,
    {
        self.comparator_factory = Some(Box::new(factory));
        self
    }

    fn build_comparator(&self) -> Box<dyn ContentComparator> {
        match &self.comparator_factory {
            Some(factory) => factory(),
            None => self.config.strategy().build(),
        }
    }

    /// 依序執行選定的 run，第一個失敗即中止
    pub fn run(&self, selected: &[String]) -> Result<Vec<RunOutcome>> {
        let pattern = self.config.pattern()?;
        let runs = self.config.select_runs(selected)?;

        tracing::info!("Starting {} comparison run(s)", runs.len());

        let mut outcomes = Vec::with_capacity(runs.len());
        for run in runs {
            outcomes.push(self.run_one(run, &pattern)?);
        }
        Ok(outcomes)
    }

    fn run_one(&self, run: &RunConfig, pattern: &FilePattern) -> Result<RunOutcome> {
        tracing::info!("Run '{}' -> {}", run.name, run.output);

        let comparator =
            DirectorySetComparator::new(run.variants(), pattern.clone(), self.build_comparator());
        let report = comparator.compare()?;

        let text = render(&report, &RenderOptions { summary: run.summary() });
        let output_path = self.storage.write_report(&run.output, text.as_bytes())?;

        if report.all_identical() {
            tracing::info!(
                "Run '{}': {} models, all binary equal",
                run.name,
                report.rows.len()
            );
        } else {
            tracing::warn!(
                "Run '{}': {} models, {} binary unequal",
                run.name,
                report.rows.len(),
                report.mismatches.len()
            );
        }

        Ok(RunOutcome {
            name: run.name.clone(),
            output_path,
            total_models: report.rows.len(),
            mismatches: report.mismatches,
        })
    }
}
