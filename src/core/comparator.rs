use crate::core::equality::all_identical;
use crate::core::pattern::FilePattern;
use crate::core::scan::{collect_model_names, name_column_width};
use crate::domain::model::{ComparisonReport, PresenceRecord, ReportRow, Variant};
use crate::domain::ports::ContentComparator;
use crate::utils::error::Result;

/// 比對多個平行目錄中的同名模型檔
pub struct DirectorySetComparator<C: ContentComparator> {
    variants: Vec<Variant>,
    pattern: FilePattern,
    comparator: C,
}

impl<C: ContentComparator> DirectorySetComparator<C> {
    pub fn new(variants: Vec<Variant>, pattern: FilePattern, comparator: C) -> Self {
        Self {
            variants,
            pattern,
            comparator,
        }
    }

    /// 判斷單一檔名的存在情況與是否全部相同
    pub fn classify(&self, model_name: &str) -> Result<ReportRow> {
        let presence = PresenceRecord::resolve(model_name, &self.variants);
        let identical = all_identical(&self.comparator, &presence.copies)?;

        Ok(ReportRow {
            model_name: model_name.to_string(),
            present: presence.present,
            identical,
        })
    }

    pub fn compare(&self) -> Result<ComparisonReport> {
        let names = collect_model_names(&self.variants, &self.pattern)?;
        let name_width = name_column_width(&names);

        tracing::info!(
            "Comparing {} unique models across {} variants ({} strategy)",
            names.len(),
            self.variants.len(),
            self.comparator.name()
        );

        let mut rows = Vec::with_capacity(names.len());
        let mut mismatches = Vec::new();

        for name in &names {
            let row = self.classify(name)?;
            if !row.identical {
                tracing::debug!("{} differs between variants", name);
                mismatches.push(name.clone());
            }
            rows.push(row);
        }

        Ok(ComparisonReport {
            variants: self.variants.clone(),
            rows,
            name_width,
            mismatches,
        })
    }
}
