use std::path::PathBuf;

/// 一個參與比對的目錄角色 (例如 Valve 的 LD 版本)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub group: String,
    pub label: Option<String>,
    pub directory: PathBuf,
}

impl Variant {
    pub fn new(group: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            group: group.into(),
            label: None,
            directory: directory.into(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// `Valve` 或 `Valve/HD`
    pub fn display_name(&self) -> String {
        match &self.label {
            Some(label) => format!("{}/{}", self.group, label),
            None => self.group.clone(),
        }
    }

    pub fn path_of(&self, model_name: &str) -> PathBuf {
        self.directory.join(model_name)
    }
}

/// 共用同一個標題欄的一組 variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantGroup {
    pub title: String,
    pub variants: Vec<Variant>,
}

impl VariantGroup {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            variants: Vec::new(),
        }
    }

    /// 加入一個沒有子標籤的 variant
    pub fn variant(mut self, directory: impl Into<PathBuf>) -> Self {
        let variant = Variant::new(self.title.clone(), directory);
        self.variants.push(variant);
        self
    }

    pub fn labeled_variant(mut self, label: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        let variant = Variant::new(self.title.clone(), directory).with_label(label);
        self.variants.push(variant);
        self
    }
}

/// Flattens groups into declaration order.
pub fn flatten_groups(groups: &[VariantGroup]) -> Vec<Variant> {
    groups.iter().flat_map(|g| g.variants.iter().cloned()).collect()
}

/// 單一檔名在各 variant 的存在情況
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceRecord {
    pub present: Vec<bool>,
    pub copies: Vec<PathBuf>,
}

impl PresenceRecord {
    pub fn resolve(model_name: &str, variants: &[Variant]) -> Self {
        let mut present = Vec::with_capacity(variants.len());
        let mut copies = Vec::new();

        for variant in variants {
            let candidate = variant.path_of(model_name);
            let exists = candidate.is_file();
            if exists {
                copies.push(candidate);
            }
            present.push(exists);
        }

        Self { present, copies }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub model_name: String,
    pub present: Vec<bool>,
    pub identical: bool,
}

/// 一次比對的完整結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonReport {
    pub variants: Vec<Variant>,
    pub rows: Vec<ReportRow>,
    pub name_width: usize,
    pub mismatches: Vec<String>,
}

impl ComparisonReport {
    pub fn all_identical(&self) -> bool {
        self.mismatches.is_empty()
    }

    pub fn row(&self, model_name: &str) -> Option<&ReportRow> {
        self.rows
            .binary_search_by(|row| row.model_name.as_str().cmp(model_name))
            .ok()
            .map(|idx| &self.rows[idx])
    }
}
