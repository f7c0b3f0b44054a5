//! Fixed-width text rendering of a [`ComparisonReport`].
//!
//! ```text
//!            |  Valve  | Gearbox | BShift  |           |
//!            -------------------------------------------
//!            | present | present | present | identical |
//!            -------------------------------------------
//! barney.mdl |    X    |    X    |    X    |     X     |
//! gman.mdl   |    X    |         |    X    |           |
//!            -------------------------------------------
//!
//! Binary unequal models found:
//!
//! gman.mdl
//! ```

use crate::domain::model::{ComparisonReport, Variant};

pub const CELL_WIDTH: usize = 9;
const IDENTICAL_WIDTH: usize = 11;

pub const ALL_EQUAL_LINE: &str = "All models are binary equal";
pub const UNEQUAL_HEADER_LINE: &str = "Binary unequal models found:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// 表格後是否輸出不相同模型的摘要
    pub summary: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { summary: true }
    }
}

/// 置中，多出的一格空白放右邊
fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

fn mark(flag: bool) -> &'static str {
    if flag {
        "X"
    } else {
        " "
    }
}

/// 相鄰且同組名的 variant 合併成一個標題欄
fn group_spans(variants: &[Variant]) -> Vec<(&str, usize)> {
    let mut spans: Vec<(&str, usize)> = Vec::new();
    for variant in variants {
        match spans.last_mut() {
            Some((title, count)) if *title == variant.group.as_str() => *count += 1,
            _ => spans.push((variant.group.as_str(), 1)),
        }
    }
    spans
}

/// 橫跨 `count` 個 variant 欄的標題寬度
pub fn group_cell_width(count: usize) -> usize {
    CELL_WIDTH * count + count.saturating_sub(1)
}

pub fn table_width(variant_count: usize) -> usize {
    (CELL_WIDTH + 1) * variant_count + IDENTICAL_WIDTH + 2
}

struct TableWriter {
    out: String,
    gap: String,
    rule: String,
}

impl TableWriter {
    fn new(name_width: usize, variant_count: usize) -> Self {
        let gap = " ".repeat(name_width);
        let rule = format!("{}{}", gap, "-".repeat(table_width(variant_count)));
        Self {
            out: String::new(),
            gap,
            rule,
        }
    }

    fn line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn rule(&mut self) {
        let rule = std::mem::take(&mut self.rule);
        self.line(&rule);
        self.rule = rule;
    }

    /// `gap|cell|cell|...|identical|`
    fn header_row<I>(&mut self, cells: I, identical: &str)
    where
        I: IntoIterator<Item = String>,
    {
        let mut row = self.gap.clone();
        row.push('|');
        for cell in cells {
            row.push_str(&cell);
            row.push('|');
        }
        row.push_str(&center(identical, IDENTICAL_WIDTH));
        row.push('|');
        self.line(&row);
    }
}

pub fn render(report: &ComparisonReport, options: &RenderOptions) -> String {
    let variants = &report.variants;
    let mut table = TableWriter::new(report.name_width, variants.len());

    let titles = group_spans(variants)
        .into_iter()
        .map(|(title, count)| center(title, group_cell_width(count)));
    table.header_row(titles, "");
    table.rule();

    if variants.iter().any(|v| v.label.is_some()) {
        let labels = variants
            .iter()
            .map(|v| center(v.label.as_deref().unwrap_or(""), CELL_WIDTH));
        table.header_row(labels, "");
        table.rule();
    }

    let present = variants.iter().map(|_| center("present", CELL_WIDTH));
    table.header_row(present, "identical");
    table.rule();

    for row in &report.rows {
        let mut line = format!("{:<width$}", row.model_name, width = report.name_width);
        for flag in &row.present {
            line.push('|');
            line.push_str(&center(mark(*flag), CELL_WIDTH));
        }
        line.push('|');
        line.push_str(&center(mark(row.identical), IDENTICAL_WIDTH));
        line.push('|');
        table.line(&line);
    }

    table.rule();

    if options.summary {
        table.line("");
        if report.mismatches.is_empty() {
            table.line(ALL_EQUAL_LINE);
        } else {
            table.line(UNEQUAL_HEADER_LINE);
            table.line("");
            for name in &report.mismatches {
                table.line(name);
            }
        }
    }

    table.out
}
