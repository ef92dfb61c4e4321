// Row classification
//
// Each data row below the header gets a label (column 0), a category from
// an ordered rule table, and the typed view of its remaining cells.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::cell::{Cell, CellType};
use crate::grid::RawValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowCategory {
    Total,
    Subtotal,
    Key,
    Plain,
}

impl RowCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Total => "total",
            Self::Subtotal => "subtotal",
            Self::Key => "key",
            Self::Plain => "plain",
        }
    }

    /// Total and key rows are the ones worth surfacing.
    pub fn is_key(&self) -> bool {
        matches!(self, Self::Total | Self::Key)
    }
}

impl fmt::Display for RowCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    /// Row index in the source grid.
    pub index: usize,
    pub label: String,
    /// Raw values of every column after the label column.
    pub values: Vec<RawValue>,
    pub category: RowCategory,
    pub has_formulas: bool,
    /// Types of `values`, position for position.
    pub cell_types: Vec<CellType>,
}

// ---------------------------------------------------------------------------
// Label rules
// ---------------------------------------------------------------------------

const TOTAL_PATTERN: &str = r"(?i)^(total|sum|grand total|net|aggregate|consolidated)";
const SUBTOTAL_PATTERN: &str = r"(?i)subtotal|sub-total|sub total";
const KEY_FINANCIAL_PATTERN: &str = concat!(
    r"(?i)revenue|sales|income",
    r"|expense|cost|opex|capex",
    r"|profit|loss|ebitda|ebit",
    r"|cash|flow|fcf",
    r"|margin|ratio",
    r"|growth|change",
);

/// Category rules, evaluated top to bottom; first match wins, else `Plain`.
const LABEL_RULES: &[(&str, RowCategory)] = &[
    (TOTAL_PATTERN, RowCategory::Total),
    (KEY_FINANCIAL_PATTERN, RowCategory::Key),
    (SUBTOTAL_PATTERN, RowCategory::Subtotal),
];

static COMPILED_RULES: OnceLock<Vec<(Regex, RowCategory)>> = OnceLock::new();

fn compiled_rules() -> &'static [(Regex, RowCategory)] {
    COMPILED_RULES.get_or_init(|| {
        LABEL_RULES
            .iter()
            .map(|(pattern, category)| (Regex::new(pattern).expect("label rule pattern"), *category))
            .collect()
    })
}

fn rule_matches(category: RowCategory, label: &str) -> bool {
    compiled_rules()
        .iter()
        .any(|(re, c)| *c == category && re.is_match(label))
}

pub fn is_total_label(label: &str) -> bool {
    rule_matches(RowCategory::Total, label.trim())
}

pub fn is_subtotal_label(label: &str) -> bool {
    rule_matches(RowCategory::Subtotal, label.trim())
}

pub fn is_key_financial_label(label: &str) -> bool {
    rule_matches(RowCategory::Key, label.trim())
}

/// Resolve a label to its category through the rule table.
pub fn categorize(label: &str) -> RowCategory {
    let label = label.trim();
    compiled_rules()
        .iter()
        .find(|(re, _)| re.is_match(label))
        .map(|(_, category)| *category)
        .unwrap_or(RowCategory::Plain)
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify one grid row. Rows without a label are not rows at all.
pub fn classify_row(index: usize, cells: &[Cell]) -> Option<Row> {
    let label = cells.first()?.raw.display().trim().to_string();
    if label.is_empty() {
        return None;
    }

    let rest = cells.get(1..).unwrap_or(&[]);

    Some(Row {
        index,
        category: categorize(&label),
        label,
        values: rest.iter().map(|c| c.raw.clone()).collect(),
        has_formulas: cells.iter().any(|c| c.is_formula),
        cell_types: rest.iter().map(|c| c.kind).collect(),
    })
}

/// Classify every row below `header_row`.
///
/// `source_rows[i]` is the source-grid index of classified row `i`; when it is
/// shorter than the grid, positions map to themselves.
pub fn classify_rows(cells: &[Vec<Cell>], header_row: usize, source_rows: &[usize]) -> Vec<Row> {
    cells
        .iter()
        .enumerate()
        .skip(header_row + 1)
        .filter_map(|(i, row)| {
            let index = source_rows.get(i).copied().unwrap_or(i);
            classify_row(index, row)
        })
        .collect()
}
