use serde::Serialize;

use crate::format::FormatStats;
use crate::formula::FormulaStats;
use crate::grid::{RawValue, WorkbookObjects};
use crate::histogram::TypeHistogram;
use crate::quarter::QuarterlySeries;
use crate::rows::{Row, RowCategory};
use crate::sampling::SamplingInfo;

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Size of the grid that was actually classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
}

impl Dimensions {
    pub fn cells(&self) -> usize {
        self.rows * self.cols
    }
}

/// Everything inferred about one grid snapshot.
///
/// Built in one go by [`crate::engine::analyze`] and never patched afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredTable {
    pub address: Option<String>,
    pub dimensions: Dimensions,
    /// Present when the source grid was over budget and sampled.
    pub sampling: Option<SamplingInfo>,
    /// Source-grid index of the header row; `None` for an empty grid.
    pub header_row: Option<usize>,
    pub headers: Vec<RawValue>,
    pub rows: Vec<Row>,
    /// Rows categorized total or key.
    pub key_rows: Vec<Row>,
    pub total_rows: Vec<Row>,
    pub quarterly_series: Vec<QuarterlySeries>,
    pub formula_stats: FormulaStats,
    pub format_stats: FormatStats,
    pub type_histogram: TypeHistogram,
    pub objects: WorkbookObjects,
    pub summary: String,
}

impl StructuredTable {
    /// The result for an empty or absent grid.
    pub fn empty(address: Option<String>, objects: WorkbookObjects) -> Self {
        let mut table = Self {
            address,
            dimensions: Dimensions::default(),
            sampling: None,
            header_row: None,
            headers: Vec::new(),
            rows: Vec::new(),
            key_rows: Vec::new(),
            total_rows: Vec::new(),
            quarterly_series: Vec::new(),
            formula_stats: FormulaStats::default(),
            format_stats: FormatStats::default(),
            type_histogram: TypeHistogram::default(),
            objects,
            summary: String::new(),
        };
        table.summary = crate::summary::summarize(&table);
        table
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.cells() == 0
    }

    pub fn was_sampled(&self) -> bool {
        self.sampling.is_some()
    }

    /// Header labels as display strings.
    pub fn header_labels(&self) -> Vec<String> {
        self.headers.iter().map(RawValue::display).collect()
    }

    pub fn rows_in(&self, category: RowCategory) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(move |r| r.category == category)
    }

    /// Look a row up by its (trimmed) label, case-insensitively.
    pub fn row_by_label(&self, label: &str) -> Option<&Row> {
        let label = label.trim();
        self.rows.iter().find(|r| r.label.eq_ignore_ascii_case(label))
    }
}
