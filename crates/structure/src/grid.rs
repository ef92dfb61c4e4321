// Grid snapshot - the in-process contract with the spreadsheet transport.
//
// Three same-shaped 2D arrays (values, formula text, number formats) plus the
// range address and the workbook objects the transport noticed. Ragged input
// is tolerated: every accessor treats a missing position as empty/absent.

use serde::{Deserialize, Serialize};

use crate::error::StructureError;

static EMPTY_VALUE: RawValue = RawValue::Empty;

/// An untyped cell scalar as delivered by the transport.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Parse free-form user input (CSV field, pasted text).
    pub fn from_input(input: &str) -> Self {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return RawValue::Empty;
        }

        if trimmed.eq_ignore_ascii_case("true") {
            return RawValue::Bool(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return RawValue::Bool(false);
        }

        if !trimmed.starts_with('=') {
            if let Ok(num) = trimmed.parse::<f64>() {
                if num.is_finite() {
                    return RawValue::Number(num);
                }
            }
        }

        RawValue::Text(trimmed.to_string())
    }

    /// True for `Empty` and for text that is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Empty => true,
            RawValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric reading: numbers as-is, text only if it parses to a finite f64.
    pub fn parse_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) => Some(*n),
            RawValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Display string, spreadsheet-style.
    pub fn display(&self) -> String {
        match self {
            RawValue::Empty => String::new(),
            RawValue::Bool(true) => "TRUE".to_string(),
            RawValue::Bool(false) => "FALSE".to_string(),
            RawValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            RawValue::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            RawValue::Empty
        } else {
            RawValue::Text(s.to_string())
        }
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

/// Workbook objects reported alongside the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbookObjects {
    pub tables: usize,
    pub pivot_tables: usize,
    pub charts: usize,
}

impl WorkbookObjects {
    pub fn is_empty(&self) -> bool {
        self.tables == 0 && self.pivot_tables == 0 && self.charts == 0
    }
}

/// One snapshot of a selected range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSnapshot {
    /// Range address label (e.g. "Sheet1!A1:F20"), if the transport gave one.
    pub address: Option<String>,
    pub values: Vec<Vec<RawValue>>,
    /// Formula text per cell; non-formula cells carry their raw value.
    pub formulas: Option<Vec<Vec<RawValue>>>,
    /// Number-format string per cell.
    pub formats: Option<Vec<Vec<Option<String>>>>,
    pub objects: WorkbookObjects,
}

impl GridSnapshot {
    pub fn from_values(values: Vec<Vec<RawValue>>) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    pub fn from_json(input: &str) -> Result<Self, StructureError> {
        serde_json::from_str(input).map_err(|e| StructureError::SnapshotParse(e.to_string()))
    }

    pub fn with_formulas(mut self, formulas: Vec<Vec<RawValue>>) -> Self {
        self.formulas = Some(formulas);
        self
    }

    pub fn with_formats(mut self, formats: Vec<Vec<Option<String>>>) -> Self {
        self.formats = Some(formats);
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_objects(mut self, objects: WorkbookObjects) -> Self {
        self.objects = objects;
        self
    }

    pub fn row_count(&self) -> usize {
        self.values.len()
    }

    /// Widest row of the value grid. Shorter rows are read as padded with empties.
    pub fn col_count(&self) -> usize {
        self.values.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Formula entries inside the value grid's shape, row-major.
    pub fn formula_cells(&self) -> impl Iterator<Item = &RawValue> + '_ {
        within_shape(self.formulas.as_deref(), self.row_count(), self.col_count())
    }

    /// Format strings inside the value grid's shape, row-major.
    pub fn format_cells(&self) -> impl Iterator<Item = &str> + '_ {
        within_shape(self.formats.as_deref(), self.row_count(), self.col_count())
            .filter_map(|f| f.as_deref())
    }

    pub fn cell_count(&self) -> usize {
        self.row_count() * self.col_count()
    }

    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    pub fn value(&self, row: usize, col: usize) -> &RawValue {
        self.values
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_VALUE)
    }

    pub fn formula(&self, row: usize, col: usize) -> Option<&RawValue> {
        self.formulas.as_ref()?.get(row)?.get(col)
    }

    pub fn format(&self, row: usize, col: usize) -> Option<&str> {
        self.formats.as_ref()?.get(row)?.get(col)?.as_deref()
    }

    /// Project the given rows (in the given order) over the leading `cols` columns.
    ///
    /// Formula and format grids are projected alongside the values when present.
    pub fn select(&self, rows: &[usize], cols: usize) -> GridSnapshot {
        let values = rows
            .iter()
            .map(|&r| (0..cols).map(|c| self.value(r, c).clone()).collect())
            .collect();

        let formulas = self.formulas.as_ref().map(|_| {
            rows.iter()
                .map(|&r| {
                    (0..cols)
                        .map(|c| self.formula(r, c).cloned().unwrap_or_default())
                        .collect()
                })
                .collect()
        });

        let formats = self.formats.as_ref().map(|_| {
            rows.iter()
                .map(|&r| (0..cols).map(|c| self.format(r, c).map(str::to_string)).collect())
                .collect()
        });

        GridSnapshot {
            address: self.address.clone(),
            values,
            formulas,
            formats,
            objects: self.objects,
        }
    }
}

fn within_shape<T>(grid: Option<&[Vec<T>]>, rows: usize, cols: usize) -> impl Iterator<Item = &T> {
    grid.unwrap_or_default()
        .iter()
        .take(rows)
        .flat_map(move |row| row.iter().take(cols))
}
