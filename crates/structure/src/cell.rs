// Cell classification
//
// Turns the transport's (value, formula text, format) triple into a typed
// `Cell`. Everything downstream of this module works on `Cell` only.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::grid::{GridSnapshot, RawValue};

/// Semantic type tag of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellType {
    Empty,
    Boolean,
    Number,
    Currency,
    Percentage,
    Date,
    Text,
}

impl CellType {
    pub const ALL: [CellType; 7] = [
        CellType::Empty,
        CellType::Boolean,
        CellType::Number,
        CellType::Currency,
        CellType::Percentage,
        CellType::Date,
        CellType::Text,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Currency => "currency",
            Self::Percentage => "percentage",
            Self::Date => "date",
            Self::Text => "text",
        }
    }

    /// Number-like tags (number, currency, percentage).
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Number | Self::Currency | Self::Percentage)
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub raw: RawValue,
    #[serde(rename = "type")]
    pub kind: CellType,
    pub format: Option<String>,
    pub is_formula: bool,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        self.kind == CellType::Empty
    }
}

const CURRENCY_MARKERS: &[char] = &['$', '€', '£', '¥', '₹'];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%m-%d-%Y",
    "%d-%b-%Y",
    "%d-%b-%y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%B %d %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Classify one value under its number format.
///
/// Total: every input yields exactly one tag.
pub fn classify(value: &RawValue, format: Option<&str>) -> CellType {
    match value {
        RawValue::Empty => CellType::Empty,
        RawValue::Text(s) if s.is_empty() => CellType::Empty,
        RawValue::Bool(_) => CellType::Boolean,
        RawValue::Number(_) => classify_number_format(format.unwrap_or("")),
        RawValue::Text(s) => {
            if parses_as_date(s) {
                CellType::Date
            } else if s.trim().parse::<f64>().map_or(false, f64::is_finite) {
                CellType::Number
            } else {
                CellType::Text
            }
        }
    }
}

fn classify_number_format(format: &str) -> CellType {
    if format.contains(CURRENCY_MARKERS) {
        CellType::Currency
    } else if format.contains('%') {
        CellType::Percentage
    } else if has_date_tokens(format) {
        CellType::Date
    } else {
        CellType::Number
    }
}

/// Look for d/m/y tokens outside quoted literals, `[...]` sections and escapes,
/// so "#,##0;[Red]-#,##0" is not mistaken for a date format.
fn has_date_tokens(format: &str) -> bool {
    let mut in_quotes = false;
    let mut in_brackets = false;
    let mut chars = format.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if !in_brackets => in_quotes = !in_quotes,
            '[' if !in_quotes => in_brackets = true,
            ']' if !in_quotes => in_brackets = false,
            '\\' if !in_quotes && !in_brackets => {
                chars.next();
            }
            'd' | 'D' | 'm' | 'M' | 'y' | 'Y' if !in_quotes && !in_brackets => return true,
            _ => {}
        }
    }
    false
}

/// Calendar-date check for free text. Bare numbers never count as dates.
pub fn parses_as_date(text: &str) -> bool {
    let s = text.trim();
    if s.is_empty() || s.parse::<f64>().is_ok() {
        return false;
    }

    DATE_FORMATS
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(s, fmt).is_ok())
        || DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(s, fmt).is_ok())
        || DateTime::parse_from_rfc3339(s).is_ok()
}

/// Formula text is any string starting with `=`.
pub fn is_formula_text(formula: Option<&RawValue>) -> bool {
    matches!(formula, Some(RawValue::Text(s)) if s.starts_with('='))
}

/// Classify the cell at one grid position.
pub fn classify_position(grid: &GridSnapshot, row: usize, col: usize) -> Cell {
    let raw = grid.value(row, col).clone();
    let format = grid.format(row, col).map(str::to_string);
    let kind = classify(&raw, format.as_deref());
    Cell {
        raw,
        kind,
        format,
        is_formula: is_formula_text(grid.formula(row, col)),
    }
}

/// Classify every position of the grid, padding ragged rows to the full width.
pub fn classify_grid(grid: &GridSnapshot) -> Vec<Vec<Cell>> {
    let cols = grid.col_count();
    (0..grid.row_count())
        .map(|r| (0..cols).map(|c| classify_position(grid, r, c)).collect())
        .collect()
}
