// Quarterly series extraction
//
// Header columns labelled like "3Q24" form a time series. Each classified row
// contributes the values sitting under those columns.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::grid::RawValue;
use crate::rows::Row;

static QUARTER_LABEL: OnceLock<Regex> = OnceLock::new();

fn quarter_label_re() -> &'static Regex {
    QUARTER_LABEL.get_or_init(|| Regex::new(r"^[1-4][Qq][0-9]{2}$").expect("quarter-label pattern"))
}

/// True if the value is text of the form `[1-4]Q[0-9]{2}`, e.g. "3Q24".
pub fn is_quarter_label(value: &RawValue) -> bool {
    value
        .as_text()
        .map_or(false, |s| quarter_label_re().is_match(s.trim()))
}

/// A value under a quarter column: numeric when it parses, otherwise untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QuarterValue {
    Number(f64),
    Raw(RawValue),
}

impl QuarterValue {
    fn from_raw(raw: &RawValue) -> Self {
        match raw.parse_number() {
            Some(n) => QuarterValue::Number(n),
            None => QuarterValue::Raw(raw.clone()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            QuarterValue::Number(n) => Some(*n),
            QuarterValue::Raw(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuarterPoint {
    pub quarter: String,
    pub value: QuarterValue,
    /// Grid column the value came from (label column is 0).
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuarterlySeries {
    pub row_label: String,
    pub points: Vec<QuarterPoint>,
}

/// Header columns (index, trimmed label) that carry a quarter label.
///
/// Column 0 is the row-label column and never holds series data.
pub fn quarter_columns(headers: &[RawValue]) -> Vec<(usize, String)> {
    headers
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, h)| is_quarter_label(h))
        .map(|(j, h)| (j, h.display().trim().to_string()))
        .collect()
}

/// Build the series for one row; `None` if no quarter column has a value.
pub fn series_for_row(columns: &[(usize, String)], row: &Row) -> Option<QuarterlySeries> {
    let points: Vec<QuarterPoint> = columns
        .iter()
        .filter_map(|(j, label)| {
            let raw = row.values.get(j - 1)?;
            if raw.is_blank() {
                return None;
            }
            Some(QuarterPoint {
                quarter: label.clone(),
                value: QuarterValue::from_raw(raw),
                column: *j,
            })
        })
        .collect();

    if points.is_empty() {
        None
    } else {
        Some(QuarterlySeries {
            row_label: row.label.clone(),
            points,
        })
    }
}

/// Extract a series per row. Nothing is extracted without quarter headers.
pub fn extract_series(headers: &[RawValue], rows: &[Row]) -> Vec<QuarterlySeries> {
    let columns = quarter_columns(headers);
    if columns.is_empty() {
        return Vec::new();
    }
    rows.iter()
        .filter_map(|row| series_for_row(&columns, row))
        .collect()
}
