// Header row detection
//
// Priority rule, not a score: within each scanned row the quarter rule is
// tried before the text rule, and the first row that satisfies either wins.

use crate::cell::Cell;
use crate::grid::RawValue;
use crate::quarter::is_quarter_label;

/// Quarter-labelled cells needed for a row to count as a header.
const MIN_QUARTER_CELLS: usize = 2;

/// Non-numeric text cells needed for a row to count as a header.
const MIN_TEXT_CELLS: usize = 3;

/// Which rule picked the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMatch {
    Quarters,
    Text,
    Default,
}

/// Index of the header row among the first `scan_rows` rows (0 if none qualifies).
pub fn find_header_row(rows: &[Vec<Cell>], scan_rows: usize) -> usize {
    detect_header_row(rows, scan_rows).0
}

/// Like [`find_header_row`], also reporting which rule fired.
pub fn detect_header_row(rows: &[Vec<Cell>], scan_rows: usize) -> (usize, HeaderMatch) {
    for (i, row) in rows.iter().take(scan_rows).enumerate() {
        let quarters = row.iter().filter(|c| is_quarter_label(&c.raw)).count();
        if quarters >= MIN_QUARTER_CELLS {
            log::debug!("header row {i}: {quarters} quarter labels");
            return (i, HeaderMatch::Quarters);
        }

        let texts = row.iter().filter(|c| is_header_text(&c.raw)).count();
        if texts >= MIN_TEXT_CELLS {
            log::debug!("header row {i}: {texts} text cells");
            return (i, HeaderMatch::Text);
        }
    }
    (0, HeaderMatch::Default)
}

/// Non-empty string that does not read as a number.
fn is_header_text(value: &RawValue) -> bool {
    match value {
        RawValue::Text(s) => !s.trim().is_empty() && value.parse_number().is_none(),
        _ => false,
    }
}
