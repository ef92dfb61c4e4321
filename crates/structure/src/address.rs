// A1-notation helpers for labelling ranges in summaries and prompt text.

/// Spreadsheet column name for a 0-based index: 0 is A, 25 is Z, 26 is AA.
pub fn col_to_letter(col: usize) -> String {
    // Bijective base 26: there is no zero digit.
    let mut letters = Vec::new();
    let mut rest = col + 1;
    while rest > 0 {
        let digit = (rest - 1) % 26;
        letters.push(char::from(b'A' + digit as u8));
        rest = (rest - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// `B3` style reference for a 0-based position.
pub fn cell_ref(row: usize, col: usize) -> String {
    format!("{}{}", col_to_letter(col), row + 1)
}

/// `A1:C3` style reference; a single-cell range collapses to its cell.
pub fn range_ref(start_row: usize, start_col: usize, end_row: usize, end_col: usize) -> String {
    let start = cell_ref(start_row, start_col);
    if (start_row, start_col) == (end_row, end_col) {
        return start;
    }
    format!("{start}:{}", cell_ref(end_row, end_col))
}

/// Address of a `rows x cols` block anchored at A1. Empty blocks have no address.
pub fn block_ref(rows: usize, cols: usize) -> Option<String> {
    if rows == 0 || cols == 0 {
        return None;
    }
    Some(range_ref(0, 0, rows - 1, cols - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_col_to_letter() {
        assert_eq!(col_to_letter(0), "A");
        assert_eq!(col_to_letter(25), "Z");
        assert_eq!(col_to_letter(26), "AA");
        assert_eq!(col_to_letter(701), "ZZ");
        assert_eq!(col_to_letter(702), "AAA");
    }

    #[test]
    fn test_range_ref() {
        assert_eq!(range_ref(0, 0, 0, 0), "A1");
        assert_eq!(range_ref(0, 0, 9, 4), "A1:E10");
    }

    #[test]
    fn test_block_ref() {
        assert_eq!(block_ref(20, 6).as_deref(), Some("A1:F20"));
        assert_eq!(block_ref(1, 1).as_deref(), Some("A1"));
        assert_eq!(block_ref(0, 6), None);
    }
}
