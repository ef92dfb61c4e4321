use std::collections::HashSet;

use serde::Serialize;

/// The spreadsheet default; carries no information.
pub const DEFAULT_FORMAT: &str = "General";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormatStats {
    pub has_formatting: bool,
    /// Distinct non-default format strings, in order of first appearance.
    pub distinct_formats: Vec<String>,
}

/// Collect the number formats actually in use, usually from
/// [`crate::grid::GridSnapshot::format_cells`].
pub fn analyze<'a>(formats: impl IntoIterator<Item = &'a str>) -> FormatStats {
    let mut seen = HashSet::new();
    let mut distinct_formats = Vec::new();

    for format in formats {
        if format.is_empty() || format == DEFAULT_FORMAT {
            continue;
        }
        if seen.insert(format) {
            distinct_formats.push(format.to_string());
        }
    }

    FormatStats {
        has_formatting: !distinct_formats.is_empty(),
        distinct_formats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    fn cells(grid: &[Vec<Option<String>>]) -> impl Iterator<Item = &str> {
        grid.iter().flatten().filter_map(|f| f.as_deref())
    }

    #[test]
    fn skips_general_and_blank() {
        let grid = vec![
            vec![f("General"), None, f("")],
            vec![f("$#,##0"), f("0.0%"), f("$#,##0")],
            vec![f("General"), f("mm/dd/yyyy"), f("0.0%")],
        ];
        let stats = analyze(cells(&grid));
        assert!(stats.has_formatting);
        assert_eq!(stats.distinct_formats, vec!["$#,##0", "0.0%", "mm/dd/yyyy"]);
    }

    #[test]
    fn all_default_means_no_formatting() {
        let grid = vec![vec![f("General"), None]];
        let stats = analyze(cells(&grid));
        assert!(!stats.has_formatting);
        assert!(stats.distinct_formats.is_empty());
        assert_eq!(analyze(std::iter::empty()), FormatStats::default());
    }
}
