use crate::address::block_ref;
use crate::cell::classify_grid;
use crate::config::StructureConfig;
use crate::format;
use crate::formula;
use crate::grid::{GridSnapshot, RawValue};
use crate::header::detect_header_row;
use crate::histogram::histogram;
use crate::model::{Dimensions, StructuredTable};
use crate::quarter::extract_series;
use crate::rows::{classify_rows, RowCategory};
use crate::sampling;

/// Infer the table structure of one grid snapshot.
///
/// Never fails on content: odd cells classify as text, odd rows as plain, and
/// an empty grid yields [`StructuredTable::empty`]. Pure and deterministic.
pub fn analyze(snapshot: &GridSnapshot, config: &StructureConfig) -> StructuredTable {
    let original_rows = snapshot.row_count();
    let original_cols = snapshot.col_count();
    let address = snapshot
        .address
        .clone()
        .or_else(|| block_ref(original_rows, original_cols));

    if snapshot.is_empty() {
        log::debug!("empty grid, nothing to classify");
        return StructuredTable::empty(address, snapshot.objects);
    }

    // Sampling must happen before any per-cell work.
    let sampled = sampling::sample(snapshot, config);
    let (grid, source_rows, sampling_info) = match &sampled {
        Some(s) => (&s.grid, s.plan.row_indices(), Some(s.plan.info())),
        None => (snapshot, Vec::new(), None),
    };

    let cells = classify_grid(grid);
    let type_histogram = histogram(&cells);
    let formula_stats = formula::analyze(grid.formula_cells());
    let format_stats = format::analyze(grid.format_cells());

    let (header_idx, header_match) = detect_header_row(&cells, config.header_scan_rows);
    let headers: Vec<RawValue> = cells
        .get(header_idx)
        .map(|row| row.iter().map(|c| c.raw.clone()).collect())
        .unwrap_or_default();

    let rows = classify_rows(&cells, header_idx, &source_rows);
    let key_rows = rows.iter().filter(|r| r.category.is_key()).cloned().collect();
    let total_rows = rows
        .iter()
        .filter(|r| r.category == RowCategory::Total)
        .cloned()
        .collect();
    let quarterly_series = extract_series(&headers, &rows);

    log::debug!(
        "classified {} cells: header row {header_idx} ({header_match:?}), {} rows, {} series, {} formulas",
        type_histogram.total(),
        rows.len(),
        quarterly_series.len(),
        formula_stats.count
    );

    let mut table = StructuredTable {
        address,
        dimensions: Dimensions {
            rows: grid.row_count(),
            cols: grid.col_count(),
        },
        sampling: sampling_info,
        header_row: Some(source_rows.get(header_idx).copied().unwrap_or(header_idx)),
        headers,
        rows,
        key_rows,
        total_rows,
        quarterly_series,
        formula_stats,
        format_stats,
        type_histogram,
        objects: snapshot.objects,
        summary: String::new(),
    };
    table.summary = crate::summary::summarize(&table);
    table
}
