// Oversized-range sampling
//
// Grids above the cell budget are replaced by a sub-grid that keeps the
// leading header rows, the trailing footer rows (where totals live) and an
// evenly spaced spread of middle rows, over the leading columns.

use serde::Serialize;

use crate::config::StructureConfig;
use crate::grid::GridSnapshot;

/// Which source rows and columns a sample keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplePlan {
    pub header_rows: Vec<usize>,
    pub middle_rows: Vec<usize>,
    pub footer_rows: Vec<usize>,
    /// Leading columns kept.
    pub cols: usize,
    pub original_rows: usize,
    pub original_cols: usize,
}

impl SamplePlan {
    /// Kept source rows in grid order.
    pub fn row_indices(&self) -> Vec<usize> {
        self.header_rows
            .iter()
            .chain(&self.middle_rows)
            .chain(&self.footer_rows)
            .copied()
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.header_rows.len() + self.middle_rows.len() + self.footer_rows.len()
    }

    pub fn info(&self) -> SamplingInfo {
        SamplingInfo {
            original_rows: self.original_rows,
            original_cols: self.original_cols,
            sampled_rows: self.row_count(),
            sampled_cols: self.cols,
        }
    }
}

/// Dimensions before and after sampling, reported with the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SamplingInfo {
    pub original_rows: usize,
    pub original_cols: usize,
    pub sampled_rows: usize,
    pub sampled_cols: usize,
}

/// A sampled grid plus the plan that produced it.
#[derive(Debug, Clone)]
pub struct SampledGrid {
    pub grid: GridSnapshot,
    pub plan: SamplePlan,
}

pub fn needs_sampling(rows: usize, cols: usize, config: &StructureConfig) -> bool {
    rows.saturating_mul(cols) > config.cell_budget
}

fn floor_sqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root.saturating_mul(root) > n {
        root -= 1;
    }
    while (root + 1).saturating_mul(root + 1) <= n {
        root += 1;
    }
    root
}

/// `k` indices spread evenly over `start..end`; all of them when `k` covers the range.
fn evenly_spaced(start: usize, end: usize, k: usize) -> Vec<usize> {
    let span = end.saturating_sub(start);
    if k == 0 || span == 0 {
        return Vec::new();
    }
    if k >= span {
        return (start..end).collect();
    }
    (0..k).map(|i| start + i * span / k).collect()
}

/// Plan a sample for a `rows x cols` grid, or `None` if it fits the budget.
pub fn plan(rows: usize, cols: usize, config: &StructureConfig) -> Option<SamplePlan> {
    if !needs_sampling(rows, cols, config) {
        return None;
    }

    let max_rows = floor_sqrt(config.cell_budget).max(1).min(rows);
    let max_cols = (config.cell_budget / max_rows).min(cols);

    let header_n = config.sample_header_rows.min(max_rows);
    let footer_n = config
        .sample_footer_rows
        .min(max_rows - header_n)
        .min(rows - header_n);
    let middle_budget = max_rows - header_n - footer_n;

    let footer_start = rows - footer_n;
    Some(SamplePlan {
        header_rows: (0..header_n).collect(),
        middle_rows: evenly_spaced(header_n, footer_start, middle_budget),
        footer_rows: (footer_start..rows).collect(),
        cols: max_cols,
        original_rows: rows,
        original_cols: cols,
    })
}

/// Sample the grid if it exceeds the budget.
pub fn sample(grid: &GridSnapshot, config: &StructureConfig) -> Option<SampledGrid> {
    let plan = plan(grid.row_count(), grid.col_count(), config)?;
    log::info!(
        "sampling {}x{} grid down to {}x{} (budget {})",
        plan.original_rows,
        plan.original_cols,
        plan.row_count(),
        plan.cols,
        config.cell_budget
    );
    let sub = grid.select(&plan.row_indices(), plan.cols);
    Some(SampledGrid { grid: sub, plan })
}
