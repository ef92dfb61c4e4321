use std::path::PathBuf;

use sheetsense_structure::cell::CellType;
use sheetsense_structure::quarter::QuarterValue;
use sheetsense_structure::{
    analyze, GridSnapshot, RawValue, RowCategory, StructureConfig, StructureSession, StructuredTable,
};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_fixture(name: &str) -> GridSnapshot {
    let path = fixtures_dir().join(name);
    let json = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    GridSnapshot::from_json(&json).unwrap()
}

fn load_and_run(name: &str) -> StructuredTable {
    analyze(&load_fixture(name), &StructureConfig::default())
}

fn text(s: &str) -> RawValue {
    RawValue::Text(s.to_string())
}

// -------------------------------------------------------------------------
// Quarterly P&L fixture
// -------------------------------------------------------------------------

#[test]
fn pnl_header_skips_title_rows() {
    let table = load_and_run("quarterly-pnl.json");

    assert_eq!(table.address.as_deref(), Some("P&L!A1:F10"));
    assert_eq!(table.header_row, Some(2));
    assert_eq!(
        table.header_labels(),
        vec!["Line item", "1Q24", "2Q24", "3Q24", "4Q24", "FY24"]
    );
    assert_eq!(table.headers.len(), table.dimensions.cols);
}

#[test]
fn pnl_row_categories() {
    let table = load_and_run("quarterly-pnl.json");

    let categories: Vec<_> = table
        .rows
        .iter()
        .map(|r| (r.label.as_str(), r.category))
        .collect();
    assert_eq!(
        categories,
        vec![
            ("Revenue", RowCategory::Key),
            ("Cost of goods sold", RowCategory::Key),
            ("Gross Margin %", RowCategory::Key),
            ("Headcount", RowCategory::Plain),
            ("Subtotal", RowCategory::Subtotal),
            ("Net Income", RowCategory::Total),
        ]
    );

    let key: Vec<_> = table.key_rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(key, vec!["Revenue", "Cost of goods sold", "Gross Margin %", "Net Income"]);
    assert_eq!(table.total_rows.len(), 1);
    assert_eq!(table.total_rows[0].index, 9);

    for row in &table.rows {
        assert_eq!(row.values.len(), table.dimensions.cols - 1);
        assert_eq!(row.cell_types.len(), row.values.len());
        assert!(!row.label.trim().is_empty());
    }
}

#[test]
fn pnl_quarterly_series() {
    let table = load_and_run("quarterly-pnl.json");

    assert_eq!(table.quarterly_series.len(), 6);

    let revenue = &table.quarterly_series[0];
    assert_eq!(revenue.row_label, "Revenue");
    let quarters: Vec<_> = revenue.points.iter().map(|p| p.quarter.as_str()).collect();
    assert_eq!(quarters, vec!["1Q24", "2Q24", "3Q24", "4Q24"]);
    assert_eq!(revenue.points[3].value, QuarterValue::Number(1600.0));
    assert_eq!(revenue.points[3].column, 4);

    let headcount = table
        .quarterly_series
        .iter()
        .find(|s| s.row_label == "Headcount")
        .unwrap();
    assert_eq!(headcount.points[2].value, QuarterValue::Raw(text("n/a")));
}

#[test]
fn pnl_formula_and_format_stats() {
    let table = load_and_run("quarterly-pnl.json");

    assert!(table.formula_stats.has_formulas);
    assert_eq!(table.formula_stats.count, 10);
    assert_eq!(table.formula_stats.function_names, vec!["SUM", "ROUND", "MAX"]);

    assert!(table.format_stats.has_formatting);
    assert_eq!(table.format_stats.distinct_formats, vec!["$#,##0", "0.0%", "#,##0"]);

    let margin = table.row_by_label("gross margin %").unwrap();
    assert!(margin.has_formulas);
    assert!(table.row_by_label("Subtotal").unwrap().has_formulas);
    assert!(!table.row_by_label("Headcount").unwrap().cell_types.contains(&CellType::Currency));
}

#[test]
fn pnl_type_histogram() {
    let table = load_and_run("quarterly-pnl.json");
    let hist = &table.type_histogram;

    assert_eq!(hist.total(), 60);
    assert_eq!(hist.get(CellType::Empty), 11);
    assert_eq!(hist.get(CellType::Text), 15);
    assert_eq!(hist.get(CellType::Currency), 15);
    assert_eq!(hist.get(CellType::Percentage), 5);
    assert_eq!(hist.get(CellType::Number), 14);
    assert_eq!(hist.get(CellType::Date), 0);
    assert_eq!(hist.get(CellType::Boolean), 0);
}

#[test]
fn pnl_summary_and_json() {
    let table = load_and_run("quarterly-pnl.json");

    assert_eq!(
        table.summary,
        "P&L!A1:F10: 10 rows x 6 columns. Found 4 key financial rows and 6 quarterly series. \
         10 formulas (SUM, ROUND, MAX). Workbook has 1 table, 2 charts."
    );

    let json = serde_json::to_value(&table).unwrap();
    assert_eq!(json["type_histogram"]["currency"], 15);
    assert_eq!(json["rows"][0]["category"], "key");
    assert_eq!(json["rows"][0]["cell_types"][0], "currency");
    assert_eq!(json["quarterly_series"][0]["points"][0]["value"], 1200.0);
    assert_eq!(json["quarterly_series"][3]["points"][2]["value"], "n/a");
    assert!(json["sampling"].is_null());
}

// -------------------------------------------------------------------------
// Documented behaviours
// -------------------------------------------------------------------------

#[test]
fn quarter_header_in_first_row() {
    let grid = GridSnapshot::from_values(vec![
        vec![text("1Q24"), text("2Q24"), text("3Q24")],
        vec![text("Revenue"), 1.0.into(), 2.0.into()],
    ]);
    let table = analyze(&grid, &StructureConfig::default());
    assert_eq!(table.header_row, Some(0));
}

#[test]
fn label_and_quarter_example() {
    let grid = GridSnapshot::from_values(vec![
        vec![text("Label"), text("1Q23"), text("2Q23")],
        vec![text("Widgets"), 100.0.into(), 200.0.into()],
    ]);
    let table = analyze(&grid, &StructureConfig::default());

    let points: Vec<_> = table.quarterly_series[0]
        .points
        .iter()
        .map(|p| (p.quarter.clone(), p.value.clone(), p.column))
        .collect();
    assert_eq!(
        points,
        vec![
            ("1Q23".to_string(), QuarterValue::Number(100.0), 1),
            ("2Q23".to_string(), QuarterValue::Number(200.0), 2),
        ]
    );
}

#[test]
fn total_revenue_and_margin_labels() {
    let grid = GridSnapshot::from_values(vec![
        vec![text("Metric"), text("1Q24"), text("2Q24")],
        vec![text("Total Revenue"), 1.0.into(), 2.0.into()],
        vec![text("Gross Margin %"), 0.1.into(), 0.2.into()],
    ]);
    let table = analyze(&grid, &StructureConfig::default());

    assert_eq!(table.row_by_label("Total Revenue").unwrap().category, RowCategory::Total);
    assert_eq!(table.row_by_label("Gross Margin %").unwrap().category, RowCategory::Key);
    assert_eq!(table.total_rows.len(), 1);
    assert_eq!(table.key_rows.len(), 2);
}

#[test]
fn blank_labels_never_surface() {
    let grid = GridSnapshot::from_values(vec![
        vec![text("Metric"), text("1Q24"), text("2Q24")],
        vec![text("   "), 1.0.into(), 2.0.into()],
        vec![text(""), 1.0.into(), 2.0.into()],
        vec![RawValue::Empty, 1.0.into(), 2.0.into()],
        vec![text("Total"), 3.0.into(), 6.0.into()],
    ]);
    let table = analyze(&grid, &StructureConfig::default());

    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.key_rows.len(), 1);
    assert_eq!(table.total_rows.len(), 1);
    assert_eq!(table.quarterly_series.len(), 1);
}

#[test]
fn sampling_threshold_is_exclusive() {
    let config = StructureConfig::default();

    let at_budget = GridSnapshot::from_values(vec![vec![RawValue::Number(1.0); 100]; 1000]);
    let table = analyze(&at_budget, &config);
    assert!(table.sampling.is_none());
    assert_eq!(table.type_histogram.total(), 100_000);

    let over_budget = GridSnapshot::from_values(vec![vec![RawValue::Number(1.0)]; 100_001]);
    let table = analyze(&over_budget, &config);
    let info = table.sampling.unwrap();
    assert_eq!(info.original_rows, 100_001);
    assert_eq!(info.sampled_rows, 316);
    assert_eq!(table.type_histogram.total(), 316);
    assert!(table.summary.contains("sampled from 100001 rows x 1 column"));
}

#[test]
fn sampled_grid_keeps_footer_totals() {
    let mut values = vec![vec![text("Account"), text("1Q24"), text("2Q24"), text("3Q24")]];
    for i in 1..40_000 {
        values.push(vec![
            text(&format!("GL {i:05}")),
            (i as f64).into(),
            (i as f64).into(),
            (i as f64).into(),
        ]);
    }
    values.push(vec![text("Grand Total"), 1.0.into(), 2.0.into(), 3.0.into()]);
    let grid = GridSnapshot::from_values(values);

    let table = analyze(&grid, &StructureConfig::default());

    assert!(table.was_sampled());
    assert_eq!(table.dimensions.rows, 316);
    assert_eq!(table.type_histogram.total(), 316 * 4);
    assert_eq!(table.total_rows.len(), 1);
    assert_eq!(table.total_rows[0].label, "Grand Total");
    assert_eq!(table.total_rows[0].index, 40_000);
    assert_eq!(table.quarterly_series.len(), 315);
}

#[test]
fn session_holds_last_result() {
    let mut session = StructureSession::new(StructureConfig::default());
    let first = session.analyze(&load_fixture("quarterly-pnl.json")).clone();
    assert_eq!(session.current(), Some(&first));

    session.analyze(&GridSnapshot::default());
    assert!(session.current().unwrap().is_empty());

    session.clear();
    assert!(session.current().is_none());
}
