use crate::model::StructuredTable;

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// One-paragraph description of a structured table.
pub fn summarize(table: &StructuredTable) -> String {
    let place = table.address.as_deref().unwrap_or("selection");

    if table.is_empty() {
        let mut out = format!("{place} is empty.");
        push_objects(&mut out, table);
        return out;
    }

    let mut out = format!(
        "{place}: {} x {}.",
        plural(table.dimensions.rows, "row", "rows"),
        plural(table.dimensions.cols, "column", "columns"),
    );

    if let Some(s) = &table.sampling {
        out.push_str(&format!(
            " Large range sampled from {} x {}.",
            plural(s.original_rows, "row", "rows"),
            plural(s.original_cols, "column", "columns"),
        ));
    }

    out.push_str(&format!(
        " Found {} and {}.",
        plural(table.key_rows.len(), "key financial row", "key financial rows"),
        plural(table.quarterly_series.len(), "quarterly series", "quarterly series"),
    ));

    if table.formula_stats.has_formulas {
        out.push_str(&format!(
            " {} ({}).",
            plural(table.formula_stats.count, "formula", "formulas"),
            table.formula_stats.function_names.join(", "),
        ));
    }

    push_objects(&mut out, table);
    out
}

fn push_objects(out: &mut String, table: &StructuredTable) {
    let objects = &table.objects;
    if objects.is_empty() {
        return;
    }

    let mut parts = Vec::new();
    if objects.tables > 0 {
        parts.push(plural(objects.tables, "table", "tables"));
    }
    if objects.pivot_tables > 0 {
        parts.push(plural(objects.pivot_tables, "pivot table", "pivot tables"));
    }
    if objects.charts > 0 {
        parts.push(plural(objects.charts, "chart", "charts"));
    }
    out.push_str(&format!(" Workbook has {}.", parts.join(", ")));
}
