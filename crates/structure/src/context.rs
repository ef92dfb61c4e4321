// Prompt context rendering
//
// Plain-text view of a structured table for whoever assembles model prompts.
// Values are tab-separated, one row per line.

use crate::model::StructuredTable;
use crate::quarter::QuarterValue;

impl StructuredTable {
    /// Format the table as structured text for a prompt.
    pub fn to_prompt_text(&self) -> String {
        let mut result = String::new();

        if let Some(address) = &self.address {
            result.push_str(&format!("Range: {}\n", address));
        }
        result.push_str(&format!(
            "Size: {} rows x {} columns\n",
            self.dimensions.rows, self.dimensions.cols
        ));
        if let Some(s) = &self.sampling {
            result.push_str(&format!(
                "(sampled from {} rows x {} columns)\n",
                s.original_rows, s.original_cols
            ));
        }

        if self.is_empty() {
            return result;
        }
        result.push('\n');

        result.push_str("Headers: ");
        result.push_str(&self.header_labels().join("\t"));
        result.push('\n');

        if !self.key_rows.is_empty() {
            result.push_str("\nKey rows:\n");
            for row in &self.key_rows {
                let values: Vec<String> = row.values.iter().map(|v| v.display()).collect();
                result.push_str(&format!(
                    "[{}] {}\t{}\n",
                    row.category,
                    row.label,
                    values.join("\t")
                ));
            }
        }

        if !self.quarterly_series.is_empty() {
            result.push_str("\nQuarterly series:\n");
            for series in &self.quarterly_series {
                let points: Vec<String> = series
                    .points
                    .iter()
                    .map(|p| {
                        let value = match &p.value {
                            QuarterValue::Number(n) => format!("{n}"),
                            QuarterValue::Raw(raw) => raw.display(),
                        };
                        format!("{}={}", p.quarter, value)
                    })
                    .collect();
                result.push_str(&format!("{}: {}\n", series.row_label, points.join(", ")));
            }
        }

        if self.formula_stats.has_formulas {
            result.push_str(&format!(
                "\nFormulas: {} cells; functions: {}\n",
                self.formula_stats.count,
                self.formula_stats.function_names.join(", ")
            ));
        }

        if self.format_stats.has_formatting {
            result.push_str(&format!(
                "Number formats: {}\n",
                self.format_stats.distinct_formats.join(" | ")
            ));
        }

        result
    }
}
