// Formula analysis
//
// Static scan of formula text: how many cells hold formulas and which
// functions they call. No parsing or evaluation.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::cell::is_formula_text;
use crate::grid::RawValue;

static FUNCTION_CALL: OnceLock<Regex> = OnceLock::new();

fn function_call_re() -> &'static Regex {
    FUNCTION_CALL.get_or_init(|| Regex::new(r"([A-Z]+)\(").expect("function-call pattern"))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormulaStats {
    pub has_formulas: bool,
    pub count: usize,
    /// Distinct function names, in order of first appearance.
    pub function_names: Vec<String>,
}

/// Scan formula entries, usually [`GridSnapshot::formula_cells`].
///
/// [`GridSnapshot::formula_cells`]: crate::grid::GridSnapshot::formula_cells
pub fn analyze<'a>(formulas: impl IntoIterator<Item = &'a RawValue>) -> FormulaStats {
    let mut count = 0;
    let mut seen = HashSet::new();
    let mut function_names = Vec::new();

    for cell in formulas {
        if !is_formula_text(Some(cell)) {
            continue;
        }
        count += 1;
        if let Some(text) = cell.as_text() {
            collect_function_names(text, &mut seen, &mut function_names);
        }
    }

    FormulaStats {
        has_formulas: count > 0,
        count,
        function_names,
    }
}

/// Append every `NAME(` call in `formula` not yet in `seen`.
fn collect_function_names(formula: &str, seen: &mut HashSet<String>, names: &mut Vec<String>) {
    for caps in function_call_re().captures_iter(formula) {
        let name = &caps[1];
        if seen.insert(name.to_string()) {
            names.push(name.to_string());
        }
    }
}

/// Distinct function names used in a single formula.
pub fn function_names(formula: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    collect_function_names(formula, &mut seen, &mut names);
    names
}
