use std::collections::BTreeMap;

use serde::Serialize;

use crate::cell::{Cell, CellType};

/// Cell counts per type tag. Every tag is present, zero-filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TypeHistogram {
    counts: BTreeMap<CellType, usize>,
}

impl Default for TypeHistogram {
    fn default() -> Self {
        Self {
            counts: CellType::ALL.iter().map(|&t| (t, 0)).collect(),
        }
    }
}

impl TypeHistogram {
    pub fn record(&mut self, kind: CellType) {
        *self.counts.entry(kind).or_insert(0) += 1;
    }

    pub fn get(&self, kind: CellType) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Number of cells counted.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Non-empty cells counted.
    pub fn filled(&self) -> usize {
        self.total() - self.get(CellType::Empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellType, usize)> + '_ {
        self.counts.iter().map(|(&k, &v)| (k, v))
    }

    /// Most frequent non-empty tag, if any cell is filled.
    pub fn dominant(&self) -> Option<CellType> {
        self.iter()
            .filter(|&(k, v)| k != CellType::Empty && v > 0)
            .max_by_key(|&(_, v)| v)
            .map(|(k, _)| k)
    }
}

/// Aggregate cell types over a classified grid.
pub fn histogram(cells: &[Vec<Cell>]) -> TypeHistogram {
    let mut hist = TypeHistogram::default();
    for cell in cells.iter().flatten() {
        hist.record(cell.kind);
    }
    hist
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::classify_grid;
    use crate::grid::{GridSnapshot, RawValue};

    #[test]
    fn all_tags_present_when_empty() {
        let hist = histogram(&[]);
        assert_eq!(hist.iter().count(), 7);
        assert_eq!(hist.total(), 0);
        assert_eq!(hist.dominant(), None);
    }

    #[test]
    fn counts_every_position() {
        let grid = GridSnapshot::from_values(vec![
            vec!["Label".into(), "1Q24".into(), "2Q24".into()],
            vec!["Revenue".into(), 100.0.into(), RawValue::Empty],
            vec!["Margin".into(), 0.3.into(), 0.35.into()],
        ])
        .with_formats(vec![
            vec![],
            vec![None, Some("$#,##0".into())],
            vec![None, Some("0%".into()), Some("0%".into())],
        ]);

        let hist = histogram(&classify_grid(&grid));
        assert_eq!(hist.total(), 9);
        assert_eq!(hist.get(CellType::Text), 5);
        assert_eq!(hist.get(CellType::Currency), 1);
        assert_eq!(hist.get(CellType::Percentage), 2);
        assert_eq!(hist.get(CellType::Empty), 1);
        assert_eq!(hist.filled(), 8);
        assert_eq!(hist.dominant(), Some(CellType::Text));
    }

    #[test]
    fn serializes_as_flat_map() {
        let mut hist = TypeHistogram::default();
        hist.record(CellType::Currency);
        let json = serde_json::to_value(&hist).unwrap();
        assert_eq!(json["currency"], 1);
        assert_eq!(json["empty"], 0);
    }
}
