use serde::{Deserialize, Serialize};

use crate::error::StructureError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Tuning knobs for one classification pipeline.
///
/// Passed explicitly into [`crate::engine::analyze`]; nothing in the engine
/// reads a global budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureConfig {
    /// Largest grid (rows x cols) classified in full. Bigger grids are sampled.
    pub cell_budget: usize,
    /// How many leading rows the header detector looks at.
    pub header_scan_rows: usize,
    /// Leading rows always kept when sampling.
    pub sample_header_rows: usize,
    /// Trailing rows always kept when sampling.
    pub sample_footer_rows: usize,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            cell_budget: 100_000,
            header_scan_rows: 5,
            sample_header_rows: 5,
            sample_footer_rows: 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl StructureConfig {
    pub fn from_toml(input: &str) -> Result<Self, StructureError> {
        let config: StructureConfig =
            toml::from_str(input).map_err(|e| StructureError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, StructureError> {
        toml::to_string_pretty(self).map_err(|e| StructureError::ConfigParse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), StructureError> {
        if self.cell_budget == 0 {
            return Err(StructureError::ConfigValidation(
                "cell_budget must be greater than 0".into(),
            ));
        }

        if self.header_scan_rows == 0 {
            return Err(StructureError::ConfigValidation(
                "header_scan_rows must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Copy of this config with a different cell budget.
    pub fn with_cell_budget(mut self, cell_budget: usize) -> Self {
        self.cell_budget = cell_budget;
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
