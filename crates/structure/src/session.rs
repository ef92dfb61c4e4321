// Caller-held "last result" slot.
//
// The engine itself is stateless; callers that want "current table"
// semantics keep one of these. Each analysis replaces the held table
// wholesale, and `clear` drops it.

use crate::config::StructureConfig;
use crate::engine;
use crate::grid::GridSnapshot;
use crate::model::StructuredTable;

#[derive(Debug, Clone, Default)]
pub struct StructureSession {
    config: StructureConfig,
    current: Option<StructuredTable>,
}

impl StructureSession {
    pub fn new(config: StructureConfig) -> Self {
        Self {
            config,
            current: None,
        }
    }

    pub fn config(&self) -> &StructureConfig {
        &self.config
    }

    /// Analyze a snapshot and hold the result in place of the previous one.
    pub fn analyze(&mut self, snapshot: &GridSnapshot) -> &StructuredTable {
        let table = engine::analyze(snapshot, &self.config);
        self.current.insert(table)
    }

    pub fn current(&self) -> Option<&StructuredTable> {
        self.current.as_ref()
    }

    /// Hand the held result over to the caller, leaving the slot empty.
    pub fn take(&mut self) -> Option<StructuredTable> {
        self.current.take()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
