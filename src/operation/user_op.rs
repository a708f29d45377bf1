// Composite user operation - an ordered sequence of atomic steps

use serde::{Deserialize, Serialize};

use crate::operation::atomic::AtomicOp;
use crate::structure::Structure;

/// One semantic user action, decomposed into atomic steps by a factory.
///
/// Execution runs the steps front to back. Undo runs them back to front:
/// later steps depend on state produced by earlier ones (a shift-then-
/// write insert, say), so teardown must mirror buildup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserOperation {
    name: String,
    description: String,
    steps: Vec<AtomicOp>,
}

impl UserOperation {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            steps: Vec::new(),
        }
    }

    /// Append a step. Steps run in insertion order.
    pub fn add_step(&mut self, op: AtomicOp) {
        self.steps.push(op);
    }

    /// Execute every step in order
    pub fn execute_all(&mut self, structure: &mut Structure) {
        for step in &mut self.steps {
            step.execute(structure);
        }
    }

    /// Undo every step in reverse order
    pub fn undo_all(&mut self, structure: &mut Structure) {
        for step in self.steps.iter_mut().rev() {
            step.undo(structure);
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn steps(&self) -> &[AtomicOp] {
        &self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub(crate) fn step_mut(&mut self, index: usize) -> &mut AtomicOp {
        &mut self.steps[index]
    }
}
