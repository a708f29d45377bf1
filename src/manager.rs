// OperationManager - undo/redo stacks and the session history
//
// The manager maintains two stacks plus a flat history:
// - Undo stack: executed operations that can be undone
// - Redo stack: undone operations that can be re-executed
// - History: every composite ever executed, oldest first, for the
//   history panel and session persistence
//
// When a new operation executes, the redo stack is cleared: the timeline
// is linear, there is no branching history.

use serde::{Deserialize, Serialize};

use crate::operation::UserOperation;
use crate::structure::{StructureId, StructureRegistry};

/// One undo/redo stack entry: a cloned composite paired with the id of
/// the structure it executed against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRecord {
    operation: UserOperation,
    structure: StructureId,
}

impl OperationRecord {
    pub fn operation(&self) -> &UserOperation {
        &self.operation
    }

    pub fn structure(&self) -> StructureId {
        self.structure
    }
}

/// Manages operation execution, history, and undo/redo
#[derive(Debug, Default)]
pub struct OperationManager {
    undo_stack: Vec<OperationRecord>,
    redo_stack: Vec<OperationRecord>,
    history: Vec<UserOperation>,
}

impl OperationManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute a composite operation and record it
    ///
    /// With `already_executed` the steps ran elsewhere (the stepping
    /// controller) and are adopted as-is; otherwise they run here. Either
    /// way the redo stack is cleared, a clone of the operation is pushed
    /// onto the undo stack (independent of the history copy), and the
    /// operation joins the flat history.
    ///
    /// # Panics
    /// Panics if `structure` is not registered; executing against an
    /// unknown structure is a caller contract violation.
    pub fn execute_operation(
        &mut self,
        structures: &mut StructureRegistry,
        structure: StructureId,
        mut operation: UserOperation,
        already_executed: bool,
    ) {
        let Some(target) = structures.get_mut(structure) else {
            panic!("cannot execute operation against unregistered structure {structure}");
        };

        if !already_executed {
            operation.execute_all(target);
        }

        self.redo_stack.clear();
        self.undo_stack.push(OperationRecord {
            operation: operation.clone(),
            structure,
        });
        self.history.push(operation);
    }

    /// Undo the most recent operation
    ///
    /// Returns false when there is nothing to undo, or when the record's
    /// structure is no longer registered. This is an expected outcome,
    /// not an error; callers check the boolean.
    pub fn undo(&mut self, structures: &mut StructureRegistry) -> bool {
        let Some(record) = self.undo_stack.last() else {
            return false;
        };
        let Some(structure) = structures.get_mut(record.structure) else {
            return false;
        };

        let Some(mut record) = self.undo_stack.pop() else {
            return false;
        };
        record.operation.undo_all(structure);
        self.redo_stack.push(record);
        true
    }

    /// Re-execute the most recently undone operation
    pub fn redo(&mut self, structures: &mut StructureRegistry) -> bool {
        let Some(record) = self.redo_stack.last() else {
            return false;
        };
        let Some(structure) = structures.get_mut(record.structure) else {
            return false;
        };

        let Some(mut record) = self.redo_stack.pop() else {
            return false;
        };
        record.operation.execute_all(structure);
        self.undo_stack.push(record);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Description of the operation the next undo would revert
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .map(|record| record.operation.description())
    }

    /// Description of the operation the next redo would re-apply
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .map(|record| record.operation.description())
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Every executed composite, oldest first
    pub fn history(&self) -> &[UserOperation] {
        &self.history
    }

    /// Undo stack entries, most recent first, for the history panel
    pub fn undo_entries(&self) -> impl Iterator<Item = &OperationRecord> {
        self.undo_stack.iter().rev()
    }

    /// Redo stack entries, most recent first
    pub fn redo_entries(&self) -> impl Iterator<Item = &OperationRecord> {
        self.redo_stack.iter().rev()
    }

    /// Wipe the history and both stacks. Used when an init action
    /// intentionally resets the timeline.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::{array_ops, stack_ops};
    use crate::structure::{ArrayStructure, DataStructure, StackStructure, Structure};

    fn array_session(values: &[i32]) -> (StructureRegistry, StructureId) {
        let mut structures = StructureRegistry::new();
        let id = structures.register(Structure::Array(ArrayStructure::from_values(values)));
        (structures, id)
    }

    fn elements(structures: &StructureRegistry, id: StructureId) -> Vec<i32> {
        structures
            .get(id)
            .and_then(Structure::as_array)
            .map(|array| array.elements().to_vec())
            .unwrap_or_default()
    }

    #[test]
    fn test_execute_operation() {
        let (mut structures, id) = array_session(&[1, 2]);
        let mut manager = OperationManager::new();

        let array = structures.get(id).unwrap().as_array().unwrap().clone();
        let op = array_ops::insert(&array, 0, 9).unwrap();
        manager.execute_operation(&mut structures, id, op, false);

        assert_eq!(elements(&structures, id), vec![9, 1, 2]);
        assert_eq!(manager.undo_len(), 1);
        assert_eq!(manager.redo_len(), 0);
        assert!(manager.can_undo());
        assert!(!manager.can_redo());
        assert_eq!(manager.history().len(), 1);
    }

    #[test]
    fn test_undo_and_redo() {
        let (mut structures, id) = array_session(&[1, 2]);
        let mut manager = OperationManager::new();

        let array = structures.get(id).unwrap().as_array().unwrap().clone();
        let op = array_ops::insert(&array, 2, 3).unwrap();
        manager.execute_operation(&mut structures, id, op, false);

        assert!(manager.undo(&mut structures));
        assert_eq!(elements(&structures, id), vec![1, 2]);
        assert_eq!(manager.undo_len(), 0);
        assert_eq!(manager.redo_len(), 1);

        assert!(manager.redo(&mut structures));
        assert_eq!(elements(&structures, id), vec![1, 2, 3]);
        assert_eq!(manager.undo_len(), 1);
        assert_eq!(manager.redo_len(), 0);
    }

    #[test]
    fn test_redo_stack_cleared_on_new_operation() {
        let (mut structures, id) = array_session(&[]);
        let mut manager = OperationManager::new();

        manager.execute_operation(&mut structures, id, array_ops::init(&[1]), false);
        assert!(manager.undo(&mut structures));
        assert!(manager.can_redo());

        manager.execute_operation(&mut structures, id, array_ops::init(&[2]), false);
        assert!(!manager.can_redo());
        assert_eq!(manager.redo_len(), 0);
    }

    #[test]
    fn test_undo_with_empty_stack() {
        let mut structures = StructureRegistry::new();
        let mut manager = OperationManager::new();

        assert!(!manager.undo(&mut structures));
        assert!(!manager.redo(&mut structures));
    }

    #[test]
    fn test_records_route_to_their_own_structure() {
        let mut structures = StructureRegistry::new();
        let array_id = structures.register(Structure::Array(ArrayStructure::new()));
        let stack_id = structures.register(Structure::Stack(StackStructure::new()));
        let mut manager = OperationManager::new();

        manager.execute_operation(&mut structures, array_id, array_ops::init(&[5]), false);
        manager.execute_operation(&mut structures, stack_id, stack_ops::push(7), false);

        // The most recent record belongs to the stack; undoing it must
        // not touch the array
        assert!(manager.undo(&mut structures));
        assert_eq!(elements(&structures, array_id), vec![5]);
        assert!(structures.get(stack_id).unwrap().is_empty());

        assert!(manager.undo(&mut structures));
        assert!(elements(&structures, array_id).is_empty());
    }

    #[test]
    fn test_undo_with_unregistered_structure_returns_false() {
        let (mut structures, id) = array_session(&[]);
        let mut manager = OperationManager::new();

        manager.execute_operation(&mut structures, id, array_ops::init(&[1]), false);
        structures.remove(id);

        assert!(!manager.undo(&mut structures));
        // The record stays; nothing was popped
        assert_eq!(manager.undo_len(), 1);
    }

    #[test]
    fn test_history_survives_undo() {
        let (mut structures, id) = array_session(&[]);
        let mut manager = OperationManager::new();

        manager.execute_operation(&mut structures, id, array_ops::init(&[1]), false);
        manager.execute_operation(&mut structures, id, array_ops::init(&[2]), false);
        manager.undo(&mut structures);

        // The flat history records everything executed this session,
        // regardless of the current undo position
        assert_eq!(manager.history().len(), 2);
        assert_eq!(manager.undo_len(), 1);
    }

    #[test]
    fn test_clear() {
        let (mut structures, id) = array_session(&[]);
        let mut manager = OperationManager::new();

        manager.execute_operation(&mut structures, id, array_ops::init(&[1]), false);
        manager.undo(&mut structures);
        manager.execute_operation(&mut structures, id, array_ops::init(&[3]), false);
        manager.clear();

        assert!(!manager.can_undo());
        assert!(!manager.can_redo());
        assert!(manager.history().is_empty());
    }

    #[test]
    fn test_descriptions() {
        let (mut structures, id) = array_session(&[]);
        let mut manager = OperationManager::new();

        assert!(manager.undo_description().is_none());
        manager.execute_operation(&mut structures, id, array_ops::init(&[1]), false);
        assert_eq!(
            manager.undo_description(),
            Some("Initialize array with values")
        );

        manager.undo(&mut structures);
        assert_eq!(
            manager.redo_description(),
            Some("Initialize array with values")
        );
    }
}
