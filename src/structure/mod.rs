// Data structure subjects for the operation engine
//
// The structures here are the mutable state that atomic operations act on.
// Their mutators carry no undo/redo awareness of their own: every mutation
// flows through an atomic operation, which captures the inverse data it
// needs. Bypassing the operations desynchronizes history from state.
//
// Records in the manager and the staging controller never hold references
// into a structure. They hold a StructureId resolved through the
// StructureRegistry, which owns every registered instance.

pub mod array;
pub mod stack;
pub mod tree;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use array::ArrayStructure;
pub use stack::StackStructure;
pub use tree::{BinaryTreeStructure, NodeId, TreeNode};

/// Element value stored by every structure variant
pub type Value = i32;

/// User-facing operation kinds, used to enable/disable actions per structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationKind {
    Init,
    Insert,
    Delete,
    Sort,
    Push,
    Pop,
    Clear,
    Reverse,
}

impl OperationKind {
    /// Human-readable name for action buttons and menus
    pub fn label(self) -> &'static str {
        match self {
            OperationKind::Init => "Initialize",
            OperationKind::Insert => "Insert",
            OperationKind::Delete => "Delete",
            OperationKind::Sort => "Sort",
            OperationKind::Push => "Push",
            OperationKind::Pop => "Pop",
            OperationKind::Clear => "Clear",
            OperationKind::Reverse => "Reverse",
        }
    }
}

/// Common query surface every structure variant exposes to the shell
///
/// The rendering layer only ever reads through these queries (plus the
/// variant-specific ones on each concrete type); it never mutates.
pub trait DataStructure {
    /// Structure type name, e.g. "Array"
    fn type_name(&self) -> &'static str;

    /// Number of elements (nodes for the tree)
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reset to the empty state. For the tree this releases every
    /// registry entry, including the temp slot occupant.
    fn clear(&mut self);

    /// One-line human-readable state summary, e.g. "Stack[3] top=7"
    fn state_description(&self) -> String;

    /// Operation kinds this structure supports
    fn supported_operations(&self) -> &'static [OperationKind];

    fn supports(&self, kind: OperationKind) -> bool {
        self.supported_operations().contains(&kind)
    }
}

/// Closed set of structure variants the engine operates on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Structure {
    Array(ArrayStructure),
    Stack(StackStructure),
    Tree(BinaryTreeStructure),
}

impl Structure {
    pub fn as_array(&self) -> Option<&ArrayStructure> {
        match self {
            Structure::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_stack(&self) -> Option<&StackStructure> {
        match self {
            Structure::Stack(stack) => Some(stack),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&BinaryTreeStructure> {
        match self {
            Structure::Tree(tree) => Some(tree),
            _ => None,
        }
    }

    /// Access the array variant, panicking otherwise.
    ///
    /// Applying an operation to the wrong structure variant is a caller
    /// contract violation, not an input error, so it aborts instead of
    /// reporting a recoverable failure. Factories make this unreachable.
    pub fn expect_array(&mut self) -> &mut ArrayStructure {
        match self {
            Structure::Array(array) => array,
            other => panic!(
                "array operation applied to a {} structure",
                other.type_name()
            ),
        }
    }

    pub fn expect_stack(&mut self) -> &mut StackStructure {
        match self {
            Structure::Stack(stack) => stack,
            other => panic!(
                "stack operation applied to a {} structure",
                other.type_name()
            ),
        }
    }

    pub fn expect_tree(&mut self) -> &mut BinaryTreeStructure {
        match self {
            Structure::Tree(tree) => tree,
            other => panic!(
                "tree operation applied to a {} structure",
                other.type_name()
            ),
        }
    }
}

impl DataStructure for Structure {
    fn type_name(&self) -> &'static str {
        match self {
            Structure::Array(array) => array.type_name(),
            Structure::Stack(stack) => stack.type_name(),
            Structure::Tree(tree) => tree.type_name(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Structure::Array(array) => array.len(),
            Structure::Stack(stack) => stack.len(),
            Structure::Tree(tree) => tree.len(),
        }
    }

    fn clear(&mut self) {
        match self {
            Structure::Array(array) => array.clear(),
            Structure::Stack(stack) => stack.clear(),
            Structure::Tree(tree) => tree.clear(),
        }
    }

    fn state_description(&self) -> String {
        match self {
            Structure::Array(array) => array.state_description(),
            Structure::Stack(stack) => stack.state_description(),
            Structure::Tree(tree) => tree.state_description(),
        }
    }

    fn supported_operations(&self) -> &'static [OperationKind] {
        match self {
            Structure::Array(array) => array.supported_operations(),
            Structure::Stack(stack) => stack.supported_operations(),
            Structure::Tree(tree) => tree.supported_operations(),
        }
    }
}

/// Stable identifier of a registered structure instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StructureId(u32);

impl std::fmt::Display for StructureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owning pool of structure instances, keyed by StructureId
///
/// History records and staged operations refer to structures by id and
/// resolve them here, so no long-lived reference into a structure exists
/// anywhere in the engine.
#[derive(Debug, Default)]
pub struct StructureRegistry {
    entries: BTreeMap<StructureId, Structure>,
    next_id: u32,
}

impl StructureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a structure and return its id
    pub fn register(&mut self, structure: Structure) -> StructureId {
        let id = StructureId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, structure);
        id
    }

    pub fn get(&self, id: StructureId) -> Option<&Structure> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: StructureId) -> Option<&mut Structure> {
        self.entries.get_mut(&id)
    }

    pub fn remove(&mut self, id: StructureId) -> Option<Structure> {
        self.entries.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = StructureId> + '_ {
        self.entries.keys().copied()
    }
}
