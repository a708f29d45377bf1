// Operation layer - atomic steps, composites, and the factories that
// decompose user actions into them
//
// Architecture:
// - AtomicOp: closed set of reversible single mutations (atomic.rs)
// - UserOperation: ordered step sequence for one user action (user_op.rs)
// - array_ops / stack_ops / tree_ops: one factory per user-facing action,
//   each encoding the decomposition algorithm against current state
//
// Factories validate parameters before anything mutates and refuse to
// build a doomed composite; execute-time checks inside the atomic ops
// remain as defense in depth.

pub mod array_ops;
pub mod atomic;
pub mod stack_ops;
pub mod tree_ops;
pub mod user_op;

pub use atomic::AtomicOp;
pub use user_op::UserOperation;

/// Factory-time rejection of invalid user parameters
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("value at position {index} has no parent: position {parent} is marked as no node")]
    MissingParent { index: usize, parent: usize },
}
