// structviz - Operation/undo-redo engine for a data structure teaching
// visualizer
//
// The rendering shell (windowing, widgets, draw lists) lives outside this
// crate and talks to it through read-only state queries and semantic
// overlay hints. Everything that mutates a structure flows through an
// atomic operation, so every user action can be stepped, undone, and
// redone with exact state restoration.

pub mod controller;
pub mod manager;
pub mod operation;
pub mod overlay;
pub mod session;
pub mod structure;

// Re-export commonly used types for convenience
pub use controller::{Phase, StepOutcome, VisualizationController};
pub use manager::{OperationManager, OperationRecord};
pub use operation::{array_ops, stack_ops, tree_ops, AtomicOp, BuildError, UserOperation};
pub use overlay::OverlayHint;
pub use session::{SessionError, SessionFile};
pub use structure::{
    ArrayStructure, BinaryTreeStructure, DataStructure, NodeId, OperationKind, StackStructure,
    Structure, StructureId, StructureRegistry, TreeNode, Value,
};
