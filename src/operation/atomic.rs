// Atomic operations - the smallest reversible units of mutation
//
// Each variant captures the inverse data it needs at execute time, not at
// construction time: composites are built before their early steps have
// run, so the state an op must restore is only knowable when its turn
// comes. An op that could not apply records `applied = false`, leaves the
// structure untouched, and turns its own undo into a no-op.
//
// Caller discipline: execute exactly once per forward pass. There is no
// guard against double-execute; the manager and controller provide the
// discipline.

use serde::{Deserialize, Serialize};

use crate::overlay::OverlayHint;
use crate::structure::{NodeId, Structure, Value};

/// Closed set of atomic operation kinds, dispatched through
/// execute/undo/describe/overlay. Serializes with a discriminant tag plus
/// all parameters, captured inverse data included, so a persisted record
/// can be restored and replayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AtomicOp {
    /// Overwrite the value at an array index
    Write {
        index: usize,
        new_value: Value,
        old_value: Option<Value>,
        applied: bool,
    },
    /// Swap two array elements; self-inverse
    Move {
        from: usize,
        to: usize,
        applied: bool,
    },
    /// Grow (zero-filling) or shrink the array, capturing any truncated tail
    Resize {
        new_len: usize,
        old_len: Option<usize>,
        removed: Vec<Value>,
        applied: bool,
    },
    /// Push a value onto the stack
    Push { value: Value, applied: bool },
    /// Pop the top of the stack
    Pop {
        popped: Option<Value>,
        applied: bool,
    },
    /// Allocate and register a node, placing it in the temp slot
    CreateNode {
        id: NodeId,
        value: Value,
        applied: bool,
    },
    /// Release a fully detached node
    DeleteNode {
        id: NodeId,
        saved_value: Option<Value>,
        from_temp: bool,
        applied: bool,
    },
    /// Wire a node under a parent's left or right slot
    Connect {
        parent: NodeId,
        child: NodeId,
        is_left: bool,
        old_child: Option<NodeId>,
        child_from_temp: bool,
        applied: bool,
    },
    /// Sever a parent-child link, parking the child in the temp slot
    Disconnect {
        parent: NodeId,
        child: NodeId,
        is_left: bool,
        applied: bool,
    },
    /// Make a node the root
    SetRoot {
        id: NodeId,
        old_root: Option<NodeId>,
        from_temp: bool,
        applied: bool,
    },
}

impl AtomicOp {
    pub fn write(index: usize, new_value: Value) -> Self {
        AtomicOp::Write {
            index,
            new_value,
            old_value: None,
            applied: false,
        }
    }

    pub fn swap(from: usize, to: usize) -> Self {
        AtomicOp::Move {
            from,
            to,
            applied: false,
        }
    }

    pub fn resize(new_len: usize) -> Self {
        AtomicOp::Resize {
            new_len,
            old_len: None,
            removed: Vec::new(),
            applied: false,
        }
    }

    pub fn push(value: Value) -> Self {
        AtomicOp::Push {
            value,
            applied: false,
        }
    }

    pub fn pop() -> Self {
        AtomicOp::Pop {
            popped: None,
            applied: false,
        }
    }

    pub fn create_node(id: NodeId, value: Value) -> Self {
        AtomicOp::CreateNode {
            id,
            value,
            applied: false,
        }
    }

    pub fn delete_node(id: NodeId) -> Self {
        AtomicOp::DeleteNode {
            id,
            saved_value: None,
            from_temp: false,
            applied: false,
        }
    }

    pub fn connect(parent: NodeId, child: NodeId, is_left: bool) -> Self {
        AtomicOp::Connect {
            parent,
            child,
            is_left,
            old_child: None,
            child_from_temp: false,
            applied: false,
        }
    }

    pub fn disconnect(parent: NodeId, child: NodeId, is_left: bool) -> Self {
        AtomicOp::Disconnect {
            parent,
            child,
            is_left,
            applied: false,
        }
    }

    pub fn set_root(id: NodeId) -> Self {
        AtomicOp::SetRoot {
            id,
            old_root: None,
            from_temp: false,
            applied: false,
        }
    }

    /// Whether the last execute pass actually mutated the structure
    pub fn applied(&self) -> bool {
        match self {
            AtomicOp::Write { applied, .. }
            | AtomicOp::Move { applied, .. }
            | AtomicOp::Resize { applied, .. }
            | AtomicOp::Push { applied, .. }
            | AtomicOp::Pop { applied, .. }
            | AtomicOp::CreateNode { applied, .. }
            | AtomicOp::DeleteNode { applied, .. }
            | AtomicOp::Connect { applied, .. }
            | AtomicOp::Disconnect { applied, .. }
            | AtomicOp::SetRoot { applied, .. } => *applied,
        }
    }

    /// Perform the mutation, capturing whatever this op needs to undo it.
    ///
    /// Invalid parameters (out-of-range index, empty stack, unknown node)
    /// are recorded as a failure and leave the structure unchanged; they
    /// are local, recoverable conditions. Applying an op to the wrong
    /// structure variant panics.
    pub fn execute(&mut self, structure: &mut Structure) {
        match self {
            AtomicOp::Write {
                index,
                new_value,
                old_value,
                applied,
            } => {
                let array = structure.expect_array();
                match array.get(*index) {
                    Some(old) => {
                        *old_value = Some(old);
                        array.set(*index, *new_value);
                        *applied = true;
                    }
                    None => {
                        *old_value = None;
                        *applied = false;
                    }
                }
            }
            AtomicOp::Move { from, to, applied } => {
                let array = structure.expect_array();
                if array.get(*from).is_some() && array.get(*to).is_some() {
                    array.swap(*from, *to);
                    *applied = true;
                } else {
                    *applied = false;
                }
            }
            AtomicOp::Resize {
                new_len,
                old_len,
                removed,
                applied,
            } => {
                let array = structure.expect_array();
                let current = array.elements().len();
                *old_len = Some(current);
                *removed = if *new_len < current {
                    array.elements()[*new_len..].to_vec()
                } else {
                    Vec::new()
                };
                array.resize(*new_len);
                *applied = true;
            }
            AtomicOp::Push { value, applied } => {
                structure.expect_stack().push(*value);
                *applied = true;
            }
            AtomicOp::Pop { popped, applied } => {
                *popped = structure.expect_stack().pop();
                *applied = popped.is_some();
            }
            AtomicOp::CreateNode { id, value, applied } => {
                let tree = structure.expect_tree();
                if tree.contains(*id) {
                    *applied = false;
                } else {
                    tree.insert_node(*id, *value);
                    tree.place_in_temp_slot(*id);
                    *applied = true;
                }
            }
            AtomicOp::DeleteNode {
                id,
                saved_value,
                from_temp,
                applied,
            } => {
                let tree = structure.expect_tree();
                let detached = tree.node(*id).is_some_and(|node| {
                    node.parent.is_none() && node.left.is_none() && node.right.is_none()
                }) && tree.root_id() != Some(*id);
                if !detached {
                    *applied = false;
                    return;
                }
                *from_temp = tree.take_from_temp_slot(*id);
                *saved_value = tree.remove_node(*id).map(|node| node.value);
                *applied = true;
            }
            AtomicOp::Connect {
                parent,
                child,
                is_left,
                old_child,
                child_from_temp,
                applied,
            } => {
                let tree = structure.expect_tree();
                if !tree.contains(*parent) || !tree.contains(*child) {
                    *applied = false;
                    return;
                }
                *old_child = tree.child_of(*parent, *is_left);
                if let Some(old) = *old_child {
                    if old != *child {
                        tree.set_parent(old, None);
                    }
                }
                *child_from_temp = tree.take_from_temp_slot(*child);
                tree.set_child(*parent, *is_left, Some(*child));
                tree.set_parent(*child, Some(*parent));
                *applied = true;
            }
            AtomicOp::Disconnect {
                parent,
                child,
                is_left,
                applied,
            } => {
                let tree = structure.expect_tree();
                if tree.child_of(*parent, *is_left) != Some(*child) {
                    *applied = false;
                    return;
                }
                tree.set_child(*parent, *is_left, None);
                tree.set_parent(*child, None);
                tree.place_in_temp_slot(*child);
                *applied = true;
            }
            AtomicOp::SetRoot {
                id,
                old_root,
                from_temp,
                applied,
            } => {
                let tree = structure.expect_tree();
                if !tree.contains(*id) {
                    *applied = false;
                    return;
                }
                *old_root = tree.root_id();
                *from_temp = tree.take_from_temp_slot(*id);
                tree.set_root(Some(*id));
                *applied = true;
            }
        }
    }

    /// Restore exactly what execute changed, using the captured inverse
    /// data. A no-op when the op never applied.
    pub fn undo(&mut self, structure: &mut Structure) {
        if !self.applied() {
            return;
        }
        match self {
            AtomicOp::Write {
                index, old_value, ..
            } => {
                if let Some(old) = *old_value {
                    structure.expect_array().set(*index, old);
                }
            }
            AtomicOp::Move { from, to, .. } => {
                structure.expect_array().swap(*from, *to);
            }
            AtomicOp::Resize {
                new_len,
                old_len,
                removed,
                ..
            } => {
                if let Some(old) = *old_len {
                    let array = structure.expect_array();
                    array.resize(old);
                    for (offset, value) in removed.iter().enumerate() {
                        array.set(*new_len + offset, *value);
                    }
                }
            }
            AtomicOp::Push { .. } => {
                structure.expect_stack().pop();
            }
            AtomicOp::Pop { popped, .. } => {
                if let Some(value) = *popped {
                    structure.expect_stack().push(value);
                }
            }
            AtomicOp::CreateNode { id, .. } => {
                let tree = structure.expect_tree();
                tree.take_from_temp_slot(*id);
                tree.remove_node(*id);
            }
            AtomicOp::DeleteNode {
                id,
                saved_value,
                from_temp,
                ..
            } => {
                if let Some(value) = *saved_value {
                    let tree = structure.expect_tree();
                    tree.insert_node(*id, value);
                    if *from_temp {
                        tree.place_in_temp_slot(*id);
                    }
                }
            }
            AtomicOp::Connect {
                parent,
                child,
                is_left,
                old_child,
                child_from_temp,
                ..
            } => {
                let tree = structure.expect_tree();
                tree.set_child(*parent, *is_left, *old_child);
                if let Some(old) = *old_child {
                    tree.set_parent(old, Some(*parent));
                }
                if *old_child != Some(*child) {
                    tree.set_parent(*child, None);
                }
                if *child_from_temp {
                    tree.place_in_temp_slot(*child);
                }
            }
            AtomicOp::Disconnect {
                parent,
                child,
                is_left,
                ..
            } => {
                let tree = structure.expect_tree();
                tree.take_from_temp_slot(*child);
                tree.set_child(*parent, *is_left, Some(*child));
                tree.set_parent(*child, Some(*parent));
            }
            AtomicOp::SetRoot {
                id,
                old_root,
                from_temp,
                ..
            } => {
                let tree = structure.expect_tree();
                if *from_temp {
                    tree.place_in_temp_slot(*id);
                }
                tree.set_root(*old_root);
            }
        }
    }

    /// Human-readable description for the history panel
    pub fn describe(&self) -> String {
        match self {
            AtomicOp::Write {
                index, new_value, ..
            } => {
                format!("Write {} to index {}", new_value, index)
            }
            AtomicOp::Move { from, to, .. } => {
                format!("Swap elements at {} and {}", from, to)
            }
            AtomicOp::Resize { new_len, .. } => format!("Resize array to {}", new_len),
            AtomicOp::Push { value, .. } => format!("Push {} onto stack", value),
            AtomicOp::Pop { popped, .. } => match popped {
                Some(value) => format!("Pop {} from stack", value),
                None => "Pop from stack".to_string(),
            },
            AtomicOp::CreateNode { id, value, .. } => {
                format!("Create node {} with value {}", id, value)
            }
            AtomicOp::DeleteNode { id, .. } => format!("Delete node {}", id),
            AtomicOp::Connect {
                parent,
                child,
                is_left,
                ..
            } => format!(
                "Connect node {} to {} ({})",
                child,
                parent,
                if *is_left { "left" } else { "right" }
            ),
            AtomicOp::Disconnect {
                parent,
                child,
                is_left,
                ..
            } => format!(
                "Disconnect node {} from {} ({})",
                child,
                parent,
                if *is_left { "left" } else { "right" }
            ),
            AtomicOp::SetRoot { id, .. } => format!("Set node {} as root", id),
        }
    }

    /// Semantic highlight requests for the renderer while this op is the
    /// current step. Positions are indices and node ids; geometry belongs
    /// to the rendering layer.
    pub fn overlay_hints(&self, structure: &Structure) -> Vec<OverlayHint> {
        match self {
            AtomicOp::Write { index, .. } => vec![OverlayHint::ArrayIndex { index: *index }],
            AtomicOp::Move { from, to, .. } => vec![OverlayHint::ArraySwap {
                from: *from,
                to: *to,
            }],
            AtomicOp::Resize { new_len, .. } => vec![OverlayHint::ArrayBound { len: *new_len }],
            AtomicOp::Push { .. } | AtomicOp::Pop { .. } => vec![OverlayHint::StackTop],
            AtomicOp::CreateNode { id, .. } | AtomicOp::DeleteNode { id, .. } => {
                match structure.as_tree().and_then(|tree| tree.temp_slot()) {
                    Some(occupant) if occupant == *id => {
                        vec![OverlayHint::TempSlot, OverlayHint::Node { id: *id }]
                    }
                    _ => vec![OverlayHint::Node { id: *id }],
                }
            }
            AtomicOp::Connect {
                parent,
                child,
                is_left,
                ..
            } => vec![OverlayHint::ConnectEdge {
                parent: *parent,
                child: *child,
                is_left: *is_left,
            }],
            AtomicOp::Disconnect {
                parent,
                child,
                is_left,
                ..
            } => vec![OverlayHint::DetachEdge {
                parent: *parent,
                child: *child,
                is_left: *is_left,
            }],
            AtomicOp::SetRoot { id, .. } => {
                let mut hints = vec![OverlayHint::PromoteToRoot { id: *id }];
                if structure.as_tree().and_then(|tree| tree.temp_slot()) == Some(*id) {
                    hints.push(OverlayHint::TempSlot);
                }
                hints
            }
        }
    }
}
