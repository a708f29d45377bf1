// Binary tree structure - arena of nodes keyed by stable ids
//
// Nodes are owned by the registry map. The root, the temp slot, and every
// parent/child link are ids resolved through the registry, never
// references, so no link can dangle past a node's removal.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::structure::{DataStructure, OperationKind, Value};

const SUPPORTED: &[OperationKind] = &[OperationKind::Init];

/// Stable identifier of a tree node, unique within one tree instance
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single tree node. Links are ids into the owning registry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub value: Value,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub parent: Option<NodeId>,
}

impl TreeNode {
    fn new(value: Value) -> Self {
        Self {
            value,
            left: None,
            right: None,
            parent: None,
        }
    }
}

/// Binary tree subject
///
/// The temp slot holds at most one detached node: a node that has been
/// created or disconnected but not yet wired into the tree. At every
/// atomic-operation boundary a registered node is either reachable from
/// the root, sitting in the temp slot, or detached awaiting its next step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BinaryTreeStructure {
    nodes: BTreeMap<NodeId, TreeNode>,
    root: Option<NodeId>,
    temp_slot: Option<NodeId>,
    next_node_id: u32,
}

impl BinaryTreeStructure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next unused node id. Ids are allocated when a
    /// composite operation is built, before any step executes.
    pub fn allocate_node_id(&mut self) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        id
    }

    /// Register a new detached node under `id`
    pub fn insert_node(&mut self, id: NodeId, value: Value) {
        self.nodes.insert(id, TreeNode::new(value));
    }

    /// Unregister a node, returning its last state
    pub fn remove_node(&mut self, id: NodeId) -> Option<TreeNode> {
        self.nodes.remove(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, id: Option<NodeId>) {
        self.root = id;
    }

    pub fn temp_slot(&self) -> Option<NodeId> {
        self.temp_slot
    }

    /// Place a node in the temp slot, displacing any previous occupant
    pub fn place_in_temp_slot(&mut self, id: NodeId) {
        self.temp_slot = Some(id);
    }

    /// Clear the temp slot if it holds `id`; returns whether it did
    pub fn take_from_temp_slot(&mut self, id: NodeId) -> bool {
        if self.temp_slot == Some(id) {
            self.temp_slot = None;
            true
        } else {
            false
        }
    }

    pub fn child_of(&self, parent: NodeId, is_left: bool) -> Option<NodeId> {
        let node = self.nodes.get(&parent)?;
        if is_left { node.left } else { node.right }
    }

    /// Set a parent's left or right child link
    pub fn set_child(&mut self, parent: NodeId, is_left: bool, child: Option<NodeId>) {
        if let Some(node) = self.nodes.get_mut(&parent) {
            if is_left {
                node.left = child;
            } else {
                node.right = child;
            }
        }
    }

    /// Set a node's parent back-reference
    pub fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = parent;
        }
    }
}

// The id-allocation counter is allocation state, not tree content: two
// trees with identical nodes, root, and temp slot are equal even if they
// consumed a different number of ids getting there.
impl PartialEq for BinaryTreeStructure {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes && self.root == other.root && self.temp_slot == other.temp_slot
    }
}

impl DataStructure for BinaryTreeStructure {
    fn type_name(&self) -> &'static str {
        "BinaryTree"
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.temp_slot = None;
        self.next_node_id = 0;
    }

    fn state_description(&self) -> String {
        match self.root.and_then(|id| self.node(id)) {
            Some(root) => format!("Tree[{} nodes] root={}", self.nodes.len(), root.value),
            None => format!("Tree[{} nodes] (empty)", self.nodes.len()),
        }
    }

    fn supported_operations(&self) -> &'static [OperationKind] {
        SUPPORTED
    }
}
