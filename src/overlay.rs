// Overlay hints - the semantic half of the rendering boundary
//
// Atomic operations describe what the renderer should highlight while
// they are the current step: which index, which node, which edge. The
// engine never computes pixel positions; box size, spacing, and origin
// belong to the rendering layer that consumes these hints.

use serde::{Deserialize, Serialize};

use crate::structure::NodeId;

/// A single highlight request for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OverlayHint {
    /// Highlight one array cell
    ArrayIndex { index: usize },
    /// Highlight two array cells being swapped
    ArraySwap { from: usize, to: usize },
    /// Mark the array's new length boundary
    ArrayBound { len: usize },
    /// Highlight the top-of-stack position
    StackTop,
    /// Highlight the temp slot
    TempSlot,
    /// Highlight one tree node
    Node { id: NodeId },
    /// Draw the edge being attached between two nodes
    ConnectEdge {
        parent: NodeId,
        child: NodeId,
        is_left: bool,
    },
    /// Draw the edge being severed between two nodes
    DetachEdge {
        parent: NodeId,
        child: NodeId,
        is_left: bool,
    },
    /// Mark a node moving into the root position
    PromoteToRoot { id: NodeId },
}
