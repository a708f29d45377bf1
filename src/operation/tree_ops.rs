// Binary tree operation factories

use crate::operation::atomic::AtomicOp;
use crate::operation::user_op::UserOperation;
use crate::operation::BuildError;
use crate::structure::{BinaryTreeStructure, DataStructure, NodeId, Value};

/// Build a tree from a level-order value list, `None` marking "no node"
///
/// Position 0 becomes the root (create + set-root). Every later position
/// `i` with a value is created into the temp slot and connected under
/// position `(i - 1) / 2`, as its parent's left child when `i` is odd,
/// right child when even. A `None` consumes its position but emits no
/// steps.
///
/// A value whose parent position is marked `None` is rejected before
/// anything mutates: connecting to a missing parent would draw a tree
/// that contradicts the entered sequence, and skipping would drop user
/// data silently.
///
/// The reset of any existing tree happens at build time, outside the
/// tracked step list; undoing the init unwinds to an empty tree.
pub fn init(
    tree: &mut BinaryTreeStructure,
    values: &[Option<Value>],
) -> Result<UserOperation, BuildError> {
    for (index, value) in values.iter().enumerate() {
        if index > 0 && value.is_some() {
            let parent = (index - 1) / 2;
            if values[parent].is_none() {
                return Err(BuildError::MissingParent { index, parent });
            }
        }
    }

    tree.clear();

    let mut op = UserOperation::new("BinaryTreeInit", "Initialize binary tree with values");
    let mut ids: Vec<Option<NodeId>> = Vec::with_capacity(values.len());

    for (index, value) in values.iter().enumerate() {
        let Some(value) = value else {
            ids.push(None);
            continue;
        };

        let id = tree.allocate_node_id();
        op.add_step(AtomicOp::create_node(id, *value));

        if index == 0 {
            op.add_step(AtomicOp::set_root(id));
        } else {
            let parent_index = (index - 1) / 2;
            let Some(parent) = ids[parent_index] else {
                // Unreachable: validated before the reset above
                return Err(BuildError::MissingParent {
                    index,
                    parent: parent_index,
                });
            };
            op.add_step(AtomicOp::connect(parent, id, index % 2 == 1));
        }
        ids.push(Some(id));
    }

    Ok(op)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::Structure;

    fn values(raw: &[Value]) -> Vec<Option<Value>> {
        raw.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_level_order_init_shape() {
        let mut tree = BinaryTreeStructure::new();
        let mut op = init(&mut tree, &values(&[10, 5, 15, 3, 7, 12, 20])).unwrap();

        let mut structure = Structure::Tree(tree);
        op.execute_all(&mut structure);
        let tree = structure.as_tree().unwrap();

        let root = tree.root_id().unwrap();
        assert_eq!(tree.node(root).unwrap().value, 10);

        let left = tree.child_of(root, true).unwrap();
        let right = tree.child_of(root, false).unwrap();
        assert_eq!(tree.node(left).unwrap().value, 5);
        assert_eq!(tree.node(right).unwrap().value, 15);

        let ll = tree.child_of(left, true).unwrap();
        let lr = tree.child_of(left, false).unwrap();
        assert_eq!(tree.node(ll).unwrap().value, 3);
        assert_eq!(tree.node(lr).unwrap().value, 7);

        let rl = tree.child_of(right, true).unwrap();
        let rr = tree.child_of(right, false).unwrap();
        assert_eq!(tree.node(rl).unwrap().value, 12);
        assert_eq!(tree.node(rr).unwrap().value, 20);

        assert_eq!(tree.node_count(), 7);
        assert_eq!(tree.temp_slot(), None);
    }

    #[test]
    fn test_init_undo_leaves_tree_empty() {
        let mut tree = BinaryTreeStructure::new();
        let mut op = init(&mut tree, &values(&[10, 5, 15])).unwrap();

        let mut structure = Structure::Tree(tree);
        op.execute_all(&mut structure);
        assert_eq!(structure.as_tree().unwrap().node_count(), 3);

        op.undo_all(&mut structure);
        let tree = structure.as_tree().unwrap();
        assert_eq!(tree.node_count(), 0);
        assert_eq!(tree.root_id(), None);
        assert_eq!(tree.temp_slot(), None);
    }

    #[test]
    fn test_none_positions_emit_no_steps() {
        let mut tree = BinaryTreeStructure::new();
        // 10 with only a right child: [10, None, 15]
        let mut op = init(&mut tree, &[Some(10), None, Some(15)]).unwrap();

        // create+set_root for 10, create+connect for 15
        assert_eq!(op.step_count(), 4);

        let mut structure = Structure::Tree(tree);
        op.execute_all(&mut structure);
        let tree = structure.as_tree().unwrap();
        let root = tree.root_id().unwrap();
        assert_eq!(tree.child_of(root, true), None);
        let right = tree.child_of(root, false).unwrap();
        assert_eq!(tree.node(right).unwrap().value, 15);
    }

    #[test]
    fn test_value_under_missing_parent_is_rejected() {
        let mut tree = BinaryTreeStructure::new();
        tree.insert_node(NodeId(0), 1);

        // Position 3's parent is position 1, which is marked no-node
        let result = init(&mut tree, &[Some(10), None, Some(15), Some(3)]);
        assert_eq!(
            result,
            Err(BuildError::MissingParent {
                index: 3,
                parent: 1
            })
        );

        // Rejection happens before the reset; the tree is untouched
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn test_empty_init() {
        let mut tree = BinaryTreeStructure::new();
        tree.insert_node(NodeId(0), 1);
        tree.set_root(Some(NodeId(0)));

        let op = init(&mut tree, &[]).unwrap();
        assert_eq!(op.step_count(), 0);
        // The untracked reset still cleared the old tree
        assert_eq!(tree.node_count(), 0);
    }
}
