// Array operation factories
//
// Each factory inspects the array as it is right now and emits the step
// sequence that performs the edit. Shifts are chains of adjacent swaps so
// every step stays independently reversible.

use crate::operation::atomic::AtomicOp;
use crate::operation::user_op::UserOperation;
use crate::operation::BuildError;
use crate::structure::{ArrayStructure, DataStructure, Value};

/// Replace the array contents with `values`
///
/// One resize step (which captures any truncated tail) followed by one
/// write per element, so the whole init is undoable.
pub fn init(values: &[Value]) -> UserOperation {
    let mut op = UserOperation::new("ArrayInit", "Initialize array with values");
    op.add_step(AtomicOp::resize(values.len()));
    for (index, &value) in values.iter().enumerate() {
        op.add_step(AtomicOp::write(index, value));
    }
    op
}

/// Insert `value` at `index`, shifting the tail right
///
/// Grows by one, then swaps the tail rightward starting from the end so
/// no element is overwritten before it has moved, then writes the value
/// into the gap. `index == len` appends.
pub fn insert(array: &ArrayStructure, index: usize, value: Value) -> Result<UserOperation, BuildError> {
    let len = array.len();
    if index > len {
        return Err(BuildError::IndexOutOfRange { index, len });
    }

    let mut op = UserOperation::new("ArrayInsert", "Insert element into array");
    op.add_step(AtomicOp::resize(len + 1));
    for k in (index..len).rev() {
        op.add_step(AtomicOp::swap(k, k + 1));
    }
    op.add_step(AtomicOp::write(index, value));
    Ok(op)
}

/// Delete the element at `index`, shifting the tail left
pub fn delete(array: &ArrayStructure, index: usize) -> Result<UserOperation, BuildError> {
    let len = array.len();
    if index >= len {
        return Err(BuildError::IndexOutOfRange { index, len });
    }

    let mut op = UserOperation::new("ArrayDelete", "Delete element from array");
    for k in index..len - 1 {
        op.add_step(AtomicOp::swap(k + 1, k));
    }
    op.add_step(AtomicOp::resize(len - 1));
    Ok(op)
}

/// Sort ascending with bubble sort, one swap step per inversion resolved
///
/// Comparisons that do not swap emit no step, so the composite length
/// equals the number of swaps the sort actually performs.
pub fn sort(array: &ArrayStructure) -> UserOperation {
    let mut op = UserOperation::new("ArraySort", "Sort array using bubble sort");
    let mut data = array.elements().to_vec();
    let n = data.len();

    for pass in 1..n {
        for j in 0..n - pass {
            if data[j] > data[j + 1] {
                data.swap(j, j + 1);
                op.add_step(AtomicOp::swap(j, j + 1));
            }
        }
    }
    op
}
