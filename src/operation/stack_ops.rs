// Stack operation factories

use crate::operation::atomic::AtomicOp;
use crate::operation::user_op::UserOperation;
use crate::structure::{DataStructure, StackStructure, Value};

/// Reset the stack and push `values` in input order
///
/// The pop-clear of the old contents happens here, outside the tracked
/// step list: init is a reset, and its undo only unwinds the pushes. The
/// stack's final top is the last input value.
pub fn init(stack: &mut StackStructure, values: &[Value]) -> UserOperation {
    stack.clear();

    let mut op = UserOperation::new("StackInit", "Initialize stack with values");
    for &value in values {
        op.add_step(AtomicOp::push(value));
    }
    op
}

/// Push one value
pub fn push(value: Value) -> UserOperation {
    let mut op = UserOperation::new("StackPush", "Push value onto stack");
    op.add_step(AtomicOp::push(value));
    op
}

/// Pop the top value
pub fn pop() -> UserOperation {
    let mut op = UserOperation::new("StackPop", "Pop value from stack");
    op.add_step(AtomicOp::pop());
    op
}

/// Pop every element, one tracked step each
pub fn clear(stack: &StackStructure) -> UserOperation {
    let mut op = UserOperation::new("StackClear", "Clear all elements from stack");
    for _ in 0..stack.len() {
        op.add_step(AtomicOp::pop());
    }
    op
}

/// Reverse the stack: pop everything, then push the popped values back in
/// pop order
pub fn reverse(stack: &StackStructure) -> UserOperation {
    let top_down: Vec<Value> = stack.from_top().collect();

    let mut op = UserOperation::new("StackReverse", "Reverse stack order");
    for _ in 0..top_down.len() {
        op.add_step(AtomicOp::pop());
    }
    for &value in &top_down {
        op.add_step(AtomicOp::push(value));
    }
    op
}
