// Stack structure - LIFO storage

use serde::{Deserialize, Serialize};

use crate::structure::{DataStructure, OperationKind, Value};

const SUPPORTED: &[OperationKind] = &[
    OperationKind::Init,
    OperationKind::Push,
    OperationKind::Pop,
    OperationKind::Clear,
    OperationKind::Reverse,
];

/// Stack subject. Stored bottom-to-top; the last element is the top.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StackStructure {
    items: Vec<Value>,
}

impl StackStructure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: Value) {
        self.items.push(value);
    }

    pub fn pop(&mut self) -> Option<Value> {
        self.items.pop()
    }

    pub fn top(&self) -> Option<Value> {
        self.items.last().copied()
    }

    /// Iterate from the top of the stack downward, the order the
    /// renderer draws boxes in
    pub fn from_top(&self) -> impl Iterator<Item = Value> + '_ {
        self.items.iter().rev().copied()
    }
}

impl DataStructure for StackStructure {
    fn type_name(&self) -> &'static str {
        "Stack"
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn state_description(&self) -> String {
        match self.top() {
            Some(top) => format!("Stack[{}] top={}", self.items.len(), top),
            None => format!("Stack[{}] (empty)", self.items.len()),
        }
    }

    fn supported_operations(&self) -> &'static [OperationKind] {
        SUPPORTED
    }
}
