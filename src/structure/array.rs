// Array structure - a growable sequence of values

use serde::{Deserialize, Serialize};

use crate::structure::{DataStructure, OperationKind, Value};

const SUPPORTED: &[OperationKind] = &[
    OperationKind::Init,
    OperationKind::Insert,
    OperationKind::Delete,
    OperationKind::Sort,
];

/// Array subject: indexed element storage
///
/// Mutators are only called by atomic operations, which range-check and
/// capture inverse data before touching anything here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrayStructure {
    elements: Vec<Value>,
}

impl ArrayStructure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: &[Value]) -> Self {
        Self {
            elements: values.to_vec(),
        }
    }

    /// Element sequence for rendering
    pub fn elements(&self) -> &[Value] {
        &self.elements
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.elements.get(index).copied()
    }

    /// Overwrite the element at `index`. Caller must have checked range.
    pub fn set(&mut self, index: usize, value: Value) {
        self.elements[index] = value;
    }

    /// Swap two elements. Caller must have checked both ranges.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.elements.swap(a, b);
    }

    /// Grow (zero-filling) or shrink to `new_len`
    pub fn resize(&mut self, new_len: usize) {
        self.elements.resize(new_len, 0);
    }
}

impl DataStructure for ArrayStructure {
    fn type_name(&self) -> &'static str {
        "Array"
    }

    fn len(&self) -> usize {
        self.elements.len()
    }

    fn clear(&mut self) {
        self.elements.clear();
    }

    fn state_description(&self) -> String {
        let rendered: Vec<String> = self.elements.iter().map(|v| v.to_string()).collect();
        format!("Array[{}]: [{}]", self.elements.len(), rendered.join(", "))
    }

    fn supported_operations(&self) -> &'static [OperationKind] {
        SUPPORTED
    }
}
