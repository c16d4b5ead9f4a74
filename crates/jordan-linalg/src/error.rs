use jordan_tensor::TensorError;
use thiserror::Error;

/// An error type for the linear algebra operations.
#[derive(Error, Debug, PartialEq)]
pub enum LinalgError {
    /// The operands have incompatible shapes for the requested operation.
    #[error("Shape mismatch in {operation}: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// Name of the operation that rejected the operands.
        operation: &'static str,
        /// Shape the operation required.
        expected: Vec<usize>,
        /// Shape that was provided.
        actual: Vec<usize>,
    },

    /// Row, column or component index out of range.
    #[error("Index {index} out of bounds for dimension of size {size}")]
    IndexOutOfBounds {
        /// The invalid index.
        index: usize,
        /// The size of the indexed dimension.
        size: usize,
    },

    /// Tensor error
    #[error("Error with the tensor: {0}")]
    Tensor(#[from] TensorError),
}

impl LinalgError {
    pub(crate) fn shape_mismatch(
        operation: &'static str,
        expected: &[usize],
        actual: &[usize],
    ) -> Self {
        Self::ShapeMismatch {
            operation,
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }
}
