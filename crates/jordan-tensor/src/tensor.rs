use thiserror::Error;

use crate::storage::TensorStorage;

/// An error type for tensor operations.
#[derive(Error, Debug, PartialEq)]
pub enum TensorError {
    /// Tensor shape does not match the provided data.
    ///
    /// The product of the shape dimensions must equal the number of elements.
    #[error("Shape mismatch: expected {expected} elements for shape, but got {actual} elements in data")]
    InvalidShape {
        /// Expected number of elements based on shape
        expected: usize,
        /// Actual number of elements in the data
        actual: usize,
    },

    /// Index exceeds tensor bounds.
    #[error("Index {index} out of bounds for dimension of size {size}")]
    IndexOutOfBounds {
        /// The invalid index that was attempted
        index: usize,
        /// The size of the dimension being indexed
        size: usize,
    },

    /// Tensor dimensions incompatible for the requested operation.
    ///
    /// # Examples
    /// - Matrix multiplication with incompatible inner dimensions
    /// - Element-wise operations on different-shaped tensors
    /// - Concatenation along incompatible dimensions
    #[error("Dimension mismatch: {message}. Expected shape: {expected}, got: {actual}")]
    DimensionMismatch {
        /// Human-readable description of the mismatch
        message: String,
        /// Expected shape description
        expected: String,
        /// Actual shape description
        actual: String,
    },
}

impl TensorError {
    /// Creates an InvalidShape error with clear context.
    pub fn invalid_shape(expected: usize, actual: usize) -> Self {
        Self::InvalidShape { expected, actual }
    }

    /// Creates an IndexOutOfBounds error with clear context.
    pub fn index_out_of_bounds(index: usize, size: usize) -> Self {
        Self::IndexOutOfBounds { index, size }
    }

    /// Creates a DimensionMismatch error with formatted shapes.
    pub fn dimension_mismatch(
        message: impl Into<String>,
        expected: &[usize],
        actual: &[usize],
    ) -> Self {
        Self::DimensionMismatch {
            message: message.into(),
            expected: format!("{:?}", expected),
            actual: format!("{:?}", actual),
        }
    }
}

/// Compute the strides from the shape of a tensor.
///
/// # Arguments
///
/// * `shape` - The shape of the tensor.
///
/// # Returns
///
/// * `strides` - The strides of the tensor.
///
/// # Example
///
/// ```
/// use jordan_tensor::tensor::get_strides_from_shape;
///
/// let strides = get_strides_from_shape([2, 3, 4]);
/// assert_eq!(strides, [12, 4, 1]);
/// ```
pub fn get_strides_from_shape<const N: usize>(shape: [usize; N]) -> [usize; N] {
    let mut strides: [usize; N] = [0; N];
    let mut stride = 1;
    for i in (0..shape.len()).rev() {
        strides[i] = stride;
        stride *= shape[i];
    }
    strides
}

/// A multi-dimensional array (tensor) with owned, reference-counted data.
///
/// The data is always stored contiguously in row-major order, so the strides
/// are the standard strides of the shape. Cloning a tensor is cheap: both
/// copies point to the same buffer until one of them is mutated.
///
/// # Type Parameters
///
/// * `T` - The element type stored in the tensor
/// * `N` - The number of dimensions (const generic, checked at compile time)
///
/// # Examples
///
/// ```rust
/// use jordan_tensor::Tensor2;
///
/// let data: Vec<f64> = vec![1.0, 2.0, 3.0, 4.0];
/// let t = Tensor2::<f64>::from_shape_vec([2, 2], data).unwrap();
/// assert_eq!(t.shape, [2, 2]);
/// ```
pub struct Tensor<T, const N: usize> {
    /// The storage of the tensor.
    pub storage: TensorStorage<T>,
    /// The shape of the tensor.
    pub shape: [usize; N],
    /// The strides of the tensor data in memory.
    pub strides: [usize; N],
}

impl<T, const N: usize> Tensor<T, N> {
    /// Get the data of the tensor as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.storage.as_slice()
    }

    /// Get the data of the tensor as a mutable slice.
    ///
    /// A buffer shared with other tensors is copied before being handed out.
    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [T]
    where
        T: Clone,
    {
        self.storage.as_mut_slice()
    }

    /// Consumes the tensor and returns the underlying vector.
    pub fn into_vec(self) -> Vec<T>
    where
        T: Clone,
    {
        self.storage.into_vec()
    }

    /// Creates a new `Tensor` with the given shape and data.
    ///
    /// # Arguments
    ///
    /// * `shape` - An array containing the shape of the tensor.
    /// * `data` - A vector containing the data of the tensor.
    ///
    /// # Errors
    ///
    /// If the number of elements in the data does not match the shape of the tensor, an error is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use jordan_tensor::Tensor2;
    ///
    /// let t = Tensor2::<u8>::from_shape_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
    /// assert_eq!(t.strides, [2, 1]);
    /// ```
    pub fn from_shape_vec(shape: [usize; N], data: Vec<T>) -> Result<Self, TensorError> {
        let numel = shape.iter().product::<usize>();
        if numel != data.len() {
            return Err(TensorError::invalid_shape(numel, data.len()));
        }
        Ok(Self {
            storage: TensorStorage::from_vec(data),
            shape,
            strides: get_strides_from_shape(shape),
        })
    }

    /// Creates a new `Tensor` with the given shape and slice of data.
    ///
    /// # Errors
    ///
    /// If the number of elements in the data does not match the shape of the tensor, an error is returned.
    pub fn from_shape_slice(shape: [usize; N], data: &[T]) -> Result<Self, TensorError>
    where
        T: Clone,
    {
        Self::from_shape_vec(shape, data.to_vec())
    }

    /// Creates a new `Tensor` with the given shape and a default value.
    ///
    /// # Example
    ///
    /// ```
    /// use jordan_tensor::{Tensor1, Tensor2};
    ///
    /// let t = Tensor1::<u8>::from_shape_val([4], 0);
    /// assert_eq!(t.as_slice(), vec![0, 0, 0, 0]);
    ///
    /// let t = Tensor2::<u8>::from_shape_val([2, 2], 1);
    /// assert_eq!(t.as_slice(), vec![1, 1, 1, 1]);
    /// ```
    pub fn from_shape_val(shape: [usize; N], value: T) -> Self
    where
        T: Clone,
    {
        let numel = shape.iter().product::<usize>();
        Self {
            storage: TensorStorage::from_vec(vec![value; numel]),
            shape,
            strides: get_strides_from_shape(shape),
        }
    }

    /// Create a new `Tensor` with the given shape and a function to generate the data.
    ///
    /// The function `f` is called with the index of the element to generate.
    ///
    /// # Example
    ///
    /// ```
    /// use jordan_tensor::Tensor2;
    ///
    /// let t = Tensor2::<f64>::from_shape_fn([2, 2], |[i, j]| if i == j { 1.0 } else { 0.0 });
    /// assert_eq!(t.as_slice(), vec![1.0, 0.0, 0.0, 1.0]);
    /// ```
    pub fn from_shape_fn<F>(shape: [usize; N], mut f: F) -> Self
    where
        F: FnMut([usize; N]) -> T,
    {
        let numel = shape.iter().product::<usize>();
        let data: Vec<T> = (0..numel)
            .map(|i| {
                let mut index = [0; N];
                let mut j = i;
                for k in (0..N).rev() {
                    index[k] = j % shape[k];
                    j /= shape[k];
                }
                f(index)
            })
            .collect();
        Self {
            storage: TensorStorage::from_vec(data),
            shape,
            strides: get_strides_from_shape(shape),
        }
    }

    /// Create a new tensor with all elements set to zero.
    pub fn zeros(shape: [usize; N]) -> Self
    where
        T: Clone + num_traits::Zero,
    {
        Self::from_shape_val(shape, T::zero())
    }

    /// Returns the number of elements in the tensor.
    #[inline]
    pub fn numel(&self) -> usize {
        self.storage.len()
    }

    /// Returns true if the two tensors share the same underlying buffer.
    #[inline]
    pub fn shares_storage(&self, other: &Self) -> bool {
        self.storage.ptr_eq(&other.storage)
    }

    /// Get the offset of the element at the given index, or `None` when out of bounds.
    pub fn get_iter_offset(&self, index: [usize; N]) -> Option<usize> {
        let mut offset = 0;
        for ((&idx, dim_size), stride) in index.iter().zip(self.shape).zip(self.strides) {
            if idx >= dim_size {
                return None;
            }
            offset += idx * stride;
        }
        Some(offset)
    }

    /// Get the element at the given index without checking the bounds of each dimension.
    ///
    /// # Panics
    ///
    /// Panics if the resulting offset falls outside the buffer.
    pub fn get_unchecked(&self, index: [usize; N]) -> &T {
        let offset = index
            .iter()
            .zip(self.strides)
            .fold(0, |acc, (&idx, stride)| acc + idx * stride);
        &self.as_slice()[offset]
    }

    /// Get the element at the given index, checking if the index is out of bounds.
    ///
    /// # Example
    ///
    /// ```
    /// use jordan_tensor::Tensor2;
    ///
    /// let t = Tensor2::<u8>::from_shape_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
    /// assert_eq!(t.get([1, 0]), Some(&3));
    /// assert!(t.get([2, 0]).is_none());
    /// ```
    pub fn get(&self, index: [usize; N]) -> Option<&T> {
        self.get_iter_offset(index)
            .and_then(|i| self.as_slice().get(i))
    }

    /// Reshape the tensor to a new shape, sharing the same buffer.
    ///
    /// # Errors
    ///
    /// If the number of elements in the new shape does not match the number of elements in the tensor, an error is returned.
    pub fn reshape<const M: usize>(&self, shape: [usize; M]) -> Result<Tensor<T, M>, TensorError> {
        let numel = shape.iter().product::<usize>();
        if numel != self.numel() {
            return Err(TensorError::DimensionMismatch {
                message: "Reshape operation requires same number of elements".to_string(),
                expected: format!("{:?} ({} elements)", shape, numel),
                actual: format!("{:?} ({} elements)", self.shape, self.numel()),
            });
        }

        Ok(Tensor {
            storage: self.storage.clone(),
            shape,
            strides: get_strides_from_shape(shape),
        })
    }

    /// Apply a function to each element of the tensor.
    ///
    /// # Example
    ///
    /// ```
    /// use jordan_tensor::Tensor1;
    ///
    /// let t = Tensor1::<u8>::from_shape_vec([4], vec![1, 2, 3, 4]).unwrap();
    /// let t2 = t.map(|x| *x + 1);
    /// assert_eq!(t2.as_slice(), vec![2, 3, 4, 5]);
    /// ```
    pub fn map<U, F>(&self, f: F) -> Tensor<U, N>
    where
        F: Fn(&T) -> U,
    {
        let data: Vec<U> = self.as_slice().iter().map(f).collect();
        Tensor {
            storage: TensorStorage::from_vec(data),
            shape: self.shape,
            strides: self.strides,
        }
    }

    /// Apply a binary function to each pair of elements of two tensors.
    ///
    /// # Errors
    ///
    /// If the shapes of the tensors differ, an error is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use jordan_tensor::Tensor1;
    ///
    /// let t1 = Tensor1::<u8>::from_shape_vec([4], vec![1, 2, 3, 4]).unwrap();
    /// let t2 = Tensor1::<u8>::from_shape_vec([4], vec![1, 2, 3, 4]).unwrap();
    ///
    /// let t3 = t1.element_wise_op(&t2, |a, b| *a + *b).unwrap();
    /// assert_eq!(t3.as_slice(), vec![2, 4, 6, 8]);
    /// ```
    pub fn element_wise_op<F>(
        &self,
        other: &Tensor<T, N>,
        op: F,
    ) -> Result<Tensor<T, N>, TensorError>
    where
        F: Fn(&T, &T) -> T,
    {
        if self.shape != other.shape {
            return Err(TensorError::dimension_mismatch(
                "Element-wise operations require identical shapes",
                &self.shape,
                &other.shape,
            ));
        }

        let data = self
            .as_slice()
            .iter()
            .zip(other.as_slice().iter())
            .map(|(a, b)| op(a, b))
            .collect();

        Ok(Tensor {
            storage: TensorStorage::from_vec(data),
            shape: self.shape,
            strides: self.strides,
        })
    }
}

impl<T, const N: usize> Clone for Tensor<T, N> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            shape: self.shape,
            strides: self.strides,
        }
    }
}

impl<T: std::fmt::Debug, const N: usize> std::fmt::Debug for Tensor<T, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape)
            .field("strides", &self.strides)
            .field("data", &self.as_slice())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::tensor::TensorError;
    use crate::{Tensor1, Tensor2, Tensor3};

    #[test]
    fn constructor_1d() -> Result<(), TensorError> {
        let data: Vec<u8> = vec![1];
        let t = Tensor1::<u8>::from_shape_vec([1], data)?;
        assert_eq!(t.shape, [1]);
        assert_eq!(t.as_slice(), vec![1]);
        assert_eq!(t.strides, [1]);
        assert_eq!(t.numel(), 1);
        Ok(())
    }

    #[test]
    fn constructor_2d() -> Result<(), TensorError> {
        let data: Vec<f64> = vec![1.0, 2.0];
        let t = Tensor2::<f64>::from_shape_vec([1, 2], data)?;
        assert_eq!(t.shape, [1, 2]);
        assert_eq!(t.as_slice(), vec![1.0, 2.0]);
        assert_eq!(t.strides, [2, 1]);
        assert_eq!(t.numel(), 2);
        Ok(())
    }

    #[test]
    fn constructor_invalid_shape() {
        let res = Tensor2::<f64>::from_shape_vec([2, 2], vec![1.0, 2.0, 3.0]);
        assert_eq!(res.err(), Some(TensorError::invalid_shape(4, 3)));
    }

    #[test]
    fn constructor_empty() -> Result<(), TensorError> {
        let t = Tensor2::<f64>::from_shape_vec([0, 3], vec![])?;
        assert_eq!(t.shape, [0, 3]);
        assert_eq!(t.numel(), 0);
        Ok(())
    }

    #[test]
    fn get_2d() -> Result<(), TensorError> {
        let data: Vec<u8> = vec![1, 2, 3, 4];
        let t = Tensor2::<u8>::from_shape_vec([2, 2], data)?;
        assert_eq!(t.get([0, 0]), Some(&1));
        assert_eq!(t.get([0, 1]), Some(&2));
        assert_eq!(t.get([1, 0]), Some(&3));
        assert_eq!(t.get([1, 1]), Some(&4));
        assert!(t.get([2, 0]).is_none());
        assert!(t.get([0, 2]).is_none());
        assert_eq!(*t.get_unchecked([1, 1]), 4);
        Ok(())
    }

    #[test]
    fn get_3d() -> Result<(), TensorError> {
        let data: Vec<u8> = vec![1, 2, 3, 4, 5, 6];
        let t = Tensor3::<u8>::from_shape_vec([2, 1, 3], data)?;
        assert_eq!(t.get([0, 0, 2]), Some(&3));
        assert_eq!(t.get([1, 0, 0]), Some(&4));
        assert!(t.get([0, 1, 0]).is_none());
        Ok(())
    }

    #[test]
    fn reshape_shares_storage() -> Result<(), TensorError> {
        let t = Tensor1::<u8>::from_shape_vec([4], vec![1, 2, 3, 4])?;
        let t2 = t.reshape([2, 2])?;
        assert_eq!(t2.shape, [2, 2]);
        assert_eq!(t2.strides, [2, 1]);
        assert_eq!(t2.as_slice(), vec![1, 2, 3, 4]);

        let res = t.reshape([3]);
        assert!(matches!(res, Err(TensorError::DimensionMismatch { .. })));
        Ok(())
    }

    #[test]
    fn clone_is_shallow() -> Result<(), TensorError> {
        let t = Tensor2::<f64>::from_shape_vec([1, 2], vec![1.0, 2.0])?;
        let mut t2 = t.clone();
        assert!(t.shares_storage(&t2));

        t2.as_slice_mut()[0] = 5.0;
        assert!(!t.shares_storage(&t2));
        assert_eq!(t.as_slice(), vec![1.0, 2.0]);
        assert_eq!(t2.as_slice(), vec![5.0, 2.0]);
        Ok(())
    }

    #[test]
    fn from_shape_fn_2d() {
        let t = Tensor2::<usize>::from_shape_fn([2, 3], |[i, j]| i * 3 + j);
        assert_eq!(t.as_slice(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn map_and_element_wise() -> Result<(), TensorError> {
        let t1 = Tensor1::<f64>::from_shape_vec([3], vec![1.0, 2.0, 3.0])?;
        let t2 = t1.map(|x| x * 2.0);
        assert_eq!(t2.as_slice(), vec![2.0, 4.0, 6.0]);

        let t3 = t1.element_wise_op(&t2, |a, b| b - a)?;
        assert_eq!(t3.as_slice(), vec![1.0, 2.0, 3.0]);

        let t4 = Tensor1::<f64>::zeros([2]);
        assert!(t1.element_wise_op(&t4, |a, b| a + b).is_err());
        Ok(())
    }
}
