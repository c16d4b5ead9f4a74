//! Operations for tensors.
//!
//! Free functions working on owned tensors. Every operation allocates a new
//! result; inputs are never modified.

use crate::{
    storage::TensorStorage,
    tensor::{Tensor, TensorError},
    Tensor2,
};

/// Add two tensors element-wise.
///
/// # Arguments
///
/// * `lhs` - Left-hand side tensor.
/// * `rhs` - Right-hand side tensor.
///
/// # Returns
///
/// A new `Tensor` instance with the sum of the two tensors.
///
/// # Errors
///
/// If the shapes of the tensors differ, an error is returned.
pub fn add<T, const N: usize>(
    lhs: &Tensor<T, N>,
    rhs: &Tensor<T, N>,
) -> Result<Tensor<T, N>, TensorError>
where
    T: std::ops::Add<Output = T> + Clone,
{
    lhs.element_wise_op(rhs, |a, b| a.clone() + b.clone())
}

/// Subtract two tensors element-wise.
///
/// # Arguments
///
/// * `lhs` - Left-hand side tensor.
/// * `rhs` - Right-hand side tensor.
///
/// # Returns
///
/// A new `Tensor` instance with the difference of the two tensors.
///
/// # Errors
///
/// If the shapes of the tensors differ, an error is returned.
pub fn sub<T, const N: usize>(
    lhs: &Tensor<T, N>,
    rhs: &Tensor<T, N>,
) -> Result<Tensor<T, N>, TensorError>
where
    T: std::ops::Sub<Output = T> + Clone,
{
    lhs.element_wise_op(rhs, |a, b| a.clone() - b.clone())
}

/// Multiply every element of the tensor by a scalar.
pub fn mul_scalar<T, const N: usize>(tensor: &Tensor<T, N>, n: T) -> Tensor<T, N>
where
    T: std::ops::Mul<Output = T> + Clone,
{
    tensor.map(|x| x.clone() * n.clone())
}

/// Sum all the elements of the tensor.
///
/// # Example
///
/// ```
/// use jordan_tensor::{ops, Tensor2};
///
/// let t = Tensor2::<f64>::from_shape_vec([2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// assert_eq!(ops::sum(&t), 10.0);
/// ```
pub fn sum<T, const N: usize>(tensor: &Tensor<T, N>) -> T
where
    T: num_traits::Zero + Clone,
{
    tensor
        .as_slice()
        .iter()
        .fold(T::zero(), |acc, x| acc + x.clone())
}

/// Transpose a two-dimensional tensor.
///
/// The result is a new contiguous tensor with shape `[cols, rows]`.
pub fn transpose<T: Clone>(tensor: &Tensor2<T>) -> Tensor2<T> {
    let [rows, cols] = tensor.shape;
    let src = tensor.as_slice();
    Tensor2::from_shape_fn([cols, rows], |[i, j]| src[j * cols + i].clone())
}

/// Naive matrix product of two two-dimensional tensors.
///
/// # Errors
///
/// If the inner dimensions differ (`lhs.shape[1] != rhs.shape[0]`), an error is returned.
///
/// # Example
///
/// ```
/// use jordan_tensor::{ops, Tensor2};
///
/// let a = Tensor2::<f64>::from_shape_vec([1, 2], vec![1.0, 2.0]).unwrap();
/// let b = Tensor2::<f64>::from_shape_vec([2, 1], vec![3.0, 4.0]).unwrap();
/// let c = ops::matmul(&a, &b).unwrap();
/// assert_eq!(c.as_slice(), vec![11.0]);
/// ```
pub fn matmul<T>(lhs: &Tensor2<T>, rhs: &Tensor2<T>) -> Result<Tensor2<T>, TensorError>
where
    T: num_traits::Zero + std::ops::Mul<Output = T> + Clone,
{
    let [m, k] = lhs.shape;
    let [k2, n] = rhs.shape;
    if k != k2 {
        return Err(TensorError::dimension_mismatch(
            "Matrix multiplication requires lhs columns to equal rhs rows",
            &[k, n],
            &rhs.shape,
        ));
    }

    let a = lhs.as_slice();
    let b = rhs.as_slice();
    Ok(Tensor2::from_shape_fn([m, n], |[i, j]| {
        (0..k).fold(T::zero(), |acc, p| {
            acc + a[i * k + p].clone() * b[p * n + j].clone()
        })
    }))
}

/// Copy the rows `start..end` of a two-dimensional tensor.
///
/// # Errors
///
/// If the range is reversed or exceeds the number of rows, an error is returned.
pub fn slice_rows<T: Clone>(
    tensor: &Tensor2<T>,
    start: usize,
    end: usize,
) -> Result<Tensor2<T>, TensorError> {
    let [rows, cols] = tensor.shape;
    if start > end {
        return Err(TensorError::index_out_of_bounds(start, end));
    }
    if end > rows {
        return Err(TensorError::index_out_of_bounds(end, rows));
    }
    let data = tensor.as_slice()[start * cols..end * cols].to_vec();
    Tensor2::from_shape_vec([end - start, cols], data)
}

/// Concatenate two-dimensional tensors side by side.
///
/// All the tensors must have the same number of rows.
///
/// # Errors
///
/// If the slice is empty or the row counts differ, an error is returned.
pub fn hstack<T: Clone>(tensors: &[Tensor2<T>]) -> Result<Tensor2<T>, TensorError> {
    let first = tensors.first().ok_or_else(|| {
        TensorError::dimension_mismatch("Horizontal stack requires at least one tensor", &[1], &[0])
    })?;
    let rows = first.shape[0];

    let mut cols = 0;
    for t in tensors {
        if t.shape[0] != rows {
            return Err(TensorError::dimension_mismatch(
                "Horizontal stack requires the same number of rows",
                &[rows, t.shape[1]],
                &t.shape,
            ));
        }
        cols += t.shape[1];
    }

    let mut data = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for t in tensors {
            let width = t.shape[1];
            data.extend_from_slice(&t.as_slice()[r * width..(r + 1) * width]);
        }
    }

    Ok(Tensor {
        storage: TensorStorage::from_vec(data),
        shape: [rows, cols],
        strides: [cols, 1],
    })
}

/// Concatenate two-dimensional tensors on top of each other.
///
/// All the tensors must have the same number of columns.
///
/// # Errors
///
/// If the slice is empty or the column counts differ, an error is returned.
pub fn vstack<T: Clone>(tensors: &[Tensor2<T>]) -> Result<Tensor2<T>, TensorError> {
    let first = tensors.first().ok_or_else(|| {
        TensorError::dimension_mismatch("Vertical stack requires at least one tensor", &[1], &[0])
    })?;
    let cols = first.shape[1];

    let mut data = Vec::new();
    let mut rows = 0;
    for t in tensors {
        if t.shape[1] != cols {
            return Err(TensorError::dimension_mismatch(
                "Vertical stack requires the same number of columns",
                &[t.shape[0], cols],
                &t.shape,
            ));
        }
        data.extend_from_slice(t.as_slice());
        rows += t.shape[0];
    }

    Tensor2::from_shape_vec([rows, cols], data)
}
