//! Backend abstraction for numeric operations.
//!
//! The linear algebra layer never touches tensor data for products or
//! factorizations directly; it goes through a [`Backend`], so an alternative
//! implementation can be swapped in without changing the callers.

use crate::{ops, tensor::TensorError, Tensor2};

/// Backend trait defining the numeric capabilities used by the linear algebra layer.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow safe usage across threads.
pub trait Backend: Send + Sync + 'static {
    /// Element-wise sum of two matrices of the same shape.
    fn add(&self, lhs: &Tensor2<f64>, rhs: &Tensor2<f64>) -> Result<Tensor2<f64>, TensorError>;

    /// Element-wise difference of two matrices of the same shape.
    fn sub(&self, lhs: &Tensor2<f64>, rhs: &Tensor2<f64>) -> Result<Tensor2<f64>, TensorError>;

    /// Multiply every element by a scalar.
    fn mul_scalar(&self, tensor: &Tensor2<f64>, scalar: f64) -> Tensor2<f64>;

    /// Matrix product `lhs * rhs`.
    ///
    /// # Errors
    ///
    /// Returns an error if the inner dimensions differ.
    fn matmul(&self, lhs: &Tensor2<f64>, rhs: &Tensor2<f64>) -> Result<Tensor2<f64>, TensorError>;

    /// Transpose a matrix.
    fn transpose(&self, tensor: &Tensor2<f64>) -> Tensor2<f64>;

    /// Thin QR decomposition.
    ///
    /// For an `m x n` input returns `Q` with shape `m x k` and `R` with shape
    /// `k x n`, where `k = min(m, n)`.
    fn qr(&self, tensor: &Tensor2<f64>) -> Result<(Tensor2<f64>, Tensor2<f64>), TensorError>;

    /// Copy the rows `start..end`.
    fn slice_rows(
        &self,
        tensor: &Tensor2<f64>,
        start: usize,
        end: usize,
    ) -> Result<Tensor2<f64>, TensorError>;

    /// Concatenate matrices horizontally.
    fn hstack(&self, tensors: &[Tensor2<f64>]) -> Result<Tensor2<f64>, TensorError>;

    /// Concatenate matrices vertically.
    fn vstack(&self, tensors: &[Tensor2<f64>]) -> Result<Tensor2<f64>, TensorError>;

    /// Sum of all the elements.
    fn sum(&self, tensor: &Tensor2<f64>) -> f64;
}

/// CPU backend implementation.
///
/// Element-wise operations run on plain slices; the matrix product and the QR
/// factorization are delegated to `faer`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuBackend;

impl CpuBackend {
    /// Creates a new CPU backend.
    pub fn new() -> Self {
        Self
    }
}

/// Copy a faer matrix into a row-major tensor.
fn tensor_from_faer(mat: faer::MatRef<'_, f64>) -> Tensor2<f64> {
    Tensor2::from_shape_fn([mat.nrows(), mat.ncols()], |[i, j]| mat.read(i, j))
}

impl Backend for CpuBackend {
    fn add(&self, lhs: &Tensor2<f64>, rhs: &Tensor2<f64>) -> Result<Tensor2<f64>, TensorError> {
        ops::add(lhs, rhs)
    }

    fn sub(&self, lhs: &Tensor2<f64>, rhs: &Tensor2<f64>) -> Result<Tensor2<f64>, TensorError> {
        ops::sub(lhs, rhs)
    }

    fn mul_scalar(&self, tensor: &Tensor2<f64>, scalar: f64) -> Tensor2<f64> {
        ops::mul_scalar(tensor, scalar)
    }

    fn matmul(&self, lhs: &Tensor2<f64>, rhs: &Tensor2<f64>) -> Result<Tensor2<f64>, TensorError> {
        let [m, k] = lhs.shape;
        let [k2, n] = rhs.shape;
        if k != k2 {
            return Err(TensorError::dimension_mismatch(
                "Matrix multiplication requires lhs columns to equal rhs rows",
                &[k, n],
                &rhs.shape,
            ));
        }
        if m == 0 || n == 0 || k == 0 {
            return Ok(Tensor2::zeros([m, n]));
        }

        // create views of the operands
        let lhs_mat = faer::mat::from_row_major_slice(lhs.as_slice(), m, k);
        let rhs_mat = faer::mat::from_row_major_slice(rhs.as_slice(), k, n);

        let mut dst = faer::Mat::<f64>::zeros(m, n);
        faer::linalg::matmul::matmul(
            dst.as_mut(),
            lhs_mat,
            rhs_mat,
            None,
            1.0,
            faer::Parallelism::None,
        );

        Ok(tensor_from_faer(dst.as_ref()))
    }

    fn transpose(&self, tensor: &Tensor2<f64>) -> Tensor2<f64> {
        ops::transpose(tensor)
    }

    fn qr(&self, tensor: &Tensor2<f64>) -> Result<(Tensor2<f64>, Tensor2<f64>), TensorError> {
        let [m, n] = tensor.shape;
        let k = m.min(n);
        if k == 0 {
            return Ok((Tensor2::zeros([m, k]), Tensor2::zeros([k, n])));
        }

        let mat = faer::mat::from_row_major_slice(tensor.as_slice(), m, n);
        let qr = mat.qr();
        let q = qr.compute_thin_q();
        let r = qr.compute_thin_r();

        Ok((tensor_from_faer(q.as_ref()), tensor_from_faer(r.as_ref())))
    }

    fn slice_rows(
        &self,
        tensor: &Tensor2<f64>,
        start: usize,
        end: usize,
    ) -> Result<Tensor2<f64>, TensorError> {
        ops::slice_rows(tensor, start, end)
    }

    fn hstack(&self, tensors: &[Tensor2<f64>]) -> Result<Tensor2<f64>, TensorError> {
        ops::hstack(tensors)
    }

    fn vstack(&self, tensors: &[Tensor2<f64>]) -> Result<Tensor2<f64>, TensorError> {
        ops::vstack(tensors)
    }

    fn sum(&self, tensor: &Tensor2<f64>) -> f64 {
        ops::sum(tensor)
    }
}
