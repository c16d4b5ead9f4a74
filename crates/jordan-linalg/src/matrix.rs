use jordan_tensor::{storage::TensorStorage, Backend, CpuBackend, Tensor, Tensor2};
use rand::Rng;

use crate::{
    error::LinalgError,
    util::{canonical_zero, EPSILON},
    vector::Vector,
};

/// A leading one of a matrix in reduced row echelon form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pivot {
    /// Row of the leading one.
    pub row: usize,
    /// Column of the leading one.
    pub column: usize,
}

/// A dense, row-major matrix of real numbers.
///
/// A `Matrix` is an immutable value. Every operation returns a new matrix and
/// never mutates the receiver; cloning shares the underlying buffer.
///
/// # Example
///
/// ```
/// use jordan_linalg::Matrix;
///
/// let m = Matrix::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// assert_eq!(m.determinant().unwrap(), -2.0);
/// assert_eq!(m.transpose().get(), vec![vec![1.0, 3.0], vec![2.0, 4.0]]);
/// ```
#[derive(Clone, Debug)]
pub struct Matrix {
    elements: Tensor2<f64>,
    reduced: bool,
}

/// Types that can be appended as columns to a [`Matrix`].
pub trait AsColumns {
    /// The columns as a `rows x n` tensor.
    fn as_columns(&self) -> Result<Tensor2<f64>, LinalgError>;
}

impl AsColumns for Matrix {
    fn as_columns(&self) -> Result<Tensor2<f64>, LinalgError> {
        Ok(self.elements.clone())
    }
}

impl AsColumns for Vector {
    fn as_columns(&self) -> Result<Tensor2<f64>, LinalgError> {
        Ok(self.as_tensor().reshape([self.len(), 1])?)
    }
}

impl Matrix {
    /// Create a matrix from nested rows.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the rows do not all have the same length.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, LinalgError> {
        let columns = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * columns);
        for row in &rows {
            if row.len() != columns {
                return Err(LinalgError::shape_mismatch("new", &[columns], &[row.len()]));
            }
            data.extend_from_slice(row);
        }
        Ok(Self::from_tensor(Tensor2::from_shape_vec(
            [rows.len(), columns],
            data,
        )?))
    }

    /// Create a matrix from a slice of rows, e.g. `&[[1.0, 2.0], [3.0, 4.0]]`.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the rows do not all have the same length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, LinalgError> {
        Self::new(rows.iter().map(|r| r.as_ref().to_vec()).collect())
    }

    /// Wrap an existing two-dimensional tensor.
    pub fn from_tensor(elements: Tensor2<f64>) -> Self {
        Self {
            elements,
            reduced: false,
        }
    }

    fn from_vec_unchecked(shape: [usize; 2], data: Vec<f64>, reduced: bool) -> Self {
        Self {
            elements: Tensor {
                storage: TensorStorage::from_vec(data),
                shape,
                strides: [shape[1], 1],
            },
            reduced,
        }
    }

    /// A matrix filled with uniformly distributed random values in `[0, 1)`.
    pub fn empty(rows: usize, columns: usize) -> Self {
        let mut rng = rand::rng();
        Self::from_tensor(Tensor2::from_shape_fn([rows, columns], |_| {
            rng.random::<f64>()
        }))
    }

    /// A matrix of zeros.
    pub fn zeros(rows: usize, columns: usize) -> Self {
        Self::from_tensor(Tensor2::zeros([rows, columns]))
    }

    /// A matrix of ones.
    pub fn ones(rows: usize, columns: usize) -> Self {
        Self::from_tensor(Tensor2::from_shape_val([rows, columns], 1.0))
    }

    /// A matrix of zeros with the shape of `other`.
    pub fn zeros_like(other: &Matrix) -> Self {
        Self::zeros(other.rows(), other.columns())
    }

    /// A matrix of ones with the shape of `other`.
    pub fn ones_like(other: &Matrix) -> Self {
        Self::ones(other.rows(), other.columns())
    }

    /// The `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        Self::from_tensor(Tensor2::from_shape_fn([n, n], |[i, j]| {
            if i == j {
                1.0
            } else {
                0.0
            }
        }))
    }

    /// A diagonal matrix with `values` on the main diagonal.
    pub fn from_diagonal(values: &[f64]) -> Self {
        let n = values.len();
        Self::from_tensor(Tensor2::from_shape_fn([n, n], |[i, j]| {
            if i == j {
                values[i]
            } else {
                0.0
            }
        }))
    }

    /// Stack matrices on top of each other.
    ///
    /// # Errors
    ///
    /// Returns an error if the slice is empty or the column counts differ.
    pub fn vstack(matrices: &[Matrix]) -> Result<Self, LinalgError> {
        let tensors: Vec<_> = matrices.iter().map(|m| m.elements.clone()).collect();
        Ok(Self::from_tensor(CpuBackend.vstack(&tensors)?))
    }

    /// Place matrices side by side.
    ///
    /// # Errors
    ///
    /// Returns an error if the slice is empty or the row counts differ.
    pub fn hstack(matrices: &[Matrix]) -> Result<Self, LinalgError> {
        let tensors: Vec<_> = matrices.iter().map(|m| m.elements.clone()).collect();
        Ok(Self::from_tensor(CpuBackend.hstack(&tensors)?))
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.elements.shape[0]
    }

    /// Number of columns.
    #[inline]
    pub fn columns(&self) -> usize {
        self.elements.shape[1]
    }

    /// `[rows, columns]`.
    #[inline]
    pub fn shape(&self) -> [usize; 2] {
        self.elements.shape
    }

    /// Returns true if the matrix has as many rows as columns.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows() == self.columns()
    }

    /// Returns true if the matrix was produced by [`Matrix::rref`].
    #[inline]
    pub fn is_reduced(&self) -> bool {
        self.reduced
    }

    /// The underlying tensor.
    pub fn as_tensor(&self) -> &Tensor2<f64> {
        &self.elements
    }

    /// Returns true if both matrices point to the same buffer.
    pub fn shares_storage(&self, other: &Matrix) -> bool {
        self.elements.shares_storage(&other.elements)
    }

    /// Export the elements as nested rows.
    pub fn get(&self) -> Vec<Vec<f64>> {
        if self.columns() == 0 {
            return vec![Vec::new(); self.rows()];
        }
        self.elements
            .as_slice()
            .chunks(self.columns())
            .map(<[f64]>::to_vec)
            .collect()
    }

    fn row_slice(&self, i: usize) -> &[f64] {
        let c = self.columns();
        &self.elements.as_slice()[i * c..(i + 1) * c]
    }

    /// The row at index `i`.
    pub fn row(&self, i: usize) -> Result<Vector, LinalgError> {
        if i >= self.rows() {
            return Err(LinalgError::IndexOutOfBounds {
                index: i,
                size: self.rows(),
            });
        }
        Ok(Vector::new(self.row_slice(i).to_vec()))
    }

    /// The element at row `i`, column `j`.
    pub fn element(&self, i: usize, j: usize) -> Result<f64, LinalgError> {
        if i >= self.rows() {
            return Err(LinalgError::IndexOutOfBounds {
                index: i,
                size: self.rows(),
            });
        }
        if j >= self.columns() {
            return Err(LinalgError::IndexOutOfBounds {
                index: j,
                size: self.columns(),
            });
        }
        Ok(*self.elements.get_unchecked([i, j]))
    }

    /// The column at index `j`.
    pub fn column(&self, j: usize) -> Result<Vector, LinalgError> {
        if j >= self.columns() {
            return Err(LinalgError::IndexOutOfBounds {
                index: j,
                size: self.columns(),
            });
        }
        let data = (0..self.rows())
            .map(|i| *self.elements.get_unchecked([i, j]))
            .collect();
        Ok(Vector::new(data))
    }

    /// Copy the rows `start..end`.
    pub fn slice_rows(&self, start: usize, end: usize) -> Result<Matrix, LinalgError> {
        Ok(Self::from_tensor(CpuBackend.slice_rows(
            &self.elements,
            start,
            end,
        )?))
    }

    /// Copy the columns `start..end`.
    pub fn slice_columns(&self, start: usize, end: usize) -> Result<Matrix, LinalgError> {
        let transposed = CpuBackend.transpose(&self.elements);
        let sliced = CpuBackend.slice_rows(&transposed, start, end)?;
        Ok(Self::from_tensor(CpuBackend.transpose(&sliced)))
    }

    fn check_same_shape(&self, other: &Matrix, operation: &'static str) -> Result<(), LinalgError> {
        if self.shape() != other.shape() {
            return Err(LinalgError::shape_mismatch(
                operation,
                &self.shape(),
                &other.shape(),
            ));
        }
        Ok(())
    }

    fn check_square(&self, operation: &'static str) -> Result<(), LinalgError> {
        if !self.is_square() {
            return Err(LinalgError::shape_mismatch(
                operation,
                &[self.rows(), self.rows()],
                &self.shape(),
            ));
        }
        Ok(())
    }

    /// Element-wise sum.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the shapes differ.
    pub fn add(&self, other: &Matrix) -> Result<Matrix, LinalgError> {
        self.check_same_shape(other, "add")?;
        Ok(Self::from_tensor(CpuBackend.add(&self.elements, &other.elements)?))
    }

    /// Element-wise difference.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the shapes differ.
    pub fn subtract(&self, other: &Matrix) -> Result<Matrix, LinalgError> {
        self.check_same_shape(other, "subtract")?;
        Ok(Self::from_tensor(CpuBackend.sub(&self.elements, &other.elements)?))
    }

    /// Multiply every element by `scalar`.
    pub fn scale_by(&self, scalar: f64) -> Matrix {
        Self::from_tensor(CpuBackend.mul_scalar(&self.elements, scalar))
    }

    /// Matrix product `self * other`.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `self.columns() != other.rows()`.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix, LinalgError> {
        if self.columns() != other.rows() {
            return Err(LinalgError::shape_mismatch(
                "multiply",
                &[self.columns(), other.columns()],
                &other.shape(),
            ));
        }
        Ok(Self::from_tensor(
            CpuBackend.matmul(&self.elements, &other.elements)?,
        ))
    }

    /// Same as [`Matrix::multiply`].
    pub fn transform(&self, other: &Matrix) -> Result<Matrix, LinalgError> {
        self.multiply(other)
    }

    /// The transposed matrix.
    pub fn transpose(&self) -> Matrix {
        Self::from_tensor(CpuBackend.transpose(&self.elements))
    }

    /// The main diagonal, `min(rows, columns)` entries.
    pub fn diagonal(&self) -> Vector {
        let n = self.rows().min(self.columns());
        Vector::new((0..n).map(|i| *self.elements.get_unchecked([i, i])).collect())
    }

    /// Sum of the main diagonal.
    pub fn trace(&self) -> f64 {
        self.diagonal().sum()
    }

    /// The matrix without row `row` and column `column`.
    pub fn minor(&self, row: usize, column: usize) -> Result<Matrix, LinalgError> {
        let [rows, columns] = self.shape();
        if row >= rows {
            return Err(LinalgError::IndexOutOfBounds {
                index: row,
                size: rows,
            });
        }
        if column >= columns {
            return Err(LinalgError::IndexOutOfBounds {
                index: column,
                size: columns,
            });
        }
        let data = self
            .elements
            .as_slice()
            .iter()
            .enumerate()
            .filter(|(k, _)| k / columns != row && k % columns != column)
            .map(|(_, &v)| v)
            .collect();
        Ok(Self::from_vec_unchecked(
            [rows - 1, columns - 1],
            data,
            false,
        ))
    }

    /// Determinant by cofactor expansion along the first row.
    ///
    /// The cost grows factorially with the size; prefer [`Matrix::rank`] to
    /// test invertibility of large matrices.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the matrix is not square.
    pub fn determinant(&self) -> Result<f64, LinalgError> {
        self.check_square("determinant")?;
        let a = self.elements.as_slice();
        match self.rows() {
            0 => Ok(1.0),
            1 => Ok(a[0]),
            2 => Ok(a[0] * a[3] - a[1] * a[2]),
            n => {
                let mut det = 0.0;
                for k in 0..n {
                    let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
                    det += sign * a[k] * self.minor(0, k)?.determinant()?;
                }
                Ok(det)
            }
        }
    }

    /// Reduced row echelon form by Gauss-Jordan elimination.
    ///
    /// A matrix that is already reduced is returned as is, sharing its buffer.
    /// Pivots smaller than [`EPSILON`] in magnitude zero their row instead of
    /// being divided through.
    ///
    /// # Example
    ///
    /// ```
    /// use jordan_linalg::Matrix;
    ///
    /// let m = Matrix::new(vec![vec![2.0, 4.0], vec![1.0, 3.0]]).unwrap();
    /// let r = m.rref();
    /// assert_eq!(r.get(), vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    /// assert!(r.rref().shares_storage(&r));
    /// ```
    pub fn rref(&self) -> Matrix {
        if self.reduced {
            return self.clone();
        }

        let [rows, columns] = self.shape();
        let mut a = self.elements.as_slice().to_vec();
        let mut lead = 0;

        'rows: for k in 0..rows {
            if lead >= columns {
                break;
            }

            let mut i = k;
            while a[i * columns + lead] == 0.0 {
                i += 1;
                if i == rows {
                    i = k;
                    lead += 1;
                    if lead == columns {
                        break 'rows;
                    }
                }
            }

            if i != k {
                for j in 0..columns {
                    a.swap(i * columns + j, k * columns + j);
                }
            }

            let pivot = a[k * columns + lead];
            for j in 0..columns {
                let v = &mut a[k * columns + j];
                *v = if pivot.abs() < EPSILON {
                    0.0
                } else {
                    canonical_zero(*v / pivot)
                };
            }

            for i in (0..rows).filter(|&i| i != k) {
                let factor = a[i * columns + lead];
                for j in 0..columns {
                    let v = a[i * columns + j] - factor * a[k * columns + j];
                    a[i * columns + j] = canonical_zero(v);
                }
            }

            lead += 1;
        }

        log::debug!("rref of a {rows}x{columns} matrix done, lead column {lead}");

        Self::from_vec_unchecked([rows, columns], a, true)
    }

    /// Pivot positions, scanning the matrix as is.
    ///
    /// A cell is a pivot when it equals one, everything to its left is zero and
    /// everything below it is zero. Call on the output of [`Matrix::rref`].
    pub fn pivots(&self) -> Vec<Pivot> {
        let [rows, columns] = self.shape();
        let a = self.elements.as_slice();
        let mut pivots = Vec::new();
        for i in 0..rows {
            for j in 0..columns {
                if a[i * columns + j] != 1.0 {
                    continue;
                }
                let left_zero = (0..j).all(|l| a[i * columns + l] == 0.0);
                let below_zero = (i + 1..rows).all(|r| a[r * columns + j] == 0.0);
                if left_zero && below_zero {
                    pivots.push(Pivot { row: i, column: j });
                }
            }
        }
        pivots
    }

    /// Number of pivots of the reduced row echelon form.
    pub fn rank(&self) -> usize {
        self.rref().pivots().len()
    }

    /// Append the columns of `other` to the right of this matrix.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the row counts differ.
    ///
    /// # Example
    ///
    /// ```
    /// use jordan_linalg::{Matrix, Vector};
    ///
    /// let m = Matrix::identity(2);
    /// let v = Vector::new(vec![5.0, 6.0]);
    /// let a = m.augment(&v).unwrap();
    /// assert_eq!(a.column(2).unwrap(), v);
    /// ```
    pub fn augment<C: AsColumns + ?Sized>(&self, other: &C) -> Result<Matrix, LinalgError> {
        let columns = other.as_columns()?;
        if columns.shape[0] != self.rows() {
            return Err(LinalgError::shape_mismatch(
                "augment",
                &[self.rows(), columns.shape[1]],
                &columns.shape,
            ));
        }
        Ok(Self::from_tensor(
            CpuBackend.hstack(&[self.elements.clone(), columns])?,
        ))
    }

    /// The inverse matrix, or `None` when the determinant is zero.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the matrix is not square.
    pub fn inverse(&self) -> Result<Option<Matrix>, LinalgError> {
        self.check_square("inverse")?;
        if self.determinant()? == 0.0 {
            return Ok(None);
        }
        let n = self.rows();
        let reduced = self.augment(&Matrix::identity(n))?.rref();
        Ok(Some(reduced.slice_columns(n, 2 * n)?))
    }
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.elements.as_slice() == other.elements.as_slice()
    }
}

impl std::fmt::Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.rows() {
            write!(f, "[")?;
            for (j, x) in self.row_slice(i).iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{x}")?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Matrix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.get())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Matrix {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let rows = <Vec<Vec<f64>> as serde::Deserialize>::deserialize(deserializer)?;
        Matrix::new(rows).map_err(serde::de::Error::custom)
    }
}
