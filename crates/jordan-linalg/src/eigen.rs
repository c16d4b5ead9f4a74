use jordan_tensor::{Backend, CpuBackend, Tensor2, TensorError};

use crate::{
    error::LinalgError, matrix::Matrix, system::LinearSystem, util::canonical_zero,
    vector::Vector,
};

/// Options of the eigen computations.
///
/// # Example
///
/// ```
/// use jordan_linalg::EigenOptions;
///
/// let options = EigenOptions::default().with_iterations(200).rounded(true);
/// assert_eq!(options.iterations, 200);
/// assert!(options.rounded);
/// assert!(!options.unique);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EigenOptions {
    /// Number of QR iterations, always run in full.
    pub iterations: usize,
    /// Round each eigenvalue to the nearest integer.
    pub rounded: bool,
    /// Drop repeated eigenvalues, keeping the first occurrence.
    pub unique: bool,
}

impl Default for EigenOptions {
    fn default() -> Self {
        Self {
            iterations: 1000,
            rounded: false,
            unique: false,
        }
    }
}

impl EigenOptions {
    /// Set the number of QR iterations.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Round the eigenvalues to integers.
    pub fn rounded(mut self, rounded: bool) -> Self {
        self.rounded = rounded;
        self
    }

    /// Deduplicate the eigenvalues.
    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }
}

/// An eigenvalue with the basis of its eigenspace.
#[derive(Clone, Debug, PartialEq)]
pub struct EigenPair {
    /// The eigenvalue.
    pub eigenvalue: f64,
    /// Independent eigenvectors found for the eigenvalue.
    pub eigenvectors: Vec<Vector>,
    /// Geometric multiplicity, the number of eigenvectors.
    pub multiplicity: usize,
}

/// Outcome of [`Matrix::diagonalize`].
#[derive(Clone, Debug, PartialEq)]
pub enum Diagonalization {
    /// `A = P * D * P^-1`.
    Diagonalizable {
        /// Eigenvectors as columns.
        p: Matrix,
        /// Eigenvalues on the diagonal, in the column order of `p`.
        d: Matrix,
        /// Inverse of `p`.
        p_inverse: Matrix,
    },
    /// The eigenvectors do not span the whole space.
    NotDiagonalizable,
}

impl Diagonalization {
    /// Returns true for [`Diagonalization::Diagonalizable`].
    pub fn is_diagonalizable(&self) -> bool {
        matches!(self, Diagonalization::Diagonalizable { .. })
    }
}

/// Unshifted QR iteration.
///
/// Starting from `Q, R = QR(A)`, replaces `Q, R` with `QR(R * Q)` exactly
/// `iterations` times and returns the final `R * Q`. There is no convergence
/// test. For matrices with real eigenvalues of distinct magnitude the result
/// approaches an upper triangular matrix carrying the eigenvalues on its
/// diagonal.
pub fn qr_iteration<B: Backend + ?Sized>(
    backend: &B,
    tensor: &Tensor2<f64>,
    iterations: usize,
) -> Result<Tensor2<f64>, TensorError> {
    let (mut q, mut r) = backend.qr(tensor)?;
    for _ in 0..iterations {
        let rq = backend.matmul(&r, &q)?;
        (q, r) = backend.qr(&rq)?;
    }
    backend.matmul(&r, &q)
}

impl Matrix {
    /// Eigenvalues approximated by QR iteration on the CPU backend.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the matrix is not square.
    ///
    /// # Example
    ///
    /// ```
    /// use jordan_linalg::{EigenOptions, Matrix};
    ///
    /// let m = Matrix::new(vec![vec![1.0, 6.0], vec![5.0, 2.0]]).unwrap();
    /// let values = m.eigenvalues(&EigenOptions::default().rounded(true)).unwrap();
    /// assert_eq!(values.get(), vec![7.0, -4.0]);
    /// ```
    pub fn eigenvalues(&self, options: &EigenOptions) -> Result<Vector, LinalgError> {
        self.eigenvalues_with(&CpuBackend, options)
    }

    /// Eigenvalues approximated by QR iteration on the given backend.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the matrix is not square.
    pub fn eigenvalues_with<B: Backend + ?Sized>(
        &self,
        backend: &B,
        options: &EigenOptions,
    ) -> Result<Vector, LinalgError> {
        if !self.is_square() {
            return Err(LinalgError::shape_mismatch(
                "eigenvalues",
                &[self.rows(), self.rows()],
                &self.shape(),
            ));
        }

        log::debug!(
            "qr iteration on a {}x{} matrix, {} iterations",
            self.rows(),
            self.columns(),
            options.iterations
        );
        let converged = Matrix::from_tensor(qr_iteration(
            backend,
            self.as_tensor(),
            options.iterations,
        )?);

        let mut values: Vec<f64> = converged
            .diagonal()
            .as_slice()
            .iter()
            .map(|&v| canonical_zero(if options.rounded { v.round() } else { v }))
            .collect();

        if options.unique {
            let mut seen: Vec<f64> = Vec::with_capacity(values.len());
            values.retain(|v| {
                if seen.contains(v) {
                    false
                } else {
                    seen.push(*v);
                    true
                }
            });
        }

        Ok(Vector::new(values))
    }

    /// Eigenvectors of each distinct eigenvalue.
    ///
    /// For every eigenvalue `l` the homogeneous system `[A - l*I | 0]` is
    /// solved and its free-variable directions are kept as eigenvectors.
    /// Eigenvalues are deduplicated regardless of `options.unique`.
    pub fn eigenvectors(&self, options: &EigenOptions) -> Result<Vec<EigenPair>, LinalgError> {
        let eigenvalues = self.eigenvalues(&options.unique(true))?;
        let n = self.rows();
        let identity = Matrix::identity(n);
        let zeros = Vector::zeros(n);

        let mut pairs = Vec::with_capacity(eigenvalues.len());
        for &eigenvalue in eigenvalues.as_slice() {
            let shifted = self.subtract(&identity.scale_by(eigenvalue))?;
            let mut system = LinearSystem::new(shifted.augment(&zeros)?)?;
            let eigenvectors: Vec<Vector> = system
                .solve()?
                .solutions
                .directions
                .iter()
                .map(|d| d.vector.clone())
                .collect();
            log::trace!(
                "eigenvalue {eigenvalue}: {} eigenvectors",
                eigenvectors.len()
            );
            pairs.push(EigenPair {
                eigenvalue,
                multiplicity: eigenvectors.len(),
                eigenvectors,
            });
        }
        Ok(pairs)
    }

    /// Factor the matrix as `P * D * P^-1`.
    ///
    /// Eigenvectors are taken as columns of `P` by decreasing eigenvalue. The
    /// matrix is not diagonalizable when there are not exactly `n`
    /// eigenvectors, when they are linearly dependent, or when `P` is singular.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the matrix is not square.
    pub fn diagonalize(&self, options: &EigenOptions) -> Result<Diagonalization, LinalgError> {
        let mut pairs = self.eigenvectors(options)?;
        pairs.sort_by(|a, b| b.eigenvalue.total_cmp(&a.eigenvalue));

        let n = self.rows();
        let mut columns = Vec::with_capacity(n);
        let mut diagonal = Vec::with_capacity(n);
        for pair in &pairs {
            for vector in &pair.eigenvectors {
                columns.push(Matrix::from_tensor(vector.as_tensor().reshape([n, 1])?));
                diagonal.push(pair.eigenvalue);
            }
        }

        if columns.len() != n {
            log::debug!("not diagonalizable: {} eigenvectors for size {n}", columns.len());
            return Ok(Diagonalization::NotDiagonalizable);
        }
        if n == 0 {
            let empty = Matrix::zeros(0, 0);
            return Ok(Diagonalization::Diagonalizable {
                p: empty.clone(),
                d: empty.clone(),
                p_inverse: empty,
            });
        }

        let p = Matrix::hstack(&columns)?;
        let rank = p.rank();
        if rank < n {
            log::debug!("not diagonalizable: eigenvectors span rank {rank} of {n}");
            return Ok(Diagonalization::NotDiagonalizable);
        }

        let Some(p_inverse) = p.inverse()? else {
            log::debug!("not diagonalizable: singular eigenvector matrix");
            return Ok(Diagonalization::NotDiagonalizable);
        };

        log::debug!("diagonalized with eigenvalues {diagonal:?}");
        Ok(Diagonalization::Diagonalizable {
            p,
            d: Matrix::from_diagonal(&diagonal),
            p_inverse,
        })
    }
}
