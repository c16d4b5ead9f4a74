#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! - [`Vector`]: one-dimensional values with the usual geometric operations
//! - [`Matrix`]: elementary operations, determinant, reduced row echelon form,
//!   pivots, augmentation and inverse
//! - [`LinearSystem`]: consistency, uniqueness and the parameterized solution set
//! - [`eigen`]: eigenvalues by QR iteration, eigenvectors and diagonalization
//!
//! Singular matrices, inconsistent systems and defective matrices are ordinary
//! results (`None`, `consistent == false`, [`Diagonalization::NotDiagonalizable`]);
//! only malformed shapes and indices are errors.
//!
//! # Example
//!
//! ```rust
//! use jordan_linalg::{LinearSystem, Matrix};
//!
//! let m = Matrix::new(vec![
//!     vec![1.0, 4.0, -5.0, 0.0],
//!     vec![2.0, -1.0, 8.0, 9.0],
//! ])
//! .unwrap();
//!
//! let mut system = LinearSystem::new(m).unwrap();
//! let solution = system.solve().unwrap();
//! assert!(solution.consistent && !solution.unique);
//! assert_eq!(solution.solutions.direction("x_3").unwrap().get(), vec![-3.0, 2.0, 1.0]);
//! ```

/// Eigenvalues, eigenvectors and diagonalization.
pub mod eigen;

/// Error types for the linear algebra operations.
pub mod error;

/// Dense matrices.
pub mod matrix;

/// Linear systems and their solution sets.
pub mod system;

/// Scalar helpers and the comparison tolerance.
pub mod util;

/// Dense vectors.
pub mod vector;

pub use crate::eigen::{Diagonalization, EigenOptions, EigenPair};
pub use crate::error::LinalgError;
pub use crate::matrix::{AsColumns, Matrix, Pivot};
pub use crate::system::{Direction, LinearSystem, Solution, Solutions};
pub use crate::vector::Vector;
