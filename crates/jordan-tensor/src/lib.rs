#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `jordan-tensor` is the numeric buffer underneath the `jordan` linear algebra
//! crates. It provides a small, reference-counted, row-major tensor type, a set
//! of free-function operations and a [`Backend`] trait through which matrix
//! products and QR factorizations are dispatched.
//!
//! # Architecture
//!
//! - **Tensor**: multi-dimensional array with shape and stride information
//! - **TensorStorage**: reference-counted buffer, cloned cheaply and copied on write
//! - **ops**: element-wise arithmetic, transpose, matmul, row slicing and stacking
//! - **Backend**: capability interface, implemented on the CPU by [`CpuBackend`] with `faer`
//!
//! # Quick Start
//!
//! ```rust
//! use jordan_tensor::{ops, Tensor2};
//!
//! let a = Tensor2::<f64>::from_shape_vec([2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
//! assert_eq!(a.get([1, 0]), Some(&3.0));
//!
//! let t = ops::transpose(&a);
//! assert_eq!(t.as_slice(), vec![1.0, 3.0, 2.0, 4.0]);
//! ```
//!
//! Factorizing through a backend:
//!
//! ```rust
//! use jordan_tensor::{Backend, CpuBackend, Tensor2};
//!
//! let a = Tensor2::<f64>::from_shape_vec([2, 2], vec![2.0, 0.0, 0.0, 3.0]).unwrap();
//! let (q, r) = CpuBackend.qr(&a).unwrap();
//! assert_eq!(q.shape, [2, 2]);
//! assert_eq!(r.shape, [2, 2]);
//! ```

/// backend module containing the numeric capability interface.
pub mod backend;

/// Bincode module for binary serialization and deserialization.
///
/// This module provides binary serialization support for tensors when the
/// `bincode` feature is enabled.
#[cfg(feature = "bincode")]
pub mod bincode;

/// Free-function tensor operations.
pub mod ops;

/// Serde module for JSON/other format serialization and deserialization.
///
/// This module provides serialization support for tensors when the
/// `serde` feature is enabled.
#[cfg(feature = "serde")]
pub mod serde;

/// Storage module containing the reference-counted buffer.
///
/// This module provides [`storage::TensorStorage`] which owns the tensor elements.
pub mod storage;

/// Tensor module containing the main tensor implementation and error types.
///
/// This module provides the core [`tensor::Tensor`] struct and related functionality.
pub mod tensor;

pub use crate::backend::{Backend, CpuBackend};
pub use crate::tensor::{Tensor, TensorError};

/// Type alias for a 1-dimensional tensor.
pub type Tensor1<T> = Tensor<T, 1>;

/// Type alias for a 2-dimensional tensor.
pub type Tensor2<T> = Tensor<T, 2>;

/// Type alias for a 3-dimensional tensor.
pub type Tensor3<T> = Tensor<T, 3>;
