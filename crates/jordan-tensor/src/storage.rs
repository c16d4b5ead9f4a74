//! Arc-based storage management for cheap clones and shared buffers.
//!
//! Tensors produced by the linear algebra layer are immutable values, so a
//! clone only bumps a reference count. Mutation goes through
//! [`TensorStorage::as_mut_slice`], which copies the buffer first when it is
//! shared.

use std::sync::Arc;

/// Reference-counted tensor storage.
///
/// # Thread Safety
///
/// `TensorStorage` is `Send + Sync` when `T: Send + Sync`, allowing tensors to
/// be moved to worker threads.
pub struct TensorStorage<T> {
    /// Reference-counted buffer holding the elements in row-major order.
    inner: Arc<Vec<T>>,
}

impl<T> TensorStorage<T> {
    /// Creates a new tensor buffer from a vector.
    pub fn from_vec(value: Vec<T>) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }

    /// Returns the storage data as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.inner.as_slice()
    }

    /// Returns the storage data as a mutable slice.
    ///
    /// If the buffer is shared with other tensors it is copied first, so the
    /// other owners never observe the mutation.
    pub fn as_mut_slice(&mut self) -> &mut [T]
    where
        T: Clone,
    {
        Arc::make_mut(&mut self.inner).as_mut_slice()
    }

    /// Returns the number of elements in the storage.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if the storage holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns true if this storage is uniquely owned (no other Arc references).
    #[inline]
    pub fn is_unique(&self) -> bool {
        Arc::strong_count(&self.inner) == 1
    }

    /// Returns true if both storages point to the same buffer.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Consumes the storage and returns the elements.
    ///
    /// The buffer is moved out when uniquely owned, and cloned otherwise.
    pub fn into_vec(self) -> Vec<T>
    where
        T: Clone,
    {
        Arc::try_unwrap(self.inner).unwrap_or_else(|shared| shared.as_ref().clone())
    }
}

impl<T> Clone for TensorStorage<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for TensorStorage<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TensorStorage")
            .field("len", &self.len())
            .field("shared", &!self.is_unique())
            .field("data", &self.as_slice())
            .finish()
    }
}
