use jordan_tensor::{ops, storage::TensorStorage, Backend, CpuBackend, Tensor, Tensor1};

use crate::{
    error::LinalgError,
    matrix::Matrix,
    util::{are_equal, to_degrees},
};

/// A one-dimensional vector of real numbers.
///
/// Vectors are immutable values: every operation returns a new vector and
/// cloning only bumps the reference count of the underlying buffer.
///
/// # Example
///
/// ```
/// use jordan_linalg::Vector;
///
/// let v = Vector::new(vec![3.0, 4.0]);
/// assert_eq!(v.length(), 5.0);
/// assert_eq!(v.scale_by(2.0).get(), vec![6.0, 8.0]);
/// ```
#[derive(Clone, Debug)]
pub struct Vector {
    components: Tensor1<f64>,
}

impl Vector {
    /// Create a vector from its components.
    pub fn new(components: Vec<f64>) -> Self {
        let len = components.len();
        Self {
            components: Tensor {
                storage: TensorStorage::from_vec(components),
                shape: [len],
                strides: [1],
            },
        }
    }

    /// Wrap an existing one-dimensional tensor.
    pub fn from_tensor(components: Tensor1<f64>) -> Self {
        Self { components }
    }

    /// Create a vector of `len` zeros.
    pub fn zeros(len: usize) -> Self {
        Self {
            components: Tensor1::zeros([len]),
        }
    }

    /// Number of components.
    #[inline]
    pub fn len(&self) -> usize {
        self.components.shape[0]
    }

    /// Returns true if the vector has no components.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The components as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        self.components.as_slice()
    }

    /// The underlying tensor.
    pub fn as_tensor(&self) -> &Tensor1<f64> {
        &self.components
    }

    /// Export the components as a flat array.
    pub fn get(&self) -> Vec<f64> {
        self.as_slice().to_vec()
    }

    /// The component at `index`.
    pub fn component(&self, index: usize) -> Result<f64, LinalgError> {
        self.as_slice()
            .get(index)
            .copied()
            .ok_or(LinalgError::IndexOutOfBounds {
                index,
                size: self.len(),
            })
    }

    /// Sum of the components.
    pub fn sum(&self) -> f64 {
        ops::sum(&self.components)
    }

    fn check_same_len(&self, other: &Vector, operation: &'static str) -> Result<(), LinalgError> {
        if self.len() != other.len() {
            return Err(LinalgError::shape_mismatch(
                operation,
                &[self.len()],
                &[other.len()],
            ));
        }
        Ok(())
    }

    /// Component-wise sum.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the lengths differ.
    pub fn add(&self, other: &Vector) -> Result<Vector, LinalgError> {
        self.check_same_len(other, "add")?;
        Ok(Self::from_tensor(ops::add(&self.components, &other.components)?))
    }

    /// Component-wise difference.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the lengths differ.
    pub fn subtract(&self, other: &Vector) -> Result<Vector, LinalgError> {
        self.check_same_len(other, "subtract")?;
        Ok(Self::from_tensor(ops::sub(&self.components, &other.components)?))
    }

    /// Multiply every component by `scalar`.
    pub fn scale_by(&self, scalar: f64) -> Vector {
        Self::from_tensor(ops::mul_scalar(&self.components, scalar))
    }

    /// The vector pointing the opposite way.
    pub fn negate(&self) -> Vector {
        self.scale_by(-1.0)
    }

    /// Euclidean norm.
    pub fn length(&self) -> f64 {
        self.as_slice().iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    /// Dot product of the two vectors.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the lengths differ.
    pub fn dot_product(&self, other: &Vector) -> Result<f64, LinalgError> {
        self.check_same_len(other, "dot_product")?;
        let products = self
            .components
            .element_wise_op(&other.components, |a, b| a * b)?;
        Ok(ops::sum(&products))
    }

    /// Unit vector with the same direction.
    ///
    /// The zero vector has no direction; its components come back as NaN.
    pub fn normalize(&self) -> Vector {
        self.scale_by(1.0 / self.length())
    }

    /// Vector with the same direction and the given length.
    pub fn with_length(&self, length: f64) -> Vector {
        self.normalize().scale_by(length)
    }

    fn normalized_dot(&self, other: &Vector) -> Result<f64, LinalgError> {
        self.normalize().dot_product(&other.normalize())
    }

    /// Returns true if both vectors point the same way.
    pub fn have_same_direction_with(&self, other: &Vector) -> Result<bool, LinalgError> {
        Ok(are_equal(self.normalized_dot(other)?, 1.0))
    }

    /// Returns true if the vectors point in opposite directions.
    pub fn have_opposite_direction_to(&self, other: &Vector) -> Result<bool, LinalgError> {
        Ok(are_equal(self.normalized_dot(other)?, -1.0))
    }

    /// Returns true if the vectors are orthogonal.
    pub fn is_perpendicular_to(&self, other: &Vector) -> Result<bool, LinalgError> {
        Ok(are_equal(self.normalized_dot(other)?, 0.0))
    }

    /// Cross product of two three-dimensional vectors.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` unless both vectors have three components.
    pub fn cross_product(&self, other: &Vector) -> Result<Vector, LinalgError> {
        if self.len() != 3 {
            return Err(LinalgError::shape_mismatch("cross_product", &[3], &[self.len()]));
        }
        if other.len() != 3 {
            return Err(LinalgError::shape_mismatch("cross_product", &[3], &[other.len()]));
        }
        let a = self.as_slice();
        let b = other.as_slice();
        Ok(Vector::new(vec![
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]))
    }

    /// Angle between the two vectors, in degrees.
    pub fn angle_between(&self, other: &Vector) -> Result<f64, LinalgError> {
        let cos = self.dot_product(other)? / (self.length() * other.length());
        // rounding can push parallel vectors just outside [-1, 1]
        Ok(to_degrees(cos.clamp(-1.0, 1.0).acos()))
    }

    /// Orthogonal projection of this vector onto `other`.
    pub fn project_on(&self, other: &Vector) -> Result<Vector, LinalgError> {
        let unit = other.normalize();
        let scale = self.dot_product(&unit)?;
        Ok(unit.scale_by(scale))
    }

    /// Exact component-wise equality. Vectors of different lengths are never equal.
    pub fn equal_to(&self, other: &Vector) -> bool {
        self.as_slice() == other.as_slice()
    }

    /// Multiply this vector, taken as a row, by `matrix`.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the vector length differs from the matrix row count.
    pub fn transform(&self, matrix: &Matrix) -> Result<Vector, LinalgError> {
        if self.len() != matrix.rows() {
            return Err(LinalgError::shape_mismatch(
                "transform",
                &[matrix.rows()],
                &[self.len()],
            ));
        }
        let row = self.components.reshape([1, self.len()])?;
        let product = CpuBackend.matmul(&row, matrix.as_tensor())?;
        Ok(Self::from_tensor(product.reshape([matrix.columns()])?))
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        self.equal_to(other)
    }
}

impl From<Vec<f64>> for Vector {
    fn from(components: Vec<f64>) -> Self {
        Self::new(components)
    }
}

impl std::fmt::Display for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.as_slice().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, "]")
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Vector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.as_slice())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Vector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let components = <Vec<f64> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Vector::new(components))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_add_subtract() -> Result<(), LinalgError> {
        let a = Vector::new(vec![1.0, 2.0, 3.0]);
        let b = Vector::new(vec![3.0, 2.0, 1.0]);
        assert_eq!(a.add(&b)?.get(), vec![4.0, 4.0, 4.0]);
        assert_eq!(a.subtract(&b)?.get(), vec![-2.0, 0.0, 2.0]);

        let c = Vector::new(vec![1.0]);
        assert_eq!(
            a.add(&c),
            Err(LinalgError::ShapeMismatch {
                operation: "add",
                expected: vec![3],
                actual: vec![1],
            })
        );
        Ok(())
    }

    #[test]
    fn test_scale_negate() {
        let a = Vector::new(vec![1.0, -2.0]);
        assert_eq!(a.scale_by(3.0).get(), vec![3.0, -6.0]);
        assert_eq!(a.negate().get(), vec![-1.0, 2.0]);
        assert_eq!(a.sum(), -1.0);
    }

    #[test]
    fn test_length_and_normalize() {
        let a = Vector::new(vec![2.0, -1.0]);
        assert_relative_eq!(a.length(), 5f64.sqrt());
        assert_relative_eq!(a.normalize().length(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(a.with_length(10.0).length(), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_dot_product() -> Result<(), LinalgError> {
        let a = Vector::new(vec![1.0, 2.0, 3.0]);
        let b = Vector::new(vec![4.0, -5.0, 6.0]);
        assert_eq!(a.dot_product(&b)?, 12.0);
        Ok(())
    }

    #[test]
    fn test_directions() -> Result<(), LinalgError> {
        let a = Vector::new(vec![0.5, 1.0]);
        let b = Vector::new(vec![1.0, 2.0]);
        let c = Vector::new(vec![-2.0, -4.0]);
        let d = Vector::new(vec![-2.0, 1.0]);
        assert!(a.have_same_direction_with(&b)?);
        assert!(!a.have_same_direction_with(&c)?);
        assert!(a.have_opposite_direction_to(&c)?);
        assert!(a.is_perpendicular_to(&d)?);
        assert!(!a.is_perpendicular_to(&b)?);
        Ok(())
    }

    #[test]
    fn test_cross_product() -> Result<(), LinalgError> {
        let a = Vector::new(vec![1.0, 0.0, 0.0]);
        let b = Vector::new(vec![0.0, 1.0, 0.0]);
        let c = a.cross_product(&b)?;
        assert_eq!(c.get(), vec![0.0, 0.0, 1.0]);
        assert!(c.is_perpendicular_to(&a)?);

        let flat = Vector::new(vec![1.0, 2.0]);
        assert!(matches!(
            flat.cross_product(&a),
            Err(LinalgError::ShapeMismatch { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_angle_between() -> Result<(), LinalgError> {
        let a = Vector::new(vec![1.0, 0.0]);
        let b = Vector::new(vec![0.0, 3.0]);
        let c = Vector::new(vec![1.0, 1.0]);
        assert_relative_eq!(a.angle_between(&b)?, 90.0, epsilon = 1e-9);
        assert_relative_eq!(a.angle_between(&c)?, 45.0, epsilon = 1e-9);

        let ones = Vector::new(vec![1.0, 1.0, 1.0]);
        assert_eq!(ones.angle_between(&ones)?, 0.0);
        assert_relative_eq!(ones.angle_between(&ones.negate())?, 180.0, epsilon = 1e-9);
        assert_relative_eq!(ones.angle_between(&ones.scale_by(4.0))?, 0.0, epsilon = 1e-6);

        let d = Vector::new(vec![3.0, 7.0]);
        assert_relative_eq!(d.angle_between(&d)?, 0.0, epsilon = 1e-5);
        assert_relative_eq!(d.angle_between(&d.negate())?, 180.0, epsilon = 1e-5);
        Ok(())
    }

    #[test]
    fn test_project_on() -> Result<(), LinalgError> {
        let a = Vector::new(vec![1.0, 2.0, 3.0]);
        let b = Vector::new(vec![1.0, 1.0, 1.0]);
        let p = a.project_on(&b)?;
        assert_relative_eq!(p.length(), 2.0 * 3f64.sqrt(), epsilon = 1e-9);
        assert!(p.have_same_direction_with(&b)?);

        let rest = a.subtract(&p)?;
        assert!(rest.is_perpendicular_to(&b)?);
        Ok(())
    }

    #[test]
    fn test_equal_to() {
        let a = Vector::new(vec![1.0, 2.0]);
        assert!(a.equal_to(&Vector::from(vec![1.0, 2.0])));
        assert!(!a.equal_to(&Vector::new(vec![1.0, 2.5])));
        assert!(!a.equal_to(&Vector::new(vec![1.0, 2.0, 0.0])));
    }

    #[test]
    fn test_transform() -> Result<(), LinalgError> {
        let v = Vector::new(vec![1.0, 2.0]);
        let m = Matrix::new(vec![vec![1.0, 0.0, 2.0], vec![0.0, 1.0, -1.0]])?;
        let t = v.transform(&m)?;
        assert_eq!(t.len(), 3);
        for (x, y) in t.as_slice().iter().zip([1.0, 2.0, 0.0]) {
            assert_relative_eq!(*x, y, epsilon = 1e-12);
        }

        let bad = Vector::new(vec![1.0, 2.0, 3.0]);
        assert!(bad.transform(&m).is_err());
        Ok(())
    }

    #[test]
    fn test_component() -> Result<(), LinalgError> {
        let v = Vector::new(vec![7.0, 8.0]);
        assert_eq!(v.component(1)?, 8.0);
        assert_eq!(
            v.component(2),
            Err(LinalgError::IndexOutOfBounds { index: 2, size: 2 })
        );
        assert_eq!(v.to_string(), "[7, 8]");
        Ok(())
    }
}
