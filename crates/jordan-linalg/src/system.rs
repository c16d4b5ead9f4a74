use std::collections::BTreeMap;

use crate::{
    error::LinalgError,
    matrix::{Matrix, Pivot},
    vector::Vector,
};

/// Direction of the general solution associated with one free variable.
#[derive(Clone, Debug, PartialEq)]
pub struct Direction {
    /// Label of the free variable.
    pub label: String,
    /// Column of the free variable in the coefficient matrix.
    pub column: usize,
    /// Direction vector, one entry per variable.
    pub vector: Vector,
}

/// The solution set of a linear system.
///
/// The general solution reads `particular + sum(x_f * direction_f)` over the
/// free variables `x_f`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Solutions {
    /// Scalar values of the basic variables whose row has no other coefficient.
    pub values: BTreeMap<String, f64>,
    /// Particular solution, present when the system has free variables.
    pub particular: Option<Vector>,
    /// Free-variable directions, in column order.
    pub directions: Vec<Direction>,
}

impl Solutions {
    /// Scalar value of the variable named `label`.
    pub fn value(&self, label: &str) -> Option<f64> {
        self.values.get(label).copied()
    }

    /// Direction vector of the free variable named `label`.
    pub fn direction(&self, label: &str) -> Option<&Vector> {
        self.directions
            .iter()
            .find(|d| d.label == label)
            .map(|d| &d.vector)
    }

    /// Returns true if nothing was solved for.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.particular.is_none() && self.directions.is_empty()
    }
}

/// Everything [`LinearSystem::solve`] finds out about a system.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    /// Coefficient part of the reduced augmented matrix.
    pub coefficients: Matrix,
    /// Right-hand side of the reduced augmented matrix.
    pub augmented_column: Vector,
    /// Whether the system has exactly one solution.
    pub unique: bool,
    /// Whether the system has any solution at all.
    pub consistent: bool,
    /// Pivots of the reduced coefficient matrix.
    pub pivots: Vec<Pivot>,
    /// Columns holding a pivot.
    pub basic_variable_column_indexes: Vec<usize>,
    /// Columns without a pivot.
    pub free_variable_column_indexes: Vec<usize>,
    /// Variable labels, one per coefficient column.
    pub label_names: Vec<String>,
    /// The solution set; empty when the system is inconsistent.
    pub solutions: Solutions,
    /// `None` for an inconsistent system, otherwise whether the only solution is the trivial one.
    pub is_linearly_independent: Option<bool>,
}

/// A linear system given by its augmented matrix `[A | b]`.
///
/// # Example
///
/// ```
/// use jordan_linalg::{LinearSystem, Matrix};
///
/// let m = Matrix::new(vec![vec![1.0, 1.0, 3.0], vec![1.0, -1.0, 1.0]]).unwrap();
/// let mut system = LinearSystem::new(m).unwrap();
/// let solution = system.solve().unwrap();
/// assert!(solution.unique);
/// assert_eq!(solution.solutions.value("x_1"), Some(2.0));
/// assert_eq!(solution.solutions.value("x_2"), Some(1.0));
/// ```
#[derive(Clone, Debug)]
pub struct LinearSystem {
    system: Matrix,
    labels: Vec<String>,
    solution: Option<Solution>,
}

impl LinearSystem {
    /// Create a system from its augmented matrix, labelling the variables `x_1..x_n`.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the matrix has no columns.
    pub fn new(system: Matrix) -> Result<Self, LinalgError> {
        Self::with_labels(system, Vec::new())
    }

    /// Create a system with custom variable labels.
    ///
    /// Missing or empty labels fall back to `x_i` for their position.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the matrix has no columns.
    pub fn with_labels(system: Matrix, labels: Vec<String>) -> Result<Self, LinalgError> {
        if system.columns() == 0 {
            return Err(LinalgError::shape_mismatch(
                "linear_system",
                &[system.rows(), 1],
                &system.shape(),
            ));
        }
        Ok(Self {
            system,
            labels,
            solution: None,
        })
    }

    /// The augmented matrix.
    pub fn system(&self) -> &Matrix {
        &self.system
    }

    /// All the columns but the last.
    pub fn coefficients(&self) -> Result<Matrix, LinalgError> {
        self.system.slice_columns(0, self.system.columns() - 1)
    }

    /// The last column.
    pub fn augmented_column(&self) -> Result<Vector, LinalgError> {
        self.system.column(self.system.columns() - 1)
    }

    /// One label per variable.
    pub fn label_names(&self) -> Vec<String> {
        (0..self.system.columns() - 1)
            .map(|i| match self.labels.get(i) {
                Some(label) if !label.is_empty() => label.clone(),
                _ => format!("x_{}", i + 1),
            })
            .collect()
    }

    /// Returns true once [`LinearSystem::solve`] has run.
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }

    /// Consistency found by the last solve.
    pub fn consistent(&self) -> Option<bool> {
        self.solution.as_ref().map(|s| s.consistent)
    }

    /// Uniqueness found by the last solve.
    pub fn unique(&self) -> Option<bool> {
        self.solution.as_ref().map(|s| s.unique)
    }

    /// Result of the last solve.
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    /// Solve the system.
    ///
    /// The augmented matrix is brought to reduced row echelon form. An all-zero
    /// coefficient row with a non-zero right-hand side makes the system
    /// inconsistent. Otherwise the basic variables with a clean row get a
    /// scalar value, and a system that is not unique is written as a
    /// particular vector plus one direction per free variable.
    pub fn solve(&mut self) -> Result<&Solution, LinalgError> {
        let reduced = LinearSystem::new(self.system.rref())?;
        let coefficients = reduced.coefficients()?;
        let augmented_column = reduced.augmented_column()?;
        let label_names = self.label_names();
        let n = coefficients.columns();
        let rhs = augmented_column.as_slice();

        let mut consistent = true;
        for i in 0..coefficients.rows() {
            let row = coefficients.row(i)?;
            if row.as_slice().iter().all(|&x| x == 0.0) && rhs[i] != 0.0 {
                consistent = false;
            }
        }

        let diagonal = coefficients.diagonal();
        let unique =
            diagonal.as_slice().iter().all(|&x| x == 1.0) && diagonal.len() == n && consistent;

        let pivots = coefficients.pivots();
        let basic_variable_column_indexes: Vec<usize> = pivots.iter().map(|p| p.column).collect();
        let free_variable_column_indexes: Vec<usize> = (0..n)
            .filter(|c| !basic_variable_column_indexes.contains(c))
            .collect();

        let mut solutions = Solutions::default();
        if consistent {
            for pivot in &pivots {
                let row = coefficients.row(pivot.row)?;
                let clean = row
                    .as_slice()
                    .iter()
                    .enumerate()
                    .all(|(c, &x)| c == pivot.column || x == 0.0);
                if clean {
                    solutions
                        .values
                        .insert(label_names[pivot.column].clone(), rhs[pivot.row]);
                }
            }

            if !unique {
                let (particular, directions) =
                    parameterize(&coefficients, rhs, &pivots, &basic_variable_column_indexes)?;
                solutions.particular = Some(particular);
                solutions.directions = directions
                    .into_iter()
                    .map(|(column, vector)| Direction {
                        label: label_names[column].clone(),
                        column,
                        vector,
                    })
                    .collect();
            }
        }

        let is_linearly_independent = consistent.then(|| unique && augmented_column.sum() == 0.0);

        log::debug!(
            "solved {}x{} system: consistent={consistent} unique={unique} free={:?}",
            coefficients.rows(),
            n,
            free_variable_column_indexes
        );

        Ok(&*self.solution.insert(Solution {
            coefficients,
            augmented_column,
            unique,
            consistent,
            pivots,
            basic_variable_column_indexes,
            free_variable_column_indexes,
            label_names,
            solutions,
            is_linearly_independent,
        }))
    }
}

/// Vector form of the general solution of a consistent reduced system.
///
/// Row `v` of the assembled matrix expresses variable `v` in terms of the free
/// variables: a pivot row contributes its negated non-pivot coefficients, a
/// free variable contributes a unit row. Every non-zero column of that matrix
/// is the direction of the free variable of the same index.
fn parameterize(
    coefficients: &Matrix,
    rhs: &[f64],
    pivots: &[Pivot],
    basic: &[usize],
) -> Result<(Vector, Vec<(usize, Vector)>), LinalgError> {
    let n = coefficients.columns();
    let mut particular = vec![0.0; n];
    let mut rows: Vec<Vec<f64>> = Vec::with_capacity(n);

    for v in 0..n {
        match pivots.iter().find(|p| p.column == v) {
            Some(pivot) => {
                particular[v] = rhs[pivot.row];
                let coeffs = coefficients.row(pivot.row)?;
                let row = coeffs
                    .as_slice()
                    .iter()
                    .enumerate()
                    .map(|(c, &x)| {
                        if (basic.contains(&c) && x == 1.0) || x == 0.0 {
                            0.0
                        } else {
                            -x
                        }
                    })
                    .collect();
                rows.push(row);
            }
            None => {
                let mut row = vec![0.0; n];
                row[v] = 1.0;
                rows.push(row);
            }
        }
    }

    let assembled = Matrix::new(rows)?;
    let mut directions = Vec::new();
    for c in 0..n {
        let column = assembled.column(c)?;
        if column.as_slice().iter().any(|&x| x != 0.0) {
            directions.push((c, column));
        }
    }

    Ok((Vector::new(particular), directions))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() -> Result<(), LinalgError> {
        let m = Matrix::zeros(2, 4);
        let system = LinearSystem::new(m.clone())?;
        assert_eq!(system.label_names(), vec!["x_1", "x_2", "x_3"]);

        let system = LinearSystem::with_labels(m, vec!["a".into(), String::new()])?;
        assert_eq!(system.label_names(), vec!["a", "x_2", "x_3"]);
        Ok(())
    }

    #[test]
    fn test_split() -> Result<(), LinalgError> {
        let m = Matrix::new(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]])?;
        let system = LinearSystem::new(m)?;
        assert_eq!(
            system.coefficients()?.get(),
            vec![vec![1.0, 2.0], vec![4.0, 5.0]]
        );
        assert_eq!(system.augmented_column()?.get(), vec![3.0, 6.0]);
        assert!(!system.is_solved());
        assert_eq!(system.consistent(), None);
        Ok(())
    }

    #[test]
    fn test_rejects_empty_matrix() {
        let res = LinearSystem::new(Matrix::zeros(2, 0));
        assert!(matches!(res, Err(LinalgError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_unique() -> Result<(), LinalgError> {
        let m = Matrix::new(vec![
            vec![1.0, -2.0, 1.0, 0.0],
            vec![0.0, 2.0, -8.0, 8.0],
            vec![5.0, 0.0, -5.0, 10.0],
        ])?;
        let mut system = LinearSystem::new(m)?;
        let solution = system.solve()?;
        assert!(solution.unique);
        assert!(solution.consistent);
        assert_eq!(solution.basic_variable_column_indexes, vec![0, 1, 2]);
        assert!(solution.free_variable_column_indexes.is_empty());
        assert_eq!(solution.solutions.value("x_1"), Some(1.0));
        assert_eq!(solution.solutions.value("x_2"), Some(0.0));
        assert_eq!(solution.solutions.value("x_3"), Some(-1.0));
        assert_eq!(solution.solutions.particular, None);
        assert!(solution.solutions.directions.is_empty());
        // the reduced right-hand side [1, 0, -1] sums to zero
        assert_eq!(solution.is_linearly_independent, Some(true));

        assert!(system.is_solved());
        assert_eq!(system.unique(), Some(true));
        Ok(())
    }

    #[test]
    fn test_non_unique() -> Result<(), LinalgError> {
        let m = Matrix::new(vec![vec![1.0, 4.0, -5.0, 0.0], vec![2.0, -1.0, 8.0, 9.0]])?;
        let mut system = LinearSystem::new(m)?;
        let solution = system.solve()?;
        assert!(!solution.unique);
        assert!(solution.consistent);
        assert_eq!(
            solution.coefficients.get(),
            vec![vec![1.0, 0.0, 3.0], vec![0.0, 1.0, -2.0]]
        );
        assert_eq!(solution.free_variable_column_indexes, vec![2]);
        assert!(solution.solutions.values.is_empty());
        assert_eq!(
            solution.solutions.particular,
            Some(Vector::new(vec![4.0, -1.0, 0.0]))
        );
        assert_eq!(solution.solutions.directions.len(), 1);
        assert_eq!(
            solution.solutions.direction("x_3"),
            Some(&Vector::new(vec![-3.0, 2.0, 1.0]))
        );
        assert_eq!(solution.is_linearly_independent, Some(false));
        Ok(())
    }

    #[test]
    fn test_inconsistent() -> Result<(), LinalgError> {
        let m = Matrix::new(vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 2.0, 4.0],
        ])?;
        let mut system = LinearSystem::new(m)?;
        let solution = system.solve()?;
        assert!(!solution.consistent);
        assert!(!solution.unique);
        assert!(solution.solutions.is_empty());
        assert_eq!(solution.is_linearly_independent, None);
        Ok(())
    }

    #[test]
    fn test_homogeneous_trivial() -> Result<(), LinalgError> {
        let m = Matrix::new(vec![vec![1.0, 2.0, 0.0], vec![3.0, 4.0, 0.0]])?;
        let mut system = LinearSystem::new(m)?;
        let solution = system.solve()?;
        assert!(solution.unique);
        assert_eq!(solution.is_linearly_independent, Some(true));
        Ok(())
    }

    #[test]
    fn test_custom_labels() -> Result<(), LinalgError> {
        let m = Matrix::new(vec![vec![1.0, -1.0, 0.0, 2.0]])?;
        let mut system = LinearSystem::with_labels(m, vec!["x".into(), "y".into(), "z".into()])?;
        let solution = system.solve()?;
        assert_eq!(
            solution.solutions.particular,
            Some(Vector::new(vec![2.0, 0.0, 0.0]))
        );
        assert_eq!(
            solution.solutions.direction("y"),
            Some(&Vector::new(vec![1.0, 1.0, 0.0]))
        );
        assert_eq!(
            solution.solutions.direction("z"),
            Some(&Vector::new(vec![0.0, 0.0, 1.0]))
        );
        assert_eq!(solution.solutions.direction("x"), None);
        Ok(())
    }
}
