use approx::assert_relative_eq;
use jordan_linalg::{Diagonalization, EigenOptions, LinalgError, Matrix};

fn assert_close(a: &Matrix, b: &Matrix, epsilon: f64) {
    assert_eq!(a.shape(), b.shape());
    for (x, y) in a.as_tensor().as_slice().iter().zip(b.as_tensor().as_slice()) {
        assert_relative_eq!(*x, *y, epsilon = epsilon);
    }
}

#[test]
fn eigenvalues_of_two_by_two() -> Result<(), LinalgError> {
    let m = Matrix::new(vec![vec![1.0, 6.0], vec![5.0, 2.0]])?;
    let values = m.eigenvalues(&EigenOptions::default())?;
    let mut found = values.get();
    found.sort_by(|a, b| b.total_cmp(a));
    assert_relative_eq!(found[0], 7.0, epsilon = 1e-6);
    assert_relative_eq!(found[1], -4.0, epsilon = 1e-6);
    Ok(())
}

#[test]
fn eigenspaces_with_repeated_eigenvalue() -> Result<(), LinalgError> {
    let m = Matrix::new(vec![
        vec![4.0, -1.0, 6.0],
        vec![2.0, 1.0, 6.0],
        vec![2.0, -1.0, 8.0],
    ])?;
    let pairs = m.eigenvectors(&EigenOptions::default().rounded(true))?;
    assert_eq!(pairs.len(), 2);

    let nine = pairs.iter().find(|p| p.eigenvalue == 9.0);
    let two = pairs.iter().find(|p| p.eigenvalue == 2.0);
    let (Some(nine), Some(two)) = (nine, two) else {
        panic!("expected eigenvalues 9 and 2, got {pairs:?}");
    };

    assert_eq!(nine.multiplicity, 1);
    assert_eq!(nine.eigenvectors[0].get(), vec![1.0, 1.0, 1.0]);

    assert_eq!(two.multiplicity, 2);
    assert_eq!(two.eigenvectors[0].get(), vec![0.5, 1.0, 0.0]);
    assert_eq!(two.eigenvectors[1].get(), vec![-3.0, 0.0, 1.0]);
    Ok(())
}

#[test]
fn diagonalizes_matrix_with_repeated_eigenvalue() -> Result<(), LinalgError> {
    let m = Matrix::new(vec![
        vec![4.0, -1.0, 6.0],
        vec![2.0, 1.0, 6.0],
        vec![2.0, -1.0, 8.0],
    ])?;
    let Diagonalization::Diagonalizable { p, d, p_inverse } =
        m.diagonalize(&EigenOptions::default().rounded(true))?
    else {
        panic!("matrix should be diagonalizable");
    };

    assert_eq!(d.diagonal().get(), vec![9.0, 2.0, 2.0]);
    assert_close(&m.multiply(&p)?, &p.multiply(&d)?, 1e-9);
    assert_close(&p.multiply(&d)?.multiply(&p_inverse)?, &m, 1e-9);

    // A^2 = P D^2 P^-1
    let squared = m.multiply(&m)?;
    let via_d = p.multiply(&d)?.multiply(&d)?.multiply(&p_inverse)?;
    assert_close(&squared, &via_d, 1e-8);
    Ok(())
}

#[test]
fn defective_matrix_is_not_diagonalizable() -> Result<(), LinalgError> {
    let m = Matrix::new(vec![vec![5.0, 1.0], vec![0.0, 5.0]])?;
    let result = m.diagonalize(&EigenOptions::default().rounded(true))?;
    assert_eq!(result, Diagonalization::NotDiagonalizable);
    Ok(())
}

#[test]
fn diagonalizes_with_unrounded_eigenvalues() -> Result<(), LinalgError> {
    let m = Matrix::new(vec![vec![1.0, 6.0], vec![5.0, 2.0]])?;
    let Diagonalization::Diagonalizable { p, d, p_inverse } =
        m.diagonalize(&EigenOptions::default())?
    else {
        panic!("matrix should be diagonalizable");
    };

    let eigenvalues = d.diagonal().get();
    assert_relative_eq!(eigenvalues[0], 7.0, epsilon = 1e-6);
    assert_relative_eq!(eigenvalues[1], -4.0, epsilon = 1e-6);

    // columns are ~[1, 1] and ~[-1.2, 1]
    let first = p.column(0)?.get();
    let second = p.column(1)?.get();
    assert_relative_eq!(first[0] / first[1], 1.0, epsilon = 1e-6);
    assert_relative_eq!(second[0] / second[1], -1.2, epsilon = 1e-6);

    assert_close(&m.multiply(&p)?, &p.multiply(&d)?, 1e-6);
    assert_close(&p.multiply(&d)?.multiply(&p_inverse)?, &m, 1e-6);

    let defective = Matrix::new(vec![vec![5.0, 1.0], vec![0.0, 5.0]])?;
    assert_eq!(
        defective.diagonalize(&EigenOptions::default())?,
        Diagonalization::NotDiagonalizable
    );
    Ok(())
}
