use nalgebra::DMatrix;
use num_complex::Complex64;

use crate::matrix::Triplet;

/// Accumulates triplets into a dense `dim x dim` matrix for small-system checks.
pub fn to_dense(triplets: &[Triplet], dim: usize) -> DMatrix<Complex64> {
    let mut matrix = DMatrix::<Complex64>::zeros(dim, dim);
    for triplet in triplets {
        matrix[(triplet.bra, triplet.ket)] += triplet.value;
    }
    matrix
}

/// Largest entry of `M - M^dagger`, zero for a Hermitian matrix.
pub fn hermiticity_defect(matrix: &DMatrix<Complex64>) -> f64 {
    let adjoint = matrix.adjoint();
    (matrix - adjoint)
        .iter()
        .map(|entry| entry.norm())
        .fold(0.0, f64::max)
}
