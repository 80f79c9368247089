//! Jacobi rotation method for symmetric eigenproblems
//!
//! # Mathematical Background
//!
//! A real symmetric matrix is diagonalized by an orthogonal matrix:
//! `A = V·Λ·Vᵗ`. The Jacobi method builds `V` as a product of plane
//! rotations, each chosen to annihilate the largest off-diagonal entry:
//!
//! ```text
//! A⁽ᵏ⁺¹⁾ = Rᵗ·A⁽ᵏ⁾·R        V⁽ᵏ⁺¹⁾ = V⁽ᵏ⁾·R
//! ```
//!
//! For the pivot `(p, q)` the angle satisfies `tan 2θ = 2·a_pq / (a_pp − a_qq)`.
//! When the two diagonal entries are closer than the degenerate gap the
//! angle is fixed at π/4.
//!
//! Later rotations refill entries zeroed earlier, but the off-diagonal norm
//! decreases monotonically, so the iteration converges. Eigenvalues are the
//! diagonal of the final matrix; eigenvectors are the columns of `V`.
//!
//! # Limitations
//!
//! - The default tolerance (0.1 on the off-diagonal norm) is coarse; tighten
//!   it for accurate eigenpairs
//! - With a nonzero degenerate gap, entries whose diagonal difference falls
//!   below the gap are rotated by π/4 instead of the exact angle. For tight
//!   tolerances use a gap of 0.0
//! - Every rotation is applied as a full matrix product (O(n³) per rotation)

use std::f64::consts::FRAC_PI_4;

use crate::algebra::Matrix;
use crate::error::{SolverError, SolverResult};
use crate::solver::{DEFAULT_TOLERANCE, EigenSolution, SolverConfiguration};

/// Default rotation cap for [`JacobiSolver`]
pub const DEFAULT_JACOBI_MAX_ITERATIONS: usize = 10_000;

/// Default diagonal gap below which the rotation angle is π/4
pub const DEFAULT_DEGENERATE_GAP: f64 = 0.1;

/// Entries further apart than this make a matrix asymmetric
const SYMMETRY_TOLERANCE: f64 = 1e-9;

const METHOD: &str = "Jacobi";

/// Largest upper-triangle off-diagonal entry of a matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffDiagonalEntry {
    pub row: usize,
    pub column: usize,
    pub value: f64,
}

impl OffDiagonalEntry {
    /// Entry of largest magnitude above the diagonal
    ///
    /// Ties go to the first entry in row-major order. `None` for matrices
    /// without off-diagonal entries (1×1 and empty).
    pub fn largest(matrix: &Matrix) -> Option<Self> {
        let n = matrix.rows();
        let mut largest: Option<Self> = None;

        for row in 0..n {
            for column in row + 1..n {
                let value = matrix[(row, column)];
                let replace = match largest {
                    None => true,
                    Some(current) => value.abs() > current.value.abs(),
                };
                if replace {
                    largest = Some(Self { row, column, value });
                }
            }
        }

        largest
    }
}

/// Eigen-decomposition of symmetric matrices by Jacobi rotations
///
/// # Example
///
/// ```rust
/// use numsolve::algebra::Matrix;
/// use numsolve::solver::JacobiSolver;
///
/// # fn main() -> Result<(), numsolve::error::SolverError> {
/// let a = Matrix::from_rows(&[vec![2.0, 1.0], vec![1.0, 2.0]])?;
/// let solution = JacobiSolver::new().solve(&a)?;
///
/// let mut values = solution.eigenvalues().to_column_vec()?;
/// values.sort_by(|a, b| a.partial_cmp(b).unwrap());
/// assert!((values[0] - 1.0).abs() < 1e-12);
/// assert!((values[1] - 3.0).abs() < 1e-12);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JacobiSolver {
    configuration: SolverConfiguration,
    degenerate_gap: f64,
}

impl JacobiSolver {
    /// Solver with tolerance 0.1, a 10 000 rotation cap and a 0.1 degenerate gap
    pub fn new() -> Self {
        Self {
            configuration: SolverConfiguration::iterative(
                DEFAULT_TOLERANCE,
                DEFAULT_JACOBI_MAX_ITERATIONS,
            ),
            degenerate_gap: DEFAULT_DEGENERATE_GAP,
        }
    }

    /// Solver using an explicit iterative configuration
    pub fn with_configuration(configuration: SolverConfiguration) -> SolverResult<Self> {
        configuration.iterative_parameters("JacobiSolver")?;
        Ok(Self { configuration, ..Self::new() })
    }

    /// Replace the tolerance on the off-diagonal norm
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.configuration = self.configuration.with_tolerance(tolerance);
        self
    }

    /// Replace the rotation cap
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.configuration = self.configuration.with_max_iterations(max_iterations);
        self
    }

    /// Replace the degenerate gap (0.0 always uses the exact angle)
    pub fn with_degenerate_gap(mut self, degenerate_gap: f64) -> Self {
        self.degenerate_gap = degenerate_gap;
        self
    }

    pub fn configuration(&self) -> &SolverConfiguration {
        &self.configuration
    }

    pub fn degenerate_gap(&self) -> f64 {
        self.degenerate_gap
    }

    pub fn name(&self) -> &str {
        "Jacobi rotations"
    }

    /// Eigenvalues and eigenvectors of a symmetric matrix
    ///
    /// The input is not modified.
    ///
    /// # Errors
    ///
    /// - [`SolverError::Validation`] for an invalid configuration or gap
    /// - [`SolverError::Shape`] if `matrix` is empty or not square
    /// - [`SolverError::NotSymmetric`] if `matrix` is not symmetric
    /// - [`SolverError::NoConvergence`] when the rotation cap is reached
    pub fn solve(&self, matrix: &Matrix) -> SolverResult<EigenSolution> {
        let (tolerance, max_iterations) = self.configuration.iterative_parameters("JacobiSolver")?;
        if !(self.degenerate_gap >= 0.0 && self.degenerate_gap.is_finite()) {
            return Err(SolverError::validation(format!(
                "Degenerate gap must be non-negative and finite, got {}",
                self.degenerate_gap
            )));
        }

        if !matrix.is_square() {
            return Err(SolverError::shape(format!(
                "eigen-decomposition needs a square non-empty matrix, got {}x{}",
                matrix.rows(),
                matrix.columns()
            )));
        }
        if let Some((row, column)) = matrix.first_asymmetric_pair(SYMMETRY_TOLERANCE) {
            return Err(SolverError::NotSymmetric { row, column });
        }

        let n = matrix.rows();
        let mut current = matrix.clone();
        let mut vectors = Matrix::identity(n);
        let mut rotations = 0;

        loop {
            let norm = off_diagonal_norm(&current);
            if norm <= tolerance {
                log::debug!("Jacobi converged after {rotations} rotations (off-diagonal norm {norm:e})");
                break;
            }
            if rotations == max_iterations {
                log::warn!("Jacobi gave up after {rotations} rotations (off-diagonal norm {norm:e})");
                return Err(SolverError::NoConvergence {
                    method: METHOD,
                    iterations: rotations,
                    residual: norm,
                });
            }

            // norm > 0 guarantees an off-diagonal entry
            let Some(pivot) = OffDiagonalEntry::largest(&current) else {
                break;
            };

            let rotation = self.rotation(&current, pivot);
            vectors = vectors.multiply_right(&rotation)?;
            current = current.multiply_left(&rotation.transposed())?.multiply_right(&rotation)?;
            rotations += 1;

            log::trace!(
                "Jacobi rotation {rotations}: pivot ({}, {}) = {:e}",
                pivot.row,
                pivot.column,
                pivot.value
            );
        }

        let eigenvalues = Matrix::from_fn(n, 1, |i, _| current[(i, i)]);
        let eigenvectors = (0..n).map(|i| vectors.column(i)).collect::<SolverResult<Vec<_>>>()?;

        Ok(EigenSolution::new(eigenvectors, eigenvalues, current, rotations))
    }

    /// Plane rotation annihilating `pivot`
    fn rotation(&self, matrix: &Matrix, pivot: OffDiagonalEntry) -> Matrix {
        let OffDiagonalEntry { row: p, column: q, value } = pivot;
        let difference = matrix[(p, p)] - matrix[(q, q)];

        let angle = if difference.abs() < self.degenerate_gap {
            FRAC_PI_4
        } else {
            0.5 * (2.0 * value / difference).atan()
        };
        let (sin, cos) = angle.sin_cos();

        Matrix::from_fn(matrix.rows(), matrix.columns(), |i, j| {
            if (i, j) == (p, p) || (i, j) == (q, q) {
                cos
            } else if (i, j) == (p, q) {
                -sin
            } else if (i, j) == (q, p) {
                sin
            } else if i == j {
                1.0
            } else {
                0.0
            }
        })
    }
}

impl Default for JacobiSolver {
    fn default() -> Self {
        Self::new()
    }
}

/// sqrt(Σ_{i<j} a_ij²)
fn off_diagonal_norm(matrix: &Matrix) -> f64 {
    let n = matrix.rows();
    (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .map(|(i, j)| matrix[(i, j)].powi(2))
        .sum::<f64>()
        .sqrt()
}

// =================================================================================================
// Tests
// =================================================================================================
