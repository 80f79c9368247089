//! Gauss–Jordan elimination (direct solver)
//!
//! # Algorithm
//!
//! The solver reduces the augmented matrix `[A | b]` in two sweeps:
//!
//! 1. **Downward** (columns 0..n-1): scale the pivot row so the pivot is 1,
//!    then eliminate the column from every row below.
//! 2. **Upward** (columns n-1..0): same, eliminating from every row above.
//!
//! When a pivot is zero, the first row further along the sweep with a nonzero
//! entry in that column is added to the pivot row. Rows are never swapped and
//! no row behind the sweep is consulted. If no candidate row exists the column
//! is left unresolved.
//!
//! "Zero" is relative: an entry counts as zero when its magnitude is at most
//! [`GAUSS_RELATIVE_ZERO`] times the largest coefficient of the system. Elimination
//! leaves roundoff such as `4.4e-16` where an exact zero belongs, and dividing
//! by it would blow the row up.
//!
//! After both sweeps a row whose coefficients are all zero but whose
//! augmented entry is not signals an inconsistent system
//! ([`LinearSystemSolution::NoSolution`]). Otherwise the last column is
//! returned as [`LinearSystemSolution::UniqueSolution`].
//!
//! # Limitations
//!
//! - No partial pivoting: accuracy suffers on badly scaled systems
//! - Systems with infinitely many solutions are **not detected**; they are
//!   reported as a unique solution holding whatever partially reduced values
//!   remain in the last column

use crate::algebra::{Matrix, WorkingMatrix};
use crate::error::SolverResult;
use crate::solver::{LinearSolver, LinearSystem, LinearSystemSolution};

/// Fraction of the largest entry below which a reduced entry counts as zero
pub const GAUSS_RELATIVE_ZERO: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sweep {
    Down,
    Up,
}

/// Absolute zero thresholds derived from the scale of one system
#[derive(Debug, Clone, Copy)]
struct ZeroThreshold {
    coefficient: f64,
    right_hand_side: f64,
}

impl ZeroThreshold {
    fn of(system: &LinearSystem) -> Self {
        let coefficients = largest_magnitude(system.coefficients());
        let right_hand_side = largest_magnitude(system.right_hand_side()).max(coefficients);

        Self {
            coefficient: GAUSS_RELATIVE_ZERO * coefficients,
            right_hand_side: GAUSS_RELATIVE_ZERO * right_hand_side,
        }
    }

    fn is_zero(&self, value: f64) -> bool {
        value.abs() <= self.coefficient
    }
}

fn largest_magnitude(matrix: &Matrix) -> f64 {
    matrix.iter().fold(0.0_f64, |largest, value| largest.max(value.abs()))
}

/// Direct linear solver based on Gauss–Jordan elimination
///
/// # Example
///
/// ```rust
/// use numsolve::algebra::Matrix;
/// use numsolve::solver::{GaussSolver, LinearSolver, LinearSystem, LinearSystemSolution};
///
/// # fn main() -> Result<(), numsolve::error::SolverError> {
/// let a = Matrix::from_rows(&[vec![1.0, 0.0], vec![0.0, 0.0]])?;
/// let b = Matrix::column_vector(&[3.0, 5.0]);
///
/// // 0·x + 0·y = 5 is inconsistent
/// let solution = GaussSolver::new().solve(&LinearSystem::new(a, b)?)?;
/// assert_eq!(solution, LinearSystemSolution::NoSolution);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussSolver;

impl GaussSolver {
    /// Create a new Gauss solver
    pub fn new() -> Self {
        Self
    }

    /// Reduce the augmented matrix of `system` with both sweeps
    fn reduce(&self, system: &LinearSystem, zero: ZeroThreshold) -> SolverResult<WorkingMatrix> {
        let mut augmented = system.augmented().into_working();
        let n = system.dimension();

        for column in 0..n {
            reduce_column(&mut augmented, column, Sweep::Down, zero)?;
        }
        for column in (0..n).rev() {
            reduce_column(&mut augmented, column, Sweep::Up, zero)?;
        }

        Ok(augmented)
    }
}

impl LinearSolver for GaussSolver {
    fn solve(&self, system: &LinearSystem) -> SolverResult<LinearSystemSolution> {
        let zero = ZeroThreshold::of(system);
        let reduced = self.reduce(system, zero)?;
        let n = system.dimension();

        if let Some(row) = first_inconsistent_row(&reduced, zero) {
            log::debug!("Gauss: row {row} reads 0 = {}, system is inconsistent", reduced[(row, n)]);
            return Ok(LinearSystemSolution::NoSolution);
        }

        let solution = reduced.into_matrix().column(n)?;
        Ok(LinearSystemSolution::UniqueSolution(solution))
    }

    fn name(&self) -> &str {
        "Gauss-Jordan elimination"
    }
}

/// Make the pivot of `column` equal to 1, then clear the column along the sweep
fn reduce_column(
    matrix: &mut WorkingMatrix,
    column: usize,
    sweep: Sweep,
    zero: ZeroThreshold,
) -> SolverResult<()> {
    if !make_unit_pivot(matrix, column, sweep, zero)? {
        log::debug!("Gauss: no nonzero pivot for column {column} ({sweep:?} sweep), column left unresolved");
        return Ok(());
    }

    let rows: Vec<usize> = match sweep {
        Sweep::Down => (column + 1..matrix.rows()).collect(),
        Sweep::Up => (0..column).rev().collect(),
    };

    for row in rows {
        let factor = matrix[(row, column)];
        if factor != 0.0 {
            matrix.sum_rows(row, column, -factor)?;
        }
    }

    Ok(())
}

/// Returns false when no row along the sweep can supply a nonzero pivot
fn make_unit_pivot(
    matrix: &mut WorkingMatrix,
    column: usize,
    sweep: Sweep,
    zero: ZeroThreshold,
) -> SolverResult<bool> {
    let pivot = matrix[(column, column)];
    if !zero.is_zero(pivot) {
        matrix.divide_row(column, pivot)?;
        return Ok(true);
    }

    let usable = |row: &usize| !zero.is_zero(matrix[(*row, column)]);
    let donor = match sweep {
        Sweep::Down => (column + 1..matrix.rows()).find(usable),
        Sweep::Up => (0..column).rev().find(usable),
    };

    let Some(donor) = donor else {
        return Ok(false);
    };

    matrix.sum_rows(column, donor, 1.0 / matrix[(donor, column)])?;

    // rounding in the sum can leave the pivot slightly off 1
    let pivot = matrix[(column, column)];
    matrix.divide_row(column, pivot)?;
    Ok(true)
}

/// Row with all-zero coefficients and a nonzero augmented entry
fn first_inconsistent_row(matrix: &WorkingMatrix, zero: ZeroThreshold) -> Option<usize> {
    let n = matrix.columns() - 1;

    (0..matrix.rows()).find(|&row| {
        (0..n).all(|column| zero.is_zero(matrix[(row, column)]))
            && matrix[(row, n)].abs() > zero.right_hand_side
    })
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::Matrix;
    use approx::assert_abs_diff_eq;

    fn system(rows: &[Vec<f64>], rhs: &[f64]) -> LinearSystem {
        LinearSystem::new(Matrix::from_rows(rows).unwrap(), Matrix::column_vector(rhs)).unwrap()
    }

    fn unique(solution: LinearSystemSolution) -> Vec<f64> {
        solution
            .into_unique_solution()
            .expect("expected a unique solution")
            .to_column_vec()
            .unwrap()
    }

    #[test]
    fn test_gauss_solver_name() {
        assert_eq!(GaussSolver::new().name(), "Gauss-Jordan elimination");
        assert_eq!(GaussSolver::default().name(), GaussSolver.name());
    }

    #[test]
    fn test_diagonal_system() {
        let solution = GaussSolver::new()
            .solve(&system(&[vec![2.0, 0.0], vec![0.0, 4.0]], &[4.0, 2.0]))
            .unwrap();
        assert_eq!(unique(solution), vec![2.0, 0.5]);
    }

    #[test]
    fn test_dense_system() {
        // x = (1, -2, 3)
        let s = system(
            &[vec![2.0, 1.0, -1.0], vec![-3.0, -1.0, 2.0], vec![-2.0, 1.0, 2.0]],
            &[-3.0, 5.0, 2.0],
        );
        let x = unique(GaussSolver::new().solve(&s).unwrap());

        assert_abs_diff_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], -2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[2], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_pivot_resolved_from_row_below() {
        // first pivot is zero, row 1 supplies it
        let s = system(&[vec![0.0, 1.0], vec![2.0, 1.0]], &[3.0, 5.0]);
        let x = unique(GaussSolver::new().solve(&s).unwrap());

        assert_abs_diff_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_threshold_follows_system_scale() {
        // every entry is tiny, none of them counts as zero
        let s = system(&[vec![1e-12, 0.0], vec![0.0, 2e-12]], &[1e-12, 4e-12]);
        let x = unique(GaussSolver::new().solve(&s).unwrap());

        assert_abs_diff_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_roundoff_pivot_is_treated_as_zero() {
        // 1e-17 sits far below 1e-10 · 4, so row 1 supplies the first pivot
        let s = system(&[vec![1e-17, 1.0], vec![2.0, 4.0]], &[3.0, 14.0]);
        let x = unique(GaussSolver::new().solve(&s).unwrap());

        assert_abs_diff_eq!(x[0], 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(x[1], 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_inconsistent_zero_row() {
        let s = system(&[vec![1.0, 0.0], vec![0.0, 0.0]], &[3.0, 5.0]);
        assert_eq!(GaussSolver::new().solve(&s).unwrap(), LinearSystemSolution::NoSolution);
    }

    #[test]
    fn test_inconsistent_parallel_rows() {
        // x + 2y = 1 and 2x + 4y = 3
        let s = system(&[vec![1.0, 2.0], vec![2.0, 4.0]], &[1.0, 3.0]);
        assert_eq!(GaussSolver::new().solve(&s).unwrap(), LinearSystemSolution::NoSolution);
    }

    #[test]
    fn test_dependent_system_reported_as_unique() {
        // x + y = 2 twice: infinitely many solutions, not detected
        let s = system(&[vec![1.0, 1.0], vec![1.0, 1.0]], &[2.0, 2.0]);
        let solution = GaussSolver::new().solve(&s).unwrap();

        assert!(solution.is_unique());
        let x = unique(solution);
        assert_abs_diff_eq!(x[0] + x[1], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_input_untouched_and_idempotent() {
        let s = system(&[vec![4.0, 1.0], vec![1.0, 3.0]], &[1.0, 2.0]);
        let before = s.clone();

        let first = GaussSolver::new().solve(&s).unwrap();
        let second = GaussSolver::new().solve(&s).unwrap();

        assert_eq!(s, before);
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_unknown() {
        let s = system(&[vec![4.0]], &[2.0]);
        assert_eq!(unique(GaussSolver::new().solve(&s).unwrap()), vec![0.5]);

        let s = system(&[vec![0.0]], &[2.0]);
        assert_eq!(GaussSolver::new().solve(&s).unwrap(), LinearSystemSolution::NoSolution);
    }
}
