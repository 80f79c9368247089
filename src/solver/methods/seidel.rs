//! Gauss–Seidel iteration on the normal equations
//!
//! # Mathematical Background
//!
//! Gauss–Seidel converges for symmetric positive definite matrices, which an
//! arbitrary square `A` is not. The system is therefore normalized first:
//!
//! ```text
//! AᵗA·x = Aᵗb
//! ```
//!
//! For nonsingular `A` the matrix `AᵗA` is SPD, so the iteration converges
//! from any starting point (here x⁰ = 0). Each sweep updates the unknowns
//! in order, reusing the values already updated in the same sweep:
//!
//! ```text
//! xᵢ⁽ᵏ⁺¹⁾ = (bᵢ − Σ_{j<i} aᵢⱼ·xⱼ⁽ᵏ⁺¹⁾ − Σ_{j>i} aᵢⱼ·xⱼ⁽ᵏ⁾) / aᵢᵢ
//! ```
//!
//! # Stopping
//!
//! A small step alone does not bound the error: with contraction rate ρ the
//! remaining error is about ρ/(1 − ρ) times the step, and ρ gets close to 1
//! on ill-conditioned input. Iteration therefore stops once **both** hold:
//!
//! ```text
//! ‖x⁽ᵏ⁺¹⁾ − x⁽ᵏ⁾‖ ≤ tolerance
//! ‖AᵗA·x⁽ᵏ⁺¹⁾ − Aᵗb‖ / λ_min(AᵗA) ≤ tolerance
//! ```
//!
//! The second quantity is an upper bound on ‖x⁽ᵏ⁺¹⁾ − x*‖, so the tolerance
//! bounds the actual error. λ_min is computed once per solve.
//!
//! # Limitations
//!
//! - Squaring the system squares its condition number, so convergence slows
//!   down markedly on ill-conditioned input
//! - No inconsistency detection: a result is always a unique solution
//! - Singular systems either produce a zero diagonal entry in `AᵗA` and fail
//!   with [`SolverError::NumericalInstability`], or never certify their error
//!   and fail with [`SolverError::NoConvergence`]

use crate::algebra::Matrix;
use crate::error::{SolverError, SolverResult};
use crate::solver::{
    DEFAULT_TOLERANCE, LinearSolver, LinearSystem, LinearSystemSolution, SolverConfiguration,
    validate_state,
};

/// Default iteration cap for [`SeidelSolver`]
pub const DEFAULT_SEIDEL_MAX_ITERATIONS: usize = 100_000;

const METHOD: &str = "Seidel";

/// Iterative linear solver (Gauss–Seidel on the normal equations)
///
/// # Example
///
/// ```rust
/// use numsolve::algebra::Matrix;
/// use numsolve::solver::{LinearSolver, LinearSystem, SeidelSolver};
///
/// # fn main() -> Result<(), numsolve::error::SolverError> {
/// let a = Matrix::from_rows(&[vec![4.0, 1.0], vec![1.0, 3.0]])?;
/// let b = Matrix::column_vector(&[1.0, 2.0]);
///
/// let solver = SeidelSolver::new().with_tolerance(1e-10);
/// let x = solver.solve(&LinearSystem::new(a, b)?)?;
///
/// let expected = Matrix::column_vector(&[1.0 / 11.0, 7.0 / 11.0]);
/// assert!(x.unique_solution().unwrap().equals_precision(&expected, 1e-8));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SeidelSolver {
    configuration: SolverConfiguration,
}

impl SeidelSolver {
    /// Solver with tolerance 0.1 and a 100 000 iteration cap
    pub fn new() -> Self {
        Self {
            configuration: SolverConfiguration::iterative(
                DEFAULT_TOLERANCE,
                DEFAULT_SEIDEL_MAX_ITERATIONS,
            ),
        }
    }

    /// Solver using an explicit configuration
    ///
    /// # Errors
    ///
    /// [`SolverError::Validation`] if the configuration is invalid or not iterative.
    pub fn with_configuration(configuration: SolverConfiguration) -> SolverResult<Self> {
        configuration.iterative_parameters("SeidelSolver")?;
        Ok(Self { configuration })
    }

    /// Replace the convergence tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.configuration = self.configuration.with_tolerance(tolerance);
        self
    }

    /// Replace the iteration cap
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.configuration = self.configuration.with_max_iterations(max_iterations);
        self
    }

    /// Current configuration
    pub fn configuration(&self) -> &SolverConfiguration {
        &self.configuration
    }
}

impl Default for SeidelSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearSolver for SeidelSolver {
    fn solve(&self, system: &LinearSystem) -> SolverResult<LinearSystemSolution> {
        let (tolerance, max_iterations) = self.configuration.iterative_parameters("SeidelSolver")?;

        // ====== Normalization: AᵗA·x = Aᵗb ======

        let transposed = system.coefficients().transposed();
        let a = system.coefficients().multiply_left(&transposed)?;
        let b = system.right_hand_side().multiply_left(&transposed)?;
        let n = system.dimension();

        // singular AᵗA leaves no usable bound
        let smallest = smallest_eigenvalue(&a);
        let error_bound = |x: &Matrix| -> SolverResult<f64> {
            if smallest <= 0.0 {
                return Ok(f64::INFINITY);
            }
            Ok(x.multiply_left(&a)?.subtract(&b)?.vector_norm()? / smallest)
        };

        // ====== Iteration ======

        let mut current = Matrix::new(n, 1);
        let mut bound = f64::INFINITY;

        for iteration in 1..=max_iterations {
            let previous = current.clone();

            for i in 0..n {
                // unknowns before i already hold this sweep's values
                let off_diagonal: f64 = (0..n)
                    .filter(|&j| j != i)
                    .map(|j| a[(i, j)] * current[(j, 0)])
                    .sum();
                current.set(i, 0, (b[(i, 0)] - off_diagonal) / a[(i, i)])?;
            }

            validate_state(current.iter(), METHOD, iteration)?;

            let change = current.subtract(&previous)?.vector_norm()?;
            bound = error_bound(&current)?;
            log::trace!("Seidel iteration {iteration}: step norm {change:e}, error bound {bound:e}");

            if change <= tolerance && bound <= tolerance {
                log::debug!("Seidel converged after {iteration} iterations (error bound {bound:e})");
                return Ok(LinearSystemSolution::UniqueSolution(current));
            }
        }

        log::warn!("Seidel gave up after {max_iterations} iterations (error bound {bound:e})");
        Err(SolverError::NoConvergence { method: METHOD, iterations: max_iterations, residual: bound })
    }

    fn name(&self) -> &str {
        "Gauss-Seidel iteration"
    }
}

/// Smallest eigenvalue of the symmetric matrix `AᵗA`
fn smallest_eigenvalue(normal: &Matrix) -> f64 {
    normal
        .as_dmatrix()
        .symmetric_eigenvalues()
        .iter()
        .fold(f64::INFINITY, |smallest, &value| smallest.min(value))
}

// =================================================================================================
// Tests
// =================================================================================================
