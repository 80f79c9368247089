//! Newton–Raphson method for nonlinear systems F(x) = 0
//!
//! # Mathematical Background
//!
//! Linearizing F around the current iterate gives one linear system per step:
//!
//! ```text
//! J(xₖ)·δ = −F(xₖ)        xₖ₊₁ = xₖ + δ
//! ```
//!
//! `J` is the Jacobian, built from central differences of each component
//! (see [`ScalarFunction::partial_derivative`]). The linear system is handed
//! to a [`LinearSolver`], Gauss–Seidel by default.
//!
//! Iteration stops once ‖F(xₖ₊₁)‖ ≤ tolerance.
//!
//! # Limitations
//!
//! - Purely local: no damping, line search or divergence detection. The
//!   starting point must be close enough to a root
//! - The Jacobian is approximate; for functions of degree ≤ 2 central
//!   differences are exact up to rounding
//! - A singular Jacobian is reported as [`SolverError::SingularJacobian`] by
//!   solvers that detect inconsistency (Gauss). Gauss–Seidel instead fails
//!   with [`SolverError::NumericalInstability`]

use std::fmt;

use crate::algebra::{Matrix, ScalarFunction};
use crate::error::{SolverError, SolverResult};
use crate::solver::{
    DEFAULT_TOLERANCE, LinearSolver, LinearSystem, LinearSystemSolution, RootSolution,
    SeidelSolver, SolverConfiguration, validate_state,
};

/// Default iteration cap for [`NewtonSolver`]
pub const DEFAULT_NEWTON_MAX_ITERATIONS: usize = 100;

/// Tolerance of the default Gauss–Seidel linear solver
pub const DEFAULT_LINEAR_TOLERANCE: f64 = 1e-6;

const METHOD: &str = "Newton";

/// Newton–Raphson solver for a system of n functions in n unknowns
///
/// # Example
///
/// ```rust
/// use numsolve::algebra::{Matrix, ScalarFunction};
/// use numsolve::solver::{GaussSolver, NewtonSolver};
///
/// # fn main() -> Result<(), numsolve::error::SolverError> {
/// // x² − 4 = 0
/// let solver = NewtonSolver::new(vec![ScalarFunction::new(|x| x[0] * x[0] - 4.0)])?
///     .with_linear_solver(Box::new(GaussSolver::new()))
///     .with_tolerance(1e-10);
///
/// let solution = solver.solve(&Matrix::column_vector(&[2.5]))?;
/// assert!((solution.root[(0, 0)] - 2.0).abs() < 1e-9);
/// # Ok(())
/// # }
/// ```
pub struct NewtonSolver {
    functions: Vec<ScalarFunction>,
    configuration: SolverConfiguration,
    linear_solver: Box<dyn LinearSolver>,
}

impl NewtonSolver {
    /// Solver for F = (f₀, …, fₙ₋₁)
    ///
    /// Defaults: tolerance 0.1, 100 iterations, Gauss–Seidel linear steps
    /// with tolerance 1e-6.
    ///
    /// # Errors
    ///
    /// [`SolverError::EmptyInput`] if `functions` is empty.
    pub fn new(functions: Vec<ScalarFunction>) -> SolverResult<Self> {
        if functions.is_empty() {
            return Err(SolverError::EmptyInput { what: "Newton system functions" });
        }

        Ok(Self {
            functions,
            configuration: SolverConfiguration::iterative(
                DEFAULT_TOLERANCE,
                DEFAULT_NEWTON_MAX_ITERATIONS,
            ),
            linear_solver: Box::new(SeidelSolver::new().with_tolerance(DEFAULT_LINEAR_TOLERANCE)),
        })
    }

    /// Replace the solver used for each linear step
    pub fn with_linear_solver(mut self, linear_solver: Box<dyn LinearSolver>) -> Self {
        self.linear_solver = linear_solver;
        self
    }

    /// Replace the iterative configuration
    ///
    /// # Errors
    ///
    /// [`SolverError::Validation`] if the configuration is invalid or not iterative.
    pub fn with_configuration(mut self, configuration: SolverConfiguration) -> SolverResult<Self> {
        configuration.iterative_parameters("NewtonSolver")?;
        self.configuration = configuration;
        Ok(self)
    }

    /// Replace the tolerance on ‖F‖
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.configuration = self.configuration.with_tolerance(tolerance);
        self
    }

    /// Replace the iteration cap
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.configuration = self.configuration.with_max_iterations(max_iterations);
        self
    }

    /// Number of equations (and unknowns)
    pub fn dimension(&self) -> usize {
        self.functions.len()
    }

    pub fn configuration(&self) -> &SolverConfiguration {
        &self.configuration
    }

    /// Name of the injected linear solver
    pub fn linear_solver_name(&self) -> &str {
        self.linear_solver.name()
    }

    pub fn name(&self) -> &str {
        "Newton-Raphson"
    }

    /// Iterate from `start` until ‖F‖ drops below the tolerance
    ///
    /// # Errors
    ///
    /// - [`SolverError::Shape`] if `start` is not an n×1 column vector
    /// - [`SolverError::SingularJacobian`] if a linear step has no solution
    /// - [`SolverError::NoConvergence`] when the iteration cap is reached
    /// - Errors of the linear solver are propagated unchanged
    pub fn solve(&self, start: &Matrix) -> SolverResult<RootSolution> {
        let (tolerance, max_iterations) = self.configuration.iterative_parameters("NewtonSolver")?;

        let n = self.dimension();
        if !start.is_column_vector() || start.rows() != n {
            return Err(SolverError::shape(format!(
                "starting point must be a {}x1 column vector, got {}x{}",
                n,
                start.rows(),
                start.columns()
            )));
        }

        let mut previous = start.clone();
        let mut residual_norm = f64::INFINITY;

        for iteration in 1..=max_iterations {
            let point = previous.to_column_vec()?;

            let jacobian = self.jacobian(&point)?;
            let negated = self.evaluate(&point).negate();
            let system = LinearSystem::new(jacobian, negated)?;

            let step = match self.linear_solver.solve(&system)? {
                LinearSystemSolution::UniqueSolution(step) => step,
                other => {
                    log::debug!("Newton: linear step at iteration {iteration} returned {other}");
                    return Err(SolverError::SingularJacobian { iteration });
                }
            };

            let next = previous.add(&step)?;
            validate_state(next.iter(), METHOD, iteration)?;

            residual_norm = self.evaluate(&next.to_column_vec()?).vector_norm()?;
            log::trace!("Newton iteration {iteration}: |F| = {residual_norm:e}");

            if residual_norm <= tolerance {
                log::debug!("Newton converged after {iteration} iterations (|F| = {residual_norm:e})");
                return Ok(RootSolution { root: next, residual_norm, iterations: iteration });
            }

            previous = next;
        }

        log::warn!("Newton gave up after {max_iterations} iterations (|F| = {residual_norm:e})");
        Err(SolverError::NoConvergence {
            method: METHOD,
            iterations: max_iterations,
            residual: residual_norm,
        })
    }

    /// F(point) as a column vector
    fn evaluate(&self, point: &[f64]) -> Matrix {
        let values: Vec<f64> = self.functions.iter().map(|f| f.evaluate(point)).collect();
        Matrix::column_vector(&values)
    }

    /// J_ij = ∂f_i/∂x_j at `point`
    fn jacobian(&self, point: &[f64]) -> SolverResult<Matrix> {
        let n = self.dimension();
        let mut entries = Vec::with_capacity(n * n);

        for function in &self.functions {
            for variable in 0..n {
                entries.push(function.partial_derivative(point, variable)?);
            }
        }

        Matrix::from_row_slice(n, n, &entries)
    }
}

impl fmt::Debug for NewtonSolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewtonSolver")
            .field("dimension", &self.dimension())
            .field("configuration", &self.configuration)
            .field("linear solver", &self.linear_solver.name())
            .finish()
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::GaussSolver;
    use approx::assert_abs_diff_eq;

    fn square_minus_four() -> Vec<ScalarFunction> {
        vec![ScalarFunction::new(|x| x[0] * x[0] - 4.0)]
    }

    /// x² + y² = 4 and x = y, root (√2, √2)
    fn circle_and_diagonal() -> Vec<ScalarFunction> {
        vec![
            ScalarFunction::new(|x| x[0] * x[0] + x[1] * x[1] - 4.0),
            ScalarFunction::new(|x| x[0] - x[1]),
        ]
    }

    #[test]
    fn test_newton_defaults() {
        let solver = NewtonSolver::new(square_minus_four()).unwrap();
        assert_eq!(solver.name(), "Newton-Raphson");
        assert_eq!(solver.linear_solver_name(), "Gauss-Seidel iteration");
        assert_eq!(solver.configuration(), &SolverConfiguration::iterative(0.1, 100));
        assert_eq!(solver.dimension(), 1);
    }

    #[test]
    fn test_newton_rejects_empty_system() {
        assert!(matches!(NewtonSolver::new(vec![]), Err(SolverError::EmptyInput { .. })));
    }

    #[test]
    fn test_newton_rejects_bad_start() {
        let solver = NewtonSolver::new(circle_and_diagonal()).unwrap();

        let too_short = Matrix::column_vector(&[1.0]);
        assert!(matches!(solver.solve(&too_short), Err(SolverError::Shape { .. })));

        let row = Matrix::from_rows(&[vec![1.0, 1.0]]).unwrap();
        assert!(matches!(solver.solve(&row), Err(SolverError::Shape { .. })));
    }

    #[test]
    fn test_newton_scalar_default_tolerance() {
        // J = 5 at 2.5: 2.5 → 2.05 → 2.0006
        let solver = NewtonSolver::new(square_minus_four()).unwrap();
        let solution = solver.solve(&Matrix::column_vector(&[2.5])).unwrap();

        assert_eq!(solution.iterations, 2);
        assert!(solution.residual_norm <= 0.1);
        assert_abs_diff_eq!(solution.root[(0, 0)], 2.0, epsilon = 1e-2);
    }

    #[test]
    fn test_newton_scalar_tight_tolerance() {
        let solver = NewtonSolver::new(square_minus_four()).unwrap().with_tolerance(1e-10);
        let solution = solver.solve(&Matrix::column_vector(&[2.5])).unwrap();
        assert_abs_diff_eq!(solution.root[(0, 0)], 2.0, epsilon = 1e-9);

        // negative start finds the negative root
        let solution = solver.solve(&Matrix::column_vector(&[-3.0])).unwrap();
        assert_abs_diff_eq!(solution.root[(0, 0)], -2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_newton_two_dimensional_with_seidel() {
        let solver = NewtonSolver::new(circle_and_diagonal()).unwrap().with_tolerance(1e-4);
        let solution = solver.solve(&Matrix::column_vector(&[1.0, 1.5])).unwrap();

        let root = solution.root.to_column_vec().unwrap();
        assert_abs_diff_eq!(root[0], 2f64.sqrt(), epsilon = 1e-3);
        assert_abs_diff_eq!(root[1], 2f64.sqrt(), epsilon = 1e-3);
    }

    #[test]
    fn test_newton_two_dimensional_with_gauss() {
        let solver = NewtonSolver::new(circle_and_diagonal())
            .unwrap()
            .with_linear_solver(Box::new(GaussSolver::new()))
            .with_tolerance(1e-12);
        assert_eq!(solver.linear_solver_name(), "Gauss-Jordan elimination");

        let solution = solver.solve(&Matrix::column_vector(&[1.0, 1.5])).unwrap();
        let root = solution.root.to_column_vec().unwrap();

        assert_abs_diff_eq!(root[0], 2f64.sqrt(), epsilon = 1e-9);
        assert_abs_diff_eq!(root[1], 2f64.sqrt(), epsilon = 1e-9);
        assert!(solution.residual_norm <= 1e-12);
    }

    #[test]
    fn test_newton_singular_jacobian() {
        // x² + 1 has zero slope at the origin
        let solver = NewtonSolver::new(vec![ScalarFunction::new(|x| x[0] * x[0] + 1.0)])
            .unwrap()
            .with_linear_solver(Box::new(GaussSolver::new()));

        let result = solver.solve(&Matrix::column_vector(&[0.0]));
        assert!(matches!(result, Err(SolverError::SingularJacobian { iteration: 1 })));
    }

    #[test]
    fn test_newton_iteration_cap() {
        let solver = NewtonSolver::new(square_minus_four())
            .unwrap()
            .with_tolerance(1e-12)
            .with_max_iterations(1);

        match solver.solve(&Matrix::column_vector(&[2.5])) {
            Err(SolverError::NoConvergence { method, iterations, residual }) => {
                assert_eq!(method, "Newton");
                assert_eq!(iterations, 1);
                // one step lands on 2.05
                assert_abs_diff_eq!(residual, 0.2025, epsilon = 1e-9);
            }
            other => panic!("expected NoConvergence, got {:?}", other),
        }
    }

    #[test]
    fn test_newton_rejects_non_iterative_configuration() {
        let solver = NewtonSolver::new(square_minus_four()).unwrap();
        let result = solver.with_configuration(SolverConfiguration::time_evolution(0.0, 1.0, 0.1));
        assert!(matches!(result, Err(SolverError::Validation { .. })));
    }
}
