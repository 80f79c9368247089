//! Numerical solvers
//!
//! This module provides the solver configuration, the problem definitions and
//! the concrete numerical methods.
//!
//! # Core Concepts
//!
//! ## The Architecture (WHAT vs HOW)
//!
//! 1. **Problem** (`LinearSystem`, `OdeProblem`, a `Matrix`, a set of
//!    `ScalarFunction`s) - WHAT to solve
//!    - Validated on construction
//!
//! 2. **Configuration** (`SolverConfiguration`) - HOW to solve
//!    - Solver type (direct, iterative, time evolution)
//!    - Numerical parameters (tolerance, iteration cap, time window and step)
//!
//! 3. **Solver** - The numerical method
//!    - Applies the numerical scheme to a borrowed problem
//!    - Returns a solution value, never mutates its input
//!
//! # Module Organization
//!
//! - **`traits`**: `SolverType`, `SolverConfiguration`, `LinearSolver`
//! - **`system`**: `LinearSystem`, `OdeProblem`
//! - **`solution`**: `LinearSystemSolution`, `EigenSolution`, `RootSolution`, `Trajectory`
//! - **Solver implementations**:
//!   - `GaussSolver`: Gauss–Jordan elimination (direct)
//!   - `SeidelSolver`: Gauss–Seidel on the normal equations (iterative)
//!   - `JacobiSolver`: Jacobi rotations for symmetric eigenproblems
//!   - `NewtonSolver`: Newton–Raphson for nonlinear systems
//!   - `RK4Solver`: 4 Steps Runge Kutta method
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────────┐
//! │ Problem         │     │ Solver Configuration │ ← HOW to solve
//! │ (validated)     │     │ (type + parameters)  │
//! └────────┬────────┘     └──────────┬───────────┘
//!          │                         │
//!          └───────────┬─────────────┘
//!                      │
//!             ┌────────▼────────┐
//!             │ Numerical Solver│ ← The method
//!             │ (Gauss, RK4...) │
//!             └────────┬────────┘
//!                      │
//!             ┌────────▼────────────┐
//!             │ Solution            │ ← The result
//!             │ (value + metadata)  │
//!             └─────────────────────┘
//! ```
//!
//! # Quick Start Example
//!
//! ```rust
//! use numsolve::algebra::Matrix;
//! use numsolve::solver::{GaussSolver, LinearSolver, LinearSystem, SeidelSolver};
//!
//! # fn main() -> Result<(), numsolve::error::SolverError> {
//! let a = Matrix::from_rows(&[vec![3.0, 1.0], vec![1.0, 2.0]])?;
//! let b = Matrix::column_vector(&[9.0, 8.0]);
//! let system = LinearSystem::new(a, b)?;
//!
//! // Both solvers share the LinearSolver interface
//! let solvers: Vec<Box<dyn LinearSolver>> = vec![
//!     Box::new(GaussSolver::new()),
//!     Box::new(SeidelSolver::new().with_tolerance(1e-10)),
//! ];
//!
//! for solver in &solvers {
//!     let solution = solver.solve(&system)?;
//!     let expected = Matrix::column_vector(&[2.0, 3.0]);
//!     assert!(solution.unique_solution().unwrap().equals_precision(&expected, 1e-6));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All solver methods return [`SolverResult`](crate::error::SolverResult).
//! Common errors:
//! - Invalid configuration (non-positive tolerance, stop before start)
//! - Invalid problem shape (non-square matrix, wrong start vector)
//! - Numerical instability (NaN or infinite values)
//! - Convergence failure (iteration cap exceeded)

// =================================================================================================
// Module Declarations
// =================================================================================================
mod methods;
mod solution;
mod system;
mod traits;

pub use methods::*;
pub use solution::{EigenSolution, LinearSystemSolution, RootSolution, Trajectory};
pub use system::{LinearSystem, OdeProblem};
pub use traits::{LinearSolver, SolverConfiguration, SolverType};

use crate::error::{SolverError, SolverResult};

/// Default convergence tolerance of the iterative solvers
pub const DEFAULT_TOLERANCE: f64 = 0.1;

// =================================================================================================
// State validation
// =================================================================================================

/// Check that every component of an iterate is finite
///
/// NaN arises from 0/0 or ∞ − ∞, infinity from overflow or division by
/// zero. Either one means the method has diverged and later iterations
/// would only propagate it.
///
/// # Example
///
/// ```rust,ignore
/// validate_state(&state, "RK4", 42)?;  // Validates state at step 42
/// ```
pub(crate) fn validate_state<'a>(
    state: impl IntoIterator<Item = &'a f64>,
    method: &'static str,
    step: usize,
) -> SolverResult<()> {
    if let Some(value) = state.into_iter().find(|x| !x.is_finite()) {
        let kind = if value.is_nan() { "NaN" } else { "Inf" };
        log::warn!("{method}: {kind} detected at step {step}");
        return Err(SolverError::NumericalInstability { method, step });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_state_accepts_finite() {
        assert!(validate_state(&[1.0, -2.0, 0.0], "test", 1).is_ok());
        assert!(validate_state(Vec::<f64>::new().iter(), "test", 1).is_ok());
    }

    #[test]
    fn test_validate_state_rejects_nan_and_inf() {
        assert_eq!(
            validate_state(&[1.0, f64::NAN], "test", 7),
            Err(SolverError::NumericalInstability { method: "test", step: 7 })
        );
        assert!(validate_state(&[f64::NEG_INFINITY], "test", 1).is_err());
    }
}
