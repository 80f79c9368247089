//! Problem definitions
//!
//! A problem is the "WHAT to solve", independent of the method:
//!
//! - [`LinearSystem`]: square system `A·x = b`
//! - [`OdeProblem`]: first-order system `dy/dt = f(y, t)` with its initial state
//!
//! Both validate their inputs on construction, so every solver can rely on
//! consistent shapes.

use std::fmt;

use crate::algebra::{Matrix, ScalarFunction};
use crate::error::{SolverError, SolverResult};

// =================================================================================================
// Linear system
// =================================================================================================

/// Square linear system `A·x = b`
///
/// # Examples
///
/// ```rust
/// use numsolve::algebra::Matrix;
/// use numsolve::solver::LinearSystem;
///
/// # fn main() -> Result<(), numsolve::error::SolverError> {
/// let a = Matrix::from_rows(&[vec![2.0, 1.0], vec![1.0, 3.0]])?;
/// let b = Matrix::column_vector(&[3.0, 5.0]);
///
/// let system = LinearSystem::new(a, b)?;
/// assert_eq!(system.dimension(), 2);
///
/// // Non-square systems are rejected
/// let wide = Matrix::new(2, 3);
/// assert!(LinearSystem::new(wide, Matrix::column_vector(&[0.0, 0.0])).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    coefficients: Matrix,
    right_hand_side: Matrix,
}

impl LinearSystem {
    /// Create a system from an n×n coefficient matrix and an n×1 right-hand side
    ///
    /// # Errors
    ///
    /// [`SolverError::Shape`] if `coefficients` is empty or not square, if
    /// `right_hand_side` is not a column vector, or if the row counts differ.
    pub fn new(coefficients: Matrix, right_hand_side: Matrix) -> SolverResult<Self> {
        if !coefficients.is_square() {
            return Err(SolverError::shape(format!(
                "coefficient matrix must be square and non-empty, got {}x{}",
                coefficients.rows(),
                coefficients.columns()
            )));
        }
        if !right_hand_side.is_column_vector() {
            return Err(SolverError::shape(format!(
                "right-hand side must be a column vector, got {}x{}",
                right_hand_side.rows(),
                right_hand_side.columns()
            )));
        }
        if coefficients.rows() != right_hand_side.rows() {
            return Err(SolverError::shape(format!(
                "coefficient matrix has {} rows but right-hand side has {}",
                coefficients.rows(),
                right_hand_side.rows()
            )));
        }

        Ok(Self { coefficients, right_hand_side })
    }

    /// Number of unknowns
    pub fn dimension(&self) -> usize {
        self.coefficients.rows()
    }

    /// Coefficient matrix A
    pub fn coefficients(&self) -> &Matrix {
        &self.coefficients
    }

    /// Right-hand side b
    pub fn right_hand_side(&self) -> &Matrix {
        &self.right_hand_side
    }

    /// Augmented matrix `[A | b]`
    pub fn augmented(&self) -> Matrix {
        let n = self.dimension();
        Matrix::from_fn(n, n + 1, |i, j| {
            if j < n { self.coefficients[(i, j)] } else { self.right_hand_side[(i, 0)] }
        })
    }

    /// Residual `A·x - b`
    pub fn residual(&self, solution: &Matrix) -> SolverResult<Matrix> {
        solution.multiply_left(&self.coefficients)?.subtract(&self.right_hand_side)
    }
}

// =================================================================================================
// ODE problem
// =================================================================================================

/// First-order ODE system `dyᵢ/dt = fᵢ(y₀, …, yₙ₋₁, t)`
///
/// Each right-hand side receives the argument vector `[y₀, …, yₙ₋₁, t]`,
/// time last.
///
/// # Examples
///
/// ```rust
/// use numsolve::algebra::{Matrix, ScalarFunction};
/// use numsolve::solver::OdeProblem;
///
/// # fn main() -> Result<(), numsolve::error::SolverError> {
/// // dy/dt = y
/// let problem = OdeProblem::new(
///     vec![ScalarFunction::new(|args| args[0])],
///     Matrix::column_vector(&[1.0]),
/// )?;
/// assert_eq!(problem.dimension(), 1);
/// # Ok(())
/// # }
/// ```
pub struct OdeProblem {
    functions: Vec<ScalarFunction>,
    initial_state: Matrix,
}

impl OdeProblem {
    /// Create a problem from n right-hand sides and an n×1 initial state
    ///
    /// # Errors
    ///
    /// - [`SolverError::EmptyInput`] if `functions` is empty
    /// - [`SolverError::Validation`] if `initial_state` is not an n×1 column vector
    pub fn new(functions: Vec<ScalarFunction>, initial_state: Matrix) -> SolverResult<Self> {
        if functions.is_empty() {
            return Err(SolverError::EmptyInput { what: "ODE right-hand side functions" });
        }
        if !initial_state.is_column_vector() || initial_state.rows() != functions.len() {
            return Err(SolverError::validation(format!(
                "initial state must be a {}x1 column vector, got {}x{}",
                functions.len(),
                initial_state.rows(),
                initial_state.columns()
            )));
        }

        Ok(Self { functions, initial_state })
    }

    /// Number of state components
    pub fn dimension(&self) -> usize {
        self.functions.len()
    }

    /// Right-hand side functions
    pub fn functions(&self) -> &[ScalarFunction] {
        &self.functions
    }

    /// Initial state y(start_time)
    pub fn initial_state(&self) -> &Matrix {
        &self.initial_state
    }

    /// Evaluate every right-hand side at `(state, time)`
    pub(crate) fn derivatives(&self, state: &[f64], time: f64) -> Vec<f64> {
        let mut arguments = Vec::with_capacity(state.len() + 1);
        arguments.extend_from_slice(state);
        arguments.push(time);

        self.functions.iter().map(|f| f.evaluate(&arguments)).collect()
    }
}

impl fmt::Debug for OdeProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OdeProblem")
            .field("dimension", &self.dimension())
            .field("initial state", &self.initial_state)
            .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================
