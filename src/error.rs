//! Error types for matrix operations and solvers
//!
//! Every fallible operation in the crate returns [`SolverResult`]. Errors are
//! raised at entry (shape and parameter validation) or when an iterative
//! method gives up; nothing is retried and no partial result is returned.

use thiserror::Error;

/// Errors raised by matrix operations and numerical solvers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Operand shape is not acceptable for the operation.
    ///
    /// Covers non-square coefficient matrices, row-count disagreement
    /// between a matrix and its right-hand side, and norms requested on
    /// something that is not a column vector.
    #[error("Invalid shape: {reason}")]
    Shape {
        /// Description of the shape problem
        reason: String,
    },

    /// Two matrices cannot be combined because their dimensions disagree.
    #[error("Dimension mismatch in {operation}: left is {left:?}, right is {right:?}")]
    DimensionMismatch {
        /// Name of the operation that failed
        operation: &'static str,
        /// (rows, columns) of the left operand
        left: (usize, usize),
        /// (rows, columns) of the right operand
        right: (usize, usize),
    },

    /// Element access outside of the matrix.
    #[error("Index ({row}, {column}) out of range for a {rows}x{columns} matrix")]
    IndexOutOfRange {
        /// Requested row
        row: usize,
        /// Requested column
        column: usize,
        /// Row count of the matrix
        rows: usize,
        /// Column count of the matrix
        columns: usize,
    },

    /// The eigen-solver received a matrix that is not symmetric.
    #[error("Matrix is not symmetric: entries ({row}, {column}) and ({column}, {row}) differ")]
    NotSymmetric {
        /// Row of the first asymmetric pair found
        row: usize,
        /// Column of the first asymmetric pair found
        column: usize,
    },

    /// A required collection was empty.
    #[error("Empty input: {what}")]
    EmptyInput {
        /// What was empty
        what: &'static str,
    },

    /// A parameter violates its precondition.
    #[error("Validation failed: {reason}")]
    Validation {
        /// Description of the violated precondition
        reason: String,
    },

    /// An iterative method reached its iteration cap.
    #[error("{method} did not converge after {iterations} iterations (residual: {residual})")]
    NoConvergence {
        /// Name of the method
        method: &'static str,
        /// Number of iterations attempted
        iterations: usize,
        /// Convergence measure at the last iteration
        residual: f64,
    },

    /// NaN or infinity appeared in an iterate.
    #[error("{method}: non-finite value detected at step {step}")]
    NumericalInstability {
        /// Name of the method
        method: &'static str,
        /// Iteration or time step at which the value appeared
        step: usize,
    },

    /// The linear step of Newton's method had no solution.
    #[error("Newton iteration {iteration}: Jacobian system has no solution")]
    SingularJacobian {
        /// Newton iteration at which the linear step failed
        iteration: usize,
    },
}

impl SolverError {
    /// Shorthand for [`SolverError::Shape`].
    pub fn shape(reason: impl Into<String>) -> Self {
        Self::Shape { reason: reason.into() }
    }

    /// Shorthand for [`SolverError::Validation`].
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation { reason: reason.into() }
    }
}

/// Result alias used across the crate.
pub type SolverResult<T> = Result<T, SolverError>;
