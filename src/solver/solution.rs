//! Solution containers returned by the solvers
//!
//! A solver either returns one of these fully formed or fails with a
//! [`SolverError`](crate::error::SolverError); there are no partial results.

use std::collections::HashMap;
use std::fmt;

use crate::algebra::Matrix;
use crate::error::{SolverError, SolverResult};

// =================================================================================================
// Linear systems
// =================================================================================================

/// Outcome of solving a linear system
#[derive(Debug, Clone, PartialEq)]
pub enum LinearSystemSolution {
    /// The system is inconsistent
    NoSolution,

    /// Exactly one solution, as an n×1 column vector
    UniqueSolution(Matrix),

    /// Infinitely many solutions
    ///
    /// Placeholder only: no solver in this crate detects this case.
    InfiniteSolutions,
}

impl LinearSystemSolution {
    /// The solution vector, if unique
    pub fn unique_solution(&self) -> Option<&Matrix> {
        match self {
            Self::UniqueSolution(solution) => Some(solution),
            _ => None,
        }
    }

    /// Consume into the solution vector, if unique
    pub fn into_unique_solution(self) -> Option<Matrix> {
        match self {
            Self::UniqueSolution(solution) => Some(solution),
            _ => None,
        }
    }

    /// True for [`LinearSystemSolution::UniqueSolution`]
    pub fn is_unique(&self) -> bool {
        matches!(self, Self::UniqueSolution(_))
    }

    /// Same variant and, for unique solutions, entries within `precision`
    pub fn equals_precision(&self, other: &LinearSystemSolution, precision: f64) -> bool {
        match (self, other) {
            (Self::UniqueSolution(a), Self::UniqueSolution(b)) => a.equals_precision(b, precision),
            (Self::NoSolution, Self::NoSolution) => true,
            (Self::InfiniteSolutions, Self::InfiniteSolutions) => true,
            _ => false,
        }
    }
}

impl fmt::Display for LinearSystemSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSolution => write!(f, "The system has no solution"),
            Self::UniqueSolution(solution) => {
                write!(f, "The system has a unique solution:\n{}", solution)
            }
            Self::InfiniteSolutions => write!(f, "The system has infinitely many solutions"),
        }
    }
}

// =================================================================================================
// Eigen decomposition
// =================================================================================================

/// Eigenvalues and eigenvectors of a symmetric matrix
///
/// `eigenvectors()[i]` belongs to `eigenvalues()[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenSolution {
    eigenvectors: Vec<Matrix>,
    eigenvalues: Matrix,
    last_iteration: Matrix,
    rotations: usize,
}

impl EigenSolution {
    pub(crate) fn new(
        eigenvectors: Vec<Matrix>,
        eigenvalues: Matrix,
        last_iteration: Matrix,
        rotations: usize,
    ) -> Self {
        Self { eigenvectors, eigenvalues, last_iteration, rotations }
    }

    /// Eigenvectors as column vectors, ordered like the eigenvalues
    pub fn eigenvectors(&self) -> &[Matrix] {
        &self.eigenvectors
    }

    /// Eigenvalues as an n×1 column vector
    pub fn eigenvalues(&self) -> &Matrix {
        &self.eigenvalues
    }

    /// The near-diagonal matrix left after the last rotation
    pub fn last_iteration_matrix(&self) -> &Matrix {
        &self.last_iteration
    }

    /// Number of rotations performed
    pub fn rotations(&self) -> usize {
        self.rotations
    }

    /// (eigenvalue, eigenvector) pairs
    pub fn pairs(&self) -> impl Iterator<Item = (f64, &Matrix)> {
        self.eigenvalues.iter().copied().zip(self.eigenvectors.iter())
    }
}

// =================================================================================================
// Nonlinear systems
// =================================================================================================

/// Root found by Newton's method
#[derive(Debug, Clone, PartialEq)]
pub struct RootSolution {
    /// Final iterate as an n×1 column vector
    pub root: Matrix,

    /// ‖F(root)‖
    pub residual_norm: f64,

    /// Number of Newton iterations performed
    pub iterations: usize,
}

// =================================================================================================
// Time integration
// =================================================================================================

/// Trajectory of an integrated ODE system
///
/// Stored as an (n+1) × (steps+1) matrix: rows `0..n` are the state
/// components, row `n` is time. Column 0 is the initial state.
#[derive(Debug, Clone)]
pub struct Trajectory {
    data: Matrix,

    /// Additional information about the run (solver, step size, ...)
    pub metadata: HashMap<String, String>,
}

impl Trajectory {
    pub(crate) fn new(data: Matrix) -> Self {
        Self { data, metadata: HashMap::new() }
    }

    /// Add a metadata entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// The full (n+1) × (steps+1) matrix
    pub fn as_matrix(&self) -> &Matrix {
        &self.data
    }

    /// Number of stored points (initial state included)
    pub fn len(&self) -> usize {
        self.data.columns()
    }

    /// True when no point is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimension n of the state
    pub fn dimension(&self) -> usize {
        self.data.rows() - 1
    }

    /// Time of every stored point
    pub fn time_points(&self) -> Vec<f64> {
        let time_row = self.dimension();
        (0..self.len()).map(|k| self.data[(time_row, k)]).collect()
    }

    /// State after `index` steps, as a column vector
    pub fn state(&self, index: usize) -> SolverResult<Matrix> {
        if index >= self.len() {
            return Err(SolverError::IndexOutOfRange {
                row: 0,
                column: index,
                rows: self.data.rows(),
                columns: self.len(),
            });
        }
        let n = self.dimension();
        Ok(Matrix::from_fn(n, 1, |i, _| self.data[(i, index)]))
    }

    /// Final state, as a column vector
    pub fn final_state(&self) -> Matrix {
        let n = self.dimension();
        let last = self.len() - 1;
        Matrix::from_fn(n, 1, |i, _| self.data[(i, last)])
    }

    /// Time of the final state
    pub fn final_time(&self) -> f64 {
        self.data[(self.dimension(), self.len() - 1)]
    }
}
