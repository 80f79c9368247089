//! Concrete numerical methods
//!
//! # Architecture
//!
//! The abstract interfaces live in `solver::traits`; this module only holds
//! implementations. Adding a method means adding a file here, nothing else
//! changes.
//!
//! # Available Methods
//!
//! ## Linear Systems
//!
//! Both implement [`LinearSolver`](crate::solver::LinearSolver).
//!
//! - **[`GaussSolver`]**: Gauss–Jordan elimination
//!   - Direct: fixed number of operations, O(n³)
//!   - Detects inconsistent systems (`NoSolution`)
//!
//! - **[`SeidelSolver`]**: Gauss–Seidel on AᵗA·x = Aᵗb
//!   - Iterative: tolerance on the step norm, iteration cap
//!   - Converges for any nonsingular A
//!
//! ## Eigenproblems
//!
//! - **[`JacobiSolver`]**: Jacobi rotations for symmetric matrices
//!
//! ## Nonlinear Systems
//!
//! - **[`NewtonSolver`]**: Newton–Raphson with a numeric Jacobian and a
//!   pluggable linear solver
//!
//! ## Explicit Time-Stepping Methods
//!
//! - **[`RK4Solver`]**: Classical fourth-order Runge-Kutta
//!   - Order: Fourth-order O(dt⁴)
//!   - Cost: 4 function evaluations per step
//!
//! # Design Philosophy
//!
//! Each solver is:
//! - **Self-contained**: No shared mutable state
//! - **Stateless between calls**: Can be reused for any number of problems
//! - **Non-destructive**: Inputs are borrowed and never modified

mod gauss;
mod jacobi;
mod newton;
mod rk4;
mod seidel;

// Re-exports for convenience
pub use gauss::{GAUSS_RELATIVE_ZERO, GaussSolver};
pub use jacobi::{DEFAULT_DEGENERATE_GAP, DEFAULT_JACOBI_MAX_ITERATIONS, JacobiSolver, OffDiagonalEntry};
pub use newton::{DEFAULT_LINEAR_TOLERANCE, DEFAULT_NEWTON_MAX_ITERATIONS, NewtonSolver};
pub use rk4::{MAX_TIME_STEPS, RK4Solver};
pub use seidel::{DEFAULT_SEIDEL_MAX_ITERATIONS, SeidelSolver};
