//! numsolve: dense matrices and classic numerical solvers
//!
//! A small numerical-methods engine built around a dense `f64` matrix:
//! linear systems (Gauss–Jordan, Gauss–Seidel), symmetric eigenproblems
//! (Jacobi rotations), nonlinear systems (Newton–Raphson) and ODE
//! integration (Runge-Kutta 4).
//!
//! # Architecture
//!
//! numsolve is built on two core principles:
//!
//! 1. **Separation of Objects and Methods**
//!    - The algebra layer defines the objects (matrices, scalar functions)
//!    - Solvers provide the methods and never mutate their inputs
//!
//! 2. **Explicit Errors**
//!    - Shapes and parameters are validated at entry
//!    - Iterative methods carry a cap and fail with `NoConvergence`
//!    - Every fallible call returns [`error::SolverResult`]
//!
//! # Quick Start
//!
//! ```rust
//! use numsolve::prelude::*;
//!
//! # fn main() -> Result<(), SolverError> {
//! // 1. Linear system
//! let a = Matrix::from_rows(&[vec![2.0, 1.0], vec![1.0, 3.0]])?;
//! let b = Matrix::column_vector(&[3.0, 5.0]);
//! let x = GaussSolver::new().solve(&LinearSystem::new(a, b)?)?;
//! assert!(x.is_unique());
//!
//! // 2. ODE: dy/dt = -y
//! let problem = OdeProblem::new(
//!     vec![ScalarFunction::new(|args| -args[0])],
//!     Matrix::column_vector(&[1.0]),
//! )?;
//! let config = SolverConfiguration::time_evolution(0.0, 1.0, 0.1);
//! let trajectory = RK4Solver::new().solve(&problem, &config)?;
//!
//! println!("Trajectory length: {}", trajectory.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Logging
//!
//! Solvers report through the [`log`] facade: convergence summaries at
//! `debug`, per-iteration progress at `trace`, and iteration caps or
//! non-finite values at `warn`. Install any logger to see them.
//!
//! # Modules
//!
//! - [`algebra`]: Matrix, working buffer, scalar functions
//! - [`solver`]: Numerical solvers (methods)
//! - [`error`]: Error type shared by the whole crate

// Core modules
pub mod algebra;
pub mod error;
pub mod solver;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //!
    //! use numsolve::prelude::*;
    //! ```
    pub use crate::algebra::{Matrix, ScalarFunction};
    pub use crate::error::{SolverError, SolverResult};
    pub use crate::solver::{
        EigenSolution, GaussSolver, JacobiSolver, LinearSolver, LinearSystem,
        LinearSystemSolution, NewtonSolver, OdeProblem, RK4Solver, RootSolution, SeidelSolver,
        SolverConfiguration, SolverType, Trajectory,
    };
}
