//! Algebraic building blocks
//!
//! This module provides the primitives every solver consumes:
//!
//! - **[`Matrix`]**: dense `f64` value type (arithmetic returns new matrices)
//! - **[`WorkingMatrix`]**: mutable buffer with in-place row/column operations
//! - **[`ScalarFunction`]**: ℝⁿ → ℝ closure with numeric partial derivatives
//!
//! # Architecture
//!
//! Algebra is **separate from the solvers**:
//! - The algebra layer provides the objects (matrices, functions)
//! - The solver layer provides the methods (Gauss, Seidel, Jacobi, Newton, RK4)
//!
//! # Example
//!
//! ```rust
//! use numsolve::algebra::{Matrix, ScalarFunction};
//!
//! # fn main() -> Result<(), numsolve::error::SolverError> {
//! let a = Matrix::identity(2);
//! let doubled = a.add(&a)?;
//! assert_eq!(doubled.get(1, 1)?, 2.0);
//!
//! let f = ScalarFunction::new(|x| x[0] * x[0]);
//! assert!((f.partial_derivative(&[3.0], 0)? - 6.0).abs() < 1e-9);
//! # Ok(())
//! # }
//! ```

pub mod function;
pub mod matrix;
pub mod working;

pub use function::{DEFAULT_DERIVATIVE_STEP, ScalarFunction};
pub use matrix::Matrix;
pub use working::WorkingMatrix;
