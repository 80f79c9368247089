//! Scalar functions of a coordinate vector
//!
//! [`ScalarFunction`] wraps an arbitrary closure ℝⁿ → ℝ. Newton's method uses
//! its partial derivatives to build Jacobians, and the RK4 integrator uses it
//! for the right-hand sides of dy/dt = f(y, t).
//!
//! # Numerical Differentiation
//!
//! Derivatives are central differences:
//!
//! ```text
//! ∂f/∂xᵢ ≈ (f(x + h·eᵢ) − f(x − h·eᵢ)) / (2h)
//! ```
//!
//! The error is O(h²); for polynomials up to degree 2 the result is exact
//! up to rounding. Accuracy is governed entirely by the step `h`.

use std::fmt;

use crate::error::{SolverError, SolverResult};

/// Default step for central differences
pub const DEFAULT_DERIVATIVE_STEP: f64 = 0.01;

type Expression = dyn Fn(&[f64]) -> f64 + Send + Sync;

/// Function mapping a coordinate vector to a scalar
///
/// # Example
///
/// ```rust
/// use numsolve::algebra::ScalarFunction;
///
/// // f(x, y) = x² + 3y
/// let f = ScalarFunction::new(|x| x[0] * x[0] + 3.0 * x[1]);
///
/// assert_eq!(f.evaluate(&[2.0, 1.0]), 7.0);
///
/// let dfdx = f.partial_derivative(&[2.0, 1.0], 0).unwrap();
/// assert!((dfdx - 4.0).abs() < 1e-9);
/// ```
pub struct ScalarFunction {
    expression: Box<Expression>,
}

impl ScalarFunction {
    /// Wrap a closure
    pub fn new(expression: impl Fn(&[f64]) -> f64 + Send + Sync + 'static) -> Self {
        Self { expression: Box::new(expression) }
    }

    /// f(x)
    pub fn evaluate(&self, coordinates: &[f64]) -> f64 {
        (self.expression)(coordinates)
    }

    /// ∂f/∂x_index at `coordinates` with the default step
    pub fn partial_derivative(&self, coordinates: &[f64], index: usize) -> SolverResult<f64> {
        self.partial_derivative_with_step(coordinates, index, DEFAULT_DERIVATIVE_STEP)
    }

    /// ∂f/∂x_index at `coordinates` by central difference with step `step`
    ///
    /// # Errors
    ///
    /// [`SolverError::Validation`] if `index` is outside `coordinates` or
    /// `step` is not a positive finite number.
    pub fn partial_derivative_with_step(
        &self,
        coordinates: &[f64],
        index: usize,
        step: f64,
    ) -> SolverResult<f64> {
        if index >= coordinates.len() {
            return Err(SolverError::validation(format!(
                "variable index {} out of range for {} coordinates",
                index,
                coordinates.len()
            )));
        }
        if !(step > 0.0 && step.is_finite()) {
            return Err(SolverError::validation(format!(
                "derivative step must be positive and finite, got {}",
                step
            )));
        }

        let mut forward = coordinates.to_vec();
        let mut backward = coordinates.to_vec();
        forward[index] += step;
        backward[index] -= step;

        Ok((self.evaluate(&forward) - self.evaluate(&backward)) / (2.0 * step))
    }
}

impl fmt::Debug for ScalarFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarFunction").finish_non_exhaustive()
    }
}
