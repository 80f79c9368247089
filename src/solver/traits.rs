//! Solver traits and configuration types
//!
//! # Design Philosophy
//!
//! - Central enum `SolverType` defines the kind of numerical method
//! - `SolverConfiguration` wraps it and validates its parameters
//! - `LinearSolver` is the seam through which linear solvers are swapped
//!   (Newton's method takes one as a dependency)

use crate::error::{SolverError, SolverResult};
use crate::solver::{LinearSystem, LinearSystemSolution};

// ============================================================================
// Central Solver Type Enumeration
// ============================================================================

/// Type of numerical method and the parameters it needs
///
/// # Examples
///
/// ```rust
/// use numsolve::solver::SolverType;
///
/// // Convergence loop with a safety cap
/// let solver_type = SolverType::Iterative {
///     tolerance: 1e-6,
///     max_iterations: 100,
/// };
///
/// // Fixed-step integration over [0, 1]
/// let solver_type = SolverType::TimeEvolution {
///     start_time: 0.0,
///     stop_time: 1.0,
///     step: 0.01,
/// };
/// assert_eq!(solver_type.name(), "TimeEvolution");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum SolverType {
    /// Finite sequence of operations (Gauss–Jordan)
    Direct,

    /// Iteration until a convergence measure drops below `tolerance`
    ///
    /// Used by: Seidel, Jacobi rotations, Newton-Raphson
    ///
    /// # Parameters
    /// - `tolerance`: Convergence criterion
    /// - `max_iterations`: Safety limit, exceeding it is an error
    Iterative {
        tolerance: f64,
        max_iterations: usize,
    },

    /// Fixed-step time integration
    ///
    /// Used by: Runge-Kutta 4
    ///
    /// # Parameters
    /// - `start_time`: Time of the initial state
    /// - `stop_time`: End of the integration window (must exceed `start_time`)
    /// - `step`: Step size (positive)
    TimeEvolution {
        start_time: f64,
        stop_time: f64,
        step: f64,
    },
}

impl SolverType {
    /// Get name identifier
    pub fn name(&self) -> &str {
        match self {
            SolverType::Direct => "Direct",
            SolverType::Iterative { .. } => "Iterative",
            SolverType::TimeEvolution { .. } => "TimeEvolution",
        }
    }

    /// Validate that parameters are meaningful
    pub fn validate(&self) -> SolverResult<()> {
        match self {
            SolverType::Direct => Ok(()),
            SolverType::Iterative { tolerance, max_iterations } => {
                if !(*tolerance > 0.0 && tolerance.is_finite()) {
                    return Err(SolverError::validation("Tolerance must be positive and finite"));
                }
                if *max_iterations == 0 {
                    return Err(SolverError::validation("Maximum iterations must be positive"));
                }
                Ok(())
            }
            SolverType::TimeEvolution { start_time, stop_time, step } => {
                if !start_time.is_finite() || !stop_time.is_finite() {
                    return Err(SolverError::validation("Start and stop time must be finite"));
                }
                if stop_time <= start_time {
                    return Err(SolverError::validation(format!(
                        "Stop time {} must be greater than start time {}",
                        stop_time, start_time
                    )));
                }
                if !(*step > 0.0 && step.is_finite()) {
                    return Err(SolverError::validation(format!(
                        "Step must be positive and finite, got {}",
                        step
                    )));
                }
                Ok(())
            }
        }
    }
}

// =================================================================================================
// Solver configuration
// =================================================================================================

/// Configuration for a numerical solver
///
/// # Examples
///
/// ```rust
/// use numsolve::solver::SolverConfiguration;
///
/// let config = SolverConfiguration::iterative(1e-6, 500);
/// assert!(config.validate().is_ok());
///
/// let config = SolverConfiguration::time_evolution(0.0, 1.0, 0.01);
/// assert!(config.validate().is_ok());
///
/// let broken = SolverConfiguration::time_evolution(1.0, 0.0, 0.01);
/// assert!(broken.validate().is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfiguration {
    /// Type of solver and its parameters
    pub solver_type: SolverType,
}

impl SolverConfiguration {
    /// Create a new configuration with a given solver type
    pub fn new(solver_type: SolverType) -> Self {
        Self { solver_type }
    }

    /// Create a direct solver configuration
    pub fn direct() -> Self {
        Self::new(SolverType::Direct)
    }

    /// Create an iterative solver configuration
    pub fn iterative(tolerance: f64, max_iterations: usize) -> Self {
        Self::new(SolverType::Iterative { tolerance, max_iterations })
    }

    /// Create a time integration configuration
    pub fn time_evolution(start_time: f64, stop_time: f64, step: f64) -> Self {
        Self::new(SolverType::TimeEvolution { start_time, stop_time, step })
    }

    /// Validate configuration
    pub fn validate(&self) -> SolverResult<()> {
        self.solver_type.validate()
    }

    /// Replace the tolerance of an iterative configuration
    ///
    /// Other solver types are returned unchanged.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        if let SolverType::Iterative { tolerance: current, .. } = &mut self.solver_type {
            *current = tolerance;
        }
        self
    }

    /// Replace the iteration cap of an iterative configuration
    ///
    /// Other solver types are returned unchanged.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        if let SolverType::Iterative { max_iterations: current, .. } = &mut self.solver_type {
            *current = max_iterations;
        }
        self
    }

    /// `(tolerance, max_iterations)` of a valid iterative configuration
    ///
    /// `method` names the caller in the error message.
    pub(crate) fn iterative_parameters(&self, method: &str) -> SolverResult<(f64, usize)> {
        self.validate()?;
        match self.solver_type {
            SolverType::Iterative { tolerance, max_iterations } => Ok((tolerance, max_iterations)),
            ref other => Err(SolverError::validation(format!(
                "{} only supports Iterative configuration, got {}",
                method,
                other.name()
            ))),
        }
    }
}

// =================================================================================================
// Linear solver trait
// =================================================================================================

/// Common interface of the linear-system solvers
///
/// Implemented by [`GaussSolver`](crate::solver::GaussSolver) and
/// [`SeidelSolver`](crate::solver::SeidelSolver).
/// [`NewtonSolver`](crate::solver::NewtonSolver) takes a boxed
/// `LinearSolver` for its linear steps, so either can be plugged in.
pub trait LinearSolver: Send + Sync {
    /// Solve `A·x = b`
    ///
    /// The system is borrowed and never modified; solvers work on copies.
    fn solve(&self, system: &LinearSystem) -> SolverResult<LinearSystemSolution>;

    /// Human-readable method name
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iterative_validation() {
        assert!(SolverConfiguration::iterative(0.1, 10).validate().is_ok());
        assert!(SolverConfiguration::iterative(0.0, 10).validate().is_err());
        assert!(SolverConfiguration::iterative(-1.0, 10).validate().is_err());
        assert!(SolverConfiguration::iterative(f64::NAN, 10).validate().is_err());
        assert!(SolverConfiguration::iterative(0.1, 0).validate().is_err());
    }

    #[test]
    fn test_time_evolution_validation() {
        assert!(SolverConfiguration::time_evolution(0.0, 1.0, 0.1).validate().is_ok());
        // stop must be after start
        assert!(SolverConfiguration::time_evolution(1.0, 1.0, 0.1).validate().is_err());
        assert!(SolverConfiguration::time_evolution(0.0, 1.0, 0.0).validate().is_err());
        assert!(SolverConfiguration::time_evolution(0.0, 1.0, -0.1).validate().is_err());
        assert!(SolverConfiguration::time_evolution(0.0, f64::INFINITY, 0.1).validate().is_err());
    }

    #[test]
    fn test_direct_always_valid() {
        assert!(SolverConfiguration::direct().validate().is_ok());
        assert_eq!(SolverConfiguration::direct().solver_type.name(), "Direct");
    }

    #[test]
    fn test_builders_only_touch_iterative() {
        let config = SolverConfiguration::iterative(0.1, 10)
            .with_tolerance(1e-8)
            .with_max_iterations(50);
        assert_eq!(config, SolverConfiguration::iterative(1e-8, 50));

        let direct = SolverConfiguration::direct().with_tolerance(1e-8);
        assert_eq!(direct, SolverConfiguration::direct());
    }

    #[test]
    fn test_iterative_parameters_rejects_other_types() {
        let config = SolverConfiguration::time_evolution(0.0, 1.0, 0.1);
        let error = config.iterative_parameters("Seidel").unwrap_err();
        assert!(error.to_string().contains("only supports Iterative"));

        let config = SolverConfiguration::iterative(1e-3, 7);
        assert_eq!(config.iterative_parameters("Seidel").unwrap(), (1e-3, 7));
    }
}
