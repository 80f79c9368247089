//! Runge-Kutta 4 (RK4) time integrator
//!
//! # Mathematical Background
//!
//! The classical fourth-order Runge-Kutta method integrates a first-order
//! system
//!
//! ```text
//! dy/dt = f(y, t)
//! ```
//!
//! with a weighted average of four slope estimates, each scaled by the step h:
//!
//! ```text
//! k₁ = h·f(yₙ, tₙ)
//! k₂ = h·f(yₙ + k₁/2, tₙ + h/2)
//! k₃ = h·f(yₙ + k₂/2, tₙ + h/2)
//! k₄ = h·f(yₙ + k₃, tₙ + h)
//!
//! yₙ₊₁ = yₙ + (k₁ + 2k₂ + 2k₃ + k₄)/6
//! ```
//!
//! # Characteristics
//!
//! - **Order**: Fourth-order accurate (global error ~ O(h⁴))
//! - **Complexity**: 4 evaluations of every right-hand side per step
//! - **Memory**: the whole trajectory is stored, (n+1)·(steps+1) values
//!
//! # Limitations
//!
//! ⚠️ Fixed step size (no error control)
//! ⚠️ Explicit: very stiff systems need tiny steps
//!
//! # Step Count
//!
//! The number of steps is ⌊(stop − start)/h + 1e-9⌋. The small epsilon
//! absorbs rounding when h divides the interval in exact arithmetic
//! (2π / (2π/100) is 99.999… in floating point). When it does not divide,
//! the last stored time falls short of `stop_time`.

use crate::algebra::Matrix;
use crate::error::{SolverError, SolverResult};
use crate::solver::{OdeProblem, SolverConfiguration, SolverType, Trajectory, validate_state};

/// Slack added to (stop − start)/h before flooring
const STEP_COUNT_EPSILON: f64 = 1e-9;

/// Largest number of steps a single integration may take
pub const MAX_TIME_STEPS: usize = 10_000_000;

const METHOD: &str = "RK4";

// =================================================================================================
// RK4 Solver
// =================================================================================================

/// Classical fourth-order Runge-Kutta integrator
///
/// The solver is stateless and can be reused for any number of problems.
///
/// # Example
///
/// ```rust
/// use numsolve::algebra::{Matrix, ScalarFunction};
/// use numsolve::solver::{OdeProblem, RK4Solver, SolverConfiguration};
///
/// # fn main() -> Result<(), numsolve::error::SolverError> {
/// // dy/dt = y, y(0) = 1 → y(1) = e
/// let problem = OdeProblem::new(
///     vec![ScalarFunction::new(|args| args[0])],
///     Matrix::column_vector(&[1.0]),
/// )?;
/// let config = SolverConfiguration::time_evolution(0.0, 1.0, 0.01);
///
/// let trajectory = RK4Solver::new().solve(&problem, &config)?;
///
/// assert_eq!(trajectory.len(), 101);
/// assert!((trajectory.final_state()[(0, 0)] - std::f64::consts::E).abs() < 1e-8);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RK4Solver;

impl RK4Solver {
    /// Create a new RK4 solver
    ///
    /// # Example
    ///
    /// ```rust
    /// use numsolve::solver::RK4Solver;
    ///
    /// let solver = RK4Solver::new();
    /// assert_eq!(solver.name(), "Runge Kutta (RK4)");
    /// ```
    pub fn new() -> Self {
        Self
    }

    pub fn name(&self) -> &'static str {
        "Runge Kutta (RK4)"
    }

    /// Integrate `problem` over the window of a `TimeEvolution` configuration
    ///
    /// Column k of the trajectory holds the state after k steps; its last row
    /// is the time `start + k·h`, computed from the index.
    ///
    /// # Errors
    ///
    /// - [`SolverError::Validation`] for an invalid or non time-evolution configuration,
    ///   or a window needing more than [`MAX_TIME_STEPS`] steps
    /// - [`SolverError::NumericalInstability`] when a state component becomes NaN or infinite
    pub fn solve(&self, problem: &OdeProblem, config: &SolverConfiguration) -> SolverResult<Trajectory> {
        // ====== Step 1: Validation ======

        config.validate()?;

        let (start_time, stop_time, step) = match config.solver_type {
            SolverType::TimeEvolution { start_time, stop_time, step } => (start_time, stop_time, step),
            ref other => {
                return Err(SolverError::validation(format!(
                    "RK4Solver only supports TimeEvolution configuration, got {}",
                    other.name()
                )));
            }
        };

        // ====== Step 2: Setup ======

        let n = problem.dimension();
        let steps = step_count(start_time, stop_time, step)?;

        let entries = (n + 1).checked_mul(steps + 1).ok_or_else(|| {
            SolverError::validation(format!("{n} components over {steps} steps overflow the trajectory"))
        })?;

        let mut data = Matrix::new(n + 1, steps + 1);
        let mut state = problem.initial_state().to_column_vec()?;
        store(&mut data, 0, &state, start_time)?;

        log::debug!("RK4: {n} components, {steps} steps of {step} from t = {start_time} ({entries} stored values)");

        // ====== Step 3: Time Integration ======

        let half = step / 2.0;

        for index in 0..steps {
            // from the index, never accumulated
            let time = start_time + index as f64 * step;

            let k1 = scaled(problem.derivatives(&state, time), step);
            let k2 = scaled(problem.derivatives(&shifted(&state, &k1, 0.5), time + half), step);
            let k3 = scaled(problem.derivatives(&shifted(&state, &k2, 0.5), time + half), step);
            let k4 = scaled(problem.derivatives(&shifted(&state, &k3, 1.0), time + step), step);

            for i in 0..n {
                state[i] += (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]) / 6.0;
            }

            validate_state(&state, METHOD, index + 1)?;
            store(&mut data, index + 1, &state, start_time + (index + 1) as f64 * step)?;

            log::trace!("RK4 step {}: t = {}", index + 1, start_time + (index + 1) as f64 * step);
        }

        // ====== Step 4: Build Result ======

        let mut trajectory = Trajectory::new(data);

        trajectory.add_metadata("solver", "Runge-Kutta 4");
        trajectory.add_metadata("time steps", &steps.to_string());
        trajectory.add_metadata("dt", &step.to_string());
        trajectory.add_metadata("start time", &start_time.to_string());
        trajectory.add_metadata("stop time", &stop_time.to_string());
        trajectory.add_metadata("function evaluations", &(4 * n * steps).to_string());

        Ok(trajectory)
    }
}

/// floor((stop − start)/h + ε), checked against [`MAX_TIME_STEPS`] before the cast
fn step_count(start_time: f64, stop_time: f64, step: f64) -> SolverResult<usize> {
    let steps = ((stop_time - start_time) / step + STEP_COUNT_EPSILON).floor();

    if !(steps <= MAX_TIME_STEPS as f64) {
        return Err(SolverError::validation(format!(
            "Window [{start_time}, {stop_time}] with step {step} needs {steps:e} steps, at most {MAX_TIME_STEPS} allowed"
        )));
    }
    Ok(steps as usize)
}

/// h·v
fn scaled(mut values: Vec<f64>, h: f64) -> Vec<f64> {
    values.iter_mut().for_each(|v| *v *= h);
    values
}

/// y + fraction·k
fn shifted(state: &[f64], slope: &[f64], fraction: f64) -> Vec<f64> {
    state.iter().zip(slope).map(|(y, k)| y + fraction * k).collect()
}

/// Write state and time into column `index`
fn store(data: &mut Matrix, index: usize, state: &[f64], time: f64) -> SolverResult<()> {
    for (i, &value) in state.iter().enumerate() {
        data.set(i, index, value)?;
    }
    data.set(state.len(), index, time)
}

// =================================================================================================
// Tests
// =================================================================================================
