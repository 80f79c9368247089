//! Problems with known solutions
//!
//! Linear systems are built from a chosen solution (b = A·x), ODE problems
//! have closed-form trajectories.

use numsolve::algebra::{Matrix, ScalarFunction};
use numsolve::solver::{LinearSystem, OdeProblem};

// =================================================================================================
// Linear systems
// =================================================================================================

/// Integer linear system together with its exact solution
pub struct KnownSystem {
    pub name: &'static str,
    pub system: LinearSystem,
    pub solution: Vec<f64>,
}

impl KnownSystem {
    /// Build `A·x = b` from `A` and the wanted `x`
    pub fn new(name: &'static str, rows: &[Vec<f64>], solution: &[f64]) -> Self {
        let a = Matrix::from_rows(rows).unwrap();
        let b = Matrix::column_vector(solution).multiply_left(&a).unwrap();

        Self {
            name,
            system: LinearSystem::new(a, b).unwrap(),
            solution: solution.to_vec(),
        }
    }
}

/// Nonsingular integer systems of increasing size
pub fn known_systems() -> Vec<KnownSystem> {
    vec![
        KnownSystem::new("single", &[vec![-3.0]], &[2.0]),
        KnownSystem::new("non-symmetric 2x2", &[vec![1.0, 2.0], vec![3.0, 4.0]], &[-1.0, 1.0]),
        KnownSystem::new(
            "tridiagonal 3x3",
            &[vec![4.0, 1.0, 0.0], vec![1.0, 4.0, 1.0], vec![0.0, 1.0, 4.0]],
            &[1.0, 2.0, 3.0],
        ),
        KnownSystem::new(
            "zero leading pivot",
            &[vec![0.0, 2.0, 1.0], vec![1.0, 1.0, 0.0], vec![2.0, 0.0, 3.0]],
            &[3.0, -1.0, 2.0],
        ),
        KnownSystem::new(
            "discrete laplacian 4x4",
            &[
                vec![2.0, -1.0, 0.0, 0.0],
                vec![-1.0, 2.0, -1.0, 0.0],
                vec![0.0, -1.0, 2.0, -1.0],
                vec![0.0, 0.0, -1.0, 2.0],
            ],
            &[1.0, -1.0, 2.0, 0.0],
        ),
    ]
}

// =================================================================================================
// ODE problems
// =================================================================================================

/// dy/dt = -k·y, y(0) = 1 → y(t) = exp(-k·t)
pub fn exponential_decay(rate: f64) -> OdeProblem {
    OdeProblem::new(
        vec![ScalarFunction::new(move |args| -rate * args[0])],
        Matrix::column_vector(&[1.0]),
    )
    .unwrap()
}

/// y'' = -ω²·y, y(0) = 1, y'(0) = 0 → y(t) = cos(ωt), y'(t) = -ω·sin(ωt)
pub fn harmonic_oscillator(omega: f64) -> OdeProblem {
    OdeProblem::new(
        vec![
            ScalarFunction::new(|args| args[1]),
            ScalarFunction::new(move |args| -omega * omega * args[0]),
        ],
        Matrix::column_vector(&[1.0, 0.0]),
    )
    .unwrap()
}
