//! Common utilities for integration tests

pub mod systems;
pub mod test_helpers;

// Re-export commonly used items
pub use systems::{exponential_decay, harmonic_oscillator, known_systems, KnownSystem};
pub use test_helpers::{assert_vector_close, relative_error};
