//! Helper functions for integration tests

use numsolve::algebra::Matrix;

/// Assert that a column vector is close to the expected values (within tolerance)
pub fn assert_vector_close(actual: &Matrix, expected: &[f64], tolerance: f64, message: &str) {
    let values = actual.to_column_vec().unwrap();
    assert_eq!(values.len(), expected.len(), "{}: Dimension mismatch", message);

    for (i, (&v1, &v2)) in values.iter().zip(expected.iter()).enumerate() {
        let diff = (v1 - v2).abs();
        assert!(
            diff < tolerance,
            "{}: Element {} differs by {} (tolerance {})",
            message,
            i,
            diff,
            tolerance
        );
    }
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}
