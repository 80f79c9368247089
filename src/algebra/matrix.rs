//! Dense matrix value type
//!
//! [`Matrix`] is the primitive every solver in the crate is built on. It is a
//! rows × columns grid of `f64` stored in a `nalgebra::DMatrix`, with the
//! dimensions fixed at construction.
//!
//! # Value Semantics
//!
//! Arithmetic never mutates its operands: `add`, `subtract`, `negate`,
//! `multiply_left`, `multiply_right` and `transposed` all return new
//! matrices. Operations combining two matrices validate the shapes first
//! and fail with [`SolverError::DimensionMismatch`] instead of producing a
//! partial or empty result.
//!
//! In-place row and column manipulation lives on
//! [`WorkingMatrix`](crate::algebra::WorkingMatrix), the mutable buffer used
//! by solver internals. Convert with [`Matrix::into_working`].
//!
//! # Example
//!
//! ```rust
//! use numsolve::algebra::Matrix;
//!
//! # fn main() -> Result<(), numsolve::error::SolverError> {
//! let a = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]])?;
//! let x = Matrix::column_vector(&[1.0, 1.0]);
//!
//! // A·x
//! let b = x.multiply_left(&a)?;
//! assert_eq!(b.to_column_vec()?, vec![3.0, 7.0]);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::ops::Index;

use nalgebra::DMatrix;

use crate::algebra::WorkingMatrix;
use crate::error::{SolverError, SolverResult};

/// Dense real-valued matrix with fixed dimensions.
///
/// `Clone` produces an independent deep copy of the elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: DMatrix<f64>,
}

impl Matrix {

    // ======================================= constructors =======================================

    /// Create a `rows` × `columns` matrix filled with zeros
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { data: DMatrix::zeros(rows, columns) }
    }

    /// Create a matrix from a list of rows
    ///
    /// All rows must have the same length. An empty list gives a 0×0 matrix.
    ///
    /// # Errors
    ///
    /// [`SolverError::Shape`] if the rows are ragged.
    pub fn from_rows(rows: &[Vec<f64>]) -> SolverResult<Self> {
        let columns = rows.first().map_or(0, Vec::len);

        if let Some(index) = rows.iter().position(|row| row.len() != columns) {
            return Err(SolverError::shape(format!(
                "row {} has {} entries, expected {}",
                index,
                rows[index].len(),
                columns
            )));
        }

        Ok(Self::from_fn(rows.len(), columns, |i, j| rows[i][j]))
    }

    /// Create a matrix from row-major values
    ///
    /// # Errors
    ///
    /// [`SolverError::Shape`] if `values.len() != rows * columns` or the
    /// product overflows.
    pub fn from_row_slice(rows: usize, columns: usize, values: &[f64]) -> SolverResult<Self> {
        if rows.checked_mul(columns) != Some(values.len()) {
            return Err(SolverError::shape(format!(
                "{} values cannot fill a {}x{} matrix",
                values.len(),
                rows,
                columns
            )));
        }

        Ok(Self { data: DMatrix::from_row_slice(rows, columns, values) })
    }

    /// Create a single-column matrix
    pub fn column_vector(values: &[f64]) -> Self {
        Self { data: DMatrix::from_column_slice(values.len(), 1, values) }
    }

    /// Create a matrix whose entry (i, j) is `f(i, j)`
    pub fn from_fn(rows: usize, columns: usize, f: impl FnMut(usize, usize) -> f64) -> Self {
        Self { data: DMatrix::from_fn(rows, columns, f) }
    }

    /// `n` × `n` identity matrix
    pub fn identity(n: usize) -> Self {
        Self { data: DMatrix::identity(n, n) }
    }

    // ========================================== Queries ==========================================

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns
    pub fn columns(&self) -> usize {
        self.data.ncols()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        self.data.shape()
    }

    /// True for a non-empty square matrix
    pub fn is_square(&self) -> bool {
        self.rows() == self.columns() && self.rows() > 0
    }

    /// True when the matrix has exactly one column
    pub fn is_column_vector(&self) -> bool {
        self.columns() == 1
    }

    /// Symmetry check with an absolute per-entry tolerance
    ///
    /// Non-square matrices are never symmetric.
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        self.first_asymmetric_pair(tolerance).is_none() && self.rows() == self.columns()
    }

    /// First (row, column) with `|A[row, column] - A[column, row]| > tolerance`
    ///
    /// Only the upper triangle is scanned, in row-major order.
    pub(crate) fn first_asymmetric_pair(&self, tolerance: f64) -> Option<(usize, usize)> {
        let n = self.rows().min(self.columns());

        (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .find(|&(i, j)| {
                let difference = (self.data[(i, j)] - self.data[(j, i)]).abs();
                difference.is_nan() || difference > tolerance
            })
    }

    /// Borrow the underlying nalgebra storage
    pub fn as_dmatrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// Iterate over all entries in column-major order
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.data.iter()
    }

    // ====================================== Element access ======================================

    fn check_index(&self, row: usize, column: usize) -> SolverResult<()> {
        if row >= self.rows() || column >= self.columns() {
            return Err(SolverError::IndexOutOfRange {
                row,
                column,
                rows: self.rows(),
                columns: self.columns(),
            });
        }
        Ok(())
    }

    /// Read entry (row, column)
    ///
    /// # Errors
    ///
    /// [`SolverError::IndexOutOfRange`] outside the matrix.
    pub fn get(&self, row: usize, column: usize) -> SolverResult<f64> {
        self.check_index(row, column)?;
        Ok(self.data[(row, column)])
    }

    /// Write entry (row, column)
    ///
    /// # Errors
    ///
    /// [`SolverError::IndexOutOfRange`] outside the matrix.
    pub fn set(&mut self, row: usize, column: usize, value: f64) -> SolverResult<()> {
        self.check_index(row, column)?;
        self.data[(row, column)] = value;
        Ok(())
    }

    /// Copy column `column` into a new column vector
    pub fn column(&self, column: usize) -> SolverResult<Matrix> {
        if column >= self.columns() {
            return Err(SolverError::IndexOutOfRange {
                row: 0,
                column,
                rows: self.rows(),
                columns: self.columns(),
            });
        }
        Ok(Self { data: self.data.columns(column, 1).into_owned() })
    }

    /// Entries of a column vector as a `Vec`
    ///
    /// # Errors
    ///
    /// [`SolverError::Shape`] if the matrix has more than one column.
    pub fn to_column_vec(&self) -> SolverResult<Vec<f64>> {
        self.ensure_column_vector("to_column_vec")?;
        Ok(self.data.iter().copied().collect())
    }

    fn ensure_column_vector(&self, operation: &str) -> SolverResult<()> {
        if !self.is_column_vector() {
            return Err(SolverError::shape(format!(
                "{} is only defined for column vectors, got {}x{}",
                operation,
                self.rows(),
                self.columns()
            )));
        }
        Ok(())
    }

    // ======================================== Arithmetic ========================================

    fn ensure_same_shape(&self, other: &Matrix, operation: &'static str) -> SolverResult<()> {
        if self.shape() != other.shape() {
            return Err(SolverError::DimensionMismatch {
                operation,
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(())
    }

    /// Element-wise sum `self + other`
    pub fn add(&self, other: &Matrix) -> SolverResult<Matrix> {
        self.ensure_same_shape(other, "add")?;
        Ok(Self { data: &self.data + &other.data })
    }

    /// Element-wise difference `self - other`
    pub fn subtract(&self, other: &Matrix) -> SolverResult<Matrix> {
        self.ensure_same_shape(other, "subtract")?;
        Ok(Self { data: &self.data - &other.data })
    }

    /// `-self`
    pub fn negate(&self) -> Matrix {
        Self { data: -&self.data }
    }

    /// `k * self`
    pub fn scaled(&self, k: f64) -> Matrix {
        Self { data: &self.data * k }
    }

    /// Product `multiplier · self`
    ///
    /// # Errors
    ///
    /// [`SolverError::DimensionMismatch`] when `multiplier.columns() != self.rows()`.
    pub fn multiply_left(&self, multiplier: &Matrix) -> SolverResult<Matrix> {
        multiplier.product(self, "multiply_left")
    }

    /// Product `self · multiplier`
    ///
    /// # Errors
    ///
    /// [`SolverError::DimensionMismatch`] when `self.columns() != multiplier.rows()`.
    pub fn multiply_right(&self, multiplier: &Matrix) -> SolverResult<Matrix> {
        self.product(multiplier, "multiply_right")
    }

    fn product(&self, right: &Matrix, operation: &'static str) -> SolverResult<Matrix> {
        if self.columns() != right.rows() {
            return Err(SolverError::DimensionMismatch {
                operation,
                left: self.shape(),
                right: right.shape(),
            });
        }
        Ok(Self { data: &self.data * &right.data })
    }

    /// Transposed copy
    pub fn transposed(&self) -> Matrix {
        Self { data: self.data.transpose() }
    }

    /// Euclidean norm of a column vector
    ///
    /// # Errors
    ///
    /// [`SolverError::Shape`] if the matrix has more than one column.
    pub fn vector_norm(&self) -> SolverResult<f64> {
        self.ensure_column_vector("vector_norm")?;
        Ok(self.data.iter().map(|x| x * x).sum::<f64>().sqrt())
    }

    /// Element-wise comparison with an absolute tolerance
    ///
    /// Returns `false` on shape mismatch.
    pub fn equals_precision(&self, other: &Matrix, precision: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).abs() <= precision)
    }

    /// True when every entry is finite
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|x| x.is_finite())
    }

    /// Move into a mutable working buffer
    pub fn into_working(self) -> WorkingMatrix {
        WorkingMatrix::from(self)
    }
}

impl From<DMatrix<f64>> for Matrix {
    fn from(data: DMatrix<f64>) -> Self {
        Self { data }
    }
}

impl From<Matrix> for DMatrix<f64> {
    fn from(matrix: Matrix) -> Self {
        matrix.data
    }
}

/// Unchecked read access; panics outside the matrix like slice indexing.
impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[index]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows() {
            if i > 0 {
                writeln!(f)?;
            }
            for j in 0..self.columns() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.data[(i, j)])?;
            }
        }
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> Matrix {
        Matrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap()
    }

    // ====== Construction ======

    #[test]
    fn test_new_is_zero_filled() {
        let m = Matrix::new(2, 3);
        assert_eq!(m.shape(), (2, 3));
        assert!(m.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let result = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(result, Err(SolverError::Shape { .. })));
    }

    #[test]
    fn test_from_row_slice_layout() {
        let m = Matrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(m[(0, 1)], 2.0);
        assert_eq!(m[(1, 0)], 3.0);
        assert!(Matrix::from_row_slice(2, 2, &[1.0]).is_err());
    }

    #[test]
    fn test_from_row_slice_dimension_overflow() {
        let result = Matrix::from_row_slice(usize::MAX, 2, &[1.0, 2.0]);
        assert!(matches!(result, Err(SolverError::Shape { .. })));
    }

    #[test]
    fn test_identity() {
        let id = Matrix::identity(3);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(id[(i, j)], if i == j { 1.0 } else { 0.0 });
            }
        }
    }

    #[test]
    fn test_clone_is_deep_copy() {
        let original = sample();
        let mut copy = original.clone();
        copy.set(0, 0, 100.0).unwrap();

        assert_eq!(original.get(0, 0).unwrap(), 1.0);
        assert_eq!(copy.get(0, 0).unwrap(), 100.0);
        assert_eq!(copy.shape(), original.shape());
    }

    // ====== Element access ======

    #[test]
    fn test_get_set_bounds_checked() {
        let mut m = sample();
        assert_eq!(m.get(1, 2).unwrap(), 6.0);
        m.set(1, 2, -1.0).unwrap();
        assert_eq!(m.get(1, 2).unwrap(), -1.0);

        assert_eq!(
            m.get(2, 0),
            Err(SolverError::IndexOutOfRange { row: 2, column: 0, rows: 2, columns: 3 })
        );
        assert!(m.set(0, 3, 1.0).is_err());
    }

    #[test]
    fn test_column_extraction() {
        let column = sample().column(1).unwrap();
        assert_eq!(column.to_column_vec().unwrap(), vec![2.0, 5.0]);
        assert!(sample().column(3).is_err());
    }

    // ====== Arithmetic ======

    #[test]
    fn test_add_subtract_negate() {
        let a = sample();
        let b = Matrix::from_fn(2, 3, |_, _| 1.0);

        let sum = a.add(&b).unwrap();
        assert_eq!(sum[(1, 2)], 7.0);

        let difference = a.subtract(&b).unwrap();
        assert_eq!(difference[(0, 0)], 0.0);

        assert_eq!(a.negate()[(1, 1)], -5.0);
        assert_eq!(a.scaled(2.0)[(0, 2)], 6.0);
    }

    #[test]
    fn test_add_dimension_mismatch() {
        let result = sample().add(&Matrix::new(3, 2));
        assert_eq!(
            result,
            Err(SolverError::DimensionMismatch { operation: "add", left: (2, 3), right: (3, 2) })
        );
    }

    #[test]
    fn test_products() {
        let a = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let b = Matrix::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();

        // a·b swaps columns of a
        let right = a.multiply_right(&b).unwrap();
        assert_eq!(right, Matrix::from_rows(&[vec![2.0, 1.0], vec![4.0, 3.0]]).unwrap());

        // b·a swaps rows of a
        let left = a.multiply_left(&b).unwrap();
        assert_eq!(left, Matrix::from_rows(&[vec![3.0, 4.0], vec![1.0, 2.0]]).unwrap());
    }

    #[test]
    fn test_product_inner_dimension_mismatch() {
        let a = sample();
        assert!(matches!(
            a.multiply_right(&Matrix::new(2, 2)),
            Err(SolverError::DimensionMismatch { operation: "multiply_right", .. })
        ));
        assert!(a.multiply_left(&Matrix::new(3, 3)).is_err());
        assert!(a.multiply_left(&Matrix::new(4, 2)).is_ok());
    }

    #[test]
    fn test_transposed() {
        let t = sample().transposed();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t[(2, 1)], 6.0);
    }

    #[test]
    fn test_vector_norm() {
        let v = Matrix::column_vector(&[3.0, 4.0]);
        assert_relative_eq!(v.vector_norm().unwrap(), 5.0);
        assert!(matches!(sample().vector_norm(), Err(SolverError::Shape { .. })));
    }

    // ====== Comparison ======

    #[test]
    fn test_equals_precision() {
        let a = sample();
        let b = a.add(&Matrix::from_fn(2, 3, |_, _| 0.05)).unwrap();

        assert!(a.equals_precision(&b, 0.1));
        assert!(!a.equals_precision(&b, 0.01));
        assert!(!a.equals_precision(&a.transposed(), 10.0));
    }

    #[test]
    fn test_symmetry() {
        let s = Matrix::from_rows(&[vec![2.0, 1.0], vec![1.0, 2.0]]).unwrap();
        assert!(s.is_symmetric(0.0));
        assert!(!sample().is_symmetric(1e-9));

        let a = Matrix::from_rows(&[vec![2.0, 1.0], vec![1.5, 2.0]]).unwrap();
        assert_eq!(a.first_asymmetric_pair(1e-9), Some((0, 1)));
    }

    #[test]
    fn test_display() {
        let m = Matrix::from_rows(&[vec![1.0, 2.5], vec![-3.0, 4.0]]).unwrap();
        assert_eq!(m.to_string(), "1 2.5\n-3 4");
    }
}
