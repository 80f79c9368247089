//! Mutable working buffer for in-place row and column operations
//!
//! Solvers that reduce a matrix step by step (Gauss–Jordan elimination on an
//! augmented matrix, for instance) own a [`WorkingMatrix`]. Keeping these
//! operations off [`Matrix`] means a value handed to a solver can never be
//! half-reduced behind the caller's back.
//!
//! Every operation validates its indices. Division by zero is not trapped:
//! it follows IEEE 754 and yields infinities or NaN.

use std::ops::Index;

use nalgebra::DMatrix;

use crate::algebra::Matrix;
use crate::error::{SolverError, SolverResult};

/// Owned, mutable dense matrix used inside solvers
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingMatrix {
    data: DMatrix<f64>,
}

impl WorkingMatrix {
    /// Number of rows
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns
    pub fn columns(&self) -> usize {
        self.data.ncols()
    }

    /// Read entry (row, column)
    pub fn get(&self, row: usize, column: usize) -> SolverResult<f64> {
        self.check_row(row)?;
        self.check_column(column)?;
        Ok(self.data[(row, column)])
    }

    /// Write entry (row, column)
    pub fn set(&mut self, row: usize, column: usize, value: f64) -> SolverResult<()> {
        self.check_row(row)?;
        self.check_column(column)?;
        self.data[(row, column)] = value;
        Ok(())
    }

    fn check_row(&self, row: usize) -> SolverResult<()> {
        if row >= self.rows() {
            return Err(self.out_of_range(row, 0));
        }
        Ok(())
    }

    fn check_column(&self, column: usize) -> SolverResult<()> {
        if column >= self.columns() {
            return Err(self.out_of_range(0, column));
        }
        Ok(())
    }

    fn out_of_range(&self, row: usize, column: usize) -> SolverError {
        SolverError::IndexOutOfRange {
            row,
            column,
            rows: self.rows(),
            columns: self.columns(),
        }
    }

    // ====================================== Row operations ======================================

    /// `row[target] += coefficient * row[source]`
    pub fn sum_rows(&mut self, target: usize, source: usize, coefficient: f64) -> SolverResult<()> {
        self.check_row(target)?;
        self.check_row(source)?;

        for j in 0..self.columns() {
            let added = coefficient * self.data[(source, j)];
            self.data[(target, j)] += added;
        }
        Ok(())
    }

    /// Exchange two rows; equal indices are a no-op
    pub fn swap_rows(&mut self, first: usize, second: usize) -> SolverResult<()> {
        self.check_row(first)?;
        self.check_row(second)?;

        if first != second {
            self.data.swap_rows(first, second);
        }
        Ok(())
    }

    /// `row[row] *= coefficient`
    pub fn multiply_row(&mut self, row: usize, coefficient: f64) -> SolverResult<()> {
        self.check_row(row)?;
        self.data.row_mut(row).iter_mut().for_each(|x| *x *= coefficient);
        Ok(())
    }

    /// `row[row] /= divisor`
    pub fn divide_row(&mut self, row: usize, divisor: f64) -> SolverResult<()> {
        self.check_row(row)?;
        self.data.row_mut(row).iter_mut().for_each(|x| *x /= divisor);
        Ok(())
    }

    // ==================================== Column operations ====================================

    /// `column[target] += coefficient * column[source]`
    pub fn sum_columns(&mut self, target: usize, source: usize, coefficient: f64) -> SolverResult<()> {
        self.check_column(target)?;
        self.check_column(source)?;

        for i in 0..self.rows() {
            let added = coefficient * self.data[(i, source)];
            self.data[(i, target)] += added;
        }
        Ok(())
    }

    /// Exchange two columns; equal indices are a no-op
    pub fn swap_columns(&mut self, first: usize, second: usize) -> SolverResult<()> {
        self.check_column(first)?;
        self.check_column(second)?;

        if first != second {
            self.data.swap_columns(first, second);
        }
        Ok(())
    }

    /// `column[column] *= coefficient`
    pub fn multiply_column(&mut self, column: usize, coefficient: f64) -> SolverResult<()> {
        self.check_column(column)?;
        self.data.column_mut(column).iter_mut().for_each(|x| *x *= coefficient);
        Ok(())
    }

    /// `column[column] /= divisor`
    pub fn divide_column(&mut self, column: usize, divisor: f64) -> SolverResult<()> {
        self.check_column(column)?;
        self.data.column_mut(column).iter_mut().for_each(|x| *x /= divisor);
        Ok(())
    }

    /// Freeze the buffer back into a value
    pub fn into_matrix(self) -> Matrix {
        Matrix::from(self.data)
    }
}

impl From<Matrix> for WorkingMatrix {
    fn from(matrix: Matrix) -> Self {
        Self { data: matrix.into() }
    }
}

/// Unchecked read access; panics outside the matrix like slice indexing.
impl Index<(usize, usize)> for WorkingMatrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[index]
    }
}
