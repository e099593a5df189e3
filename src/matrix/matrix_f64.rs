use crate::error::MatrixError;
use crate::matrix::matrix::Matrix;
use itertools::Itertools;
use pyo3::prelude::*;
use pyo3::types::PyType;
use std::fmt;
use std::ops;
use std::ops::Add;
use std::ops::Mul;

/// Dense square matrix of `f64` values, row-major in a flat buffer.
///
/// All public row/column indices are 1-based. Eigenvalues and
/// eigenvectors are cached once computed; any in-place mutation
/// (`set`, the row operations, `reduce_to_echelon_form`, `reset`)
/// clears both caches. `clone`/`copy` duplicate the cells and any
/// cached eigen-decomposition.
#[derive(Debug, Clone)]
#[pyclass]
pub struct MatrixF64 {
    size: usize,
    cells: Vec<f64>,
    eigenvalues: Option<Vec<f64>>,
    eigenvectors: Option<Vec<Vec<f64>>>,
}

#[pymethods]
impl MatrixF64 {
    #[classmethod]
    pub fn from_list(_cls: &Bound<PyType>, lines: Vec<Vec<f64>>) -> PyResult<Self> {
        Ok(Matrix::from_rows(lines.len(), lines)?)
    }

    #[classmethod]
    pub fn from_flat(_cls: &Bound<PyType>, size: usize, values: Vec<f64>) -> PyResult<Self> {
        Ok(Matrix::from_flat(size, values)?)
    }

    pub fn to_list(&self) -> Vec<Vec<f64>> {
        Matrix::to_list(self)
    }

    pub fn get(&self, row: usize, col: usize) -> PyResult<f64> {
        Ok(Matrix::get(self, row, col)?)
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> PyResult<()> {
        Ok(Matrix::set(self, row, col, value)?)
    }

    pub fn copy(&self) -> Self {
        self.clone()
    }

    pub fn reset(&mut self) {
        Matrix::reset(self)
    }

    pub fn multiply_row_by_constant(&mut self, row: usize, constant: f64) -> PyResult<()> {
        Ok(Matrix::multiply_row_by_constant(self, row, constant)?)
    }

    pub fn swap_rows(&mut self, row1: usize, row2: usize) -> PyResult<()> {
        Ok(Matrix::swap_rows(self, row1, row2)?)
    }

    pub fn add_row_multiple(&mut self, row1: usize, row2: usize, constant: f64) -> PyResult<()> {
        Ok(Matrix::add_row_multiple(self, row1, row2, constant)?)
    }

    pub fn reduce_to_echelon_form(&mut self) -> PyResult<()> {
        Ok(Matrix::reduce_to_echelon_form(self)?)
    }

    pub fn lu_decomposition(&self) -> PyResult<(MatrixF64, MatrixF64)> {
        Ok(Matrix::lu_decomposition(self)?)
    }

    pub fn compute_eigenvalues(&mut self) -> PyResult<()> {
        Ok(Matrix::compute_eigenvalues(self)?)
    }

    pub fn compute_eigenvectors(&mut self) -> PyResult<()> {
        Ok(Matrix::compute_eigenvectors(self)?)
    }

    pub fn __add__(&self, rhs: &MatrixF64) -> PyResult<MatrixF64> {
        Ok(self.add(rhs)?)
    }

    pub fn __mul__(&self, rhs: &MatrixF64) -> PyResult<MatrixF64> {
        Ok(self.mul(rhs)?)
    }

    pub fn __str__(&self) -> String {
        self.to_string()
    }

    #[getter]
    pub fn T(&self) -> MatrixF64 {
        Matrix::transpose(self)
    }

    #[getter]
    pub fn size(&self) -> usize {
        self.size
    }

    #[getter]
    pub fn eigenvalues(&self) -> Option<Vec<f64>> {
        self.eigenvalues.clone()
    }

    #[getter]
    pub fn eigenvectors(&self) -> Option<Vec<Vec<f64>>> {
        self.eigenvectors.clone()
    }
}

impl Matrix<f64> for MatrixF64 {
    fn from_rows(size: usize, rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        if rows.len() != size || rows.iter().any(|row| row.len() != size) {
            return Err(MatrixError::InvalidDimension {
                expected: size * size,
                got: rows.iter().map(|row| row.len()).sum(),
            });
        }

        Ok(MatrixF64 {
            size,
            cells: rows.into_iter().flatten().collect(),
            eigenvalues: None,
            eigenvectors: None,
        })
    }

    fn from_flat(size: usize, values: Vec<f64>) -> Result<Self, MatrixError> {
        if values.len() != size * size {
            return Err(MatrixError::InvalidDimension {
                expected: size * size,
                got: values.len(),
            });
        }

        Ok(MatrixF64 {
            size,
            cells: values,
            eigenvalues: None,
            eigenvectors: None,
        })
    }

    fn to_list(&self) -> Vec<Vec<f64>> {
        if self.size == 0 {
            return Vec::new();
        }
        self.cells
            .chunks(self.size)
            .map(|line| line.into())
            .collect()
    }

    fn identity(n: usize) -> MatrixF64 {
        MatrixF64 {
            size: n,
            cells: (0..n)
                .flat_map(|i| (0..n).map(move |j| if i == j { 1.0 } else { 0.0 }))
                .collect(),
            eigenvalues: None,
            eigenvectors: None,
        }
    }

    fn transpose(&self) -> MatrixF64 {
        MatrixF64 {
            size: self.size,
            cells: (0..self.size)
                .flat_map(|c| (0..self.size).map(move |r| self.at(r, c)))
                .collect(),
            eigenvalues: None,
            eigenvectors: None,
        }
    }

    fn get(&self, row: usize, col: usize) -> Result<f64, MatrixError> {
        self.check_index(row, col)?;
        Ok(self.at(row - 1, col - 1))
    }

    fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), MatrixError> {
        self.check_index(row, col)?;
        let idx = (row - 1) * self.size + (col - 1);
        self.cells[idx] = value;
        self.invalidate_eigen();
        Ok(())
    }

    fn multiply_row_by_constant(&mut self, row: usize, constant: f64) -> Result<(), MatrixError> {
        let row = self.check_row(row)?;
        for cc in 0..self.size {
            self.cells[row * self.size + cc] *= constant;
        }
        self.invalidate_eigen();
        Ok(())
    }

    fn swap_rows(&mut self, row1: usize, row2: usize) -> Result<(), MatrixError> {
        let row1 = self.check_row(row1)?;
        let row2 = self.check_row(row2)?;
        for cc in 0..self.size {
            self.cells.swap(row1 * self.size + cc, row2 * self.size + cc);
        }
        self.invalidate_eigen();
        Ok(())
    }

    fn add_row_multiple(
        &mut self,
        row1: usize,
        row2: usize,
        constant: f64,
    ) -> Result<(), MatrixError> {
        let row1 = self.check_row(row1)?;
        let row2 = self.check_row(row2)?;
        for cc in 0..self.size {
            let delta = constant * self.cells[row2 * self.size + cc];
            self.cells[row1 * self.size + cc] += delta;
        }
        self.invalidate_eigen();
        Ok(())
    }

    fn reduce_to_echelon_form(&mut self) -> Result<(), MatrixError> {
        // Eliminate on a scratch copy so a zero pivot discards the
        // partial reduction instead of leaving it behind.
        let mut reduced = self.clone();

        for r1 in 0..reduced.size {
            let pivot = reduced.at(r1, r1);
            if pivot == 0.0 {
                return Err(MatrixError::SingularPivot { column: r1 + 1 });
            }
            for r2 in r1 + 1..reduced.size {
                let factor = reduced.at(r2, r1) / pivot;
                Matrix::add_row_multiple(&mut reduced, r2 + 1, r1 + 1, -factor)?;
            }
        }

        self.cells = reduced.cells;
        self.invalidate_eigen();
        Ok(())
    }

    fn lu_decomposition(&self) -> Result<(MatrixF64, MatrixF64), MatrixError> {
        let mut ll = MatrixF64::identity(self.size);
        let mut uu = self.clone();
        uu.invalidate_eigen();

        for r1 in 0..uu.size {
            let pivot = uu.at(r1, r1);
            if pivot == 0.0 {
                return Err(MatrixError::SingularPivot { column: r1 + 1 });
            }
            for r2 in r1 + 1..uu.size {
                let factor = uu.at(r2, r1) / pivot;
                Matrix::set(&mut ll, r2 + 1, r1 + 1, factor)?;
                Matrix::add_row_multiple(&mut uu, r2 + 1, r1 + 1, -factor)?;
            }
        }

        Ok((ll, uu))
    }

    fn compute_eigenvalues(&mut self) -> Result<(), MatrixError> {
        if self.size != 2 {
            return Err(MatrixError::UnsupportedDimension { size: self.size });
        }

        let trace = self.at(0, 0) + self.at(1, 1);
        let det = self.at(0, 0) * self.at(1, 1) - self.at(0, 1) * self.at(1, 0);
        let discriminant = trace * trace - 4.0 * det;
        if discriminant < 0.0 {
            return Err(MatrixError::ComplexEigenvalues { discriminant });
        }

        let root = discriminant.sqrt();
        self.eigenvalues = Some(vec![(trace + root) / 2.0, (trace - root) / 2.0]);
        // Any previously cached vectors belong to the old values.
        self.eigenvectors = None;
        Ok(())
    }

    fn compute_eigenvectors(&mut self) -> Result<(), MatrixError> {
        if self.size != 2 {
            return Err(MatrixError::UnsupportedDimension { size: self.size });
        }
        let eigenvalues = match &self.eigenvalues {
            Some(values) => values.clone(),
            None => return Err(MatrixError::PrerequisiteMissing),
        };

        let (aa, bb) = (self.at(0, 0), self.at(0, 1));
        let (cc, dd) = (self.at(1, 0), self.at(1, 1));

        let mut vectors = Vec::with_capacity(eigenvalues.len());
        for &lambda in &eigenvalues {
            let denominator = (aa - lambda) * (dd - lambda);
            if denominator == 0.0 || lambda == aa {
                return Err(MatrixError::DegenerateEigenvector { eigenvalue: lambda });
            }
            let v1 = bb * cc / denominator;
            let v0 = bb * v1 / (lambda - aa);
            vectors.push(vec![v0, v1]);
        }

        self.eigenvectors = Some(vectors);
        Ok(())
    }

    fn reset(&mut self) {
        self.size = 0;
        self.cells = Vec::new();
        self.eigenvalues = None;
        self.eigenvectors = None;
    }
}

impl MatrixF64 {
    pub fn new(size: usize) -> Self {
        MatrixF64 {
            size,
            cells: vec![0.0; size * size],
            eigenvalues: None,
            eigenvectors: None,
        }
    }

    #[inline(always)]
    fn at(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.size + col]
    }

    fn check_index(&self, row: usize, col: usize) -> Result<(), MatrixError> {
        if row < 1 || row > self.size || col < 1 || col > self.size {
            return Err(MatrixError::IndexOutOfBounds {
                row,
                col,
                size: self.size,
            });
        }
        Ok(())
    }

    fn check_row(&self, row: usize) -> Result<usize, MatrixError> {
        if row < 1 || row > self.size {
            return Err(MatrixError::RowIndexOutOfRange {
                row,
                size: self.size,
            });
        }
        Ok(row - 1)
    }

    fn invalidate_eigen(&mut self) {
        self.eigenvalues = None;
        self.eigenvectors = None;
    }
}

impl fmt::Display for MatrixF64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.cells.chunks(self.size.max(1)) {
            writeln!(f, "{}", line.iter().join("\t"))?;
        }

        if let Some(eigenvalues) = &self.eigenvalues {
            writeln!(f, "Eigenvalues:  {}", eigenvalues.iter().join("  ::  "))?;
        }

        if let Some(eigenvectors) = &self.eigenvectors {
            for (rr, vector) in eigenvectors.iter().enumerate() {
                writeln!(f, "Eigenvectors[{}]:  {}", rr, vector.iter().join("  ::  "))?;
            }
        }

        Ok(())
    }
}

impl ops::Add<&MatrixF64> for &MatrixF64 {
    type Output = Result<MatrixF64, MatrixError>;

    fn add(self, rhs: &MatrixF64) -> Result<MatrixF64, MatrixError> {
        if self.size != rhs.size {
            return Err(MatrixError::InvalidDimension {
                expected: self.size,
                got: rhs.size,
            });
        }

        Ok(MatrixF64 {
            size: self.size,
            cells: self
                .cells
                .iter()
                .zip(rhs.cells.iter())
                .map(|(a, b)| a + b)
                .collect(),
            eigenvalues: None,
            eigenvectors: None,
        })
    }
}

impl ops::Mul<&MatrixF64> for &MatrixF64 {
    type Output = Result<MatrixF64, MatrixError>;

    fn mul(self, rhs: &MatrixF64) -> Result<MatrixF64, MatrixError> {
        if self.size != rhs.size {
            return Err(MatrixError::InvalidDimension {
                expected: self.size,
                got: rhs.size,
            });
        }

        let n = self.size;
        Ok(MatrixF64 {
            size: n,
            cells: (0..n)
                .flat_map(|i| {
                    (0..n).map(move |j| (0..n).map(|k| self.at(i, k) * rhs.at(k, j)).sum())
                })
                .collect(),
            eigenvalues: None,
            eigenvectors: None,
        })
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
