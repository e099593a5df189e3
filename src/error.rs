use pyo3::exceptions::PyValueError;
use pyo3::PyErr;
use thiserror::Error;

/// Error type for this crate.
///
/// Every failure is reported to the immediate caller; no operation
/// panics, and no NaN/Inf is ever left behind in matrix state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    /// Bad size or mismatched value count.
    #[error("invalid dimension: expected {expected}, got {got}")]
    InvalidDimension { expected: usize, got: usize },
    /// Element access outside `[1, size]`.
    #[error("invalid element index ({row}, {col}) for a matrix of size {size}")]
    IndexOutOfBounds { row: usize, col: usize, size: usize },
    /// Row-operation index outside `[1, size]`.
    #[error("invalid row #: {row} (size {size})")]
    RowIndexOutOfRange { row: usize, size: usize },
    /// Exact-zero pivot hit during elimination; rows are never swapped
    /// to find a better one.
    #[error("zero pivot in column {column}")]
    SingularPivot { column: usize },
    /// The eigen-solver only handles 2x2 matrices.
    #[error("cannot compute eigenvalues for matrices of size {size}")]
    UnsupportedDimension { size: usize },
    /// Negative discriminant: both eigenvalues are complex.
    #[error("eigenvalues are complex (discriminant {discriminant})")]
    ComplexEigenvalues { discriminant: f64 },
    /// Zero denominator while back-solving an eigenvector component.
    #[error("degenerate eigenvector for eigenvalue {eigenvalue}")]
    DegenerateEigenvector { eigenvalue: f64 },
    /// Eigenvectors requested before eigenvalues were computed.
    #[error("eigenvalues must be computed first")]
    PrerequisiteMissing,
}

impl From<MatrixError> for PyErr {
    fn from(error: MatrixError) -> PyErr {
        PyValueError::new_err(error.to_string())
    }
}
