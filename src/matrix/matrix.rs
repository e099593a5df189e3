use crate::error::MatrixError;

/// Operations shared by square matrix implementations.
///
/// All public row/column indices are 1-based; an index outside
/// `[1, size]` is an error, never a panic.
pub trait Matrix<T>
where
    Self: Sized,
{
    fn from_rows(size: usize, rows: Vec<Vec<T>>) -> Result<Self, MatrixError>;
    fn from_flat(size: usize, values: Vec<T>) -> Result<Self, MatrixError>;
    fn to_list(&self) -> Vec<Vec<T>>;

    fn identity(n: usize) -> Self;
    fn transpose(&self) -> Self;

    fn get(&self, row: usize, col: usize) -> Result<T, MatrixError>;
    fn set(&mut self, row: usize, col: usize, value: T) -> Result<(), MatrixError>;

    /// Multiply every entry of `row` by `constant`. Zero is a legal
    /// constant and produces a singular matrix.
    fn multiply_row_by_constant(&mut self, row: usize, constant: T) -> Result<(), MatrixError>;
    /// Exchange two rows; `row1 == row2` is a no-op, not an error.
    fn swap_rows(&mut self, row1: usize, row2: usize) -> Result<(), MatrixError>;
    /// `row1 += constant * row2`; `row1 == row2` scales the row by
    /// `1 + constant`.
    fn add_row_multiple(&mut self, row1: usize, row2: usize, constant: T)
        -> Result<(), MatrixError>;

    /// Forward Gaussian elimination, in place, without pivoting.
    fn reduce_to_echelon_form(&mut self) -> Result<(), MatrixError>;
    /// `A = L * U` with `L` unit-lower-triangular; `self` is untouched.
    fn lu_decomposition(&self) -> Result<(Self, Self), MatrixError>;

    fn compute_eigenvalues(&mut self) -> Result<(), MatrixError>;
    fn compute_eigenvectors(&mut self) -> Result<(), MatrixError>;

    /// Back to the empty, size-0 state. Idempotent.
    fn reset(&mut self);
}
