use pyo3::prelude::*;

pub mod error;

pub mod matrix {
    pub mod matrix;
    pub mod matrix_f64;
}

/// A Python module implemented in Rust.
#[pymodule]
fn rust_matrix(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<matrix::matrix_f64::MatrixF64>()?;
    Ok(())
}
