//! Python bindings for tablespan

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use tablespan::{TableError, TableOptions};

fn to_py_err(err: TableError) -> PyErr {
    PyErr::new::<PyValueError, _>(err.to_string())
}

/// Python module for tablespan
#[pymodule]
fn _native(_py: Python, m: &Bound<PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    m.add_function(wrap_pyfunction!(table_to_html, m)?)?;
    m.add_function(wrap_pyfunction!(table_to_typst, m)?)?;
    m.add_function(wrap_pyfunction!(convert_document, m)?)?;

    Ok(())
}

/// Convert one table block to HTML
#[pyfunction]
#[pyo3(signature = (block, caption_mark = ";"))]
fn table_to_html(block: &str, caption_mark: &str) -> PyResult<String> {
    let options = TableOptions::new().with_caption_mark(caption_mark);
    tablespan::markdown_table_to_html(block, &options).map_err(to_py_err)
}

/// Convert one table block to Typst
#[pyfunction]
#[pyo3(signature = (block, caption_mark = ";"))]
fn table_to_typst(block: &str, caption_mark: &str) -> PyResult<String> {
    let options = TableOptions::new().with_caption_mark(caption_mark);
    tablespan::markdown_table_to_typst(block, &options).map_err(to_py_err)
}

/// Convert every table block of a document to HTML.
///
/// Returns the converted text and the list of warning messages.
#[pyfunction]
#[pyo3(signature = (document, caption_mark = ";"))]
fn convert_document(document: &str, caption_mark: &str) -> PyResult<(String, Vec<String>)> {
    let options = TableOptions::new().with_caption_mark(caption_mark);
    options.validate().map_err(to_py_err)?;

    let output = tablespan::convert_document(document, &options);
    let warnings = output.warnings.iter().map(ToString::to_string).collect();
    Ok((output.content, warnings))
}
