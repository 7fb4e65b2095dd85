//! WASM bindings for tablespan
//!
//! JavaScript-accessible functions for converting span tables.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "wasm")]
use crate::core::options::TableOptions;
#[cfg(feature = "wasm")]
use crate::utils::error::{ConversionWarning, TableResult};

/// Conversion result with additional metadata
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct ConvertResult {
    /// The converted output
    pub output: String,
    /// Whether the conversion was successful
    pub success: bool,
    /// Error message if conversion failed
    pub error: Option<String>,
    /// Warnings during conversion
    pub warnings: Vec<String>,
}

#[cfg(feature = "wasm")]
impl ConvertResult {
    fn from_result(result: TableResult<String>) -> Self {
        match result {
            Ok(output) => ConvertResult {
                output,
                success: true,
                error: None,
                warnings: vec![],
            },
            Err(e) => ConvertResult {
                output: String::new(),
                success: false,
                error: Some(format!("Conversion failed: {}", e)),
                warnings: vec![],
            },
        }
    }

    fn with_warnings(output: String, warnings: &[ConversionWarning]) -> Self {
        ConvertResult {
            output,
            success: true,
            error: None,
            warnings: warnings.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Summary of table check results
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct CheckSummary {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    pub has_errors: bool,
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Missing or malformed options fall back to the defaults
#[cfg(feature = "wasm")]
fn parse_options(options: JsValue) -> TableOptions {
    if options.is_undefined() || options.is_null() {
        return TableOptions::default();
    }
    serde_wasm_bindgen::from_value(options).unwrap_or_default()
}

#[cfg(feature = "wasm")]
fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

/// Convert one table block to HTML
///
/// # Arguments
/// * `input` - The table block
/// * `options` - `{ caption_mark?: string }`
///
/// # Returns
/// `{ output, success, error, warnings }`
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "tableToHtml")]
pub fn table_to_html_wasm(input: &str, options: JsValue) -> JsValue {
    let opts = parse_options(options);
    to_js(&ConvertResult::from_result(crate::markdown_table_to_html(
        input, &opts,
    )))
}

/// Convert one table block to Typst
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "tableToTypst")]
pub fn table_to_typst_wasm(input: &str, options: JsValue) -> JsValue {
    let opts = parse_options(options);
    to_js(&ConvertResult::from_result(crate::markdown_table_to_typst(
        input, &opts,
    )))
}

/// Convert every table block of a document to HTML
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "documentToHtml")]
pub fn document_to_html_wasm(input: &str, options: JsValue) -> JsValue {
    let opts = parse_options(options);
    if let Err(e) = opts.validate() {
        return to_js(&ConvertResult::from_result(Err(e)));
    }
    let output = crate::convert_document(input, &opts);
    to_js(&ConvertResult::with_warnings(
        output.content,
        &output.warnings,
    ))
}

/// Check a table block for issues
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "checkTable")]
pub fn check_table_wasm(input: &str, options: JsValue) -> JsValue {
    use crate::utils::diagnostics::DiagnosticLevel;

    let opts = parse_options(options);
    let result = crate::check_table(input, &opts);

    // Group diagnostics by level
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for d in &result.diagnostics {
        match d.level {
            DiagnosticLevel::Error => errors.push(d.message.clone()),
            DiagnosticLevel::Warning => warnings.push(d.message.clone()),
            DiagnosticLevel::Info => infos.push(d.message.clone()),
        }
    }

    to_js(&CheckSummary {
        errors,
        warnings,
        infos,
        has_errors: result.has_errors(),
    })
}

/// Get version information
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
