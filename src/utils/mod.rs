//! Utility modules
//!
//! - Diagnostics for table blocks
//! - Error types and result types

pub mod diagnostics;
pub mod error;

// Re-export commonly used items
pub use diagnostics::{check_table, format_diagnostics, CheckResult, Diagnostic, DiagnosticLevel};
pub use error::{ConversionOutput, ConversionWarning, TableError, TableResult};
