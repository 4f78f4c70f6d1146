//! Terminal output.
//!
//! The gate runs non-interactively in CI, so this module only formats and prints.

pub mod formatter;

pub use formatter::{
    display_error, display_report, display_status, display_success, display_warning,
    indent_report,
};
