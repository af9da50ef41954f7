//! User interface module - terminal output.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Writing to stdout/stderr
//!
//! Machine-readable results (the version and properties) go to stdout;
//! everything else goes to stderr so the output can be captured by scripts.

use crate::composer::ComposedVersion;

pub mod formatter;

pub use formatter::{format_error, format_properties, format_selection, format_status};

/// Print an error message in red to stderr.
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

/// Print a status message to stderr.
pub fn display_status(message: &str) {
    eprintln!("{}", format_status(message));
}

/// Print the rendered version, and the properties when requested.
///
/// # Arguments
/// * `composed` - Result of version composition
/// * `with_properties` - Also print `KEY=VALUE` lines for every property
/// * `verbose` - Describe the selected ref on stderr
pub fn display_result(composed: &ComposedVersion, with_properties: bool, verbose: bool) {
    if verbose {
        eprintln!("{}", format_selection(composed));
    }

    println!("{}", composed.version);

    if with_properties {
        for line in format_properties(&composed.properties) {
            println!("{}", line);
        }
    }
}
