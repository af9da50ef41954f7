//! Pure formatting functions for UI output.
//!
//! Functions here build the text shown to the user and are testable
//! without capturing stdout.

use std::collections::BTreeMap;

use console::style;

use crate::composer::ComposedVersion;

/// Format an error message with a red prefix.
pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

/// Format a status message with a yellow arrow.
pub fn format_status(message: &str) -> String {
    format!("{} {}", style("→").yellow(), message)
}

/// One line describing which ref the version was derived from.
///
/// # Example
/// `→ branch 'feature-login' -> 1.2.0-feature-login-SNAPSHOT`
pub fn format_selection(composed: &ComposedVersion) -> String {
    format_status(&format!(
        "{} '{}' -> {}",
        composed.ref_type,
        composed.ref_name,
        style(&composed.version).green()
    ))
}

/// Properties as `KEY=VALUE` lines in key order.
pub fn format_properties(properties: &BTreeMap<String, String>) -> Vec<String> {
    properties
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect()
}
