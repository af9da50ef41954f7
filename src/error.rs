use thiserror::Error;

/// Unified error type for gitver operations
#[derive(Error, Debug)]
pub enum GitVersionError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid placeholder '{placeholder}': {reason}")]
    Template { placeholder: String, reason: String },

    #[error("Invalid repository situation: {0}")]
    Situation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience type alias for Results in gitver
pub type Result<T> = std::result::Result<T, GitVersionError>;

impl GitVersionError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitVersionError::Config(msg.into())
    }

    /// Create a placeholder error naming the offending placeholder
    pub fn template(placeholder: impl Into<String>, reason: impl Into<String>) -> Self {
        GitVersionError::Template {
            placeholder: placeholder.into(),
            reason: reason.into(),
        }
    }

    /// Create a repository situation error with context
    pub fn situation(msg: impl Into<String>) -> Self {
        GitVersionError::Situation(msg.into())
    }

    /// Prefix a configuration error with the location of the offending descriptor.
    ///
    /// Errors that are not configuration errors are returned unchanged.
    pub fn in_descriptor(self, location: &str) -> Self {
        match self {
            GitVersionError::Pattern { pattern, source } => GitVersionError::Config(format!(
                "{}: invalid pattern '{}': {}",
                location, pattern, source
            )),
            GitVersionError::Template {
                placeholder,
                reason,
            } => GitVersionError::Config(format!(
                "{}: invalid placeholder '{}': {}",
                location, placeholder, reason
            )),
            GitVersionError::Config(msg) => {
                GitVersionError::Config(format!("{}: {}", location, msg))
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GitVersionError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GitVersionError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_template_error_names_placeholder() {
        let err = GitVersionError::template("${foo:bogus}", "unknown function 'bogus'");
        assert_eq!(
            err.to_string(),
            "Invalid placeholder '${foo:bogus}': unknown function 'bogus'"
        );
    }

    #[test]
    fn test_in_descriptor_prefixes_location() {
        let err = GitVersionError::template("${x:nope}", "unknown function 'nope'")
            .in_descriptor("branch[2].version_format");
        let msg = err.to_string();
        assert!(msg.starts_with("Configuration error: branch[2].version_format:"));
        assert!(msg.contains("${x:nope}"));
    }

    #[test]
    fn test_in_descriptor_keeps_other_errors() {
        let err = GitVersionError::situation("bad hash").in_descriptor("tag[0]");
        assert!(matches!(err, GitVersionError::Situation(_)));
    }
}
