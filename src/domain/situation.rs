use crate::error::{GitVersionError, Result};

/// Commit hash used when the repository has no commit yet
pub const NO_COMMIT: &str = "0000000000000000000000000000000000000000";

/// Snapshot of the repository facts a version is derived from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySituation {
    is_clean: bool,
    head_commit: String,
    head_commit_timestamp: i64,
    head_branch: Option<String>,
    head_tags: Vec<String>,
}

impl RepositorySituation {
    /// Create a clean, detached situation at `head_commit`.
    ///
    /// The hash must be 40 lowercase hex characters. Uppercase input is
    /// normalized.
    pub fn new(head_commit: impl Into<String>) -> Result<Self> {
        let head_commit = head_commit.into().to_ascii_lowercase();
        if head_commit.len() != 40 || !head_commit.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(GitVersionError::situation(format!(
                "commit hash must be 40 hex characters, got '{}'",
                head_commit
            )));
        }

        Ok(RepositorySituation {
            is_clean: true,
            head_commit,
            head_commit_timestamp: 0,
            head_branch: None,
            head_tags: Vec::new(),
        })
    }

    /// Situation of a repository without any commit
    pub fn no_commit() -> Self {
        RepositorySituation {
            is_clean: true,
            head_commit: NO_COMMIT.to_string(),
            head_commit_timestamp: 0,
            head_branch: None,
            head_tags: Vec::new(),
        }
    }

    pub fn with_timestamp(mut self, seconds: i64) -> Self {
        self.head_commit_timestamp = seconds;
        self
    }

    pub fn with_branch(mut self, branch: Option<String>) -> Self {
        self.head_branch = branch;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.head_tags = tags;
        self
    }

    pub fn with_clean(mut self, is_clean: bool) -> Self {
        self.is_clean = is_clean;
        self
    }

    /// Replace the detected refs with explicitly provided ones.
    ///
    /// When either override is given, both the branch and the tag list are
    /// taken from the overrides, so a forced tag alone yields a detached HEAD
    /// carrying only that tag. Empty strings count as absent.
    pub fn with_overrides(self, branch: Option<&str>, tag: Option<&str>) -> Self {
        let branch = branch.filter(|b| !b.is_empty());
        let tag = tag.filter(|t| !t.is_empty());
        if branch.is_none() && tag.is_none() {
            return self;
        }

        RepositorySituation {
            head_branch: branch.map(str::to_string),
            head_tags: tag.map(|t| vec![t.to_string()]).unwrap_or_default(),
            ..self
        }
    }

    pub fn is_clean(&self) -> bool {
        self.is_clean
    }

    pub fn head_commit(&self) -> &str {
        &self.head_commit
    }

    pub fn has_commit(&self) -> bool {
        self.head_commit != NO_COMMIT
    }

    pub fn head_commit_timestamp(&self) -> i64 {
        self.head_commit_timestamp
    }

    /// Branch name, `None` when HEAD is detached
    pub fn head_branch(&self) -> Option<&str> {
        self.head_branch.as_deref()
    }

    pub fn head_tags(&self) -> &[String] {
        &self.head_tags
    }
}
