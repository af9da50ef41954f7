use crate::domain::RepositorySituation;
use crate::error::{GitVersionError, Result};
use crate::git::SituationProvider;

/// Mock repository for testing without actual git operations
#[derive(Debug, Clone, Default)]
pub struct MockRepository {
    head_commit: Option<String>,
    timestamp: i64,
    branch: Option<String>,
    tags: Vec<String>,
    dirty: bool,
    fail_with: Option<String>,
}

impl MockRepository {
    /// Create a new mock repository without commits
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HEAD commit and its timestamp
    pub fn set_head(&mut self, commit: impl Into<String>, timestamp: i64) {
        self.head_commit = Some(commit.into());
        self.timestamp = timestamp;
    }

    /// Check out a branch; `None` detaches HEAD
    pub fn set_branch(&mut self, branch: Option<&str>) {
        self.branch = branch.map(str::to_string);
    }

    /// Add a tag pointing at HEAD
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.push(name.into());
    }

    /// Mark the working tree as modified
    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    /// Make every read fail with a git error
    pub fn fail_with(&mut self, message: impl Into<String>) {
        self.fail_with = Some(message.into());
    }
}

impl SituationProvider for MockRepository {
    fn situation(&self) -> Result<RepositorySituation> {
        if let Some(message) = &self.fail_with {
            return Err(GitVersionError::Git(git2::Error::from_str(message)));
        }

        let situation = match &self.head_commit {
            Some(commit) => RepositorySituation::new(commit.as_str())?.with_timestamp(self.timestamp),
            None => RepositorySituation::no_commit(),
        };

        Ok(situation
            .with_branch(self.branch.clone())
            .with_tags(self.tags.clone())
            .with_clean(!self.dirty))
    }
}
