use crate::domain::RepositorySituation;
use crate::error::Result;
use git2::{ErrorCode, Oid, Repository as Git2Repo, Status, StatusOptions};
use std::path::Path;
use tracing::debug;

/// Wrapper around git2::Repository implementing [super::SituationProvider]
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Branch HEAD points to, even before its first commit
    fn unborn_branch(&self) -> Option<String> {
        let head = self.repo.find_reference("HEAD").ok()?;
        head.symbolic_target()?
            .strip_prefix("refs/heads/")
            .map(str::to_string)
    }

    /// Tags whose peeled target is `commit`, lightweight and annotated alike
    fn tags_pointing_at(&self, commit: Oid) -> Result<Vec<String>> {
        let mut tags = Vec::new();

        for tag_name in self.repo.tag_names(None)?.iter().flatten() {
            // tags on trees or blobs do not peel to a commit and are skipped
            let target = self
                .repo
                .find_reference(&format!("refs/tags/{}", tag_name))
                .and_then(|reference| reference.peel_to_commit());

            if let Ok(target) = target {
                if target.id() == commit {
                    tags.push(tag_name.to_string());
                }
            }
        }

        Ok(tags)
    }

    /// Whether the working tree has no modified, staged or untracked files
    fn is_clean(&self) -> Result<bool> {
        if self.repo.is_bare() {
            return Ok(true);
        }

        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .include_ignored(false)
            .recurse_untracked_dirs(false);

        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(statuses
            .iter()
            .all(|entry| entry.status() == Status::CURRENT || entry.status() == Status::IGNORED))
    }
}

impl super::SituationProvider for Git2Repository {
    fn situation(&self) -> Result<RepositorySituation> {
        let is_clean = self.is_clean()?;

        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                debug!("repository has no commits yet");
                return Ok(RepositorySituation::no_commit()
                    .with_branch(self.unborn_branch())
                    .with_clean(is_clean));
            }
            Err(e) => return Err(e.into()),
        };

        let commit = head.peel_to_commit()?;
        let branch = if self.repo.head_detached()? {
            None
        } else {
            head.shorthand().map(str::to_string)
        };
        let tags = self.tags_pointing_at(commit.id())?;

        debug!(
            commit = %commit.id(),
            branch = branch.as_deref().unwrap_or("(detached)"),
            tags = ?tags,
            is_clean,
            "read repository situation"
        );

        Ok(RepositorySituation::new(commit.id().to_string())?
            .with_timestamp(commit.time().seconds())
            .with_branch(branch)
            .with_tags(tags)
            .with_clean(is_clean))
    }
}
