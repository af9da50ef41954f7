//! Choosing the ref and descriptor that drive version rendering

use std::fmt;

use tracing::debug;

use crate::domain::version::compare_tag_versions;
use crate::domain::{RepositorySituation, VersionDescriptor};

/// Kind of ref a version is derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefType {
    Tag,
    Branch,
    Commit,
}

impl RefType {
    /// Context key under which the ref name is exposed
    pub fn name(&self) -> &'static str {
        match self {
            RefType::Tag => "tag",
            RefType::Branch => "branch",
            RefType::Commit => "commit",
        }
    }
}

impl fmt::Display for RefType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of descriptor selection for one repository situation
#[derive(Debug, Clone)]
pub struct RefSelection<'a> {
    pub ref_type: RefType,
    /// Ref name as found in the repository
    pub raw_name: String,
    /// Ref name with the descriptor prefix stripped and `/` replaced by `-`
    pub ref_name: String,
    pub descriptor: &'a VersionDescriptor,
}

impl<'a> RefSelection<'a> {
    fn new(ref_type: RefType, raw_name: &str, descriptor: &'a VersionDescriptor) -> Self {
        RefSelection {
            ref_type,
            raw_name: raw_name.to_string(),
            ref_name: descriptor.strip_prefix(raw_name).replace('/', "-"),
            descriptor,
        }
    }
}

/// Prioritized tag, branch and commit descriptors
#[derive(Debug, Clone)]
pub struct DescriptorSelector {
    tags: Vec<VersionDescriptor>,
    branches: Vec<VersionDescriptor>,
    commit: VersionDescriptor,
    prefer_tags: bool,
}

impl DescriptorSelector {
    pub fn new(
        tags: Vec<VersionDescriptor>,
        branches: Vec<VersionDescriptor>,
        commit: VersionDescriptor,
    ) -> Self {
        DescriptorSelector {
            tags,
            branches,
            commit,
            prefer_tags: false,
        }
    }

    /// Try tag descriptors before branch descriptors
    pub fn prefer_tags(mut self, prefer_tags: bool) -> Self {
        self.prefer_tags = prefer_tags;
        self
    }

    pub fn prefers_tags(&self) -> bool {
        self.prefer_tags
    }

    pub fn tag_descriptors(&self) -> &[VersionDescriptor] {
        &self.tags
    }

    pub fn branch_descriptors(&self) -> &[VersionDescriptor] {
        &self.branches
    }

    pub fn commit_descriptor(&self) -> &VersionDescriptor {
        &self.commit
    }

    /// Select the ref and descriptor for `situation`.
    ///
    /// Always succeeds: without a matching tag or branch descriptor the
    /// commit fallback applies.
    pub fn select(&self, situation: &RepositorySituation) -> RefSelection<'_> {
        let tag = || self.tag_candidate(situation.head_tags());
        let branch = || self.branch_candidate(situation.head_branch());

        let selection = if self.prefer_tags {
            tag().or_else(branch)
        } else {
            branch().or_else(tag)
        };

        let selection = selection.unwrap_or_else(|| {
            RefSelection::new(RefType::Commit, situation.head_commit(), &self.commit)
        });

        debug!(
            ref_type = %selection.ref_type,
            ref_name = %selection.raw_name,
            format = selection.descriptor.format().as_str(),
            "selected version descriptor"
        );

        selection
    }

    /// Best tag of the first tag descriptor matching any head tag
    fn tag_candidate(&self, head_tags: &[String]) -> Option<RefSelection<'_>> {
        self.tags.iter().find_map(|descriptor| {
            head_tags
                .iter()
                .filter(|tag| descriptor.matches(tag))
                .max_by(|a, b| {
                    compare_tag_versions(descriptor.strip_prefix(a), descriptor.strip_prefix(b))
                        .then_with(|| a.cmp(b))
                })
                .map(|tag| RefSelection::new(RefType::Tag, tag, descriptor))
        })
    }

    fn branch_candidate(&self, head_branch: Option<&str>) -> Option<RefSelection<'_>> {
        let branch = head_branch?;
        self.branches
            .iter()
            .find(|descriptor| descriptor.matches(branch))
            .map(|descriptor| RefSelection::new(RefType::Branch, branch, descriptor))
    }
}
