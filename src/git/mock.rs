use crate::domain::RawCommit;
use crate::error::{GateError, Result};
use crate::git::Repository;

/// Mock repository for testing without actual git operations
#[derive(Debug, Clone, Default)]
pub struct MockRepository {
    commits: Vec<RawCommit>,
    latest_tag: Option<String>,
    fail_commits: bool,
    fail_tags: bool,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commit; commits are returned in insertion order
    pub fn add_commit(&mut self, hash: impl Into<String>, message: impl Into<String>) {
        self.commits.push(RawCommit::new(hash, message));
    }

    /// Builder form of [`MockRepository::add_commit`]
    pub fn with_commit(mut self, hash: impl Into<String>, message: impl Into<String>) -> Self {
        self.add_commit(hash, message);
        self
    }

    /// Set the tag reported as the latest release
    pub fn with_latest_tag(mut self, tag: impl Into<String>) -> Self {
        self.latest_tag = Some(tag.into());
        self
    }

    /// Make commit listing fail
    pub fn failing_commits(mut self) -> Self {
        self.fail_commits = true;
        self
    }

    /// Make tag lookup fail
    pub fn failing_tags(mut self) -> Self {
        self.fail_tags = true;
        self
    }
}

impl Repository for MockRepository {
    fn list_commits(&self, _base: &str, _head: &str) -> Result<Vec<RawCommit>> {
        if self.fail_commits {
            return Err(GateError::unavailable("commit listing failed"));
        }
        Ok(self.commits.clone())
    }

    fn latest_release_tag(&self) -> Result<Option<String>> {
        if self.fail_tags {
            return Err(GateError::unavailable("tag lookup failed"));
        }
        Ok(self.latest_tag.clone())
    }
}
