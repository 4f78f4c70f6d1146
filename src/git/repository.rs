use std::collections::HashMap;
use std::path::Path;

use git2::{ErrorCode, Oid, Repository as Git2Repo, Sort};

use crate::domain::version::parse_tag_version;
use crate::domain::RawCommit;
use crate::error::Result;

/// Wrapper around git2::Repository with our trait interface
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

    fn resolve_commit(&self, revision: &str) -> Result<Oid> {
        let object = self.repo.revparse_single(revision)?;
        Ok(object.peel_to_commit()?.id())
    }

    /// Map each tagged commit to its semantic-version tags, highest version first
    fn release_tags_by_commit(&self) -> Result<HashMap<Oid, Vec<(semver::Version, String)>>> {
        let mut by_commit: HashMap<Oid, Vec<(semver::Version, String)>> = HashMap::new();

        for name in self.repo.tag_names(None)?.iter().flatten() {
            let Ok(version) = parse_tag_version(name) else {
                tracing::debug!(tag = name, "skipping non-semver tag");
                continue;
            };

            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;
            match reference.peel_to_commit() {
                Ok(commit) => by_commit
                    .entry(commit.id())
                    .or_default()
                    .push((version, name.to_string())),
                Err(e) => tracing::debug!(tag = name, error = %e, "tag does not point at a commit"),
            }
        }

        for tags in by_commit.values_mut() {
            tags.sort_by(|a, b| b.0.cmp(&a.0));
        }
        Ok(by_commit)
    }
}

impl super::Repository for Git2Repository {
    fn list_commits(&self, base: &str, head: &str) -> Result<Vec<RawCommit>> {
        let head_oid = self.resolve_commit(head)?;
        let base_oid = self.resolve_commit(base)?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;
        revwalk.push(head_oid)?;
        revwalk.hide(base_oid)?;

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;
            let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();

            commits.push(RawCommit::new(oid.to_string(), message));
        }

        tracing::debug!(base, head, count = commits.len(), "listed commits");
        Ok(commits)
    }

    fn latest_release_tag(&self) -> Result<Option<String>> {
        let tagged = self.release_tags_by_commit()?;
        if tagged.is_empty() {
            return Ok(None);
        }

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        match revwalk.push_head() {
            Ok(()) => {}
            Err(e) if e.code() == ErrorCode::UnbornBranch => return Ok(None),
            Err(e) => return Err(e.into()),
        }

        for oid_result in revwalk {
            let oid = oid_result?;
            if let Some((_, name)) = tagged.get(&oid).and_then(|tags| tags.first()) {
                tracing::debug!(tag = %name, commit = %oid, "found latest release tag");
                return Ok(Some(name.clone()));
            }
        }

        Ok(None)
    }
}
