//! Repository access behind a small trait.
//!
//! The gate only needs two reads from history: the commits of the change under
//! review and the most recent release tag. [`Repository`] abstracts both so the
//! orchestration runs against a real repository ([`Git2Repository`]) or an
//! in-memory one ([`MockRepository`]) in tests.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::RawCommit;
use crate::error::Result;

/// Read-only history operations needed by the gate
pub trait Repository {
    /// Commits reachable from `head` but not from `base`, oldest first.
    ///
    /// # Arguments
    /// * `base` - Revision the change is based on (excluded)
    /// * `head` - Tip of the change (included)
    fn list_commits(&self, base: &str, head: &str) -> Result<Vec<RawCommit>>;

    /// Name of the most recent tag reachable from HEAD that parses as a semantic version.
    ///
    /// Returns `Ok(None)` when no such tag exists.
    fn latest_release_tag(&self) -> Result<Option<String>>;
}
