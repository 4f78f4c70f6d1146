//! Domain logic - pure records and rules independent of git and report output

pub mod commit;
pub mod stats;
pub mod version;

pub use commit::{Footer, ParsedCommit, RawCommit, PENDING_COMMIT_SENTINEL};
pub use stats::{CommitStats, Label};
pub use version::{next_version, ReleaseType, VersionInfo, BOOTSTRAP_VERSION};
