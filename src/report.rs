//! Report assembly for the pull request status message.
//!
//! Rendering is pure: the same resolution, version and counts always give the same text.

use std::fmt;

use crate::analyzer::Resolution;
use crate::domain::{ReleaseType, VersionInfo};

/// Hidden marker heading the commit-messages report
pub const COMMITS_REPORT_MARKER: &str = "<!--conventional-gate:commits-->";

/// Hidden marker heading the PR title report
pub const TITLE_REPORT_MARKER: &str = "<!--conventional-gate:title-->";

/// Example shown to users whose commits are not compliant
pub const COMPLIANT_EXAMPLE: &str = "fix: correct the login redirect";

/// Informational lines placed above the release target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportNotice {
    /// More commits than the host lists; only the first `threshold` were evaluated
    Truncated {
        commit_count: usize,
        threshold: usize,
    },
    /// The recommendation is a major release
    BreakingChange,
    /// Some commits were unparseable or used unknown types
    NonConformingCommits,
    /// No compliant commit, tolerated because strict mode is off
    NoCompliantCommits,
    /// Nothing else to report
    AllConform,
}

impl fmt::Display for ReportNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportNotice::Truncated {
                commit_count,
                threshold,
            } => write!(
                f,
                "⚠️ The pull request contains {} commits. This message is based only on the first {}.",
                commit_count, threshold
            ),
            ReportNotice::BreakingChange => write!(
                f,
                "🚨 Your pull request contains a BREAKING CHANGE, please be sure to communicate it."
            ),
            ReportNotice::NonConformingCommits => write!(
                f,
                "❕ Some commits are not using the conventional commits format. They will be ignored in version management."
            ),
            ReportNotice::NoCompliantCommits => write!(
                f,
                "❕ No commit message is compliant with the conventional commits format, so no release is planned. For example: \"{}\"",
                COMPLIANT_EXAMPLE
            ),
            ReportNotice::AllConform => {
                write!(f, "✅ All commits follow the conventional commits format.")
            }
        }
    }
}

/// Final status and text of one validation path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub passed: bool,
    pub text: String,
}

/// Notices for a resolution, in display order
pub fn notices(resolution: &Resolution, commit_count: usize, threshold: usize) -> Vec<ReportNotice> {
    let mut notices = Vec::new();
    let stats = resolution.stats();

    if commit_count > threshold {
        notices.push(ReportNotice::Truncated {
            commit_count,
            threshold,
        });
    }
    if resolution.release_type() == ReleaseType::Major {
        notices.push(ReportNotice::BreakingChange);
    }
    if stats.unset_count > 0 {
        notices.push(ReportNotice::NonConformingCommits);
    }
    if resolution.passed() && stats.has_no_compliant_commits() {
        notices.push(ReportNotice::NoCompliantCommits);
    }
    if notices.is_empty() {
        notices.push(ReportNotice::AllConform);
    }
    notices
}

/// Line announcing the release target and why
pub fn release_target_line(version: &VersionInfo, reason: &str) -> String {
    let last = version.last_version.as_deref().unwrap_or("none");
    let mut line = format!(
        "🚀 Release target: {} → {} ({})",
        last,
        version.next_version,
        reason.trim_start_matches("There are ")
    );

    if version.is_unchanged() {
        line.push_str(
            "\n⚠ No *important* changes were declared - the version will not change and release \
             will not be triggered. To address this, declare some \"feat\", \"fix\" or BREAKING changes.",
        );
    }
    line
}

/// Build the status message for a resolution.
///
/// Only the no-compliant-commits outcome fails; everything else is informational.
pub fn build_message(
    resolution: &Resolution,
    version: &VersionInfo,
    commit_count: usize,
    threshold: usize,
) -> Report {
    let mut lines = vec!["### Version".to_string()];

    match resolution {
        Resolution::NoCompliantCommits(_) => {
            if commit_count > threshold {
                lines.push(
                    ReportNotice::Truncated {
                        commit_count,
                        threshold,
                    }
                    .to_string(),
                );
            }
            lines.push(
                "❌ There are no commit messages compliant with the \
                 [conventional commits](https://www.conventionalcommits.org/en/v1.0.0/) format!"
                    .to_string(),
            );
            lines.push(format!(
                "Add at least one compliant commit, for example: `{}`",
                COMPLIANT_EXAMPLE
            ));
            Report {
                passed: false,
                text: lines.join("\n"),
            }
        }
        Resolution::Recommended(recommendation) => {
            lines.extend(
                notices(resolution, commit_count, threshold)
                    .iter()
                    .map(ToString::to_string),
            );
            lines.push(release_target_line(version, &recommendation.reason));
            Report {
                passed: true,
                text: lines.join("\n"),
            }
        }
    }
}
