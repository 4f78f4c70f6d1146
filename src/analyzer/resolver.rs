use std::collections::HashSet;

use crate::analyzer::classifier::collect_stats;
use crate::config::ClassificationConfig;
use crate::domain::{CommitStats, ParsedCommit, ReleaseType, PENDING_COMMIT_SENTINEL};

/// Decides which parsed commits are eligible for counting
#[derive(Debug, Clone, Default)]
pub struct IncludeFilter {
    hashes: HashSet<String>,
    admit_pending: bool,
}

impl IncludeFilter {
    /// Admit only commits whose hash is listed
    pub fn listed<I, S>(hashes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        IncludeFilter {
            hashes: hashes.into_iter().map(Into::into).collect(),
            admit_pending: false,
        }
    }

    /// Also admit the synthetic commit whose body is the pending sentinel
    pub fn with_pending(mut self) -> Self {
        self.admit_pending = true;
        self
    }

    pub fn admits(&self, commit: &ParsedCommit) -> bool {
        (!commit.hash.is_empty() && self.hashes.contains(&commit.hash))
            || (self.admit_pending && commit.body.as_deref() == Some(PENDING_COMMIT_SENTINEL))
    }
}

/// Release decision for a set of commits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub release_type: ReleaseType,
    pub reason: String,
    pub stats: CommitStats,
}

/// Outcome of resolving a commit set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Recommended(Recommendation),
    /// Every eligible commit was unparseable or a merge; a hard validation failure
    NoCompliantCommits(CommitStats),
}

impl Resolution {
    pub fn stats(&self) -> &CommitStats {
        match self {
            Resolution::Recommended(r) => &r.stats,
            Resolution::NoCompliantCommits(stats) => stats,
        }
    }

    pub fn release_type(&self) -> ReleaseType {
        match self {
            Resolution::Recommended(r) => r.release_type,
            Resolution::NoCompliantCommits(_) => ReleaseType::None,
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self, Resolution::Recommended(_))
    }
}

/// Highest release type the statistics call for
pub fn release_type_for(stats: &CommitStats) -> ReleaseType {
    if stats.breaking_count > 0 {
        ReleaseType::Major
    } else if stats.feature_count > 0 {
        ReleaseType::Minor
    } else if stats.fix_count > 0 {
        ReleaseType::Patch
    } else {
        ReleaseType::None
    }
}

/// Sentence naming the contributing counts
pub fn reason_for(stats: &CommitStats) -> String {
    if stats.total_commits == 0 {
        return "There are no commits to evaluate".to_string();
    }
    format!(
        "There are {} breaking changes, {} features, {} fixes",
        stats.breaking_count, stats.feature_count, stats.fix_count
    )
}

/// Folds eligible commits into a release recommendation
pub struct Resolver<'a> {
    config: &'a ClassificationConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(config: &'a ClassificationConfig) -> Self {
        Resolver { config }
    }

    /// Classify the commits admitted by `filter` and decide the release type
    pub fn resolve(&self, commits: &[ParsedCommit], filter: &IncludeFilter) -> Resolution {
        let stats = collect_stats(commits.iter().filter(|c| filter.admits(c)), self.config);

        if stats.has_no_compliant_commits() {
            if self.config.strict {
                tracing::warn!(
                    total = stats.total_commits,
                    "no eligible commit follows the conventional commits format"
                );
                return Resolution::NoCompliantCommits(stats);
            }
            return Resolution::Recommended(Recommendation {
                release_type: ReleaseType::None,
                reason: "There are no commits compliant with the conventional commits format"
                    .to_string(),
                stats,
            });
        }

        if stats.unset_count > 0 {
            tracing::warn!(
                ignored = stats.unset_count,
                "ignoring commits that do not follow the conventional commits format"
            );
        }

        let recommendation = Recommendation {
            release_type: release_type_for(&stats),
            reason: reason_for(&stats),
            stats,
        };
        tracing::info!(
            release_type = %recommendation.release_type,
            reason = %recommendation.reason,
            "resolved recommendation"
        );
        Resolution::Recommended(recommendation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawCommit;

    fn commits(messages: &[&str]) -> Vec<ParsedCommit> {
        messages
            .iter()
            .enumerate()
            .map(|(i, m)| ParsedCommit::from_raw(&RawCommit::new(format!("h{}", i), *m)))
            .collect()
    }

    fn all_hashes(commits: &[ParsedCommit]) -> IncludeFilter {
        IncludeFilter::listed(commits.iter().map(|c| c.hash.clone()))
    }

    fn resolve(messages: &[&str]) -> Resolution {
        let cfg = ClassificationConfig::default();
        let parsed = commits(messages);
        Resolver::new(&cfg).resolve(&parsed, &all_hashes(&parsed))
    }

    #[test]
    fn test_resolve_major() {
        let res = resolve(&["feat: new feature", "fix(api)!: breaking change"]);
        assert_eq!(res.release_type(), ReleaseType::Major);
    }

    #[test]
    fn test_resolve_minor() {
        let res = resolve(&["feat: add X", "fix: correct Y"]);
        assert_eq!(res.release_type(), ReleaseType::Minor);
        match res {
            Resolution::Recommended(r) => {
                assert_eq!(r.reason, "There are 0 breaking changes, 1 features, 1 fixes")
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_resolve_patch() {
        let res = resolve(&["fix: bug fix", "refactor: code cleanup"]);
        assert_eq!(res.release_type(), ReleaseType::Patch);
    }

    #[test]
    fn test_resolve_none_for_other_types() {
        let res = resolve(&["docs: update readme", "chore: update deps", "Random text"]);
        assert!(res.passed());
        assert_eq!(res.release_type(), ReleaseType::None);
        assert_eq!(res.stats().unset_count, 1);
    }

    #[test]
    fn test_resolve_breaking_via_footer() {
        let res = resolve(&["fix: rename API field\n\nBREAKING CHANGE: field changed"]);
        assert_eq!(res.release_type(), ReleaseType::Major);
    }

    #[test]
    fn test_no_commits_is_not_a_failure() {
        let res = resolve(&[]);
        match res {
            Resolution::Recommended(r) => {
                assert_eq!(r.release_type, ReleaseType::None);
                assert_eq!(r.reason, "There are no commits to evaluate");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_all_unset_or_merge_fails() {
        let res = resolve(&["Updated stuff", "Merge branch 'main'", "wip: unknown type"]);
        assert!(!res.passed());
        assert_eq!(res.release_type(), ReleaseType::None);
        assert_eq!(res.stats().total_commits, 3);
    }

    #[test]
    fn test_lenient_mode_passes_with_none() {
        let cfg = ClassificationConfig {
            strict: false,
            ..ClassificationConfig::default()
        };
        let parsed = commits(&["Updated stuff"]);
        let res = Resolver::new(&cfg).resolve(&parsed, &all_hashes(&parsed));
        assert!(res.passed());
        assert_eq!(res.release_type(), ReleaseType::None);
    }

    #[test]
    fn test_filter_excludes_unlisted_commits() {
        let cfg = ClassificationConfig::default();
        let parsed = commits(&["feat!: outside the PR", "fix: inside"]);
        let filter = IncludeFilter::listed(["h1"]);
        let res = Resolver::new(&cfg).resolve(&parsed, &filter);
        assert_eq!(res.release_type(), ReleaseType::Patch);
        assert_eq!(res.stats().total_commits, 1);
    }

    #[test]
    fn test_filter_admits_pending_only_when_enabled() {
        let cfg = ClassificationConfig::default();
        let mut parsed = commits(&["fix: inside"]);
        parsed.push(ParsedCommit::from_raw(&RawCommit::pending("feat: title")));

        let without = IncludeFilter::listed(["h0"]);
        assert_eq!(
            Resolver::new(&cfg).resolve(&parsed, &without).release_type(),
            ReleaseType::Patch
        );

        let with = IncludeFilter::listed(["h0"]).with_pending();
        assert_eq!(
            Resolver::new(&cfg).resolve(&parsed, &with).release_type(),
            ReleaseType::Minor
        );
    }

    #[test]
    fn test_order_independent() {
        let forward = resolve(&["feat: a", "fix: b", "Merge branch 'x'", "docs: c"]);
        let backward = resolve(&["docs: c", "Merge branch 'x'", "fix: b", "feat: a"]);
        assert_eq!(forward.stats(), backward.stats());
        assert_eq!(forward.release_type(), backward.release_type());
    }
}
