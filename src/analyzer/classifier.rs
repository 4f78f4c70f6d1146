use std::sync::OnceLock;

use regex::Regex;

use crate::config::ClassificationConfig;
use crate::domain::{CommitStats, Label, ParsedCommit};

fn merge_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^Merge\s").ok()).as_ref()
}

/// Classify a parsed commit. First matching rule wins:
/// merge header, missing type, unrecognized type, breaking, feature, fix, other.
pub fn classify(parsed: &ParsedCommit, cfg: &ClassificationConfig) -> Label {
    if merge_regex().is_some_and(|re| re.is_match(&parsed.header)) {
        return Label::Merge;
    }

    let Some(commit_type) = parsed.r#type.as_deref() else {
        return Label::Unset;
    };

    if !cfg.is_recognized_type(commit_type) {
        return Label::Unset;
    }

    if parsed.breaking {
        Label::Breaking
    } else if cfg.feature_types.iter().any(|t| t == commit_type) {
        Label::Feature
    } else if cfg.fix_types.iter().any(|t| t == commit_type) {
        Label::Fix
    } else {
        Label::Other
    }
}

/// Classify every commit and fold the labels into fresh statistics
pub fn collect_stats<'a, I>(commits: I, cfg: &ClassificationConfig) -> CommitStats
where
    I: IntoIterator<Item = &'a ParsedCommit>,
{
    commits.into_iter().fold(CommitStats::default(), |stats, commit| {
        let label = classify(commit, cfg);
        tracing::debug!(hash = %commit.hash, header = %commit.header, %label, "classified commit");
        stats.record(label)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(message: &str) -> Label {
        classify(&ParsedCommit::parse(message), &ClassificationConfig::default())
    }

    #[test]
    fn test_classify_basic_types() {
        assert_eq!(label("feat: add"), Label::Feature);
        assert_eq!(label("fix(ui): button"), Label::Fix);
        assert_eq!(label("docs: readme"), Label::Other);
        assert_eq!(label("chore: deps"), Label::Other);
    }

    #[test]
    fn test_breaking_wins_over_nominal_type() {
        for message in [
            "feat(api)!: x",
            "fix(api)!: x",
            "docs(api)!: x",
            "chore(api)!: x",
            "refactor: x\n\nBREAKING CHANGE: gone",
        ] {
            assert_eq!(label(message), Label::Breaking, "{}", message);
        }
    }

    #[test]
    fn test_merge_commits() {
        assert_eq!(label("Merge branch 'main' into feature"), Label::Merge);
        assert_eq!(label("Merge pull request #12 from org/branch"), Label::Merge);
        assert_eq!(label("Merged stuff"), Label::Unset);
    }

    #[test]
    fn test_unset_for_unparseable_and_unknown_types() {
        assert_eq!(label("Update stuff"), Label::Unset);
        assert_eq!(label("wip: half done"), Label::Unset);
        assert_eq!(label("wip!: breaking but unknown"), Label::Unset);
    }

    #[test]
    fn test_empty_allow_list_accepts_any_type() {
        let mut cfg = ClassificationConfig::default();
        cfg.recognized_types.clear();
        assert_eq!(classify(&ParsedCommit::parse("wip: x"), &cfg), Label::Other);
    }

    #[test]
    fn test_configured_aliases() {
        let mut cfg = ClassificationConfig::default();
        cfg.fix_types.push("perf".to_string());
        assert_eq!(classify(&ParsedCommit::parse("perf: faster"), &cfg), Label::Fix);
    }

    #[test]
    fn test_collect_stats_sums_to_total() {
        let commits: Vec<ParsedCommit> = [
            "feat: a",
            "fix: b",
            "docs: c",
            "nonsense",
            "Merge branch 'x'",
            "feat!: d",
        ]
        .iter()
        .map(|m| ParsedCommit::parse(m))
        .collect();

        let stats = collect_stats(&commits, &ClassificationConfig::default());
        assert_eq!(stats.total_commits, 6);
        assert_eq!(
            stats.unset_count
                + stats.merge_count
                + stats.breaking_count
                + stats.feature_count
                + stats.fix_count
                + stats.other_count,
            stats.total_commits
        );
        assert_eq!(stats.breaking_count, 1);
        assert_eq!(stats.merge_count, 1);
        assert_eq!(stats.unset_count, 1);
    }
}
