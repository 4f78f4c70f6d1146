use std::fmt;

/// Classification outcome for a single commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Breaking,
    Feature,
    Fix,
    Other,
    Unset,
    Merge,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Label::Breaking => "breaking",
            Label::Feature => "feature",
            Label::Fix => "fix",
            Label::Other => "other",
            Label::Unset => "unset",
            Label::Merge => "merge",
        };
        f.write_str(name)
    }
}

/// Aggregate counters over a set of classified commits.
///
/// Values are built by folding labels with [`CommitStats::record`]; counters only grow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitStats {
    pub total_commits: usize,
    pub unset_count: usize,
    pub merge_count: usize,
    pub breaking_count: usize,
    pub feature_count: usize,
    pub fix_count: usize,
    pub other_count: usize,
}

impl CommitStats {
    /// Return a copy with the counter for `label` incremented
    pub fn record(self, label: Label) -> Self {
        let mut next = self;
        next.total_commits += 1;
        match label {
            Label::Breaking => next.breaking_count += 1,
            Label::Feature => next.feature_count += 1,
            Label::Fix => next.fix_count += 1,
            Label::Other => next.other_count += 1,
            Label::Unset => next.unset_count += 1,
            Label::Merge => next.merge_count += 1,
        }
        next
    }

    /// Commits that can move the version (breaking, feature or fix)
    pub fn version_altering(&self) -> usize {
        self.breaking_count + self.feature_count + self.fix_count
    }

    /// True when there are commits and none of them is a typed, non-merge commit
    pub fn has_no_compliant_commits(&self) -> bool {
        self.total_commits > 0 && self.unset_count + self.merge_count >= self.total_commits
    }
}

impl FromIterator<Label> for CommitStats {
    fn from_iter<I: IntoIterator<Item = Label>>(iter: I) -> Self {
        iter.into_iter()
            .fold(CommitStats::default(), CommitStats::record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_each_label() {
        let stats: CommitStats = [
            Label::Breaking,
            Label::Feature,
            Label::Feature,
            Label::Fix,
            Label::Other,
            Label::Unset,
            Label::Merge,
        ]
        .into_iter()
        .collect();

        assert_eq!(stats.total_commits, 7);
        assert_eq!(stats.breaking_count, 1);
        assert_eq!(stats.feature_count, 2);
        assert_eq!(stats.fix_count, 1);
        assert_eq!(stats.other_count, 1);
        assert_eq!(stats.unset_count, 1);
        assert_eq!(stats.merge_count, 1);
        assert_eq!(stats.version_altering(), 4);
    }

    #[test]
    fn test_record_does_not_mutate_original() {
        let empty = CommitStats::default();
        let one = empty.record(Label::Fix);
        assert_eq!(empty.total_commits, 0);
        assert_eq!(one.fix_count, 1);
    }

    #[test]
    fn test_no_compliant_commits() {
        let stats: CommitStats = [Label::Unset, Label::Merge].into_iter().collect();
        assert!(stats.has_no_compliant_commits());

        let stats: CommitStats = [Label::Unset, Label::Other].into_iter().collect();
        assert!(!stats.has_no_compliant_commits());

        assert!(!CommitStats::default().has_no_compliant_commits());
    }

    #[test]
    fn test_label_display() {
        assert_eq!(Label::Breaking.to_string(), "breaking");
        assert_eq!(Label::Merge.to_string(), "merge");
    }
}
