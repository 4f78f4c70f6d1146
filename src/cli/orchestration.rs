//! Gate workflow orchestration
//!
//! Two independent validation paths run on every invocation:
//! - the commit-messages path classifies the commits of the change;
//! - the title path checks the PR title and counts it as a pending commit.
//!
//! Each path yields its own `Result`; [`GateRun::verdict`] joins them.

use crate::analyzer::{validate_pr_title, IncludeFilter, Resolution, Resolver};
use crate::config::ClassificationConfig;
use crate::domain::{ParsedCommit, RawCommit, VersionInfo};
use crate::error::{GateError, Result};
use crate::git::Repository;
use crate::output::ReportSink;
use crate::report::{build_message, Report, COMMITS_REPORT_MARKER, TITLE_REPORT_MARKER};

/// Revisions delimiting the change under review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRange {
    /// Base revision (excluded)
    pub base: String,
    /// Head revision (included)
    pub head: String,
}

impl CommitRange {
    pub fn new(base: impl Into<String>, head: impl Into<String>) -> Self {
        CommitRange {
            base: base.into(),
            head: head.into(),
        }
    }
}

/// Result of one successful validation path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathOutcome {
    pub resolution: Resolution,
    pub version: VersionInfo,
    /// Commits listed for the change, before truncation
    pub commit_count: usize,
    pub report: Report,
}

/// Outcome of both validation paths
#[derive(Debug)]
pub struct GateRun {
    /// `None` when no title was supplied
    pub title: Option<Result<PathOutcome>>,
    pub commits: Result<PathOutcome>,
}

impl GateRun {
    /// Version to publish: the title path's when it succeeded, else the commit path's
    pub fn next_version(&self) -> Option<&str> {
        let from_title = self
            .title
            .as_ref()
            .and_then(|r| r.as_ref().ok())
            .map(|o| o.version.next_version.as_str());

        from_title.or_else(|| {
            self.commits
                .as_ref()
                .ok()
                .map(|o| o.version.next_version.as_str())
        })
    }

    /// Fails only when every path that ran failed, joining their messages
    pub fn verdict(&self) -> Result<()> {
        let mut failures = Vec::new();
        let mut ran = 0;

        for path in self.title.iter().chain(std::iter::once(&self.commits)) {
            ran += 1;
            if let Err(e) = path {
                failures.push(e.to_string());
            }
        }

        if !failures.is_empty() && failures.len() == ran {
            return Err(GateError::ValidationFailed(failures.join(" / ")));
        }
        Ok(())
    }
}

/// Fetch, classify and report; shared by both paths
fn evaluate<R: Repository>(
    repo: &R,
    range: &CommitRange,
    cfg: &ClassificationConfig,
    pending_title: Option<&str>,
) -> Result<PathOutcome> {
    let mut commits = repo.list_commits(&range.base, &range.head)?;
    let last_tag = repo.latest_release_tag()?;

    let commit_count = commits.len();
    if commit_count > cfg.commit_limit {
        tracing::warn!(
            commit_count,
            limit = cfg.commit_limit,
            "too many commits, evaluating only the first ones"
        );
        commits.truncate(cfg.commit_limit);
    }

    let mut filter = IncludeFilter::listed(commits.iter().map(|c| c.hash.clone()));
    if let Some(title) = pending_title {
        commits.push(RawCommit::pending(title));
        filter = filter.with_pending();
    }

    let parsed: Vec<ParsedCommit> = commits.iter().map(ParsedCommit::from_raw).collect();
    let resolution = Resolver::new(cfg).resolve(&parsed, &filter);

    let version = VersionInfo::resolve(last_tag.as_deref(), resolution.release_type())?;
    tracing::info!(
        last = version.last_version.as_deref().unwrap_or("none"),
        next = %version.next_version,
        "computed next version"
    );

    let report = build_message(&resolution, &version, commit_count, cfg.commit_limit);

    Ok(PathOutcome {
        resolution,
        version,
        commit_count,
        report,
    })
}

/// Validate the commit messages of the change and publish the commits report
pub fn validate_commit_messages<R, S>(
    repo: &R,
    range: &CommitRange,
    cfg: &ClassificationConfig,
    sink: &mut S,
) -> Result<PathOutcome>
where
    R: Repository,
    S: ReportSink + ?Sized,
{
    let outcome = evaluate(repo, range, cfg, None)?;
    sink.upsert_report(COMMITS_REPORT_MARKER, &outcome.report.text)?;

    if !outcome.report.passed {
        return Err(GateError::NoCompliantCommits);
    }
    Ok(outcome)
}

/// Validate the PR title, then report the version it leads to as a pending commit
pub fn validate_title_path<R, S>(
    title: &str,
    repo: &R,
    range: &CommitRange,
    cfg: &ClassificationConfig,
    sink: &mut S,
) -> Result<PathOutcome>
where
    R: Repository,
    S: ReportSink + ?Sized,
{
    if let Err(e) = validate_pr_title(title, cfg) {
        sink.upsert_report(TITLE_REPORT_MARKER, &format!("### Title\n❌ {}", e))?;
        return Err(e.into());
    }

    let outcome = evaluate(repo, range, cfg, Some(title))?;
    sink.upsert_report(TITLE_REPORT_MARKER, &outcome.report.text)?;

    if !outcome.report.passed {
        return Err(GateError::NoCompliantCommits);
    }
    Ok(outcome)
}

/// Run both validation paths and emit the next version once.
///
/// Path failures are kept in the returned [`GateRun`]; only a failure to emit
/// the version is returned as an error here.
pub fn run_gate<R, S>(
    repo: &R,
    range: &CommitRange,
    title: Option<&str>,
    cfg: &ClassificationConfig,
    sink: &mut S,
) -> Result<GateRun>
where
    R: Repository,
    S: ReportSink + ?Sized,
{
    let title = title.map(|t| validate_title_path(t, repo, range, cfg, sink));
    let commits = validate_commit_messages(repo, range, cfg, sink);

    if let Some(Err(e)) = &title {
        tracing::warn!(error = %e, "title validation failed");
    }
    if let Err(e) = &commits {
        tracing::warn!(error = %e, "commit message validation failed");
    }

    let run = GateRun { title, commits };
    if let Some(version) = run.next_version() {
        sink.emit_version(version)?;
    }
    Ok(run)
}
