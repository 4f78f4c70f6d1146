//! Destinations for reports and the recommended version.
//!
//! A report is identified by its marker: upserting removes any earlier report with
//! the same marker before the new one is written, so one live report exists per marker.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{GateError, Result};
use crate::ui;

/// Receives the gate's reports and version output
pub trait ReportSink {
    /// Replace the report carrying `marker` with `text`
    fn upsert_report(&mut self, marker: &str, text: &str) -> Result<()>;

    /// Publish the recommended next version for downstream automation
    fn emit_version(&mut self, version: &str) -> Result<()>;
}

fn is_marker_line(line: &str) -> bool {
    let line = line.trim();
    line.starts_with("<!--") && line.ends_with("-->")
}

/// Markdown file holding one section per report marker
#[derive(Debug, Clone)]
pub struct ReportFile {
    path: PathBuf,
}

impl ReportFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ReportFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_sections(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let mut sections: Vec<Vec<&str>> = Vec::new();
        for line in content.lines() {
            if is_marker_line(line) || sections.is_empty() {
                sections.push(vec![line]);
            } else if let Some(section) = sections.last_mut() {
                section.push(line);
            }
        }

        Ok(sections
            .into_iter()
            .map(|lines| lines.join("\n").trim_end().to_string())
            .filter(|s| !s.is_empty())
            .collect())
    }
}

impl ReportSink for ReportFile {
    fn upsert_report(&mut self, marker: &str, text: &str) -> Result<()> {
        let mut sections = self.read_sections()?;
        let before = sections.len();
        sections.retain(|s| s.lines().next().map(str::trim) != Some(marker));
        if sections.len() != before {
            tracing::debug!(marker, path = %self.path.display(), "removed previous report");
        }

        sections.push(format!("{}\n{}", marker, text.trim_end()));
        fs::write(&self.path, sections.join("\n\n") + "\n")?;
        Ok(())
    }

    fn emit_version(&mut self, _version: &str) -> Result<()> {
        Ok(())
    }
}

/// Appends `version=<v>` to a GitHub Actions output file
#[derive(Debug, Clone)]
pub struct GithubOutput {
    path: PathBuf,
}

impl GithubOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        GithubOutput { path: path.into() }
    }

    /// Use the file named by `GITHUB_OUTPUT`, when set
    pub fn from_env() -> Option<Self> {
        std::env::var_os("GITHUB_OUTPUT")
            .filter(|v| !v.is_empty())
            .map(Self::new)
    }
}

impl ReportSink for GithubOutput {
    fn upsert_report(&mut self, _marker: &str, _text: &str) -> Result<()> {
        Ok(())
    }

    fn emit_version(&mut self, version: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                GateError::output(format!("Cannot open {}: {}", self.path.display(), e))
            })?;
        writeln!(file, "version={}", version)?;
        Ok(())
    }
}

/// Prints reports and the version to the terminal
#[derive(Debug, Clone, Default)]
pub struct ConsoleSink;

impl ReportSink for ConsoleSink {
    fn upsert_report(&mut self, _marker: &str, text: &str) -> Result<()> {
        ui::display_report(text);
        Ok(())
    }

    fn emit_version(&mut self, version: &str) -> Result<()> {
        ui::display_success(&format!("Next version: {}", version));
        Ok(())
    }
}

/// Records everything it receives
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    pub reports: Vec<(String, String)>,
    pub versions: Vec<String>,
}

impl MemorySink {
    pub fn report(&self, marker: &str) -> Option<&str> {
        self.reports
            .iter()
            .find(|(m, _)| m == marker)
            .map(|(_, text)| text.as_str())
    }
}

impl ReportSink for MemorySink {
    fn upsert_report(&mut self, marker: &str, text: &str) -> Result<()> {
        self.reports.retain(|(m, _)| m != marker);
        self.reports.push((marker.to_string(), text.to_string()));
        Ok(())
    }

    fn emit_version(&mut self, version: &str) -> Result<()> {
        self.versions.push(version.to_string());
        Ok(())
    }
}

/// Fans every call out to several sinks
#[derive(Default)]
pub struct Sinks {
    sinks: Vec<Box<dyn ReportSink>>,
}

impl Sinks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sink: impl ReportSink + 'static) {
        self.sinks.push(Box::new(sink));
    }
}

impl ReportSink for Sinks {
    fn upsert_report(&mut self, marker: &str, text: &str) -> Result<()> {
        for sink in &mut self.sinks {
            sink.upsert_report(marker, text)?;
        }
        Ok(())
    }

    fn emit_version(&mut self, version: &str) -> Result<()> {
        for sink in &mut self.sinks {
            sink.emit_version(version)?;
        }
        Ok(())
    }
}
