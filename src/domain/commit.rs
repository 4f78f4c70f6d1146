use std::sync::OnceLock;

use regex::Regex;

/// Body marker of the synthetic commit standing in for a PR title whose commit is not pushed yet.
pub const PENDING_COMMIT_SENTINEL: &str = "4621fd21-37a6-4dd0-b3f5-a71c28bc2b01";

const BREAKING_KEYWORDS: [&str; 2] = ["BREAKING CHANGE:", "BREAKING-CHANGE:"];

fn header_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\w*)(?:\(([^()]*)\))?(!)?: (.*)$").ok())
        .as_ref()
}

fn footer_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(BREAKING CHANGE|[\w-]+)(?:: | #)(.*)$").ok())
        .as_ref()
}

/// A commit as delivered by the repository host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommit {
    pub hash: String,
    pub message: String,
}

impl RawCommit {
    pub fn new(hash: impl Into<String>, message: impl Into<String>) -> Self {
        RawCommit {
            hash: hash.into(),
            message: message.into(),
        }
    }

    /// Synthetic commit carrying a PR title, marked with [`PENDING_COMMIT_SENTINEL`] as its body
    pub fn pending(title: &str) -> Self {
        RawCommit {
            hash: String::new(),
            message: format!("{}\n\n{}", title, PENDING_COMMIT_SENTINEL),
        }
    }
}

/// A `token: value` trailer from the last paragraph of a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    pub token: String,
    pub value: String,
}

/// Parsed representation of a commit message.
///
/// `r#type == None` marks a message whose header is not `type(scope)!: subject`.
/// Such a message keeps its header in `subject` so it stays readable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    pub hash: String,
    pub header: String,
    pub r#type: Option<String>,
    pub scope: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub footers: Vec<Footer>,
    pub breaking: bool,
}

impl ParsedCommit {
    /// Parse a commit message according to the conventional commits format.
    ///
    /// Supports headers of the shape:
    /// - type(scope)!: subject
    /// - type(scope): subject
    /// - type!: subject
    /// - type: subject
    ///
    /// Anything else yields a record without a type. Parsing never fails.
    pub fn parse(message: &str) -> Self {
        Self::parse_with_hash("", message)
    }

    /// Parse a raw commit, keeping its hash
    pub fn from_raw(raw: &RawCommit) -> Self {
        Self::parse_with_hash(&raw.hash, &raw.message)
    }

    fn parse_with_hash(hash: &str, message: &str) -> Self {
        let message = message.replace("\r\n", "\n");
        let mut lines = message.lines();
        let header = lines.next().unwrap_or_default().to_string();
        let rest: Vec<&str> = lines.collect();

        let (body, footers) = split_body_and_footers(&rest);
        let footer_breaking = rest
            .iter()
            .any(|line| BREAKING_KEYWORDS.iter().any(|k| line.starts_with(k)));

        let mut parsed = ParsedCommit {
            hash: hash.to_string(),
            header: header.clone(),
            r#type: None,
            scope: None,
            subject: non_empty(&header),
            body,
            footers,
            breaking: footer_breaking,
        };

        if let Some(captures) = header_regex().and_then(|re| re.captures(&header)) {
            let r#type = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
            if !r#type.is_empty() {
                parsed.r#type = Some(r#type.to_string());
                parsed.scope = captures.get(2).and_then(|m| non_empty(m.as_str()));
                parsed.subject = captures.get(4).and_then(|m| non_empty(m.as_str()));
                parsed.breaking |= captures.get(3).is_some();
            }
        }

        parsed
    }

    /// Individual scope tokens; `ui, core` yields `["ui", "core"]`
    pub fn scopes(&self) -> Vec<String> {
        self.scope
            .as_deref()
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn split_body_and_footers(lines: &[&str]) -> (Option<String>, Vec<Footer>) {
    let mut paragraphs: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line.trim_end());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    let mut footers = Vec::new();
    let starts_with_footer = paragraphs
        .last()
        .and_then(|p| p.first())
        .is_some_and(|line| footer_regex().is_some_and(|re| re.is_match(line)));

    if starts_with_footer {
        if let Some(trailer) = paragraphs.pop() {
            for line in trailer {
                if let Some(captures) = footer_regex().and_then(|re| re.captures(line)) {
                    footers.push(Footer {
                        token: captures
                            .get(1)
                            .map(|m| m.as_str().to_string())
                            .unwrap_or_default(),
                        value: captures
                            .get(2)
                            .map(|m| m.as_str().trim().to_string())
                            .unwrap_or_default(),
                    });
                } else if let Some(last) = footers.last_mut() {
                    last.value.push('\n');
                    last.value.push_str(line.trim());
                }
            }
        }
    }

    let body = paragraphs
        .iter()
        .map(|p| p.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n");

    (non_empty(&body), footers)
}
