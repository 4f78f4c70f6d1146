//! Pull request title validation.
//!
//! The title is parsed like a commit header and checked against the configured
//! types, scopes and subject pattern. Each failed rule has its own error carrying
//! the offending text.

use thiserror::Error;

use crate::config::ClassificationConfig;
use crate::domain::ParsedCommit;

/// Reasons a pull request title is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TitleValidationError {
    #[error(
        "No PR type found in the title \"{title}\". Format the PR title according to the \
         Conventional Commits convention. For example, set the PR title similar to \
         \"fix: fixed the bug 123\"."
    )]
    MissingType { title: String },

    #[error("No subject found in pull request title \"{title}\".")]
    MissingSubject { title: String },

    #[error("Unknown release type \"{commit_type}\" found in pull request title \"{title}\".")]
    UnknownType { commit_type: String, title: String },

    #[error("No scope found in pull request title \"{title}\".{}", scope_hint(.available))]
    MissingScope {
        title: String,
        available: Vec<String>,
    },

    #[error(
        "Unknown {} \"{}\" found in pull request title \"{title}\".{}",
        scope_noun(.scopes),
        join_scopes(.scopes),
        scope_hint(.available)
    )]
    UnknownScope {
        scopes: Vec<String>,
        title: String,
        available: Vec<String>,
    },

    #[error("{message}")]
    SubjectPatternMismatch {
        subject: String,
        title: String,
        message: String,
    },

    #[error("{message}")]
    InexactSubjectMatch {
        subject: String,
        title: String,
        message: String,
    },
}

fn scope_noun(scopes: &[String]) -> &'static str {
    if scopes.len() > 1 {
        "scopes"
    } else {
        "scope"
    }
}

fn join_scopes(scopes: &[String]) -> String {
    scopes.join(",")
}

fn scope_hint(available: &[String]) -> String {
    if available.is_empty() {
        String::new()
    } else {
        format!(" Use one of the available scopes: {}.", available.join(", "))
    }
}

/// Substitute `{subject}` and `{title}` in a user supplied message template
pub fn format_message(template: &str, subject: &str, title: &str) -> String {
    template
        .replace("{subject}", subject)
        .replace("{title}", title)
}

/// Validate a pull request title, returning its parsed form when it complies
pub fn validate_pr_title(
    title: &str,
    cfg: &ClassificationConfig,
) -> Result<ParsedCommit, TitleValidationError> {
    let parsed = ParsedCommit::parse(title);

    let Some(commit_type) = parsed.r#type.clone() else {
        return Err(TitleValidationError::MissingType {
            title: title.to_string(),
        });
    };

    let Some(subject) = parsed.subject.clone() else {
        return Err(TitleValidationError::MissingSubject {
            title: title.to_string(),
        });
    };

    if !cfg.is_recognized_type(&commit_type) {
        return Err(TitleValidationError::UnknownType {
            commit_type,
            title: title.to_string(),
        });
    }

    let available = cfg.recognized_scopes.clone().unwrap_or_default();
    let given_scopes = parsed.scopes();

    if cfg.require_scope && given_scopes.is_empty() {
        return Err(TitleValidationError::MissingScope {
            title: title.to_string(),
            available,
        });
    }

    if let Some(allowed) = &cfg.recognized_scopes {
        let unknown: Vec<String> = given_scopes
            .into_iter()
            .filter(|s| !allowed.contains(s))
            .collect();
        if !unknown.is_empty() {
            return Err(TitleValidationError::UnknownScope {
                scopes: unknown,
                title: title.to_string(),
                available,
            });
        }
    }

    if let Some(pattern) = &cfg.subject_pattern {
        let custom = |default: String| match &cfg.subject_pattern_error {
            Some(template) => format_message(template, &subject, title),
            None => default,
        };

        let matched_len = pattern.find(&subject).map(|m| m.len());
        match matched_len {
            None => {
                return Err(TitleValidationError::SubjectPatternMismatch {
                    message: custom(format!(
                        "The subject \"{}\" found in pull request title \"{}\" doesn't match \
                         the configured pattern \"{}\".",
                        subject,
                        title,
                        pattern.as_str()
                    )),
                    subject,
                    title: title.to_string(),
                });
            }
            Some(len) if len != subject.len() => {
                return Err(TitleValidationError::InexactSubjectMatch {
                    message: custom(format!(
                        "The subject \"{}\" found in pull request title \"{}\" isn't an exact \
                         match for the configured pattern \"{}\". Please provide a subject that \
                         matches the whole pattern exactly.",
                        subject,
                        title,
                        pattern.as_str()
                    )),
                    subject,
                    title: title.to_string(),
                });
            }
            Some(_) => {}
        }
    }

    Ok(parsed)
}
