//! Analysis engine: commit classification, release resolution and title rules

pub mod classifier;
pub mod resolver;
pub mod title;

pub use classifier::{classify, collect_stats};
pub use resolver::{IncludeFilter, Recommendation, Resolution, Resolver};
pub use title::{validate_pr_title, TitleValidationError};
