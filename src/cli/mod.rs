//! Command orchestration for the gate

pub mod orchestration;

pub use orchestration::{
    run_gate, validate_commit_messages, validate_title_path, CommitRange, GateRun, PathOutcome,
};
