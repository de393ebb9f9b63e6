//! Core data types for local `uses:` references.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

pub const JOBS: &str = "jobs";
pub const STEPS: &str = "steps";
pub const USES: &str = "uses";
pub const RUNS: &str = "runs";
pub const USING: &str = "using";
pub const WITH: &str = "with";
pub const ENV: &str = "env";
pub const COMPOSITE: &str = "composite";

/// Matches values pointing into the same repository (`./...` or `../...`).
/// Anything else is a registry reference and invisible to this tool.
pub static LOCAL_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\.{1,2}/").expect("local reference pattern"));

/// Whether a `uses:` value is a local file reference.
pub fn is_local(value: &str) -> bool {
    LOCAL_REF.is_match(value)
}

/// Byte range of a value in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// What a local reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    /// A job-level reference to another workflow file.
    Workflow,
    /// A step-level reference to an action directory.
    Action,
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RefKind::Workflow => write!(f, "workflow"),
            RefKind::Action => write!(f, "action"),
        }
    }
}

/// One local `uses:` reference discovered in a document.
///
/// Records are immutable after extraction; resolution results live in a
/// separate index-aligned list owned by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsesReference {
    /// The raw reference value as written, quotes stripped.
    pub content: String,
    pub kind: RefKind,
    /// Source range of the scalar value, quotes included.
    pub span: Span,
}

impl UsesReference {
    pub fn new(content: impl Into<String>, kind: RefKind, span: Span) -> Self {
        Self {
            content: content.into(),
            kind,
            span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_local() {
        assert!(is_local("./my-action"));
        assert!(is_local("../shared/action"));
        assert!(is_local("./.github/workflows/ci.yml"));

        assert!(!is_local("actions/checkout@v4"));
        assert!(!is_local("octo-org/repo/.github/workflows/ci.yml@main"));
        assert!(!is_local(".github/workflows/ci.yml"));
        assert!(!is_local(".../deep"));
        assert!(!is_local(""));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(RefKind::Workflow.to_string(), "workflow");
        assert_eq!(RefKind::Action.to_string(), "action");
    }
}
