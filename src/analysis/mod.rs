//! Reference analysis: extraction, classification, and validation of local
//! `uses:` references in workflow and action files.

pub mod config;
pub mod context;
pub mod extract;
pub mod issue;
pub mod reference;
pub mod validate;
pub mod workspace;
pub mod yaml;

pub use config::Settings;
pub use context::classify;
pub use extract::{extract_from_source, extract_references};
pub use issue::{FileReport, Issue, Severity};
pub use reference::{RefKind, Span, UsesReference};
pub use validate::{base_dir, validate, validate_in, Validation};
