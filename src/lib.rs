//! Editor support for local GitHub Actions `uses:` references.
//!
//! The [`analysis`] layer extracts local workflow and action references from
//! Actions YAML and validates them against the repository tree. The [`lsp`]
//! layer serves document links, diagnostics, and path completion for those
//! references over the Language Server Protocol.

pub mod analysis;
pub mod lsp;
