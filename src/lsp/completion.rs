//! Completion for local `uses:` reference values.
//!
//! Candidates come from the workspace: workflow files for job-level
//! references, action directories for step-level ones. The structural
//! context decides which set applies.

use std::path::Path;
use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, CompletionTextEdit, Position, Range, TextEdit,
};

use super::position::{byte_offset_to_utf16, utf16_to_byte_offset};
use crate::analysis::reference::USES;
use crate::analysis::{classify, reference, workspace, RefKind};

/// Candidate list cache keyed by (document, line).
///
/// Repeated completion requests at the same cursor line reuse the last file
/// listing; any change of document or line invalidates it. Purely an
/// optimization, correctness never depends on a hit.
#[derive(Debug, Default)]
pub struct CandidateCache {
    key: Option<(String, u32)>,
    files: Vec<String>,
}

impl CandidateCache {
    pub fn lookup_or_fill(
        &mut self,
        uri: &str,
        line: u32,
        fill: impl FnOnce() -> Vec<String>,
    ) -> &[String] {
        let hit = self
            .key
            .as_ref()
            .map_or(false, |(cached_uri, cached_line)| {
                cached_uri == uri && *cached_line == line
            });
        if !hit {
            self.files = fill();
            self.key = Some((uri.to_string(), line));
        }
        &self.files
    }

    pub fn clear(&mut self) {
        self.key = None;
        self.files.clear();
    }
}

/// Provide completion items for the cursor position.
pub fn complete_at(
    source: &str,
    position: Position,
    base: &Path,
    uri: &str,
    cache: &mut CandidateCache,
) -> Vec<CompletionItem> {
    let line_text = source.lines().nth(position.line as usize).unwrap_or("");

    // Only the reference key itself gets path completion.
    let key = line_text.trim().split(':').next().unwrap_or("").trim();
    if key != USES {
        return Vec::new();
    }

    let cursor_byte = utf16_to_byte_offset(line_text, position.character);
    let current = line_text[..cursor_byte]
        .split(':')
        .nth(1)
        .map(str::trim_start)
        .unwrap_or("");

    // A longer value that is not locally prefixed is a registry reference.
    if current.len() > 2 && !reference::is_local(current) {
        return Vec::new();
    }

    let Some(kind) = classify(source, position.line as usize) else {
        cache.clear();
        return Vec::new();
    };

    let files = cache
        .lookup_or_fill(uri, position.line, || match kind {
            RefKind::Workflow => workspace::workflow_candidates(base),
            RefKind::Action => workspace::action_candidates(base),
        })
        .to_vec();

    // Accepting a candidate replaces the whole typed value to end of line.
    let value_start = cursor_byte - current.len();
    let range = Range {
        start: Position {
            line: position.line,
            character: byte_offset_to_utf16(line_text, value_start),
        },
        end: Position {
            line: position.line,
            character: byte_offset_to_utf16(line_text, line_text.len()),
        },
    };

    files
        .iter()
        .filter(|file| file.starts_with(current))
        .map(|file| {
            let detail = match kind {
                RefKind::Workflow => format!("Local workflow `{}`", file_stem(file)),
                RefKind::Action => format!("Local action `{}`", base_name(file)),
            };
            CompletionItem {
                label: file.clone(),
                kind: Some(CompletionItemKind::FILE),
                detail: Some(detail),
                text_edit: Some(CompletionTextEdit::Edit(TextEdit {
                    range,
                    new_text: file.clone(),
                })),
                ..Default::default()
            }
        })
        .collect()
}

/// Final path segment.
fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Final path segment with its extension stripped.
fn file_stem(path: &str) -> &str {
    let name = base_name(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}
