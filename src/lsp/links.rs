//! Document links for resolved references.

use std::path::PathBuf;
use tower_lsp::lsp_types::{DocumentLink, Url};

use super::position::LineIndex;
use crate::analysis::UsesReference;

/// Build one clickable link per resolved reference.
///
/// `resolutions` is the validator's index-aligned output; unresolved entries
/// produce no link, resolved ones link straight to the target file.
pub fn document_links(
    refs: &[UsesReference],
    resolutions: &[Option<PathBuf>],
    index: &LineIndex,
    source: &str,
) -> Vec<DocumentLink> {
    let mut links = Vec::new();

    for (reference, resolution) in refs.iter().zip(resolutions) {
        let Some(target) = resolution else {
            continue;
        };
        let Ok(uri) = Url::from_file_path(target) else {
            continue;
        };
        links.push(DocumentLink {
            range: index.span_to_range(reference.span, source),
            target: Some(uri),
            tooltip: None,
            data: None,
        });
    }

    links
}
