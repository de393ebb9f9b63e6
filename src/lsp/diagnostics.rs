//! Conversion from validation issues to LSP diagnostics.

use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity};

use super::position::LineIndex;
use crate::analysis::{Issue, Severity};

/// Diagnostic source shown next to each message in the editor.
pub const DIAGNOSTIC_SOURCE: &str = "local-actions";

/// Convert a validation issue to an LSP Diagnostic.
pub fn issue_to_diagnostic(issue: &Issue, index: &LineIndex, source: &str) -> Diagnostic {
    let severity = match issue.severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
    };

    Diagnostic {
        range: index.span_to_range(issue.span, source),
        severity: Some(severity),
        source: Some(DIAGNOSTIC_SOURCE.to_string()),
        message: issue.message.clone(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Span;

    #[test]
    fn test_issue_to_diagnostic() {
        let source = "jobs:\n  build:\n    steps:\n      - uses: ./missing\n";
        let start = source.find("./missing").unwrap();
        let issue = Issue::error(
            "The referenced local action \"./missing\" does not exist.",
            Span::new(start, start + "./missing".len()),
        );

        let index = LineIndex::new(source);
        let diagnostic = issue_to_diagnostic(&issue, &index, source);

        assert_eq!(diagnostic.severity, Some(DiagnosticSeverity::ERROR));
        assert_eq!(diagnostic.source, Some("local-actions".to_string()));
        assert!(diagnostic.message.contains("does not exist"));
        assert_eq!(diagnostic.range.start.line, 3);
        assert_eq!(diagnostic.range.start.character, 14);
        assert_eq!(diagnostic.range.end.character, 23);
    }
}
