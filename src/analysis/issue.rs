//! Validation issues and terminal reporting.

use colored::*;
use std::fmt;
use std::path::{Path, PathBuf};

use super::reference::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "{}", "error".red().bold()),
            Severity::Warning => write!(f, "{}", "warning".yellow().bold()),
        }
    }
}

/// One diagnostic produced by validation, anchored to a source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub severity: Severity,
    pub message: String,
    pub span: Span,
}

impl Issue {
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            span,
        }
    }

    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            span,
        }
    }

    /// Render with location and an annotated source line.
    pub fn format(&self, file: &Path, source: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}: {}\n", self.severity, self.message.bold()));

        let (line, col) = line_col(source, self.span.start);
        output.push_str(&format!(
            "  {} {}:{}:{}\n",
            "-->".blue().bold(),
            file.display(),
            line,
            col
        ));

        if let Some(line_text) = source.lines().nth(line - 1) {
            let width = line.to_string().len();
            output.push_str(&format!(
                "{:>width$} {} {}\n",
                line.to_string().blue().bold(),
                "|".blue().bold(),
                line_text,
                width = width
            ));

            let pointer_len = (self.span.end - self.span.start).max(1);
            output.push_str(&format!(
                "{:>width$} {} {}{}\n",
                "",
                "|".blue().bold(),
                " ".repeat(col - 1),
                "^".repeat(pointer_len).red().bold(),
                width = width
            ));
        }

        output
    }
}

/// 1-indexed line and column of a byte offset.
fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let line = source[..offset].matches('\n').count() + 1;
    let line_start = source[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    (line, offset - line_start + 1)
}

/// Issues found in one file, for the command-line report.
#[derive(Debug, Default)]
pub struct FileReport {
    pub path: PathBuf,
    pub issues: Vec<Issue>,
}

impl FileReport {
    pub fn new(path: impl Into<PathBuf>, issues: Vec<Issue>) -> Self {
        Self {
            path: path.into(),
            issues,
        }
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn print(&self, source: &str) {
        for issue in &self.issues {
            println!("{}", issue.format(&self.path, source));
        }
    }
}
