//! Structural context classification for cursor positions.
//!
//! Completion needs to know whether a cursor sits inside a job-step list,
//! a composite action's step list, or a bare job body. Rebuilding a full
//! tree per keystroke is unnecessary: the only nesting shapes of interest
//! are reconstructible from a single backward scan over indentation deltas.

use super::reference::{RefKind, ENV, JOBS, RUNS, STEPS, WITH};

/// Classify the structural context enclosing `line`.
///
/// Scans strictly upward from the cursor line, only considering lines with
/// smaller indentation than the innermost one seen so far. A `with:` or
/// `env:` ancestor disqualifies the position outright; otherwise the flags
/// gathered on the way up are settled by the `jobs:` or `runs:` line at
/// indentation zero.
pub fn classify(source: &str, line: usize) -> Option<RefKind> {
    let lines: Vec<&str> = source.lines().collect();
    let mut current_indent = lines.get(line).map(|l| indent_of(l)).unwrap_or(0);

    let mut inside_job = false;
    let mut inside_steps = false;

    for idx in (0..line.min(lines.len())).rev() {
        let text = lines[idx];
        let trimmed = text.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let indent = indent_of(text);
        if indent >= current_indent {
            continue;
        }

        let (key, value) = parse_key_value(trimmed);

        if key == Some(WITH) || key == Some(ENV) {
            return None;
        }

        if key == Some(STEPS) && is_sequence_start(value) {
            inside_steps = true;
            current_indent = indent;
            continue;
        }

        // An indented bare key with no value is a candidate job name; the
        // top-level line below decides whether it actually was one.
        if let Some(key) = key {
            if indent > 0 && value.is_none() && !key.contains(' ') {
                inside_job = true;
                current_indent = indent;
                continue;
            }
        }

        if indent == 0 {
            match key {
                Some(k) if k == JOBS => {
                    if inside_steps {
                        return Some(RefKind::Action);
                    }
                    if inside_job {
                        return Some(RefKind::Workflow);
                    }
                }
                Some(k) if k == RUNS => {
                    if inside_steps {
                        return Some(RefKind::Action);
                    }
                }
                _ => {}
            }
        }

        current_indent = indent;
    }

    None
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Split a trimmed line at the first colon. A line without one has no key;
/// an empty remainder means the key has no value.
fn parse_key_value(trimmed: &str) -> (Option<&str>, Option<&str>) {
    match trimmed.split_once(':') {
        Some((key, rest)) => {
            let value = rest.trim();
            (
                Some(key.trim()),
                if value.is_empty() { None } else { Some(value) },
            )
        }
        None => (None, None),
    }
}

fn is_sequence_start(value: Option<&str>) -> bool {
    matches!(value, None | Some("[]"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_of(source: &str, needle: &str) -> usize {
        source
            .lines()
            .position(|l| l.contains(needle))
            .expect("needle present")
    }

    #[test]
    fn test_step_in_job_is_action_context() {
        let source = r#"name: CI
jobs:
  build:
    runs-on: ubuntu-latest
    steps:
      - name: checkout
        uses: ./here
"#;
        let line = line_of(source, "uses: ./here");
        assert_eq!(classify(source, line), Some(RefKind::Action));
    }

    #[test]
    fn test_job_level_is_workflow_context() {
        let source = r#"jobs:
  deploy:
    uses: ./here
"#;
        let line = line_of(source, "uses: ./here");
        assert_eq!(classify(source, line), Some(RefKind::Workflow));
    }

    #[test]
    fn test_composite_steps_are_action_context() {
        let source = r#"name: my action
runs:
  using: composite
  steps:
    - uses: ./here
"#;
        let line = line_of(source, "uses: ./here");
        assert_eq!(classify(source, line), Some(RefKind::Action));
    }

    #[test]
    fn test_with_block_disqualifies() {
        let source = r#"jobs:
  build:
    steps:
      - uses: ./action
        with:
          uses: ./here
"#;
        let line = line_of(source, "uses: ./here");
        assert_eq!(classify(source, line), None);
    }

    #[test]
    fn test_env_block_disqualifies() {
        let source = r#"jobs:
  build:
    steps:
      - run: make
        env:
          USES: ./here
"#;
        let line = line_of(source, "USES: ./here");
        assert_eq!(classify(source, line), None);
    }

    #[test]
    fn test_runs_without_steps_is_no_context() {
        let source = r#"runs:
  using: node20
  main: ./here
"#;
        let line = line_of(source, "main: ./here");
        assert_eq!(classify(source, line), None);
    }

    #[test]
    fn test_top_of_document_is_no_context() {
        let source = "uses: ./here\n";
        assert_eq!(classify(source, 0), None);
    }

    #[test]
    fn test_blank_lines_and_comments_are_skipped() {
        let source = r#"jobs:

  # the only job
  build:

    steps:
      # checkout first
      - uses: ./here
"#;
        let line = line_of(source, "uses: ./here");
        assert_eq!(classify(source, line), Some(RefKind::Action));
    }

    #[test]
    fn test_empty_flow_sequence_counts_as_steps() {
        // The steps line itself opens a sequence even when written as [].
        let source = "jobs:\n  build:\n    steps: []\n      - uses: ./here\n";
        let line = 3;
        assert_eq!(classify(source, line), Some(RefKind::Action));
    }

    #[test]
    fn test_unrelated_top_level_section_is_no_context() {
        let source = r#"defaults:
  run:
    shell: ./here
"#;
        let line = line_of(source, "shell: ./here");
        assert_eq!(classify(source, line), None);
    }

    #[test]
    fn test_line_beyond_document_is_no_context() {
        assert_eq!(classify("jobs:\n", 99), None);
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(parse_key_value("steps:"), (Some("steps"), None));
        assert_eq!(
            parse_key_value("uses: ./action"),
            (Some("uses"), Some("./action"))
        );
        assert_eq!(parse_key_value("- ./plain"), (None, None));
        assert_eq!(parse_key_value("steps: []"), (Some("steps"), Some("[]")));
    }
}
