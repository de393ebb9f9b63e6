//! Path resolution and placement/existence validation for extracted
//! references.

use std::path::{Path, PathBuf};

use super::config::Settings;
use super::issue::Issue;
use super::reference::{RefKind, UsesReference};

/// Outcome of one validation pass over a document's references.
///
/// `resolutions` is index-aligned with the input references; an entry is
/// `Some` only when the target actually exists on disk. Reference records
/// themselves stay immutable.
#[derive(Debug, Default)]
pub struct Validation {
    pub issues: Vec<Issue>,
    pub resolutions: Vec<Option<PathBuf>>,
}

/// Locate the base directory for resolving local references: the parent of
/// the nearest `.github` ancestor of the document.
pub fn base_dir(document_path: &Path) -> Option<PathBuf> {
    document_path
        .ancestors()
        .find(|p| p.file_name().map_or(false, |name| name == ".github"))
        .and_then(Path::parent)
        .map(Path::to_path_buf)
}

/// Validate `refs` for the document at `document_path`.
///
/// Returns `None` when no base directory can be determined; the caller then
/// leaves diagnostics untouched and produces no links. Diagnostic emission
/// and resolution are independent: the settings toggles only suppress
/// messages, a reference still resolves exactly when its target exists.
pub fn validate(
    document_path: &Path,
    refs: &[UsesReference],
    settings: &Settings,
) -> Option<Validation> {
    let base = base_dir(document_path)?;
    Some(validate_in(&base, refs, settings))
}

/// Validation pass against an explicit base directory.
pub fn validate_in(base: &Path, refs: &[UsesReference], settings: &Settings) -> Validation {
    let mut issues = Vec::new();
    let mut resolutions: Vec<Option<PathBuf>> = vec![None; refs.len()];

    for (index, reference) in refs.iter().enumerate() {
        let mut candidate = base.join(&reference.content);
        let mut exists = false;

        if reference.kind == RefKind::Action {
            // An action reference names a directory; the manifest inside it
            // is action.yml, with action.yaml as the only fallback.
            candidate = candidate.join("action.yml");
            exists = candidate.exists();
            if !exists {
                candidate = candidate.with_file_name("action.yaml");
            }
        }

        if settings.file_placement_errors {
            if let Some(issue) = placement_issue(reference) {
                issues.push(issue);
            }
        }

        if !exists && !candidate.exists() {
            if settings.file_exist_errors {
                issues.push(Issue::error(
                    format!(
                        "The referenced local {} \"{}\" does not exist.",
                        reference.kind, reference.content
                    ),
                    reference.span,
                ));
            }
            continue;
        }

        resolutions[index] = Some(candidate);
    }

    Validation {
        issues,
        resolutions,
    }
}

/// Placement checks run on the reference text itself, independent of
/// whether the target exists.
fn placement_issue(reference: &UsesReference) -> Option<Issue> {
    match reference.kind {
        RefKind::Action if reference.content.contains(".github/workflows/") => {
            Some(Issue::error(
                format!(
                    "The referenced local action \"{}\" is under `.github/workflows`. \
                     Consider storing local actions under `.github/actions` or another \
                     folder outside of `.github/workflows.`",
                    reference.content
                ),
                reference.span,
            ))
        }
        RefKind::Workflow if reference.content.contains(".github/actions/") => {
            Some(Issue::error(
                format!(
                    "The referenced local workflow \"{}\" is under `.github/actions`. \
                     Consider storing local workflows under `.github/workflows`.",
                    reference.content
                ),
                reference.span,
            ))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::reference::Span;
    use std::fs;
    use tempfile::TempDir;

    fn action_ref(content: &str) -> UsesReference {
        UsesReference::new(content, RefKind::Action, Span::new(10, 10 + content.len()))
    }

    fn workflow_ref(content: &str) -> UsesReference {
        UsesReference::new(content, RefKind::Workflow, Span::new(10, 10 + content.len()))
    }

    #[test]
    fn test_base_dir_found_above_workflows() {
        let doc = Path::new("/repo/.github/workflows/ci.yml");
        assert_eq!(base_dir(doc), Some(PathBuf::from("/repo")));
    }

    #[test]
    fn test_base_dir_missing() {
        assert_eq!(base_dir(Path::new("/somewhere/else/ci.yml")), None);
        assert_eq!(base_dir(Path::new("ci.yml")), None);
    }

    #[test]
    fn test_validate_aborts_without_base_dir() {
        let refs = vec![action_ref("./x")];
        assert!(validate(Path::new("/no/marker/ci.yml"), &refs, &Settings::default()).is_none());
    }

    #[test]
    fn test_action_resolves_via_manifest() {
        let temp = TempDir::new().unwrap();
        let action_dir = temp.path().join("local-action");
        fs::create_dir_all(&action_dir).unwrap();
        fs::write(action_dir.join("action.yml"), "name: test\n").unwrap();

        let refs = vec![action_ref("./local-action")];
        let result = validate_in(temp.path(), &refs, &Settings::default());

        assert!(result.issues.is_empty());
        assert_eq!(
            result.resolutions[0],
            Some(action_dir.join("action.yml"))
        );
    }

    #[test]
    fn test_action_falls_back_to_yaml_manifest() {
        let temp = TempDir::new().unwrap();
        let action_dir = temp.path().join("local-action");
        fs::create_dir_all(&action_dir).unwrap();
        fs::write(action_dir.join("action.yaml"), "name: test\n").unwrap();

        let refs = vec![action_ref("./local-action")];
        let result = validate_in(temp.path(), &refs, &Settings::default());

        assert!(result.issues.is_empty());
        assert_eq!(
            result.resolutions[0],
            Some(action_dir.join("action.yaml"))
        );
    }

    #[test]
    fn test_missing_action_reports_and_stays_unresolved() {
        let temp = TempDir::new().unwrap();

        let refs = vec![action_ref("./local-action")];
        let result = validate_in(temp.path(), &refs, &Settings::default());

        assert_eq!(result.issues.len(), 1);
        assert!(result.issues[0].message.contains("does not exist"));
        assert!(result.issues[0]
            .message
            .contains("local action \"./local-action\""));
        assert_eq!(result.resolutions[0], None);
    }

    #[test]
    fn test_workflow_resolves_to_file() {
        let temp = TempDir::new().unwrap();
        let workflows = temp.path().join(".github/workflows");
        fs::create_dir_all(&workflows).unwrap();
        fs::write(workflows.join("deploy.yml"), "jobs: {}\n").unwrap();

        let refs = vec![workflow_ref("./.github/workflows/deploy.yml")];
        let result = validate_in(temp.path(), &refs, &Settings::default());

        assert!(result.issues.is_empty());
        assert_eq!(result.resolutions[0], Some(workflows.join("deploy.yml")));
    }

    #[test]
    fn test_action_under_workflows_gets_placement_issue() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".github/workflows/helper");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("action.yml"), "name: helper\n").unwrap();

        let refs = vec![action_ref("./.github/workflows/helper")];
        let result = validate_in(temp.path(), &refs, &Settings::default());

        // Misplaced but existing: the placement issue fires and the
        // reference still resolves.
        assert_eq!(result.issues.len(), 1);
        assert!(result.issues[0].message.contains("`.github/workflows`"));
        assert_eq!(result.resolutions[0], Some(dir.join("action.yml")));
    }

    #[test]
    fn test_workflow_under_actions_gets_placement_issue() {
        let temp = TempDir::new().unwrap();

        let refs = vec![workflow_ref("./.github/actions/deploy.yml")];
        let result = validate_in(temp.path(), &refs, &Settings::default());

        // Missing and misplaced: both diagnostics, placement first.
        assert_eq!(result.issues.len(), 2);
        assert!(result.issues[0].message.contains("`.github/actions`"));
        assert!(result.issues[1].message.contains("does not exist"));
        assert_eq!(result.resolutions[0], None);
    }

    #[test]
    fn test_exist_toggle_suppresses_message_not_resolution() {
        let temp = TempDir::new().unwrap();

        let settings = Settings {
            file_exist_errors: false,
            ..Settings::default()
        };
        let refs = vec![action_ref("./local-action")];
        let result = validate_in(temp.path(), &refs, &settings);

        assert!(result.issues.is_empty());
        assert_eq!(result.resolutions[0], None);
    }

    #[test]
    fn test_placement_toggle_suppresses_placement_only() {
        let temp = TempDir::new().unwrap();

        let settings = Settings {
            file_placement_errors: false,
            ..Settings::default()
        };
        let refs = vec![workflow_ref("./.github/actions/deploy.yml")];
        let result = validate_in(temp.path(), &refs, &settings);

        assert_eq!(result.issues.len(), 1);
        assert!(result.issues[0].message.contains("does not exist"));
    }

    #[test]
    fn test_validation_is_repeatable() {
        let temp = TempDir::new().unwrap();
        let action_dir = temp.path().join("ok-action");
        fs::create_dir_all(&action_dir).unwrap();
        fs::write(action_dir.join("action.yml"), "name: ok\n").unwrap();

        let refs = vec![action_ref("./ok-action"), action_ref("./gone")];
        let first = validate_in(temp.path(), &refs, &Settings::default());
        let second = validate_in(temp.path(), &refs, &Settings::default());

        assert_eq!(first.issues, second.issues);
        assert_eq!(first.resolutions, second.resolutions);
    }

    #[test]
    fn test_one_bad_reference_does_not_block_others() {
        let temp = TempDir::new().unwrap();
        let action_dir = temp.path().join("good");
        fs::create_dir_all(&action_dir).unwrap();
        fs::write(action_dir.join("action.yml"), "name: good\n").unwrap();

        let refs = vec![action_ref("./missing"), action_ref("./good")];
        let result = validate_in(temp.path(), &refs, &Settings::default());

        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.resolutions[0], None);
        assert_eq!(result.resolutions[1], Some(action_dir.join("action.yml")));
    }

    #[test]
    fn test_parent_relative_reference() {
        let temp = TempDir::new().unwrap();
        let action_dir = temp.path().join("shared");
        fs::create_dir_all(&action_dir).unwrap();
        fs::write(action_dir.join("action.yml"), "name: shared\n").unwrap();

        // Base joins resolve `..` through the filesystem.
        let refs = vec![action_ref("./sub/../shared")];
        fs::create_dir_all(temp.path().join("sub")).unwrap();
        let result = validate_in(temp.path(), &refs, &Settings::default());

        assert!(result.issues.is_empty());
        assert!(result.resolutions[0].is_some());
    }
}
