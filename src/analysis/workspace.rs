//! Workspace file discovery for completion candidates and the CLI.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Manifest filename segment stripped from action candidate paths.
static ACTION_MANIFEST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)/action\.ya?ml").expect("manifest pattern"));

/// Workflow definition files under `.github/workflows`, as local-reference
/// display paths anchored at `base`.
pub fn workflow_candidates(base: &Path) -> Vec<String> {
    let mut files = Vec::new();
    collect_yaml_files(&base.join(".github/workflows"), &mut files);
    files.sort();
    files
        .iter()
        .filter_map(|path| relative_display(base, path))
        .collect()
}

/// Action manifests under `.github/actions`, as local-reference display
/// paths with the manifest filename stripped so the candidate names the
/// action's directory.
pub fn action_candidates(base: &Path) -> Vec<String> {
    let mut files = Vec::new();
    collect_yaml_files(&base.join(".github/actions"), &mut files);
    files.sort();
    files
        .iter()
        .filter_map(|path| relative_display(base, path))
        .map(|display| ACTION_MANIFEST.replace(&display, "").into_owned())
        .collect()
}

/// All YAML files under `dir`, for the command-line checker. Dependency and
/// build directories are skipped; hidden directories too, except `.github`
/// itself.
pub fn find_definition_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    visit(dir, &mut files);
    files.sort();
    files
}

fn visit(dir: &Path, files: &mut Vec<PathBuf>) {
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    if (name.starts_with('.') && name != ".github")
                        || name == "node_modules"
                        || name == "target"
                        || name == "dist"
                    {
                        continue;
                    }
                }
                visit(&path, files);
            } else if is_yaml(&path) {
                files.push(path);
            }
        }
    }
}

fn collect_yaml_files(dir: &Path, files: &mut Vec<PathBuf>) {
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                collect_yaml_files(&path, files);
            } else if is_yaml(&path) {
                files.push(path);
            }
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yml" | "yaml")
    )
}

/// Path relative to `base` in local-reference form, forward slashes on
/// every platform.
fn relative_display(base: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(base).ok()?;
    let joined = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");
    Some(format!("./{}", joined))
}
