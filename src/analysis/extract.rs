//! Reference extraction: two independent passes over a parsed document.

use tree_sitter::{Node, Tree};

use super::reference::{
    self, RefKind, Span, UsesReference, COMPOSITE, JOBS, RUNS, STEPS, USES, USING,
};
use super::yaml;

/// Extract every local `uses:` reference from `source`.
///
/// Returns an empty list when the document cannot be parsed at all; there is
/// nothing to validate in that case.
pub fn extract_from_source(source: &str) -> Vec<UsesReference> {
    match yaml::parse(source) {
        Ok(tree) => extract_references(&tree, source),
        Err(_) => Vec::new(),
    }
}

/// Extract references from an already-parsed tree.
///
/// The workflow pass reads `jobs`; the action pass reads `runs`. Both run on
/// every document, since nothing in the format declares which kind a file is.
/// Output order is stable: jobs in document order, each job's own `uses`
/// before its steps, then composite steps.
pub fn extract_references(tree: &Tree, source: &str) -> Vec<UsesReference> {
    let Some(root) = yaml::document_root(tree) else {
        return Vec::new();
    };
    let mut refs = extract_from_jobs(root, source);
    refs.extend(extract_from_runs(root, source));
    refs
}

fn extract_from_jobs(root: Node<'_>, source: &str) -> Vec<UsesReference> {
    let mut refs = Vec::new();
    let Some(jobs) = yaml::mapping_get(root, source, JOBS) else {
        return refs;
    };

    for pair in yaml::mapping_pairs(yaml::unwrap_node(jobs)) {
        let Some(job) = yaml::pair_value(pair) else {
            continue;
        };
        let job = yaml::unwrap_node(job);

        // A job-level uses points at another workflow file.
        if let Some(value) = yaml::mapping_get(job, source, USES) {
            push_local(&mut refs, value, RefKind::Workflow, source);
        }

        if let Some(steps) = yaml::mapping_get(job, source, STEPS) {
            extract_steps(yaml::unwrap_node(steps), source, &mut refs);
        }
    }
    refs
}

fn extract_from_runs(root: Node<'_>, source: &str) -> Vec<UsesReference> {
    let mut refs = Vec::new();
    let Some(runs) = yaml::mapping_get(root, source, RUNS) else {
        return refs;
    };
    let runs = yaml::unwrap_node(runs);

    // Only composite actions have steps of their own.
    let composite = yaml::mapping_get(runs, source, USING)
        .and_then(|node| yaml::scalar_value(node, source))
        .map_or(false, |(text, _)| text == COMPOSITE);
    if !composite {
        return refs;
    }

    if let Some(steps) = yaml::mapping_get(runs, source, STEPS) {
        extract_steps(yaml::unwrap_node(steps), source, &mut refs);
    }
    refs
}

fn extract_steps(steps: Node<'_>, source: &str, refs: &mut Vec<UsesReference>) {
    for step in yaml::sequence_items(steps) {
        if let Some(value) = yaml::mapping_get(step, source, USES) {
            push_local(refs, value, RefKind::Action, source);
        }
    }
}

fn push_local(refs: &mut Vec<UsesReference>, value: Node<'_>, kind: RefKind, source: &str) {
    if let Some((content, span)) = yaml::scalar_value(value, source) {
        if reference::is_local(&content) {
            refs.push(UsesReference::new(content, kind, normalize_span(span)));
        }
    }
}

/// A node with a degenerate range degrades to a top-of-document point span.
fn normalize_span(span: Span) -> Span {
    if span.end > span.start {
        span
    } else {
        Span::default()
    }
}
