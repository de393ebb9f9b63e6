//! YAML document access on top of tree-sitter.
//!
//! The extractor needs source spans for every value it reports, so documents
//! are parsed into a concrete syntax tree rather than a serde value. These
//! helpers cover the few tree shapes the extractor navigates: mappings,
//! sequences, and inline scalars, in both block and flow form.

use thiserror::Error;
use tree_sitter::{Language, Node, Parser, Tree};

use super::reference::Span;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to load YAML grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    #[error("parser produced no tree")]
    Empty,
}

/// Parse YAML source into a tree-sitter tree.
pub fn parse(source: &str) -> Result<Tree, ParseError> {
    let mut parser = Parser::new();
    let language: Language = tree_sitter_yaml::LANGUAGE.into();
    parser.set_language(&language)?;
    parser.parse(source, None).ok_or(ParseError::Empty)
}

/// Content node of the first document in the stream, unwrapped.
///
/// Multi-document streams are possible in YAML; only the first document is
/// considered, matching how these files are consumed.
pub fn document_root(tree: &Tree) -> Option<Node<'_>> {
    let stream = tree.root_node();
    let mut cursor = stream.walk();
    for child in stream.children(&mut cursor) {
        if child.kind() == "document" {
            let mut inner_cursor = child.walk();
            for inner in child.children(&mut inner_cursor) {
                if matches!(inner.kind(), "block_node" | "flow_node") {
                    return Some(unwrap_node(inner));
                }
            }
            return None;
        }
    }
    None
}

/// Unwrap `block_node`/`flow_node` wrappers to reach the content child.
///
/// Comments are extras and can appear as children of any node, so they are
/// skipped while unwrapping.
pub fn unwrap_node(node: Node<'_>) -> Node<'_> {
    let mut current = node;
    while matches!(current.kind(), "block_node" | "flow_node") {
        let mut found_inner = false;
        for i in 0..current.child_count() {
            if let Some(child) = current.child(i) {
                if child.kind() != "comment" {
                    current = child;
                    found_inner = true;
                    break;
                }
            }
        }
        if !found_inner {
            break;
        }
    }
    current
}

/// Direct pairs of a block or flow mapping, in document order.
pub fn mapping_pairs(mapping: Node<'_>) -> Vec<Node<'_>> {
    let mut pairs = Vec::new();
    let mut cursor = mapping.walk();
    for child in mapping.children(&mut cursor) {
        if matches!(child.kind(), "block_mapping_pair" | "flow_pair") {
            pairs.push(child);
        }
    }
    pairs
}

/// Key text of a mapping pair, quotes stripped.
pub fn pair_key(pair: Node<'_>, source: &str) -> Option<String> {
    let key = pair.child_by_field_name("key")?;
    let text = key.utf8_text(source.as_bytes()).ok()?;
    Some(strip_quotes(text.trim()).to_string())
}

/// Value node of a mapping pair, still wrapped, if present.
pub fn pair_value(pair: Node<'_>) -> Option<Node<'_>> {
    pair.child_by_field_name("value")
}

/// Value node for `key` among a mapping's direct pairs, first match wins.
pub fn mapping_get<'t>(mapping: Node<'t>, source: &str, key: &str) -> Option<Node<'t>> {
    mapping_pairs(mapping)
        .into_iter()
        .find(|pair| pair_key(*pair, source).as_deref() == Some(key))
        .and_then(pair_value)
}

/// Items of a block or flow sequence, each unwrapped to its content node.
pub fn sequence_items(node: Node<'_>) -> Vec<Node<'_>> {
    let mut items = Vec::new();
    match node.kind() {
        "block_sequence" => {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                if child.kind() == "block_sequence_item" {
                    let mut item_cursor = child.walk();
                    for inner in child.children(&mut item_cursor) {
                        if matches!(inner.kind(), "block_node" | "flow_node") {
                            items.push(unwrap_node(inner));
                            break;
                        }
                    }
                }
            }
        }
        "flow_sequence" => {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                if child.kind() == "flow_node" {
                    items.push(unwrap_node(child));
                }
            }
        }
        _ => {}
    }
    items
}

/// Inline scalar text and span. Returns `None` for non-scalar values.
///
/// The span covers the whole scalar token including any quotes; the text has
/// surrounding quotes stripped. Block scalars (`|`, `>`) are not inline
/// values and yield `None`.
pub fn scalar_value(node: Node<'_>, source: &str) -> Option<(String, Span)> {
    let scalar = unwrap_node(node);
    match scalar.kind() {
        "plain_scalar" | "single_quote_scalar" | "double_quote_scalar" => {
            let text = scalar.utf8_text(source.as_bytes()).ok()?;
            let span = Span::new(scalar.start_byte(), scalar.end_byte());
            Some((strip_quotes(text).to_string(), span))
        }
        _ => None,
    }
}

fn strip_quotes(text: &str) -> &str {
    if text.len() >= 2 {
        let bytes = text.as_bytes();
        if (bytes[0] == b'"' && bytes[text.len() - 1] == b'"')
            || (bytes[0] == b'\'' && bytes[text.len() - 1] == b'\'')
        {
            return &text[1..text.len() - 1];
        }
    }
    text
}
