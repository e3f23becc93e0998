//! Unified interface for tree-sitter operations.
//!
//! One handler per grammar. Parsers are created per call (they are cheap
//! and not `Sync`), so a handler is freely shareable across threads.
//!
//! Query execution notes:
//! - `QueryCursor::matches` is a `StreamingIterator`, so `.next()` yields
//!   `&QueryMatch`; captures are collected eagerly into `(node, name)`
//!   pairs, which normalizes the per-match shape into one flat sequence.
//! - A query that fails to compile for the active grammar version is
//!   reported and yields empty captures; extractors then fall back to
//!   their regex pattern or return nothing. Nothing throws past this
//!   module.

use crate::model::span::Span;
use tree_sitter::{Language, Node, Parser, Query, QueryCursor, StreamingIterator, Tree};
use tracing::{debug, warn};

pub struct AstHandler {
    language: Language,
}

impl AstHandler {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Parse source into a tree. `None` only when the parser gives up
    /// entirely; trees with error nodes are returned as-is and extraction
    /// proceeds on the best-effort subtree.
    pub fn parse(&self, code: &str) -> Option<Tree> {
        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&self.language) {
            warn!(error = %e, "failed to set parser language");
            return None;
        }
        parser.parse(code, None)
    }

    /// Run a query and collect `(node, capture_name)` pairs.
    pub fn run_query<'t>(
        &self,
        pattern: &str,
        root: Node<'t>,
        code: &str,
    ) -> Vec<(Node<'t>, String)> {
        let query = match Query::new(&self.language, pattern) {
            Ok(q) => q,
            Err(e) => {
                warn!(error = %e, "query failed to compile; yielding no captures");
                debug!(pattern, "offending query");
                return Vec::new();
            }
        };
        let names = query.capture_names();
        let mut out = Vec::new();
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, root, code.as_bytes());
        while let Some(m) = matches.next() {
            for cap in m.captures {
                let name = names
                    .get(cap.index as usize)
                    .copied()
                    .unwrap_or_default()
                    .to_string();
                out.push((cap.node, name));
            }
        }
        out
    }

    /// Text of a node, empty on (unlikely) invalid UTF-8 boundaries.
    pub fn node_text<'a>(&self, node: Node<'_>, code: &'a str) -> &'a str {
        node.utf8_text(code.as_bytes()).unwrap_or_default()
    }

    /// Node span with 1-based lines.
    pub fn node_span(&self, node: Node<'_>) -> Span {
        span_of(node)
    }

    /// Line range of a node, `(start_line, end_line)` 1-based inclusive.
    pub fn node_range(&self, node: Node<'_>) -> (usize, usize) {
        let s = span_of(node);
        (s.start_line, s.end_line)
    }

    pub fn child_by_field<'t>(&self, node: Node<'t>, field: &str) -> Option<Node<'t>> {
        node.child_by_field_name(field)
    }

    /// Nearest ancestor whose kind is one of `kinds`.
    pub fn ancestor_of_kind<'t>(&self, node: Node<'t>, kinds: &[&str]) -> Option<Node<'t>> {
        let mut current = node.parent();
        while let Some(n) = current {
            if kinds.contains(&n.kind()) {
                return Some(n);
            }
            current = n.parent();
        }
        None
    }

    pub fn named_children<'t>(&self, node: Node<'t>) -> Vec<Node<'t>> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor).collect()
    }
}

/// Span of a node with 1-based lines and 0-based columns/bytes.
pub fn span_of(node: Node<'_>) -> Span {
    Span {
        start_line: node.start_position().row + 1,
        start_col: node.start_position().column,
        end_line: node.end_position().row + 1,
        end_col: node.end_position().column,
        start_byte: node.start_byte(),
        end_byte: node.end_byte(),
    }
}

/// Find a direct child of `node` with the given kind.
pub fn find_child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut w = node.walk();
    node.children(&mut w).find(|ch| ch.kind() == kind)
}

/// Find the first descendant of `node` whose kind is one of `kinds`.
pub fn find_descendant_of_kinds<'t>(node: Node<'t>, kinds: &[&str]) -> Option<Node<'t>> {
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        if kinds.contains(&current.kind()) && current != node {
            return Some(current);
        }
        let mut w = current.walk();
        let children: Vec<_> = current.children(&mut w).collect();
        for ch in children.into_iter().rev() {
            stack.push(ch);
        }
    }
    None
}

/// Check whether `node` has an ancestor with one of the given kinds.
pub fn has_ancestor_of_kind(node: Node<'_>, kinds: &[&str]) -> bool {
    let mut current = node.parent();
    while let Some(n) = current {
        if kinds.contains(&n.kind()) {
            return true;
        }
        current = n.parent();
    }
    false
}
