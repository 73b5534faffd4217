//! Raw syntax-tree graph: every tree node as a vertex, parent→child edges.
//!
//! Purely structural, no semantic interpretation; used for low-level diffing
//! and debugging. Vertex names are `{node_type}@{span}` and the key is
//! file-qualified, so raw graphs from different files can share one combined
//! graph without span collisions.

use super::{CodeGraph, Edge, EdgeKind, Span, Vertex, VertexId, VertexKey, VertexKind};
use crate::parser::ParsedFile;
use tree_sitter::Node;

/// Build the raw tree graph for one parsed file.
///
/// Deterministic: the same tree always yields the same vertices and edges.
pub fn build_raw_graph(file: &ParsedFile, root_path: std::path::PathBuf) -> CodeGraph {
    let mut graph = CodeGraph::new(root_path);
    walk(file, file.tree().root_node(), None, &mut graph);
    graph
}

fn walk(file: &ParsedFile, node: Node, parent: Option<VertexId>, graph: &mut CodeGraph) {
    let span = Span::from_node(&node);
    let key = VertexKey::new(
        file.path(),
        VertexKind::Syntax,
        format!("{}@{}", node.kind(), span),
    );
    let id = graph.ensure_vertex(Vertex::new(key).with_span(span));

    if let Some(parent) = parent {
        graph.add_edge(parent, id, Edge::new(EdgeKind::Child));
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(file, child, Some(id), graph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::languages::Language;
    use crate::parser::SourceParser;
    use std::path::PathBuf;

    #[test]
    fn test_raw_graph_is_deterministic() {
        let parser = SourceParser::new();
        let source = "def foo():\n    return 1\n";
        let path = PathBuf::from("a.py");
        let root = PathBuf::from("/repo");

        let a = build_raw_graph(
            &parser.parse_source(source, &path, Language::Python).unwrap(),
            root.clone(),
        );
        let b = build_raw_graph(
            &parser.parse_source(source, &path, Language::Python).unwrap(),
            root,
        );

        let labels = |g: &CodeGraph| {
            let mut v: Vec<String> = g.vertices().map(|(_, n)| n.key().to_string()).collect();
            v.sort();
            v
        };
        assert_eq!(labels(&a), labels(&b));
        assert_eq!(a.edge_count(), b.edge_count());
    }

    #[test]
    fn test_same_span_in_two_files_stays_distinct() {
        let parser = SourceParser::new();
        let source = "x = 1\n";
        let root = PathBuf::from("/repo");

        let mut combined = CodeGraph::new(root.clone());
        for name in ["a.py", "b.py"] {
            let file = parser
                .parse_source(source, &PathBuf::from(name), Language::Python)
                .unwrap();
            combined.merge(build_raw_graph(&file, root.clone()));
        }

        // Identical {type}@{span} labels in two files must not collapse
        let per_file = |file: &str| {
            combined
                .vertices()
                .filter(|(_, v)| v.file() == std::path::Path::new(file))
                .count()
        };
        assert_eq!(per_file("a.py"), per_file("b.py"));
        assert!(per_file("a.py") > 0);
    }
}
