//! Node-link JSON export for the context-assembly stage.
//!
//! Shape: `{"nodes": [{id, type, name, span?}], "links": [{source, target,
//! type}]}` with string ids, stable under re-export of the same graph.

use super::{CodeGraph, Span};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct NodeLinkGraph {
    pub nodes: Vec<NodeRecord>,
    pub links: Vec<LinkRecord>,
}

#[derive(Debug, Serialize)]
pub struct NodeRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: super::VertexKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

#[derive(Debug, Serialize)]
pub struct LinkRecord {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl CodeGraph {
    /// Serialize the graph in node-link form.
    ///
    /// Records are sorted by id (nodes) and by (source, target, type)
    /// (links) so identical graphs export byte-identical JSON.
    pub fn to_node_link(&self) -> NodeLinkGraph {
        let mut nodes: Vec<NodeRecord> = self
            .vertices()
            .map(|(_, v)| NodeRecord {
                id: v.key().to_string(),
                kind: v.kind(),
                name: v.name().to_string(),
                span: v.span(),
            })
            .collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));

        let mut links: Vec<LinkRecord> = self
            .edges()
            .map(|(from, to, edge)| LinkRecord {
                source: self.vertex(from).map(|v| v.key().to_string()).unwrap_or_default(),
                target: self.vertex(to).map(|v| v.key().to_string()).unwrap_or_default(),
                kind: edge.kind().as_str(),
            })
            .collect();
        links.sort_by(|a, b| {
            (a.source.as_str(), a.target.as_str(), a.kind)
                .cmp(&(b.source.as_str(), b.target.as_str(), b.kind))
        });

        NodeLinkGraph { nodes, links }
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{CodeGraph, Edge, EdgeKind, Vertex, VertexKey, VertexKind};
    use std::path::PathBuf;

    #[test]
    fn test_node_link_shape() {
        let mut graph = CodeGraph::new(PathBuf::from("/repo"));
        let anchor = graph.ensure_vertex(Vertex::new(VertexKey::file_anchor("a.py")));
        let func = graph.ensure_vertex(Vertex::new(VertexKey::new(
            "a.py",
            VertexKind::Function,
            "foo",
        )));
        graph.add_edge(anchor, func, Edge::new(EdgeKind::Contains));

        let export = graph.to_node_link();
        assert_eq!(export.nodes.len(), 2);
        assert_eq!(export.links.len(), 1);
        assert_eq!(export.links[0].source, "a.py::file");
        assert_eq!(export.links[0].target, "a.py::function::foo");
        assert_eq!(export.links[0].kind, "contains");

        let json = serde_json::to_value(&export).unwrap();
        assert!(json["nodes"][0]["id"].is_string());
        assert_eq!(json["links"][0]["type"], "contains");
    }
}
