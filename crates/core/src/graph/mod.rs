//! Code graph data structures and builders

pub mod edges;
pub mod export;
pub mod raw;
pub mod semantic;
pub mod vertices;

pub use edges::{Edge, EdgeKind};
pub use export::NodeLinkGraph;
pub use raw::build_raw_graph;
pub use semantic::build_semantic_graph;
pub use vertices::{Span, Vertex, VertexKey, VertexKind};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Unique identifier for a vertex in the code graph
pub type VertexId = NodeIndex;

/// Directed multigraph of code entities.
///
/// Vertices and edges live in a petgraph arena and are addressed by integer
/// handles; a side index maps each structured [`VertexKey`] to its handle.
/// Insertion is idempotent: re-adding a vertex returns the existing handle,
/// and an edge is stored at most once per (source, target, kind) triple, so
/// merging the same per-file graph twice cannot duplicate anything.
#[derive(Debug, Clone)]
pub struct CodeGraph {
    graph: DiGraph<Vertex, Edge>,
    index: HashMap<VertexKey, VertexId>,
    edge_seen: HashSet<(VertexId, VertexId, EdgeKind)>,
    root_path: PathBuf,
}

impl CodeGraph {
    /// Create a new empty code graph rooted at the analyzed working tree
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
            edge_seen: HashSet::new(),
            root_path,
        }
    }

    /// Insert a vertex, or return the handle of the existing vertex with the
    /// same key. An existing vertex without a span inherits the new span.
    pub fn ensure_vertex(&mut self, vertex: Vertex) -> VertexId {
        if let Some(&id) = self.index.get(vertex.key()) {
            if let (Some(span), Some(existing)) = (vertex.span(), self.graph.node_weight_mut(id)) {
                existing.fill_span(span);
            }
            return id;
        }
        let key = vertex.key().clone();
        let id = self.graph.add_node(vertex);
        self.index.insert(key, id);
        id
    }

    /// Insert an edge unless an identical (source, target, kind) edge exists.
    /// Returns whether the edge was added.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, edge: Edge) -> bool {
        if !self.edge_seen.insert((from, to, edge.kind())) {
            return false;
        }
        self.graph.add_edge(from, to, edge);
        true
    }

    /// Look up a vertex handle by key
    pub fn lookup(&self, key: &VertexKey) -> Option<VertexId> {
        self.index.get(key).copied()
    }

    /// Get a vertex by handle
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.graph.node_weight(id)
    }

    /// Iterate all vertices
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.graph.node_indices().map(move |id| (id, &self.graph[id]))
    }

    /// Iterate all edges as (source, target, edge)
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId, &Edge)> {
        self.graph
            .edge_references()
            .map(|e| (e.source(), e.target(), e.weight()))
    }

    /// Outgoing edges of a vertex
    pub fn edges_from(&self, id: VertexId) -> impl Iterator<Item = (VertexId, &Edge)> + '_ {
        self.graph.edges(id).map(|e| (e.target(), e.weight()))
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Root directory of the analyzed working tree
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Merge another graph into this one.
    ///
    /// Vertices are matched by key, so merging is a set union and stays
    /// idempotent. This is what enables parallel parse-then-merge: each
    /// worker builds a small per-file graph with no contention, and the
    /// merge step runs sequentially on the combined graph.
    pub fn merge(&mut self, other: CodeGraph) {
        let mut id_map: HashMap<VertexId, VertexId> = HashMap::new();

        for old_id in other.graph.node_indices() {
            let vertex = other.graph[old_id].clone();
            let new_id = self.ensure_vertex(vertex);
            id_map.insert(old_id, new_id);
        }

        for edge_ref in other.graph.edge_references() {
            let from = id_map[&edge_ref.source()];
            let to = id_map[&edge_ref.target()];
            self.add_edge(from, to, *edge_ref.weight());
        }
    }

    /// Files whose anchors this file's anchor imports (cross-file edges)
    pub fn imports_of(&self, file: &Path) -> Vec<PathBuf> {
        self.cross_file_neighbors(file, petgraph::Direction::Outgoing)
    }

    /// Files whose anchors import this file's anchor
    pub fn imported_by(&self, file: &Path) -> Vec<PathBuf> {
        self.cross_file_neighbors(file, petgraph::Direction::Incoming)
    }

    fn cross_file_neighbors(&self, file: &Path, dir: petgraph::Direction) -> Vec<PathBuf> {
        let Some(id) = self.lookup(&VertexKey::file_anchor(file)) else {
            return Vec::new();
        };
        let mut out: Vec<PathBuf> = self
            .graph
            .edges_directed(id, dir)
            .filter(|e| e.weight().kind() == EdgeKind::Import)
            .map(|e| {
                let other = match dir {
                    petgraph::Direction::Outgoing => e.target(),
                    petgraph::Direction::Incoming => e.source(),
                };
                self.graph[other].file().to_path_buf()
            })
            .collect();
        out.sort();
        out.dedup();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> VertexKey {
        VertexKey::new("a.py", VertexKind::Function, name)
    }

    #[test]
    fn test_ensure_vertex_is_idempotent() {
        let mut graph = CodeGraph::new(PathBuf::from("/repo"));
        let a = graph.ensure_vertex(Vertex::new(key("foo")));
        let b = graph.ensure_vertex(Vertex::new(key("foo")));
        assert_eq!(a, b);
        assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn test_edge_dedup_per_kind() {
        let mut graph = CodeGraph::new(PathBuf::from("/repo"));
        let a = graph.ensure_vertex(Vertex::new(key("foo")));
        let b = graph.ensure_vertex(Vertex::new(key("bar")));

        assert!(graph.add_edge(a, b, Edge::new(EdgeKind::Calls)));
        assert!(!graph.add_edge(a, b, Edge::new(EdgeKind::Calls)));
        // A different kind between the same pair is a distinct edge
        assert!(graph.add_edge(a, b, Edge::new(EdgeKind::Contains)));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_merge_unions_by_key() {
        let root = PathBuf::from("/repo");
        let mut left = CodeGraph::new(root.clone());
        let a = left.ensure_vertex(Vertex::new(key("foo")));
        let b = left.ensure_vertex(Vertex::new(key("bar")));
        left.add_edge(a, b, Edge::new(EdgeKind::Calls));

        let mut right = CodeGraph::new(root.clone());
        let c = right.ensure_vertex(Vertex::new(key("bar")));
        let d = right.ensure_vertex(Vertex::new(key("baz")));
        right.add_edge(c, d, Edge::new(EdgeKind::Calls));

        left.merge(right);
        assert_eq!(left.vertex_count(), 3);
        assert_eq!(left.edge_count(), 2);
    }

    #[test]
    fn test_merge_twice_is_idempotent() {
        let root = PathBuf::from("/repo");
        let mut combined = CodeGraph::new(root.clone());

        let mut build = || {
            let mut g = CodeGraph::new(root.clone());
            let a = g.ensure_vertex(Vertex::new(key("foo")));
            let b = g.ensure_vertex(Vertex::new(key("bar")));
            g.add_edge(a, b, Edge::new(EdgeKind::Calls));
            g
        };

        combined.merge(build());
        let (v, e) = (combined.vertex_count(), combined.edge_count());
        combined.merge(build());
        assert_eq!(combined.vertex_count(), v);
        assert_eq!(combined.edge_count(), e);
    }
}
