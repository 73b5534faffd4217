//! Edge types for the code graph

use serde::{Deserialize, Serialize};

/// An edge in the code graph.
///
/// Edges carry only their kind; two vertices may be connected by several
/// edges of different kinds, and each (source, target, kind) triple appears
/// at most once.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Edge {
    kind: EdgeKind,
}

impl Edge {
    pub fn new(kind: EdgeKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }
}

/// The kind of relationship an edge represents
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// A definition lexically contains another definition
    Contains,
    /// A definition (or the file anchor) calls a call target
    Calls,
    /// The file anchor declares an import statement
    Imports,
    /// A call target uses a name brought in by an import
    UsesImport,
    /// A definition (or the file anchor) carries a decorator/annotation
    HasDecorator,
    /// Cross-file edge: one file's anchor imports another file
    Import,
    /// Raw syntax tree parent→child edge
    Child,
}

impl EdgeKind {
    /// The exported `type` attribute string
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Contains => "contains",
            EdgeKind::Calls => "calls",
            EdgeKind::Imports => "imports",
            EdgeKind::UsesImport => "uses_import",
            EdgeKind::HasDecorator => "has_decorator",
            EdgeKind::Import => "import",
            EdgeKind::Child => "child",
        }
    }
}
