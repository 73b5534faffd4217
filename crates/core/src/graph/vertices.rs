//! Vertex types for the code graph

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// The kind of entity a vertex represents
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VertexKind {
    /// The per-file anchor vertex; owner of file-scoped edges
    File,
    /// A function, method, lambda, or closure definition
    Function,
    /// A class, struct, enum, trait, or interface definition
    Class,
    /// An import/include/use statement (name holds the statement text)
    Import,
    /// The callee of a call expression
    CallTarget,
    /// A decorator or annotation attached to a definition
    Decorator,
    /// A raw concrete-syntax-tree node (raw tree graph only)
    Syntax,
}

/// Structured vertex identity: (file, kind, name).
///
/// Replaces string-concatenated labels so separator characters inside names
/// cannot collide, and so raw syntax vertices from different files never
/// merge (the name carries only the per-file `{type}@{span}` part; the file
/// path qualifies it here).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct VertexKey {
    pub file: PathBuf,
    pub kind: VertexKind,
    pub name: String,
}

impl VertexKey {
    pub fn new(file: impl Into<PathBuf>, kind: VertexKind, name: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            kind,
            name: name.into(),
        }
    }

    /// The anchor key for a file; target of file-scoped edges and of
    /// cross-file `import` edges
    pub fn file_anchor(file: impl Into<PathBuf>) -> Self {
        Self::new(file, VertexKind::File, "")
    }
}

impl fmt::Display for VertexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = self.file.display();
        match self.kind {
            VertexKind::File => write!(f, "{file}::file"),
            VertexKind::Syntax => write!(f, "{file}::{}", self.name),
            VertexKind::Function => write!(f, "{file}::function::{}", self.name),
            VertexKind::Class => write!(f, "{file}::class::{}", self.name),
            VertexKind::Import => write!(f, "{file}::import::{}", self.name),
            VertexKind::CallTarget => write!(f, "{file}::call::{}", self.name),
            VertexKind::Decorator => write!(f, "{file}::decorator::{}", self.name),
        }
    }
}

/// Source span in line/column terms (0-based, as Tree-sitter reports)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Span {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl Span {
    pub fn from_node(node: &tree_sitter::Node) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        Self {
            start_line: start.row,
            start_col: start.column,
            end_line: end.row,
            end_col: end.column,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start_line, self.start_col, self.end_line, self.end_col
        )
    }
}

/// A vertex in the code graph
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vertex {
    key: VertexKey,
    /// Display name; equals the key name except for salted vertices, where
    /// the key carries the salt and this stays the human-readable name
    name: String,
    span: Option<Span>,
}

impl Vertex {
    pub fn new(key: VertexKey) -> Self {
        let name = key.name.clone();
        Self {
            key,
            name,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn key(&self) -> &VertexKey {
        &self.key
    }

    pub fn kind(&self) -> VertexKind {
        self.key.kind
    }

    pub fn file(&self) -> &Path {
        &self.key.file
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }

    pub(crate) fn fill_span(&mut self, span: Span) {
        if self.span.is_none() {
            self.span = Some(span);
        }
    }
}
