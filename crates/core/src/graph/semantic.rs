//! Semantic graph: definitions, calls, imports, and decorators for one file.
//!
//! A single pre-order recursive descent over the tree, driven by the
//! language's [`RuleSet`]. The only traversal state is the innermost
//! enclosing definition, threaded as an explicit parameter per call frame —
//! entering a definition narrows it for the subtree, backtracking restores
//! the caller's value for free.

use super::{CodeGraph, Edge, EdgeKind, Span, Vertex, VertexId, VertexKey, VertexKind};
use crate::languages::RuleSet;
use crate::parser::ParsedFile;
use crate::salt::SaltGenerator;
use std::path::PathBuf;
use tree_sitter::Node;

/// Build the semantic graph for one parsed file
pub fn build_semantic_graph(
    file: &ParsedFile,
    salt: &dyn SaltGenerator,
    root_path: PathBuf,
) -> CodeGraph {
    let mut walker = Walker {
        file,
        rules: file.language().rules(),
        salt,
        graph: CodeGraph::new(root_path),
        imports: Vec::new(),
        calls: Vec::new(),
    };
    walker.walk(file.tree().root_node(), None);
    walker.link_uses_imports();
    walker.graph
}

struct Walker<'a> {
    file: &'a ParsedFile,
    rules: &'static RuleSet,
    salt: &'a dyn SaltGenerator,
    graph: CodeGraph,
    /// Import vertex key + the identifier tokens of its statement text
    imports: Vec<(VertexKey, Vec<String>)>,
    /// Call-target vertex key + the leading identifier of the callee
    calls: Vec<(VertexKey, String)>,
}

impl Walker<'_> {
    fn walk(&mut self, node: Node, current_def: Option<&VertexKey>) {
        let node_type = node.kind();
        let mut entered_def: Option<VertexKey> = None;

        // Only named nodes classify: anonymous tokens share kind strings
        // with named rules (the Python `lambda` keyword token has kind
        // "lambda", same as the lambda expression itself)
        if node.is_named() {
            if self.rules.is_function(node_type) {
                entered_def = Some(self.add_definition(node, VertexKind::Function, current_def));
            } else if self.rules.is_class(node_type) {
                entered_def = Some(self.add_definition(node, VertexKind::Class, current_def));
            } else if self.rules.is_decorator(node_type) {
                self.add_decorator(node, current_def);
            } else if self.rules.is_import(node_type) {
                self.add_import(node);
            } else if self.rules.is_call(node_type) {
                self.add_call(node, current_def);
            }
        }

        let next_def = entered_def.as_ref().or(current_def);
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.walk(child, next_def);
        }
    }

    /// Create a function/class vertex and nest it under the enclosing
    /// definition, if any. Returns the new key as the enclosing definition
    /// for the subtree.
    fn add_definition(
        &mut self,
        node: Node,
        kind: VertexKind,
        current_def: Option<&VertexKey>,
    ) -> VertexKey {
        let span = Span::from_node(&node);
        let name = self.definition_name(node, kind, span);

        let key = VertexKey::new(self.file.path(), kind, name);
        let id = self
            .graph
            .ensure_vertex(Vertex::new(key.clone()).with_span(span));

        if let Some(parent) = current_def {
            let parent_id = self.graph.ensure_vertex(Vertex::new(parent.clone()));
            self.graph.add_edge(parent_id, id, Edge::new(EdgeKind::Contains));
        }

        key
    }

    /// Name extraction: the grammar's declared name where one exists, else a
    /// synthetic anonymous name salted to stay unique within the file.
    fn definition_name(&self, node: Node, kind: VertexKind, span: Span) -> String {
        if let Some(name) = crate::parser::declared_name(self.file, &node) {
            return name;
        }

        let tag = match kind {
            VertexKind::Class => "class",
            _ => "func",
        };
        format!("anon_{tag}@{span}_{}", self.salt.salt())
    }

    fn add_decorator(&mut self, node: Node, current_def: Option<&VertexKey>) {
        let text = self.file.node_text(&node).trim().to_string();
        if text.is_empty() {
            return;
        }

        let key = VertexKey::new(self.file.path(), VertexKind::Decorator, text);
        let id = self
            .graph
            .ensure_vertex(Vertex::new(key).with_span(Span::from_node(&node)));

        let owner = match current_def {
            Some(def) => self.graph.ensure_vertex(Vertex::new(def.clone())),
            None => self.file_anchor(),
        };
        self.graph.add_edge(owner, id, Edge::new(EdgeKind::HasDecorator));
    }

    /// Imports are file-scoped: always attached to the file anchor, never
    /// nested under a definition
    fn add_import(&mut self, node: Node) {
        let text = self.file.node_text(&node).trim().to_string();
        if text.is_empty() {
            return;
        }

        let key = VertexKey::new(self.file.path(), VertexKind::Import, text.clone());
        let id = self
            .graph
            .ensure_vertex(Vertex::new(key.clone()).with_span(Span::from_node(&node)));

        let anchor = self.file_anchor();
        self.graph.add_edge(anchor, id, Edge::new(EdgeKind::Imports));

        self.imports.push((key, identifier_tokens(&text)));
    }

    fn add_call(&mut self, node: Node, current_def: Option<&VertexKey>) {
        let callee = node.child_by_field_name("function").or_else(|| node.child(0));
        let Some(callee) = callee else { return };

        let callee_text = self.file.node_text(&callee);
        let called_name = callee_text.split('(').next().unwrap_or("").trim().to_string();
        if called_name.is_empty() {
            return;
        }

        // Salted key: every call site is its own vertex, even for repeated
        // callee names at file scope
        let key = VertexKey::new(
            self.file.path(),
            VertexKind::CallTarget,
            format!("{called_name}_{}", self.salt.salt()),
        );
        let id = self.graph.ensure_vertex(
            Vertex::new(key.clone())
                .with_display_name(called_name.clone())
                .with_span(Span::from_node(&node)),
        );

        let owner = match current_def {
            Some(def) => self.graph.ensure_vertex(Vertex::new(def.clone())),
            None => self.file_anchor(),
        };
        self.graph.add_edge(owner, id, Edge::new(EdgeKind::Calls));

        self.calls.push((key, leading_identifier(&called_name)));
    }

    fn file_anchor(&mut self) -> VertexId {
        self.graph
            .ensure_vertex(Vertex::new(VertexKey::file_anchor(self.file.path())))
    }

    /// Connect call targets to the imports whose names they use: a call whose
    /// leading identifier appears among an import statement's identifier
    /// tokens gets a `uses_import` edge to that import vertex.
    fn link_uses_imports(&mut self) {
        for (call_key, lead) in &self.calls {
            if lead.is_empty() {
                continue;
            }
            for (import_key, tokens) in &self.imports {
                if tokens.iter().any(|t| t == lead) {
                    let call_id = self.graph.ensure_vertex(Vertex::new(call_key.clone()));
                    let import_id = self.graph.ensure_vertex(Vertex::new(import_key.clone()));
                    self.graph
                        .add_edge(call_id, import_id, Edge::new(EdgeKind::UsesImport));
                }
            }
        }
    }
}

/// Identifier-shaped tokens of an import statement's text
fn identifier_tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// The first identifier segment of a callee name (`os.path.join` → `os`,
/// `util::helper` → `util`)
fn leading_identifier(name: &str) -> String {
    name.chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}
