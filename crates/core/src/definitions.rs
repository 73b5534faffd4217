//! Top-level definition listing for prompt assembly.
//!
//! Walks a parsed file and lists its named functions and classes with source
//! spans and parameter text. Anonymous constructs are left out: this feeds
//! human/LLM-readable context, not the graph.

use crate::languages::RuleSet;
use crate::parser::ParsedFile;
use serde::Serialize;
use tree_sitter::Node;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionKind {
    Function,
    Class,
}

/// A named function or class definition
#[derive(Debug, Clone, Serialize)]
pub struct Definition {
    pub name: String,
    pub kind: DefinitionKind,
    /// 1-based, inclusive
    pub start_line: usize,
    pub end_line: usize,
    /// Literal parameter-list text, when the grammar exposes one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<String>,
}

/// List every named definition in the file, in source order
pub fn extract_definitions(file: &ParsedFile) -> Vec<Definition> {
    let rules = file.language().rules();
    let mut definitions = Vec::new();
    walk(file, rules, file.tree().root_node(), &mut definitions);
    definitions
}

fn walk(file: &ParsedFile, rules: &RuleSet, node: Node, out: &mut Vec<Definition>) {
    let node_type = node.kind();
    // keyword tokens can share kind strings with definition rules
    if node.is_named() && rules.is_definition(node_type) {
        let kind = if rules.is_function(node_type) {
            DefinitionKind::Function
        } else {
            DefinitionKind::Class
        };
        if let Some(name) = crate::parser::declared_name(file, &node) {
            out.push(Definition {
                name,
                kind,
                start_line: node.start_position().row + 1,
                end_line: node.end_position().row + 1,
                parameters: parameters_text(file, node, kind),
            });
        }
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(file, rules, child, out);
    }
}

fn parameters_text(file: &ParsedFile, node: Node, kind: DefinitionKind) -> Option<String> {
    if kind != DefinitionKind::Function {
        return None;
    }
    node.child_by_field_name("parameters")
        .map(|params| file.node_text(&params).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::languages::Language;
    use crate::parser::SourceParser;
    use std::path::PathBuf;

    fn defs(source: &str, name: &str, language: Language) -> Vec<Definition> {
        let parser = SourceParser::new();
        let file = parser
            .parse_source(source, &PathBuf::from(name), language)
            .unwrap();
        extract_definitions(&file)
    }

    #[test]
    fn test_python_function_and_class() {
        let out = defs(
            "def foo(a, b=1):\n    pass\n\nclass Bar:\n    def method(self):\n        pass\n",
            "a.py",
            Language::Python,
        );
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].name, "foo");
        assert_eq!(out[0].kind, DefinitionKind::Function);
        assert_eq!(out[0].start_line, 1);
        assert_eq!(out[0].parameters.as_deref(), Some("(a, b=1)"));
        assert_eq!(out[1].name, "Bar");
        assert_eq!(out[1].kind, DefinitionKind::Class);
        assert_eq!(out[2].name, "method");
    }

    #[test]
    fn test_c_function_name_from_declarator() {
        let out = defs(
            "int add(int a, int b) {\n    return a + b;\n}\n",
            "m.c",
            Language::C,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "add");
        assert_eq!(out[0].kind, DefinitionKind::Function);
    }

    #[test]
    fn test_lambdas_are_not_listed() {
        let out = defs("f = lambda x: x\n", "a.py", Language::Python);
        assert!(out.is_empty());
    }
}
