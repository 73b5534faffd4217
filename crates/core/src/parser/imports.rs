//! Per-language import token extraction.
//!
//! Walks a parsed file's tree and collects the module specifier strings of
//! its import/include statements, in source order. Tokens are whatever the
//! language writes: dotted names for Python and Java, quoted paths for
//! JS/TS/Go/C, `::` paths for Rust. Resolution to on-disk files is the
//! import resolver's job.

use super::ParsedFile;
use crate::languages::Language;
use tree_sitter::Node;

/// Extract the import tokens declared by a parsed file
pub fn extract_import_tokens(file: &ParsedFile) -> Vec<String> {
    let mut tokens = Vec::new();
    collect(file, file.tree().root_node(), &mut tokens);
    tokens
}

fn collect(file: &ParsedFile, node: Node, tokens: &mut Vec<String>) {
    match file.language() {
        Language::Python => collect_python(file, node, tokens),
        Language::JavaScript | Language::TypeScript => collect_js(file, node, tokens),
        Language::Go => collect_go(file, node, tokens),
        Language::Java => collect_java(file, node, tokens),
        Language::C | Language::Cpp => collect_c(file, node, tokens),
        Language::Rust => collect_rust(file, node, tokens),
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect(file, child, tokens);
    }
}

fn push(tokens: &mut Vec<String>, token: impl Into<String>) {
    let token = token.into();
    if !token.is_empty() {
        tokens.push(token);
    }
}

fn collect_python(file: &ParsedFile, node: Node, tokens: &mut Vec<String>) {
    match node.kind() {
        // `from a.b import c` / `from . import c` — the module_name field
        // holds the dotted or relative module
        "import_from_statement" => {
            if let Some(module) = node.child_by_field_name("module_name") {
                push(tokens, file.node_text(&module).trim());
            }
        }
        // `import a.b, c` / `import a as b`
        "import_statement" => {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                match child.kind() {
                    "dotted_name" => push(tokens, file.node_text(&child).trim()),
                    "aliased_import" => {
                        if let Some(name) = child.child_by_field_name("name") {
                            push(tokens, file.node_text(&name).trim());
                        }
                    }
                    _ => {}
                }
            }
        }
        _ => {}
    }
}

fn collect_js(file: &ParsedFile, node: Node, tokens: &mut Vec<String>) {
    match node.kind() {
        // `import x from "mod"` and `export { x } from "mod"`
        "import_statement" | "export_statement" => {
            if let Some(source) = node.child_by_field_name("source") {
                push(tokens, unquote(&file.node_text(&source)));
            }
        }
        // `require("mod")` and dynamic `import("mod")`
        "call_expression" => {
            let Some(func) = node.child_by_field_name("function") else {
                return;
            };
            let callee = file.node_text(&func);
            if callee != "require" && callee != "import" {
                return;
            }
            if let Some(args) = node.child_by_field_name("arguments") {
                let mut cursor = args.walk();
                for child in args.children(&mut cursor) {
                    if child.kind() == "string" {
                        push(tokens, unquote(&file.node_text(&child)));
                    }
                }
            }
        }
        _ => {}
    }
}

fn collect_go(file: &ParsedFile, node: Node, tokens: &mut Vec<String>) {
    if node.kind() == "import_spec" {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "interpreted_string_literal" {
                push(tokens, unquote(&file.node_text(&child)));
            }
        }
    }
}

fn collect_java(file: &ParsedFile, node: Node, tokens: &mut Vec<String>) {
    if node.kind() == "import_declaration" {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if matches!(child.kind(), "scoped_identifier" | "identifier") {
                push(tokens, file.node_text(&child).trim());
                break;
            }
        }
    }
}

fn collect_c(file: &ParsedFile, node: Node, tokens: &mut Vec<String>) {
    if node.kind() == "preproc_include" {
        if let Some(path) = node.child_by_field_name("path") {
            // `"local.h"` or `<system.h>` — strip either delimiter
            let text = file.node_text(&path);
            push(tokens, text.trim_matches(|c| c == '"' || c == '<' || c == '>'));
        }
    }
}

fn collect_rust(file: &ParsedFile, node: Node, tokens: &mut Vec<String>) {
    if node.kind() == "use_declaration" {
        if let Some(arg) = node.child_by_field_name("argument") {
            let text = file.node_text(&arg);
            let text = text.as_ref();
            // `a::b::{c, d}`: the group cannot name a single file, so keep
            // the path prefix before the brace
            let token = match text.find("::{") {
                Some(idx) => &text[..idx],
                None => text.trim(),
            };
            push(tokens, token.trim());
        }
    }
}

fn unquote(text: &str) -> &str {
    text.trim_matches(|c| c == '"' || c == '\'' || c == '`')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SourceParser;
    use std::path::PathBuf;

    fn tokens_of(source: &str, name: &str, language: Language) -> Vec<String> {
        let parser = SourceParser::new();
        let file = parser
            .parse_source(source, &PathBuf::from(name), language)
            .unwrap();
        extract_import_tokens(&file)
    }

    #[test]
    fn test_python_imports() {
        let tokens = tokens_of(
            "import os\nimport a.b as ab\nfrom pkg.utils import helper\nfrom . import sibling\n",
            "m.py",
            Language::Python,
        );
        assert_eq!(tokens, vec!["os", "a.b", "pkg.utils", "."]);
    }

    #[test]
    fn test_javascript_imports() {
        let tokens = tokens_of(
            "import x from './x';\nconst y = require('./y');\nexport { z } from './z';\n",
            "m.js",
            Language::JavaScript,
        );
        assert_eq!(tokens, vec!["./x", "./y", "./z"]);
    }

    #[test]
    fn test_go_imports() {
        let tokens = tokens_of(
            "package main\n\nimport (\n\t\"fmt\"\n\t\"example.com/app/util\"\n)\n",
            "m.go",
            Language::Go,
        );
        assert_eq!(tokens, vec!["fmt", "example.com/app/util"]);
    }

    #[test]
    fn test_java_imports() {
        let tokens = tokens_of(
            "import com.example.util.Helper;\nimport java.util.*;\n\nclass A {}\n",
            "A.java",
            Language::Java,
        );
        assert_eq!(tokens, vec!["com.example.util.Helper", "java.util"]);
    }

    #[test]
    fn test_c_includes() {
        let tokens = tokens_of(
            "#include \"util.h\"\n#include <stdio.h>\n\nint main(void) { return 0; }\n",
            "m.c",
            Language::C,
        );
        assert_eq!(tokens, vec!["util.h", "stdio.h"]);
    }

    #[test]
    fn test_rust_use_declarations() {
        let tokens = tokens_of(
            "use crate::util::helper;\nuse std::collections::{HashMap, HashSet};\n",
            "m.rs",
            Language::Rust,
        );
        assert_eq!(tokens, vec!["crate::util::helper", "std::collections"]);
    }
}
