//! Semantic extraction across the non-Python grammars: each language's rule
//! table must yield the same vertex and edge shapes from equivalent source.

use prgraph_core::{
    build_semantic_graph, extract_definitions, CodeGraph, DefinitionKind, EdgeKind, Language,
    SequentialSalt, SourceParser, VertexKey, VertexKind,
};
use std::path::PathBuf;

fn semantic(source: &str, name: &str, language: Language) -> CodeGraph {
    let parser = SourceParser::new();
    let file = parser
        .parse_source(source, &PathBuf::from(name), language)
        .unwrap();
    build_semantic_graph(&file, &SequentialSalt::default(), PathBuf::from("/repo"))
}

fn names(graph: &CodeGraph, kind: VertexKind) -> Vec<String> {
    let mut out: Vec<String> = graph
        .vertices()
        .filter(|(_, v)| v.kind() == kind)
        .map(|(_, v)| v.name().to_string())
        .collect();
    out.sort();
    out
}

fn edge_count(graph: &CodeGraph, kind: EdgeKind) -> usize {
    graph.edges().filter(|(_, _, e)| e.kind() == kind).count()
}

#[test]
fn test_typescript_class_method_and_import() {
    let graph = semantic(
        "import { helper } from './helper';\n\n\
         export class Service {\n  run(): void {\n    helper();\n  }\n}\n",
        "service.ts",
        Language::TypeScript,
    );

    assert_eq!(names(&graph, VertexKind::Class), vec!["Service"]);
    assert_eq!(names(&graph, VertexKind::Function), vec!["run"]);
    assert_eq!(names(&graph, VertexKind::CallTarget), vec!["helper"]);

    // run nests under Service, the call nests under run
    let service = graph
        .lookup(&VertexKey::new("service.ts", VertexKind::Class, "Service"))
        .unwrap();
    let contained: Vec<_> = graph
        .edges_from(service)
        .filter(|(_, e)| e.kind() == EdgeKind::Contains)
        .map(|(id, _)| graph.vertex(id).unwrap().name().to_string())
        .collect();
    assert_eq!(contained, vec!["run"]);

    // the call's leading identifier matches the named import
    assert_eq!(edge_count(&graph, EdgeKind::UsesImport), 1);
}

#[test]
fn test_typescript_interface_is_a_class_vertex() {
    let graph = semantic(
        "interface Shape {\n  area(): number;\n}\n",
        "shape.ts",
        Language::TypeScript,
    );
    assert_eq!(names(&graph, VertexKind::Class), vec!["Shape"]);
}

#[test]
fn test_java_class_method_and_annotation() {
    let graph = semantic(
        "import java.util.List;\n\n\
         class Service {\n  @Override\n  void run() {\n    helper();\n  }\n}\n",
        "Service.java",
        Language::Java,
    );

    assert_eq!(names(&graph, VertexKind::Class), vec!["Service"]);
    assert_eq!(names(&graph, VertexKind::Function), vec!["run"]);
    assert_eq!(names(&graph, VertexKind::CallTarget), vec!["helper"]);
    assert_eq!(names(&graph, VertexKind::Decorator), vec!["@Override"]);

    let anchor = graph.lookup(&VertexKey::file_anchor("Service.java")).unwrap();
    let imports: Vec<_> = graph
        .edges_from(anchor)
        .filter(|(_, e)| e.kind() == EdgeKind::Imports)
        .map(|(id, _)| graph.vertex(id).unwrap().name().to_string())
        .collect();
    assert_eq!(imports, vec!["import java.util.List;"]);
}

#[test]
fn test_c_function_name_comes_from_declarator() {
    let graph = semantic(
        "#include <stdio.h>\n\n\
         struct point {\n  int x;\n};\n\n\
         int main(void) {\n  helper();\n  return 0;\n}\n",
        "main.c",
        Language::C,
    );

    assert_eq!(names(&graph, VertexKind::Function), vec!["main"]);
    assert_eq!(names(&graph, VertexKind::Class), vec!["point"]);
    assert_eq!(names(&graph, VertexKind::CallTarget), vec!["helper"]);

    let main_fn = graph
        .lookup(&VertexKey::new("main.c", VertexKind::Function, "main"))
        .unwrap();
    assert_eq!(
        graph
            .edges_from(main_fn)
            .filter(|(_, e)| e.kind() == EdgeKind::Calls)
            .count(),
        1
    );
}

#[test]
fn test_cpp_member_function_name() {
    let graph = semantic(
        "#include \"util.h\"\n\n\
         class Widget {\npublic:\n  void draw() { render(); }\n};\n",
        "widget.cpp",
        Language::Cpp,
    );

    assert_eq!(names(&graph, VertexKind::Class), vec!["Widget"]);
    assert_eq!(names(&graph, VertexKind::Function), vec!["draw"]);
    assert_eq!(names(&graph, VertexKind::CallTarget), vec!["render"]);
}

#[test]
fn test_go_type_declaration_name() {
    let graph = semantic(
        "package main\n\ntype Config struct {\n\tName string\n}\n",
        "config.go",
        Language::Go,
    );
    assert_eq!(names(&graph, VertexKind::Class), vec!["Config"]);
}

#[test]
fn test_definitions_across_languages() {
    let parser = SourceParser::new();

    let java = parser
        .parse_source(
            "class A {\n  void run() {}\n}\n",
            &PathBuf::from("A.java"),
            Language::Java,
        )
        .unwrap();
    let defs = extract_definitions(&java);
    let summary: Vec<_> = defs.iter().map(|d| (d.name.as_str(), d.kind)).collect();
    assert_eq!(
        summary,
        vec![("A", DefinitionKind::Class), ("run", DefinitionKind::Function)]
    );

    let cpp = parser
        .parse_source(
            "class Widget {\npublic:\n  void draw() {}\n};\n",
            &PathBuf::from("widget.cpp"),
            Language::Cpp,
        )
        .unwrap();
    let defs = extract_definitions(&cpp);
    let summary: Vec<_> = defs.iter().map(|d| (d.name.as_str(), d.kind)).collect();
    assert_eq!(
        summary,
        vec![
            ("Widget", DefinitionKind::Class),
            ("draw", DefinitionKind::Function)
        ]
    );
}
