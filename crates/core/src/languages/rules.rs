//! Per-language node-type classification tables for the semantic graph.
//!
//! Each language contributes one [`RuleSet`] sorting grammar node types into
//! four buckets (function-like, class-like, call-like, import-like) plus the
//! decorator node types where the grammar has them. Adding a language means
//! adding one entry here, not new traversal code.

use super::Language;

/// Node-type buckets driving the semantic graph walk
#[derive(Debug)]
pub struct RuleSet {
    /// Node types producing `function` vertices
    pub functions: &'static [&'static str],
    /// Node types producing `class` vertices (classes, structs, enums, traits)
    pub classes: &'static [&'static str],
    /// Node types producing `call_target` vertices
    pub calls: &'static [&'static str],
    /// Node types producing `import` vertices
    pub imports: &'static [&'static str],
    /// Node types producing `decorator` vertices
    pub decorators: &'static [&'static str],
}

impl RuleSet {
    pub fn is_function(&self, node_type: &str) -> bool {
        self.functions.contains(&node_type)
    }

    pub fn is_class(&self, node_type: &str) -> bool {
        self.classes.contains(&node_type)
    }

    pub fn is_call(&self, node_type: &str) -> bool {
        self.calls.contains(&node_type)
    }

    pub fn is_import(&self, node_type: &str) -> bool {
        self.imports.contains(&node_type)
    }

    pub fn is_decorator(&self, node_type: &str) -> bool {
        self.decorators.contains(&node_type)
    }

    /// True when the node type produces a definition vertex of either kind
    pub fn is_definition(&self, node_type: &str) -> bool {
        self.is_function(node_type) || self.is_class(node_type)
    }
}

static PYTHON: RuleSet = RuleSet {
    functions: &["function_definition", "lambda"],
    classes: &["class_definition"],
    calls: &["call"],
    imports: &["import_statement", "import_from_statement"],
    decorators: &["decorator"],
};

static JAVASCRIPT: RuleSet = RuleSet {
    functions: &[
        "function_declaration",
        "generator_function_declaration",
        "method_definition",
        "arrow_function",
        "function_expression",
    ],
    classes: &["class_declaration"],
    calls: &["call_expression", "new_expression"],
    imports: &["import_statement"],
    decorators: &["decorator"],
};

static TYPESCRIPT: RuleSet = RuleSet {
    functions: &[
        "function_declaration",
        "generator_function_declaration",
        "method_definition",
        "arrow_function",
        "function_expression",
    ],
    classes: &["class_declaration", "interface_declaration"],
    calls: &["call_expression", "new_expression"],
    imports: &["import_statement"],
    decorators: &["decorator"],
};

static C: RuleSet = RuleSet {
    functions: &["function_definition"],
    classes: &["struct_specifier", "enum_specifier", "union_specifier"],
    calls: &["call_expression"],
    imports: &["preproc_include"],
    decorators: &[],
};

static CPP: RuleSet = RuleSet {
    functions: &["function_definition", "lambda_expression"],
    classes: &["class_specifier", "struct_specifier", "enum_specifier"],
    calls: &["call_expression", "new_expression"],
    imports: &["preproc_include"],
    decorators: &[],
};

static GO: RuleSet = RuleSet {
    functions: &["function_declaration", "method_declaration", "func_literal"],
    classes: &["type_declaration"],
    calls: &["call_expression"],
    imports: &["import_spec"],
    decorators: &[],
};

static JAVA: RuleSet = RuleSet {
    functions: &["method_declaration", "constructor_declaration"],
    classes: &[
        "class_declaration",
        "interface_declaration",
        "enum_declaration",
    ],
    calls: &["method_invocation", "object_creation_expression"],
    imports: &["import_declaration"],
    decorators: &["marker_annotation", "annotation"],
};

static RUST: RuleSet = RuleSet {
    functions: &["function_item"],
    classes: &["struct_item", "enum_item", "trait_item"],
    calls: &["call_expression", "macro_invocation"],
    imports: &["use_declaration"],
    decorators: &["attribute_item"],
};

/// The rule set for a language. Total over [`Language`].
pub fn for_language(language: Language) -> &'static RuleSet {
    match language {
        Language::Python => &PYTHON,
        Language::JavaScript => &JAVASCRIPT,
        Language::TypeScript => &TYPESCRIPT,
        Language::C => &C,
        Language::Cpp => &CPP,
        Language::Go => &GO,
        Language::Java => &JAVA,
        Language::Rust => &RUST,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_language_has_nonempty_core_buckets() {
        for lang in [
            Language::Python,
            Language::JavaScript,
            Language::TypeScript,
            Language::C,
            Language::Cpp,
            Language::Go,
            Language::Java,
            Language::Rust,
        ] {
            let rules = for_language(lang);
            assert!(!rules.functions.is_empty(), "{:?} functions", lang);
            assert!(!rules.classes.is_empty(), "{:?} classes", lang);
            assert!(!rules.calls.is_empty(), "{:?} calls", lang);
            assert!(!rules.imports.is_empty(), "{:?} imports", lang);
        }
    }

    #[test]
    fn test_bucket_membership() {
        let rules = for_language(Language::Python);
        assert!(rules.is_function("function_definition"));
        assert!(rules.is_class("class_definition"));
        assert!(rules.is_import("import_from_statement"));
        assert!(rules.is_decorator("decorator"));
        assert!(!rules.is_function("call"));
    }
}
