//! Supported languages, extension registry, and grammar handles

pub mod rules;

pub use rules::RuleSet;

use std::path::Path;

/// A source language with a bundled Tree-sitter grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    C,
    Cpp,
    Go,
    Java,
    Rust,
}

impl Language {
    /// Stable lowercase name, used in logs and exported vertex attributes
    pub fn name(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Go => "go",
            Language::Java => "java",
            Language::Rust => "rust",
        }
    }

    /// Parse a name as produced by [`Language::name`] (also accepts a few
    /// common aliases used in config files)
    pub fn from_name(name: &str) -> Option<Language> {
        match name.to_ascii_lowercase().as_str() {
            "python" | "py" => Some(Language::Python),
            "javascript" | "js" => Some(Language::JavaScript),
            "typescript" | "ts" => Some(Language::TypeScript),
            "c" => Some(Language::C),
            "cpp" | "c++" => Some(Language::Cpp),
            "go" | "golang" => Some(Language::Go),
            "java" => Some(Language::Java),
            "rust" | "rs" => Some(Language::Rust),
            _ => None,
        }
    }

    /// All file extensions (with leading dot) recognized for this language.
    ///
    /// The import resolver appends these to candidate base paths, so the
    /// order reflects resolution preference.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Python => &[".py", ".pyi"],
            Language::JavaScript => &[".js", ".jsx", ".mjs"],
            Language::TypeScript => &[".ts", ".tsx"],
            Language::C => &[".c", ".h"],
            Language::Cpp => &[".cpp", ".cc", ".cxx", ".hpp", ".h"],
            Language::Go => &[".go"],
            Language::Java => &[".java"],
            Language::Rust => &[".rs"],
        }
    }

    /// The Tree-sitter grammar for a file of this language.
    ///
    /// TSX and JSX need their extension-specific grammar variant; everything
    /// else ignores the extension.
    pub fn grammar(&self, extension: &str) -> tree_sitter::Language {
        match self {
            Language::Python => tree_sitter_python::LANGUAGE.into(),
            Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Language::TypeScript => {
                if extension == ".tsx" {
                    tree_sitter_typescript::LANGUAGE_TSX.into()
                } else {
                    tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()
                }
            }
            Language::C => tree_sitter_c::LANGUAGE.into(),
            Language::Cpp => tree_sitter_cpp::LANGUAGE.into(),
            Language::Go => tree_sitter_go::LANGUAGE.into(),
            Language::Java => tree_sitter_java::LANGUAGE.into(),
            Language::Rust => tree_sitter_rust::LANGUAGE.into(),
        }
    }

    /// The semantic node-type rule set for this language
    pub fn rules(&self) -> &'static RuleSet {
        rules::for_language(*self)
    }

    fn all() -> &'static [Language] {
        &[
            Language::Python,
            Language::JavaScript,
            Language::TypeScript,
            Language::C,
            Language::Cpp,
            Language::Go,
            Language::Java,
            Language::Rust,
        ]
    }
}

/// Maps file extensions to languages.
///
/// An explicit value rather than a process-wide table so tests (and config)
/// can run with a reduced language set.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    languages: Vec<Language>,
}

impl LanguageRegistry {
    /// Registry covering every bundled grammar
    pub fn full() -> Self {
        Self {
            languages: Language::all().to_vec(),
        }
    }

    /// Registry restricted to the given languages
    pub fn with_languages(languages: Vec<Language>) -> Self {
        Self { languages }
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    /// Look up the language for an extension (with leading dot).
    ///
    /// Earlier-registered languages win for shared extensions; with the full
    /// registry that makes `.h` a C header rather than C++.
    pub fn language_for_extension(&self, extension: &str) -> Option<Language> {
        self.languages
            .iter()
            .copied()
            .find(|lang| lang.extensions().contains(&extension))
    }

    /// Look up the language for a file path by its extension.
    ///
    /// `None` means the file is unsupported and must be skipped without error.
    pub fn language_for_path(&self, path: &Path) -> Option<Language> {
        let ext = path.extension()?.to_str()?;
        self.language_for_extension(&format!(".{ext}"))
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_extension_lookup() {
        let registry = LanguageRegistry::full();
        assert_eq!(
            registry.language_for_path(&PathBuf::from("a/b/app.py")),
            Some(Language::Python)
        );
        assert_eq!(
            registry.language_for_path(&PathBuf::from("ui/Page.tsx")),
            Some(Language::TypeScript)
        );
        assert_eq!(registry.language_for_path(&PathBuf::from("notes.md")), None);
        assert_eq!(registry.language_for_path(&PathBuf::from("Makefile")), None);
    }

    #[test]
    fn test_reduced_registry_skips_other_languages() {
        let registry = LanguageRegistry::with_languages(vec![Language::Python]);
        assert_eq!(registry.language_for_path(&PathBuf::from("x.go")), None);
        assert_eq!(
            registry.language_for_path(&PathBuf::from("x.py")),
            Some(Language::Python)
        );
    }

    #[test]
    fn test_header_extension_prefers_c() {
        let registry = LanguageRegistry::full();
        assert_eq!(registry.language_for_extension(".h"), Some(Language::C));
    }
}
