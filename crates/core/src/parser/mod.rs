//! Syntax tree parsing over the bundled Tree-sitter grammars

pub mod imports;

use crate::languages::Language;
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;
use tree_sitter::{Parser, Tree};

/// Error types for parsing operations.
///
/// Per-file conditions that the closure computation recovers from. A
/// syntactically invalid file is not an error: the grammar still produces a
/// best-effort tree.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("grammar unavailable for {0}: {1}")]
    Grammar(&'static str, String),

    #[error("failed to parse file: {0}")]
    ParseFailed(String),
}

/// One parsed source file: raw bytes, decoded text, and the owned tree.
///
/// Immutable after creation; cached for the lifetime of one run.
pub struct ParsedFile {
    path: PathBuf,
    language: Language,
    bytes: Vec<u8>,
    text: String,
    tree: Tree,
}

impl ParsedFile {
    /// Path relative to the repository root
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Raw byte content the tree was parsed from
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decoded source text (UTF-8, lossy on invalid input)
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Source text of a node, sliced from the raw bytes so spans stay valid
    /// even when decoding was lossy
    pub fn node_text(&self, node: &tree_sitter::Node) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes[node.byte_range()])
    }
}

impl std::fmt::Debug for ParsedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedFile")
            .field("path", &self.path)
            .field("language", &self.language)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Parses source files into [`ParsedFile`]s.
///
/// Stateless apart from the grammar handles; a fresh Tree-sitter parser is
/// created per file (parsers are cheap, and not shareable across threads).
#[derive(Debug, Default, Clone)]
pub struct SourceParser;

impl SourceParser {
    pub fn new() -> Self {
        Self
    }

    /// Read and parse a file from disk.
    ///
    /// `rel_path` is the repository-relative identity recorded on the result;
    /// `abs_path` is where the bytes are read from.
    pub fn parse_file(
        &self,
        abs_path: &Path,
        rel_path: &Path,
        language: Language,
    ) -> Result<ParsedFile, ParseError> {
        let bytes = std::fs::read(abs_path)?;
        self.parse_bytes(bytes, rel_path, language)
    }

    /// Parse raw bytes.
    ///
    /// The grammar runs on the bytes, not the decoded text, so byte offsets
    /// in the tree always index into the original content.
    pub fn parse_bytes(
        &self,
        bytes: Vec<u8>,
        rel_path: &Path,
        language: Language,
    ) -> Result<ParsedFile, ParseError> {
        let text = match std::str::from_utf8(&bytes) {
            Ok(s) => s.to_string(),
            Err(_) => {
                warn!(file = %rel_path.display(), "invalid UTF-8, decoding lossily");
                String::from_utf8_lossy(&bytes).into_owned()
            }
        };

        let extension = rel_path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();

        let mut parser = Parser::new();
        parser
            .set_language(&language.grammar(&extension))
            .map_err(|e| ParseError::Grammar(language.name(), e.to_string()))?;

        let tree = parser.parse(&bytes, None).ok_or_else(|| {
            ParseError::ParseFailed(format!("no tree produced for {}", rel_path.display()))
        })?;

        Ok(ParsedFile {
            path: rel_path.to_path_buf(),
            language,
            bytes,
            text,
            tree,
        })
    }

    /// Parse a source string (tests and snippet analysis)
    pub fn parse_source(
        &self,
        source: &str,
        rel_path: &Path,
        language: Language,
    ) -> Result<ParsedFile, ParseError> {
        self.parse_bytes(source.as_bytes().to_vec(), rel_path, language)
    }
}

/// Best-effort declared name of a definition node.
///
/// Tries the grammar's `name` field first. C-style grammars hide the name
/// inside a declarator, Go wraps it in a `type_spec`; both are scanned as
/// fallbacks. `None` means the construct is anonymous — a bare identifier
/// child is never a name (a lambda's parameter or body would leak in and
/// collapse distinct anonymous definitions onto one key).
pub fn declared_name(file: &ParsedFile, node: &tree_sitter::Node) -> Option<String> {
    if let Some(name_node) = node.child_by_field_name("name") {
        let text = file.node_text(&name_node).trim().to_string();
        if !text.is_empty() {
            return Some(text);
        }
    }

    let mut found = None;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "function_declarator" => {
                let mut inner = child.walk();
                for sub in child.children(&mut inner) {
                    // plain functions declare an `identifier`, C++ member
                    // functions a `field_identifier`
                    if sub.kind().ends_with("identifier") {
                        found = Some(file.node_text(&sub).trim().to_string());
                        break;
                    }
                }
            }
            "type_spec" => {
                if let Some(name_node) = child.child_by_field_name("name") {
                    found = Some(file.node_text(&name_node).trim().to_string());
                }
            }
            _ => {}
        }
    }
    found.filter(|name| !name.is_empty())
}

/// Per-run cache mapping repository-relative paths to parsed files.
///
/// A file is parsed at most once per run; entries are immutable context for
/// graph construction and import extraction once inserted.
#[derive(Debug, Default)]
pub struct ParsedFileCache {
    files: HashMap<PathBuf, ParsedFile>,
}

impl ParsedFileCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    pub fn get(&self, path: &Path) -> Option<&ParsedFile> {
        self.files.get(path)
    }

    /// Insert a parsed file. The first parse of a path wins.
    pub fn insert(&mut self, file: ParsedFile) {
        self.files.entry(file.path().to_path_buf()).or_insert(file);
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &ParsedFile)> {
        self.files.iter()
    }

    /// Cached paths in sorted order
    pub fn paths(&self) -> Vec<&Path> {
        let mut paths: Vec<&Path> = self.files.keys().map(|p| p.as_path()).collect();
        paths.sort();
        paths
    }
}
