//! Output rendering for closure runs

pub mod json;
pub mod terminal;

use prgraph_core::Definition;
use serde::Serialize;
use std::path::PathBuf;

/// What a closure run produced, shaped for the context-assembly consumer
#[derive(Debug, Serialize)]
pub struct ContextReport {
    pub repo: PathBuf,
    pub total_files_changed: usize,
    pub files_parsed: usize,
    pub vertices: usize,
    pub edges: usize,
    /// (path, reason) for every file left out of the graph
    pub skipped: Vec<(PathBuf, String)>,
    pub files: Vec<FileContext>,
}

/// Per-changed-file context record
#[derive(Debug, Serialize)]
pub struct FileContext {
    pub path: PathBuf,
    pub language: String,
    pub definitions: Vec<Definition>,
    /// Files this one imports (resolved within the working tree)
    pub imports: Vec<PathBuf>,
    /// Files importing this one (within the computed closure)
    pub imported_by: Vec<PathBuf>,
}
