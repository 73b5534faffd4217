//! prgraph core - source-code graph engine for PR context assembly
//!
//! This crate builds the code graphs behind pull-request review context:
//! - Concrete syntax trees via Tree-sitter for eight languages
//! - Raw tree graphs and semantic definition/call/import graphs per file
//! - Import resolution against a checked-out working tree
//! - A worklist fixpoint expanding changed files into their import closure

pub mod closure;
pub mod config;
pub mod definitions;
pub mod graph;
pub mod languages;
pub mod parser;
pub mod resolve;
pub mod salt;

pub use closure::{CancelFlag, Closure, ClosureBuilder, ClosureError, SkipReason, SkippedFile};
pub use config::PrGraphConfig;
pub use definitions::{extract_definitions, Definition, DefinitionKind};
pub use graph::{
    build_raw_graph, build_semantic_graph, CodeGraph, Edge, EdgeKind, NodeLinkGraph, Span, Vertex,
    VertexKey, VertexKind,
};
pub use languages::{Language, LanguageRegistry, RuleSet};
pub use parser::{ParseError, ParsedFile, ParsedFileCache, SourceParser};
pub use resolve::ImportResolver;
pub use salt::{RandomSalt, SaltGenerator, SequentialSalt};

/// prgraph version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
