//! Transitive-import closure over a changed-file seed set.
//!
//! A generation-based worklist fixpoint: each generation's files are parsed
//! and turned into per-file raw + semantic graphs in parallel (no shared
//! state during the parse phase), then merged sequentially into the combined
//! graph. Import tokens extracted from each newly parsed file are resolved
//! against the working tree; resolved targets not yet seen form the next
//! generation. The seen-set check and cache insertion happen on the
//! sequential side, so a file reachable by two import paths is parsed once.
//!
//! Termination: resolution only returns paths that exist in the working
//! tree, a finite set, and seen files are never re-enqueued — mutually
//! importing files (A imports B imports A) stop at the seen check, not at
//! any cycle detection.

use crate::config::PrGraphConfig;
use crate::graph::{build_raw_graph, build_semantic_graph, CodeGraph, Edge, EdgeKind, Vertex, VertexKey};
use crate::languages::{Language, LanguageRegistry};
use crate::parser::imports::extract_import_tokens;
use crate::parser::{ParseError, ParsedFile, ParsedFileCache, SourceParser};
use crate::resolve::ImportResolver;
use crate::salt::{RandomSalt, SaltGenerator, SequentialSalt};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum ClosureError {
    #[error("closure computation cancelled")]
    Cancelled,

    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Cooperative cancellation signal, polled between worklist steps.
///
/// Clone one before starting the closure and trip it from a signal handler
/// or job supervisor; the computation returns [`ClosureError::Cancelled`]
/// at the next poll.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Why a file was left out of the graph. None of these abort the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Extension not in the registry
    UnsupportedLanguage,
    /// Listed or resolved path no longer exists on disk (deleted in the diff)
    Missing,
    /// Over the configured size limit
    TooLarge(u64),
    /// Grammar or I/O failure for this file only
    Parse(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnsupportedLanguage => write!(f, "unsupported language"),
            SkipReason::Missing => write!(f, "not found on disk"),
            SkipReason::TooLarge(size) => write!(f, "file too large ({size} bytes)"),
            SkipReason::Parse(msg) => write!(f, "parse failure: {msg}"),
        }
    }
}

/// A file excluded from the closure, with the reason
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Result of the closure computation
pub struct Closure {
    /// Every successfully parsed file, keyed by repo-relative path
    pub cache: ParsedFileCache,
    /// Union of all per-file raw + semantic graphs plus cross-file
    /// `import` edges
    pub graph: CodeGraph,
    /// Files dropped along the way; downstream consumers treat the graph
    /// as best-effort context
    pub skipped: Vec<SkippedFile>,
}

/// Orchestrates parse → graph → resolve → expand until fixpoint
pub struct ClosureBuilder {
    registry: LanguageRegistry,
    parser: SourceParser,
    deterministic_names: bool,
    pool: rayon::ThreadPool,
    cancel: CancelFlag,
    max_file_bytes: u64,
}

impl ClosureBuilder {
    pub fn new(config: &PrGraphConfig) -> Result<Self, ClosureError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.closure.parallelism)
            .build()?;
        Ok(Self {
            registry: config.registry(),
            parser: SourceParser::new(),
            deterministic_names: config.closure.deterministic_names,
            pool,
            cancel: CancelFlag::new(),
            max_file_bytes: config.closure.max_file_bytes,
        })
    }

    /// The cancellation handle for this builder
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Compute the import closure of `changed` inside the working tree at
    /// `root`. Paths in `changed` are relative to `root`.
    pub fn build(&self, root: &Path, changed: &[PathBuf]) -> Result<Closure, ClosureError> {
        let resolver = ImportResolver::new(root);
        let mut graph = CodeGraph::new(root.to_path_buf());
        let mut cache = ParsedFileCache::new();
        let mut skipped: Vec<SkippedFile> = Vec::new();
        let mut seen: HashSet<PathBuf> = HashSet::new();

        let mut frontier: Vec<PathBuf> = changed
            .iter()
            .filter(|path| seen.insert((*path).clone()))
            .cloned()
            .collect();

        let mut generation = 0usize;
        while !frontier.is_empty() {
            if self.cancel.is_cancelled() {
                return Err(ClosureError::Cancelled);
            }

            let batch = self.admit(root, std::mem::take(&mut frontier), &mut skipped);
            debug!(generation, files = batch.len(), "parsing generation");

            let outcomes: Vec<FileOutcome> = self.pool.install(|| {
                batch
                    .into_par_iter()
                    .map(|(path, language)| self.process_file(root, path, language))
                    .collect()
            });

            for outcome in outcomes {
                if self.cancel.is_cancelled() {
                    return Err(ClosureError::Cancelled);
                }

                let bundle = match outcome.result {
                    Ok(bundle) => bundle,
                    Err(err) => {
                        warn!(file = %outcome.path.display(), error = %err, "excluding file from graph");
                        skipped.push(SkippedFile {
                            path: outcome.path,
                            reason: SkipReason::Parse(err.to_string()),
                        });
                        continue;
                    }
                };

                graph.merge(bundle.raw);
                graph.merge(bundle.semantic);

                for token in &bundle.tokens {
                    let Some(target) = resolver.resolve(token, &outcome.path, outcome.language)
                    else {
                        continue;
                    };

                    // Cross-file edge between file anchors, added whether or
                    // not the target was already parsed
                    let from = graph.ensure_vertex(Vertex::new(VertexKey::file_anchor(&outcome.path)));
                    let to = graph.ensure_vertex(Vertex::new(VertexKey::file_anchor(&target)));
                    graph.add_edge(from, to, Edge::new(EdgeKind::Import));

                    if seen.insert(target.clone()) {
                        frontier.push(target);
                    }
                }

                cache.insert(bundle.file);
            }

            generation += 1;
        }

        info!(
            files = cache.len(),
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            skipped = skipped.len(),
            generations = generation,
            "closure complete"
        );

        Ok(Closure {
            cache,
            graph,
            skipped,
        })
    }

    /// Filter a frontier down to parseable files, recording skips.
    /// Unsupported extensions are dropped without error per the contract;
    /// they still show up in the skip list for reporting.
    fn admit(
        &self,
        root: &Path,
        frontier: Vec<PathBuf>,
        skipped: &mut Vec<SkippedFile>,
    ) -> Vec<(PathBuf, Language)> {
        let mut batch = Vec::with_capacity(frontier.len());
        for path in frontier {
            let Some(language) = self.registry.language_for_path(&path) else {
                skipped.push(SkippedFile {
                    path,
                    reason: SkipReason::UnsupportedLanguage,
                });
                continue;
            };

            let abs = root.join(&path);
            let Ok(meta) = std::fs::metadata(&abs) else {
                skipped.push(SkippedFile {
                    path,
                    reason: SkipReason::Missing,
                });
                continue;
            };
            if !meta.is_file() {
                skipped.push(SkippedFile {
                    path,
                    reason: SkipReason::Missing,
                });
                continue;
            }
            if meta.len() > self.max_file_bytes {
                skipped.push(SkippedFile {
                    path,
                    reason: SkipReason::TooLarge(meta.len()),
                });
                continue;
            }

            batch.push((path, language));
        }
        batch
    }

    fn process_file(&self, root: &Path, path: PathBuf, language: Language) -> FileOutcome {
        let abs = root.join(&path);
        let result = self
            .parser
            .parse_file(&abs, &path, language)
            .map(|file| self.bundle(root, file));
        FileOutcome {
            path,
            language,
            result,
        }
    }

    /// One salt generator per file. A generator shared across rayon workers
    /// would hand out counter values in scheduling order, so two runs over
    /// the same tree could name the same anonymous vertex differently;
    /// per-file generators keep deterministic names actually deterministic.
    fn file_salt(&self) -> Box<dyn SaltGenerator> {
        if self.deterministic_names {
            Box::new(SequentialSalt::default())
        } else {
            Box::new(RandomSalt)
        }
    }

    fn bundle(&self, root: &Path, file: ParsedFile) -> FileBundle {
        let raw = build_raw_graph(&file, root.to_path_buf());
        let semantic = build_semantic_graph(&file, self.file_salt().as_ref(), root.to_path_buf());
        let tokens = extract_import_tokens(&file);
        FileBundle {
            raw,
            semantic,
            tokens,
            file,
        }
    }
}

struct FileOutcome {
    path: PathBuf,
    language: Language,
    result: Result<FileBundle, ParseError>,
}

struct FileBundle {
    file: ParsedFile,
    raw: CodeGraph,
    semantic: CodeGraph,
    tokens: Vec<String>,
}
