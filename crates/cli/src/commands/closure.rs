//! The `closure` command: changed files → import closure → graph + context.

use crate::output::{self, ContextReport, FileContext};
use anyhow::{bail, Context, Result};
use prgraph_core::{extract_definitions, ClosureBuilder, PrGraphConfig};
use std::path::{Path, PathBuf};

pub fn run(
    repo: &Path,
    mut changed: Vec<PathBuf>,
    changed_file: Option<&Path>,
    graph_out: Option<&Path>,
    config_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    if !repo.is_dir() {
        bail!("working tree not found: {}", repo.display());
    }

    if let Some(list) = changed_file {
        let content = std::fs::read_to_string(list)
            .with_context(|| format!("failed to read change list {}", list.display()))?;
        changed.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(PathBuf::from),
        );
    }
    changed.sort();
    changed.dedup();
    if changed.is_empty() {
        bail!("no changed files given (use --changed or --changed-file)");
    }

    let config = match config_path {
        Some(path) => PrGraphConfig::load(path)?,
        None => PrGraphConfig::load_or_default(repo)?,
    };

    let builder = ClosureBuilder::new(&config)?;
    let cancel = builder.cancel_flag();
    ctrlc::set_handler(move || cancel.cancel()).context("failed to install signal handler")?;

    let closure = builder.build(repo, &changed)?;

    if let Some(out) = graph_out {
        let file = std::fs::File::create(out)
            .with_context(|| format!("failed to create {}", out.display()))?;
        serde_json::to_writer_pretty(file, &closure.graph.to_node_link())?;
    }

    let report = build_report(repo, &changed, &closure);
    if json {
        output::json::render(&report)?;
    } else {
        output::terminal::render(&report, graph_out);
    }

    Ok(())
}

/// Per-changed-file context records plus run totals, mirroring what the
/// context-assembly stage consumes
fn build_report(repo: &Path, changed: &[PathBuf], closure: &prgraph_core::Closure) -> ContextReport {
    let files = changed
        .iter()
        .filter_map(|path| {
            let parsed = closure.cache.get(path)?;
            Some(FileContext {
                path: path.clone(),
                language: parsed.language().name().to_string(),
                definitions: extract_definitions(parsed),
                imports: closure.graph.imports_of(path),
                imported_by: closure.graph.imported_by(path),
            })
        })
        .collect();

    ContextReport {
        repo: repo.to_path_buf(),
        total_files_changed: changed.len(),
        files_parsed: closure.cache.len(),
        vertices: closure.graph.vertex_count(),
        edges: closure.graph.edge_count(),
        skipped: closure
            .skipped
            .iter()
            .map(|s| (s.path.clone(), s.reason.to_string()))
            .collect(),
        files,
    }
}
