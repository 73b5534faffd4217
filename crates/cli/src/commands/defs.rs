//! The `defs` command: list one file's top-level definitions.

use anyhow::{bail, Result};
use colored::Colorize;
use prgraph_core::{extract_definitions, LanguageRegistry, SourceParser};
use std::path::Path;

pub fn run(file: &Path, json: bool) -> Result<()> {
    let registry = LanguageRegistry::full();
    let Some(language) = registry.language_for_path(file) else {
        bail!("unsupported file type: {}", file.display());
    };

    let parser = SourceParser::new();
    let parsed = parser.parse_file(file, file, language)?;
    let definitions = extract_definitions(&parsed);

    if json {
        println!("{}", serde_json::to_string_pretty(&definitions)?);
        return Ok(());
    }

    println!(
        "{} {} ({} definitions)",
        file.display().to_string().bold(),
        language.name().dimmed(),
        definitions.len()
    );
    for def in &definitions {
        let kind = format!("{:?}", def.kind).to_lowercase();
        println!(
            "  {:<9} {} {}",
            kind.cyan(),
            def.name,
            format!("L{}-{}", def.start_line, def.end_line).dimmed()
        );
    }
    Ok(())
}
