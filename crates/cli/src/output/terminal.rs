//! Human-readable terminal summary

use super::ContextReport;
use colored::Colorize;
use std::path::Path;

pub fn render(report: &ContextReport, graph_out: Option<&Path>) {
    println!(
        "{} {}",
        "prgraph closure".bold(),
        report.repo.display().to_string().dimmed()
    );
    println!(
        "  {} changed, {} parsed, {} vertices, {} edges",
        report.total_files_changed,
        report.files_parsed,
        report.vertices,
        report.edges
    );
    if let Some(out) = graph_out {
        println!("  graph written to {}", out.display().to_string().green());
    }

    if !report.skipped.is_empty() {
        println!("\n{}", "skipped".yellow().bold());
        for (path, reason) in &report.skipped {
            println!("  {} {}", path.display(), format!("({reason})").dimmed());
        }
    }

    for file in &report.files {
        println!(
            "\n{} {}",
            file.path.display().to_string().bold(),
            file.language.dimmed()
        );
        for def in &file.definitions {
            let kind = format!("{:?}", def.kind).to_lowercase();
            println!(
                "  {:<9} {} {}",
                kind.cyan(),
                def.name,
                format!("L{}-{}", def.start_line, def.end_line).dimmed()
            );
        }
        if !file.imports.is_empty() {
            let list: Vec<String> = file.imports.iter().map(|p| p.display().to_string()).collect();
            println!("  {} {}", "imports".green(), list.join(", "));
        }
        if !file.imported_by.is_empty() {
            let list: Vec<String> = file
                .imported_by
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            println!("  {} {}", "imported by".magenta(), list.join(", "));
        }
    }
}
