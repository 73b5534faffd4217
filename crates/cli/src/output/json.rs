//! JSON output for machine consumers

use super::ContextReport;
use anyhow::Result;

pub fn render(report: &ContextReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
