//! The `robolearn summary` command.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use robolearn_core::report::SessionReport;
use robolearn_core::summary::Summary;
use robolearn_report::html::generate_html;

pub fn execute(report_path: PathBuf, format: String) -> Result<()> {
    let report = SessionReport::load_json(&report_path)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format.as_str() {
        "json" => writeln!(out, "{}", serde_json::to_string_pretty(&report.summary)?)?,
        "markdown" | "md" => writeln!(out, "{}", report.to_markdown())?,
        "html" => writeln!(out, "{}", generate_html(&report))?,
        "text" => print_summary(&report.catalog_name, &report.summary, &mut out)?,
        other => anyhow::bail!("unknown summary format: {other}"),
    }

    Ok(())
}

/// Render the learning summary as tables.
pub fn print_summary<W: Write>(catalog_name: &str, summary: &Summary, out: &mut W) -> Result<()> {

    let mut modules = Table::new();
    modules.set_header(vec!["Module", "Section", "Result"]);
    for m in &summary.modules {
        modules.add_row(vec![
            Cell::new(&m.title),
            Cell::new(m.section),
            Cell::new(m.outcome.label()),
        ]);
    }

    let mut sections = Table::new();
    sections.set_header(vec!["Section", "Correct"]);
    for s in &summary.sections {
        sections.add_row(vec![
            Cell::new(&s.name),
            Cell::new(format!("{}/{}", s.correct, s.size)),
        ]);
    }

    writeln!(out, "\nLearning Summary: {catalog_name}")?;
    writeln!(
        out,
        "Grade: {} | {} out of {} correct | {}% - {}",
        summary.grade,
        summary.correct_answers,
        summary.total_questions,
        summary.percentage,
        summary.grade.message()
    )?;
    writeln!(out, "\n{modules}")?;
    writeln!(out, "\n{sections}")?;
    writeln!(
        out,
        "\n{} {}",
        summary.insight.headline(),
        summary.insight.detail()
    )?;
    Ok(())
}
