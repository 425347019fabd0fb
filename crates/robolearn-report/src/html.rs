//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::{Context, Result};
use std::path::Path;

use robolearn_core::model::Outcome;
use robolearn_core::report::SessionReport;
use robolearn_core::summary::SectionBreakdown;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn outcome_class(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Correct => "pass",
        Outcome::Incorrect => "fail",
        Outcome::Unanswered => "skip",
    }
}

/// Generate an HTML report from a session report.
pub fn generate_html(report: &SessionReport) -> String {
    let summary = &report.summary;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>robolearn report — {}</title>\n",
        html_escape(&report.catalog_name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Learning Summary</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Catalog: <strong>{}</strong> | {} questions | {}</p>\n",
        html_escape(&report.catalog_name),
        summary.total_questions,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Overall score
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str(&format!(
        "<h2>Grade: <span class=\"grade\">{}</span></h2>\n",
        html_escape(summary.grade.label())
    ));
    html.push_str(&format!(
        "<p>Overall score: {} out of {} correct</p>\n",
        summary.correct_answers, summary.total_questions
    ));
    html.push_str(&format!(
        "<progress max=\"100\" value=\"{}\"></progress>\n",
        summary.percentage
    ));
    html.push_str(&format!(
        "<p class=\"score\">{}% - {}</p>\n",
        summary.percentage,
        html_escape(summary.grade.message())
    ));
    html.push_str("</section>\n");

    // Per-module results
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Detailed Results</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Module</th><th onclick=\"sortTable(1)\">Section</th><th onclick=\"sortTable(2)\">Result</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    for m in &summary.modules {
        let class = outcome_class(m.outcome);
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            class,
            html_escape(&m.title),
            m.section,
            m.outcome.label()
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Insights
    html.push_str("<section class=\"insights\">\n");
    html.push_str("<h2>Performance Insights</h2>\n");
    html.push_str(&format!(
        "<p><strong>{}</strong> {}</p>\n",
        html_escape(summary.insight.headline()),
        html_escape(summary.insight.detail())
    ));
    if !summary.sections.is_empty() {
        html.push_str(&generate_bar_chart(&summary.sections));
    }
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &SessionReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create report dir: {}", parent.display()))?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

/// One horizontal bar per section, sized by its share of correct answers.
fn generate_bar_chart(sections: &[SectionBreakdown]) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 120;

    let total_height = sections.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, section) in sections.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let share = if section.size == 0 {
            0.0
        } else {
            section.correct as f64 / section.size as f64
        };
        let width = (share * max_width as f64) as usize;

        let color = if share >= 0.8 {
            "#22c55e"
        } else if share >= 0.5 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(&section.name)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}/{} correct</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            section.correct,
            section.size
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #f0f9ff; --fg: #1e3a8a; --border: #dbeafe; --pass: #dcfce7; --fail: #fde2e2; --skip: #f3f4f6; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; --skip: #1f2937; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.grade { font-size: 2rem; }
progress { width: 100%; height: 1rem; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
.skip { background: var(--skip); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    return asc ? va.localeCompare(vb) : vb.localeCompare(va);
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
