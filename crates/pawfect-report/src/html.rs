//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::{Context, Result};
use std::path::Path;

use pawfect_core::model::{Rating, WalkthroughTask};
use pawfect_core::progress::{percentage, Progress};
use pawfect_core::EvaluationSnapshot;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn rating_class(rating: Rating) -> &'static str {
    match rating {
        Rating::Excellent | Rating::Good => "pass",
        Rating::NeedsImprovement => "warn",
        Rating::Poor => "fail",
        Rating::NotRated => "",
    }
}

/// Generate an HTML report from an evaluation snapshot.
pub fn generate_html(snapshot: &EvaluationSnapshot) -> String {
    let mut html = String::new();
    let date = snapshot.timestamp.format("%Y-%m-%d");

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>Pawfect HCI evaluation ({date})</title>\n"));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    let tests = &snapshot.usability_tests;
    html.push_str("<header>\n");
    html.push_str("<h1>Pawfect HCI evaluation</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Captured {} | {} heuristics reviewed | {} of 12 steps completed | {} tests logged</p>\n",
        snapshot.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        snapshot.heuristics.done(),
        snapshot.cognitive_steps.done(),
        tests.len(),
    ));
    html.push_str("</header>\n");

    // Progress dashboard
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Progress</h2>\n");
    let success_rate = percentage(tests.success_count(), tests.len()) / 100.0;
    html.push_str(&generate_bar_chart(&[
        (
            "Heuristic evaluation",
            snapshot.heuristics.percentage() / 100.0,
        ),
        (
            "Cognitive walkthrough",
            snapshot.cognitive_steps.percentage() / 100.0,
        ),
        ("Usability test success", success_rate),
    ]));
    html.push_str("</section>\n");

    // Heuristics
    html.push_str("<section class=\"heuristics\">\n");
    html.push_str("<h2>Heuristic evaluation</h2>\n");
    html.push_str("<table>\n");
    html.push_str("<thead><tr><th>#</th><th>Heuristic</th><th>Rating</th><th>Reviewed</th><th>Notes</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for entry in snapshot.heuristics.iter() {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td class=\"{}\">{}</td><td>{}</td><td>{}</td></tr>\n",
            entry.id.number(),
            html_escape(entry.id.title()),
            rating_class(entry.rating),
            entry.rating.label(),
            if entry.checked { "&#10003;" } else { "" },
            html_escape(&entry.notes),
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Walkthrough
    html.push_str("<section class=\"walkthrough\">\n");
    html.push_str("<h2>Cognitive walkthrough</h2>\n");
    for task in WalkthroughTask::ALL {
        html.push_str(&format!(
            "<h3>Task {}: {}</h3>\n<ul class=\"steps\">\n",
            task.number(),
            html_escape(task.title())
        ));
        for step in snapshot.cognitive_steps.task(task) {
            let class = if step.completed { "done" } else { "todo" };
            html.push_str(&format!(
                "<li class=\"{class}\"><span>{}</span>",
                html_escape(step.id.title())
            ));
            if !step.notes.is_empty() {
                html.push_str(&format!(
                    " <em>{}</em>",
                    html_escape(&step.notes)
                ));
            }
            html.push_str("</li>\n");
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</section>\n");

    // Usability tests
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Usability tests</h2>\n");
    if tests.is_empty() {
        html.push_str("<p class=\"meta\">No tests logged.</p>\n");
    } else {
        html.push_str("<table class=\"results-table\" id=\"results\">\n");
        html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Participant</th><th onclick=\"sortTable(1)\">Scenario</th><th onclick=\"sortTable(2)\">Time</th><th onclick=\"sortTable(3)\">Clicks</th><th onclick=\"sortTable(4)\">Result</th><th>Notes</th></tr></thead>\n");
        html.push_str("<tbody>\n");
        for record in tests.iter() {
            let (class, text) = if record.success {
                ("pass", "Success")
            } else {
                ("fail", "Failed")
            };
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"{}\">{}</td><td>{}</td></tr>\n",
                html_escape(&record.participant),
                html_escape(record.scenario.title()),
                html_escape(&record.time_to_complete),
                record.clicks,
                class,
                text,
                html_escape(&record.notes),
            ));
        }
        html.push_str("</tbody></table>\n");
    }
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(&snapshot.to_json().unwrap_or_default()));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    // JavaScript for sorting
    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(snapshot: &EvaluationSnapshot, path: &Path) -> Result<()> {
    let html = generate_html(snapshot);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

/// Horizontal bars, one per `(label, fraction)`.
fn generate_bar_chart(bars: &[(&str, f64)]) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 200;

    let total_height = bars.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (label, fraction)) in bars.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let fraction = fraction.clamp(0.0, 1.0);
        let width = (fraction * max_width as f64) as usize;

        let color = if fraction >= 0.8 {
            "#22c55e"
        } else if fraction >= 0.5 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(label)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.0}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            fraction * 100.0
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --warn: #fef9c3; --fail: #fde2e2; --muted: #6b7280; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --warn: #713f12; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: var(--muted); }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; vertical-align: top; }
th { background: var(--border); cursor: pointer; }
.pass { background: var(--pass); }
.warn { background: var(--warn); }
.fail { background: var(--fail); }
ul.steps { list-style: none; padding-left: 0; }
ul.steps li { padding: 0.25rem 0; }
ul.steps li.done::before { content: "\2611  "; }
ul.steps li.todo::before { content: "\2610  "; }
ul.steps li.todo span { color: var(--muted); }
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
    return asc ? va.localeCompare(vb, undefined, {numeric: true}) : vb.localeCompare(va, undefined, {numeric: true});
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pawfect_core::checklist::StepChange;
    use pawfect_core::heuristics::HeuristicChange;
    use pawfect_core::model::{HeuristicId, Scenario, StepId, TestDraft};
    use pawfect_core::EvaluationSession;

    fn make_snapshot() -> EvaluationSnapshot {
        let mut session = EvaluationSession::new();
        session.update_heuristic(
            HeuristicId::HelpAndDocumentation,
            HeuristicChange::Notes("Add an <FAQ> page".into()),
        );
        session.update_heuristic(
            HeuristicId::VisibilityOfSystemStatus,
            HeuristicChange::Checked(true),
        );
        session.update_step(StepId::Task1Step1, StepChange::Completed(true));
        session
            .add_test_from(
                TestDraft::new("P1", Scenario::ContactInquiry, "1m 20s")
                    .with_clicks(7)
                    .with_success(false),
            )
            .unwrap();
        session.snapshot_at(chrono::Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap())
    }

    #[test]
    fn html_report_contains_required_elements() {
        let html = generate_html(&make_snapshot());

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("2026-03-14"));
        assert!(html.contains(HeuristicId::ErrorPrevention.title()));
        assert!(html.contains(StepId::Task3Step4.title()));
        assert!(html.contains("<td>P1</td>"));
        assert!(html.contains("Failed"));
    }

    #[test]
    fn notes_are_escaped() {
        let html = generate_html(&make_snapshot());
        assert!(html.contains("Add an &lt;FAQ&gt; page"));
        assert!(!html.contains("<FAQ>"));
    }

    #[test]
    fn empty_log_has_no_results_table() {
        let snapshot = EvaluationSession::new().snapshot();
        let html = generate_html(&snapshot);
        assert!(html.contains("No tests logged."));
        assert!(!html.contains("id=\"results\""));
    }

    #[test]
    fn html_report_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.html");

        write_html_report(&make_snapshot(), &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
