//! pawfect-report: Self-contained HTML reports for evaluation snapshots.

pub mod html;

pub use html::{generate_html, write_html_report};
