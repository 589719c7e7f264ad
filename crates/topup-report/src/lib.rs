//! Report rendering for the token top-up run.
//!
//! Turns a [`ProcessOutcome`] into the text (default) or JSON document that
//! the binary prints to stdout.

pub mod json;
pub mod text;

pub use topup_core as core;

use topup_core::settings::ReportFormat;
use topup_data::pipeline::ProcessOutcome;

/// Render `outcome` in the requested `format`.
pub fn render(outcome: &ProcessOutcome, format: ReportFormat) -> serde_json::Result<String> {
    match format {
        ReportFormat::Text => Ok(text::render_outcome(outcome)),
        ReportFormat::Json => json::render_outcome(outcome),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_dispatches_on_format() {
        let outcome = ProcessOutcome::Failed(vec!["boom".to_string()]);

        let text = render(&outcome, ReportFormat::Text).unwrap();
        assert!(text.starts_with("Errors:\n"));

        let json = render(&outcome, ReportFormat::Json).unwrap();
        assert!(json.contains("\"errors\""));
    }
}
