//! JSON report layout.

use serde::Serialize;
use topup_data::aggregator::CompanySummary;
use topup_data::pipeline::{ProcessMetadata, ProcessOutcome};

#[derive(Serialize)]
struct JsonReport<'a> {
    metadata: &'a ProcessMetadata,
    companies: Vec<CompanySummary<'a>>,
}

#[derive(Serialize)]
struct JsonErrors<'a> {
    errors: &'a [String],
}

/// Pretty-print either the completed report or the error list.
pub fn render_outcome(outcome: &ProcessOutcome) -> serde_json::Result<String> {
    match outcome {
        ProcessOutcome::Completed(report) => serde_json::to_string_pretty(&JsonReport {
            metadata: &report.metadata,
            companies: report.aggregation.summaries().collect(),
        }),
        ProcessOutcome::Failed(errors) => serde_json::to_string_pretty(&JsonErrors { errors }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::path::Path;
    use topup_data::pipeline::process_files;

    fn fixture(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../topup-data/fixtures")
            .join(name)
    }

    #[test]
    fn test_json_report_shape() {
        let outcome = process_files(&fixture("companies.json"), &fixture("users.json"));
        let value: Value = serde_json::from_str(&render_outcome(&outcome).unwrap()).unwrap();

        assert_eq!(value["metadata"]["users_loaded"], 35);
        assert_eq!(value["metadata"]["unmatched_users"], 1);

        let companies = value["companies"].as_array().unwrap();
        assert_eq!(companies.len(), 6);
        assert_eq!(companies[0]["company"]["name"], "Blue Cat Inc.");
        assert_eq!(companies[0]["total_top_ups"], 142);
        assert_eq!(companies[0]["users_emailed"].as_array().unwrap().len(), 0);

        let boberson = &companies[1]["users_emailed"][0];
        assert_eq!(boberson["last_name"], "Boberson");
        assert_eq!(boberson["tokens"], 23);
        assert_eq!(boberson["new_token_balance"], 60);
    }

    #[test]
    fn test_json_keeps_null_email_status() {
        let outcome = process_files(&fixture("companies.json"), &fixture("users.json"));
        let value: Value = serde_json::from_str(&render_outcome(&outcome).unwrap()).unwrap();

        // Sara Weaver has an explicit null, Tyler Dixon has no key at all.
        let emailed = value["companies"][1]["users_emailed"].as_array().unwrap();
        for user in emailed {
            if user["last_name"] == "Weaver" || user["last_name"] == "Dixon" {
                assert!(user["email_status"].is_null());
            }
        }
    }

    #[test]
    fn test_json_errors() {
        let outcome = ProcessOutcome::Failed(vec!["Failed to read file users.json".to_string()]);
        let value: Value = serde_json::from_str(&render_outcome(&outcome).unwrap()).unwrap();

        assert_eq!(value["errors"][0], "Failed to read file users.json");
        assert!(value.get("companies").is_none());
    }
}
