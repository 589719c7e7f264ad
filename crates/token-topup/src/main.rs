mod bootstrap;

use std::process::ExitCode;

use anyhow::Result;
use topup_core::settings::Settings;
use topup_data::pipeline::process_files;

fn main() -> Result<ExitCode> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Token top-up v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Companies: {}, Users: {}, Format: {:?}",
        settings.companies.display(),
        settings.users.display(),
        settings.format
    );

    let (rendered, completed) = run(&settings)?;
    print!("{}", rendered);

    // A load failure is reported on stdout like a normal report; only the
    // exit status tells scripts apart.
    Ok(if completed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Run the pipeline and render its outcome. Returns the rendered document and
/// whether the run completed.
fn run(settings: &Settings) -> Result<(String, bool)> {
    let outcome = process_files(&settings.companies, &settings.users);
    let rendered = topup_report::render(&outcome, settings.format)?;
    Ok((rendered, outcome.is_completed()))
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const COMPANIES: &str = r#"[
        {"id": 2, "name": "Red Horse Co.", "top_up": 37, "email_status": true},
        {"id": 1, "name": "Blue Cat Inc.", "top_up": 71, "email_status": false}
    ]"#;

    const USERS: &str = r#"[
        {"id": 1, "first_name": "Bob", "last_name": "Boberson", "email": "bob@test.com",
         "company_id": 2, "email_status": true, "active_status": true, "tokens": 23},
        {"id": 2, "first_name": "Frank", "last_name": "Beck", "email": "frank@test.com",
         "company_id": 1, "email_status": false, "active_status": true, "tokens": 14}
    ]"#;

    fn write_inputs(tmp: &TempDir) -> (String, String) {
        let companies = tmp.path().join("companies.json");
        let users = tmp.path().join("users.json");
        std::fs::write(&companies, COMPANIES).expect("write companies");
        std::fs::write(&users, USERS).expect("write users");
        (
            companies.to_string_lossy().to_string(),
            users.to_string_lossy().to_string(),
        )
    }

    #[test]
    fn test_run_text_report() {
        let tmp = TempDir::new().expect("tempdir");
        let (companies, users) = write_inputs(&tmp);
        let settings = Settings::load_from_args([
            "token-topup",
            "--companies",
            companies.as_str(),
            "--users",
            users.as_str(),
        ])
        .expect("parse");

        let (rendered, completed) = run(&settings).expect("run");

        assert!(completed);
        let blue = rendered.find("Company Id: 1").expect("company 1");
        let red = rendered.find("Company Id: 2").expect("company 2");
        assert!(blue < red, "companies ordered by id");
        assert!(rendered.contains("\t\t  New Token Balance 85\n"));
        assert!(rendered.contains("Total amount of top ups for Red Horse Co.: 37\n"));
    }

    #[test]
    fn test_run_json_report() {
        let tmp = TempDir::new().expect("tempdir");
        let (companies, users) = write_inputs(&tmp);
        let settings = Settings::load_from_args([
            "token-topup",
            "--companies",
            companies.as_str(),
            "--users",
            users.as_str(),
            "--format",
            "json",
        ])
        .expect("parse");

        let (rendered, completed) = run(&settings).expect("run");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");

        assert!(completed);
        assert_eq!(value["companies"][1]["total_top_ups"], 37);
    }

    #[test]
    fn test_run_missing_input_reports_error() {
        let tmp = TempDir::new().expect("tempdir");
        let missing = tmp.path().join("nope.json").to_string_lossy().to_string();
        let settings = Settings::load_from_args([
            "token-topup",
            "--companies",
            missing.as_str(),
            "--users",
            missing.as_str(),
        ])
        .expect("parse");

        let (rendered, completed) = run(&settings).expect("run");

        assert!(!completed);
        assert!(rendered.starts_with("Errors:\n\tFailed to read file"));
        assert_eq!(rendered.lines().count(), 2, "exactly one error message");
        assert!(!rendered.contains("Company Id"));
    }
}
