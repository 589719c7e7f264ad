//! Plain-text report layout.
//!
//! One tab-indented block per company, each user followed by their previous
//! and new token balance, and the company's top-up total at the end.

use topup_core::models::User;
use topup_data::aggregator::{Aggregation, CompanySummary};
use topup_data::pipeline::ProcessOutcome;

/// Render either the company report or the error list.
pub fn render_outcome(outcome: &ProcessOutcome) -> String {
    match outcome {
        ProcessOutcome::Completed(report) => render_report(&report.aggregation),
        ProcessOutcome::Failed(errors) => render_errors(errors),
    }
}

/// Render every company in result order.
pub fn render_report(aggregation: &Aggregation) -> String {
    aggregation
        .summaries()
        .map(|summary| render_company(&summary))
        .collect()
}

/// Render the messages of a failed run.
pub fn render_errors(errors: &[String]) -> String {
    let mut out = String::from("Errors:\n");
    for error in errors {
        out.push_str(&format!("\t{}\n", error));
    }
    out
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn render_company(summary: &CompanySummary<'_>) -> String {
    let company = summary.company;
    let mut out = String::from("\n");
    out.push_str(&format!("\tCompany Id: {}\n", company.id));
    out.push_str(&format!("\tCompany Name: {}\n", company.name));
    out.push_str("\tUsers Emailed:\n");
    for user in &summary.users_emailed {
        out.push_str(&render_user(user));
    }
    out.push_str("\tUsers Not Emailed:\n");
    for user in &summary.users_not_emailed {
        out.push_str(&render_user(user));
    }
    out.push_str(&format!(
        "\t\tTotal amount of top ups for {}: {}\n",
        company.name, summary.total_top_ups
    ));
    out
}

fn render_user(user: &User) -> String {
    format!(
        "\t\t{}, {}, {}\n\t\t  Previous Token Balance, {}\n\t\t  New Token Balance {}\n",
        user.last_name, user.first_name, user.email, user.tokens, user.new_token_balance
    )
}

// ── Tests ──────────────────────────────────────────────────────────────────────
