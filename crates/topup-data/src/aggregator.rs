//! Per-company top-up aggregation.
//!
//! Joins users to their company, credits each active user with the company's
//! top-up, and splits users into emailed and not-emailed groups.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use topup_core::models::{Company, User};
use tracing::{debug, warn};

// ── AggregationResult ─────────────────────────────────────────────────────────

/// Outcome of one company's top-up pass.
///
/// Indices point into the owning [`Aggregation`]'s company and user arenas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationResult {
    /// Index of the company in [`Aggregation::companies`].
    pub company: usize,
    /// Users that receive an email, ordered by last name.
    pub users_emailed: Vec<usize>,
    /// Users that do not receive an email, ordered by last name.
    pub users_not_emailed: Vec<usize>,
    /// Sum of top-ups granted to this company's active users.
    pub total_top_ups: u64,
}

impl AggregationResult {
    fn new(company: usize) -> Self {
        Self {
            company,
            users_emailed: Vec::new(),
            users_not_emailed: Vec::new(),
            total_top_ups: 0,
        }
    }
}

// ── CompanySummary ────────────────────────────────────────────────────────────

/// Borrowed view of an [`AggregationResult`] with indices resolved.
#[derive(Debug, Clone, Serialize)]
pub struct CompanySummary<'a> {
    pub company: &'a Company,
    pub users_emailed: Vec<&'a User>,
    pub users_not_emailed: Vec<&'a User>,
    pub total_top_ups: u64,
}

// ── Aggregation ───────────────────────────────────────────────────────────────

/// Companies and users after a top-up pass, plus one result per company.
#[derive(Debug, Clone)]
pub struct Aggregation {
    companies: Vec<Company>,
    users: Vec<User>,
    results: Vec<AggregationResult>,
    unmatched_users: usize,
}

impl Aggregation {
    /// Companies in input order.
    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    /// Users in input order, with `new_token_balance` already updated.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// One result per company, ascending by company id.
    pub fn results(&self) -> &[AggregationResult] {
        &self.results
    }

    /// Number of users whose `company_id` matched no company.
    pub fn unmatched_users(&self) -> usize {
        self.unmatched_users
    }

    /// Top-ups granted across every company, clamped at `u64::MAX`.
    pub fn total_top_ups(&self) -> u64 {
        self.results
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.total_top_ups))
    }

    /// Summaries in result order (ascending company id).
    pub fn summaries(&self) -> impl Iterator<Item = CompanySummary<'_>> + '_ {
        self.results.iter().map(move |r| self.summary(r))
    }

    // Only ever called with results owned by `self`.
    fn summary(&self, result: &AggregationResult) -> CompanySummary<'_> {
        CompanySummary {
            company: &self.companies[result.company],
            users_emailed: self.resolve_users(&result.users_emailed),
            users_not_emailed: self.resolve_users(&result.users_not_emailed),
            total_top_ups: result.total_top_ups,
        }
    }

    fn resolve_users(&self, indices: &[usize]) -> Vec<&User> {
        indices.iter().map(|&i| &self.users[i]).collect()
    }
}

// ── TokenAggregator ───────────────────────────────────────────────────────────

/// Stateless helper that runs the top-up pass.
pub struct TokenAggregator;

impl TokenAggregator {
    /// Run a single top-up pass over `companies` and `users`.
    ///
    /// Both collections are consumed so the same users cannot be topped up by
    /// a second pass. Users referencing an unknown company are kept in the
    /// arena untouched but appear in no result. When two companies share an
    /// id, the first one in input order wins.
    pub fn aggregate(companies: Vec<Company>, mut users: Vec<User>) -> Aggregation {
        // BTreeMap gives ascending company ids for free.
        let mut by_id: BTreeMap<i64, usize> = BTreeMap::new();
        for (idx, company) in companies.iter().enumerate() {
            if by_id.contains_key(&company.id) {
                warn!(
                    "Duplicate company id {} ({}); keeping the first occurrence",
                    company.id, company.name
                );
                continue;
            }
            by_id.insert(company.id, idx);
        }

        // Members per company id, in input order.
        let mut members: HashMap<i64, Vec<usize>> = HashMap::new();
        for (idx, user) in users.iter().enumerate() {
            members.entry(user.company_id).or_default().push(idx);
        }

        let unmatched_users: usize = members
            .iter()
            .filter(|(company_id, _)| !by_id.contains_key(*company_id))
            .map(|(_, idx)| idx.len())
            .sum();
        if unmatched_users > 0 {
            debug!("{} users reference no known company", unmatched_users);
        }

        let results: Vec<AggregationResult> = by_id
            .into_iter()
            .map(|(company_id, company_idx)| {
                let member_idx = members.remove(&company_id).unwrap_or_default();
                Self::process_company(company_idx, &companies[company_idx], &member_idx, &mut users)
            })
            .collect();

        debug!(
            "Aggregated {} companies over {} users",
            results.len(),
            users.len()
        );

        Aggregation {
            companies,
            users,
            results,
            unmatched_users,
        }
    }

    /// `true` unless either side explicitly opted out of email.
    ///
    /// The company flag is a plain boolean; the user flag is tri-state and
    /// only [`EmailStatus::EmailNotSent`](topup_core::models::EmailStatus)
    /// blocks.
    pub fn should_email(company: &Company, user: &User) -> bool {
        company.sends_email() && !user.email_status.is_opted_out()
    }

    // ── Private ───────────────────────────────────────────────────────────────

    fn process_company(
        company_idx: usize,
        company: &Company,
        member_idx: &[usize],
        users: &mut [User],
    ) -> AggregationResult {
        let mut result = AggregationResult::new(company_idx);

        for &idx in member_idx {
            let user = &mut users[idx];
            if user.is_active() {
                result.total_top_ups = result.total_top_ups.saturating_add(company.top_up);
                user.apply_top_up(company.top_up);
            }

            if Self::should_email(company, user) {
                result.users_emailed.push(idx);
            } else {
                result.users_not_emailed.push(idx);
            }
        }

        // sort_by is stable, so equal last names keep input order.
        result
            .users_emailed
            .sort_by(|&a, &b| users[a].last_name.cmp(&users[b].last_name));
        result
            .users_not_emailed
            .sort_by(|&a, &b| users[a].last_name.cmp(&users[b].last_name));

        result
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
