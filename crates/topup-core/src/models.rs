use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Whether a user has agreed to receive top-up emails.
///
/// The input encodes this as `true`, `false`, `null` or a missing key. Only an
/// explicit `false` counts as an opt-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EmailStatus {
    /// `true` in the input.
    EmailSent,
    /// `false` in the input.
    EmailNotSent,
    /// `null` or absent.
    #[default]
    Unknown,
}

impl EmailStatus {
    /// `true` only for an explicit `false` in the input.
    pub fn is_opted_out(self) -> bool {
        matches!(self, EmailStatus::EmailNotSent)
    }
}

impl From<Option<bool>> for EmailStatus {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => EmailStatus::EmailSent,
            Some(false) => EmailStatus::EmailNotSent,
            None => EmailStatus::Unknown,
        }
    }
}

impl From<EmailStatus> for Option<bool> {
    fn from(status: EmailStatus) -> Self {
        match status {
            EmailStatus::EmailSent => Some(true),
            EmailStatus::EmailNotSent => Some(false),
            EmailStatus::Unknown => None,
        }
    }
}

impl Serialize for EmailStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Option::<bool>::from(*self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EmailStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<bool>::deserialize(deserializer).map(EmailStatus::from)
    }
}

/// A company whose active users receive a token top-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Unique company identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Tokens granted to each active user per run.
    pub top_up: u64,
    /// Whether this company sends top-up emails at all.
    pub email_status: bool,
}

impl Company {
    /// `false` when the company has disabled top-up emails.
    pub fn sends_email(&self) -> bool {
        self.email_status
    }
}

/// Shape of a user object in the input file.
///
/// `new_token_balance` is derived, never read, so it lives only on [`User`].
#[derive(Debug, Deserialize)]
struct UserRecord {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    company_id: i64,
    #[serde(default)]
    email_status: EmailStatus,
    active_status: bool,
    tokens: u64,
}

/// A user belonging (possibly) to one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Foreign key to [`Company::id`]; may reference no known company.
    pub company_id: i64,
    pub email_status: EmailStatus,
    pub active_status: bool,
    /// Balance before this run.
    pub tokens: u64,
    /// Balance after this run. Equal to `tokens` until a top-up is applied.
    pub new_token_balance: u64,
}

impl<'de> Deserialize<'de> for User {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        UserRecord::deserialize(deserializer).map(User::from_record)
    }
}

impl User {
    fn from_record(r: UserRecord) -> Self {
        Self {
            id: r.id,
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            company_id: r.company_id,
            email_status: r.email_status,
            active_status: r.active_status,
            tokens: r.tokens,
            new_token_balance: r.tokens,
        }
    }

    /// Only active users receive a top-up.
    pub fn is_active(&self) -> bool {
        self.active_status
    }

    /// Credit `amount` tokens to the running balance.
    pub fn apply_top_up(&mut self, amount: u64) {
        self.new_token_balance = self.new_token_balance.saturating_add(amount);
    }
}
