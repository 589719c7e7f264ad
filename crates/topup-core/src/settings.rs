use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Default companies input, resolved against the working directory.
pub const DEFAULT_COMPANIES_FILE: &str = "companies.json";

/// Default users input, resolved against the working directory.
pub const DEFAULT_USERS_FILE: &str = "users.json";

// ── ReportFormat ───────────────────────────────────────────────────────────────

/// How the report is written to stdout.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Tab-indented plain text, one block per company.
    #[default]
    Text,
    /// Pretty-printed JSON including run metadata.
    Json,
}

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Apply company token top-ups to users and report who gets emailed
#[derive(Parser, Debug, Clone)]
#[command(
    name = "token-topup",
    about = "Apply company token top-ups to users and report who gets emailed",
    version
)]
pub struct Settings {
    /// Companies JSON file
    #[arg(long, default_value = DEFAULT_COMPANIES_FILE)]
    pub companies: PathBuf,

    /// Users JSON file
    #[arg(long, default_value = DEFAULT_USERS_FILE)]
    pub users: PathBuf,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and resolve derived values.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list, so
    /// tests can drive it without spawning subprocesses.
    pub fn load_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Settings::try_parse_from(args).map(Self::resolve)
    }

    /// `--debug` overrides the log level.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::load_from_args(["token-topup"]).expect("parse");

        assert_eq!(settings.companies, PathBuf::from("companies.json"));
        assert_eq!(settings.users, PathBuf::from("users.json"));
        assert_eq!(settings.format, ReportFormat::Text);
        assert_eq!(settings.log_level, "WARNING");
        assert!(!settings.debug);
    }

    #[test]
    fn test_settings_cli_input_paths() {
        let settings = Settings::load_from_args([
            "token-topup",
            "--companies",
            "/data/c.json",
            "--users",
            "/data/u.json",
        ])
        .expect("parse");
        assert_eq!(settings.companies, PathBuf::from("/data/c.json"));
        assert_eq!(settings.users, PathBuf::from("/data/u.json"));
    }

    #[test]
    fn test_settings_cli_json_format() {
        let settings =
            Settings::load_from_args(["token-topup", "--format", "json"]).expect("parse");
        assert_eq!(settings.format, ReportFormat::Json);
    }

    #[test]
    fn test_settings_debug_overrides_log_level() {
        let settings = Settings::load_from_args(["token-topup", "--log-level", "ERROR", "--debug"])
            .expect("parse");
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_settings_rejects_unknown_log_level() {
        assert!(Settings::load_from_args(["token-topup", "--log-level", "verbose"]).is_err());
    }

    #[test]
    fn test_settings_rejects_unknown_format() {
        assert!(Settings::load_from_args(["token-topup", "--format", "xml"]).is_err());
    }
}
