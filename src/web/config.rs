//! Configuration types and constants for the wishboard server.

use std::path::PathBuf;

use clap::Parser;

pub(crate) const DEFAULT_SHEET_TITLE: &str = "ExamWishes";
pub(crate) const CREDENTIALS_FILE_NAME: &str = "credentials.json";

/// Web server for the good-luck message board.
///
/// Serves an embedded single-page UI, persists messages to a spreadsheet
/// service when one is configured, and falls back to a local JSON file
/// otherwise.
///
/// Configuration can be set via CLI arguments or environment variables.
/// CLI arguments take precedence over environment variables.
#[derive(Parser, Debug)]
#[command(name = "wishboard", version, about)]
pub struct Cli {
    /// HTTP server bind address [env: WISHBOARD_BIND] [default: 127.0.0.1:3000]
    #[arg(long, short = 'b')]
    pub bind: Option<String>,

    /// Data directory for the fallback file and credentials [env: WISHBOARD_HOME] [default: ~/.wishboard]
    #[arg(long, short = 'd')]
    pub data_dir: Option<PathBuf>,

    /// Base URL of the spreadsheet service [env: WISHBOARD_SHEET_API]
    #[arg(long)]
    pub sheet_api: Option<String>,

    /// Path to the service credentials bundle [env: WISHBOARD_CREDENTIALS] [default: <data-dir>/credentials.json]
    #[arg(long)]
    pub credentials: Option<PathBuf>,

    /// Spreadsheet title [env: WISHBOARD_SHEET_TITLE] [default: ExamWishes]
    #[arg(long)]
    pub sheet_title: Option<String>,

    /// Admin panel key [env: WISHBOARD_ADMIN_KEY]
    #[arg(long)]
    pub admin_key: Option<String>,

    /// Comma-separated recipient names shown on the board [env: WISHBOARD_RECIPIENTS]
    #[arg(long)]
    pub recipients: Option<String>,
}

pub struct Config {
    pub bind_addr: String,
    pub data_dir: PathBuf,
    pub sheet_api: Option<String>,
    pub credentials_path: PathBuf,
    pub sheet_title: String,
    pub admin_key: Option<String>,
    pub recipients: Vec<String>,
}

impl Config {
    pub fn from_cli_and_env(cli: Cli) -> Self {
        let data_dir = cli
            .data_dir
            .or_else(|| std::env::var("WISHBOARD_HOME").ok().map(PathBuf::from))
            .unwrap_or_else(|| {
                std::env::var("HOME")
                    .map(|h| PathBuf::from(h).join(".wishboard"))
                    .unwrap_or_else(|_| PathBuf::from(".wishboard"))
            });

        let bind_addr = cli
            .bind
            .or_else(|| std::env::var("WISHBOARD_BIND").ok())
            .unwrap_or_else(|| "127.0.0.1:3000".to_string());

        let sheet_api = cli
            .sheet_api
            .or_else(|| std::env::var("WISHBOARD_SHEET_API").ok());

        let credentials_path = cli
            .credentials
            .or_else(|| std::env::var("WISHBOARD_CREDENTIALS").ok().map(PathBuf::from))
            .unwrap_or_else(|| data_dir.join(CREDENTIALS_FILE_NAME));

        let sheet_title = cli
            .sheet_title
            .or_else(|| std::env::var("WISHBOARD_SHEET_TITLE").ok())
            .unwrap_or_else(|| DEFAULT_SHEET_TITLE.to_string());

        let admin_key = cli
            .admin_key
            .or_else(|| std::env::var("WISHBOARD_ADMIN_KEY").ok());

        let recipients = cli
            .recipients
            .or_else(|| std::env::var("WISHBOARD_RECIPIENTS").ok())
            .map(|raw| parse_recipients(&raw))
            .unwrap_or_default();

        Self {
            bind_addr,
            data_dir,
            sheet_api,
            credentials_path,
            sheet_title,
            admin_key,
            recipients,
        }
    }

    /// Board headline, composed from the configured recipient names.
    pub fn title(&self) -> String {
        if self.recipients.is_empty() {
            "Good Luck Board".to_string()
        } else {
            format!("Good Luck {}!", join_names(&self.recipients))
        }
    }

    pub fn subtitle(&self) -> String {
        if self.recipients.is_empty() {
            "Send warm exam wishes!".to_string()
        } else {
            format!(
                "Send warm wishes to {} for their exams!",
                join_names(&self.recipients)
            )
        }
    }

    /// The recipient string stored on every submitted record.
    pub fn recipient_string(&self) -> String {
        if self.recipients.is_empty() {
            "Everyone".to_string()
        } else {
            join_names(&self.recipients)
        }
    }
}

fn parse_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join names for display: `A`, `A & B`, `A, B & C`.
fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [one] => one.clone(),
        [a, b] => format!("{a} & {b}"),
        [head @ .., last] => format!("{} & {last}", head.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(recipients: &[&str]) -> Config {
        Config {
            bind_addr: String::new(),
            data_dir: PathBuf::new(),
            sheet_api: None,
            credentials_path: PathBuf::new(),
            sheet_title: String::new(),
            admin_key: None,
            recipients: recipients.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_parse_recipients_trims_and_drops_empties() {
        assert_eq!(
            parse_recipients(" Ann , Ben ,, Cat "),
            vec!["Ann", "Ben", "Cat"]
        );
        assert!(parse_recipients("  ,  ").is_empty());
    }

    #[test]
    fn test_title_variants() {
        assert_eq!(config_with(&[]).title(), "Good Luck Board");
        assert_eq!(config_with(&["Ann"]).title(), "Good Luck Ann!");
        assert_eq!(config_with(&["Ann", "Ben"]).title(), "Good Luck Ann & Ben!");
        assert_eq!(
            config_with(&["Ann", "Ben", "Cat"]).title(),
            "Good Luck Ann, Ben & Cat!"
        );
    }

    #[test]
    fn test_recipient_string() {
        assert_eq!(config_with(&[]).recipient_string(), "Everyone");
        assert_eq!(config_with(&["Ann"]).recipient_string(), "Ann");
        assert_eq!(
            config_with(&["Ann", "Ben"]).recipient_string(),
            "Ann & Ben"
        );
    }
}
