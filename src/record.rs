//! Message record schema shared by both storage backends.
//!
//! The local file stores records as a JSON array of objects with lower-case
//! keys; the remote sheet stores one positional row per record under the
//! capitalized column header.  The translation between the two lives here so
//! neither backend needs to know about the other's key names.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Column header row of the remote sheet.  Every write re-emits it; every
/// read skips it.
pub const SHEET_HEADER: [&str; 6] = ["ID", "Name", "Recipient", "Message", "Tone", "Timestamp"];

/// Display name used when a sender leaves the name field blank.
pub const ANONYMOUS: &str = "Anonymous";

/// Recipient used when a stored row carries none.
pub const ANYONE: &str = "Anyone";

/// Advisory tone labels.  The store accepts any string; these are the ones
/// the UI offers and styles.
pub const TONES: [&str; 6] = [
    "inspirational",
    "encouraging",
    "funny",
    "calm",
    "formal",
    "custom",
];

/// One message on the board.
///
/// All fields are opaque strings as far as storage is concerned.  `id` is
/// assigned once at creation and never changes; `timestamp` is a fixed-width
/// `YYYY-MM-DD HH:MM:SS UTC` string assigned by the caller, not the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub id: String,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_recipient")]
    pub recipient: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub timestamp: String,
}

fn default_name() -> String {
    ANONYMOUS.to_string()
}

fn default_recipient() -> String {
    ANYONE.to_string()
}

impl Message {
    /// Build a new record from submitted form fields: fresh v4 UUID, current
    /// UTC timestamp, blank names replaced with [`ANONYMOUS`].
    ///
    /// The body is stored as given; the caller validates non-emptiness before
    /// constructing a record.
    pub fn new(name: &str, recipient: &str, body: &str, tone: &str) -> Self {
        let name = name.trim();
        Self {
            id: Uuid::new_v4().to_string(),
            name: if name.is_empty() {
                ANONYMOUS.to_string()
            } else {
                name.to_string()
            },
            recipient: recipient.to_string(),
            message: body.to_string(),
            tone: tone.to_string(),
            timestamp: utc_timestamp(),
        }
    }

    /// Positional sheet row in [`SHEET_HEADER`] column order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.recipient.clone(),
            self.message.clone(),
            self.tone.clone(),
            self.timestamp.clone(),
        ]
    }

    /// Decode a positional sheet row.  Cells missing from a short row take
    /// the same defaults as absent JSON keys; cells that are present but
    /// empty are kept as-is.
    pub fn from_row(row: &[String]) -> Self {
        let cell = |i: usize| row.get(i).cloned();
        Self {
            id: cell(0).unwrap_or_default(),
            name: cell(1).unwrap_or_else(default_name),
            recipient: cell(2).unwrap_or_else(default_recipient),
            message: cell(3).unwrap_or_default(),
            tone: cell(4).unwrap_or_default(),
            timestamp: cell(5).unwrap_or_default(),
        }
    }
}

/// Current wall-clock time as `YYYY-MM-DD HH:MM:SS UTC`.
pub fn utc_timestamp() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format_utc(secs)
}

/// Format seconds since the UNIX epoch as `YYYY-MM-DD HH:MM:SS UTC`.
pub fn format_utc(secs: u64) -> String {
    let (y, m, d) = crate::logging::civil_from_epoch(secs);
    let time_secs = secs % 86400;
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02} UTC",
        y,
        m,
        d,
        time_secs / 3600,
        (time_secs % 3600) / 60,
        time_secs % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_blank_name() {
        let m = Message::new("  ", "Everyone", "Good luck!", "calm");
        assert_eq!(m.name, ANONYMOUS);
        assert_eq!(m.recipient, "Everyone");
        assert_eq!(m.message, "Good luck!");
        assert_eq!(m.tone, "calm");
        assert!(!m.id.is_empty());
        assert!(m.timestamp.ends_with(" UTC"));
    }

    #[test]
    fn test_new_ids_are_unique() {
        let a = Message::new("Ann", "Bob", "hi", "calm");
        let b = Message::new("Ann", "Bob", "hi", "calm");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_row_round_trip() {
        let m = Message {
            id: "1".to_string(),
            name: "Ann".to_string(),
            recipient: "Bob".to_string(),
            message: "Good luck!\nYou got this.".to_string(),
            tone: "calm".to_string(),
            timestamp: "2024-01-01 00:00:00 UTC".to_string(),
        };
        let row = m.to_row();
        assert_eq!(row.len(), SHEET_HEADER.len());
        assert_eq!(Message::from_row(&row), m);
    }

    #[test]
    fn test_from_short_row_takes_defaults() {
        let row = vec!["42".to_string()];
        let m = Message::from_row(&row);
        assert_eq!(m.id, "42");
        assert_eq!(m.name, ANONYMOUS);
        assert_eq!(m.recipient, ANYONE);
        assert_eq!(m.message, "");
        assert_eq!(m.tone, "");
        assert_eq!(m.timestamp, "");
    }

    #[test]
    fn test_empty_cells_are_kept() {
        // A present-but-empty name cell stays empty; only absence defaults.
        let row: Vec<String> = ["42", "", "", "", "", ""]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let m = Message::from_row(&row);
        assert_eq!(m.name, "");
        assert_eq!(m.recipient, "");
    }

    #[test]
    fn test_json_absent_keys_take_defaults() {
        let m: Message = serde_json::from_str(r#"{"id":"7"}"#).unwrap();
        assert_eq!(m.id, "7");
        assert_eq!(m.name, ANONYMOUS);
        assert_eq!(m.recipient, ANYONE);
        assert_eq!(m.message, "");
        assert_eq!(m.tone, "");
        assert_eq!(m.timestamp, "");
    }

    #[test]
    fn test_format_utc() {
        assert_eq!(format_utc(1_704_067_200), "2024-01-01 00:00:00 UTC");
        assert_eq!(format_utc(1_704_067_200 + 3661), "2024-01-01 01:01:01 UTC");
    }
}
