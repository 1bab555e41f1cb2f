//! Blocking client for the spreadsheet service that backs the primary store.
//!
//! The service is row-oriented: one spreadsheet addressed by title, the
//! first row a fixed column header, every following row one message record.
//! All calls are plain HTTP with a bearer token obtained from the service's
//! token endpoint using a service-account credential bundle.
//!
//! Connection establishment is deliberately all-or-nothing: any failure to
//! load or validate credentials, authorize, open or create the spreadsheet,
//! or bootstrap the header row yields `None`, and the caller falls back to
//! the local file store for the rest of the session.

use std::path::Path;

use serde::Deserialize;

use crate::record::{Message, SHEET_HEADER};

/// Service-account credential bundle, loaded from a JSON file.
///
/// The file is treated as opaque configuration; only the presence of the
/// required fields is checked here.
#[derive(Debug, Deserialize)]
pub struct ServiceCredentials {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub private_key_id: String,
    #[serde(default)]
    pub private_key: String,
    #[serde(default)]
    pub client_email: String,
}

impl ServiceCredentials {
    /// Load the bundle from disk.
    pub fn load(path: &Path) -> Result<Self, String> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| format!("read credentials {}: {e}", path.display()))?;
        serde_json::from_str(&data).map_err(|e| format!("parse credentials: {e}"))
    }

    /// Check that every required field is present and non-empty.
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("type", &self.kind),
            ("project_id", &self.project_id),
            ("private_key_id", &self.private_key_id),
            ("private_key", &self.private_key),
            ("client_email", &self.client_email),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(format!("credentials missing fields: {}", missing.join(", ")))
        }
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct SpreadsheetRef {
    spreadsheet_id: String,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// Handle to one spreadsheet on the remote service.
pub struct SheetClient {
    api_url: String,
    token: String,
    spreadsheet_id: String,
}

impl SheetClient {
    /// Establish the primary backend: load and validate credentials,
    /// authorize, open the spreadsheet by title (creating and sharing it if
    /// absent), and make sure the header row exists.
    ///
    /// Returns `None` on any failure; the reason is logged, never raised.
    pub fn connect(api_url: &str, credentials_path: &Path, sheet_title: &str) -> Option<Self> {
        let creds = match ServiceCredentials::load(credentials_path) {
            Ok(c) => c,
            Err(e) => {
                crate::wlog!("sheet backend unavailable: {}", e);
                return None;
            }
        };
        if let Err(e) = creds.validate() {
            crate::wlog!("sheet backend unavailable: {}", e);
            return None;
        }

        let api_url = api_url.trim_end_matches('/').to_string();
        let token = match authorize(&api_url, &creds) {
            Ok(t) => t,
            Err(e) => {
                crate::wlog!("sheet backend unavailable: {}", e);
                return None;
            }
        };

        let spreadsheet_id = match open_or_create(&api_url, &token, sheet_title) {
            Ok(id) => id,
            Err(e) => {
                crate::wlog!("sheet backend unavailable: {}", e);
                return None;
            }
        };

        let client = Self {
            api_url,
            token,
            spreadsheet_id,
        };
        if let Err(e) = client.ensure_header() {
            crate::wlog!("sheet backend unavailable: {}", e);
            return None;
        }
        Some(client)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    fn fetch_values(&self) -> Result<Vec<Vec<String>>, String> {
        let url = format!(
            "{}/spreadsheets/{}/values",
            self.api_url, self.spreadsheet_id
        );
        let range: ValueRange = ureq::get(&url)
            .set("Authorization", &self.bearer())
            .call()
            .map_err(|e| format!("sheet fetch failed: {e}"))?
            .into_json()
            .map_err(|e| format!("deserialize sheet values: {e}"))?;
        Ok(range.values)
    }

    fn append_values(&self, values: &[Vec<String>]) -> Result<(), String> {
        let url = format!(
            "{}/spreadsheets/{}/values/append",
            self.api_url, self.spreadsheet_id
        );
        ureq::post(&url)
            .set("Authorization", &self.bearer())
            .send_json(serde_json::json!({ "values": values }))
            .map_err(|e| format!("sheet append failed: {e}"))?;
        Ok(())
    }

    /// Emit the header row if the sheet has no rows at all.
    fn ensure_header(&self) -> Result<(), String> {
        if self.fetch_values()?.is_empty() {
            let header: Vec<String> = SHEET_HEADER.iter().map(|s| s.to_string()).collect();
            self.append_values(&[header])?;
        }
        Ok(())
    }

    /// Fetch every record currently in the sheet, in row order.
    ///
    /// Rows whose ID cell is blank or the literal header value are skipped;
    /// stray duplicated header rows have shown up in stored data in practice.
    pub fn read_all(&self) -> Result<Vec<Message>, String> {
        let rows = self.fetch_values()?;
        let mut records = Vec::new();
        for row in &rows {
            let id = row.first().map(String::as_str).unwrap_or("");
            if id.trim().is_empty() || id == "ID" {
                continue;
            }
            records.push(Message::from_row(row));
        }
        Ok(records)
    }

    /// Replace the sheet's full contents: clear, then re-emit the header row
    /// and one row per record in the given order, as a single batch append.
    pub fn write_all(&self, records: &[Message]) -> Result<(), String> {
        let url = format!(
            "{}/spreadsheets/{}/values/clear",
            self.api_url, self.spreadsheet_id
        );
        ureq::post(&url)
            .set("Authorization", &self.bearer())
            .call()
            .map_err(|e| format!("sheet clear failed: {e}"))?;

        let mut values: Vec<Vec<String>> = Vec::with_capacity(records.len() + 1);
        values.push(SHEET_HEADER.iter().map(|s| s.to_string()).collect());
        values.extend(records.iter().map(Message::to_row));
        self.append_values(&values)
    }
}

/// Exchange the credential bundle for a bearer token.
fn authorize(api_url: &str, creds: &ServiceCredentials) -> Result<String, String> {
    let url = format!("{api_url}/token");
    let response: TokenResponse = ureq::post(&url)
        .send_json(serde_json::json!({
            "grant_type": "service_account",
            "client_email": creds.client_email,
            "private_key_id": creds.private_key_id,
        }))
        .map_err(|e| format!("authorization failed: {e}"))?
        .into_json()
        .map_err(|e| format!("deserialize token: {e}"))?;
    Ok(response.access_token)
}

/// Open the spreadsheet by title, or create it (shared with open write
/// access, like the original board) when the service reports it missing.
fn open_or_create(api_url: &str, token: &str, title: &str) -> Result<String, String> {
    let bearer = format!("Bearer {token}");
    let url = format!("{api_url}/spreadsheets/by-title/{title}");
    match ureq::get(&url).set("Authorization", &bearer).call() {
        Ok(resp) => {
            let sheet: SpreadsheetRef = resp
                .into_json()
                .map_err(|e| format!("deserialize spreadsheet ref: {e}"))?;
            Ok(sheet.spreadsheet_id)
        }
        Err(ureq::Error::Status(404, _)) => {
            let resp = ureq::post(&format!("{api_url}/spreadsheets"))
                .set("Authorization", &bearer)
                .send_json(serde_json::json!({ "title": title }))
                .map_err(|e| format!("create spreadsheet failed: {e}"))?;
            let sheet: SpreadsheetRef = resp
                .into_json()
                .map_err(|e| format!("deserialize spreadsheet ref: {e}"))?;
            ureq::post(&format!(
                "{api_url}/spreadsheets/{}/permissions",
                sheet.spreadsheet_id
            ))
            .set("Authorization", &bearer)
            .send_json(serde_json::json!({ "perm_type": "anyone", "role": "writer" }))
            .map_err(|e| format!("share spreadsheet failed: {e}"))?;
            Ok(sheet.spreadsheet_id)
        }
        Err(e) => Err(format!("open spreadsheet failed: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_missing_fields() {
        let creds: ServiceCredentials = serde_json::from_str(
            r#"{"type":"service_account","project_id":"p","private_key_id":"k"}"#,
        )
        .unwrap();
        let err = creds.validate().unwrap_err();
        assert!(err.contains("private_key"));
        assert!(err.contains("client_email"));
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let creds: ServiceCredentials = serde_json::from_str(
            r#"{"type":"service_account","project_id":"p","private_key_id":"k",
                "private_key":"  ","client_email":"a@b.c"}"#,
        )
        .unwrap();
        assert!(creds.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_complete_bundle() {
        let creds: ServiceCredentials = serde_json::from_str(
            r#"{"type":"service_account","project_id":"p","private_key_id":"k",
                "private_key":"pem","client_email":"a@b.c"}"#,
        )
        .unwrap();
        assert!(creds.validate().is_ok());
    }
}
