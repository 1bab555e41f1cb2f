//! Message persistence: local JSON file store and the dual-backend facade.
//!
//! The [`Board`] facade is the only storage surface the rest of the
//! application sees.  It resolves its backend once at construction (remote
//! sheet if configured and reachable, local file otherwise) and hides every
//! backend failure behind a fail-open policy: reads degrade to the file
//! store and then to an empty collection, writes fall through to the file
//! store and are dropped with a log line if that also fails.  No call ever
//! returns an error to the caller.

use std::fs;
use std::path::{Path, PathBuf};

use crate::record::Message;
use crate::sheets::SheetClient;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Serde(serde_json::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "io error: {e}"),
            StorageError::Serde(e) => write!(f, "serialization error: {e}"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serde(e)
    }
}

// ---------------------------------------------------------------------------
// Local file store
// ---------------------------------------------------------------------------

/// File name of the fallback store inside the data directory.
pub const DATA_FILE_NAME: &str = "messages.json";

/// Local fallback store: one pretty-printed JSON array of records.
///
/// Human-readable on purpose, so the file can be inspected and hand-edited
/// when the board runs without its remote backend.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(DATA_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record.  A missing file or a file that fails to parse is
    /// an empty collection, never an error.
    pub fn read_all(&self) -> Vec<Message> {
        let data = match fs::read_to_string(&self.path) {
            Ok(d) => d,
            Err(_) => return Vec::new(),
        };
        serde_json::from_str(&data).unwrap_or_default()
    }

    /// Overwrite the file with the full serialized collection.
    pub fn write_all(&self, records: &[Message]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Storage facade
// ---------------------------------------------------------------------------

/// Everything the facade needs to resolve its backend once at startup.
pub struct BoardConfig {
    pub data_dir: PathBuf,
    /// Base URL of the sheet service.  `None` disables the primary backend.
    pub sheet_api: Option<String>,
    pub credentials_path: PathBuf,
    pub sheet_title: String,
}

/// One durable, order-preserving collection of [`Message`] records.
///
/// `append` and `delete_by_id` are whole-collection read-modify-write:
/// two processes racing will lose one of the updates.  That limitation is
/// part of the observable contract; callers that need isolation must layer
/// it on explicitly.
pub struct Board {
    sheet: Option<SheetClient>,
    file: FileStore,
}

impl Board {
    /// Resolve the backend and build the facade.  The primary connection is
    /// attempted exactly once; after a failure here every call for the rest
    /// of the process uses the file store.
    pub fn open(config: &BoardConfig) -> Self {
        let file = FileStore::new(&config.data_dir);
        let sheet = config.sheet_api.as_deref().and_then(|api_url| {
            SheetClient::connect(api_url, &config.credentials_path, &config.sheet_title)
        });
        match sheet {
            Some(_) => crate::wlog!("storage: sheet backend connected"),
            None => crate::wlog!("storage: local file {}", file.path().display()),
        }
        Self { sheet, file }
    }

    /// Build a facade with no primary backend, file store only.
    pub fn local(data_dir: &Path) -> Self {
        Self {
            sheet: None,
            file: FileStore::new(data_dir),
        }
    }

    /// Whether the primary backend was reachable at startup.
    pub fn connected(&self) -> bool {
        self.sheet.is_some()
    }

    pub fn backend_name(&self) -> &'static str {
        if self.sheet.is_some() {
            "sheets"
        } else {
            "local"
        }
    }

    /// Every record in storage order (append order, oldest first).
    /// Consumers that want newest-first reverse it themselves.
    pub fn read_all(&self) -> Vec<Message> {
        if let Some(sheet) = &self.sheet {
            match sheet.read_all() {
                Ok(records) => return records,
                Err(e) => crate::wlog!("sheet read failed, using local file: {}", e),
            }
        }
        self.file.read_all()
    }

    /// Replace the entire collection.  Destructive overwrite, not a merge.
    pub fn write_all(&self, records: &[Message]) {
        if let Some(sheet) = &self.sheet {
            match sheet.write_all(records) {
                Ok(()) => return,
                Err(e) => crate::wlog!("sheet write failed, using local file: {}", e),
            }
        }
        if let Err(e) = self.file.write_all(records) {
            crate::wlog!("local write failed, dropping {} record(s): {}", records.len(), e);
        }
    }

    /// Append one record.  Whole-collection read-modify-write, not an atomic
    /// primitive; concurrent appenders can lose an update.
    pub fn append(&self, record: Message) {
        let mut records = self.read_all();
        records.push(record);
        self.write_all(&records);
    }

    /// Remove every record with the given id.  A no-op, not an error, when
    /// the id is not present.
    pub fn delete_by_id(&self, id: &str) {
        let mut records = self.read_all();
        records.retain(|m| m.id != id);
        self.write_all(&records);
    }
}
