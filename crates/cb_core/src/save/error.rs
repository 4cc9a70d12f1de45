use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corrupted data")]
    Corrupted,

    #[error("Checksum mismatch")]
    ChecksumMismatch,

    #[error("Version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("Store key mismatch: found {found}, expected {expected}")]
    KeyMismatch { found: String, expected: String },

    #[error("Unknown store key: {0}")]
    UnknownStoreKey(String),

    #[error("Snapshot not found: {path}")]
    FileNotFound { path: String },

    #[error("Store too large: {count} entries in {store}")]
    DataTooLarge { store: String, count: usize },
}

impl SaveError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            SaveError::Io(_) => true,
            SaveError::FileNotFound { .. } => true,
            SaveError::VersionMismatch { .. } => true, // Can try migration
            SaveError::Corrupted => false,
            SaveError::ChecksumMismatch => false,
            _ => false,
        }
    }
}
