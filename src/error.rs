//! Error types
//!
//! Only asset loading is fatal. Storage errors are surfaced to the caller,
//! which logs them and carries on with defaults.

use thiserror::Error;

/// Failure to bring up the required assets; the session cannot start
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset manifest is empty")]
    EmptyManifest,
    #[error("duplicate asset key `{0}`")]
    DuplicateKey(String),
    #[error("failed to load asset `{key}` from {src}")]
    Load { key: String, src: String },
    #[error("no browser window or document available")]
    NoDocument,
}

/// Best-score / settings storage failures
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("local storage is unavailable")]
    Unavailable,
    #[error("failed to write key `{0}`")]
    Write(String),
    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}
