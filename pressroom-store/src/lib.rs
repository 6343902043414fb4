//! Loading of client store snapshots.
//!
//! Snapshots are JSON documents in the shape the blog client keeps its store in. Parsing is
//! lenient about list fields so that the derived views can degrade to empty results instead
//! of failing.

pub mod snapshot;

mod record;

use pressroom_common::model::ModelValidationError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Could not read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Snapshot is not valid JSON for a store: {0}")]
    Json(#[from] serde_json::Error),
    #[error("A record in the snapshot was invalid: {0}")]
    Data(#[from] ModelValidationError),
}
