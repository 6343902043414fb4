use crate::{Result, StoreError, record::StateRecord};
use pressroom_common::model::state::State;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

/// Parses a store snapshot from JSON text.
pub fn parse_state(json: &str) -> Result<State> {
    let record: StateRecord = serde_json::from_str(json)?;
    State::try_from(record)
}

/// A snapshot file that is re-read on every load, so edits to it show up in the next view.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<State> {
        let json = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        let state = parse_state(&json)?;

        debug!(
            path = %self.path.display(),
            articles = ?state.articles.as_ref().map(Vec::len),
            has_user = state.user.is_some(),
            "Loaded snapshot"
        );
        Ok(state)
    }
}
