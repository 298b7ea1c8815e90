//! Workflow document emission.
//!
//! Thin wrapper over serde_yaml and a filesystem write. The write is
//! all-or-nothing: serialization happens fully in memory before any file is
//! touched, so a failure never leaves a partial document behind.

use crate::document::WorkflowDocument;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to serialize workflow document: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Serialize `document` and write it to `{dir}/{id}.yml`, returning the
/// path. An existing file at that path is overwritten silently; the
/// validated workflow name makes collisions an operator choice, not an
/// accident.
pub fn write_document(document: &WorkflowDocument, dir: &Path) -> Result<PathBuf, EmitError> {
    let path = dir.join(format!("{}.yml", document.id));
    let yaml = serde_yaml::to_string(document)?;

    fs::write(&path, yaml).map_err(|source| EmitError::Write {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}
