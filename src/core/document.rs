//! Document loading and saving.
//!
//! The export is a single JSON file read fully into memory. Object key
//! order is preserved end to end (`serde_json` with `preserve_order`), so
//! everything except rewritten `content` strings round-trips unchanged.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

/// Errors at the load/save boundary of a run.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("input file `{0}` not found")]
    NotFound(PathBuf),

    #[error("`{0}` is not valid JSON")]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("failed to serialize document")]
    Serialize(#[source] serde_json::Error),

    #[error("IO error on `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}

/// Load a JSON document from disk.
///
/// The existence check comes first so a missing export is reported as
/// [`DocumentError::NotFound`] rather than a bare IO error.
pub fn load_document(path: &Path) -> Result<Value, DocumentError> {
    if !path.exists() {
        return Err(DocumentError::NotFound(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path).map_err(|err| DocumentError::Io(path.to_path_buf(), err))?;
    serde_json::from_str(&raw).map_err(|err| DocumentError::Parse(path.to_path_buf(), err))
}

/// Serialize a document and write it to `path`, replacing prior content.
///
/// Compact separators (no space after `,` or `:`); non-ASCII text is written
/// literally, not escaped.
pub fn write_document(path: &Path, doc: &Value) -> Result<(), DocumentError> {
    let serialized = serde_json::to_string(doc).map_err(DocumentError::Serialize)?;
    fs::write(path, serialized).map_err(|err| DocumentError::Io(path.to_path_buf(), err))
}
