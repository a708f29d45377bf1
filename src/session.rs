// Session persistence - saving and restoring the operation history
//
// A session file is the ordered list of every composite operation the
// manager executed, wrapped in a versioned envelope. Loading reproduces
// operations that replay and undo identically; it promises semantic
// equivalence of the resulting structure state, not identical bytes.

use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::manager::OperationManager;
use crate::operation::UserOperation;

/// Version of the session file layout
pub const FORMAT_VERSION: u32 = 1;

/// On-disk envelope for a saved session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFile {
    pub format_version: u32,
    /// RFC 3339 save time
    pub saved_at: String,
    /// Executed composite operations, oldest first
    pub operations: Vec<UserOperation>,
}

/// Session persistence error types
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("RON error: {0}")]
    Ron(#[from] ron::Error),

    #[error("RON parse error: {0}")]
    RonParse(#[from] ron::error::SpannedError),

    #[error("unsupported session file format: {0:?}")]
    UnsupportedFormat(String),

    #[error("unsupported session format version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },
}

enum Format {
    Json,
    Ron,
}

fn format_for(path: &Path) -> Result<Format, SessionError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("ron") => Ok(Format::Ron),
        other => Err(SessionError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

/// Write the manager's executed-operation history to `path`
///
/// The format follows the file extension: `.json` or `.ron`.
pub fn save_history(path: &Path, manager: &OperationManager) -> Result<(), SessionError> {
    let session = SessionFile {
        format_version: FORMAT_VERSION,
        saved_at: Utc::now().to_rfc3339(),
        operations: manager.history().to_vec(),
    };

    let contents = match format_for(path)? {
        Format::Json => serde_json::to_string_pretty(&session)?,
        Format::Ron => ron::to_string(&session)?,
    };
    fs::write(path, contents)?;
    Ok(())
}

/// Read a saved history back from `path`
///
/// A version mismatch means a corrupted or incompatible session and
/// fails the whole load; nothing is partially applied.
pub fn load_history(path: &Path) -> Result<Vec<UserOperation>, SessionError> {
    let contents = fs::read_to_string(path)?;
    let session: SessionFile = match format_for(path)? {
        Format::Json => serde_json::from_str(&contents)?,
        Format::Ron => ron::from_str(&contents)?,
    };

    if session.format_version != FORMAT_VERSION {
        return Err(SessionError::Version {
            found: session.format_version,
            expected: FORMAT_VERSION,
        });
    }
    Ok(session.operations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension() {
        let manager = OperationManager::new();
        let result = save_history(Path::new("session.yaml"), &manager);
        assert!(matches!(result, Err(SessionError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_version_mismatch_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let stale = SessionFile {
            format_version: FORMAT_VERSION + 1,
            saved_at: "2026-01-01T00:00:00Z".to_string(),
            operations: Vec::new(),
        };
        fs::write(&path, serde_json::to_string(&stale).unwrap()).unwrap();

        let result = load_history(&path);
        assert!(matches!(
            result,
            Err(SessionError::Version { found, expected })
                if found == FORMAT_VERSION + 1 && expected == FORMAT_VERSION
        ));
    }
}
