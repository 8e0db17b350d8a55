//! Classified persistence failures.

use std::path::PathBuf;

use thiserror::Error;

/// Failures routed through a handler's error callback rather than the
/// return path. Anything not classified here (disk full, read/write
/// permission denied) propagates to the caller as a hard failure.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The destination directory is missing and auto-creation is disabled.
    /// Recoverable: retry with `create_dest_paths` enabled.
    #[error("{} not found, unable to create {artifact}", .path.display())]
    DestinationPathNotFound { path: PathBuf, artifact: String },

    /// Permission bits could not be applied after a successful write; the
    /// write stands.
    #[error("unable to set mode {mode:o} on {}: {source}", .path.display())]
    SetPermissions {
        path: PathBuf,
        mode: u32,
        #[source]
        source: std::io::Error,
    },
}

impl PersistenceError {
    /// Numeric code exposed to host callbacks.
    pub fn code(&self) -> u32 {
        match self {
            Self::DestinationPathNotFound { .. } => 100,
            Self::SetPermissions { .. } => 9999,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        let missing = PersistenceError::DestinationPathNotFound {
            path: PathBuf::from("/tmp/out"),
            artifact: "report.md".to_string(),
        };
        assert_eq!(missing.code(), 100);
        assert!(missing.to_string().contains("/tmp/out"));

        let chmod = PersistenceError::SetPermissions {
            path: PathBuf::from("/tmp/out/report.md"),
            mode: 0o755,
            source: std::io::Error::other("denied"),
        };
        assert_eq!(chmod.code(), 9999);
        assert!(chmod.to_string().contains("755"));
    }
}
