use std::{io, path::PathBuf, process::ExitStatus};

use thiserror::Error;

/// Everything that can go wrong while collecting log lines.
///
/// None of these abort the program: each one is reported as a single line
/// and the scan either falls back to the journal or ends with no events.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("insufficient permissions to read {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to run journalctl: {source}")]
    JournalSpawn {
        #[source]
        source: io::Error,
    },

    #[error("journalctl exited with {status}: {stderr}")]
    JournalFailed { status: ExitStatus, stderr: String },
}

impl ScanError {
    // Permission problems get their own advice, everything else is a plain read failure.
    pub fn from_read(path: impl Into<PathBuf>, err: io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            io::ErrorKind::PermissionDenied => ScanError::PermissionDenied { path },
            _ => ScanError::FileRead { path, source: err },
        }
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, ScanError::PermissionDenied { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_errors_are_kept_apart() {
        let err = ScanError::from_read(
            "/var/log/auth.log",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.is_permission_denied());
        assert_eq!(
            err.to_string(),
            "insufficient permissions to read /var/log/auth.log"
        );
    }

    #[test]
    fn other_errors_become_read_failures() {
        let err = ScanError::from_read("/tmp/x", io::Error::other("boom"));
        assert!(!err.is_permission_denied());
        assert_eq!(err.to_string(), "failed to read /tmp/x: boom");
    }
}
