use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Failure of a single filesystem probe (stat or one-level listing).
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("{}: {source}", path.display())]
    Other {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ProbeError {
    /// Classify an I/O error raised while touching `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => ProbeError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => ProbeError::PermissionDenied(path.to_path_buf()),
            _ => ProbeError::Other {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from terminal or filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Invalid path provided by the user.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// The path exists but is not a directory.
    #[error("Path is not a directory: {0}")]
    NotADirectory(String),

    /// A stat or listing failed for a reason other than a missing path.
    #[error(transparent)]
    Probe(#[from] ProbeError),

    /// No known way to open a folder on this operating system.
    #[error("unsupported operating system: {0}")]
    UnsupportedPlatform(String),

    /// The file manager process could not be started.
    #[error("failed to launch {program}: {source}")]
    LaunchFailed {
        program: String,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("file not found"));
    }

    #[test]
    fn terminal_error_display() {
        let err = AppError::Terminal("failed to enter raw mode".into());
        assert_eq!(err.to_string(), "Terminal error: failed to enter raw mode");
    }

    #[test]
    fn invalid_path_error_display() {
        let err = AppError::InvalidPath("/nonexistent does not exist".into());
        assert_eq!(err.to_string(), "Invalid path: /nonexistent does not exist");
    }

    #[test]
    fn not_a_directory_display() {
        let err = AppError::NotADirectory("/etc/hosts".into());
        assert_eq!(err.to_string(), "Path is not a directory: /etc/hosts");
    }

    #[test]
    fn probe_error_classifies_io_kinds() {
        let path = Path::new("/x");
        let not_found = ProbeError::from_io(path, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(not_found, ProbeError::NotFound(_)));

        let denied = ProbeError::from_io(path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(denied, ProbeError::PermissionDenied(_)));
        assert_eq!(denied.to_string(), "permission denied: /x");

        let other = ProbeError::from_io(path, io::Error::new(io::ErrorKind::Other, "disk on fire"));
        assert!(matches!(other, ProbeError::Other { .. }));
        assert!(other.to_string().contains("disk on fire"));
    }

    #[test]
    fn unsupported_platform_display() {
        let err = AppError::UnsupportedPlatform("plan9".into());
        assert_eq!(err.to_string(), "unsupported operating system: plan9");
    }
}
