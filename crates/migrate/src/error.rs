use std::io;
use std::path::PathBuf;

/// Error type for a migration run.
///
/// Any of these aborts the run. Files already rewritten stay rewritten;
/// rerunning is safe because the rewrite is idempotent.
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    /// The migration root does not exist.
    #[error("migration root not found: {}", .path.display())]
    RootNotFound { path: PathBuf },

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Directory traversal failed (permissions, symlink loops).
    #[error("failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),
}

impl MigrateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::RootNotFound { .. } => "MIGRATE_ROOT_NOT_FOUND",
            Self::Io { .. } => "MIGRATE_IO",
            Self::Walk(_) => "MIGRATE_WALK",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = MigrateError::RootNotFound {
            path: PathBuf::from("app/services"),
        };
        assert_eq!(err.to_string(), "migration root not found: app/services");
        assert_eq!(err.code(), "MIGRATE_ROOT_NOT_FOUND");

        let err = MigrateError::io(
            "a.rb",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "I/O error on a.rb: denied");
        assert_eq!(err.code(), "MIGRATE_IO");
    }
}
