use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::{DirEntry, WalkDir};

use crate::error::MigrateError;
use crate::rewrite::rewrite_source;

/// What to scan and whether to write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrateOptions {
    /// File extensions to rewrite, without the leading dot.
    pub extensions: Vec<String>,

    /// Directory names skipped wherever they appear below the root.
    pub exclude: Vec<String>,

    /// Report changes without writing any file.
    pub dry_run: bool,
}

impl Default for MigrateOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["rb".to_owned()],
            exclude: [".git", "vendor", "node_modules", "tmp"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            dry_run: false,
        }
    }
}

impl MigrateOptions {
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    fn wants_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    fn skips_dir(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.exclude.iter().any(|e| e == name))
    }
}

/// One rewritten (or, in a dry run, rewritable) file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChange {
    pub path: PathBuf,
    /// 1-based numbers of the rewritten lines.
    pub lines: Vec<usize>,
}

/// Summary of a migration run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Every file that was read, in traversal order.
    pub scanned: Vec<PathBuf>,
    /// Files with at least one rewritten line.
    pub changed: Vec<FileChange>,
    /// Files skipped because they are not UTF-8.
    pub skipped: Vec<PathBuf>,
    pub dry_run: bool,
}

impl MigrationReport {
    /// Whether no file needed a change.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.changed.is_empty()
    }

    #[must_use]
    pub fn changed_lines(&self) -> usize {
        self.changed.iter().map(|c| c.lines.len()).sum()
    }
}

/// Rewrite every legacy declaration below `root`.
///
/// Files are visited in file-name order. A file is written back only when at
/// least one of its lines changed, and never in a dry run. Running twice
/// changes nothing the second time.
///
/// `root` may also name a single file.
///
/// # Errors
///
/// [`MigrateError::RootNotFound`] if `root` does not exist; I/O and traversal
/// failures abort the run.
pub fn migrate(root: &Path, options: &MigrateOptions) -> Result<MigrationReport, MigrateError> {
    if !root.exists() {
        return Err(MigrateError::RootNotFound {
            path: root.to_owned(),
        });
    }

    let span = tracing::info_span!("migrate", root = %root.display(), dry_run = options.dry_run);
    let _guard = span.enter();

    let mut report = MigrationReport {
        dry_run: options.dry_run,
        ..MigrationReport::default()
    };

    let entries = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !options.skips_dir(entry));

    for entry in entries {
        let entry = entry?;
        if !entry.file_type().is_file() || !options.wants_file(entry.path()) {
            continue;
        }
        let path = entry.path();

        let bytes = fs::read(path).map_err(|source| MigrateError::io(path, source))?;
        let Ok(source) = String::from_utf8(bytes) else {
            tracing::warn!(path = %path.display(), "skipping file that is not UTF-8");
            report.skipped.push(path.to_owned());
            continue;
        };
        report.scanned.push(path.to_owned());

        let rewrite = rewrite_source(&source);
        if !rewrite.is_changed() {
            tracing::trace!(path = %path.display(), "unchanged");
            continue;
        }

        if options.dry_run {
            tracing::debug!(path = %path.display(), lines = rewrite.changed_lines.len(), "would rewrite");
        } else {
            fs::write(path, &rewrite.text).map_err(|source| MigrateError::io(path, source))?;
            tracing::info!(path = %path.display(), lines = rewrite.changed_lines.len(), "rewrote");
        }

        report.changed.push(FileChange {
            path: path.to_owned(),
            lines: rewrite.changed_lines,
        });
    }

    tracing::info!(
        scanned = report.scanned.len(),
        changed = report.changed.len(),
        "migration finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let options = MigrateOptions::default();
        assert_eq!(options.extensions, vec!["rb"]);
        assert!(options.exclude.iter().any(|e| e == "vendor"));
        assert!(!options.dry_run);
    }

    #[test]
    fn extension_match_is_exact() {
        let options = MigrateOptions::default();
        assert!(options.wants_file(Path::new("app/services/a.rb")));
        assert!(!options.wants_file(Path::new("app/services/a.rbx")));
        assert!(!options.wants_file(Path::new("app/services/Rakefile")));
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: MigrateOptions =
            serde_json::from_str(r#"{"extensions": ["rb", "rake"]}"#).unwrap();
        assert_eq!(options.extensions, vec!["rb", "rake"]);
        assert_eq!(options.exclude, MigrateOptions::default().exclude);
    }

    #[test]
    fn missing_root_is_reported() {
        let err = migrate(Path::new("/definitely/not/here"), &MigrateOptions::default())
            .unwrap_err();
        assert_eq!(err.code(), "MIGRATE_ROOT_NOT_FOUND");
    }
}
