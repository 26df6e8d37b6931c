use std::fs;
use std::path::Path;

use crate::error::ProbeError;

/// Result of stat-ing an existing path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStat {
    pub is_dir: bool,
}

/// One immediate entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub name: String,
    pub is_dir: bool,
}

/// The only I/O boundary of the tree browser: stat a path, list one level.
pub trait FilesystemProbe {
    /// Stat `path`, following symlinks.
    fn stat(&self, path: &Path) -> Result<PathStat, ProbeError>;

    /// List the immediate entries of `path`, sorted by name. Never recurses.
    fn list_children(&self, path: &Path) -> Result<Vec<EntryInfo>, ProbeError>;
}

/// Probe backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdProbe;

impl FilesystemProbe for StdProbe {
    fn stat(&self, path: &Path) -> Result<PathStat, ProbeError> {
        let metadata = fs::metadata(path).map_err(|e| ProbeError::from_io(path, e))?;
        Ok(PathStat {
            is_dir: metadata.is_dir(),
        })
    }

    /// Entries whose type cannot be read are skipped. Symlinks are reported
    /// by their own type, so a link to a directory lists as a non-directory.
    fn list_children(&self, path: &Path) -> Result<Vec<EntryInfo>, ProbeError> {
        let entries = fs::read_dir(path).map_err(|e| ProbeError::from_io(path, e))?;

        let mut children = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(dir = %path.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            let file_type = match entry.file_type() {
                Ok(t) => t,
                Err(e) => {
                    tracing::warn!(entry = %entry.path().display(), error = %e, "skipping entry without type");
                    continue;
                }
            };
            children.push(EntryInfo {
                name: entry.file_name().to_string_lossy().to_string(),
                is_dir: file_type.is_dir(),
            });
        }

        children.sort_by(|a, b| a.name.cmp(&b.name));
        tracing::debug!(dir = %path.display(), count = children.len(), "listed directory");
        Ok(children)
    }
}
