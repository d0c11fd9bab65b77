//! Storage seam for target files.
//!
//! The pipeline only ever reads a whole file and writes a whole file back.
//! [`FsStore`] replaces files atomically so an interrupted run leaves either
//! the previous or the regenerated content behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{GenerateError, GenerateResult};

pub trait ArtifactStore {
    fn read(&self, path: &Path) -> GenerateResult<String>;
    fn write(&self, path: &Path, content: &str) -> GenerateResult<()>;
}

/// Local filesystem store.
#[derive(Debug, Clone, Default)]
pub struct FsStore {
    /// Copy `<file>` to `<file>.bak` before replacing it
    pub create_backups: bool,
}

impl FsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backups(mut self, enabled: bool) -> Self {
        self.create_backups = enabled;
        self
    }

    fn replace_atomically(&self, path: &Path, content: &str) -> io::Result<()> {
        if self.create_backups {
            let backup = backup_path(path);
            fs::copy(path, &backup)?;
            tracing::debug!(backup = %backup.display(), "created backup");
        }

        let parent = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut temp_file = NamedTempFile::new_in(parent)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.flush()?;

        // Keep the target's mode instead of the temp file's private one.
        if let Ok(metadata) = fs::metadata(path) {
            temp_file.as_file().set_permissions(metadata.permissions())?;
        }

        temp_file.persist(path).map_err(|err| err.error)?;
        Ok(())
    }
}

impl ArtifactStore for FsStore {
    fn read(&self, path: &Path) -> GenerateResult<String> {
        fs::read_to_string(path).map_err(|source| GenerateError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write(&self, path: &Path, content: &str) -> GenerateResult<()> {
        self.replace_atomically(path, content)
            .map_err(|source| GenerateError::Write {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// `src/vst.h` -> `src/vst.h.bak`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".bak");
    PathBuf::from(name)
}
