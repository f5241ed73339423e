use anyhow::{Context, Result};
use log::{debug, warn};
use std::ffi::OsString;
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};
use walkdir::WalkDir;

use crate::errors::SessionError;

// @module: File and directory utilities

/// Extensions recognized as translation files
const YAML_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    /// List `.yml`/`.yaml` files directly inside `dir`, sorted by file name
    pub fn list_yaml_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).min_depth(1).max_depth(1) {
            let entry = entry
                .with_context(|| format!("Failed to read directory entry in {:?}", dir.as_ref()))?;
            let path = entry.path();

            if path.is_file() && Self::is_yaml_file(path) {
                result.push(path.to_path_buf());
            }
        }

        result.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(result)
    }

    /// Whether the path has a YAML extension (case-insensitive)
    pub fn is_yaml_file<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref()
            .extension()
            .map(|ext| {
                let ext = ext.to_string_lossy();
                YAML_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false)
    }

    /// Append `.yml` unless the name already ends with it
    pub fn with_yml_extension(name: &str) -> String {
        if name.ends_with(".yml") {
            name.to_string()
        } else {
            format!("{}.yml", name)
        }
    }

    /// Path of the staging file for `target`
    pub fn staging_path<P: AsRef<Path>>(target: P, suffix: &str) -> PathBuf {
        let mut name: OsString = target.as_ref().as_os_str().to_owned();
        name.push(suffix);
        PathBuf::from(name)
    }
}

/// In-progress output next to the target file.
///
/// The file is created exclusively, so a second run against the same
/// target fails instead of interleaving with the first. Dropping a
/// `StagingFile` without calling [`StagingFile::commit`] deletes it and
/// leaves the target untouched.
pub struct StagingFile {
    writer: BufWriter<NamedTempFile>,
    path: PathBuf,
    target: PathBuf,
}

impl StagingFile {
    /// Create `<target><suffix>`. With `force`, a leftover staging file is removed first.
    pub fn create(target: &Path, suffix: &str, force: bool) -> Result<Self, SessionError> {
        let path = FileManager::staging_path(target, suffix);
        let staging_error = |source| SessionError::Staging {
            path: path.clone(),
            source,
        };

        if force && path.exists() {
            warn!("Removing leftover staging file {:?}", path);
            fs::remove_file(&path).map_err(staging_error)?;
        }

        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = target.file_name().ok_or_else(|| {
            staging_error(std::io::Error::new(
                ErrorKind::InvalidInput,
                format!("target path {:?} has no file name", target),
            ))
        })?;

        // No random part: the staging name is exactly <target><suffix>
        let file = Builder::new()
            .prefix(file_name)
            .suffix(suffix)
            .rand_bytes(0)
            .tempfile_in(&dir)
            .map_err(|e| {
                if e.kind() == ErrorKind::AlreadyExists {
                    SessionError::StagingInUse(path.clone())
                } else {
                    staging_error(e)
                }
            })?;

        // Temp files are created owner-only; the committed file keeps the target's mode
        if let Ok(metadata) = fs::metadata(target) {
            file.as_file()
                .set_permissions(metadata.permissions())
                .map_err(staging_error)?;
        }

        debug!("Staging output at {:?}", file.path());

        Ok(Self {
            writer: BufWriter::new(file),
            path,
            target: target.to_path_buf(),
        })
    }

    /// Path of the staging file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append text
    pub fn write_str(&mut self, text: &str) -> Result<(), SessionError> {
        self.writer
            .write_all(text.as_bytes())
            .map_err(|source| SessionError::Staging {
                path: self.path.clone(),
                source,
            })
    }

    /// Flush, sync and atomically rename the staging file over the target
    pub fn commit(self) -> Result<PathBuf, SessionError> {
        let Self { writer, path, target } = self;

        let file = writer.into_inner().map_err(|e| SessionError::Staging {
            path: path.clone(),
            source: e.into_error(),
        })?;

        file.as_file().sync_all().map_err(|source| SessionError::Staging {
            path: path.clone(),
            source,
        })?;

        file.persist(&target).map_err(|e| SessionError::Commit {
            staging: path.clone(),
            target: target.clone(),
            source: e.error,
        })?;

        debug!("Committed {:?} to {:?}", path, target);
        Ok(target)
    }
}
