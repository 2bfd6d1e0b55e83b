use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use tempfile::NamedTempFile;
use ticklist_model::{KeyValueStore, StorageError};
use tracing::{debug, info};

/// Key-value store backed by a directory, one `<key>.data` file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    pub data_dir: PathBuf,
}

impl FileStore {
    #[tracing::instrument(skip(data_dir))]
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        let data_dir = data_dir.to_path_buf();
        info!(data_dir = %data_dir.display(), "creating data directory");
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;

        debug!(data_dir = %data_dir.display(), "opened file store");
        Ok(Self { data_dir })
    }

    /// File backing `key`, or `None` when the key is not a plain file name.
    pub fn path_for(&self, key: &str) -> Option<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
        valid.then(|| self.data_dir.join(format!("{key}.data")))
    }
}

fn invalid_key(key: &str) -> String {
    format!("key {key:?} is not a plain file name")
}

impl KeyValueStore for FileStore {
    #[tracing::instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key).ok_or_else(|| StorageError::Read {
            key: key.to_string(),
            reason: invalid_key(key),
        })?;
        match fs::read_to_string(&path) {
            Ok(raw) => {
                debug!(file = %path.display(), bytes = raw.len(), "read key");
                Ok(Some(raw))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Read {
                key: key.to_string(),
                reason: format!("{}: {err}", path.display()),
            }),
        }
    }

    #[tracing::instrument(skip(self, value), fields(bytes = value.len()))]
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key).ok_or_else(|| StorageError::Write {
            key: key.to_string(),
            reason: invalid_key(key),
        })?;
        write_atomic(&path, value).map_err(|err| StorageError::Write {
            key: key.to_string(),
            reason: format!("{err:#}"),
        })
    }
}

fn write_atomic(path: &Path, value: &str) -> anyhow::Result<()> {
    debug!(file = %path.display(), "saving atomically");

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
    temp.write_all(value.as_bytes())?;
    temp.flush()?;

    temp.persist(path)
        .with_context(|| format!("failed to persist {}", path.display()))?;

    Ok(())
}
