use std::{
    io::{self, Write as _},
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;
use tokio::sync::Mutex;

use crate::Error;

use super::{ExpirationTable, KeyId};

/// Storage backend for the expiration table.
#[async_trait]
pub trait ExpirationStore: Send + Sync {
    /// The whole table. A missing or unreadable backing store is reported as an empty table.
    async fn get_all(&self) -> ExpirationTable;

    /// Sets the expiry for a key, replacing any existing value.
    async fn upsert(&self, key_id: &KeyId, expires_at: i64) -> Result<(), Error>;

    /// Removes the expiry for a key. Returns `false` if the key was not present, in which
    /// case nothing is written.
    async fn delete(&self, key_id: &KeyId) -> Result<bool, Error>;
}

/// Keeps the table in a single pretty-printed JSON file which is rewritten in full on every change.
#[derive(Clone, Debug)]
pub struct JsonFileExpirationStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileExpirationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the table from disk, `None` if the file does not exist.
    pub async fn read_table(&self) -> Result<Option<ExpirationTable>, Error> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let table = serde_json::from_str(&contents)?;

        Ok(Some(table))
    }

    async fn read_table_or_empty(&self) -> ExpirationTable {
        match self.read_table().await {
            Ok(table) => table.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(
                    "Failed to read expirations from {}, treating as empty: {}",
                    self.path.display(),
                    e
                );
                ExpirationTable::default()
            }
        }
    }

    /// Writes the table to a temporary file next to the target and renames it into place,
    /// so readers never observe a partially written file.
    async fn write_table(&self, table: &ExpirationTable) -> Result<(), Error> {
        let json = to_pretty_json(table)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_owned(),
            _ => PathBuf::from("."),
        };
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || -> Result<(), Error> {
            let mut tmp = NamedTempFile::new_in(dir)?;
            tmp.write_all(&json)?;
            tmp.as_file().sync_all()?;
            tmp.persist(path)?;
            Ok(())
        })
        .await
        .map_err(io::Error::other)?
    }
}

fn to_pretty_json(table: &ExpirationTable) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    table.serialize(&mut serializer)?;
    Ok(buf)
}

#[async_trait]
impl ExpirationStore for JsonFileExpirationStore {
    async fn get_all(&self) -> ExpirationTable {
        self.read_table_or_empty().await
    }

    async fn upsert(&self, key_id: &KeyId, expires_at: i64) -> Result<(), Error> {
        let _guard = self.write_lock.lock().await;

        let mut table = self.read_table_or_empty().await;
        table.upsert(key_id.clone(), expires_at);

        self.write_table(&table).await
    }

    async fn delete(&self, key_id: &KeyId) -> Result<bool, Error> {
        let _guard = self.write_lock.lock().await;

        let mut table = self.read_table_or_empty().await;
        if table.remove(key_id).is_none() {
            return Ok(false);
        }

        self.write_table(&table).await?;

        Ok(true)
    }
}
