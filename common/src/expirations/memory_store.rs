use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::Error;

use super::{ExpirationStore, ExpirationTable, KeyId};

/// An expiration store which only lives in memory, for tests
#[derive(Clone, Default)]
pub struct MemoryExpirationStore {
    table: Arc<RwLock<ExpirationTable>>,
}

impl MemoryExpirationStore {
    pub fn new(table: ExpirationTable) -> Self {
        Self {
            table: Arc::new(RwLock::new(table)),
        }
    }
}

#[async_trait]
impl ExpirationStore for MemoryExpirationStore {
    async fn get_all(&self) -> ExpirationTable {
        self.table.read().await.clone()
    }

    async fn upsert(&self, key_id: &KeyId, expires_at: i64) -> Result<(), Error> {
        self.table.write().await.upsert(key_id.clone(), expires_at);
        Ok(())
    }

    async fn delete(&self, key_id: &KeyId) -> Result<bool, Error> {
        Ok(self.table.write().await.remove(key_id).is_some())
    }
}
