//! Redis-backed orders store

use crate::domain::orders::OrderRecord;
use crate::shared::error::{AppError, AppResult};
use redis::{aio::ConnectionManager, AsyncCommands};
use std::collections::HashMap;
use std::sync::Arc;

const RECORD_TTL_SECONDS: u64 = 48 * 3600;

#[derive(Default)]
struct MemoryIndex {
    by_id: HashMap<String, OrderRecord>,
    by_idempotency_key: HashMap<String, String>,
}

/// Abstraction for persisting order records
#[derive(Clone)]
pub struct OrdersStore {
    redis: Option<Arc<ConnectionManager>>, // optional; in-memory only if None
    memory: Arc<tokio::sync::RwLock<MemoryIndex>>,
}

impl OrdersStore {
    pub fn new(redis: Option<Arc<ConnectionManager>>) -> Self {
        Self {
            redis,
            memory: Arc::new(tokio::sync::RwLock::new(MemoryIndex::default())),
        }
    }

    fn record_key(id: &str) -> String {
        format!("orders:{}", id)
    }

    fn idempotency_key(key: &str) -> String {
        format!("orders:idem:{}", key)
    }

    /// Persist a record, updating the idempotency index
    pub async fn put(&self, record: &OrderRecord) -> AppResult<()> {
        let serialized = serde_json::to_vec(record)
            .map_err(|e| AppError::Internal(format!("serialize order: {}", e)))?;

        if let Some(redis) = &self.redis {
            let mut conn = (**redis).clone();
            let _: () = conn
                .set_ex(Self::record_key(&record.id), serialized, RECORD_TTL_SECONDS)
                .await
                .map_err(|e| AppError::Internal(format!("redis set: {}", e)))?;
            let _: () = conn
                .set_ex(
                    Self::idempotency_key(&record.idempotency_key),
                    record.id.clone(),
                    RECORD_TTL_SECONDS,
                )
                .await
                .map_err(|e| AppError::Internal(format!("redis set: {}", e)))?;
        }

        // Always mirror to memory
        let mut memory = self.memory.write().await;
        memory
            .by_idempotency_key
            .insert(record.idempotency_key.clone(), record.id.clone());
        memory.by_id.insert(record.id.clone(), record.clone());
        Ok(())
    }

    /// Fetch a record by its id
    pub async fn get(&self, id: &str) -> AppResult<Option<OrderRecord>> {
        if let Some(redis) = &self.redis {
            let mut conn = (**redis).clone();
            let data: Option<Vec<u8>> = conn
                .get(Self::record_key(id))
                .await
                .map_err(|e| AppError::Internal(format!("redis get: {}", e)))?;
            if let Some(bytes) = data {
                let record: OrderRecord = serde_json::from_slice(&bytes)
                    .map_err(|e| AppError::Internal(format!("deserialize order: {}", e)))?;
                self.memory
                    .write()
                    .await
                    .by_id
                    .insert(id.to_string(), record.clone());
                return Ok(Some(record));
            }
        }
        Ok(self.memory.read().await.by_id.get(id).cloned())
    }

    /// Find an existing record for a request idempotency key
    pub async fn find_by_idempotency_key(&self, key: &str) -> AppResult<Option<OrderRecord>> {
        if let Some(redis) = &self.redis {
            let mut conn = (**redis).clone();
            let id: Option<String> = conn
                .get(Self::idempotency_key(key))
                .await
                .map_err(|e| AppError::Internal(format!("redis get: {}", e)))?;
            if let Some(id) = id {
                return self.get(&id).await;
            }
        }
        let id = self
            .memory
            .read()
            .await
            .by_idempotency_key
            .get(key)
            .cloned();
        match id {
            Some(id) => self.get(&id).await,
            None => Ok(None),
        }
    }
}
