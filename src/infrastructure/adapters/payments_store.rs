//! Redis-backed payments store

use crate::domain::payments::PaymentRecord;
use crate::shared::error::{AppError, AppResult};
use redis::{aio::ConnectionManager, AsyncCommands};
use std::collections::HashMap;
use std::sync::Arc;

const RECORD_TTL_SECONDS: u64 = 48 * 3600;

#[derive(Default)]
struct MemoryIndex {
    by_id: HashMap<String, PaymentRecord>,
    by_idempotency_key: HashMap<String, String>,
    by_transaction_id: HashMap<String, String>,
}

/// Abstraction for persisting payment records
#[derive(Clone)]
pub struct PaymentsStore {
    redis: Option<Arc<ConnectionManager>>, // optional; in-memory only if None
    memory: Arc<tokio::sync::RwLock<MemoryIndex>>,
}

impl PaymentsStore {
    pub fn new(redis: Option<Arc<ConnectionManager>>) -> Self {
        Self {
            redis,
            memory: Arc::new(tokio::sync::RwLock::new(MemoryIndex::default())),
        }
    }

    fn record_key(id: &str) -> String {
        format!("payments:{}", id)
    }

    fn idempotency_key(key: &str) -> String {
        format!("payments:idem:{}", key)
    }

    fn transaction_key(txid: &str) -> String {
        format!("payments:txn:{}", txid)
    }

    /// Persist a record, updating the idempotency and transaction indexes
    pub async fn put(&self, record: &PaymentRecord) -> AppResult<()> {
        let serialized = serde_json::to_vec(record)
            .map_err(|e| AppError::Internal(format!("serialize payment: {}", e)))?;

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
            if let Some(txid) = &record.transaction_id {
                let _: () = conn
                    .set_ex(Self::transaction_key(txid), record.id.clone(), RECORD_TTL_SECONDS)
                    .await
                    .map_err(|e| AppError::Internal(format!("redis set: {}", e)))?;
            }
        }

        // Always mirror to memory
        let mut memory = self.memory.write().await;
        memory
            .by_idempotency_key
            .insert(record.idempotency_key.clone(), record.id.clone());
        if let Some(txid) = &record.transaction_id {
            memory
                .by_transaction_id
                .insert(txid.clone(), record.id.clone());
        }
        memory.by_id.insert(record.id.clone(), record.clone());
        Ok(())
    }

    /// Fetch a record by its id
    pub async fn get(&self, id: &str) -> AppResult<Option<PaymentRecord>> {
        if let Some(redis) = &self.redis {
            let mut conn = (**redis).clone();
            let data: Option<Vec<u8>> = conn
                .get(Self::record_key(id))
                .await
                .map_err(|e| AppError::Internal(format!("redis get: {}", e)))?;
            if let Some(bytes) = data {
                let record: PaymentRecord = serde_json::from_slice(&bytes)
                    .map_err(|e| AppError::Internal(format!("deserialize payment: {}", e)))?;
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
    pub async fn find_by_idempotency_key(&self, key: &str) -> AppResult<Option<PaymentRecord>> {
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

    /// Check if a gateway transaction id was already recorded
    pub async fn transaction_exists(&self, transaction_id: &str) -> AppResult<bool> {
        if let Some(redis) = &self.redis {
            let mut conn = (**redis).clone();
            let exists: bool = conn
                .exists(Self::transaction_key(transaction_id))
                .await
                .map_err(|e| AppError::Internal(format!("redis exists: {}", e)))?;
            if exists {
                return Ok(true);
            }
        }
        Ok(self
            .memory
            .read()
            .await
            .by_transaction_id
            .contains_key(transaction_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payments::PaymentStatus;

    fn record(key: &str) -> PaymentRecord {
        PaymentRecord::new(key.to_string(), 1, 10.0, "USD".to_string())
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = PaymentsStore::new(None);
        let rec = record("key-1");
        store.put(&rec).await.unwrap();

        let found = store.get(&rec.id).await.unwrap().unwrap();
        assert_eq!(found.idempotency_key, "key-1");
        assert_eq!(found.status, PaymentStatus::Processing);
    }

    #[tokio::test]
    async fn test_find_by_idempotency_key() {
        let store = PaymentsStore::new(None);
        let rec = record("key-2");
        store.put(&rec).await.unwrap();

        let found = store
            .find_by_idempotency_key("key-2")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, rec.id);

        assert!(store
            .find_by_idempotency_key("missing")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_transaction_index() {
        let store = PaymentsStore::new(None);
        let mut rec = record("key-3");
        rec.complete("txn_1".to_string());
        store.put(&rec).await.unwrap();

        assert!(store.transaction_exists("txn_1").await.unwrap());
        assert!(!store.transaction_exists("txn_2").await.unwrap());
    }
}
