//! Payments domain models and types

use serde::{Deserialize, Serialize};

/// Payment lifecycle status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Processing => write!(f, "processing"),
            PaymentStatus::Completed => write!(f, "completed"),
            PaymentStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Payment record persisted in the store.
///
/// `idempotency_key` is unique per logical request; `transaction_id` is the
/// gateway-assigned identifier and is unique across completed payments so
/// duplicate charges can be detected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: String,
    pub idempotency_key: String,
    pub user_id: u64,
    pub amount: f64,
    pub currency: String,
    pub status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub error_message: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl PaymentRecord {
    /// Create a new record in the processing state
    pub fn new(idempotency_key: String, user_id: u64, amount: f64, currency: String) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            idempotency_key,
            user_id,
            amount,
            currency,
            status: PaymentStatus::Processing,
            transaction_id: None,
            error_message: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the payment as completed with its gateway transaction id
    pub fn complete(&mut self, transaction_id: String) {
        self.transaction_id = Some(transaction_id);
        self.status = PaymentStatus::Completed;
        self.updated_at = chrono::Utc::now();
    }

    /// Mark the payment as failed with an error message
    pub fn fail(&mut self, error_message: String) {
        self.status = PaymentStatus::Failed;
        self.error_message = Some(error_message);
        self.updated_at = chrono::Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_processing() {
        let record = PaymentRecord::new("key-1".to_string(), 1, 99.99, "USD".to_string());
        assert_eq!(record.status, PaymentStatus::Processing);
        assert!(record.transaction_id.is_none());
        assert!(record.error_message.is_none());
    }

    #[test]
    fn test_complete_sets_transaction_id() {
        let mut record = PaymentRecord::new("key-1".to_string(), 1, 99.99, "USD".to_string());
        record.complete("txn_abc".to_string());
        assert_eq!(record.status, PaymentStatus::Completed);
        assert_eq!(record.transaction_id.as_deref(), Some("txn_abc"));
    }

    #[test]
    fn test_fail_records_error() {
        let mut record = PaymentRecord::new("key-1".to_string(), 1, 99.99, "USD".to_string());
        record.fail("gateway timeout".to_string());
        assert_eq!(record.status, PaymentStatus::Failed);
        assert_eq!(record.error_message.as_deref(), Some("gateway timeout"));
    }
}
