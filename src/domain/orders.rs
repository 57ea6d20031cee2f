//! Orders domain models and types

use serde::{Deserialize, Serialize};

/// Order lifecycle status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Cancelled,
    Failed,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Confirmed => write!(f, "confirmed"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
            OrderStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Order record persisted in the store.
///
/// An order is linked to the payment that settles it; order and payment
/// succeed or fail together as far as externally visible state goes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: String,
    pub idempotency_key: String,
    pub user_id: u64,
    pub payment_id: Option<String>,
    pub total: f64,
    pub currency: String,
    /// JSON-encoded line items, opaque to the service
    pub items: String,
    pub status: OrderStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl OrderRecord {
    /// Create a new order in the pending state
    pub fn new(
        idempotency_key: String,
        user_id: u64,
        total: f64,
        currency: String,
        items: String,
    ) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            idempotency_key,
            user_id,
            payment_id: None,
            total,
            currency,
            items,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Confirm the order and link its settling payment
    pub fn confirm(&mut self, payment_id: String) {
        self.payment_id = Some(payment_id);
        self.status = OrderStatus::Confirmed;
        self.updated_at = chrono::Utc::now();
    }

    /// Mark the order as failed
    pub fn fail(&mut self) {
        self.status = OrderStatus::Failed;
        self.updated_at = chrono::Utc::now();
    }
}
