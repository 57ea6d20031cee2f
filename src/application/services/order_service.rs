//! Order service - transactional order-plus-payment processing

use crate::domain::orders::{OrderRecord, OrderStatus};
use crate::infrastructure::adapters::OrdersStore;
use crate::shared::error::{AppError, AppResult};
use crate::workers::tasks::TaskSender;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::payment_service::{PaymentRequest, PaymentService};

/// Request to create an order
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderRequest {
    pub user_id: u64,

    #[validate(range(min = 0.01))]
    pub total: f64,

    #[validate(length(equal = 3))]
    #[serde(default = "default_currency")]
    pub currency: String,

    /// JSON-encoded line items
    #[validate(length(min = 1))]
    pub items: String,

    #[serde(default)]
    pub idempotency_key: Option<String>,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Order creation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: String,
    pub idempotency_key: String,
    pub user_id: u64,
    pub payment_id: Option<String>,
    pub total: f64,
    pub currency: String,
    pub items: String,
    pub status: OrderStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub message: String,
}

/// Order processing service.
///
/// Order and payment succeed or fail together: a payment failure leaves the
/// order in the failed state, never confirmed without a settled payment.
pub struct OrderService {
    payments: Arc<PaymentService>,
    store: Arc<OrdersStore>,
    tasks: TaskSender,
}

impl OrderService {
    pub fn new(payments: Arc<PaymentService>, store: Arc<OrdersStore>, tasks: TaskSender) -> Self {
        Self {
            payments,
            store,
            tasks,
        }
    }

    /// Create an order with its payment
    pub async fn create_order(&self, request: OrderRequest) -> AppResult<OrderResponse> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let idempotency_key = request
            .idempotency_key
            .clone()
            .unwrap_or_else(|| Self::generate_idempotency_key(request.user_id));

        if let Some(existing) = self.store.find_by_idempotency_key(&idempotency_key).await? {
            info!(idempotency_key = %idempotency_key, "Idempotent order request");
            return Ok(Self::to_response(existing, "Order already exists"));
        }

        let mut order = OrderRecord::new(
            idempotency_key.clone(),
            request.user_id,
            request.total,
            request.currency.clone(),
            request.items,
        );
        self.store.put(&order).await?;

        let payment_request = PaymentRequest {
            user_id: request.user_id,
            amount: request.total,
            currency: request.currency,
            idempotency_key: Some(format!("{}-payment", idempotency_key)),
        };

        match self.payments.process_payment(payment_request).await {
            Ok(payment) => {
                order.confirm(payment.id);
                self.store.put(&order).await?;

                if let Err(e) = self.tasks.enqueue_order_confirmation(&order.id) {
                    // Confirmation email is best-effort; the order stands
                    warn!(order_id = %order.id, error = %e, "Failed to enqueue confirmation");
                }

                info!(order_id = %order.id, "Order created");
                Ok(Self::to_response(order, "Order created successfully"))
            }
            Err(e) => {
                order.fail();
                self.store.put(&order).await?;
                Err(e)
            }
        }
    }

    /// Fetch an order by id
    pub async fn get_order(&self, id: &str) -> AppResult<OrderResponse> {
        let order = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("order {}", id)))?;
        Ok(Self::to_response(order, "Order found"))
    }

    fn generate_idempotency_key(user_id: u64) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!("ord_{}_{}", user_id, &suffix[..16])
    }

    fn to_response(order: OrderRecord, message: &str) -> OrderResponse {
        OrderResponse {
            id: order.id,
            idempotency_key: order.idempotency_key,
            user_id: order.user_id,
            payment_id: order.payment_id,
            total: order.total,
            currency: order.currency,
            items: order.items,
            status: order.status,
            created_at: order.created_at,
            message: message.to_string(),
        }
    }
}
