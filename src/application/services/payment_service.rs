//! Payment service with idempotency, deduplication, and gateway retries

use crate::config::Settings;
use crate::domain::payments::{PaymentRecord, PaymentStatus};
use crate::infrastructure::adapters::{ChargeRequest, PaymentGateway, PaymentsStore};
use crate::shared::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

/// Request to create a payment
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PaymentRequest {
    pub user_id: u64,

    #[validate(range(min = 0.01))]
    pub amount: f64,

    #[validate(length(equal = 3))]
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default)]
    pub idempotency_key: Option<String>,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Payment creation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub id: String,
    pub idempotency_key: String,
    pub user_id: u64,
    pub amount: f64,
    pub currency: String,
    pub status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub message: String,
}

/// Payment processing service.
///
/// Replays of the same idempotency key return the stored result instead of
/// charging again; gateway transaction ids are deduplicated so a retried
/// charge can never settle twice.
pub struct PaymentService {
    settings: Arc<Settings>,
    gateway: Arc<dyn PaymentGateway>,
    store: Arc<PaymentsStore>,
}

impl PaymentService {
    pub fn new(
        settings: Arc<Settings>,
        gateway: Arc<dyn PaymentGateway>,
        store: Arc<PaymentsStore>,
    ) -> Self {
        Self {
            settings,
            gateway,
            store,
        }
    }

    /// Process a payment end to end
    pub async fn process_payment(&self, request: PaymentRequest) -> AppResult<PaymentResponse> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let idempotency_key = request
            .idempotency_key
            .clone()
            .unwrap_or_else(|| Self::generate_idempotency_key(request.user_id));

        // Idempotency check: return the existing payment if already processed
        if let Some(existing) = self.store.find_by_idempotency_key(&idempotency_key).await? {
            info!(idempotency_key = %idempotency_key, "Idempotent request detected");
            return Ok(Self::to_response(
                existing,
                "Payment already processed (idempotent)",
            ));
        }

        let mut payment = PaymentRecord::new(
            idempotency_key,
            request.user_id,
            request.amount,
            request.currency.clone(),
        );
        self.store.put(&payment).await?;

        let charge = ChargeRequest {
            user_id: request.user_id,
            amount: request.amount,
            currency: request.currency,
        };

        match self.gateway.charge(&charge).await {
            Ok(transaction_id) => {
                // Deduplication: the gateway must never settle the same
                // transaction twice
                if self.store.transaction_exists(&transaction_id).await? {
                    warn!(transaction_id = %transaction_id, "Duplicate transaction detected");
                    payment.fail("Duplicate transaction".to_string());
                    self.store.put(&payment).await?;
                    return Err(AppError::Conflict(
                        "Duplicate transaction detected".to_string(),
                    ));
                }

                payment.complete(transaction_id);
                self.store.put(&payment).await?;

                info!(payment_id = %payment.id, "Payment processed successfully");
                Ok(Self::to_response(payment, "Payment processed successfully"))
            }
            Err(e) => {
                payment.fail(e.to_string());
                self.store.put(&payment).await?;
                Err(e)
            }
        }
    }

    /// Fetch a payment by id
    pub async fn get_payment(&self, id: &str) -> AppResult<PaymentResponse> {
        let payment = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("payment {}", id)))?;
        Ok(Self::to_response(payment, "Payment found"))
    }

    /// Settings snapshot this service was wired with
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn generate_idempotency_key(user_id: u64) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!("pay_{}_{}", user_id, &suffix[..16])
    }

    fn to_response(payment: PaymentRecord, message: &str) -> PaymentResponse {
        PaymentResponse {
            id: payment.id,
            idempotency_key: payment.idempotency_key,
            user_id: payment.user_id,
            amount: payment.amount,
            currency: payment.currency,
            status: payment.status,
            transaction_id: payment.transaction_id,
            created_at: payment.created_at,
            message: message.to_string(),
        }
    }
}
