//! Payment gateway adapter
//!
//! This adapter handles HTTP communication with the external payment
//! gateway, with per-request timeouts and exponential backoff retries
//! driven by the settings snapshot.

use crate::config::Settings;
use crate::shared::error::{AppError, AppResult};
use crate::shared::logging::LoggingUtils;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// A charge to be placed against the gateway
#[derive(Debug, Clone)]
pub struct ChargeRequest {
    pub user_id: u64,
    pub amount: f64,
    pub currency: String,
}

/// Interface to the external payment gateway
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Place a charge and return the gateway transaction id
    async fn charge(&self, request: &ChargeRequest) -> AppResult<String>;

    /// Check if the gateway is reachable
    async fn is_available(&self) -> bool;
}

/// HTTP client for the payment gateway
pub struct HttpPaymentGateway {
    settings: Arc<Settings>,
}

impl HttpPaymentGateway {
    /// Create a new gateway client
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    fn client(&self, timeout: Duration) -> AppResult<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))
    }

    fn backoff_delay(&self, attempt: u32) -> Duration {
        let delay = self.settings.initial_retry_delay
            * self.settings.backoff_multiplier.powi(attempt as i32);
        Duration::from_secs_f64(delay.min(self.settings.max_retry_delay))
    }

    async fn try_charge(
        &self,
        client: &reqwest::Client,
        request: &ChargeRequest,
    ) -> AppResult<String> {
        let response = client
            .post(format!("{}/charges", self.settings.payment_gateway_url))
            .bearer_auth(&self.settings.payment_gateway_api_key)
            .json(&serde_json::json!({
                // Gateways bill in minor units
                "amount": (request.amount * 100.0).round() as i64,
                "currency": request.currency,
                "source": "tok_visa",
            }))
            .send()
            .await
            .map_err(|e| AppError::Gateway(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Gateway(format!(
                "Gateway returned {}: {}",
                status, body
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::Gateway(format!("Failed to parse response: {}", e)))?;

        body.get("id")
            .and_then(|id| id.as_str())
            .map(str::to_string)
            .ok_or_else(|| AppError::Gateway("Response missing transaction id".to_string()))
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn charge(&self, request: &ChargeRequest) -> AppResult<String> {
        let timeout = Duration::from_secs_f64(self.settings.payment_gateway_timeout);
        let client = self.client(timeout)?;

        info!(
            user_id = %request.user_id,
            amount = %request.amount,
            currency = %request.currency,
            "Calling payment gateway"
        );

        let mut last_error = None;
        for attempt in 0..=self.settings.max_retries {
            match self.try_charge(&client, request).await {
                Ok(transaction_id) => return Ok(transaction_id),
                Err(e) => last_error = Some(e),
            }

            if attempt < self.settings.max_retries {
                let delay = self.backoff_delay(attempt);
                LoggingUtils::log_retry(
                    "payment_gateway",
                    attempt + 1,
                    self.settings.max_retries + 1,
                    delay.as_millis() as u64,
                );
                tokio::time::sleep(delay).await;
            }
        }

        Err(AppError::Gateway(format!(
            "Charge failed after {} attempts: {}",
            self.settings.max_retries + 1,
            last_error.map(|e| e.to_string()).unwrap_or_default()
        )))
    }

    async fn is_available(&self) -> bool {
        let client = match self.client(Duration::from_secs(5)) {
            Ok(client) => client,
            Err(_) => return false,
        };

        match client
            .get(format!("{}/health", self.settings.payment_gateway_url))
            .bearer_auth(&self.settings.payment_gateway_api_key)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
