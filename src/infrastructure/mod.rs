//! Infrastructure layer - External concerns and adapters
//!
//! This module contains the payment gateway client, the persistence
//! adapters, and the HTTP surface.

pub mod adapters;
pub mod http;

pub use adapters::{HttpPaymentGateway, OrdersStore, PaymentGateway, PaymentsStore};
