//! Infrastructure adapters
//!
//! External collaborators behind narrow interfaces: the payment gateway
//! HTTP client and the redis-backed stores.

pub mod gateway;
pub mod orders_store;
pub mod payments_store;

pub use gateway::{ChargeRequest, HttpPaymentGateway, PaymentGateway};
pub use orders_store::OrdersStore;
pub use payments_store::PaymentsStore;
