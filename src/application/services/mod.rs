//! Application services

pub mod order_service;
pub mod payment_service;

pub use order_service::{OrderRequest, OrderResponse, OrderService};
pub use payment_service::{PaymentRequest, PaymentResponse, PaymentService};
