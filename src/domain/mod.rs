//! Domain layer - Core business models
//!
//! This module contains the payment, order, and health models that are
//! independent of infrastructure concerns like HTTP or storage.

pub mod health;
pub mod orders;
pub mod payments;

pub use health::{HealthResponse, HealthStatus};
pub use orders::{OrderRecord, OrderStatus};
pub use payments::{PaymentRecord, PaymentStatus};
