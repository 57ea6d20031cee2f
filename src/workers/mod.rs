//! Background workers

pub mod tasks;

pub use tasks::{ConfirmationWorker, Task, TaskSender};
