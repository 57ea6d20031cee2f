//! Background task worker
//!
//! A single in-process queue for fire-and-forget work such as order
//! confirmation emails. Tasks are retried with the settings' backoff
//! parameters before being dropped.

use crate::config::Settings;
use crate::shared::error::{AppError, AppResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info};

/// A unit of background work
#[derive(Debug, Clone)]
pub enum Task {
    OrderConfirmation { order_id: String },
    /// Stop the worker loop once the queue ahead of it is drained
    Shutdown,
}

/// Handle for enqueueing tasks from request handlers
#[derive(Clone)]
pub struct TaskSender {
    tx: mpsc::UnboundedSender<Task>,
}

impl TaskSender {
    /// Enqueue an order confirmation
    pub fn enqueue_order_confirmation(&self, order_id: &str) -> AppResult<()> {
        self.tx
            .send(Task::OrderConfirmation {
                order_id: order_id.to_string(),
            })
            .map_err(|_| AppError::Internal("Task worker is not running".to_string()))
    }
}

/// Background worker draining the task queue
pub struct ConfirmationWorker {
    tx: mpsc::UnboundedSender<Task>,
    handle: tokio::task::JoinHandle<()>,
}

impl ConfirmationWorker {
    /// Spawn the worker loop on the current runtime
    pub fn spawn(settings: Arc<Settings>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Task>();

        let handle = tokio::spawn(async move {
            while let Some(task) = rx.recv().await {
                match task {
                    Task::Shutdown => break,
                    task => Self::run_with_retries(&settings, task).await,
                }
            }
        });

        Self { tx, handle }
    }

    /// Get a sender handle for this worker's queue
    pub fn sender(&self) -> TaskSender {
        TaskSender {
            tx: self.tx.clone(),
        }
    }

    /// Wait for the queued tasks to drain, then stop the worker
    pub async fn shutdown(self) {
        let _ = self.tx.send(Task::Shutdown);
        let _ = self.handle.await;
    }

    async fn run_with_retries(settings: &Settings, task: Task) {
        let mut delay = settings.initial_retry_delay;
        for attempt in 0..=settings.max_retries {
            match Self::process(&task).await {
                Ok(()) => return,
                Err(e) => {
                    if attempt == settings.max_retries {
                        error!(task = ?task, error = %e, "Task failed permanently");
                        return;
                    }
                    tokio::time::sleep(Duration::from_secs_f64(delay)).await;
                    delay = (delay * settings.backoff_multiplier).min(settings.max_retry_delay);
                }
            }
        }
    }

    async fn process(task: &Task) -> AppResult<()> {
        match task {
            Task::OrderConfirmation { order_id } => {
                info!(order_id = %order_id, "Sending order confirmation");
                // Wire an actual email provider (SES, SendGrid) here; the
                // starter only records the event.
                info!(order_id = %order_id, "Order confirmation sent");
                Ok(())
            }
            // Handled by the worker loop before dispatch
            Task::Shutdown => Ok(()),
        }
    }
}
