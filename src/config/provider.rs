//! Cached settings provider
//!
//! The provider owns the single process-wide cache slot for the validated
//! settings snapshot. The first call to [`SettingsProvider::get`] reads and
//! validates the external configuration source; every later call returns the
//! cached snapshot without touching the source again. A failed load leaves
//! the slot empty, so the next call retries from scratch.

use crate::config::Settings;
use crate::shared::error::AppResult;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

type SettingsLoader = dyn Fn() -> AppResult<Settings> + Send + Sync;

/// Process-wide, lazily-initialized settings provider.
///
/// Constructed once in `main` and handed to request handlers by explicit
/// dependency injection rather than through a global accessor.
pub struct SettingsProvider {
    slot: OnceCell<Arc<Settings>>,
    loader: Box<SettingsLoader>,
}

impl SettingsProvider {
    /// Create a provider backed by the real external source
    pub fn new() -> Self {
        Self::with_loader(Settings::load)
    }

    /// Create a provider with an injected loader.
    ///
    /// The loader runs at most once per successful initialization; tests use
    /// this to substitute the external source.
    pub fn with_loader<F>(loader: F) -> Self
    where
        F: Fn() -> AppResult<Settings> + Send + Sync + 'static,
    {
        Self {
            slot: OnceCell::new(),
            loader: Box::new(loader),
        }
    }

    /// Return the settings snapshot, loading it on first use.
    ///
    /// Concurrent first calls are serialized by the cell: exactly one
    /// load-and-validate sequence runs, and every caller observes the same
    /// `Arc`. On load failure the slot stays empty and the error is
    /// returned to the caller that triggered the load.
    pub async fn get(&self) -> AppResult<Arc<Settings>> {
        self.slot
            .get_or_try_init(|| async {
                let settings = (self.loader)()?;
                info!(
                    environment = %settings.environment,
                    app_name = %settings.app_name,
                    "Configuration loaded"
                );
                Ok(Arc::new(settings))
            })
            .await
            .map(Arc::clone)
    }

    /// Whether the cache slot holds a snapshot
    pub fn is_loaded(&self) -> bool {
        self.slot.initialized()
    }
}

impl Default for SettingsProvider {
    fn default() -> Self {
        Self::new()
    }
}
