//! Application context owning the event store, the remote source and the
//! sync orchestrator.
//!
//! One context is built at process startup and shared by reference. It
//! replaces process-wide singletons, so tests can build a context around a
//! fake remote and an in-memory store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;

use eventhub_client::EventHubClient;
use eventhub_core::remote::RemoteSource;
use eventhub_core::storage::{EventStore, Result};

use crate::config::Config;
use crate::error::InitError;
use crate::repository::CacheRepository;
use crate::storage::SqliteEventStore;
use crate::sync::SyncOrchestrator;

/// Shared application context.
pub struct AppContext {
    config: Config,
    sync: SyncOrchestrator,
    initialized: AtomicBool,
    /// Shutdown signal sender for background tasks.
    shutdown_tx: broadcast::Sender<()>,
    eviction_task: Mutex<Option<JoinHandle<()>>>,
}

impl AppContext {
    /// Creates a context around the given store and remote. Nothing is opened
    /// until `initialize` runs.
    pub fn new(config: Config, store: Arc<dyn EventStore>, remote: Arc<dyn RemoteSource>) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            sync: SyncOrchestrator::new(remote, CacheRepository::new(store)),
            config,
            initialized: AtomicBool::new(false),
            shutdown_tx,
            eviction_task: Mutex::new(None),
        }
    }

    /// Builds and initializes a context with the SQLite store and the HTTP
    /// client described by `config`.
    pub async fn open(config: Config) -> std::result::Result<Self, InitError> {
        let store = Arc::new(SqliteEventStore::with_location(config.store_location()));
        let client = EventHubClient::with_timeout(&config.api_url, config.remote_timeout())?;

        let context = Self::new(config, store, Arc::new(client));
        context.initialize().await?;
        Ok(context)
    }

    /// Initializes the store, runs the startup eviction sweep and, when
    /// configured, starts background eviction.
    ///
    /// Calling it again only re-checks the schema; the sweep runs once per
    /// context.
    pub async fn initialize(&self) -> Result<()> {
        self.cache().initialize().await?;

        if self.initialized.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let removed = self.cache().evict_stale(self.config.retention()).await;
        tracing::info!(
            removed,
            retention_days = self.config.retention_days,
            "Startup eviction complete"
        );

        if let Some(interval) = self.config.eviction_interval() {
            let handle = self.spawn_eviction_task(interval);
            *self.eviction_task.lock().await = Some(handle);
        }

        Ok(())
    }

    /// Stops background work and closes the store.
    pub async fn shutdown(&self) -> Result<()> {
        self.signal_shutdown();

        if let Some(handle) = self.eviction_task.lock().await.take() {
            if let Err(err) = handle.await {
                tracing::warn!(error = %err, "Eviction task ended abnormally");
            }
        }

        self.initialized.store(false, Ordering::SeqCst);
        self.cache().close().await?;
        tracing::info!("Application context shut down");
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sync(&self) -> &SyncOrchestrator {
        &self.sync
    }

    pub fn cache(&self) -> &CacheRepository {
        self.sync.cache()
    }

    /// Subscribe to shutdown signal.
    pub fn subscribe_shutdown(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Signal all background tasks to stop.
    pub fn signal_shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    fn spawn_eviction_task(&self, interval: Duration) -> JoinHandle<()> {
        let cache = self.cache().clone();
        let retention = self.config.retention();
        let mut shutdown_rx = self.subscribe_shutdown();

        tracing::debug!(interval_secs = interval.as_secs(), "Starting background eviction");

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately; startup eviction already ran
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        cache.evict_stale(retention).await;
                    }
                    _ = shutdown_rx.recv() => {
                        tracing::debug!("Background eviction shutting down");
                        break;
                    }
                }
            }
        })
    }
}
