//! Delivery of raw notifications to the pipeline.
//!
//! The coordination service orders notifications per key, so every key is
//! pinned to one worker: notifications for the same key are processed in
//! arrival order, notifications for different keys may run concurrently.

use std::collections::hash_map::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;
use tracing::warn;

use crate::DataChangedEvent;
use crate::Error;
use crate::PipelineConfig;
use crate::Result;
use crate::RuleChangedEventPipeline;

#[derive(Clone)]
pub struct ChangeEventDispatcher {
    workers: Vec<mpsc::Sender<DataChangedEvent>>,
}

impl ChangeEventDispatcher {
    /// Spawns `config.worker_count` workers on the current runtime.
    ///
    /// Workers stop with `Error::Exit` on shutdown signal, after applying the
    /// notifications already queued, or with `Ok(())` once every dispatcher
    /// handle has been dropped and their queue drained. Dropping the shutdown
    /// sender is not a signal.
    pub fn start(
        pipeline: Arc<RuleChangedEventPipeline>,
        config: &PipelineConfig,
        shutdown_signal: watch::Receiver<()>,
    ) -> (Self, Vec<JoinHandle<Result<()>>>) {
        let worker_count = config.worker_count.max(1);
        let mut workers = Vec::with_capacity(worker_count);
        let mut handles = Vec::with_capacity(worker_count);

        for id in 0..worker_count {
            let (tx, rx) = mpsc::channel(config.worker_queue_size.max(1));
            let worker = ChangeEventWorker {
                id,
                pipeline: pipeline.clone(),
                rx,
                shutdown_signal: shutdown_signal.clone(),
            };
            handles.push(tokio::spawn(worker.run()));
            workers.push(tx);
        }
        debug!(worker_count, "Change event dispatcher started");

        (Self { workers }, handles)
    }

    /// Queues a notification behind earlier notifications for the same key.
    pub async fn on_change(
        &self,
        event: DataChangedEvent,
    ) -> Result<()> {
        let worker = &self.workers[self.worker_index(&event.key)];
        worker.send(event).await.map_err(|_| Error::DispatcherClosed)
    }

    pub(crate) fn worker_index(
        &self,
        key: &str,
    ) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() % self.workers.len() as u64) as usize
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }
}

struct ChangeEventWorker {
    id: usize,
    pipeline: Arc<RuleChangedEventPipeline>,
    rx: mpsc::Receiver<DataChangedEvent>,
    shutdown_signal: watch::Receiver<()>,
}

impl ChangeEventWorker {
    async fn run(mut self) -> Result<()> {
        let mut watch_shutdown = true;
        loop {
            tokio::select! {
                biased;
                // P0: shutdown received;
                changed = self.shutdown_signal.changed(), if watch_shutdown => {
                    if changed.is_err() {
                        // Sender dropped without a signal: run until the queue closes.
                        debug!(worker_id = self.id, "Shutdown sender dropped");
                        watch_shutdown = false;
                    } else {
                        warn!(worker_id = self.id, "[ChangeEventWorker] shutdown signal received.");
                        self.drain();
                        return Err(Error::Exit);
                    }
                }

                event = self.rx.recv() => {
                    match event {
                        Some(event) => self.pipeline.on_change(event),
                        None => {
                            debug!(worker_id = self.id, "Change event queue closed");
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    /// Stops accepting notifications and applies the ones already queued.
    fn drain(&mut self) {
        self.rx.close();
        let mut drained = 0usize;
        while let Ok(event) = self.rx.try_recv() {
            self.pipeline.on_change(event);
            drained += 1;
        }
        debug!(worker_id = self.id, drained, "Change event queue drained");
    }
}
