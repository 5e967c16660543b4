//! Bounded, best-effort audit pipeline.
//!
//! Handlers enqueue with `try_send` and move on. A single worker drains the
//! queue and writes batches; a full queue drops the new entry.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::admin::application::{
    domain::AuditEntry,
    ports::{incoming::AuditLogger, outgoing::AdminLogRepository},
};
use crate::shared::config::AuditConfig;

#[derive(Clone)]
pub struct AdminActionLogger {
    sender: mpsc::Sender<AuditEntry>,
    dropped: Arc<AtomicU64>,
}

impl AdminActionLogger {
    /// Entries lost to a full or closed queue since start-up.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl AuditLogger for AdminActionLogger {
    fn log_action(&self, entry: AuditEntry) {
        if let Err(err) = self.sender.try_send(entry) {
            let total = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
            let reason = match err {
                mpsc::error::TrySendError::Full(_) => "queue full",
                mpsc::error::TrySendError::Closed(_) => "worker stopped",
            };
            warn!(dropped_total = total, "Audit entry dropped: {}", reason);
        }
    }
}

pub struct AuditFlushWorker {
    receiver: mpsc::Receiver<AuditEntry>,
    repository: Arc<dyn AdminLogRepository>,
    batch_size: usize,
    flush_interval: Duration,
}

/// Logger handle plus the worker that must be spawned to drain it.
pub fn audit_channel(
    config: &AuditConfig,
    repository: Arc<dyn AdminLogRepository>,
) -> (AdminActionLogger, AuditFlushWorker) {
    let (sender, receiver) = mpsc::channel(config.queue_capacity.max(1));

    let logger = AdminActionLogger {
        sender,
        dropped: Arc::new(AtomicU64::new(0)),
    };
    let worker = AuditFlushWorker {
        receiver,
        repository,
        batch_size: config.flush_batch.max(1),
        flush_interval: config.flush_interval.max(Duration::from_millis(1)),
    };

    (logger, worker)
}

impl AuditFlushWorker {
    /// Runs until every logger handle is dropped, then flushes what is left.
    pub async fn run(mut self) {
        let mut buffer: Vec<AuditEntry> = Vec::with_capacity(self.batch_size);
        let mut ticker = tokio::time::interval_at(
            tokio::time::Instant::now() + self.flush_interval,
            self.flush_interval,
        );
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                received = self.receiver.recv() => match received {
                    Some(entry) => {
                        buffer.push(entry);
                        if buffer.len() >= self.batch_size {
                            self.flush(&mut buffer).await;
                        }
                    }
                    None => {
                        self.flush(&mut buffer).await;
                        info!("Audit worker drained and stopped");
                        return;
                    }
                },
                _ = ticker.tick() => {
                    if !buffer.is_empty() {
                        self.flush(&mut buffer).await;
                    }
                }
            }
        }
    }

    async fn flush(&self, buffer: &mut Vec<AuditEntry>) {
        if buffer.is_empty() {
            return;
        }
        let batch = std::mem::take(buffer);
        let count = batch.len();

        if let Err(e) = self.repository.append_batch(batch).await {
            warn!(discarded = count, "Audit batch write failed: {}", e);
        }
    }
}
