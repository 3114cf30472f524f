//! NotificationDispatcher - Background delivery of push messages.
//!
//! Callers hand a [`PushMessage`] to [`NotificationDispatcher::submit`], which
//! only enqueues it. A spawned worker drains the queue, calls the
//! [`PushGateway`], and processes the returned tickets:
//!
//! - `DeviceNotRegistered` tokens are removed from the token store
//! - other ticket errors and transport failures become [`DeliveryFailure`]s
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `queue_capacity` | 1024 | Messages buffered before `submit` fails |
//! | `failure_capacity` | 256 | Unread failures kept before new ones are dropped |
//!
//! ## Graceful Shutdown
//!
//! [`DispatcherHandle::shutdown`] stops intake and waits for every message
//! already queued to be delivered.

use std::sync::Arc;

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{PushGateway, PushMessage, PushTokenStore};

/// Configuration for the dispatcher queue.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    pub queue_capacity: usize,
    pub failure_capacity: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 1024,
            failure_capacity: 256,
        }
    }
}

impl DispatcherConfig {
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    pub fn with_failure_capacity(mut self, capacity: usize) -> Self {
        self.failure_capacity = capacity.max(1);
        self
    }
}

/// A message, or part of one, that could not be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryFailure {
    pub title: String,
    pub tokens: Vec<String>,
    pub reason: String,
}

/// Enqueues push messages for the background worker. Cheap to clone.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    sender: mpsc::Sender<PushMessage>,
}

impl NotificationDispatcher {
    /// Start the delivery worker on the current tokio runtime.
    pub fn spawn(
        gateway: Arc<dyn PushGateway>,
        tokens: Arc<dyn PushTokenStore>,
        config: DispatcherConfig,
    ) -> (Self, DispatcherHandle) {
        let (sender, queue) = mpsc::channel(config.queue_capacity.max(1));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (failures_tx, failures_rx) = mpsc::channel(config.failure_capacity.max(1));

        let worker = DeliveryWorker {
            gateway,
            tokens,
            failures: failures_tx,
        };
        let worker = tokio::spawn(worker.run(queue, shutdown_rx));

        let handle = DispatcherHandle {
            shutdown: shutdown_tx,
            worker,
            failures: Some(failures_rx),
        };
        (Self { sender }, handle)
    }

    /// Queue a message without waiting for delivery.
    ///
    /// # Errors
    ///
    /// - `NotificationError` if the queue is full or the worker has stopped
    pub fn submit(&self, message: PushMessage) -> Result<(), DomainError> {
        self.sender.try_send(message).map_err(|e| match e {
            TrySendError::Full(_) => {
                DomainError::new(ErrorCode::NotificationError, "notification queue is full")
            }
            TrySendError::Closed(_) => {
                DomainError::new(ErrorCode::NotificationError, "notification queue is closed")
            }
        })
    }
}

/// Owner side of a running dispatcher.
pub struct DispatcherHandle {
    shutdown: watch::Sender<bool>,
    worker: JoinHandle<()>,
    failures: Option<mpsc::Receiver<DeliveryFailure>>,
}

impl DispatcherHandle {
    /// Take the failure stream. Returns `None` after the first call.
    ///
    /// The stream is bounded; failures arriving while it is full are dropped.
    pub fn take_failures(&mut self) -> Option<mpsc::Receiver<DeliveryFailure>> {
        self.failures.take()
    }

    /// Stop accepting messages and wait for the queue to drain.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.worker.await {
            tracing::error!(error = %e, "Notification worker terminated abnormally");
        }
    }
}

struct DeliveryWorker {
    gateway: Arc<dyn PushGateway>,
    tokens: Arc<dyn PushTokenStore>,
    failures: mpsc::Sender<DeliveryFailure>,
}

impl DeliveryWorker {
    async fn run(self, mut queue: mpsc::Receiver<PushMessage>, mut shutdown: watch::Receiver<bool>) {
        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        queue.close();
                        while let Some(message) = queue.recv().await {
                            self.deliver(message).await;
                        }
                        tracing::debug!("Notification worker drained and stopped");
                        return;
                    }
                }

                message = queue.recv() => match message {
                    Some(message) => self.deliver(message).await,
                    None => return,
                },
            }
        }
    }

    async fn deliver(&self, message: PushMessage) {
        let tickets = match self.gateway.send(&message).await {
            Ok(tickets) => tickets,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    title = %message.title,
                    recipients = message.to.len(),
                    "Failed to send push notification"
                );
                self.report(&message, message.to.clone(), e.message);
                return;
            }
        };

        if tickets.len() != message.to.len() {
            tracing::warn!(
                tickets = tickets.len(),
                recipients = message.to.len(),
                "Push ticket count does not match recipients"
            );
        }

        let mut dead = Vec::new();
        for (token, ticket) in message.to.iter().zip(tickets.iter()) {
            if ticket.is_ok() {
                continue;
            }
            if ticket.is_device_not_registered() {
                dead.push(token.clone());
                continue;
            }
            let reason = ticket
                .error
                .clone()
                .or_else(|| ticket.message.clone())
                .unwrap_or_else(|| ticket.status.clone());
            tracing::warn!(token = %token, reason = %reason, "Push ticket error");
            self.report(&message, vec![token.clone()], reason);
        }

        if !dead.is_empty() {
            match self.tokens.remove_tokens(&dead).await {
                Ok(()) => tracing::debug!(count = dead.len(), "Removed unregistered push tokens"),
                Err(e) => tracing::error!(error = %e, "Failed to remove unregistered push tokens"),
            }
        }
    }

    fn report(&self, message: &PushMessage, tokens: Vec<String>, reason: String) {
        // Already logged, so a full or abandoned stream just drops it.
        let failure = DeliveryFailure {
            title: message.title.clone(),
            tokens,
            reason,
        };
        if let Err(TrySendError::Full(_)) = self.failures.try_send(failure) {
            tracing::debug!("Failure stream full, dropping delivery failure");
        }
    }
}
