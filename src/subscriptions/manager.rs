//! Subscription manager for broadcasting store events.

use crossbeam_channel::{bounded, Sender, TrySendError};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

use super::types::{
    DropReason, StoreEvent, SubscriptionConfig, SubscriptionHandle, SubscriptionId,
    DEFAULT_BUFFER_SIZE,
};

struct Subscription {
    config: SubscriptionConfig,
    sender: Sender<StoreEvent>,
}

impl Subscription {
    /// Returns false if the subscriber is gone or its buffer is full.
    fn try_send(&self, event: StoreEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Manages subscriptions and broadcasts events.
pub struct SubscriptionManager {
    subscriptions: RwLock<HashMap<SubscriptionId, Subscription>>,
    next_id: AtomicU64,
    default_buffer_size: usize,
}

impl SubscriptionManager {
    /// Create a new subscription manager.
    pub fn new() -> Self {
        Self::with_buffer_size(DEFAULT_BUFFER_SIZE)
    }

    /// Manager whose subscriptions buffer `buffer_size` events unless they
    /// ask for something else.
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self {
            subscriptions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            default_buffer_size: buffer_size.max(1),
        }
    }

    /// Buffer size used when a subscription does not set one.
    pub fn default_buffer_size(&self) -> usize {
        self.default_buffer_size
    }

    /// Create a new subscription.
    pub fn subscribe(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let capacity = config.buffer_size.unwrap_or(self.default_buffer_size);
        let (sender, receiver) = bounded(capacity.max(1));

        self.subscriptions
            .write()
            .insert(id, Subscription { config, sender });

        SubscriptionHandle { id, receiver }
    }

    /// Unsubscribe and clean up.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        if let Some(sub) = self.subscriptions.write().remove(&id) {
            let _ = sub.sender.try_send(StoreEvent::Dropped {
                reason: DropReason::Unsubscribed,
            });
        }
    }

    /// Number of live subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.read().len()
    }

    /// Send `event` to every matching subscriber, dropping any that can't
    /// keep up.
    pub fn broadcast(&self, event: StoreEvent) {
        let mut failed = Vec::new();

        {
            let subs = self.subscriptions.read();
            for (id, sub) in subs.iter() {
                if sub.config.filter.matches(&event) && !sub.try_send(event.clone()) {
                    failed.push(*id);
                }
            }
        }

        if !failed.is_empty() {
            let mut subs = self.subscriptions.write();
            for id in failed {
                if let Some(sub) = subs.remove(&id) {
                    warn!(subscription = id.0, "dropping subscriber");
                    let _ = sub.sender.try_send(StoreEvent::Dropped {
                        reason: DropReason::BufferOverflow,
                    });
                }
            }
        }
    }
}

impl Default for SubscriptionManager {
    fn default() -> Self {
        Self::new()
    }
}
