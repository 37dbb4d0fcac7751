//! Subscription types.

use crate::types::ProductId;
use serde::{Deserialize, Serialize};

/// Default number of buffered events per subscriber.
pub const DEFAULT_BUFFER_SIZE: usize = 64;

/// Configuration for a subscription.
#[derive(Clone, Debug)]
pub struct SubscriptionConfig {
    /// Max buffered events before the subscriber is dropped. `None` uses the
    /// manager's default.
    pub buffer_size: Option<usize>,

    pub filter: SubscriptionFilter,
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            buffer_size: None,
            filter: SubscriptionFilter::all(),
        }
    }
}

/// Which events a subscriber wants.
#[derive(Clone, Debug, Default)]
pub struct SubscriptionFilter {
    /// Hydration, add, update and delete events.
    pub include_collection: bool,

    /// Editing slot changes.
    pub include_editing: bool,
}

impl SubscriptionFilter {
    /// Collection changes only.
    pub fn collection() -> Self {
        Self {
            include_collection: true,
            ..Default::default()
        }
    }

    /// Editing slot changes only.
    pub fn editing() -> Self {
        Self {
            include_editing: true,
            ..Default::default()
        }
    }

    /// Everything.
    pub fn all() -> Self {
        Self {
            include_collection: true,
            include_editing: true,
        }
    }

    pub(crate) fn matches(&self, event: &StoreEvent) -> bool {
        match event {
            StoreEvent::EditingChanged { .. } => self.include_editing,
            StoreEvent::Dropped { .. } => true,
            _ => self.include_collection,
        }
    }
}

/// Events emitted after store mutations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// The collection was replaced wholesale.
    Hydrated { count: usize },

    ProductAdded { id: ProductId },

    /// Only sent when a record actually matched.
    ProductUpdated { id: ProductId },

    ProductDeleted { id: ProductId, removed: bool },

    AllDeleted,

    /// The editing slot now holds `id` (or nothing).
    EditingChanged { id: Option<ProductId> },

    /// Subscription was dropped.
    Dropped { reason: DropReason },
}

/// Why a subscription was dropped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// Send buffer overflowed (slow consumer).
    BufferOverflow,
    /// Explicitly unsubscribed.
    Unsubscribed,
}

/// Unique identifier for a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Handle to receive events.
pub struct SubscriptionHandle {
    pub id: SubscriptionId,
    pub receiver: crossbeam_channel::Receiver<StoreEvent>,
}

impl SubscriptionHandle {
    /// Receive the next event (blocking).
    pub fn recv(&self) -> Result<StoreEvent, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an event (non-blocking).
    pub fn try_recv(&self) -> Result<StoreEvent, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Drain everything currently buffered.
    pub fn drain(&self) -> Vec<StoreEvent> {
        self.receiver.try_iter().collect()
    }
}
