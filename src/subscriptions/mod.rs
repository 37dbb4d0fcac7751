//! Change notifications for the store.
//!
//! A rendering layer subscribes once and re-runs the query pipeline
//! whenever an event arrives. Events are delivered over bounded channels;
//! a subscriber that stops draining its channel is dropped instead of
//! blocking store mutations.
//!
//! # Example
//!
//! ```ignore
//! let handle = store.subscribe(SubscriptionConfig::default());
//! store.create_product(draft)?;
//!
//! while let Ok(event) = handle.try_recv() {
//!     match event {
//!         StoreEvent::Dropped { .. } => break,
//!         _ => redraw(&store),
//!     }
//! }
//! ```

mod manager;
mod types;

pub use manager::SubscriptionManager;
pub use types::{
    DropReason, StoreEvent, SubscriptionConfig, SubscriptionFilter, SubscriptionHandle,
    SubscriptionId, DEFAULT_BUFFER_SIZE,
};
