//! Channel-based data source.
//!
//! Receives feed entries via a tokio watch channel. The producer side is
//! normally a [`FeedPoller`](super::FeedPoller).

use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use envwatch_adapters::FeedEntry;

use super::DataSource;

/// Slot holding the error of the last failed fetch.
pub type ErrorSlot = Arc<Mutex<Option<String>>>;

/// A data source that receives feed entries via a channel.
///
/// Only the newest entry is kept; entries published between two polls
/// collapse into the last one.
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<Option<FeedEntry>>,
    last_error: ErrorSlot,
    description: String,
}

impl ChannelSource {
    /// Create a new channel source.
    pub fn new(
        receiver: watch::Receiver<Option<FeedEntry>>,
        last_error: ErrorSlot,
        description: &str,
    ) -> Self {
        Self {
            receiver,
            last_error,
            description: description.to_string(),
        }
    }

    /// Create a channel pair for sending entries to a ChannelSource.
    ///
    /// Returns (sender, source). The channel starts empty, so the first
    /// poll yields nothing until the sender publishes an entry.
    pub fn create(description: &str) -> (watch::Sender<Option<FeedEntry>>, Self) {
        let (tx, rx) = watch::channel(None);
        (tx, Self::new(rx, ErrorSlot::default(), description))
    }

    /// Shared handle to the last-error slot, for the producer side.
    pub fn error_slot(&self) -> ErrorSlot {
        Arc::clone(&self.last_error)
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<FeedEntry> {
        if self.receiver.has_changed().unwrap_or(false) {
            self.receiver.borrow_and_update().clone()
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<String> {
        self.last_error.lock().ok().and_then(|slot| slot.clone())
    }
}
