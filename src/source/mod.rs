//! Data source abstraction for receiving feed entries.
//!
//! The TUI never blocks on the network. A background [`FeedPoller`] fetches
//! entries and publishes them; the draw loop polls a [`DataSource`] for
//! whatever arrived since the last frame.

mod channel;
mod poller;

pub use channel::{ChannelSource, ErrorSlot};
pub use poller::{FeedPoller, Fetch, PollerHandle};

use std::fmt::Debug;

use envwatch_adapters::FeedEntry;

/// Trait for receiving feed entries from a background producer.
///
/// # Example
///
/// ```
/// use envwatch::{ChannelSource, DataSource};
///
/// let (_tx, mut source) = ChannelSource::create("thingspeak:3035795");
/// assert!(source.poll().is_none());
/// assert_eq!(source.description(), "thingspeak:3035795");
/// ```
pub trait DataSource: Send + Debug {
    /// Take the newest entry if one arrived since the last poll.
    ///
    /// This method must not block.
    fn poll(&mut self) -> Option<FeedEntry>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI header and status bar.
    fn description(&self) -> &str;

    /// Error from the most recent fetch, if it failed.
    fn error(&self) -> Option<String>;
}
