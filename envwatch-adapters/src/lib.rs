//! # envwatch-adapters
//!
//! Adapters that fetch the latest record from an environmental sensor feed
//! and hand it over as a [`FeedEntry`].
//!
//! ## Supported Feeds
//!
//! - **ThingSpeak** (`thingspeak` feature) - Reads the most recent entry of a
//!   channel through the public REST API
//!
//! ## Quick Start (ThingSpeak)
//!
//! ```rust,no_run
//! # #[cfg(feature = "thingspeak")]
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use envwatch_adapters::thingspeak::ThingSpeakAdapter;
//! use envwatch_adapters::{FieldMap, Sample};
//!
//! let adapter = ThingSpeakAdapter::builder()
//!     .channel_id(3035795)
//!     .read_api_key("XXXXXXXXXXXXXXXX")
//!     .build()?;
//!
//! if let Some(entry) = adapter.fetch_latest().await? {
//!     let sample = Sample::from_record(&entry.to_record(), &FieldMap::default());
//!     println!("Temperature: {:?}", sample.temperature);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod feed;

#[cfg(feature = "thingspeak")]
pub mod thingspeak;

pub use error::AdapterError;
pub use feed::{ChannelFeed, FeedEntry};

// Re-export types for convenience
pub use envwatch_types::{FieldMap, RawRecord, Sample};
