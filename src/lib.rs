//! # envwatch
//!
//! A terminal dashboard for an environmental sensor feed. It polls the latest
//! record of a ThingSpeak channel, shows six readings with units and
//! evaluates four hazard rules (thunderstorm, drought, flood, cyclone).
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌──────────┐  │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal │  │
//! │  │ (state) │    │(Dashboard)    │(ratatui)│    │          │  │
//! │  └────┬────┘    └──────────┘    └─────────┘    └──────────┘  │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  ┌─────────┐      watch       ┌────────────┐                 │
//! │  │ source  │◀─────────────────│ FeedPoller │◀── ThingSpeak   │
//! │  │ (input) │                  │  (tokio)   │                 │
//! │  └─────────┘                  └────────────┘                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation, and user interaction logic
//! - **[`source`]**: [`DataSource`] trait, the channel-backed source and the poller
//! - **[`data`]**: [`Dashboard`] view model built from one feed entry
//! - **[`render`]**: [`Renderer`] trait with text and JSON implementations
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`config`]**: Layered settings (defaults, file, environment, CLI)
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Live dashboard for the default channel
//! envwatch
//!
//! # Another channel, polled every 15 seconds, with logs
//! envwatch --channel 12345 --api-key XXXXXXXXXXXXXXXX --interval 15 --log-file envwatch.log
//!
//! # One-shot report
//! envwatch --once --json
//! ```
//!
//! ### As a library with a channel source
//!
//! ```
//! use envwatch::{App, ChannelSource};
//! use envwatch_types::{FieldMaps, RiskEngine};
//!
//! let (tx, source) = ChannelSource::create("thingspeak:3035795");
//! let app = App::new(Box::new(source), FieldMaps::default(), RiskEngine::default());
//! ```
//!
//! ### Polling a channel in the background
//!
//! ```no_run
//! use std::time::Duration;
//! use envwatch::{DataSource, FeedPoller};
//! use envwatch_adapters::thingspeak::ThingSpeakAdapter;
//!
//! # tokio_test::block_on(async {
//! let adapter = ThingSpeakAdapter::builder().channel_id(3035795).build().unwrap();
//! let (mut source, handle) = FeedPoller::spawn(adapter, Duration::from_secs(30), "thingspeak");
//! if let Some(entry) = source.poll() {
//!     println!("entry {:?}", entry.entry_id);
//! }
//! handle.request_refresh();
//! # });
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod render;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, View};
pub use data::Dashboard;
pub use render::{JsonRenderer, Renderer, TextRenderer};
pub use source::{ChannelSource, DataSource, FeedPoller, Fetch, PollerHandle};
