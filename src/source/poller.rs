//! Background feed polling.
//!
//! One task fetches the latest entry immediately and then once per
//! interval. A cycle never starts while another is in flight: the task
//! awaits each fetch, and ticks missed meanwhile are skipped. Manual
//! refresh requests coalesce into at most one extra cycle.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use envwatch_adapters::thingspeak::ThingSpeakAdapter;
use envwatch_adapters::{AdapterError, FeedEntry};

use super::channel::ErrorSlot;
use super::ChannelSource;

/// Something that can fetch the latest feed entry.
pub trait Fetch: Send + Sync + 'static {
    fn fetch_latest(
        &self,
    ) -> impl Future<Output = Result<Option<FeedEntry>, AdapterError>> + Send;
}

impl Fetch for ThingSpeakAdapter {
    fn fetch_latest(
        &self,
    ) -> impl Future<Output = Result<Option<FeedEntry>, AdapterError>> + Send {
        ThingSpeakAdapter::fetch_latest(self)
    }
}

/// Periodic fetcher publishing entries to a [`ChannelSource`].
pub struct FeedPoller<F> {
    fetcher: F,
    interval: Duration,
    sender: watch::Sender<Option<FeedEntry>>,
    last_error: ErrorSlot,
    refresh: Arc<Notify>,
}

/// Control handle for a running poller.
#[derive(Debug)]
pub struct PollerHandle {
    refresh: Arc<Notify>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Ask for a fetch as soon as the current cycle (if any) finishes.
    pub fn request_refresh(&self) {
        self.refresh.notify_one();
    }

    /// Stop the poller.
    pub fn abort(&self) {
        self.task.abort();
    }
}

impl<F: Fetch> FeedPoller<F> {
    /// Spawn the polling task on the current tokio runtime.
    ///
    /// The task stops on its own once the returned source is dropped.
    pub fn spawn(
        fetcher: F,
        interval: Duration,
        description: &str,
    ) -> (ChannelSource, PollerHandle) {
        let (sender, source) = ChannelSource::create(description);
        let refresh = Arc::new(Notify::new());

        let poller = FeedPoller {
            fetcher,
            interval,
            sender,
            last_error: source.error_slot(),
            refresh: Arc::clone(&refresh),
        };

        info!(
            source = description,
            interval_secs = interval.as_secs(),
            "Starting feed poller"
        );
        let task = tokio::spawn(poller.run());

        (source, PollerHandle { refresh, task })
    }

    async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = self.refresh.notified() => {
                    debug!("Manual refresh requested");
                    ticker.reset();
                }
            }

            if self.sender.is_closed() {
                info!("Dashboard closed, stopping feed poller");
                break;
            }

            self.cycle().await;
        }
    }

    async fn cycle(&self) {
        match self.fetcher.fetch_latest().await {
            Ok(Some(entry)) => {
                debug!(
                    entry_id = ?entry.entry_id,
                    created_at = ?entry.created_at,
                    "Received feed entry"
                );
                self.set_error(None);
                self.sender.send_replace(Some(entry));
            }
            Ok(None) => {
                warn!("Feed returned no records, keeping previous values");
                self.set_error(Some("Feed has no records".to_string()));
            }
            Err(e) => {
                warn!(error = %e, "Fetch failed, keeping previous values");
                self.set_error(Some(e.to_string()));
            }
        }
    }

    fn set_error(&self, error: Option<String>) {
        if let Ok(mut slot) = self.last_error.lock() {
            *slot = error;
        }
    }
}
