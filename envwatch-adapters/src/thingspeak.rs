//! ThingSpeak adapter using the channel feed REST API.
//!
//! Reads the most recent entry of a channel with
//! `GET {endpoint}/channels/{id}/feeds.json?api_key={key}&results=1`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use envwatch_adapters::thingspeak::ThingSpeakAdapter;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = ThingSpeakAdapter::builder()
//!         .channel_id(3035795)
//!         .read_api_key("XXXXXXXXXXXXXXXX")
//!         .build()?;
//!
//!     match adapter.fetch_latest().await? {
//!         Some(entry) => println!("field1 = {:?}", entry.field("field1")),
//!         None => println!("channel has no entries yet"),
//!     }
//!
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::{AdapterError, ChannelFeed, FeedEntry};

/// Default public API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.thingspeak.com";

/// ThingSpeak adapter for reading channel entries.
#[derive(Debug, Clone)]
pub struct ThingSpeakAdapter {
    client: Client,
    endpoint: String,
    channel_id: u64,
    read_api_key: String,
}

impl ThingSpeakAdapter {
    /// Create a new builder for configuring the adapter.
    pub fn builder() -> ThingSpeakAdapterBuilder {
        ThingSpeakAdapterBuilder::default()
    }

    /// Channel this adapter reads.
    pub fn channel_id(&self) -> u64 {
        self.channel_id
    }

    /// API endpoint, without trailing slash.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the most recent entry of the channel.
    ///
    /// Returns `Ok(None)` when the channel exists but holds no entries.
    pub async fn fetch_latest(&self) -> Result<Option<FeedEntry>, AdapterError> {
        Ok(self.fetch_feed(1).await?.latest())
    }

    async fn fetch_feed(&self, results: u32) -> Result<ChannelFeed, AdapterError> {
        let url = self.feed_url();
        let results = results.to_string();

        let mut query = vec![("results", results.as_str())];
        if !self.read_api_key.is_empty() {
            query.push(("api_key", self.read_api_key.as_str()));
        }

        let response = self.client.get(&url).query(&query).send().await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(AdapterError::Auth("Read API key rejected".to_string()));
            }
            StatusCode::NOT_FOUND => {
                return Err(AdapterError::Http(format!(
                    "Channel {} not found",
                    self.channel_id
                )));
            }
            status if !status.is_success() => {
                return Err(AdapterError::Http(format!("API returned status {}", status)));
            }
            _ => {}
        }

        // Private channels answer a bad key with 200 and a bare `-1`.
        let body = response.text().await?;
        if body.trim() == "-1" {
            return Err(AdapterError::Auth("Read API key rejected".to_string()));
        }

        serde_json::from_str(&body).map_err(|e| AdapterError::Parse(e.to_string()))
    }

    fn feed_url(&self) -> String {
        format!("{}/channels/{}/feeds.json", self.endpoint, self.channel_id)
    }
}

/// Builder for ThingSpeakAdapter.
#[derive(Debug, Default)]
pub struct ThingSpeakAdapterBuilder {
    endpoint: Option<String>,
    channel_id: Option<u64>,
    read_api_key: Option<String>,
    timeout: Option<Duration>,
}

impl ThingSpeakAdapterBuilder {
    /// Set the API endpoint (default: "https://api.thingspeak.com").
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the channel to read.
    pub fn channel_id(mut self, channel_id: u64) -> Self {
        self.channel_id = Some(channel_id);
        self
    }

    /// Set the read API key. Public channels accept an empty key.
    pub fn read_api_key(mut self, key: impl Into<String>) -> Self {
        self.read_api_key = Some(key.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the adapter.
    pub fn build(self) -> Result<ThingSpeakAdapter, AdapterError> {
        let channel_id = self
            .channel_id
            .ok_or_else(|| AdapterError::Client("channel id is required".to_string()))?;
        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AdapterError::Client(e.to_string()))?;

        let endpoint = self
            .endpoint
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(ThingSpeakAdapter {
            client,
            endpoint,
            channel_id,
            read_api_key: self.read_api_key.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    // Serve one canned HTTP response and hand back the request line.
    async fn serve_once(status: &str, body: &str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let n = socket.read(&mut buf).await.unwrap();
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            request.lines().next().unwrap_or_default().to_string()
        });

        (format!("http://{}", addr), handle)
    }

    fn adapter_for(endpoint: &str) -> ThingSpeakAdapter {
        ThingSpeakAdapter::builder()
            .endpoint(endpoint)
            .channel_id(42)
            .read_api_key("KEY")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let adapter = ThingSpeakAdapter::builder().channel_id(3035795).build().unwrap();
        assert_eq!(adapter.endpoint(), "https://api.thingspeak.com");
        assert_eq!(adapter.channel_id(), 3035795);
        assert_eq!(adapter.read_api_key, "");
    }

    #[test]
    fn test_builder_requires_channel() {
        let err = ThingSpeakAdapter::builder().build().unwrap_err();
        assert!(matches!(err, AdapterError::Client(_)));
    }

    #[test]
    fn test_feed_url_strips_trailing_slash() {
        let adapter = adapter_for("http://localhost:3000/");
        assert_eq!(
            adapter.feed_url(),
            "http://localhost:3000/channels/42/feeds.json"
        );
    }

    #[tokio::test]
    async fn test_fetch_latest_parses_entry() {
        let body = r#"{"channel":{"id":42},"feeds":[{"created_at":"2025-06-01T10:00:00Z","entry_id":9,"field1":"31.2","field7":998}]}"#;
        let (endpoint, server) = serve_once("200 OK", body).await;

        let entry = adapter_for(&endpoint).fetch_latest().await.unwrap().unwrap();
        assert_eq!(entry.entry_id, Some(9));
        assert_eq!(entry.field("field1"), Some("31.2"));
        assert_eq!(entry.field("field7"), Some("998"));

        let request_line = server.await.unwrap();
        assert!(request_line.starts_with("GET /channels/42/feeds.json?"));
        assert!(request_line.contains("results=1"));
        assert!(request_line.contains("api_key=KEY"));
    }

    #[tokio::test]
    async fn test_fetch_latest_empty_channel() {
        let (endpoint, _server) = serve_once("200 OK", r#"{"channel":{"id":42},"feeds":[]}"#).await;
        let entry = adapter_for(&endpoint).fetch_latest().await.unwrap();
        assert!(entry.is_none());
    }

    #[tokio::test]
    async fn test_fetch_latest_maps_status_codes() {
        let (endpoint, _server) = serve_once("401 Unauthorized", "{}").await;
        let err = adapter_for(&endpoint).fetch_latest().await.unwrap_err();
        assert!(matches!(err, AdapterError::Auth(_)));

        let (endpoint, _server) = serve_once("404 Not Found", "{}").await;
        let err = adapter_for(&endpoint).fetch_latest().await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP request failed: Channel 42 not found");

        let (endpoint, _server) = serve_once("500 Internal Server Error", "{}").await;
        let err = adapter_for(&endpoint).fetch_latest().await.unwrap_err();
        assert!(matches!(err, AdapterError::Http(_)));
    }

    #[tokio::test]
    async fn test_fetch_latest_rejected_key_body() {
        let (endpoint, _server) = serve_once("200 OK", "-1").await;
        let err = adapter_for(&endpoint).fetch_latest().await.unwrap_err();
        assert!(matches!(err, AdapterError::Auth(_)));
    }

    #[tokio::test]
    async fn test_fetch_latest_malformed_body() {
        let (endpoint, _server) = serve_once("200 OK", "<html>oops</html>").await;
        let err = adapter_for(&endpoint).fetch_latest().await.unwrap_err();
        assert!(matches!(err, AdapterError::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_latest_connection_refused() {
        let err = adapter_for("http://127.0.0.1:1").fetch_latest().await.unwrap_err();
        assert!(matches!(
            err,
            AdapterError::Connection(_) | AdapterError::Http(_)
        ));
    }
}
