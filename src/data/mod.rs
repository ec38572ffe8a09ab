//! Data models for the dashboard.
//!
//! ## Data Flow
//!
//! ```text
//! FeedEntry (raw JSON)
//!        │
//!        ▼
//! Dashboard::from_entry()
//!        │
//!        ├──▶ Sample (display map) ──▶ FormattedMetric × 6
//!        └──▶ Sample (rule map) ──▶ RiskReport (RiskEngine)
//! ```

pub mod dashboard;

pub use dashboard::{last_updated_line, Dashboard};
