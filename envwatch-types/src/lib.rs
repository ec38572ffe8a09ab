//! # envwatch-types
//!
//! Core types for environmental sensor monitoring. This crate turns one raw
//! feed record into a typed [`Sample`], formats its six readings for display
//! and evaluates four hazard rules against it.
//!
//! Everything here is pure: no I/O, no clocks, no global state. Fetching
//! records and drawing them on screen belong to `envwatch-adapters` and the
//! `envwatch` binary.
//!
//! ## Pipeline
//!
//! ```text
//!           ┌──display map──▶ Sample ──▶ MetricField::format ──▶ "23.46 °C"
//! RawRecord ┤
//!           └──rule map─────▶ Sample ──▶ RiskEngine::evaluate ──▶ RiskReport
//! ```
//!
//! ## Features
//!
//! - `std` (default): Standard library support
//! - `serde`: serialization of samples and risk reports
//!
//! ## Example
//!
//! ```rust
//! use envwatch_types::{
//!     format_metric, FieldMap, RawRecord, RiskCategory, RiskEngine, RiskLevel, Sample,
//! };
//!
//! let mut record = RawRecord::new();
//! record.insert("field1".into(), Some("32.4".into()));
//! record.insert("field2".into(), Some("85".into()));
//! record.insert("field5".into(), Some("995.2".into()));
//!
//! let sample = Sample::from_record(&record, &FieldMap::rule_inputs());
//! let report = RiskEngine::default().evaluate(&sample);
//!
//! assert_eq!(report.get(RiskCategory::Thunderstorm).level, RiskLevel::Critical);
//! assert_eq!(format_metric("temperature", Some("32.4")), "32.40 °C");
//! assert_eq!(format_metric("pressure", None), "--");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod field;
mod format;
mod risk;
mod sample;

pub use field::*;
pub use format::*;
pub use risk::*;
pub use sample::*;
