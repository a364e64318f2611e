//! Pricewatch Core Library
//!
//! This library polls a fixed list of retail sources for smartphone prices,
//! normalizes what it finds and appends each observation to a local price
//! history, raising an alert when a price falls sharply.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`fetch`] - HTTP retrieval with retries and rotating User-Agents
//! - [`normalize`] - Price and model name normalization
//! - [`parser`] - Model/price extraction from JSON and HTML bodies
//! - [`store`] - Append-only price history on top of [`db`]
//! - [`detect`] - Price drop detection against stored history
//! - [`pipeline`] - Sequential run over all sources
//! - [`config`] - Config file parsing and run settings

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod db;
pub mod detect;
pub mod fetch;
pub mod normalize;
pub mod pacing;
pub mod parser;
pub mod pipeline;
pub mod record;
pub mod store;
pub mod user_agent;

// Re-export commonly used types
pub use db::{Database, DbError};
pub use detect::{DropDetector, PriceDrop};
pub use fetch::{
    DEFAULT_MAX_RETRIES, FetchError, Fetcher, HttpClient, RawContent, RetryPolicy, SourceKind,
};
pub use normalize::{normalize_model, normalize_price};
pub use pacing::{DelayRange, RandomSource};
pub use parser::parse_record;
pub use pipeline::{Pipeline, RunReport};
pub use record::PriceRecord;
pub use store::{PriceRepository, PriceStore, StoreError};
