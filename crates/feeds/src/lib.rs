//! Deal feed client for the Woot affiliate API.
//!
//! This crate provides:
//! - `WootClient`, the two-step feed/offer-detail REST client
//! - `DealSource`, the trait the run orchestrator fetches through

pub mod error;
pub mod source;
pub mod woot;

pub use error::FeedError;
pub use source::DealSource;
pub use woot::{FeedItem, WootClient};
