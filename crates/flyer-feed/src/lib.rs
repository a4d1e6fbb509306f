//! Flyer feed loader library
//!
//! # Quick Start
//!
//! For convenient imports, use the prelude:
//!
//! ```
//! use flyer_feed_rs::prelude::*;
//! ```
//!
//! This re-exports the most commonly used types including [`FeedClient`],
//! [`FeedSource`], error types, and the [`Record`] data model.
//!
//! [`FeedClient`]: client::FeedClient
//! [`FeedSource`]: client::FeedSource
//! [`Record`]: record::Record

pub mod client;
pub mod error;
pub mod prelude;
pub mod record;
pub mod schema;
