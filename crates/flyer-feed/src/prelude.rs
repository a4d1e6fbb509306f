//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the flyer-feed
//! crate, making it easy for library consumers to import everything they
//! need with a single use statement.
//!
//! # Example
//!
//! ```
//! use flyer_feed_rs::prelude::*;
//!
//! // Now you have access to:
//! // - FeedClient, FeedSource (feed loading)
//! // - FeedError, Result (error handling)
//! // - Record (data model)
//! // - SchemaVariant (schema detection)
//! ```

// Client types
pub use crate::client::{FeedClient, FeedSource};

// Error types
pub use crate::error::{FeedError, Result};

// Data model
pub use crate::record::{parse_price_text, Record};

// Schema detection
pub use crate::schema::SchemaVariant;
