//! In-memory catalog over a loaded flyer feed.
//!
//! This crate owns the session dataset: it loads records through a
//! [`FeedClient`] exactly once, keeps them in memory, and answers filter,
//! facet, and sort queries without ever mutating the loaded data.

pub mod facet;
pub mod query;
pub mod sort;

use std::collections::HashSet;

use chrono::NaiveDate;
use flyer_feed_rs::client::FeedClient;
use flyer_feed_rs::error::Result;
use flyer_feed_rs::record::Record;

pub use flyer_feed_rs::error::FeedError;
pub use query::FilterCriteria;
pub use sort::{sort_records, SortKey};

/// Session-scoped product catalog.
///
/// The catalog loads its dataset lazily on first use and keeps it for the
/// life of the value. Every query method ensures the dataset is loaded
/// before answering, so callers never have to sequence an explicit load.
/// A failed load leaves the catalog unloaded; the next query retries.
///
/// # Thread Safety
///
/// `Catalog` is [`Send`] but query methods take `&mut self` because the
/// first call may populate the dataset. For multi-threaded usage, wrap in
/// `Arc<tokio::sync::Mutex<Catalog>>`:
///
/// ```no_run
/// use std::sync::Arc;
/// use tokio::sync::Mutex;
/// use flyer_feed_rs::client::FeedClient;
/// use flyer_catalog_rs::Catalog;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let catalog = Arc::new(Mutex::new(Catalog::new(
///     FeedClient::from_location("data/data.json"),
/// )));
///
/// let mut guard = catalog.lock().await;
/// let promos = guard.filter_by_promotion(true).await?;
/// # Ok(())
/// # }
/// ```
///
/// In typical CLI usage, the catalog is owned by a single async task and no
/// synchronization is needed.
pub struct Catalog {
    /// The feed client, absent for preloaded catalogs.
    client: Option<FeedClient>,

    /// The loaded dataset.
    records: Vec<Record>,

    /// Whether the dataset has been loaded.
    loaded: bool,
}

impl Catalog {
    /// Creates a new catalog that loads through the given client.
    pub fn new(client: FeedClient) -> Self {
        Self {
            client: Some(client),
            records: Vec::new(),
            loaded: false,
        }
    }

    /// Creates a catalog over an already-loaded dataset.
    ///
    /// No feed access ever happens; useful for embedders and tests.
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            client: None,
            records,
            loaded: true,
        }
    }

    /// Returns whether the dataset has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Returns the loaded dataset.
    ///
    /// Empty until the first successful [`ensure_loaded`](Self::ensure_loaded).
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Loads the dataset if it has not been loaded yet.
    ///
    /// Idempotent: once a load has succeeded, later calls return immediately
    /// without touching the feed. On failure the catalog stays unloaded and
    /// the error propagates, so a later call retries the load.
    ///
    /// # Errors
    ///
    /// Returns the [`FeedError`] from the underlying load attempt.
    pub async fn ensure_loaded(&mut self) -> Result<()> {
        if self.loaded {
            return Ok(());
        }
        if let Some(client) = &self.client {
            self.records = client.load().await?;
        }
        self.loaded = true;
        Ok(())
    }

    /// Returns records whose named field contains `value`, ignoring case.
    pub async fn filter_by_field(&mut self, field: &str, value: &str) -> Result<Vec<&Record>> {
        self.ensure_loaded().await?;
        Ok(query::filter_by_field(&self.records, field, value))
    }

    /// Returns records whose name contains `name`, ignoring case.
    pub async fn search_by_name(&mut self, name: &str) -> Result<Vec<&Record>> {
        self.filter_by_field("name", name).await
    }

    /// Returns records whose brand contains `brand`, ignoring case.
    pub async fn filter_by_brand(&mut self, brand: &str) -> Result<Vec<&Record>> {
        self.filter_by_field("brand", brand).await
    }

    /// Returns records whose store contains `store`, ignoring case.
    pub async fn filter_by_store(&mut self, store: &str) -> Result<Vec<&Record>> {
        self.filter_by_field("store", store).await
    }

    /// Returns records with a category containing `category`, ignoring case.
    pub async fn filter_by_category(&mut self, category: &str) -> Result<Vec<&Record>> {
        self.filter_by_field("category", category).await
    }

    /// Returns records valid in the given year.
    pub async fn filter_by_year(&mut self, year: &str) -> Result<Vec<&Record>> {
        self.ensure_loaded().await?;
        Ok(query::filter_by_year(&self.records, year))
    }

    /// Returns records whose current price lies in `[min, max]`.
    pub async fn filter_by_price_range(&mut self, min: f64, max: f64) -> Result<Vec<&Record>> {
        self.ensure_loaded().await?;
        Ok(query::filter_by_price_range(&self.records, min, max))
    }

    /// Returns records whose promotion state equals `wanted`.
    pub async fn filter_by_promotion(&mut self, wanted: bool) -> Result<Vec<&Record>> {
        self.ensure_loaded().await?;
        Ok(query::filter_by_promotion(&self.records, wanted))
    }

    /// Returns records whose validity window contains `date`.
    pub async fn filter_by_valid_on(&mut self, date: NaiveDate) -> Result<Vec<&Record>> {
        self.ensure_loaded().await?;
        Ok(query::filter_by_valid_on(&self.records, date))
    }

    /// Returns records whose full text contains `text`, ignoring case.
    pub async fn search(&mut self, text: &str) -> Result<Vec<&Record>> {
        self.ensure_loaded().await?;
        Ok(query::search(&self.records, text))
    }

    /// Returns records matching every constraint of `criteria`.
    pub async fn filter(&mut self, criteria: &FilterCriteria) -> Result<Vec<&Record>> {
        self.ensure_loaded().await?;
        Ok(query::apply(&self.records, criteria))
    }

    /// Returns the distinct non-empty values of the named field.
    pub async fn distinct_values(&mut self, field: &str) -> Result<HashSet<String>> {
        self.ensure_loaded().await?;
        Ok(facet::distinct_values(&self.records, field))
    }

    /// Returns the ceiling of the largest parseable current price.
    ///
    /// `None` when no record has a parseable price.
    pub async fn max_price(&mut self) -> Result<Option<f64>> {
        self.ensure_loaded().await?;
        let max = self
            .records
            .iter()
            .filter_map(Record::current_price_value)
            .fold(None::<f64>, |acc, price| {
                Some(acc.map_or(price, |m| m.max(price)))
            });
        Ok(max.map(f64::ceil))
    }
}
