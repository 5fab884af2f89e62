use crate::sheet::SheetRow;
use crate::types::{RawListing, Result};
use async_trait::async_trait;

/// Source of raw listings. The pipeline treats the feed as a collaborator
/// behind this seam; rate limiting and pagination are the source's problem.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Human-readable name for logs.
    fn source_name(&self) -> String;

    /// Fetch the most recent listings, newest first. May return fewer than
    /// `limit` items.
    async fn fetch_recent_listings(&self, limit: usize) -> Result<Vec<RawListing>>;
}

/// Destination for accepted listings, one appended row each.
#[async_trait]
pub trait ListingSink: Send + Sync {
    async fn append_row(&mut self, row: &SheetRow) -> Result<()>;
}
