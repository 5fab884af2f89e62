use crate::filter::ListingFilter;
use crate::sheet::SheetRow;
use crate::storage::SeenStore;
use crate::traits::{FeedSource, ListingSink};
use crate::types::{CycleStats, Result};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Drives one fetch/filter/append cycle and the daemon loop around it.
///
/// Processing is sequential: each fresh listing is filtered, accepted ones
/// are appended to the sink, and only then is the id marked seen. A failed
/// sink write leaves the id unmarked so the next cycle retries it; filtering
/// is idempotent, so at-least-once is safe.
pub struct Pipeline {
    source: Box<dyn FeedSource>,
    filter: ListingFilter,
    store: SeenStore,
    sink: Box<dyn ListingSink>,
    fetch_limit: usize,
    test_mode: bool,
}

impl Pipeline {
    pub fn new(
        source: Box<dyn FeedSource>,
        filter: ListingFilter,
        store: SeenStore,
        sink: Box<dyn ListingSink>,
        fetch_limit: usize,
        test_mode: bool,
    ) -> Self {
        Self {
            source,
            filter,
            store,
            sink,
            fetch_limit,
            test_mode,
        }
    }

    pub fn seen_count(&self) -> usize {
        self.store.len()
    }

    /// Run a single scrape cycle and flush the seen store at the end.
    pub async fn run_cycle(&mut self) -> Result<CycleStats> {
        let mut stats = CycleStats::default();

        let listings = self.source.fetch_recent_listings(self.fetch_limit).await?;
        stats.fetched = listings.len();

        let fresh: Vec<_> = listings
            .into_iter()
            .filter(|l| !self.store.has_seen(&l.id))
            .collect();
        stats.new = fresh.len();
        debug!("{} fetched, {} unseen", stats.fetched, stats.new);

        for listing in &fresh {
            let result = self.filter.filter_listing(listing);

            if result.accepted {
                stats.passed += 1;
                info!(
                    "match: {} (price: {}, neighborhood: {})",
                    listing.title,
                    result
                        .price
                        .map(|p| format!("${}", p))
                        .unwrap_or_else(|| "?".to_string()),
                    result.neighborhood.as_deref().unwrap_or("?"),
                );

                if !self.test_mode {
                    let row = SheetRow::from_listing(listing, &result);
                    if let Err(e) = self.sink.append_row(&row).await {
                        // Leave the id unmarked; the next cycle re-filters
                        // and retries the append.
                        warn!("could not append '{}': {}", listing.title, e);
                        continue;
                    }
                    stats.appended += 1;
                }
            } else if let Some(reason) = result.reject_reason {
                debug!("filtered: {} ({})", listing.title, reason);
            }

            self.store.mark_seen(&listing.id);
        }

        self.store.flush()?;

        info!(
            "cycle done: {} fetched, {} new, {} passed, {} appended",
            stats.fetched, stats.new, stats.passed, stats.appended
        );
        Ok(stats)
    }

    /// Run cycles on an interval until ctrl-c. The store is flushed at the
    /// end of every cycle, so shutdown mid-sleep loses nothing.
    pub async fn run_daemon(&mut self, interval_minutes: u64) -> Result<()> {
        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
        };
        self.run_until(interval_minutes, shutdown).await
    }

    /// Run cycles until `shutdown` resolves. One shutdown future is held
    /// across the whole loop, so a signal arriving mid-cycle is honored too:
    /// the in-flight cycle is abandoned at its next await point and whatever
    /// it had not yet flushed is re-checked on the next run.
    pub async fn run_until(
        &mut self,
        interval_minutes: u64,
        shutdown: impl std::future::Future<Output = ()>,
    ) -> Result<()> {
        let period = Duration::from_secs(interval_minutes * 60);
        info!("daemon mode, one cycle every {} minutes", interval_minutes);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                result = self.run_cycle() => {
                    if let Err(e) = result {
                        warn!("cycle failed: {}", e);
                    }
                }
                _ = &mut shutdown => {
                    info!("shutting down");
                    break;
                }
            }

            tokio::select! {
                _ = tokio::time::sleep(period) => {}
                _ = &mut shutdown => {
                    info!("shutting down");
                    break;
                }
            }
        }

        self.store.flush()?;
        Ok(())
    }
}
