pub mod config;
pub mod filter;
pub mod matcher;
pub mod pipeline;
pub mod price;
pub mod scraper;
pub mod sheet;
pub mod storage;
pub mod traits;
pub mod types;

pub use config::{Config, TermSpec};
pub use filter::ListingFilter;
pub use matcher::FuzzyMatcher;
pub use pipeline::Pipeline;
pub use price::PriceExtractor;
pub use scraper::RedditScraper;
pub use sheet::{CsvFileSink, SheetRow};
pub use storage::SeenStore;
pub use traits::{FeedSource, ListingSink};
pub use types::{CycleStats, MatchResult, PadwatchError, RawListing, RejectReason, Result};
