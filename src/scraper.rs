use crate::traits::FeedSource;
use crate::types::{RawListing, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{error, info};

/// Minimum spacing between requests, to stay polite with the feed host.
const MIN_REQUEST_INTERVAL: Duration = Duration::from_secs(2);

/// Pulls new posts from subreddit JSON endpoints.
pub struct RedditScraper {
    client: Client,
    subreddits: Vec<String>,
    last_request: Mutex<Option<Instant>>,
}

impl RedditScraper {
    pub fn new(subreddits: Vec<String>, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(30))
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            subreddits,
            last_request: Mutex::new(None),
        })
    }

    async fn fetch_subreddit(&self, subreddit: &str, limit: usize) -> Result<Vec<RawListing>> {
        self.rate_limit().await;

        let url = format!("https://www.reddit.com/r/{}/new.json", subreddit);
        let response = self
            .client
            .get(&url)
            .query(&[("limit", limit.min(100).to_string())])
            .send()
            .await?
            .error_for_status()?;

        let feed: RedditFeed = response.json().await?;
        let listings = feed
            .data
            .children
            .into_iter()
            .map(|child| child.data.into_listing(subreddit))
            .collect();
        Ok(listings)
    }

    async fn rate_limit(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < MIN_REQUEST_INTERVAL {
                tokio::time::sleep(MIN_REQUEST_INTERVAL - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[async_trait]
impl FeedSource for RedditScraper {
    fn source_name(&self) -> String {
        format!("reddit:{}", self.subreddits.join(","))
    }

    async fn fetch_recent_listings(&self, limit: usize) -> Result<Vec<RawListing>> {
        let mut all = Vec::new();
        for subreddit in &self.subreddits {
            // One bad subreddit must not sink the whole batch.
            match self.fetch_subreddit(subreddit, limit).await {
                Ok(listings) => all.extend(listings),
                Err(e) => error!("failed to fetch r/{}: {}", subreddit, e),
            }
        }
        info!(
            "fetched {} posts from {} subreddits",
            all.len(),
            self.subreddits.len()
        );
        Ok(all)
    }
}

#[derive(Debug, Deserialize)]
struct RedditFeed {
    data: RedditFeedData,
}

#[derive(Debug, Deserialize)]
struct RedditFeedData {
    #[serde(default)]
    children: Vec<RedditChild>,
}

#[derive(Debug, Deserialize)]
struct RedditChild {
    data: RedditPost,
}

#[derive(Debug, Deserialize)]
struct RedditPost {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    selftext: String,
    #[serde(default = "deleted_author")]
    author: String,
    #[serde(default)]
    created_utc: f64,
    #[serde(default)]
    permalink: String,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    num_comments: u32,
    #[serde(default)]
    link_flair_text: Option<String>,
}

fn deleted_author() -> String {
    "[deleted]".to_string()
}

impl RedditPost {
    fn into_listing(self, subreddit: &str) -> RawListing {
        let posted_at = if self.created_utc > 0.0 {
            DateTime::<Utc>::from_timestamp(self.created_utc as i64, 0)
        } else {
            None
        };

        RawListing {
            id: self.id,
            subreddit: subreddit.to_string(),
            title: self.title,
            body: self.selftext,
            author: self.author,
            flair: self.link_flair_text,
            posted_at,
            url: format!("https://www.reddit.com{}", self.permalink),
            score: self.score,
            num_comments: self.num_comments,
        }
    }
}
