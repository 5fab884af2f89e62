use crate::types::{PadwatchError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A target concept with a canonical label plus accepted spelling variants.
/// In YAML a bare string is shorthand for a variant-free term.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TermSpec {
    Plain(String),
    WithVariants {
        canonical: String,
        #[serde(default)]
        variants: Vec<String>,
    },
}

impl TermSpec {
    pub fn canonical(&self) -> &str {
        match self {
            TermSpec::Plain(s) => s,
            TermSpec::WithVariants { canonical, .. } => canonical,
        }
    }

    /// Canonical label plus all variants, in declaration order.
    pub fn spellings(&self) -> Vec<&str> {
        match self {
            TermSpec::Plain(s) => vec![s.as_str()],
            TermSpec::WithVariants { canonical, variants } => {
                let mut all = vec![canonical.as_str()];
                all.extend(variants.iter().map(|v| v.as_str()));
                all
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapingConfig {
    pub subreddits: Vec<String>,
    pub user_agent: String,
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u64,
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceConfig {
    pub min: Option<u32>,
    pub max: Option<u32>,
    /// Sanity band for extraction; numbers outside it are never treated as rent.
    #[serde(default = "default_plausible_min")]
    pub plausible_min: u32,
    #[serde(default = "default_plausible_max")]
    pub plausible_max: u32,
    /// When true a listing with no detectable price is rejected instead of
    /// passed through for manual review.
    #[serde(default)]
    pub reject_missing_price: bool,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            plausible_min: default_plausible_min(),
            plausible_max: default_plausible_max(),
            reject_missing_price: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_seen_posts_file")]
    pub seen_posts_file: String,
    #[serde(default = "default_output_file")]
    pub output_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            seen_posts_file: default_seen_posts_file(),
            output_file: default_output_file(),
        }
    }
}

/// Full application configuration, loaded once per run and read-only after
/// validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub scraping: ScrapingConfig,
    #[serde(default)]
    pub price: PriceConfig,
    #[serde(default)]
    pub neighborhoods: Vec<TermSpec>,
    #[serde(default)]
    pub apartment_types: Vec<TermSpec>,
    #[serde(default)]
    pub exclude_terms: Vec<TermSpec>,
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load and validate a YAML config file. Any structural problem is fatal
    /// here, before the pipeline touches the network or the store.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            PadwatchError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Config = serde_yaml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.scraping.subreddits.is_empty() {
            return Err(PadwatchError::Config(
                "scraping.subreddits must list at least one subreddit".to_string(),
            ));
        }
        if let (Some(min), Some(max)) = (self.price.min, self.price.max) {
            if min > max {
                return Err(PadwatchError::Config(format!(
                    "price.min ({}) exceeds price.max ({})",
                    min, max
                )));
            }
        }
        if self.price.plausible_min > self.price.plausible_max {
            return Err(PadwatchError::Config(format!(
                "price.plausible_min ({}) exceeds price.plausible_max ({})",
                self.price.plausible_min, self.price.plausible_max
            )));
        }
        if !(0.0..=100.0).contains(&self.fuzzy_threshold) {
            return Err(PadwatchError::Config(format!(
                "fuzzy_threshold must be between 0 and 100, got {}",
                self.fuzzy_threshold
            )));
        }
        for term in self
            .neighborhoods
            .iter()
            .chain(&self.apartment_types)
            .chain(&self.exclude_terms)
        {
            if term.canonical().trim().is_empty() {
                return Err(PadwatchError::Config(
                    "term entries must have a non-empty canonical label".to_string(),
                ));
            }
        }
        Ok(())
    }
}

fn default_interval_minutes() -> u64 {
    30
}

fn default_fetch_limit() -> usize {
    50
}

fn default_plausible_min() -> u32 {
    500
}

fn default_plausible_max() -> u32 {
    15_000
}

fn default_fuzzy_threshold() -> f64 {
    80.0
}

fn default_seen_posts_file() -> String {
    "seen_posts.json".to_string()
}

fn default_output_file() -> String {
    "listings.csv".to_string()
}
