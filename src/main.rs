use anyhow::Context;
use clap::Parser;
use padwatch::{Config, CsvFileSink, ListingFilter, Pipeline, RedditScraper, SeenStore};
use tracing::info;

/// Scrapes apartment-listing subreddits and appends matches to a sheet.
#[derive(Debug, Parser)]
#[command(name = "padwatch", version, about)]
struct Args {
    /// Path to the YAML config file
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Run continuously on the configured interval
    #[arg(short, long)]
    daemon: bool,

    /// Test mode: filter and log, but never write to the output sheet
    #[arg(short, long)]
    test: bool,

    /// Verbose logging (surfaces per-listing rejection reasons)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let config = Config::load(&args.config)
        .with_context(|| format!("failed to load config from {}", args.config))?;

    let scraper = RedditScraper::new(
        config.scraping.subreddits.clone(),
        &config.scraping.user_agent,
    )
    .context("failed to build HTTP client")?;

    let store = SeenStore::load(&config.storage.seen_posts_file)
        .context("failed to load seen-posts store")?;

    let sink = CsvFileSink::new(&config.storage.output_file)
        .context("failed to open output sheet")?;

    if args.test {
        info!("TEST MODE: output sheet will not be written");
    }
    info!(
        "subreddits: {} | price: {}-{} | {} neighborhoods | {} seen",
        config.scraping.subreddits.join(", "),
        config.price.min.map_or("any".to_string(), |p| format!("${}", p)),
        config.price.max.map_or("any".to_string(), |p| format!("${}", p)),
        config.neighborhoods.len(),
        store.len(),
    );

    let interval_minutes = config.scraping.interval_minutes;
    let fetch_limit = config.scraping.fetch_limit;
    let filter = ListingFilter::new(config);

    let mut pipeline = Pipeline::new(
        Box::new(scraper),
        filter,
        store,
        Box::new(sink),
        fetch_limit,
        args.test,
    );

    if args.daemon {
        pipeline.run_daemon(interval_minutes).await?;
    } else {
        pipeline.run_cycle().await?;
    }

    Ok(())
}
