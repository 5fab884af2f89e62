use padwatch::config::{Config, PriceConfig, ScrapingConfig, StorageConfig};
use padwatch::types::{RawListing, RejectReason};
use padwatch::{ListingFilter, TermSpec};

fn term(canonical: &str, variants: &[&str]) -> TermSpec {
    TermSpec::WithVariants {
        canonical: canonical.to_string(),
        variants: variants.iter().map(|v| v.to_string()).collect(),
    }
}

fn plain(s: &str) -> TermSpec {
    TermSpec::Plain(s.to_string())
}

fn test_config() -> Config {
    Config {
        scraping: ScrapingConfig {
            subreddits: vec!["NYCapartments".to_string()],
            user_agent: "padwatch-test/0.1".to_string(),
            interval_minutes: 30,
            fetch_limit: 50,
        },
        price: PriceConfig {
            min: Some(1500),
            max: Some(2800),
            ..PriceConfig::default()
        },
        neighborhoods: vec![
            plain("williamsburg"),
            term("east village", &["ev"]),
            term("lower east side", &["les"]),
            plain("bushwick"),
        ],
        apartment_types: vec![
            plain("studio"),
            term("1 bedroom", &["1br", "1 br", "1 bed", "one bedroom"]),
        ],
        exclude_terms: vec![
            plain("sublease"),
            plain("sublet"),
            plain("roommate"),
            plain("room for rent"),
            plain("shared"),
        ],
        fuzzy_threshold: 80.0,
        storage: StorageConfig::default(),
    }
}

fn listing(title: &str, body: &str, flair: Option<&str>) -> RawListing {
    RawListing {
        id: "t1".to_string(),
        subreddit: "NYCapartments".to_string(),
        title: title.to_string(),
        body: body.to_string(),
        author: "tester".to_string(),
        flair: flair.map(|f| f.to_string()),
        posted_at: None,
        url: "https://www.reddit.com/r/NYCapartments/t1".to_string(),
        score: 3,
        num_comments: 1,
    }
}

#[test]
fn good_listing_is_accepted_with_annotations() {
    let filter = ListingFilter::new(test_config());
    let result = filter.filter_listing(&listing(
        "[Offering] Beautiful 1BR in East Village - $2400/mo",
        "Spacious one bedroom apartment, renovated kitchen, laundry in building.",
        Some("Offering"),
    ));

    assert!(result.accepted);
    assert_eq!(result.price, Some(2400));
    assert_eq!(result.neighborhood.as_deref(), Some("east village"));
    assert_eq!(result.apartment_type.as_deref(), Some("1 bedroom"));
    assert_eq!(result.reject_reason, None);
}

#[test]
fn neighborhood_match_ignores_case_and_punctuation() {
    let filter = ListingFilter::new(test_config());
    let result = filter.filter_listing(&listing(
        "[Offering] Studio, $2100 -- I love WILLIAMSBURG!!",
        "Cozy studio near the L train.",
        Some("Offering"),
    ));

    assert!(result.accepted);
    assert_eq!(result.neighborhood.as_deref(), Some("williamsburg"));
}

#[test]
fn exclusion_term_wins_over_neighborhood_match() {
    let filter = ListingFilter::new(test_config());
    let result = filter.filter_listing(&listing(
        "[Offering] 1BR Sublet in Williamsburg $2000",
        "Sublease available for 3 months.",
        Some("Offering"),
    ));

    assert!(!result.accepted);
    assert_eq!(result.reject_reason, Some(RejectReason::ExcludedTerm));
}

#[test]
fn roommate_post_is_excluded() {
    let filter = ListingFilter::new(test_config());
    let result = filter.filter_listing(&listing(
        "[Offering] Room for rent in Williamsburg - $1800",
        "Looking for a roommate to split a 2br.",
        Some("Offering"),
    ));

    assert!(!result.accepted);
    assert_eq!(result.reject_reason, Some(RejectReason::ExcludedTerm));
}

#[test]
fn price_above_range_is_rejected() {
    let filter = ListingFilter::new(test_config());
    let result = filter.filter_listing(&listing(
        "[Offering] 1BR in Williamsburg - $2900/mo",
        "Luxury apartment with amazing views.",
        Some("Offering"),
    ));

    assert!(!result.accepted);
    assert_eq!(result.reject_reason, Some(RejectReason::PriceOutOfRange));
    assert_eq!(result.price, Some(2900));
}

#[test]
fn price_within_range_passes() {
    let filter = ListingFilter::new(test_config());
    let result = filter.filter_listing(&listing(
        "[Offering] 1BR in Bushwick, rent: $2000",
        "Sunny place near the M.",
        Some("Offering"),
    ));

    assert!(result.accepted);
    assert_eq!(result.price, Some(2000));
}

#[test]
fn missing_price_is_not_disqualifying_by_default() {
    let filter = ListingFilter::new(test_config());
    let result = filter.filter_listing(&listing(
        "[Offering] Studio in Bushwick, price negotiable",
        "Message me for details.",
        Some("Offering"),
    ));

    assert!(result.accepted);
    assert_eq!(result.price, None);
}

#[test]
fn missing_price_rejects_when_policy_says_so() {
    let mut config = test_config();
    config.price.reject_missing_price = true;
    let filter = ListingFilter::new(config);

    let result = filter.filter_listing(&listing(
        "[Offering] Studio in Bushwick, price negotiable",
        "Message me for details.",
        Some("Offering"),
    ));

    assert!(!result.accepted);
    assert_eq!(result.reject_reason, Some(RejectReason::MissingPrice));
}

#[test]
fn wrong_neighborhood_is_rejected() {
    let filter = ListingFilter::new(test_config());
    let result = filter.filter_listing(&listing(
        "[Offering] Amazing 1BR uptown - $2200",
        "Beautiful apartment near the park.",
        Some("Offering"),
    ));

    assert!(!result.accepted);
    assert_eq!(result.reject_reason, Some(RejectReason::NoNeighborhoodMatch));
}

#[test]
fn wrong_apartment_type_is_rejected() {
    let filter = ListingFilter::new(test_config());
    let result = filter.filter_listing(&listing(
        "[Offering] Huge loft in Williamsburg - $2500",
        "Open floor plan, exposed brick.",
        Some("Offering"),
    ));

    assert!(!result.accepted);
    assert_eq!(result.reject_reason, Some(RejectReason::NoTypeMatch));
}

#[test]
fn request_posts_are_rejected() {
    let filter = ListingFilter::new(test_config());
    let result = filter.filter_listing(&listing(
        "Looking for 1BR in Williamsburg under $2500",
        "I need an apartment ASAP",
        Some("Looking"),
    ));

    assert!(!result.accepted);
    assert_eq!(result.reject_reason, Some(RejectReason::NotAnOffering));
}

#[test]
fn unconfigured_checks_are_skipped() {
    let mut config = test_config();
    config.apartment_types.clear();
    config.neighborhoods.clear();
    config.price.min = None;
    config.price.max = None;
    let filter = ListingFilter::new(config);

    let result = filter.filter_listing(&listing(
        "[Offering] Some place somewhere",
        "No details at all.",
        Some("Offering"),
    ));

    assert!(result.accepted);
    assert_eq!(result.neighborhood, None);
    assert_eq!(result.apartment_type, None);
}
