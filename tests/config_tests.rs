use padwatch::config::{Config, PriceConfig, ScrapingConfig, StorageConfig};
use padwatch::types::PadwatchError;
use padwatch::TermSpec;

fn base_config() -> Config {
    Config {
        scraping: ScrapingConfig {
            subreddits: vec!["NYCapartments".to_string()],
            user_agent: "padwatch-test/0.1".to_string(),
            interval_minutes: 30,
            fetch_limit: 50,
        },
        price: PriceConfig::default(),
        neighborhoods: vec![TermSpec::Plain("williamsburg".to_string())],
        apartment_types: Vec::new(),
        exclude_terms: Vec::new(),
        fuzzy_threshold: 80.0,
        storage: StorageConfig::default(),
    }
}

fn assert_config_error(result: padwatch::Result<()>) {
    match result {
        Err(PadwatchError::Config(_)) => {}
        other => panic!("expected a config error, got {:?}", other),
    }
}

#[test]
fn valid_config_passes_validation() {
    assert!(base_config().validate().is_ok());
}

#[test]
fn min_price_above_max_is_rejected() {
    let mut config = base_config();
    config.price.min = Some(3000);
    config.price.max = Some(1500);
    assert_config_error(config.validate());
}

#[test]
fn one_sided_price_bounds_are_fine() {
    let mut config = base_config();
    config.price.min = None;
    config.price.max = Some(2800);
    assert!(config.validate().is_ok());

    config.price.min = Some(1500);
    config.price.max = None;
    assert!(config.validate().is_ok());
}

#[test]
fn fuzzy_threshold_must_stay_in_range() {
    let mut config = base_config();
    config.fuzzy_threshold = 150.0;
    assert_config_error(config.validate());

    config.fuzzy_threshold = -1.0;
    assert_config_error(config.validate());
}

#[test]
fn inverted_plausible_band_is_rejected() {
    let mut config = base_config();
    config.price.plausible_min = 20_000;
    config.price.plausible_max = 15_000;
    assert_config_error(config.validate());
}

#[test]
fn empty_subreddit_list_is_rejected() {
    let mut config = base_config();
    config.scraping.subreddits.clear();
    assert_config_error(config.validate());
}

#[test]
fn blank_canonical_label_is_rejected() {
    let mut config = base_config();
    config.exclude_terms.push(TermSpec::Plain("  ".to_string()));
    assert_config_error(config.validate());
}

#[test]
fn yaml_terms_accept_both_shapes() {
    let yaml = r#"
scraping:
  subreddits: [NYCapartments]
  user_agent: "padwatch-test/0.1"
neighborhoods:
  - bushwick
  - canonical: east village
    variants: [ev]
exclude_terms:
  - sublet
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    config.validate().unwrap();

    assert_eq!(config.neighborhoods[0].canonical(), "bushwick");
    assert_eq!(config.neighborhoods[1].canonical(), "east village");
    assert_eq!(config.neighborhoods[1].spellings(), vec!["east village", "ev"]);
    assert_eq!(config.fuzzy_threshold, 80.0);
    assert_eq!(config.price.plausible_min, 500);
}
