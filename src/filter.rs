use crate::config::Config;
use crate::matcher::FuzzyMatcher;
use crate::price::PriceExtractor;
use crate::types::{MatchResult, RawListing, RejectReason};
use tracing::debug;

/// Title phrases that mark a post as someone searching rather than offering.
const REQUEST_PHRASES: &[&str] = &["looking for", "searching for", "seeking", "wanted", "need a"];

/// Decides whether one listing meets the configured criteria.
///
/// Checks short-circuit in a fixed order and the first failing one is
/// recorded as the rejection reason: offering heuristic, exclusion terms,
/// apartment type, neighborhood, price. Pure function of the listing and the
/// config it was built from.
pub struct ListingFilter {
    matcher: FuzzyMatcher,
    extractor: PriceExtractor,
    config: Config,
}

impl ListingFilter {
    pub fn new(config: Config) -> Self {
        let matcher = FuzzyMatcher::new(config.fuzzy_threshold);
        let extractor = PriceExtractor::new(config.price.plausible_min, config.price.plausible_max);
        Self {
            matcher,
            extractor,
            config,
        }
    }

    pub fn filter_listing(&self, listing: &RawListing) -> MatchResult {
        let text = listing.full_text();

        if !self.looks_like_offering(listing) {
            debug!(id = %listing.id, "rejected: request post, not an offering");
            return MatchResult::rejected(RejectReason::NotAnOffering);
        }

        if let Some(hit) = self.matcher.best_match(&text, &self.config.exclude_terms) {
            debug!(id = %listing.id, term = %hit.canonical, "rejected: excluded term");
            return MatchResult::rejected(RejectReason::ExcludedTerm);
        }

        let apartment_type = if self.config.apartment_types.is_empty() {
            None
        } else {
            match self.matcher.best_match(&text, &self.config.apartment_types) {
                Some(hit) => Some(hit.canonical),
                None => {
                    debug!(id = %listing.id, "rejected: no apartment type match");
                    return MatchResult::rejected(RejectReason::NoTypeMatch);
                }
            }
        };

        let neighborhood = if self.config.neighborhoods.is_empty() {
            None
        } else {
            match self.matcher.best_match(&text, &self.config.neighborhoods) {
                Some(hit) => Some(hit.canonical),
                None => {
                    debug!(id = %listing.id, "rejected: no neighborhood match");
                    return MatchResult::rejected(RejectReason::NoNeighborhoodMatch);
                }
            }
        };

        let price = self.extractor.extract(&text);
        match price {
            Some(p) => {
                let below = self.config.price.min.map_or(false, |min| p < min);
                let above = self.config.price.max.map_or(false, |max| p > max);
                if below || above {
                    debug!(id = %listing.id, price = p, "rejected: price out of range");
                    let mut result = MatchResult::rejected(RejectReason::PriceOutOfRange);
                    result.price = Some(p);
                    return result;
                }
            }
            None if self.config.price.reject_missing_price => {
                debug!(id = %listing.id, "rejected: no price detected");
                return MatchResult::rejected(RejectReason::MissingPrice);
            }
            // Missing price is non-disqualifying by default; many listings
            // put the number in comments or leave it negotiable.
            None => {}
        }

        MatchResult {
            accepted: true,
            price,
            neighborhood,
            apartment_type,
            reject_reason: None,
        }
    }

    /// Flairs like "[Offering]" mark real listings; without one, request-like
    /// title phrasing disqualifies the post.
    fn looks_like_offering(&self, listing: &RawListing) -> bool {
        if let Some(flair) = &listing.flair {
            let flair = flair.to_lowercase();
            if flair.contains("offering") || flair.contains("listing") {
                return true;
            }
        }
        let title = listing.title.to_lowercase();
        !REQUEST_PHRASES.iter().any(|phrase| title.contains(phrase))
    }
}
