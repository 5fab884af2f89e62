use regex::Regex;

/// Extracts a monthly rent figure from free-text listing bodies.
///
/// Patterns are tried in order of how strongly they are tied to a currency or
/// rent marker; the first plausible hit wins. Bare numbers with no marker are
/// a last resort and only count when the text contains exactly one plausible
/// candidate. Ambiguity yields `None` rather than a guess, so a missed price
/// costs a manual review instead of a bad row in the sheet.
#[derive(Debug, Clone)]
pub struct PriceExtractor {
    range_re: Regex,
    marker_res: Vec<Regex>,
    bare_re: Regex,
    plausible_min: u32,
    plausible_max: u32,
}

impl PriceExtractor {
    pub fn new(plausible_min: u32, plausible_max: u32) -> Self {
        // Written ranges like "$1800-2200" or "1800 to 2200".
        let range_re =
            Regex::new(r"(?i)\$?\s*([\d,]{3,6})\s*(?:-|–|to)\s*\$?\s*([\d,]{3,6})").unwrap();

        // Ordered by marker proximity: dollar sign, per-month suffix, rent
        // keywords. Same ladder of shapes the listings actually use.
        let marker_res = vec![
            Regex::new(r"(?i)\$\s*([\d,]+)(?:\s*/\s*(?:mo|month|m)\b)?").unwrap(),
            Regex::new(r"(?i)([\d,]+)\s*/\s*(?:mo|month|m)\b").unwrap(),
            Regex::new(r"(?i)rent[:\s]+\$?\s*([\d,]+)").unwrap(),
            Regex::new(r"(?i)asking\s+\$?\s*([\d,]+)").unwrap(),
            Regex::new(r"(?i)([\d,]+)\s*(?:per|a)\s+month\b").unwrap(),
        ];

        let bare_re = Regex::new(r"\b(\d{3,5})\b").unwrap();

        Self {
            range_re,
            marker_res,
            bare_re,
            plausible_min,
            plausible_max,
        }
    }

    /// Extract a monthly price in whole dollars, or `None` if nothing
    /// plausible was found. Pure function of the input text.
    pub fn extract(&self, text: &str) -> Option<u32> {
        // A written range takes the midpoint of its bounds.
        if let Some(caps) = self.range_re.captures(text) {
            let lo = parse_amount(&caps[1]);
            let hi = parse_amount(&caps[2]);
            if let (Some(lo), Some(hi)) = (lo, hi) {
                if self.is_plausible(lo) && self.is_plausible(hi) && lo <= hi {
                    return Some((lo + hi) / 2);
                }
            }
        }

        for re in &self.marker_res {
            for caps in re.captures_iter(text) {
                if let Some(price) = parse_amount(&caps[1]) {
                    if self.is_plausible(price) {
                        return Some(price);
                    }
                }
            }
        }

        // No marker anywhere: accept a standalone number only when it is
        // unambiguous.
        let mut candidates: Vec<u32> = self
            .bare_re
            .captures_iter(text)
            .filter_map(|caps| parse_amount(&caps[1]))
            .filter(|p| self.is_plausible(*p))
            .collect();
        candidates.sort_unstable();
        candidates.dedup();
        match candidates.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    fn is_plausible(&self, price: u32) -> bool {
        (self.plausible_min..=self.plausible_max).contains(&price)
    }
}

fn parse_amount(raw: &str) -> Option<u32> {
    raw.replace(',', "").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> PriceExtractor {
        PriceExtractor::new(500, 15_000)
    }

    #[test]
    fn dollar_sign_with_month_suffix() {
        assert_eq!(extractor().extract("Rent is $2,200/month"), Some(2200));
    }

    #[test]
    fn plain_dollar_amount() {
        assert_eq!(extractor().extract("Asking $2500 for this gem"), Some(2500));
    }

    #[test]
    fn per_month_without_dollar_sign() {
        assert_eq!(extractor().extract("2500/mo utilities included"), Some(2500));
    }

    #[test]
    fn rent_keyword() {
        assert_eq!(extractor().extract("rent: 2100 heat included"), Some(2100));
    }

    #[test]
    fn implausible_numbers_are_not_prices() {
        // Apartment number and floor, both outside the plausible band.
        assert_eq!(extractor().extract("Apt 2B, 3rd floor"), None);
    }

    #[test]
    fn street_address_is_not_a_price() {
        // 1250 is in the plausible band but so is nothing else; a lone
        // plausible bare number is accepted, so pair it with a second one to
        // make it ambiguous.
        assert_eq!(extractor().extract("1250 Bedford Ave near 2000 sqft lot"), None);
    }

    #[test]
    fn single_unambiguous_bare_number() {
        assert_eq!(extractor().extract("Charming studio, 1800, no fee"), Some(1800));
    }

    #[test]
    fn written_range_returns_midpoint() {
        assert_eq!(extractor().extract("$1800-2200 depending on floor"), Some(2000));
        assert_eq!(extractor().extract("1800 to 2200 a month"), Some(2000));
    }

    #[test]
    fn marker_beats_bare_candidates() {
        assert_eq!(
            extractor().extract("800 sqft, asking $2400, near 1000 shops"),
            Some(2400)
        );
    }

    #[test]
    fn no_numbers_at_all() {
        assert_eq!(extractor().extract("Sunny studio near the park"), None);
    }
}
