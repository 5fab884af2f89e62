use crate::config::TermSpec;

/// Lowercase, replace punctuation with spaces, collapse runs of whitespace.
pub fn normalize(text: &str) -> String {
    let lowered: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A successful fuzzy match: the canonical label of the matched term and the
/// similarity score (0-100) of its best spelling.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchHit {
    pub canonical: String,
    pub score: f64,
}

/// Approximate text matcher over canonical-label/variant term sets.
///
/// The threshold is on a 0-100 scale and always comes from configuration;
/// lowering it makes matching more permissive.
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    threshold: f64,
}

impl FuzzyMatcher {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Find the best-scoring target term contained in `text`, if any scores
    /// at or above the threshold. Ties go to the term declared earliest in
    /// the config, so results are reproducible run to run.
    pub fn best_match(&self, text: &str, targets: &[TermSpec]) -> Option<MatchHit> {
        let text_norm = normalize(text);
        let words: Vec<&str> = text_norm.split(' ').filter(|w| !w.is_empty()).collect();

        let mut best: Option<MatchHit> = None;
        for target in targets {
            let score = target
                .spellings()
                .iter()
                .map(|variant| term_score(&text_norm, &words, &normalize(variant)))
                .fold(0.0_f64, f64::max);

            if score >= self.threshold {
                let better = match &best {
                    Some(hit) => score > hit.score,
                    None => true,
                };
                if better {
                    best = Some(MatchHit {
                        canonical: target.canonical().to_string(),
                        score,
                    });
                }
            }
        }
        best
    }

    /// Whether any target matches at all.
    pub fn matches_any(&self, text: &str, targets: &[TermSpec]) -> bool {
        self.best_match(text, targets).is_some()
    }
}

/// Score one normalized variant against normalized text.
///
/// Word-boundary containment is an exact hit. Otherwise single-word variants
/// are compared word-by-word with edit-distance similarity; words much
/// shorter or longer than the variant are skipped to keep short tokens from
/// matching everything.
fn term_score(text_norm: &str, words: &[&str], variant: &str) -> f64 {
    if variant.is_empty() {
        return 0.0;
    }

    let padded_text = format!(" {} ", text_norm);
    let padded_term = format!(" {} ", variant);
    if padded_text.contains(&padded_term) {
        return 100.0;
    }

    // Word-by-word fuzzy comparison only makes sense for single-word terms.
    if variant.contains(' ') {
        return 0.0;
    }

    let term_len = variant.chars().count() as i64;
    words
        .iter()
        .filter(|w| {
            let len = w.chars().count() as i64;
            len >= 3 && (len - term_len).abs() <= 2
        })
        .map(|w| strsim::normalized_levenshtein(w, variant) * 100.0)
        .fold(0.0_f64, f64::max)
}
