//! Case-insensitive keyword matching for the bilingual term lists.
//!
//! Text and keywords are NFKC-normalized and lower-cased before matching so
//! composed and decomposed accents ("prontuário") compare equal.

use aho_corasick::AhoCorasick;
use unicode_normalization::UnicodeNormalization;

/// NFKC + Unicode lower-case.
pub fn normalize(text: &str) -> String {
    text.nfkc().collect::<String>().to_lowercase()
}

/// Fixed keyword list compiled into a single automaton.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    keywords: Vec<String>,
    matcher: Option<AhoCorasick>,
}

impl KeywordSet {
    pub fn new(keywords: &[&str]) -> Self {
        let keywords: Vec<String> = keywords.iter().map(|k| normalize(k)).collect();
        let matcher = match AhoCorasick::new(&keywords) {
            Ok(ac) => Some(ac),
            Err(e) => {
                // Substring scan below still gives the same answers.
                tracing::error!(error = %e, "Keyword automaton build failed");
                None
            }
        };
        Self { keywords, matcher }
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// True if any keyword occurs as a substring.
    pub fn contains_any(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let text = normalize(text);
        match &self.matcher {
            Some(ac) => ac.is_match(&text),
            None => self.keywords.iter().any(|k| text.contains(k.as_str())),
        }
    }

    /// Distinct keywords present, in list order. Overlapping hits count
    /// separately ("dor" and "dor no peito").
    pub fn matched(&self, text: &str) -> Vec<&str> {
        let hits = self.hit_mask(text);
        self.keywords
            .iter()
            .zip(hits)
            .filter(|(_, hit)| *hit)
            .map(|(k, _)| k.as_str())
            .collect()
    }

    pub fn count_distinct(&self, text: &str) -> usize {
        self.hit_mask(text).into_iter().filter(|hit| *hit).count()
    }

    fn hit_mask(&self, text: &str) -> Vec<bool> {
        let mut hits = vec![false; self.keywords.len()];
        if text.is_empty() {
            return hits;
        }
        let text = normalize(text);
        match &self.matcher {
            Some(ac) => {
                for m in ac.find_overlapping_iter(&text) {
                    hits[m.pattern().as_usize()] = true;
                }
            }
            None => {
                for (hit, keyword) in hits.iter_mut().zip(&self.keywords) {
                    *hit = text.contains(keyword.as_str());
                }
            }
        }
        hits
    }
}
