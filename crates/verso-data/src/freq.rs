//! Word-frequency statistics for a corpus.

use std::collections::HashMap;

/// Token frequency counts over one corpus.
#[derive(Debug, Clone, Default)]
pub struct TokenCounts {
    counts: HashMap<String, usize>,
    total: usize,
}

impl TokenCounts {
    /// Count every token in the stream.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut total = 0;
        for token in tokens {
            *counts.entry(token.as_ref().to_string()).or_insert(0) += 1;
            total += 1;
        }
        Self { counts, total }
    }

    /// Occurrences of `token` (0 when unseen).
    pub fn count(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Number of distinct tokens.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Total token occurrences.
    pub fn total(&self) -> usize {
        self.total
    }

    /// The `n` most frequent tokens, most frequent first.
    ///
    /// Ties order alphabetically so the listing is deterministic.
    pub fn most_common(&self, n: usize) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self
            .counts
            .iter()
            .map(|(token, &count)| (token.as_str(), count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        entries.truncate(n);
        entries
    }
}
