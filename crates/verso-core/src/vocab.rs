use std::collections::HashMap;

use crate::error::VersoError;
use crate::Result;

/// Bidirectional token ↔ dense id mapping for one language.
///
/// Ids are assigned densely in `[0, len)` in first-seen order, giving an
/// arbitrary but stable enumeration: the same token stream always produces
/// the same mapping. Decoding is an array index; encoding is a hash lookup.
///
/// The vocabulary is built once from the full corpus and never grows —
/// encoding a token it has not seen is an error, not an insertion.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    tokens: Vec<String>,
    ids: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build a vocabulary from a token stream, deduplicating on the fly.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocab = Self {
            tokens: Vec::new(),
            ids: HashMap::new(),
        };
        for token in tokens {
            let token = token.as_ref();
            if !vocab.ids.contains_key(token) {
                vocab.ids.insert(token.to_string(), vocab.tokens.len());
                vocab.tokens.push(token.to_string());
            }
        }
        vocab
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether `token` is in the vocabulary.
    pub fn contains(&self, token: &str) -> bool {
        self.ids.contains_key(token)
    }

    /// The id assigned to `token`.
    pub fn encode(&self, token: &str) -> Result<usize> {
        self.ids
            .get(token)
            .copied()
            .ok_or_else(|| VersoError::UnknownToken(token.to_string()))
    }

    /// Encode a whole token sequence, failing on the first unknown token.
    pub fn encode_sequence<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<usize>> {
        tokens.iter().map(|t| self.encode(t.as_ref())).collect()
    }

    /// The token assigned to `id`.
    pub fn decode(&self, id: usize) -> Result<&str> {
        self.tokens
            .get(id)
            .map(String::as_str)
            .ok_or(VersoError::IdOutOfRange {
                id,
                size: self.tokens.len(),
            })
    }

    /// All tokens in id order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}
