//! Verse text cleaning and tokenization.
//!
//! The rules match the corpus preparation of the experiment:
//! 1. drop inverted punctuation (¡ ¿)
//! 2. pad every other ASCII punctuation mark with spaces, keeping
//!    apostrophes attached to their word
//! 3. collapse runs of spaces
//! 4. lowercase
//!
//! After cleaning, tokens are exactly the whitespace-separated fields.

use std::sync::OnceLock;

use regex::Regex;

fn inverted_punctuation() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[¡¿]").expect("valid inverted punctuation pattern"))
}

fn punctuation() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // ASCII punctuation without the apostrophe
    RE.get_or_init(|| {
        Regex::new(r##"([!"#$%&()*+,\-./:;<=>?@\[\\\]^_`{|}~])"##)
            .expect("valid punctuation pattern")
    })
}

fn spaces() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r" +").expect("valid spaces pattern"))
}

/// Normalize one verse for vocabulary building and encoding.
pub fn clean(text: &str) -> String {
    let stripped = inverted_punctuation().replace_all(text, "");
    let padded = punctuation().replace_all(&stripped, " $1 ");
    let collapsed = spaces().replace_all(&padded, " ");
    collapsed.trim().to_lowercase()
}

/// Split an already-cleaned verse into whitespace tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(String::from).collect()
}
