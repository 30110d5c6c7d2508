//! Verse-tagged XML corpus parsing.
//!
//! The bible-corpus files mark each verse as a leaf element carrying
//! `type="verse"` and an `id` attribute, e.g.
//! `<seg id="b.GEN.1.1" type="verse">In the beginning ...</seg>`.
//! Only those elements matter here, so extraction scans for leaf elements
//! and filters on the `type` attribute instead of building a full XML tree.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::DataError;
use crate::text;

/// One verse record: its corpus id and text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verse {
    pub id: String,
    pub text: String,
}

/// A single-language corpus in verse order.
#[derive(Debug, Clone)]
pub struct Corpus {
    verses: Vec<Verse>,
}

fn leaf_element() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"<([A-Za-z][\w.:-]*)((?:\s+[\w.:-]+="[^"]*")*)\s*>([^<]*)</"#)
            .expect("valid leaf element pattern")
    })
}

fn attribute() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"([\w.:-]+)="([^"]*)""#).expect("valid attribute pattern")
    })
}

impl Corpus {
    /// Parse verse elements out of an XML document.
    ///
    /// Elements without `type="verse"` are skipped; verse text is trimmed.
    /// A document with no verse elements at all is rejected.
    pub fn from_xml_str(xml: &str) -> Result<Self, DataError> {
        let mut verses = Vec::new();
        for captures in leaf_element().captures_iter(xml) {
            let attrs = &captures[2];
            let mut id = None;
            let mut is_verse = false;
            for attr in attribute().captures_iter(attrs) {
                match &attr[1] {
                    "type" => is_verse = &attr[2] == "verse",
                    "id" => id = Some(attr[2].to_string()),
                    _ => {}
                }
            }
            if is_verse {
                verses.push(Verse {
                    id: id.unwrap_or_default(),
                    text: captures[3].trim().to_string(),
                });
            }
        }
        if verses.is_empty() {
            return Err(DataError::MalformedCorpus(
                "no verse elements found".to_string(),
            ));
        }
        Ok(Self { verses })
    }

    /// Read and parse a corpus file.
    pub fn from_xml_file(path: &Path) -> Result<Self, DataError> {
        let xml = std::fs::read_to_string(path)?;
        Self::from_xml_str(&xml)
    }

    /// All verses in document order.
    pub fn verses(&self) -> &[Verse] {
        &self.verses
    }

    /// Number of verses.
    pub fn len(&self) -> usize {
        self.verses.len()
    }

    /// Whether the corpus holds no verses.
    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    /// Apply the cleaning rules to every verse in place.
    pub fn clean(&mut self) {
        for verse in &mut self.verses {
            verse.text = text::clean(&verse.text);
        }
    }

    /// Tokenize every verse, preserving order and ids.
    pub fn tokenized(&self) -> Vec<(String, Vec<String>)> {
        self.verses
            .iter()
            .map(|v| (v.id.clone(), text::tokenize(&v.text)))
            .collect()
    }

    /// Every token of every verse, flattened in corpus order.
    pub fn all_tokens(&self) -> Vec<String> {
        self.verses
            .iter()
            .flat_map(|v| text::tokenize(&v.text))
            .collect()
    }
}
