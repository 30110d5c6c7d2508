//! # verso-data
//!
//! Corpus ingestion for the Verso translation experiment.
//!
//! Provides:
//! - `Corpus` — verse-tagged XML parsing into ordered `(id, text)` records
//! - `text` — cleaning and whitespace tokenization rules
//! - `TokenCounts` — word-frequency statistics per corpus
//!
//! Fetching corpus files over the network is out of scope; callers hand
//! this crate local files or strings.

pub mod corpus;
pub mod error;
pub mod freq;
pub mod text;

pub use corpus::{Corpus, Verse};
pub use error::DataError;
pub use freq::TokenCounts;
