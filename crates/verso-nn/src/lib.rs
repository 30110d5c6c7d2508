//! # verso-nn
//!
//! The encoder-decoder forward pass for the Verso translation experiment.
//!
//! A source verse flows through the pipeline one step at a time:
//! token list → id list → embedded vectors → context vector → greedy
//! nearest-embedding decoding → target token list. All recurrent state is
//! local to one forward pass; the model itself is read-only while
//! translating, so verses are independent of one another.

pub mod activations;
pub mod decoder;
pub mod embedding;
pub mod encoder;
pub mod translator;

pub use decoder::{DecodedStep, Decoder};
pub use embedding::EmbeddingTable;
pub use encoder::Encoder;
pub use translator::{ModelConfig, Translation, Translator};
