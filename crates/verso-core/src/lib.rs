//! # verso-core
//!
//! Core types for the Verso translation experiment.
//!
//! Provides:
//! - `Matrix` — dense row-major f32 matrix with dimensions fixed at construction
//! - `Vocabulary` — bidirectional token ↔ dense integer id mapping
//! - `VersoError` — shared error type for shape and lookup failures

pub mod error;
pub mod matrix;
pub mod vocab;

pub use error::VersoError;
pub use matrix::Matrix;
pub use vocab::Vocabulary;

pub type Result<T> = std::result::Result<T, VersoError>;
