use thiserror::Error;

/// Errors produced by the Verso core and model layers.
#[derive(Debug, Error)]
pub enum VersoError {
    /// Dimensions disagree with what an operation or constructor requires.
    #[error("shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    /// A token was encoded against a vocabulary that does not contain it.
    #[error("unknown token: {0:?}")]
    UnknownToken(String),

    /// An integer id falls outside the vocabulary range `[0, size)`.
    #[error("id {id} out of range for vocabulary of size {size}")]
    IdOutOfRange { id: usize, size: usize },

    /// A reverse lookup was attempted against a table with no columns.
    #[error("cannot search an empty embedding table")]
    EmptyTable,

    /// A forward pass produced a NaN or infinite value.
    #[error("non-finite value encountered in {0}")]
    NonFinite(&'static str),
}
