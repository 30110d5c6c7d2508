use thiserror::Error;

/// Errors produced while loading or parsing corpus files.
#[derive(Debug, Error)]
pub enum DataError {
    /// Reading a corpus file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The document held no verse elements at all.
    #[error("malformed corpus: {0}")]
    MalformedCorpus(String),
}
