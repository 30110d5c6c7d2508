//! Embedding table — lookup from token ids to dense vectors and back.

use rand::Rng;

use verso_core::{Matrix, Result, VersoError};

/// Embedding table for one language.
///
/// The weight matrix is `embedding_dim × vocab_size`: column `i` holds the
/// embedding vector for vocabulary id `i`. Forward lookup copies the column
/// out, so nothing downstream can mutate the table. Reverse lookup is the
/// greedy decoding primitive: a full Euclidean scan over every column.
#[derive(Debug, Clone)]
pub struct EmbeddingTable {
    weight: Matrix,
}

impl EmbeddingTable {
    /// Create a table with N(0, 1) random columns.
    pub fn new(embedding_dim: usize, vocab_size: usize, rng: &mut impl Rng) -> Self {
        Self {
            weight: Matrix::randn(embedding_dim, vocab_size, rng),
        }
    }

    /// Wrap an existing `embedding_dim × vocab_size` weight matrix.
    pub fn from_matrix(weight: Matrix) -> Self {
        Self { weight }
    }

    /// Embedding vector length.
    pub fn embedding_dim(&self) -> usize {
        self.weight.rows()
    }

    /// Number of vocabulary entries (columns).
    pub fn vocab_size(&self) -> usize {
        self.weight.cols()
    }

    /// Copy out the embedding vector for `id`.
    pub fn lookup(&self, id: usize) -> Result<Vec<f32>> {
        self.weight.col(id).ok_or(VersoError::IdOutOfRange {
            id,
            size: self.weight.cols(),
        })
    }

    /// Embed a whole id sequence in order.
    pub fn lookup_sequence(&self, ids: &[usize]) -> Result<Vec<Vec<f32>>> {
        ids.iter().map(|&id| self.lookup(id)).collect()
    }

    /// Greedy reverse lookup: the id of the column nearest to `query` by
    /// Euclidean distance, together with that distance.
    ///
    /// Ties break to the lowest index (strict `<` during the scan), so the
    /// result is deterministic. O(vocab_size × embedding_dim) per call.
    pub fn nearest(&self, query: &[f32]) -> Result<(usize, f32)> {
        if query.len() != self.weight.rows() {
            return Err(VersoError::ShapeMismatch {
                expected: vec![self.weight.rows()],
                got: vec![query.len()],
            });
        }
        if self.weight.cols() == 0 {
            return Err(VersoError::EmptyTable);
        }

        let dim = self.weight.rows();
        let data = self.weight.as_slice();
        let mut best_id = 0usize;
        let mut best_sq = f32::INFINITY;
        for col in 0..self.weight.cols() {
            let mut sq = 0.0f32;
            for (r, &q) in query.iter().enumerate().take(dim) {
                let d = q - data[r * self.weight.cols() + col];
                sq += d * d;
            }
            if sq < best_sq {
                best_sq = sq;
                best_id = col;
            }
        }
        Ok((best_id, best_sq.sqrt()))
    }
}
